//! Patch derivation - pure functions
//!
//! The inverse of [`super::apply`]: given a baseline and a desired final
//! list, produce the patches that turn one into the other. Only decoded
//! feature lists are compared, never raw XML text.

use crate::types::{AppFeature, AppPatch, OplusAction, OplusFeature, OplusPatch};
use std::collections::{HashMap, HashSet};

/// Derive app feature patches (PURE)
///
/// Features only in `modified` become `ADD`, features whose record differs
/// in any field (sub-node order included) become `MODIFY`, and names only
/// in `original` become `REMOVE`. Additions and modifications come first,
/// in `modified` order, followed by removals in `original` order.
#[must_use]
pub fn diff_app_features(original: &[AppFeature], modified: &[AppFeature]) -> Vec<AppPatch> {
    let mut by_name: HashMap<&str, &AppFeature> = HashMap::new();
    for feature in original {
        by_name.entry(feature.name.as_str()).or_insert(feature);
    }

    let mut patches = Vec::new();
    let mut emitted = HashSet::new();

    for feature in modified {
        if !emitted.insert(feature.name.as_str()) {
            continue;
        }
        match by_name.get(feature.name.as_str()) {
            None => patches.push(AppPatch::add(feature)),
            Some(existing) if *existing != feature => patches.push(AppPatch::modify(feature)),
            Some(_) => {}
        }
    }

    let kept: HashSet<&str> = modified.iter().map(|f| f.name.as_str()).collect();
    let mut removed = HashSet::new();
    for feature in original {
        let name = feature.name.as_str();
        if !kept.contains(name) && removed.insert(name) {
            patches.push(AppPatch::remove(name));
        }
    }

    patches
}

/// Derive oplus feature patches (PURE)
///
/// Only the variant matters: a name whose variant changed, or that is new,
/// gets `ENABLE`/`DISABLE` per its variant in `modified`; a name missing
/// from `modified` gets `REMOVE`.
#[must_use]
pub fn diff_oplus_features(original: &[OplusFeature], modified: &[OplusFeature]) -> Vec<OplusPatch> {
    let mut by_name: HashMap<&str, &OplusFeature> = HashMap::new();
    for feature in original {
        by_name.entry(feature.name()).or_insert(feature);
    }

    let mut patches = Vec::new();
    let mut emitted = HashSet::new();

    for feature in modified {
        if !emitted.insert(feature.name()) {
            continue;
        }
        let unchanged = by_name
            .get(feature.name())
            .is_some_and(|existing| existing.is_standard() == feature.is_standard());
        if !unchanged {
            patches.push(OplusPatch::producing(feature));
        }
    }

    let kept: HashSet<&str> = modified.iter().map(OplusFeature::name).collect();
    let mut removed = HashSet::new();
    for feature in original {
        let name = feature.name();
        if !kept.contains(name) && removed.insert(name) {
            patches.push(OplusPatch::new(name, OplusAction::Remove));
        }
    }

    patches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::apply::{apply_app_patches, apply_oplus_patches};
    use crate::types::{AppAction, SubNode};

    #[test]
    fn test_changed_args_emit_modify() {
        let original = vec![AppFeature::with_args("f1", "boolean:true")];
        let modified = vec![AppFeature::with_args("f1", "boolean:false")];

        let patches = diff_app_features(&original, &modified);
        assert_eq!(
            patches,
            vec![AppPatch {
                name: "f1".to_string(),
                action: AppAction::Modify,
                args: Some("boolean:false".to_string()),
                sub_nodes: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_identical_lists_emit_nothing() {
        let list = vec![AppFeature::with_args("a", "int:1"), AppFeature::new("b")];
        assert!(diff_app_features(&list, &list).is_empty());
    }

    #[test]
    fn test_reordering_alone_emits_nothing() {
        let original = vec![AppFeature::new("a"), AppFeature::new("b")];
        let modified = vec![AppFeature::new("b"), AppFeature::new("a")];
        assert!(diff_app_features(&original, &modified).is_empty());
    }

    #[test]
    fn test_add_and_remove() {
        let original = vec![AppFeature::new("old")];
        let modified = vec![AppFeature::with_args("new", "int:3")];

        let patches = diff_app_features(&original, &modified);
        assert_eq!(
            patches,
            vec![
                AppPatch::add(&AppFeature::with_args("new", "int:3")),
                AppPatch::remove("old"),
            ]
        );
    }

    #[test]
    fn test_sub_node_order_is_significant() {
        let feature = |nodes: Vec<SubNode>| AppFeature {
            name: "list".to_string(),
            args: None,
            sub_nodes: nodes,
        };
        let a = SubNode::new("StringList", "a");
        let b = SubNode::new("StringList", "b");
        let original = vec![feature(vec![a.clone(), b.clone()])];
        let modified = vec![feature(vec![b, a])];

        let patches = diff_app_features(&original, &modified);
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].action, AppAction::Modify);
        assert_eq!(patches[0].sub_nodes, modified[0].sub_nodes);
    }

    #[test]
    fn test_diff_then_apply_reproduces_modified() {
        let original = vec![
            AppFeature::with_args("keep", "int:1"),
            AppFeature::with_args("change", "int:1"),
            AppFeature::new("drop"),
        ];
        let modified = vec![
            AppFeature::with_args("keep", "int:1"),
            AppFeature::with_args("change", "int:2"),
            AppFeature::with_args("fresh", "boolean:true"),
        ];

        let patches = diff_app_features(&original, &modified);
        assert_eq!(apply_app_patches(&original, &patches), modified);
    }

    #[test]
    fn test_oplus_variant_change() {
        let original = vec![OplusFeature::Standard("g1".to_string())];
        let modified = vec![OplusFeature::Unavailable("g1".to_string())];
        assert_eq!(
            diff_oplus_features(&original, &modified),
            vec![OplusPatch::new("g1", OplusAction::Disable)]
        );
    }

    #[test]
    fn test_oplus_new_and_removed() {
        let original = vec![
            OplusFeature::Standard("same".to_string()),
            OplusFeature::Unavailable("gone".to_string()),
        ];
        let modified = vec![
            OplusFeature::Standard("same".to_string()),
            OplusFeature::Standard("new".to_string()),
            OplusFeature::Unavailable("new-off".to_string()),
        ];

        let patches = diff_oplus_features(&original, &modified);
        assert_eq!(
            patches,
            vec![
                OplusPatch::new("new", OplusAction::Enable),
                OplusPatch::new("new-off", OplusAction::Disable),
                OplusPatch::new("gone", OplusAction::Remove),
            ]
        );
        assert_eq!(apply_oplus_patches(&original, &patches), modified);
    }
}
