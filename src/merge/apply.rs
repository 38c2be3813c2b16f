//! Patch application - pure functions
//!
//! No I/O happens here. The baseline is borrowed and never mutated; the
//! merged list is a fresh value recomputed on every call.

use crate::types::{AppAction, AppFeature, AppPatch, OplusAction, OplusFeature, OplusPatch};
use std::collections::HashSet;

/// Apply app feature patches to a baseline (PURE)
///
/// Patches run strictly in order, so a later patch for a name overrides an
/// earlier one:
/// - `ADD` inserts only when no feature with that name exists
/// - `MODIFY` replaces an existing feature wholesale and never creates one
/// - `REMOVE` deletes every feature with that name
///
/// Surviving baseline entries keep their positions and added features are
/// appended in patch order. Each name appears at most once in the result.
#[must_use]
pub fn apply_app_patches(baseline: &[AppFeature], patches: &[AppPatch]) -> Vec<AppFeature> {
    let mut staged = baseline.to_vec();

    for patch in patches {
        match patch.action {
            AppAction::Add => {
                if staged.iter().any(|f| f.name == patch.name) {
                    tracing::debug!(name = %patch.name, "ADD skipped, feature already present");
                } else if let Some(feature) = patch.to_feature() {
                    staged.push(feature);
                }
            }
            AppAction::Modify => {
                match staged.iter_mut().find(|f| f.name == patch.name) {
                    Some(slot) => {
                        if let Some(feature) = patch.to_feature() {
                            *slot = feature;
                        }
                    }
                    None => {
                        tracing::debug!(name = %patch.name, "MODIFY skipped, feature absent");
                    }
                }
            }
            AppAction::Remove => staged.retain(|f| f.name != patch.name),
        }
    }

    dedup_by_name(staged, |f| f.name.as_str())
}

/// Apply oplus feature patches to a baseline (PURE)
///
/// `ENABLE` and `DISABLE` purge every entry with the name and then insert
/// the matching variant, so a name can never be both available and
/// unavailable. An existing name keeps its first position; a new name is
/// appended. `REMOVE` purges without inserting.
#[must_use]
pub fn apply_oplus_patches(baseline: &[OplusFeature], patches: &[OplusPatch]) -> Vec<OplusFeature> {
    let mut staged = baseline.to_vec();

    for patch in patches {
        let position = staged.iter().position(|f| f.name() == patch.name);
        staged.retain(|f| f.name() != patch.name);

        let replacement = match patch.action {
            OplusAction::Enable | OplusAction::Disable => patch.to_feature(),
            OplusAction::Remove => None,
        };
        if let Some(feature) = replacement {
            match position {
                // Entries before the first match are untouched by the purge
                Some(index) => staged.insert(index, feature),
                None => staged.push(feature),
            }
        }
    }

    dedup_by_name(staged, OplusFeature::name)
}

/// Keep the first entry for each name
fn dedup_by_name<T>(items: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(name(item).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubNode;

    fn standard(name: &str) -> OplusFeature {
        OplusFeature::Standard(name.to_string())
    }

    fn unavailable(name: &str) -> OplusFeature {
        OplusFeature::Unavailable(name.to_string())
    }

    #[test]
    fn test_empty_patches_pass_baseline_through() {
        let baseline = vec![
            AppFeature::with_args("f1", "boolean:true"),
            AppFeature::new("f2"),
        ];
        assert_eq!(apply_app_patches(&baseline, &[]), baseline);
    }

    #[test]
    fn test_add_appends_new_feature() {
        let baseline = vec![AppFeature::new("f1")];
        let merged = apply_app_patches(
            &baseline,
            &[AppPatch::add(&AppFeature::with_args("f2", "int:3"))],
        );
        assert_eq!(
            merged,
            vec![AppFeature::new("f1"), AppFeature::with_args("f2", "int:3")]
        );
    }

    #[test]
    fn test_add_never_overwrites() {
        let baseline = vec![AppFeature::with_args("f1", "boolean:true")];
        let merged = apply_app_patches(
            &baseline,
            &[AppPatch::add(&AppFeature::with_args("f1", "boolean:false"))],
        );
        assert_eq!(merged, baseline);
    }

    #[test]
    fn test_modify_replaces_wholesale_in_place() {
        let baseline = vec![
            AppFeature::new("a"),
            AppFeature {
                name: "b".to_string(),
                args: Some("int:1".to_string()),
                sub_nodes: vec![SubNode::new("StringList", "x")],
            },
            AppFeature::new("c"),
        ];
        let replacement = AppFeature::with_args("b", "int:2");
        let merged = apply_app_patches(&baseline, &[AppPatch::modify(&replacement)]);

        assert_eq!(merged[1], replacement);
        assert!(merged[1].sub_nodes.is_empty());
        assert_eq!(merged[0].name, "a");
        assert_eq!(merged[2].name, "c");
    }

    #[test]
    fn test_modify_never_creates() {
        let merged = apply_app_patches(&[], &[AppPatch::modify(&AppFeature::new("ghost"))]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_remove_deletes_every_duplicate() {
        let baseline = vec![
            AppFeature::with_args("f1", "int:1"),
            AppFeature::new("keep"),
            AppFeature::with_args("f1", "int:2"),
        ];
        let merged = apply_app_patches(&baseline, &[AppPatch::remove("f1")]);
        assert_eq!(merged, vec![AppFeature::new("keep")]);
    }

    #[test]
    fn test_add_then_remove_nets_to_absent() {
        let patches = vec![AppPatch::add(&AppFeature::new("x")), AppPatch::remove("x")];
        assert!(apply_app_patches(&[], &patches).is_empty());
    }

    #[test]
    fn test_remove_then_add_reinserts_at_end() {
        let baseline = vec![AppFeature::new("x"), AppFeature::new("y")];
        let patches = vec![
            AppPatch::remove("x"),
            AppPatch::add(&AppFeature::with_args("x", "int:9")),
        ];
        let merged = apply_app_patches(&baseline, &patches);
        assert_eq!(
            merged,
            vec![AppFeature::new("y"), AppFeature::with_args("x", "int:9")]
        );
    }

    #[test]
    fn test_modify_then_modify_keeps_last() {
        let baseline = vec![AppFeature::new("x")];
        let patches = vec![
            AppPatch::modify(&AppFeature::with_args("x", "int:1")),
            AppPatch::modify(&AppFeature::with_args("x", "int:2")),
        ];
        assert_eq!(
            apply_app_patches(&baseline, &patches),
            vec![AppFeature::with_args("x", "int:2")]
        );
    }

    #[test]
    fn test_patch_order_matters() {
        let baseline = vec![AppFeature::new("x")];
        let add = AppPatch::add(&AppFeature::with_args("x", "A"));
        let remove = AppPatch::remove("x");

        let forward = apply_app_patches(&baseline, &[add.clone(), remove.clone()]);
        assert!(forward.is_empty());

        let reversed = apply_app_patches(&baseline, &[remove, add]);
        assert_eq!(reversed, vec![AppFeature::with_args("x", "A")]);
    }

    #[test]
    fn test_modify_after_remove_stays_absent() {
        let baseline = vec![AppFeature::new("x")];
        let patches = vec![
            AppPatch::remove("x"),
            AppPatch::modify(&AppFeature::with_args("x", "A")),
        ];
        assert!(apply_app_patches(&baseline, &patches).is_empty());
    }

    #[test]
    fn test_result_names_are_unique() {
        let baseline = vec![AppFeature::with_args("d", "1"), AppFeature::with_args("d", "2")];
        let merged = apply_app_patches(&baseline, &[]);
        assert_eq!(merged, vec![AppFeature::with_args("d", "1")]);
    }

    #[test]
    fn test_oplus_disable_flips_variant() {
        let merged = apply_oplus_patches(
            &[standard("g1")],
            &[OplusPatch::new("g1", OplusAction::Disable)],
        );
        assert_eq!(merged, vec![unavailable("g1")]);
    }

    #[test]
    fn test_oplus_enable_keeps_position() {
        let baseline = vec![standard("a"), unavailable("b"), standard("c")];
        let merged = apply_oplus_patches(&baseline, &[OplusPatch::new("b", OplusAction::Enable)]);
        assert_eq!(merged, vec![standard("a"), standard("b"), standard("c")]);
    }

    #[test]
    fn test_oplus_new_names_append_in_patch_order() {
        let merged = apply_oplus_patches(
            &[standard("a")],
            &[
                OplusPatch::new("z", OplusAction::Disable),
                OplusPatch::new("m", OplusAction::Enable),
            ],
        );
        assert_eq!(merged, vec![standard("a"), unavailable("z"), standard("m")]);
    }

    #[test]
    fn test_oplus_purges_conflicting_variants() {
        let baseline = vec![standard("x"), unavailable("x"), standard("y")];
        let merged = apply_oplus_patches(&baseline, &[OplusPatch::new("x", OplusAction::Disable)]);
        assert_eq!(merged, vec![unavailable("x"), standard("y")]);
    }

    #[test]
    fn test_oplus_remove() {
        let merged = apply_oplus_patches(
            &[standard("a"), unavailable("b")],
            &[OplusPatch::new("b", OplusAction::Remove)],
        );
        assert_eq!(merged, vec![standard("a")]);
    }
}
