//! Presentation helpers for listing features
//!
//! Nothing here affects merging. The "enabled" reading of an app feature is
//! a heuristic over its payload, and labels are a plain lookup table the
//! caller loads and passes in.

use crate::store::FileStore;
use crate::types::{AppFeature, OplusFeature};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

const BOOLEAN_PREFIX: &str = "boolean:";

/// Read a `boolean:` payload as a toggle state.
///
/// Returns `None` for any other payload, including a `boolean:` prefix
/// followed by something other than `true`/`false`.
pub fn enabled_from_args(args: Option<&str>) -> Option<bool> {
    let value = args?.trim().strip_prefix(BOOLEAN_PREFIX)?;
    match value.trim() {
        v if v.eq_ignore_ascii_case("true") => Some(true),
        v if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Copy of `feature` with its payload set to `boolean:<enabled>`
#[must_use]
pub fn with_enabled(feature: &AppFeature, enabled: bool) -> AppFeature {
    AppFeature {
        args: Some(format!("{BOOLEAN_PREFIX}{enabled}")),
        ..feature.clone()
    }
}

/// Copy of an app feature list with `name` switched on or off.
///
/// Every feature with that name gets the `boolean:` payload. Returns `None`
/// when no feature carries the name; a toggle never invents a feature.
pub fn set_app_enabled(features: &[AppFeature], name: &str, enabled: bool) -> Option<Vec<AppFeature>> {
    if !features.iter().any(|f| f.name == name) {
        return None;
    }
    Some(
        features
            .iter()
            .map(|f| if f.name == name { with_enabled(f, enabled) } else { f.clone() })
            .collect(),
    )
}

/// Copy of an oplus feature list with `name` declared available or not.
///
/// An existing entry flips variant in place; an unknown name is appended.
pub fn set_oplus_enabled(features: &[OplusFeature], name: &str, enabled: bool) -> Vec<OplusFeature> {
    let wanted = if enabled {
        OplusFeature::Standard(name.to_string())
    } else {
        OplusFeature::Unavailable(name.to_string())
    };
    let mut updated: Vec<OplusFeature> = features
        .iter()
        .map(|f| if f.name() == name { wanted.clone() } else { f.clone() })
        .collect();
    if !features.iter().any(|f| f.name() == name) {
        updated.push(wanted);
    }
    updated
}

/// Feature name -> human description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels(HashMap<String, String>);

impl Labels {
    /// Build from any name/description pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Load a JSON object of `{"name": "description"}`.
    ///
    /// A missing, unreadable, or malformed file yields an empty table;
    /// labels are cosmetic.
    pub fn load(store: &dyn FileStore, path: &Path) -> Self {
        let bytes = match store.read(path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, "could not read labels");
                return Self::default();
            }
        };
        serde_json::from_slice(&bytes).map(Self).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed labels file");
            Self::default()
        })
    }

    /// Description for `name`, if known
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of labelled names
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One line of a feature listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    /// Feature name
    pub name: String,
    /// Toggle state, when the feature reads as one
    pub enabled: Option<bool>,
    /// Payload summary
    pub value: Option<String>,
    /// Description from the label table
    pub label: Option<String>,
}

impl FeatureRow {
    /// Row for an app feature
    pub fn from_app(feature: &AppFeature, labels: &Labels) -> Self {
        let value = if feature.is_complex() {
            Some(format!("{} sub-nodes", feature.sub_nodes.len()))
        } else {
            feature.args.clone()
        };
        Self {
            name: feature.name.clone(),
            enabled: enabled_from_args(feature.args.as_deref()),
            value,
            label: labels.get(&feature.name).map(str::to_string),
        }
    }

    /// Row for an oplus feature
    pub fn from_oplus(feature: &OplusFeature, labels: &Labels) -> Self {
        Self {
            name: feature.name().to_string(),
            enabled: Some(feature.is_standard()),
            value: None,
            label: labels.get(feature.name()).map(str::to_string),
        }
    }
}

impl std::fmt::Display for FeatureRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.enabled {
            Some(true) => "[on] ",
            Some(false) => "[off]",
            None => "[-]  ",
        };
        write!(f, "{state} {}", self.name)?;
        if let Some(value) = &self.value {
            write!(f, " = {value}")?;
        }
        if let Some(label) = &self.label {
            write!(f, "  # {label}")?;
        }
        Ok(())
    }
}
