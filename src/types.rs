//! Core types for feature-overlay
//!
//! Feature records for both XML dialects and the patch shapes that
//! describe a user's changes on top of a vendor baseline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Suffix shared by every nested list tag (`StringList`, `IntList`, ...)
const SUB_NODE_SUFFIX: &str = "List";

// =============================================================================
// Dialect A: app features
// =============================================================================

/// A typed list entry nested inside a complex app feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubNode {
    /// Element tag, e.g. `StringList`
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional discriminator within the tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Payload, possibly empty
    #[serde(default)]
    pub args: String,
}

impl SubNode {
    /// Create an unnamed sub-node
    pub fn new(kind: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            args: args.into(),
        }
    }

    /// Create a named sub-node
    pub fn named(kind: impl Into<String>, name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: Some(name.into()),
            args: args.into(),
        }
    }

    /// Whether `kind` can be written as a nested element and read back.
    ///
    /// The tag must be a plain XML name (letter or `_`, then letters,
    /// digits, `_`, `-`, `.`) ending in `List`.
    pub fn is_valid_kind(kind: &str) -> bool {
        let mut chars = kind.chars();
        kind.ends_with(SUB_NODE_SUFFIX)
            && chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }
}

/// An `<app_feature>` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppFeature {
    /// Unique key within a feature list
    pub name: String,
    /// Free-form payload such as `boolean:true` or `int:3`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Nested list entries, empty for simple features
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_nodes: Vec<SubNode>,
}

impl AppFeature {
    /// Create a feature with no payload
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
            sub_nodes: Vec::new(),
        }
    }

    /// Create a feature carrying a payload
    pub fn with_args(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Some(args.into()),
            sub_nodes: Vec::new(),
        }
    }

    /// Whether this feature carries nested list entries
    pub fn is_complex(&self) -> bool {
        !self.sub_nodes.is_empty()
    }

    /// Whether this feature is a plain name/args entry
    pub fn is_simple(&self) -> bool {
        !self.is_complex()
    }
}

/// Change kind for an app feature patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppAction {
    /// Insert a feature unless one with that name exists
    Add,
    /// Replace an existing feature wholesale
    Modify,
    /// Delete every feature with that name
    Remove,
}

impl std::fmt::Display for AppAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "ADD"),
            Self::Modify => write!(f, "MODIFY"),
            Self::Remove => write!(f, "REMOVE"),
        }
    }
}

/// A single named change to the app feature list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPatch {
    /// Feature name the patch targets
    pub name: String,
    /// What to do with it
    pub action: AppAction,
    /// Payload for ADD/MODIFY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Sub-nodes for ADD/MODIFY
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_nodes: Vec<SubNode>,
}

impl AppPatch {
    /// Patch that adds `feature`
    pub fn add(feature: &AppFeature) -> Self {
        Self::carrying(AppAction::Add, feature)
    }

    /// Patch that replaces the same-named feature with `feature`
    pub fn modify(feature: &AppFeature) -> Self {
        Self::carrying(AppAction::Modify, feature)
    }

    /// Patch that removes `name`
    pub fn remove(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: AppAction::Remove,
            args: None,
            sub_nodes: Vec::new(),
        }
    }

    fn carrying(action: AppAction, feature: &AppFeature) -> Self {
        Self {
            name: feature.name.clone(),
            action,
            args: feature.args.clone(),
            sub_nodes: feature.sub_nodes.clone(),
        }
    }

    /// The feature this patch would produce, if it produces one
    pub fn to_feature(&self) -> Option<AppFeature> {
        match self.action {
            AppAction::Add | AppAction::Modify => Some(AppFeature {
                name: self.name.clone(),
                args: self.args.clone(),
                sub_nodes: self.sub_nodes.clone(),
            }),
            AppAction::Remove => None,
        }
    }

    /// Check the patch can be applied and written back faithfully
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::PatchFormat(format!("{} patch with empty name", self.action)));
        }
        if let Some(node) = self.sub_nodes.iter().find(|n| !SubNode::is_valid_kind(&n.kind)) {
            return Err(Error::PatchFormat(format!(
                "{}: invalid sub-node type {:?}",
                self.name, node.kind
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for AppPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.action, self.name)?;
        if let Some(args) = &self.args {
            write!(f, " = {args}")?;
        }
        if !self.sub_nodes.is_empty() {
            write!(f, " (+{} sub-nodes)", self.sub_nodes.len())?;
        }
        Ok(())
    }
}

// =============================================================================
// Dialect B: oplus features
// =============================================================================

/// An `<oplus-feature>` or `<unavailable-oplus-feature>` entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OplusFeature {
    /// Feature declared available
    Standard(String),
    /// Feature declared unavailable
    Unavailable(String),
}

impl OplusFeature {
    /// Feature name regardless of variant
    pub fn name(&self) -> &str {
        match self {
            Self::Standard(name) | Self::Unavailable(name) => name,
        }
    }

    /// Whether this is the available variant
    pub const fn is_standard(&self) -> bool {
        matches!(self, Self::Standard(_))
    }
}

impl std::fmt::Display for OplusFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard(name) => write!(f, "{name} (available)"),
            Self::Unavailable(name) => write!(f, "{name} (unavailable)"),
        }
    }
}

/// Change kind for an oplus feature patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OplusAction {
    /// Declare the feature available
    Enable,
    /// Declare the feature unavailable
    Disable,
    /// Drop the feature entirely
    Remove,
}

impl std::fmt::Display for OplusAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enable => write!(f, "ENABLE"),
            Self::Disable => write!(f, "DISABLE"),
            Self::Remove => write!(f, "REMOVE"),
        }
    }
}

/// A single named change to the oplus feature list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OplusPatch {
    /// Feature name the patch targets
    pub name: String,
    /// What to do with it
    pub action: OplusAction,
}

impl OplusPatch {
    /// Create a patch
    pub fn new(name: impl Into<String>, action: OplusAction) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// Patch that reproduces `feature` as-is
    pub fn producing(feature: &OplusFeature) -> Self {
        match feature {
            OplusFeature::Standard(name) => Self::new(name.clone(), OplusAction::Enable),
            OplusFeature::Unavailable(name) => Self::new(name.clone(), OplusAction::Disable),
        }
    }

    /// The feature this patch would produce, if it produces one
    pub fn to_feature(&self) -> Option<OplusFeature> {
        match self.action {
            OplusAction::Enable => Some(OplusFeature::Standard(self.name.clone())),
            OplusAction::Disable => Some(OplusFeature::Unavailable(self.name.clone())),
            OplusAction::Remove => None,
        }
    }

    /// Check the patch targets a real name
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::PatchFormat(format!("{} patch with empty name", self.action)));
        }
        Ok(())
    }
}

impl std::fmt::Display for OplusPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.action, self.name)
    }
}
