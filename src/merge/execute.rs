//! Merge execution - effectful operations
//!
//! This module reads baselines and patch files through a [`FileStore`],
//! runs the pure applicator/differ, and writes the results back. Each
//! output is encoded fully in memory before its single write.

use crate::codec::GeneratedBy;
use crate::config::{Config, DialectPaths};
use crate::error::{Error, Result};
use crate::merge::dialect::{AppFeatures, Dialect, OplusFeatures};
use crate::patches::{load_patches, save_patches};
use crate::store::FileStore;
use tracing::{debug, error, info, warn};

/// Outcome of one dialect's merge pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialectOutcome {
    /// Merged file written
    Merged {
        /// Features in the merged file
        features: usize,
        /// Patches that were applied
        patches: usize,
    },
    /// Pipeline failed; no merged file was written
    Failed(String),
}

impl DialectOutcome {
    /// Whether the merged file was written
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }
}

impl std::fmt::Display for DialectOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merged { features, patches } => {
                write!(f, "{features} features ({patches} patches applied)")
            }
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Result of a full merge across both dialects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// `<app_feature>` pipeline
    pub app_features: DialectOutcome,
    /// `<oplus-feature>` pipeline
    pub oplus_features: DialectOutcome,
}

impl MergeReport {
    /// Check if both pipelines succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.app_features.is_success() && self.oplus_features.is_success()
    }
}

/// Read and decode a dialect's baseline.
///
/// A missing file is an empty baseline; malformed XML is logged and also
/// read as empty. Only an I/O failure is an error.
pub fn load_baseline<D: Dialect>(
    store: &dyn FileStore,
    paths: &DialectPaths,
) -> Result<Vec<D::Feature>> {
    match store.read(&paths.baseline)? {
        Some(bytes) => Ok(D::decode(&String::from_utf8_lossy(&bytes))),
        None => {
            debug!(dialect = D::NAME, path = %paths.baseline.display(), "no baseline file");
            Ok(Vec::new())
        }
    }
}

/// Read a dialect's patch file, degrading to no patches if it is malformed.
///
/// Individual patches that fail [`Dialect::validate`] (an empty name, a
/// sub-node type that is not a `...List` tag) are dropped with a warning.
pub fn load_patches_lenient<D: Dialect>(
    store: &dyn FileStore,
    paths: &DialectPaths,
) -> Result<Vec<D::Patch>> {
    match load_patches::<D::Patch>(store, &paths.patches) {
        Ok(patches) => Ok(patches
            .into_iter()
            .filter(|patch| match D::validate(patch) {
                Ok(()) => true,
                Err(e) => {
                    warn!(dialect = D::NAME, error = %e, "dropping invalid patch");
                    false
                }
            })
            .collect()),
        Err(Error::PatchFormat(message)) => {
            error!(dialect = D::NAME, %message, "ignoring malformed patch file");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Compute the merged list in memory without writing anything.
pub fn merged_features<D: Dialect>(
    store: &dyn FileStore,
    paths: &DialectPaths,
) -> Result<Vec<D::Feature>> {
    let baseline = load_baseline::<D>(store, paths)?;
    let patches = load_patches_lenient::<D>(store, paths)?;
    Ok(D::apply(&baseline, &patches))
}

/// Run one dialect's pipeline: baseline + patches -> merged file.
pub fn merge_dialect<D: Dialect>(
    store: &dyn FileStore,
    paths: &DialectPaths,
    generated_by: &GeneratedBy,
) -> Result<DialectOutcome> {
    let baseline = load_baseline::<D>(store, paths)?;
    let patches = load_patches_lenient::<D>(store, paths)?;
    let merged = D::apply(&baseline, &patches);

    let xml = D::encode(&merged, generated_by);
    store.write(&paths.output, xml.as_bytes())?;

    info!(
        dialect = D::NAME,
        baseline = baseline.len(),
        patches = patches.len(),
        merged = merged.len(),
        output = %paths.output.display(),
        "wrote merged features"
    );

    Ok(DialectOutcome::Merged {
        features: merged.len(),
        patches: patches.len(),
    })
}

fn run_pipeline<D: Dialect>(
    store: &dyn FileStore,
    config: &Config,
    generated_by: &GeneratedBy,
) -> DialectOutcome {
    merge_dialect::<D>(store, D::paths(config), generated_by).unwrap_or_else(|e| {
        error!(dialect = D::NAME, error = %e, "merge failed");
        DialectOutcome::Failed(e.to_string())
    })
}

/// Execute both merge pipelines (EFFECTFUL)
///
/// Both dialects are always attempted; a failure in one does not stop the
/// other. The report records each outcome.
pub fn execute_merge(store: &dyn FileStore, config: &Config) -> MergeReport {
    let generated_by = GeneratedBy::now(config.generator.clone());
    MergeReport {
        app_features: run_pipeline::<AppFeatures>(store, config, &generated_by),
        oplus_features: run_pipeline::<OplusFeatures>(store, config, &generated_by),
    }
}

/// Run a full merge, reporting only overall success
pub fn perform_merge(store: &dyn FileStore, config: &Config) -> bool {
    execute_merge(store, config).is_success()
}

/// Persist a user edit as the dialect's patch file.
///
/// Diffs `original` against `modified`, overwrites the patch file with the
/// result, and returns the patches written.
pub fn save_patches_from_edit<D: Dialect>(
    store: &dyn FileStore,
    paths: &DialectPaths,
    original: &[D::Feature],
    modified: &[D::Feature],
) -> Result<Vec<D::Patch>> {
    let patches = D::diff(original, modified);
    if patches.is_empty() {
        debug!(dialect = D::NAME, "edit matches the original");
    }
    save_patches(store, &paths.patches, &patches)?;
    info!(
        dialect = D::NAME,
        count = patches.len(),
        path = %paths.patches.display(),
        "saved patches"
    );
    Ok(patches)
}
