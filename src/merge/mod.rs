//! Merge engine for feature lists
//!
//! Two-layer pattern:
//! 1. Apply / Diff - pure functions over in-memory lists
//! 2. Execute - read baselines and patch files, write merged output (effectful)

mod apply;
mod dialect;
mod diff;
mod execute;

pub use apply::{apply_app_patches, apply_oplus_patches};
pub use dialect::{AppFeatures, Dialect, OplusFeatures};
pub use diff::{diff_app_features, diff_oplus_features};
pub use execute::{
    DialectOutcome, MergeReport, execute_merge, load_baseline, load_patches_lenient,
    merge_dialect, merged_features, perform_merge, save_patches_from_edit,
};
