//! CLI commands

pub mod context;
pub mod edit;
pub mod list;
pub mod merge;

pub use context::CommandContext;
pub use edit::{SaveOptions, run_diff, run_save, run_set};
pub use list::run_list;
pub use merge::run_merge;

use clap::ValueEnum;

/// Which feature file a command acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    /// `<app_feature>` list
    App,
    /// `<oplus-feature>` list
    Oplus,
}

/// Desired state for the set command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    /// Enable / declare available
    On,
    /// Disable / declare unavailable
    Off,
}
