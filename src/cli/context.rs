//! Shared command context for CLI commands
//!
//! Extracts common setup code shared by every command.

use feature_overlay::config::Config;
use feature_overlay::error::Result;
use feature_overlay::store::LocalFileStore;
use std::path::Path;
use tracing::debug;

/// Shared context for CLI commands that touch feature files
pub struct CommandContext {
    /// Resolved paths and generator name
    pub config: Config,
    /// Filesystem access
    pub store: LocalFileStore,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Loads the TOML configuration when a path is given, otherwise uses
    /// the on-device defaults.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                Config::load(path)?
            }
            None => Config::default(),
        };

        Ok(Self {
            config,
            store: LocalFileStore,
        })
    }
}
