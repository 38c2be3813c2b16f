//! Where baselines, patch files, and merged outputs live
//!
//! Defaults point at the on-device locations. A TOML file may override any
//! subset of them; unnamed values keep their defaults, and the per-dialect
//! defaults are derived from `module_dir` and `patch_dir` so relocating
//! those two moves everything beneath them.
//!
//! ```toml
//! module_dir = "/data/adb/modules/feature_overlay"
//!
//! [app_features]
//! baseline = "/my_product/etc/extension/com.oplus.app-features.xml"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Tool name written into generated files
pub const DEFAULT_GENERATOR: &str = "feature-overlay";

const DEFAULT_MODULE_DIR: &str = "/data/adb/modules/feature_overlay";
const DEFAULT_PATCH_DIR: &str = "/data/adb/feature_overlay";

const APP_FEATURES_XML: &str = "my_product/etc/extension/com.oplus.app-features.xml";
const OPLUS_FEATURES_XML: &str = "my_product/etc/permissions/com.oplus.oplus-feature.xml";
const APP_PATCHES_JSON: &str = "app_feature_patches.json";
const OPLUS_PATCHES_JSON: &str = "oplus_feature_patches.json";

/// The three files one dialect's pipeline touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectPaths {
    /// Vendor baseline XML, read-only
    pub baseline: PathBuf,
    /// User patch JSON
    pub patches: PathBuf,
    /// Merged XML written by each merge
    pub output: PathBuf,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tool name for the generated-by comment
    pub generator: String,
    /// Paths for `<app_feature>` files
    pub app_features: DialectPaths,
    /// Paths for `<oplus-feature>` files
    pub oplus_features: DialectPaths,
    /// Optional name -> description table used when listing
    pub labels: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_dirs(Path::new(DEFAULT_MODULE_DIR), Path::new(DEFAULT_PATCH_DIR))
    }
}

impl Config {
    /// Defaults rooted at the given module and patch directories
    pub fn with_dirs(module_dir: &Path, patch_dir: &Path) -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_string(),
            app_features: DialectPaths {
                baseline: Path::new("/").join(APP_FEATURES_XML),
                patches: patch_dir.join(APP_PATCHES_JSON),
                output: module_dir.join(APP_FEATURES_XML),
            },
            oplus_features: DialectPaths {
                baseline: Path::new("/").join(OPLUS_FEATURES_XML),
                patches: patch_dir.join(OPLUS_PATCHES_JSON),
                output: module_dir.join(OPLUS_FEATURES_XML),
            },
            labels: None,
        }
    }

    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text, filling gaps from defaults
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.resolve())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    generator: Option<String>,
    module_dir: Option<PathBuf>,
    patch_dir: Option<PathBuf>,
    labels: Option<PathBuf>,
    #[serde(default)]
    app_features: PartialPaths,
    #[serde(default)]
    oplus_features: PartialPaths,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialPaths {
    baseline: Option<PathBuf>,
    patches: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl PartialPaths {
    fn over(self, defaults: DialectPaths) -> DialectPaths {
        DialectPaths {
            baseline: self.baseline.unwrap_or(defaults.baseline),
            patches: self.patches.unwrap_or(defaults.patches),
            output: self.output.unwrap_or(defaults.output),
        }
    }
}

impl ConfigFile {
    fn resolve(self) -> Config {
        let module_dir = self
            .module_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULE_DIR));
        let patch_dir = self
            .patch_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATCH_DIR));
        let defaults = Config::with_dirs(&module_dir, &patch_dir);

        Config {
            generator: self.generator.unwrap_or(defaults.generator),
            app_features: self.app_features.over(defaults.app_features),
            oplus_features: self.oplus_features.over(defaults.oplus_features),
            labels: self.labels,
        }
    }
}
