//! Shared fixtures for feature-overlay tests

#![allow(dead_code)]

mod memory_store;

pub use memory_store::MemoryStore;

use feature_overlay::config::{Config, DialectPaths};
use feature_overlay::types::{AppFeature, OplusFeature, SubNode};
use std::path::{Path, PathBuf};

/// Configuration with every path under `root`
pub fn config_under(root: &Path) -> Config {
    let dialect = |name: &str| DialectPaths {
        baseline: root.join("vendor").join(format!("{name}.xml")),
        patches: root.join("patches").join(format!("{name}.json")),
        output: root.join("module").join(format!("{name}.xml")),
    };
    Config {
        generator: "feature-overlay-test".to_string(),
        app_features: dialect("app"),
        oplus_features: dialect("oplus"),
        labels: None,
    }
}

/// Configuration rooted at a fixed in-memory location
pub fn memory_config() -> Config {
    config_under(&PathBuf::from("/mem"))
}

/// App feature with a `boolean:` payload
pub fn toggle(name: &str, on: bool) -> AppFeature {
    AppFeature::with_args(name, format!("boolean:{on}"))
}

/// App feature with `StringList` sub-nodes
pub fn string_list(name: &str, items: &[&str]) -> AppFeature {
    AppFeature {
        name: name.to_string(),
        args: None,
        sub_nodes: items
            .iter()
            .map(|item| SubNode::new("StringList", *item))
            .collect(),
    }
}

pub fn standard(name: &str) -> OplusFeature {
    OplusFeature::Standard(name.to_string())
}

pub fn unavailable(name: &str) -> OplusFeature {
    OplusFeature::Unavailable(name.to_string())
}

pub const APP_BASELINE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<extend_features>
    <app_feature name="os.feature.dark_mode" args="boolean:true"/>
    <app_feature name="os.feature.max_windows" args="int:3"/>
    <app_feature name="os.feature.allow_list">
        <StringList args="com.example.one"/>
        <StringList args="com.example.two"/>
    </app_feature>
</extend_features>
"#;

pub const OPLUS_BASELINE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<oplus-config>
    <oplus-feature name="oplus.software.display.refresh"/>
    <unavailable-oplus-feature name="oplus.software.audio.boost"/>
</oplus-config>
"#;
