//! Binds codec, applicator, and differ for each XML dialect
//!
//! The orchestrator is written once against [`Dialect`]; the two marker
//! types select which codec and patch rules a pipeline runs.

use crate::codec::{
    GeneratedBy, decode_app_features, decode_oplus_features, encode_app_features,
    encode_oplus_features, try_decode_app_features, try_decode_oplus_features,
};
use crate::config::{Config, DialectPaths};
use crate::error::Result;
use crate::merge::apply::{apply_app_patches, apply_oplus_patches};
use crate::merge::diff::{diff_app_features, diff_oplus_features};
use crate::types::{AppFeature, AppPatch, OplusFeature, OplusPatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};

/// One feature-list XML format and its patch rules
pub trait Dialect {
    /// Decoded feature record
    type Feature: Clone + PartialEq + Debug;
    /// Patch record persisted in the patch file
    type Patch: Clone + PartialEq + Debug + Display + Serialize + DeserializeOwned;

    /// Short name used in logs and reports
    const NAME: &'static str;

    /// Paths for this dialect within a configuration
    fn paths(config: &Config) -> &DialectPaths;

    /// Decode, reading malformed XML as an empty list
    fn decode(xml: &str) -> Vec<Self::Feature>;

    /// Decode, failing on malformed XML
    fn try_decode(xml: &str) -> Result<Vec<Self::Feature>>;

    /// Encode with the generated-by comment
    fn encode(features: &[Self::Feature], generated_by: &GeneratedBy) -> String;

    /// Reject a patch that could not be applied and written back faithfully
    fn validate(patch: &Self::Patch) -> Result<()>;

    /// Apply patches to a baseline
    fn apply(baseline: &[Self::Feature], patches: &[Self::Patch]) -> Vec<Self::Feature>;

    /// Derive patches turning `original` into `modified`
    fn diff(original: &[Self::Feature], modified: &[Self::Feature]) -> Vec<Self::Patch>;
}

/// `<extend_features>` / `<app_feature>` files
#[derive(Debug, Clone, Copy)]
pub struct AppFeatures;

/// `<oplus-config>` files
#[derive(Debug, Clone, Copy)]
pub struct OplusFeatures;

impl Dialect for AppFeatures {
    type Feature = AppFeature;
    type Patch = AppPatch;

    const NAME: &'static str = "app";

    fn paths(config: &Config) -> &DialectPaths {
        &config.app_features
    }

    fn decode(xml: &str) -> Vec<AppFeature> {
        decode_app_features(xml)
    }

    fn try_decode(xml: &str) -> Result<Vec<AppFeature>> {
        try_decode_app_features(xml)
    }

    fn encode(features: &[AppFeature], generated_by: &GeneratedBy) -> String {
        encode_app_features(features, generated_by)
    }

    fn validate(patch: &AppPatch) -> Result<()> {
        patch.validate()
    }

    fn apply(baseline: &[AppFeature], patches: &[AppPatch]) -> Vec<AppFeature> {
        apply_app_patches(baseline, patches)
    }

    fn diff(original: &[AppFeature], modified: &[AppFeature]) -> Vec<AppPatch> {
        diff_app_features(original, modified)
    }
}

impl Dialect for OplusFeatures {
    type Feature = OplusFeature;
    type Patch = OplusPatch;

    const NAME: &'static str = "oplus";

    fn paths(config: &Config) -> &DialectPaths {
        &config.oplus_features
    }

    fn decode(xml: &str) -> Vec<OplusFeature> {
        decode_oplus_features(xml)
    }

    fn try_decode(xml: &str) -> Result<Vec<OplusFeature>> {
        try_decode_oplus_features(xml)
    }

    fn encode(features: &[OplusFeature], generated_by: &GeneratedBy) -> String {
        encode_oplus_features(features, generated_by)
    }

    fn validate(patch: &OplusPatch) -> Result<()> {
        patch.validate()
    }

    fn apply(baseline: &[OplusFeature], patches: &[OplusPatch]) -> Vec<OplusFeature> {
        apply_oplus_patches(baseline, patches)
    }

    fn diff(original: &[OplusFeature], modified: &[OplusFeature]) -> Vec<OplusPatch> {
        diff_oplus_features(original, modified)
    }
}
