//! feature-overlay
//!
//! Keeps user changes to vendor Android feature-flag XML files as small
//! patch lists, and rebuilds the effective files from the untouched vendor
//! baseline plus those patches. Two dialects are supported: the generic
//! `<app_feature>` list and the `<oplus-feature>` availability list.

pub mod codec;
pub mod config;
pub mod error;
pub mod merge;
pub mod patches;
pub mod store;
pub mod types;
pub mod view;

pub use error::{Error, Result};
