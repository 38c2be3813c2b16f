//! Diff, save, and set commands - turn an edited feature list into patches

use crate::cli::context::CommandContext;
use crate::cli::{DialectArg, Switch};
use anstream::println;
use feature_overlay::error::{Error, Result};
use feature_overlay::merge::{
    AppFeatures, Dialect, OplusFeatures, load_baseline, merged_features, save_patches_from_edit,
};
use feature_overlay::store::FileStore;
use feature_overlay::view::{set_app_enabled, set_oplus_enabled};
use owo_colors::OwoColorize;
use std::io;
use std::path::Path;

/// Options for the save and set commands
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Show the patches without writing the patch file
    pub dry_run: bool,
}

/// Run the diff command: print patches without saving them
pub fn run_diff(ctx: &CommandContext, dialect: DialectArg, edited: &Path) -> Result<()> {
    run_save(ctx, dialect, edited, &SaveOptions { dry_run: true })
}

/// Run the save command
///
/// The edited file is compared against the vendor baseline, so the patch
/// file always describes the full difference from the baseline.
pub fn run_save(
    ctx: &CommandContext,
    dialect: DialectArg,
    edited: &Path,
    options: &SaveOptions,
) -> Result<()> {
    match dialect {
        DialectArg::App => save::<AppFeatures>(ctx, edited, options),
        DialectArg::Oplus => save::<OplusFeatures>(ctx, edited, options),
    }
}

/// Run the set command: switch one feature on or off
///
/// The toggle is applied to the current effective list, which is then
/// saved like an edit. App features must already exist; an unknown oplus
/// name is added.
pub fn run_set(
    ctx: &CommandContext,
    dialect: DialectArg,
    name: &str,
    switch: Switch,
    options: &SaveOptions,
) -> Result<()> {
    let enabled = switch == Switch::On;
    match dialect {
        DialectArg::App => {
            let current = merged_features::<AppFeatures>(&ctx.store, &ctx.config.app_features)?;
            let modified = set_app_enabled(&current, name, enabled)
                .ok_or_else(|| Error::UnknownFeature(name.to_string()))?;
            persist::<AppFeatures>(ctx, &modified, options)
        }
        DialectArg::Oplus => {
            let current =
                merged_features::<OplusFeatures>(&ctx.store, &ctx.config.oplus_features)?;
            let modified = set_oplus_enabled(&current, name, enabled);
            persist::<OplusFeatures>(ctx, &modified, options)
        }
    }
}

fn save<D: Dialect>(ctx: &CommandContext, edited: &Path, options: &SaveOptions) -> Result<()> {
    let bytes = ctx.store.read(edited)?.ok_or_else(|| {
        Error::io(edited, io::Error::new(io::ErrorKind::NotFound, "edited file not found"))
    })?;
    let modified = D::try_decode(&String::from_utf8_lossy(&bytes))?;
    persist::<D>(ctx, &modified, options)
}

/// Diff `modified` against the baseline, print, and write unless dry-run
fn persist<D: Dialect>(
    ctx: &CommandContext,
    modified: &[D::Feature],
    options: &SaveOptions,
) -> Result<()> {
    let paths = D::paths(&ctx.config);
    let baseline = load_baseline::<D>(&ctx.store, paths)?;

    let patches = if options.dry_run {
        D::diff(&baseline, modified)
    } else {
        save_patches_from_edit::<D>(&ctx.store, paths, &baseline, modified)?
    };

    if patches.is_empty() {
        println!("{}", "No differences from baseline".dimmed());
    } else {
        for patch in &patches {
            println!("  {} {patch}", "→".cyan());
        }
    }

    if options.dry_run {
        println!("{}", "Dry run, patch file not written".dimmed());
    } else {
        println!(
            "{} Saved {} patch(es) to {}",
            "✓".green(),
            patches.len(),
            paths.patches.display()
        );
    }
    Ok(())
}
