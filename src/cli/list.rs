//! List command - show the effective feature set without writing it

use crate::cli::DialectArg;
use crate::cli::context::CommandContext;
use anstream::println;
use feature_overlay::error::Result;
use feature_overlay::merge::{AppFeatures, Dialect, OplusFeatures, merged_features};
use feature_overlay::view::{FeatureRow, Labels};
use owo_colors::OwoColorize;
use std::path::Path;

/// Run the list command
pub fn run_list(ctx: &CommandContext, dialect: DialectArg, labels: Option<&Path>) -> Result<()> {
    let labels = labels
        .or(ctx.config.labels.as_deref())
        .map(|path| Labels::load(&ctx.store, path))
        .unwrap_or_default();

    let rows = match dialect {
        DialectArg::App => rows::<AppFeatures>(ctx, |f| FeatureRow::from_app(f, &labels))?,
        DialectArg::Oplus => rows::<OplusFeatures>(ctx, |f| FeatureRow::from_oplus(f, &labels))?,
    };

    if rows.is_empty() {
        println!("{}", "No features".dimmed());
        return Ok(());
    }

    for row in &rows {
        match row.enabled {
            Some(false) => println!("{}", row.dimmed()),
            _ => println!("{row}"),
        }
    }
    println!();
    println!("{}", format!("{} feature(s)", rows.len()).dimmed());
    Ok(())
}

fn rows<D: Dialect>(
    ctx: &CommandContext,
    to_row: impl Fn(&D::Feature) -> FeatureRow,
) -> Result<Vec<FeatureRow>> {
    let merged = merged_features::<D>(&ctx.store, D::paths(&ctx.config))?;
    Ok(merged.iter().map(to_row).collect())
}
