//! Merge command - rebuild both merged feature files

use crate::cli::context::CommandContext;
use anstream::println;
use feature_overlay::merge::{DialectOutcome, execute_merge};
use owo_colors::OwoColorize;

/// Run the merge command
///
/// Returns whether both dialects merged.
pub fn run_merge(ctx: &CommandContext) -> bool {
    let report = execute_merge(&ctx.store, &ctx.config);

    print_outcome("app features", &report.app_features);
    print_outcome("oplus features", &report.oplus_features);

    if report.is_success() {
        println!("{}", "Merge complete".green());
    } else {
        println!("{}", "Merge finished with errors".red());
    }
    report.is_success()
}

fn print_outcome(label: &str, outcome: &DialectOutcome) {
    let mark = if outcome.is_success() {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    };
    println!("{mark} {}: {outcome}", label.bold());
}
