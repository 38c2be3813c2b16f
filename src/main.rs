//! feature-overlay command line

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use cli::{CommandContext, DialectArg, SaveOptions, Switch};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Patch-based overlay for vendor Android feature-flag XML files
#[derive(Debug, Parser)]
#[command(name = "feature-overlay", version, about)]
struct Cli {
    /// TOML file overriding the default paths
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rebuild the merged feature files from baselines and patches
    Merge,
    /// Show the effective features of one dialect
    List {
        /// Feature file to list
        #[arg(value_enum)]
        dialect: DialectArg,
        /// JSON object mapping feature names to descriptions
        #[arg(long, value_name = "FILE")]
        labels: Option<PathBuf>,
    },
    /// Show the patches an edited feature file corresponds to
    Diff {
        /// Feature file the edit belongs to
        #[arg(value_enum)]
        dialect: DialectArg,
        /// Edited XML file
        edited: PathBuf,
    },
    /// Replace the patch file with the patches for an edited feature file
    Save {
        /// Feature file the edit belongs to
        #[arg(value_enum)]
        dialect: DialectArg,
        /// Edited XML file
        edited: PathBuf,
        /// Show the patches without writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Switch one feature on or off and save the resulting patches
    Set {
        /// Feature file the feature belongs to
        #[arg(value_enum)]
        dialect: DialectArg,
        /// Feature name
        name: String,
        /// New state
        #[arg(value_enum)]
        state: Switch,
        /// Show the patches without writing them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Log level used when `RUST_LOG` is unset
const fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> feature_overlay::Result<bool> {
    let ctx = CommandContext::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Merge => return Ok(cli::run_merge(&ctx)),
        Commands::List { dialect, labels } => cli::run_list(&ctx, dialect, labels.as_deref())?,
        Commands::Diff { dialect, edited } => cli::run_diff(&ctx, dialect, &edited)?,
        Commands::Save {
            dialect,
            edited,
            dry_run,
        } => cli::run_save(&ctx, dialect, &edited, &SaveOptions { dry_run })?,
        Commands::Set {
            dialect,
            name,
            state,
            dry_run,
        } => cli::run_set(&ctx, dialect, &name, state, &SaveOptions { dry_run })?,
    }
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            anstream::eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "debug");
        assert_eq!(default_level(2), "trace");
        assert_eq!(default_level(u8::MAX), "trace");
    }

    #[test]
    fn test_set_parses_state() {
        let cli = Cli::try_parse_from(["feature-overlay", "set", "app", "os.feature.a", "off"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Set {
                state: Switch::Off,
                dry_run: false,
                ..
            }
        ));
    }

    #[test]
    fn test_verbose_flag_counts() {
        let cli = Cli::try_parse_from(["feature-overlay", "-v", "merge"]).unwrap();
        assert_eq!(default_level(cli.verbose), "debug");
    }
}
