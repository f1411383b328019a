//! gpuinfo CLI: classify Apple GPUs by Metal device name.

mod commands;
mod config;
mod units;

use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::classify::ClassifyArgs;
use config::Settings;

#[derive(Parser)]
#[command(name = "gpuinfo", version, about = "Apple GPU specifications from the device name")]
struct Cli {
    /// Log filter (e.g. "info", "gpuinfo_core=debug"); overrides GPUINFO_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the full specification of a device
    Classify {
        /// Device name (e.g. "Apple M2 Max"); defaults to [device] name in gpuinfo.toml
        name: Option<String>,
        /// GPU core count reported by the OS
        #[arg(long)]
        cores: Option<u32>,
        /// Total system memory in bytes
        #[arg(long)]
        memory: Option<u64>,
        /// Die variant (unspecified, binned-die, full-die)
        #[arg(long)]
        variant: Option<String>,
        /// Output format (text, json, toml)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show how a device name is parsed
    Identify {
        /// Device name
        name: String,
    },
    /// List every tabulated chip
    Table {
        /// Restrict to one family (mobile, desktop)
        #[arg(long)]
        family: Option<String>,
    },
    /// Check configuration and the classification table
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let env_filter = std::env::var(config::LOG_ENV).ok();
    let settings = Settings::load(&cwd, cli.log_level.as_deref(), env_filter.as_deref())?;
    init_logging(&settings.log_filter)?;
    tracing::debug!(source = ?settings.source, filter = %settings.log_filter, "settings resolved");

    match cli.command {
        Commands::Classify {
            name,
            cores,
            memory,
            variant,
            format,
        } => {
            let args = ClassifyArgs {
                name,
                cores,
                memory,
                variant,
                format,
            };
            commands::classify::run(&args, &settings)
        }
        Commands::Identify { name } => commands::identify::run(&name),
        Commands::Table { family } => commands::table::run(family.as_deref()),
        Commands::Doctor => commands::doctor::run(&settings),
    }
}

fn init_logging(filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter '{filter}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_classify_flags() {
        let cli = Cli::try_parse_from([
            "gpuinfo",
            "--log-level",
            "debug",
            "classify",
            "Apple M1 Pro",
            "--cores",
            "14",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Classify {
                name, cores, format, ..
            } => {
                assert_eq!(name.as_deref(), Some("Apple M1 Pro"));
                assert_eq!(cores, Some(14));
                assert_eq!(format.as_deref(), Some("json"));
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn identify_requires_a_name() {
        assert!(Cli::try_parse_from(["gpuinfo", "identify"]).is_err());
    }
}
