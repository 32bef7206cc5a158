//! modget CLI - Mod downloader
//!
//! Resolves mod IDs on the lookup site to CDN files and saves the latest
//! release of each one into an output directory.

mod commands;
mod config;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// modget - download the latest release of each mod
#[derive(Parser)]
#[command(name = "modget")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Comma-separated list of mod IDs to download
    #[arg(long, value_name = "IDS")]
    mod_ids: Option<String>,

    /// Directory to save downloaded mods (created if missing)
    #[arg(long, value_name = "DIR")]
    output_dir: PathBuf,

    /// Logging level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long, default_value = "INFO", value_name = "LEVEL")]
    log_level: String,

    /// JSON file with resolver settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lookup site base URL
    #[arg(long, env = "MODGET_LOOKUP_URL")]
    lookup_url: Option<String>,

    /// CDN base URL
    #[arg(long, env = "MODGET_CDN_URL")]
    cdn_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Connect timeout in seconds
    #[arg(long, value_name = "SECS")]
    connect_timeout: Option<u64>,

    /// Overall request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, default_value = "human")]
    output: OutputFormat,

    /// Keep processing after a mod fails instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Resolve download URLs without downloading anything
    #[arg(long)]
    dry_run: bool,

    /// Show a progress bar (best combined with --log-level WARNING)
    #[arg(long)]
    progress: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    Human,
    Json,
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level);

    let overrides = config::Overrides {
        lookup_url: cli.lookup_url,
        cdn_url: cli.cdn_url,
        user_agent: cli.user_agent,
        connect_timeout_secs: cli.connect_timeout,
        timeout_secs: cli.timeout,
    };
    let settings = config::load(cli.config.as_deref(), overrides)?;

    let request = commands::DownloadRequest {
        mod_ids: cli.mod_ids.as_deref().unwrap_or_default(),
        output_dir: &cli.output_dir,
        keep_going: cli.keep_going,
        dry_run: cli.dry_run,
        show_progress: cli.progress,
    };

    commands::download_mods(&settings, request, cli.output).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_flag_selects_report_format() {
        let cli = Cli::try_parse_from([
            "modget",
            "--output-dir",
            "mods",
            "--output",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.output, OutputFormat::Json));
        assert_eq!(cli.output_dir, PathBuf::from("mods"));
    }

    #[test]
    fn test_format_flag_is_rejected() {
        let err = Cli::try_parse_from(["modget", "--output-dir", "mods", "--format", "json"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
