//! leanbars CLI - Convert LEAN quote tick archives into bar series.

use anyhow::Result;
use clap::Parser;
use leanbars_lib::{Resolution, SecurityType};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;

use config::Settings;

#[derive(Parser)]
#[command(name = "leanbars")]
#[command(
    about = "Convert LEAN quote tick archives into second, minute, hour and daily bars",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Comma-separated symbols (e.g., EURUSD,GBPUSD)
    symbols: String,

    /// Security type (e.g., forex, cfd, equity)
    security_type: SecurityType,

    /// Market identifier (e.g., oanda)
    market: String,

    /// First day to convert (YYYYMMDD)
    from: String,

    /// Last day to convert, inclusive (YYYYMMDD)
    to: String,

    /// Root of the LEAN data folder. Overrides the config file.
    #[arg(long, env = "LEANBARS_DATA_FOLDER")]
    data_folder: Option<PathBuf>,

    /// Settings file holding "data-folder"
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Resolutions to produce, comma-separated. Defaults to all.
    #[arg(short, long, value_delimiter = ',')]
    resolutions: Vec<Resolution>,

    /// Maximum symbols converted at once
    #[arg(long, default_value = "1")]
    concurrency: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(&cli.config)?;
    let data_folder = settings.data_folder(cli.data_folder);

    commands::convert::convert(commands::convert::ConvertArgs {
        symbols: &cli.symbols,
        security_type: cli.security_type,
        market: &cli.market,
        from: &cli.from,
        to: &cli.to,
        data_folder,
        resolutions: cli.resolutions,
        concurrency: cli.concurrency,
        quiet: cli.quiet,
    })
    .await
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
