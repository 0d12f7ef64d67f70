//! TxPopDash - Texas Cities Population Dashboard
//!
//! An interactive prompt over 2020 census and 2023 estimated population
//! figures for Texas cities, with statewide totals and a growth-rate
//! deviation report.
//!
//! Exit codes:
//!   0 - Session ended (quit, end of input, or Ctrl-C)
//!   1 - Invalid arguments, unreadable config, or output failure

mod analysis;
mod cli;
mod config;
mod dashboard;
mod models;
mod registry;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE};
use dashboard::{run_session, CommandTable, Dispatcher, SessionOptions};
use registry::LoaderOptions;
use report::{GrowthPlotter, TextHistogram};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{debug, error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so it can raise the log level
    let config = match load_config(&args) {
        Ok(mut config) => {
            config.merge_with_args(&args);
            config
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("TxPopDash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Effective config: {:?}", config);

    if let Err(e) = run_dashboard(&config).await {
        error!("Dashboard failed: {:#}", e);
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .txpopdash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` overrides the CLI-derived level. Output goes to stderr so
/// the prompt on stdout stays readable.
fn init_logging(args: &Args, config: &Config) {
    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the dataset and run the interactive session.
async fn run_dashboard(config: &Config) -> Result<()> {
    let mut stdout = tokio::io::stdout();

    let outcome = registry::load(
        Path::new(&config.data.path),
        &LoaderOptions::from(&config.data),
    );
    let notice = report::generate_load_notice(&outcome)
        .filter(|_| config.report.format == cli::OutputFormat::Text);
    if let Some(notice) = notice {
        stdout
            .write_all(format!("{}\n\n", notice).as_bytes())
            .await
            .context("Failed to write load notice")?;
    }
    let (registry, names) = outcome.into_parts();

    let table = CommandTable::standard();
    let mut dispatcher = Dispatcher::new(&table, registry, names);

    let histogram = TextHistogram::new(
        config.report.histogram_bins,
        config.report.histogram_width,
    );
    let options = SessionOptions {
        format: config.report.format,
        precision: config.report.precision,
        plotter: config
            .report
            .plot
            .then_some(&histogram as &dyn GrowthPlotter),
    };

    let stdin = BufReader::new(tokio::io::stdin());

    tokio::select! {
        end = run_session(&mut dispatcher, stdin, &mut stdout, &options) => {
            let end = end?;
            info!("Session ended: {:?}", end);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted; ending session");
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location; runs before logging is installed
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("Warning: ignoring {}: {:#}", CONFIG_FILE, e);
            Ok(Config::default())
        }
    }
}
