//! Command-line entry point for the strength estimator
//!
//! Replays a JSON match log through the estimator and prints the resulting
//! ratings as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use strength_estimator::config::AppConfig;
use strength_estimator::rating::Estimator;
use strength_estimator::replay::{replay_batch, replay_sequential, MatchLog};
use tracing::{error, info};

/// How games in the match log are folded into updates
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// One update per game, in order
    Sequential,
    /// One update for all games
    Batch,
}

/// Strength Estimator - incremental Glicko-2 rating updates
#[derive(Parser)]
#[command(
    name = "strength-estimator",
    version,
    about = "Replay match results through an incremental Glicko-2 estimator",
    long_about = "Reads a JSON match log (a player's starting rating and a list of games) \
                 and updates the rating either after every game or once for the whole batch, \
                 with uncertainty growing in proportion to the elapsed fraction of a rating period."
)]
struct Args {
    /// Match log to replay
    #[arg(value_name = "MATCH_LOG", required_unless_present = "dry_run")]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Update mode
    #[arg(short, long, value_enum, default_value_t = Mode::Sequential)]
    mode: Mode,

    /// Elapsed rating-period fraction used in batch mode
    #[arg(long, value_name = "FRACTION", default_value_t = 1.0)]
    elapsed: f64,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without replaying")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    strength_estimator::config::validate_config(&config)?;
    Ok(config)
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let estimator = Estimator::new(config.estimator.clone())?;
    let converter = config.scale.converter;

    let Some(input) = &args.input else {
        return Ok(());
    };

    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read match log {}", input.display()))?;
    let log = MatchLog::from_json(&json)
        .with_context(|| format!("Invalid match log {}", input.display()))?;

    info!(
        "Replaying {} games for player at {}",
        log.games.len(),
        log.player
    );

    let report = match args.mode {
        Mode::Sequential => replay_sequential(&estimator, &converter, &log)?,
        Mode::Batch => replay_batch(&estimator, &converter, &log, args.elapsed)?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("{} v{}", config.service.name, strength_estimator::VERSION);
    info!(
        "   tau: {}, epsilon: {}, period: {}s",
        config.estimator.tau, config.estimator.epsilon, config.estimator.period_seconds
    );

    if args.dry_run {
        Estimator::new(config.estimator.clone())?;
        info!("Configuration validation successful");
        return Ok(());
    }

    if let Err(e) = run(&args, &config) {
        error!("Replay failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
