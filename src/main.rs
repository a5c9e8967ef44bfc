//! herakles-lsof - version 0.1.0
//!
//! Lists open files of all running processes with tracing logging.
//! This is the main entry point that runs a scan and handles subcommands.

mod cli;
mod commands;
mod config;
mod startup_checks;

use anyhow::Context;
use clap::Parser;
use herakles_lsof::{output, scan_system, FsProcSource};
use std::io::{self, BufWriter, ErrorKind};
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};

use cli::{Args, Commands, LogLevel};
use commands::{command_check, command_config};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with configured log level.
/// Logs go to stderr so stdout carries only the listing.
fn setup_logging(config: &Config) {
    let log_level = match config.log_level() {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    debug!("Logging initialized with level: {:?}", config.log_level());
}

/// Helper function to load and validate configuration.
/// Exits the process with error code 1 if validation fails.
fn load_validated_config(args: &Args) -> anyhow::Result<Config> {
    let config = resolve_config(args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {:#}", e);
        std::process::exit(1);
    }
    Ok(config)
}

/// Runs one scan and writes the listing to stdout.
fn run_scan(config: &Config) -> anyhow::Result<()> {
    let proc_root = config.proc_root();

    if let Err(e) = startup_checks::validate_requirements(&proc_root) {
        error!("Startup validation failed: {}", e);
        error!("   The listing will be empty or incomplete!");
        // Continue anyway - the scan degrades instead of failing
    }

    let source = FsProcSource::new(proc_root);
    let start = Instant::now();
    let records = scan_system(&source);
    info!(
        "Collected {} records in {:.2}ms",
        records.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match output::write_records(
        &mut out,
        &records,
        config.output_format(),
        config.show_header(),
    ) {
        Ok(()) => Ok(()),
        // Reader went away (e.g. piped into `head`)
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("stdout closed early: {}", e);
            Ok(())
        }
        Err(e) => Err(e).context("Failed to write listing to stdout"),
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {:#}", e);
                std::process::exit(1);
            }
            println!("✅ Configuration is valid");
            return Ok(());
        }

        return show_config(&config, &args.config_format);
    }

    let config = load_validated_config(&args)?;
    setup_logging(&config);

    if let Some(command) = &args.command {
        return match command {
            Commands::Check => {
                if !command_check(&config)? {
                    std::process::exit(1);
                }
                Ok(())
            }
            Commands::Config {
                output,
                format,
                commented,
            } => command_config(output.clone(), format.clone(), *commented),
        };
    }

    if config.output_format() == herakles_lsof::OutputFormat::Json && !config.show_header() {
        warn!("--no-header has no effect on JSON output");
    }

    run_scan(&config)
}
