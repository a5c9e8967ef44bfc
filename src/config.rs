//! Configuration management for herakles-lsof.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use anyhow::{bail, Context};
use herakles_lsof::{OutputFormat, DEFAULT_PROC_ROOT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Default config file locations, first existing one wins.
const DEFAULT_CONFIG_PATHS: [&str; 6] = [
    "/etc/herakles/lsof.yaml",
    "/etc/herakles/lsof.yml",
    "/etc/herakles/lsof.json",
    "./herakles-lsof.yaml",
    "./herakles-lsof.yml",
    "./herakles-lsof.json",
];

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Mount point of the proc filesystem
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,

    /// "table" | "json"
    #[serde(alias = "output-format")]
    pub output_format: Option<OutputFormat>,

    /// Print the header row of the table
    #[serde(alias = "show-header")]
    pub show_header: Option<bool>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            output_format: Some(OutputFormat::Table),
            show_header: Some(true),
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
        }
    }
}

impl Config {
    pub fn proc_root(&self) -> PathBuf {
        self.proc_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT))
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    pub fn show_header(&self) -> bool {
        self.show_header.unwrap_or(true)
    }

    /// Configured log level; invalid names fall back to the default.
    pub fn log_level(&self) -> LogLevel {
        self.log_level
            .as_deref()
            .and_then(LogLevel::from_name)
            .unwrap_or(LogLevel::Warn)
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> anyhow::Result<()> {
    let root = cfg.proc_root();
    if !root.is_dir() {
        bail!("proc_root is not a directory: {}", root.display());
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if LogLevel::from_name(level).is_none() {
            bail!(
                "Invalid log_level '{}', expected one of off, error, warn, info, debug, trace",
                level
            );
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }
    if let Some(format) = args.format {
        config.output_format = Some(format);
    }
    if args.no_header {
        config.show_header = Some(false);
    }
    if let Some(level) = args.log_level {
        config.log_level = Some(format!("{:?}", level).to_lowercase());
    }

    Ok(config)
}

/// Loads a config file, or the first default location that exists.
/// Fields missing from the file keep their defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(p) => PathBuf::from(p),
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let loaded = parse_config(&content, &path)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    tracing::info!("Loaded configuration from: {}", path.display());

    Ok(merge_defaults(loaded))
}

/// Parses config content, choosing the format by file extension (YAML default).
fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

fn merge_defaults(loaded: Config) -> Config {
    let defaults = Config::default();
    Config {
        proc_root: loaded.proc_root.or(defaults.proc_root),
        output_format: loaded.output_format.or(defaults.output_format),
        show_header: loaded.show_header.or(defaults.show_header),
        log_level: loaded.log_level.or(defaults.log_level),
    }
}

/// Renders configuration in the requested format.
pub fn render_config(config: &Config, format: &ConfigFormat) -> anyhow::Result<String> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: &ConfigFormat) -> anyhow::Result<()> {
    println!("{}", render_config(config, format)?);
    Ok(())
}
