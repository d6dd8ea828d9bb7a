//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when the credentials are present there
//! 2. Otherwise the first config file found by [`find_config_file`]
//!
//! ## Environment Variables
//! - `SERPRO_CONSUMER_KEY`: consumer key (required)
//! - `SERPRO_CONSUMER_SECRET`: consumer secret (required)
//! - `SERPRO_BASE_URL`: gateway base URL
//! - `SERPRO_TIMEOUT_SECS`: request timeout in seconds
//! - `SERPRO_USER_AGENT`: `User-Agent` header value
//!
//! ## File Locations
//! `serpro.{json,toml}` and `config.{json,toml}` in the working directory,
//! then the same names in its parent and grandparent.

use std::path::{Path, PathBuf};

use serpro_domain::{CredentialsConfig, Result, SerproConfig, SerproError};

/// Consumer key variable
pub const ENV_CONSUMER_KEY: &str = "SERPRO_CONSUMER_KEY";
/// Consumer secret variable
pub const ENV_CONSUMER_SECRET: &str = "SERPRO_CONSUMER_SECRET";
/// Base URL override
pub const ENV_BASE_URL: &str = "SERPRO_BASE_URL";
/// Request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "SERPRO_TIMEOUT_SECS";
/// `User-Agent` header value
pub const ENV_USER_AGENT: &str = "SERPRO_USER_AGENT";

const CONFIG_FILE_NAMES: [&str; 4] = ["serpro.json", "serpro.toml", "config.json", "config.toml"];

/// Load configuration from the environment, falling back to a config file.
///
/// The environment wins as soon as either credential variable is set; any
/// problem with it is then reported instead of falling back to a file.
///
/// # Errors
/// Returns `SerproError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<SerproConfig> {
    load_with(|key| std::env::var(key).ok(), || load_from_file(None))
}

fn load_with(
    lookup: impl Fn(&str) -> Option<String>,
    fallback: impl FnOnce() -> Result<SerproConfig>,
) -> Result<SerproConfig> {
    let env_selected =
        lookup(ENV_CONSUMER_KEY).is_some() || lookup(ENV_CONSUMER_SECRET).is_some();
    if !env_selected {
        tracing::debug!("No credentials in environment, trying file");
        return fallback();
    }

    let config = load_from_lookup(lookup).inspect_err(|e| {
        tracing::warn!(error = %e, "Invalid configuration in environment variables");
    })?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from `SERPRO_*` environment variables.
///
/// # Errors
/// Returns `SerproError::Config` if the credentials are missing or a value
/// is invalid.
pub fn load_from_env() -> Result<SerproConfig> {
    load_from_lookup(|key| std::env::var(key).ok())
}

/// Build a configuration from an arbitrary variable source.
pub(crate) fn load_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<SerproConfig> {
    let required = |key: &str| {
        lookup(key).filter(|value| !value.is_empty()).ok_or_else(|| {
            SerproError::Config(format!("Missing required environment variable: {key}"))
        })
    };

    let mut config = SerproConfig {
        credentials: CredentialsConfig {
            consumer_key: required(ENV_CONSUMER_KEY)?,
            consumer_secret: required(ENV_CONSUMER_SECRET)?,
        },
        ..SerproConfig::default()
    };

    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
        config.timeout_secs = timeout
            .trim()
            .parse()
            .map_err(|e| SerproError::Config(format!("Invalid timeout: {e}")))?;
    }
    config.user_agent = lookup(ENV_USER_AGENT);

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, searches the standard locations. Format is chosen by
/// extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `SerproError::Config` if the file is missing, unreadable,
/// malformed or fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<SerproConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SerproError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            SerproError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SerproError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<SerproConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SerproError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SerproError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SerproError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the working directory or its two parents.
pub fn find_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    search_upward_from(&cwd)
}

fn search_upward_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(3)
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}
