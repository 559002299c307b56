//! Configuration resolution
//!
//! Priority per key: environment variable → TOML config file → compiled
//! default. The port additionally honors the command line (highest
//! priority, merged by the caller). A missing config file is fine; a
//! file that exists but does not parse is a startup error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CONFIG_PATH: &str = "pinguinos.toml";
const DEFAULT_MODEL_PATH: &str = "penguins_rf.onnx";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Raw TOML config file contents; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub cohere_api_key: Option<String>,
    pub database_url: Option<String>,
    pub model_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub upstream_timeout_secs: Option<u64>,
    pub rng_seed: Option<u64>,
}

impl TomlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))
    }
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// API key for the hosted vision service. Required: the whole demo
    /// is the upstream call.
    pub cohere_api_key: String,
    /// Store connection string. Absent → degraded mode (no writes,
    /// empty community listing), not a startup failure.
    pub database_url: Option<String>,
    /// Classifier artifact path. Load failure at startup disables
    /// classification only.
    pub model_path: PathBuf,
    pub upstream_timeout: Duration,
    /// Seed for the enrichment RNG; unset means entropy-seeded
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Resolve configuration from environment, TOML file, and defaults.
    /// `cli_port` is the already-parsed command-line port, if given.
    pub fn resolve(config_path: &Path, cli_port: Option<u16>) -> Result<Self> {
        let file = TomlConfig::load(config_path)?;

        let cohere_api_key = env_string("COHERE_API_KEY")
            .or(file.cohere_api_key)
            .ok_or_else(|| {
                Error::Config(
                    "COHERE_API_KEY not configured (set the environment variable \
                     or cohere_api_key in the config file)"
                        .to_string(),
                )
            })?;

        let port = cli_port
            .or_else(|| env_parse("PINGUINOS_PORT"))
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);

        let upstream_timeout_secs = env_parse("PINGUINOS_UPSTREAM_TIMEOUT_SECS")
            .or(file.upstream_timeout_secs)
            .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS);

        Ok(Self {
            port,
            cohere_api_key,
            database_url: env_string("PINGUINOS_DB_URL").or(file.database_url),
            model_path: env_string("PINGUINOS_MODEL_PATH")
                .map(PathBuf::from)
                .or(file.model_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            rng_seed: env_parse("PINGUINOS_RNG_SEED").or(file.rng_seed),
        })
    }
}

/// Non-empty environment variable, or None
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = env_string(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparseable {name}={raw}");
            None
        }
    }
}
