//! # Node Configuration
//!
//! Command-line inputs plus the governance configuration file.
//!
//! ```text
//! node-runtime <config.json> <genesis.json> [txlog]
//! ```
//!
//! The log level comes from `RUST_LOG` and defaults to `info`.

use gm_02_governance::GovConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Usage line printed on bad arguments.
pub const USAGE: &str = "usage: node-runtime <config.json> <genesis.json> [txlog]";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// JSON file holding a [`GovConfig`]. Missing fields take defaults.
    pub config_path: PathBuf,
    /// JSON list of genesis entities.
    pub genesis_path: PathBuf,
    /// Optional transaction log to replay, one `height hex` entry per line.
    pub txlog_path: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),

    #[error("invalid governance config: {0}")]
    InvalidGovConfig(String),
}

impl NodeConfig {
    /// Parse positional arguments (program name already stripped).
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let config_path = args
            .next()
            .ok_or(ConfigError::MissingArgument("config.json"))?;
        let genesis_path = args
            .next()
            .ok_or(ConfigError::MissingArgument("genesis.json"))?;
        let txlog_path = args.next().map(PathBuf::from);
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }
        Ok(Self {
            config_path: config_path.into(),
            genesis_path: genesis_path.into(),
            txlog_path,
        })
    }
}

/// Parse a governance configuration document.
pub fn parse_gov_config(json: &str) -> Result<GovConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::InvalidGovConfig(e.to_string()))
}
