//! # Runtime Container
//!
//! Inputs the binary needs before a governance session can be opened.

pub mod config;

pub use config::{parse_gov_config, ConfigError, NodeConfig, DEFAULT_LOG_FILTER, USAGE};
