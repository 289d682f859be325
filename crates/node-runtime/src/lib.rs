//! # Node Runtime Library
//!
//! Bootstrap pieces of the `node-runtime` binary, exposed for testing.
//!
//! - `container/` - command-line inputs and governance configuration
//! - `genesis/` - genesis loading and the height-0 commit
//! - `replay/` - block-by-block replay of a transaction log

pub mod container;
pub mod genesis;
pub mod replay;

pub use container::{NodeConfig, USAGE};
pub use replay::{parse_tx_log, replay, ReplayError, ReplaySummary, TxLogEntry};
