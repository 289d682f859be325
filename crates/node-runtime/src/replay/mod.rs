//! # Transaction Log Replay
//!
//! Drives a session the way a consensus host would, from a text log:
//!
//! ```text
//! # comment
//! 1 0a1b2c...      ← height, hex tx bytes
//! 1 ff00aa...
//! 2 0b3c4d...
//! ```
//!
//! Entries sharing a height form one block:
//! `BeginBlock(h) → DeliverTx* → EndBlock(h) → Commit`.
//! Heights must not decrease.

use gm_01_state_store::StoreError;
use gm_02_governance::GovernanceApi;
use shared_crypto::Hash;
use shared_types::ResultCode;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxLogEntry {
    pub height: u64,
    pub tx: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("line {line}: expected `<height> <hex>`")]
    Malformed { line: usize },

    #[error("line {line}: bad height: {reason}")]
    BadHeight { line: usize, reason: String },

    #[error("line {line}: bad hex: {reason}")]
    BadHex { line: usize, reason: String },

    #[error("line {line}: height {height} is below previous height {previous}")]
    HeightDecreased {
        line: usize,
        height: u64,
        previous: u64,
    },

    #[error("store fault during replay: {0}")]
    Store(#[from] StoreError),
}

/// Parse a transaction log. Blank lines and `#` comments are skipped.
pub fn parse_tx_log(text: &str) -> Result<Vec<TxLogEntry>, ReplayError> {
    let mut entries: Vec<TxLogEntry> = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        let (Some(height), Some(hex_tx), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ReplayError::Malformed { line });
        };
        let height: u64 = height.parse().map_err(|e: std::num::ParseIntError| {
            ReplayError::BadHeight {
                line,
                reason: e.to_string(),
            }
        })?;
        let tx = hex::decode(hex_tx).map_err(|e| ReplayError::BadHex {
            line,
            reason: e.to_string(),
        })?;
        if let Some(last) = entries.last() {
            if height < last.height {
                return Err(ReplayError::HeightDecreased {
                    line,
                    height,
                    previous: last.height,
                });
            }
        }
        entries.push(TxLogEntry { height, tx });
    }
    Ok(entries)
}

/// What a replay did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub blocks: u64,
    pub accepted: u64,
    pub rejected: u64,
    /// Rejections per status code.
    pub rejections: BTreeMap<u32, u64>,
    pub validator_updates: u64,
    pub last_hash: Option<Hash>,
}

/// Replay entries block by block, committing after each block.
pub fn replay<A: GovernanceApi>(
    app: &mut A,
    entries: &[TxLogEntry],
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();

    for block in entries.chunk_by(|a, b| a.height == b.height) {
        let height = block[0].height;
        app.begin_block(height)?;

        for entry in block {
            let result = app.deliver_tx(&entry.tx)?;
            if result.code == ResultCode::Ok {
                summary.accepted += 1;
                info!(height, log = %result.log, "tx accepted");
            } else {
                summary.rejected += 1;
                *summary.rejections.entry(result.code.as_u32()).or_default() += 1;
                warn!(height, code = %result.code, log = %result.log, "tx rejected");
            }
        }

        let updates = app.end_block(height)?;
        for update in &updates {
            info!(
                height,
                pub_key = %update.pub_key,
                power = update.power,
                "validator update"
            );
        }
        summary.validator_updates += updates.len() as u64;

        let hash = app.commit()?;
        summary.blocks += 1;
        summary.last_hash = Some(hash);
    }

    Ok(summary)
}
