//! # Result Codes
//!
//! Status codes reported to the consensus host for every transaction.
//! The numeric values are part of the wire contract and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of CheckTx/DeliverTx/Query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ResultCode {
    Ok = 0,
    InternalError = 1,
    EncodingError = 2,
    UnknownRequest = 3,
    Unauthorized = 4,
    UnknownEntity = 100,
    UnknownGroup = 101,
    UnknownProposal = 102,
    DuplicateProposal = 103,
    DuplicateGroup = 104,
    DuplicateMember = 105,
    DuplicateVote = 106,
    InvalidVotingPower = 107,
    InvalidVote = 108,
    InvalidMember = 109,
}

impl ResultCode {
    /// Numeric wire value.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Whether this is `Ok`.
    pub fn is_ok(self) -> bool {
        self == ResultCode::Ok
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.as_u32())
    }
}

/// Result of a host request: a code, optional payload and a human-readable log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub code: ResultCode,
    pub data: Vec<u8>,
    pub log: String,
}

impl TxResult {
    /// Success with no payload.
    pub fn ok() -> Self {
        Self {
            code: ResultCode::Ok,
            data: Vec::new(),
            log: String::new(),
        }
    }

    /// Success carrying a payload.
    pub fn ok_with_data(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::ok()
        }
    }

    /// Failure with a code and message.
    pub fn error(code: ResultCode, log: impl Into<String>) -> Self {
        Self {
            code,
            data: Vec::new(),
            log: log.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code.is_ok()
    }
}
