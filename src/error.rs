//! Error types for truepass operations

use thiserror::Error;

/// Errors that can occur while talking to a node or calling the contract
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Node returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode node response: {0}")]
    Decode(String),

    #[error("ABI mismatch: {0}")]
    Abi(String),

    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    #[error("Transaction {hash} failed: {vm_status}")]
    TransactionFailed { hash: String, vm_status: String },

    #[error("Transaction {hash} not committed after {secs}s")]
    Timeout { hash: String, secs: u64 },

    #[cfg(feature = "rest")]
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors that can occur while creating or loading a session account
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Private key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("Invalid account address: {0}")]
    InvalidAddress(String),
}
