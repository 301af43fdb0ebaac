//! Error types for the casino audit

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AuditError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AuditError::Io { path: path.into(), source }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: unknown action kind '{token}'")]
    UnknownActionKind { line: u64, token: String },

    #[error("line {line}: invalid amount '{value}'")]
    InvalidAmount { line: u64, value: String },

    #[error("line {line}: invalid rate '{value}'")]
    InvalidRate { line: u64, value: String },

    #[error("line {line}: invalid match outcome '{value}'")]
    InvalidOutcome { line: u64, value: String },

    #[error("line {line}: invalid bet side '{value}'")]
    InvalidSide { line: u64, value: String },

    #[error("line {line}: missing field '{field}'")]
    MissingField { line: u64, field: &'static str },

    #[error("malformed record: {0}")]
    Csv(#[from] csv::Error),
}

/// Legality failure of a Bet or Withdraw against the balance it would draw on
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("negative amount {amount}")]
    NegativeAmount { amount: i64 },

    #[error("amount {amount} exceeds balance {balance}")]
    InsufficientBalance { amount: i64, balance: i64 },

    #[error("applying {delta} to balance {balance} overflows")]
    BalanceOverflow { balance: i64, delta: i64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}
