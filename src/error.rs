// src/error.rs
use std::fmt;

#[derive(Debug)]
pub enum WalletError {
    InvalidAmount,
    QuotaExceeded,
    Corrupt(String),
    Storage(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount => write!(f, "Invalid amount"),
            Self::QuotaExceeded => write!(f, "Storage quota exceeded"),
            Self::Corrupt(msg) => write!(f, "Corrupt snapshot: {}", msg),
            Self::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for WalletError {}
