//! Crate error type
//!
//! Only recoverable failures live here (files, JSON, bad tunables). Broken
//! maze contracts panic instead, see `maze::edge`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidSettings {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
