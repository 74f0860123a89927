//! Error types for contract violations.
//!
//! Key handling itself never fails: boundaries wrap or clamp. Everything here
//! is either a caller bug (empty rotation, zero limit, bad options) or a
//! terminal I/O failure from the input source.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    /// Rotation or windowing was requested over an empty collection.
    #[error("cannot rotate an empty collection")]
    EmptyCollection,

    /// An option value outside its valid domain.
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption {
        name: &'static str,
        reason: String,
    },

    /// Options could not be parsed.
    #[error("invalid widget configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Another session already owns raw input on this registry.
    #[error("raw input is already owned by another session")]
    SessionBusy,

    /// The underlying terminal failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, InputError>;

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Terminal(e.to_string())
    }
}
