//! Error types for the interactive session.

use std::io;
use thiserror::Error;

/// Rejected menu input. Always recovered by re-prompting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("choice {0} is out of range")]
    OutOfRange(i64),
}

/// Errors that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("console output failed: {0}")]
    Io(#[from] io::Error),
}
