//! Protocol error types

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// An ep0 event buffer was shorter than one full event record.
    #[error("short ep0 event: got {actual} bytes, need {expected}")]
    ShortEvent { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
