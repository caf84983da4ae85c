// File: src/error.rs
use thiserror::Error;

/// Errors raised by the construction surfaces of the crate.
///
/// Query operations (day membership, title search) are total and never fail;
/// every variant here is a local, construction-time rejection with no retry
/// semantics.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("invalid calendar data: {0}")]
    InvalidCalendarData(String),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
