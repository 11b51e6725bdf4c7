//! Restatement domain errors
//!
//! The engines themselves never fail: empty series and unmatched regimes
//! degrade to neutral values. These errors belong to the edges a caller owns,
//! such as window validation and series retrieval.

use core_kernel::{PortError, TemporalError};
use thiserror::Error;

/// Errors that can occur around a restatement
#[derive(Debug, Error)]
pub enum RestatementError {
    /// The calculation window ends before it starts
    #[error("Invalid window: end {end} is before start {start}")]
    InvalidWindow {
        start: String,
        end: String,
    },

    /// Calendar error from the core types
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    /// A series collaborator failed
    #[error("Series retrieval failed: {0}")]
    Series(#[from] PortError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl RestatementError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        RestatementError::Validation(message.into())
    }

    /// Returns true if the caller can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RestatementError::Series(_))
    }
}
