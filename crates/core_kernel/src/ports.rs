//! Collaborator port errors
//!
//! The engines never fetch anything themselves. Economic series (SELIC,
//! IPCA-E, INPC) are supplied by collaborators that may talk to the Central
//! Bank, a cache, or a fixture file. Every such adapter reports failures
//! through [`PortError`], so callers handle them uniformly before a
//! calculation starts.
//!
//! ```text
//! caller ──get_series──▶ SeriesPort (adapter: HTTP, cache, in-memory)
//!   │
//!   └──ordered SeriesPoints──▶ restate / aggregate (pure)
//! ```

use thiserror::Error;

/// Failure reported by a series provider
#[derive(Debug, Error)]
pub enum PortError {
    /// The provider has no data for the requested series
    #[error("Series not found: {series}")]
    NotFound { series: String },

    /// The requested window is longer than the provider serves in one call
    ///
    /// The SGS API refuses daily series spanning more than ten years.
    #[error("Window of {requested_years} years exceeds the provider limit of {max_years} years")]
    WindowTooLong { requested_years: u32, max_years: u32 },

    /// The provider could not be reached or answered with an error status
    #[error("Provider unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider did not answer in time
    #[error("Provider timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The provider answered with values that are not series points
    #[error("Malformed series data: {0}")]
    Malformed(String),
}

impl PortError {
    pub fn not_found(series: impl Into<String>) -> Self {
        PortError::NotFound { series: series.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        PortError::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        PortError::Malformed(message.into())
    }

    /// Returns true if retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Unavailable { .. } | PortError::Timeout { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}
