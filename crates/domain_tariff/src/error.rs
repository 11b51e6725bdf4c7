//! Tariff domain errors

use thiserror::Error;

/// Errors that can occur when configuring tariffs
///
/// Evaluation itself never fails; these come from validating rule sets and
/// resolving regions before evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TariffError {
    /// A rule's parameters are inconsistent
    #[error("Invalid rule '{id}': {reason}")]
    InvalidRule {
        id: String,
        reason: String,
    },

    /// Two rules share an id
    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    /// Region code not recognised
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// Category code not recognised
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl TariffError {
    /// Creates an invalid rule error
    pub fn invalid_rule(id: impl Into<String>, reason: impl Into<String>) -> Self {
        TariffError::InvalidRule {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
