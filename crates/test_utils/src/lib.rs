//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! restatement and tariff test suites.
//!
//! # Modules
//!
//! - `fixtures`: The reference scenario, series and tariff inputs
//! - `builders`: Builder for restatement and aggregate requests
//! - `assertions`: Custom assertion helpers for ledgers and cost results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
