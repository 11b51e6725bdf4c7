//! Core Kernel - Foundational types shared by the calculation engines
//!
//! This crate provides the building blocks used across the domain crates:
//! - Amounts in reais and rates with precise decimal arithmetic
//! - Competence months and date windows for month-by-month restatement
//! - Identifiers for calculation results
//! - The error type every external collaborator (series providers) reports

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Rate};
pub use temporal::{CompetenceMonth, DateRange, TemporalError};
pub use identifiers::{CalculationId, TariffQuoteId};
pub use ports::PortError;
