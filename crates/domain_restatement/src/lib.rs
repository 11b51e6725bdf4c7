//! Monetary Restatement Domain
//!
//! This crate restates a principal amount over a calculation window the way
//! Brazilian court calculation manuals prescribe: monthly correction by an
//! inflation index (IPCA-E, INPC), default interest governed by time-bounded
//! regimes, and SELIC once it replaces both.
//!
//! # Architecture
//!
//! The engines are pure functions over fully materialised inputs:
//! - **Series**: grouping dated percentage points into monthly factors
//! - **Regime**: choosing the interest method and rate for each month
//! - **Engine**: the month-by-month ledger
//! - **Aggregate**: final factors without a ledger
//! - **Presets**: regime compositions per type of action and debtor
//!
//! Index series are fetched by a [`SeriesPort`] collaborator *before* a
//! calculation starts; the engines never perform I/O.
//!
//! # Month Pipeline
//!
//! ```text
//! index correction -> regime resolved -> interest accrued -> rounded -> row emitted
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_restatement::{restate, RestatementRequest, FixedInterest};
//!
//! let request = RestatementRequest::new(Money::brl(dec!(10000)), window)
//!     .with_index(EconomicIndex::IpcaE, ipca_e_points)
//!     .with_fixed_interest(FixedInterest::simple(dec!(1)));
//!
//! let restatement = restate(&request);
//! println!("{}", restatement.totals.final_value);
//! ```

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod ports;
pub mod presets;
pub mod regime;
pub mod rounding;
pub mod series;
pub mod validation;

pub use aggregate::{aggregate, AggregatePercentages, AggregateRequest, AggregateResult, IndexFactor};
pub use engine::{
    restate, Basis, LedgerRow, Restatement, RestatementOptions, RestatementRequest, StepOrder,
    Totals,
};
pub use error::RestatementError;
pub use ports::{InMemorySeriesAdapter, SeriesPort};
pub use presets::{ActionType, CasePreset, DebtorType, PresetInputs};
pub use regime::{
    resolve, AccrualMethod, FixedInterest, InterestMethod, LegalRatePolicy, RegimeRule,
    ResolvedRegime,
};
pub use rounding::{RoundingLevel, RoundingPolicy};
pub use series::{EconomicIndex, Granularity, IndexSeries, SelicTreatment, SeriesPoint};
pub use validation::{check_daily_series_span, validate_window, SeriesSpanWarning};
