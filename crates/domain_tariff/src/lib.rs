//! Court Tariff Domain
//!
//! Prices the court-process line items of a case (filing fees, appeal
//! preparation, bailiff diligences, certificates) from typed costing rules.
//!
//! # Architecture
//!
//! - **Rules**: fixed, percentage-with-bounds and distance formulas
//! - **Engine**: evaluates rules against per-item inputs into line items
//! - **Exemption**: legal-aid handling as pre- or post-processing
//! - **Catalog / Schedule**: default rule sets per category and the regional
//!   tables of the federal courts
//!
//! # Evaluation
//!
//! ```text
//! rules ──Exemption::apply_before──▶ evaluate(rules, inputs) ──Exemption::apply_after──▶ CostResult
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_tariff::{evaluate, default_rules, TariffCategory, TariffInput};
//!
//! let rules = default_rules(TariffCategory::CivilActions);
//! let inputs = HashMap::from([("distribuicao".to_string(), TariffInput::claim(dec!(10000)))]);
//! let result = evaluate(&rules, &inputs);
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod exemption;
pub mod rule;
pub mod schedule;

pub use catalog::{default_rules, TariffCategory};
pub use engine::{evaluate, CostLineItem, CostResult};
pub use error::TariffError;
pub use exemption::{Exemption, ExemptionMode, GratuityPolicy};
pub use rule::{validate_rules, TariffFormula, TariffInput, TariffRule};
pub use schedule::{PostageEntry, Region, RegionalSchedule, TableIConfig, TableIIIItem};
