//! Restatement DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::CalculationId;
use domain_restatement::{
    AggregateResult, Basis, FixedInterest, IndexSeries, LedgerRow, RegimeRule, RestatementOptions,
    RoundingPolicy, SelicTreatment, SeriesPoint, SeriesSpanWarning, Totals,
};

#[derive(Debug, Deserialize)]
pub struct RestatementBody {
    pub principal: Decimal,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub basis: Basis,
    /// Defaults to final rounding at the configured decimal places
    pub rounding: Option<RoundingPolicy>,
    #[serde(default)]
    pub selic: Vec<SeriesPoint>,
    #[serde(default)]
    pub indices: Vec<IndexSeries>,
    pub fixed_interest: Option<FixedInterest>,
    #[serde(default)]
    pub regime_rules: Vec<RegimeRule>,
    #[serde(default)]
    pub options: RestatementOptions,
}

#[derive(Debug, Serialize)]
pub struct RestatementResponse {
    pub calculation_id: CalculationId,
    pub rows: Vec<LedgerRow>,
    pub totals: Totals,
    pub warnings: Vec<SeriesSpanWarning>,
}

#[derive(Debug, Deserialize)]
pub struct AggregateBody {
    pub principal: Decimal,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub selic: Vec<SeriesPoint>,
    #[serde(default)]
    pub selic_treatment: SelicTreatment,
    #[serde(default)]
    pub indices: Vec<IndexSeries>,
    pub fixed_interest: Option<FixedInterest>,
}

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub calculation_id: CalculationId,
    #[serde(flatten)]
    pub result: AggregateResult,
    pub warnings: Vec<SeriesSpanWarning>,
}
