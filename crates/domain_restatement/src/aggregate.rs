//! Aggregate calculator
//!
//! Computes the final factors of a restatement without building a ledger:
//!
//! ```text
//! final = principal × index factor × SELIC factor × interest factor
//! ```
//!
//! Index series compound across their points; SELIC compounds per month or
//! sums over the window; fixed interest runs over the window's competence
//! months. With no rounding and one uniform regime, the result matches the
//! last row of [`crate::restate`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use core_kernel::{CompetenceMonth, DateRange, Money, Rate};

use crate::regime::{AccrualMethod, FixedInterest};
use crate::series::{
    compound_factor, factor_to_percent, monthly_factors, selic_factor, EconomicIndex,
    IndexSeries, SelicTreatment, SeriesPoint,
};

/// Inputs of the aggregate calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub principal: Money,
    pub window: DateRange,
    /// Daily SELIC points
    #[serde(default)]
    pub selic: Vec<SeriesPoint>,
    #[serde(default)]
    pub selic_treatment: SelicTreatment,
    #[serde(default)]
    pub indices: Vec<IndexSeries>,
    #[serde(default)]
    pub fixed_interest: Option<FixedInterest>,
}

impl AggregateRequest {
    pub fn new(principal: Money, window: DateRange) -> Self {
        Self {
            principal,
            window,
            selic: Vec::new(),
            selic_treatment: SelicTreatment::default(),
            indices: Vec::new(),
            fixed_interest: None,
        }
    }

    pub fn with_selic(mut self, points: Vec<SeriesPoint>, treatment: SelicTreatment) -> Self {
        self.selic = points;
        self.selic_treatment = treatment;
        self
    }

    pub fn with_index(mut self, index: EconomicIndex, points: Vec<SeriesPoint>) -> Self {
        self.indices.push(IndexSeries::new(index, points));
        self
    }

    pub fn with_fixed_interest(mut self, interest: FixedInterest) -> Self {
        self.fixed_interest = Some(interest);
        self
    }
}

/// Compounded factor of one correction series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFactor {
    pub index: EconomicIndex,
    pub factor: Decimal,
    pub percent: Decimal,
}

/// Percentage view of each factor, `(factor − 1) × 100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatePercentages {
    pub index: Decimal,
    pub selic: Decimal,
    pub interest: Decimal,
    pub total: Decimal,
}

/// Final factors and values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub index_factors: Vec<IndexFactor>,
    /// Product of every correction series' factor
    pub index_factor: Decimal,
    pub selic_factor: Decimal,
    pub interest_factor: Decimal,
    /// Principal × index factor
    pub corrected_value: Money,
    pub final_value: Money,
    pub percentages: AggregatePercentages,
}

/// Simple interest accrued on each month's corrected principal, per unit of
/// corrected value at the end of the window
///
/// Reduces to `1 + r·n` when no index moves.
fn simple_interest_factor(
    months: &[CompetenceMonth],
    indices: &[IndexSeries],
    rate: Rate,
) -> Decimal {
    let mut per_month: BTreeMap<CompetenceMonth, Decimal> = BTreeMap::new();
    for series in indices {
        for (month, factor) in monthly_factors(&series.points) {
            *per_month.entry(month).or_insert(Decimal::ONE) *= factor;
        }
    }

    let mut running = Decimal::ONE;
    let mut accrued = Decimal::ZERO;
    for month in months {
        running *= per_month.get(month).copied().unwrap_or(Decimal::ONE);
        accrued += running * rate.as_decimal();
    }

    if running.is_zero() {
        return Decimal::ONE + rate.as_decimal() * Decimal::from(months.len() as u64);
    }
    Decimal::ONE + accrued / running
}

/// Points whose competence month falls inside the window
///
/// Monthly points are dated on the first of the month, so a window that
/// starts mid-month still keeps its first month's point.
fn within_window(points: &[SeriesPoint], window: DateRange) -> Vec<SeriesPoint> {
    let first = CompetenceMonth::from_date(window.start);
    let last = CompetenceMonth::from_date(window.end);
    points
        .iter()
        .filter(|p| (first..=last).contains(&p.competence()))
        .copied()
        .collect()
}

/// `(1 + r)ⁿ` by repeated multiplication
fn compound_interest_factor(months: usize, rate: Rate) -> Decimal {
    (0..months).fold(Decimal::ONE, |acc, _| acc * rate.growth_factor())
}

/// Computes final factors without a ledger
///
/// # Arguments
///
/// * `request` - Principal, window, series and optional fixed interest
///
/// # Returns
///
/// Per-series and combined factors, the corrected and final values, and
/// their percentage views
#[instrument(skip_all, fields(principal = %request.principal, series = request.indices.len()))]
pub fn aggregate(request: &AggregateRequest) -> AggregateResult {
    let index_factors: Vec<IndexFactor> = request
        .indices
        .iter()
        .map(|series| {
            let factor = compound_factor(&within_window(&series.points, request.window));
            IndexFactor {
                index: series.index,
                factor,
                percent: factor_to_percent(factor),
            }
        })
        .collect();
    let index_factor = index_factors
        .iter()
        .fold(Decimal::ONE, |acc, f| acc * f.factor);

    let selic = selic_factor(
        &within_window(&request.selic, request.window),
        request.selic_treatment,
    );

    let months = request.window.competence_months();
    let interest_factor = match request.fixed_interest {
        None => Decimal::ONE,
        Some(FixedInterest { monthly_rate, method }) => {
            let rate = Rate::from_percentage(monthly_rate);
            match method {
                AccrualMethod::Simple => simple_interest_factor(&months, &request.indices, rate),
                AccrualMethod::Compound => compound_interest_factor(months.len(), rate),
            }
        }
    };

    let corrected_value = request.principal * index_factor;
    let final_value = corrected_value * selic * interest_factor;

    AggregateResult {
        index_factors,
        index_factor,
        selic_factor: selic,
        interest_factor,
        corrected_value,
        final_value,
        percentages: AggregatePercentages {
            index: factor_to_percent(index_factor),
            selic: factor_to_percent(selic),
            interest: factor_to_percent(interest_factor),
            total: factor_to_percent(index_factor * selic * interest_factor),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn quarter() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 3, 31)).unwrap()
    }

    #[test]
    fn test_no_series_no_interest_is_identity() {
        let result = aggregate(&AggregateRequest::new(Money::brl(dec!(1234.56)), quarter()));

        assert_eq!(result.index_factor, Decimal::ONE);
        assert_eq!(result.selic_factor, Decimal::ONE);
        assert_eq!(result.final_value.amount(), dec!(1234.56));
        assert_eq!(result.percentages.total, Decimal::ZERO);
    }

    #[test]
    fn test_simple_interest_without_index_is_linear() {
        let request = AggregateRequest::new(Money::brl(dec!(1000)), quarter())
            .with_fixed_interest(FixedInterest::simple(dec!(1)));

        let result = aggregate(&request);

        assert_eq!(result.interest_factor, dec!(1.03));
        assert_eq!(result.final_value.amount(), dec!(1030));
    }

    #[test]
    fn test_compound_interest_factor() {
        let request = AggregateRequest::new(Money::brl(dec!(1000)), quarter())
            .with_fixed_interest(FixedInterest::compound(dec!(1)));

        let result = aggregate(&request);

        assert_eq!(result.interest_factor, dec!(1.030301));
    }

    #[test]
    fn test_index_factors_multiply() {
        let request = AggregateRequest::new(Money::brl(dec!(100)), quarter())
            .with_index(EconomicIndex::IpcaE, vec![SeriesPoint::new(date(2024, 1, 1), dec!(10))])
            .with_index(EconomicIndex::Inpc, vec![SeriesPoint::new(date(2024, 2, 1), dec!(10))]);

        let result = aggregate(&request);

        assert_eq!(result.index_factors.len(), 2);
        assert_eq!(result.index_factor, dec!(1.21));
        assert_eq!(result.corrected_value.amount(), dec!(121));
        assert_eq!(result.percentages.index, dec!(21));
    }

    #[test]
    fn test_selic_treatments_diverge_over_two_months() {
        let selic = vec![
            SeriesPoint::new(date(2024, 1, 2), dec!(1)),
            SeriesPoint::new(date(2024, 2, 1), dec!(1)),
        ];
        let simple = aggregate(
            &AggregateRequest::new(Money::brl(dec!(100)), quarter())
                .with_selic(selic.clone(), SelicTreatment::Simple),
        );
        let compound = aggregate(
            &AggregateRequest::new(Money::brl(dec!(100)), quarter())
                .with_selic(selic, SelicTreatment::CompoundMonthly),
        );

        assert_eq!(simple.final_value.amount(), dec!(102));
        assert_eq!(compound.final_value.amount(), dec!(102.01));
    }

    #[test]
    fn test_points_outside_window_are_ignored() {
        let window = DateRange::new(date(2024, 1, 15), date(2024, 2, 29)).unwrap();
        let request = AggregateRequest::new(Money::brl(dec!(1000)), window)
            .with_index(
                EconomicIndex::IpcaE,
                vec![
                    SeriesPoint::new(date(2023, 12, 1), dec!(1)),
                    SeriesPoint::new(date(2024, 1, 1), dec!(1)),
                    SeriesPoint::new(date(2024, 2, 1), dec!(1)),
                    SeriesPoint::new(date(2024, 3, 1), dec!(1)),
                ],
            )
            .with_selic(
                vec![
                    SeriesPoint::new(date(2023, 12, 1), dec!(5)),
                    SeriesPoint::new(date(2024, 2, 1), dec!(1)),
                ],
                SelicTreatment::CompoundMonthly,
            );

        let result = aggregate(&request);

        assert_eq!(result.index_factor, dec!(1.0201));
        assert_eq!(result.selic_factor, dec!(1.01));
    }
}
