//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the restatement and tariff engines.
//! These fixtures are consistent and predictable: the reference scenario
//! values below are the ones the integration tests assert against.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use core_kernel::{CompetenceMonth, DateRange, Money};
use domain_restatement::{EconomicIndex, IndexSeries, SeriesPoint};
use domain_tariff::TariffInput;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds a date, panicking on an impossible one
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Builds a competence month, panicking on an impossible one
pub fn month(year: i32, month: u32) -> CompetenceMonth {
    CompetenceMonth::new(year, month).unwrap()
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Principal of the reference scenario
    pub fn reference_principal() -> Money {
        Money::brl(dec!(10000.00))
    }

    /// A round principal for factor checks
    pub fn brl_1000() -> Money {
        Money::brl(dec!(1000.00))
    }

    pub fn brl_zero() -> Money {
        Money::ZERO
    }
}

/// Fixture for calculation windows
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// January to March 2024
    pub fn first_quarter_2024() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 3, 31)).unwrap()
    }

    /// A full calendar year
    pub fn year(year: i32) -> DateRange {
        DateRange::new(date(year, 1, 1), date(year, 12, 31)).unwrap()
    }

    /// Window that straddles the December 2021 SELIC milestone
    pub fn around_selic_milestone() -> DateRange {
        DateRange::new(date(2021, 9, 1), date(2022, 3, 31)).unwrap()
    }

    /// Window that starts and ends mid-month
    pub fn mid_month() -> DateRange {
        DateRange::new(date(2024, 1, 16), date(2024, 3, 15)).unwrap()
    }
}

/// Fixture for economic series
pub struct SeriesFixtures;

impl SeriesFixtures {
    /// Monthly IPCA-E of the reference scenario: 1.0%, 0.5%, 0.8%
    pub fn reference_ipca_e() -> Vec<SeriesPoint> {
        Self::monthly(month(2024, 1), &[dec!(1.0), dec!(0.5), dec!(0.8)])
    }

    /// Monthly points starting at `first`, one per month
    pub fn monthly(first: CompetenceMonth, percents: &[Decimal]) -> Vec<SeriesPoint> {
        let mut current = first;
        let mut points = Vec::with_capacity(percents.len());
        for percent in percents {
            points.push(SeriesPoint::new(current.first_day(), *percent));
            current = current.next();
        }
        points
    }

    /// The same percentage for every month of a window
    pub fn flat_monthly(window: DateRange, percent: Decimal) -> Vec<SeriesPoint> {
        window
            .competence_months()
            .into_iter()
            .map(|month| SeriesPoint::new(month.first_day(), percent))
            .collect()
    }

    /// Daily SELIC points on every weekday of a window
    ///
    /// # Arguments
    ///
    /// * `window` - Dates to cover
    /// * `daily_percent` - Percentage published for each business day
    pub fn daily_selic(window: DateRange, daily_percent: Decimal) -> Vec<SeriesPoint> {
        window
            .start
            .iter_days()
            .take_while(|day| *day <= window.end)
            .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
            .map(|day| SeriesPoint::new(day, daily_percent))
            .collect()
    }

    /// One SELIC point per month, as a pre-aggregated monthly series
    pub fn monthly_selic(window: DateRange, percent: Decimal) -> Vec<SeriesPoint> {
        Self::flat_monthly(window, percent)
    }

    pub fn ipca_e_series(points: Vec<SeriesPoint>) -> IndexSeries {
        IndexSeries::new(EconomicIndex::IpcaE, points)
    }
}

/// Reference restatement scenario
///
/// Principal 10000.00 over January to March 2024, IPCA-E 1.0%, 0.5% and
/// 0.8%, simple interest at 1% a month, rounded once at the end to two
/// decimals.
pub struct ReferenceScenario;

impl ReferenceScenario {
    pub fn monthly_interest() -> Decimal {
        dec!(1.0)
    }

    /// Corrected principal per month, unrounded
    pub fn corrected() -> [Decimal; 3] {
        [dec!(10100.00), dec!(10150.50), dec!(10231.704)]
    }

    /// Cumulative interest per month, unrounded
    pub fn accrued() -> [Decimal; 3] {
        [dec!(101.00), dec!(202.505), dec!(304.82204)]
    }

    /// Final value per month, unrounded
    pub fn final_values() -> [Decimal; 3] {
        [dec!(10201.00), dec!(10353.005), dec!(10536.52604)]
    }

    /// Final value after rounding to two decimals
    pub fn rounded_final_value() -> Decimal {
        dec!(10536.53)
    }
}

/// Fixture for tariff inputs
pub struct TariffFixtures;

impl TariffFixtures {
    /// Inputs for the civil actions catalog
    pub fn civil_inputs(claim_value: Decimal) -> HashMap<String, TariffInput> {
        HashMap::from([
            ("distribuicao".to_string(), TariffInput::claim(claim_value)),
            ("citacao".to_string(), TariffInput::default().with_quantity(2)),
            ("audiencia".to_string(), TariffInput::default()),
        ])
    }

    /// Inputs for the writs and services catalog
    pub fn service_inputs(distance_km: Decimal, certificates: u32) -> HashMap<String, TariffInput> {
        HashMap::from([
            ("diligencia".to_string(), TariffInput::distance(distance_km)),
            ("certidao".to_string(), TariffInput::default().with_quantity(certificates)),
        ])
    }
}
