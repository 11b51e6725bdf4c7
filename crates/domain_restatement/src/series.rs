//! Economic series and month grouping
//!
//! Series arrive as ordered, dated percentage points (`0.5` meaning 0.5%).
//! SELIC is published per business day; IPCA-E and INPC once per month. This
//! module reduces both shapes to one factor per competence month.
//!
//! Within a month, points always compound: daily accrual compounds, and a
//! monthly series that happens to carry two points for the same month is
//! treated the same way. An empty series is a neutral factor of 1.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CompetenceMonth, Rate};

/// Publication frequency of an economic series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Monthly,
}

/// Economic indices used by court calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicIndex {
    /// Central Bank policy rate, daily
    Selic,
    /// Broad consumer price index
    Ipca,
    /// Special (quarterly-collected) consumer price index
    IpcaE,
    /// National consumer price index, used for social security debts
    Inpc,
}

impl EconomicIndex {
    /// Code of the series in the Central Bank's time-series system (SGS)
    pub fn sgs_code(&self) -> u32 {
        match self {
            EconomicIndex::Selic => 11,
            EconomicIndex::Ipca => 433,
            EconomicIndex::IpcaE => 10764,
            EconomicIndex::Inpc => 188,
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            EconomicIndex::Selic => Granularity::Daily,
            _ => Granularity::Monthly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EconomicIndex::Selic => "SELIC",
            EconomicIndex::Ipca => "IPCA",
            EconomicIndex::IpcaE => "IPCA-E",
            EconomicIndex::Inpc => "INPC",
        }
    }
}

impl fmt::Display for EconomicIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A dated percentage point of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// Percentage, e.g. `0.5` for 0.5%
    pub value: Decimal,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }

    pub fn competence(&self) -> CompetenceMonth {
        CompetenceMonth::from_date(self.date)
    }

    /// Growth factor `1 + value/100`
    pub fn factor(&self) -> Decimal {
        Rate::from_percentage(self.value).growth_factor()
    }
}

/// A monthly correction series tagged with the index it represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSeries {
    pub index: EconomicIndex,
    pub points: Vec<SeriesPoint>,
}

impl IndexSeries {
    pub fn new(index: EconomicIndex, points: Vec<SeriesPoint>) -> Self {
        Self { index, points }
    }

    /// Keeps only the points strictly before the given month
    pub fn before(&self, month: CompetenceMonth) -> Self {
        Self {
            index: self.index,
            points: self
                .points
                .iter()
                .filter(|p| p.date < month.first_day())
                .copied()
                .collect(),
        }
    }
}

/// How a daily SELIC series becomes a full-window factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelicTreatment {
    /// Compound within each month, then across months
    #[default]
    CompoundMonthly,
    /// Sum every percentage in the window, convert once
    Simple,
}

/// Groups points by competence month, keeping their original order
pub fn group_by_month(points: &[SeriesPoint]) -> BTreeMap<CompetenceMonth, Vec<SeriesPoint>> {
    let mut groups: BTreeMap<CompetenceMonth, Vec<SeriesPoint>> = BTreeMap::new();
    for point in points {
        groups.entry(point.competence()).or_default().push(*point);
    }
    groups
}

/// Compounded factor of each month present in the series
pub fn monthly_factors(points: &[SeriesPoint]) -> BTreeMap<CompetenceMonth, Decimal> {
    group_by_month(points)
        .into_iter()
        .map(|(month, group)| {
            let factor = group.iter().fold(Decimal::ONE, |acc, p| acc * p.factor());
            (month, factor)
        })
        .collect()
}

/// Compounded percentage of each month present in the series
///
/// # Arguments
///
/// * `points` - Daily or monthly points
///
/// # Returns
///
/// `(Π(1 + pᵢ/100) − 1) × 100` keyed by competence month
pub fn monthly_percentages(points: &[SeriesPoint]) -> BTreeMap<CompetenceMonth, Decimal> {
    monthly_factors(points)
        .into_iter()
        .map(|(month, factor)| (month, factor_to_percent(factor)))
        .collect()
}

/// Full-window factor compounding within and across months
pub fn compound_factor(points: &[SeriesPoint]) -> Decimal {
    monthly_factors(points)
        .values()
        .fold(Decimal::ONE, |acc, factor| acc * factor)
}

/// Full-window factor `1 + Σp/100` without compounding
pub fn simple_factor(points: &[SeriesPoint]) -> Decimal {
    let total: Decimal = points.iter().map(|p| p.value).sum();
    Rate::from_percentage(total).growth_factor()
}

/// SELIC factor for the whole window under the chosen treatment
pub fn selic_factor(points: &[SeriesPoint], treatment: SelicTreatment) -> Decimal {
    match treatment {
        SelicTreatment::CompoundMonthly => compound_factor(points),
        SelicTreatment::Simple => simple_factor(points),
    }
}

/// Converts a growth factor into a percentage
pub fn factor_to_percent(factor: Decimal) -> Decimal {
    Rate::new(factor - Decimal::ONE).as_percentage()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn compounding_never_falls_below_simple_sum(
            values in prop::collection::vec(0i64..200i64, 1..40)
        ) {
            let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let points: Vec<SeriesPoint> = values
                .iter()
                .enumerate()
                .map(|(i, v)| SeriesPoint::new(start + chrono::Duration::days(i as i64 * 3), Decimal::new(*v, 3)))
                .collect();

            let compound = compound_factor(&points);
            prop_assert!(compound >= simple_factor(&points));
            prop_assert!(compound >= Decimal::ONE);
        }
    }
}
