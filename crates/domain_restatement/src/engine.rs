//! Monthly restatement engine
//!
//! Walks the calculation window one competence month at a time. Each month
//! the correction index is applied to the principal track, the interest
//! regime is resolved, interest accrues on the final-value track and, under
//! monthly rounding, both tracks are rounded before the next month builds on
//! them. Every month emits one [`LedgerRow`].
//!
//! The engine is a pure function: no I/O, no caching, no shared state. An
//! empty series contributes nothing; a month no regime rule covers falls back
//! to the request's fixed interest (zero-rate simple when absent).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, Span};

use core_kernel::{CompetenceMonth, DateRange, Money, Rate};

use crate::regime::{resolve, FixedInterest, InterestMethod, LegalRatePolicy, RegimeRule};
use crate::rounding::RoundingPolicy;
use crate::series::{monthly_percentages, EconomicIndex, IndexSeries, SeriesPoint};

/// Whether partial months are pro-rated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Every touched month counts in full
    #[default]
    Monthly,
    /// Months are scaled by the share of their days inside the window
    Daily,
}

/// Order of the two steps inside a competence month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOrder {
    /// Correct first, then accrue interest on the corrected amounts
    #[default]
    IndexThenInterest,
    /// Accrue interest on last month's balances, then correct
    InterestThenIndex,
}

/// Engine knobs that are legal readings rather than inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RestatementOptions {
    #[serde(default)]
    pub legal_rate_policy: LegalRatePolicy,
    #[serde(default)]
    pub step_order: StepOrder,
}

/// Everything one restatement needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestatementRequest {
    pub principal: Money,
    pub window: DateRange,
    #[serde(default)]
    pub basis: Basis,
    #[serde(default)]
    pub rounding: RoundingPolicy,
    /// Daily SELIC points
    #[serde(default)]
    pub selic: Vec<SeriesPoint>,
    /// Monthly correction series; active ones add up per month
    #[serde(default)]
    pub indices: Vec<IndexSeries>,
    /// Interest for months no regime rule covers
    #[serde(default)]
    pub fixed_interest: Option<FixedInterest>,
    #[serde(default)]
    pub regime_rules: Vec<RegimeRule>,
    #[serde(default)]
    pub options: RestatementOptions,
}

impl RestatementRequest {
    /// Creates a request with no series, no interest and no rounding
    pub fn new(principal: Money, window: DateRange) -> Self {
        Self {
            principal,
            window,
            basis: Basis::default(),
            rounding: RoundingPolicy::default(),
            selic: Vec::new(),
            indices: Vec::new(),
            fixed_interest: None,
            regime_rules: Vec::new(),
            options: RestatementOptions::default(),
        }
    }

    pub fn with_basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_selic(mut self, points: Vec<SeriesPoint>) -> Self {
        self.selic = points;
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

    pub fn with_regime_rules(mut self, rules: Vec<RegimeRule>) -> Self {
        self.regime_rules = rules;
        self
    }

    pub fn with_options(mut self, options: RestatementOptions) -> Self {
        self.options = options;
        self
    }
}

/// One competence month of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub competence: CompetenceMonth,
    /// Correction percentage applied this month (after pro-rating)
    pub index_percent: Decimal,
    /// Interest percentage applied this month (after pro-rating)
    pub interest_percent: Decimal,
    pub interest_method: InterestMethod,
    pub cumulative_index_factor: Decimal,
    /// For simple interest `1 + accrued/principal`, an approximation
    pub cumulative_interest_factor: Decimal,
    /// Principal corrected by the index, without interest
    pub corrected_principal: Money,
    pub accrued_interest: Money,
    pub final_value: Money,
}

/// Summary of a restatement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub cumulative_index_factor: Decimal,
    pub cumulative_interest_factor: Decimal,
    pub corrected_principal: Money,
    pub accrued_interest: Money,
    pub final_value: Money,
}

/// A full ledger plus its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restatement {
    pub rows: Vec<LedgerRow>,
    pub totals: Totals,
}

/// Running balances carried from month to month
#[derive(Debug, Clone)]
struct Balances {
    principal: Money,
    corrected: Money,
    accrued: Money,
    final_value: Money,
    index_factor: Decimal,
    interest_factor: Decimal,
}

impl Balances {
    fn new(principal: Money) -> Self {
        Self {
            principal,
            corrected: principal,
            accrued: Money::ZERO,
            final_value: principal,
            index_factor: Decimal::ONE,
            interest_factor: Decimal::ONE,
        }
    }

    /// Advances one competence month
    fn advance(
        &mut self,
        method: InterestMethod,
        index_percent: Decimal,
        interest_percent: Decimal,
        rounding: &RoundingPolicy,
        order: StepOrder,
    ) {
        let index_step = Rate::from_percentage(index_percent).growth_factor();
        let rate = Rate::from_percentage(interest_percent);
        let previous_corrected = self.corrected;
        self.corrected = previous_corrected * index_step;
        self.index_factor *= index_step;

        match method {
            InterestMethod::None => {
                // nothing new accrues; interest from earlier regimes is kept
                self.final_value = self.corrected + self.accrued;
            }
            InterestMethod::Simple => {
                let base = match order {
                    StepOrder::IndexThenInterest => self.corrected,
                    StepOrder::InterestThenIndex => previous_corrected,
                };
                let increment = rounding.at_month_close(rate.apply(&base));
                self.accrued = self.accrued + increment;
                self.final_value = self.corrected + self.accrued;
                self.interest_factor = match self.accrued.ratio_to(&self.principal) {
                    Some(ratio) => Decimal::ONE + ratio,
                    None => self.interest_factor + rate.as_decimal(),
                };
            }
            InterestMethod::Compound | InterestMethod::SelicPassthrough | InterestMethod::LegalRate => {
                self.final_value = match order {
                    StepOrder::IndexThenInterest => {
                        let before_interest = self.final_value * index_step;
                        before_interest + rounding.at_month_close(rate.apply(&before_interest))
                    }
                    StepOrder::InterestThenIndex => {
                        let increment = rounding.at_month_close(rate.apply(&self.final_value));
                        (self.final_value + increment) * index_step
                    }
                };
                self.accrued = self.final_value - self.corrected;
                self.interest_factor *= rate.growth_factor();
            }
        }

        if rounding.is_monthly() {
            self.corrected = rounding.round(self.corrected);
            self.final_value = rounding.round(self.final_value);
            if method.compounds() {
                self.accrued = self.final_value - self.corrected;
            }
        }
    }

    fn round_all(&mut self, rounding: &RoundingPolicy) {
        self.corrected = rounding.round(self.corrected);
        self.accrued = rounding.round(self.accrued);
        self.final_value = rounding.round(self.final_value);
    }

    fn row(
        &self,
        competence: CompetenceMonth,
        index_percent: Decimal,
        interest_percent: Decimal,
        interest_method: InterestMethod,
    ) -> LedgerRow {
        LedgerRow {
            competence,
            index_percent,
            interest_percent,
            interest_method,
            cumulative_index_factor: self.index_factor,
            cumulative_interest_factor: self.interest_factor,
            corrected_principal: self.corrected,
            accrued_interest: self.accrued,
            final_value: self.final_value,
        }
    }

    fn totals(&self) -> Totals {
        Totals {
            cumulative_index_factor: self.index_factor,
            cumulative_interest_factor: self.interest_factor,
            corrected_principal: self.corrected,
            accrued_interest: self.accrued,
            final_value: self.final_value,
        }
    }
}

/// Sum of every active index's percentage for each month
fn combined_index_percentages(indices: &[IndexSeries]) -> BTreeMap<CompetenceMonth, Decimal> {
    let mut combined: BTreeMap<CompetenceMonth, Decimal> = BTreeMap::new();
    for series in indices {
        for (month, percent) in monthly_percentages(&series.points) {
            *combined.entry(month).or_insert(Decimal::ZERO) += percent;
        }
    }
    combined
}

/// Restates a principal month by month
///
/// # Arguments
///
/// * `request` - Principal, window, series, interest configuration and policies
///
/// # Returns
///
/// One ledger row per competence month in the window plus the totals. An
/// inverted window yields no rows and totals equal to the principal; callers
/// reject such windows with [`crate::validate_window`] beforehand.
#[instrument(
    skip_all,
    fields(
        principal = %request.principal,
        basis = ?request.basis,
        months = tracing::field::Empty
    )
)]
pub fn restate(request: &RestatementRequest) -> Restatement {
    let months = request.window.competence_months();
    Span::current().record("months", months.len());

    let index_percentages = combined_index_percentages(&request.indices);
    let selic_percentages = monthly_percentages(&request.selic);
    let default = request.fixed_interest.unwrap_or_default();
    let options = request.options;

    let mut balances = Balances::new(request.principal);
    let mut rows = Vec::with_capacity(months.len());
    let mut previous_method = None;

    for month in months {
        let fraction = match request.basis {
            Basis::Monthly => Decimal::ONE,
            Basis::Daily => request.window.overlap_fraction(month),
        };
        let index_percent = index_percentages.get(&month).copied().unwrap_or_default() * fraction;

        let regime = resolve(
            month,
            &request.regime_rules,
            default.monthly_rate,
            default.method.into(),
        );
        if previous_method != Some(regime.method) {
            debug!(competence = %month, method = ?regime.method, rate = %regime.rate, "interest regime in force");
            previous_method = Some(regime.method);
        }

        let selic_percent = selic_percentages.get(&month).copied().unwrap_or_default() * fraction;
        let interest_percent = regime.interest_percent(
            selic_percent,
            index_percent,
            fraction,
            options.legal_rate_policy,
        );

        balances.advance(
            regime.method,
            index_percent,
            interest_percent,
            &request.rounding,
            options.step_order,
        );
        rows.push(balances.row(month, index_percent, interest_percent, regime.method));
    }

    if request.rounding.is_final() {
        balances.round_all(&request.rounding);
        if let Some(last) = rows.last_mut() {
            last.corrected_principal = balances.corrected;
            last.accrued_interest = balances.accrued;
            last.final_value = balances.final_value;
        }
    }

    Restatement {
        rows,
        totals: balances.totals(),
    }
}
