//! Interest regimes
//!
//! A regime rule says which interest method (and rate) applies to the
//! competence months inside its window. Procedural milestones such as the
//! December 2021 constitutional amendment are expressed as consecutive rules.
//!
//! Rules are checked in declaration order and the first match wins; the
//! resolver does not check that windows are disjoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::CompetenceMonth;

/// How interest accrues in a competence month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMethod {
    /// Rate on the corrected principal, accumulated additively
    Simple,
    /// Rate on the previous month's final value
    Compound,
    /// The month's compounded SELIC percentage, compounded like `Compound`
    SelicPassthrough,
    /// SELIC net of the correction index, floored at zero
    LegalRate,
    /// No interest
    None,
}

impl InterestMethod {
    /// Methods that compound on the previous month's final value
    pub fn compounds(&self) -> bool {
        matches!(
            self,
            InterestMethod::Compound | InterestMethod::SelicPassthrough | InterestMethod::LegalRate
        )
    }

    /// Methods whose rate is derived from the month's SELIC
    pub fn uses_selic(&self) -> bool {
        matches!(self, InterestMethod::SelicPassthrough | InterestMethod::LegalRate)
    }
}

/// How the legal rate nets SELIC against the correction index
///
/// The netting rule is a legal reading, not arithmetic, so it is an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalRatePolicy {
    /// `max(0, SELIC − index)`
    #[default]
    NetOfIndex,
    /// `max(0, SELIC)`, ignoring the index
    GrossSelic,
}

impl LegalRatePolicy {
    /// Legal interest percentage for a month, never negative
    pub fn rate(&self, selic_percent: Decimal, index_percent: Decimal) -> Decimal {
        let rate = match self {
            LegalRatePolicy::NetOfIndex => selic_percent - index_percent,
            LegalRatePolicy::GrossSelic => selic_percent,
        };
        rate.max(Decimal::ZERO)
    }
}

/// A time-bounded interest regime
///
/// Bounds are inclusive and compared at month granularity: a rule ending on
/// 2021-11-30 and one ending on 2021-11-01 both cover November 2021.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeRule {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    pub method: InterestMethod,
    /// Monthly percentage for `Simple` and `Compound`
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl RegimeRule {
    /// Creates an unbounded rule
    pub fn new(method: InterestMethod) -> Self {
        Self {
            from: None,
            to: None,
            method,
            rate: None,
        }
    }

    pub fn simple(rate: Decimal) -> Self {
        Self::new(InterestMethod::Simple).with_rate(rate)
    }

    pub fn compound(rate: Decimal) -> Self {
        Self::new(InterestMethod::Compound).with_rate(rate)
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn starting(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn until(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Returns true if the month falls inside the rule's window
    pub fn matches(&self, month: CompetenceMonth) -> bool {
        let after_start = self
            .from
            .map_or(true, |from| month >= CompetenceMonth::from_date(from));
        let before_end = self
            .to
            .map_or(true, |to| month <= CompetenceMonth::from_date(to));
        after_start && before_end
    }
}

/// Interest that applies when no regime rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualMethod {
    Simple,
    Compound,
}

impl From<AccrualMethod> for InterestMethod {
    fn from(method: AccrualMethod) -> Self {
        match method {
            AccrualMethod::Simple => InterestMethod::Simple,
            AccrualMethod::Compound => InterestMethod::Compound,
        }
    }
}

/// Flat monthly interest, e.g. 1% simple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedInterest {
    /// Monthly percentage
    pub monthly_rate: Decimal,
    pub method: AccrualMethod,
}

impl FixedInterest {
    pub fn simple(monthly_rate: Decimal) -> Self {
        Self {
            monthly_rate,
            method: AccrualMethod::Simple,
        }
    }

    pub fn compound(monthly_rate: Decimal) -> Self {
        Self {
            monthly_rate,
            method: AccrualMethod::Compound,
        }
    }
}

impl Default for FixedInterest {
    /// Zero-rate simple interest
    fn default() -> Self {
        Self::simple(Decimal::ZERO)
    }
}

/// The method and rate selected for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRegime {
    pub method: InterestMethod,
    pub rate: Decimal,
}

impl ResolvedRegime {
    /// Interest percentage for the month
    ///
    /// # Arguments
    ///
    /// * `selic_percent` - The month's SELIC percentage, already pro-rated
    /// * `index_percent` - The month's correction percentage, already pro-rated
    /// * `fraction` - Share of the month inside the window (1 on a monthly basis)
    /// * `policy` - Netting rule for `LegalRate`
    pub fn interest_percent(
        &self,
        selic_percent: Decimal,
        index_percent: Decimal,
        fraction: Decimal,
        policy: LegalRatePolicy,
    ) -> Decimal {
        match self.method {
            InterestMethod::Simple | InterestMethod::Compound => self.rate * fraction,
            InterestMethod::SelicPassthrough => selic_percent,
            InterestMethod::LegalRate => policy.rate(selic_percent, index_percent),
            InterestMethod::None => Decimal::ZERO,
        }
    }
}

/// Selects the interest regime for a competence month
///
/// Returns the first rule matching `month`; otherwise the caller's default.
/// A matching rule without a rate resolves to rate zero.
pub fn resolve(
    month: CompetenceMonth,
    rules: &[RegimeRule],
    default_rate: Decimal,
    default_method: InterestMethod,
) -> ResolvedRegime {
    rules
        .iter()
        .find(|rule| rule.matches(month))
        .map(|rule| ResolvedRegime {
            method: rule.method,
            rate: rule.rate.unwrap_or(Decimal::ZERO),
        })
        .unwrap_or(ResolvedRegime {
            method: default_method,
            rate: default_rate,
        })
}
