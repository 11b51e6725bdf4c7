//! Case presets
//!
//! The regime composition of a restatement depends on the type of action and
//! on who owes. For public-treasury debtors the December 2021 constitutional
//! amendment (EC 113/2021) replaced correction plus interest by SELIC alone,
//! so their presets switch regimes at that month and drop the correction
//! index from it onward.
//!
//! | Action | Correction | Public treasury | Private debtor |
//! |---|---|---|---|
//! | Tax | none | SELIC | SELIC |
//! | Social security | INPC | 0.5% simple, SELIC from 2021-12 | 0.5% simple |
//! | Condemnation, expropriation | IPCA-E | 1% simple, SELIC from 2021-12 | 1% simple |
//!
//! A preset can also split its fixed-rate interest at the filing date with
//! [`CasePreset::with_filing_milestone`]. The filing month itself still
//! accrues at the rate before filing. SELIC regimes are never split.

use std::fmt;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{CompetenceMonth, DateRange, Money};

use crate::engine::RestatementRequest;
use crate::error::RestatementError;
use crate::ports::SeriesPort;
use crate::regime::{AccrualMethod, InterestMethod, RegimeRule};
use crate::series::{EconomicIndex, IndexSeries, SeriesPoint};

/// Type of lawsuit the debt comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Condemnation,
    SocialSecurity,
    Expropriation,
    Tax,
}

impl ActionType {
    /// Infers the action type from a court specialty name
    ///
    /// Names are matched loosely (`"Vara Previdenciária"` is social security);
    /// anything unrecognised is treated as a general condemnation.
    pub fn infer(specialty: &str) -> Self {
        let name = specialty.to_lowercase();
        if name.contains("tribut") {
            ActionType::Tax
        } else if name.contains("previd") {
            ActionType::SocialSecurity
        } else if name.contains("desap") {
            ActionType::Expropriation
        } else {
            ActionType::Condemnation
        }
    }
}

/// Who owes the debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtorType {
    /// Union, states, municipalities and their agencies
    PublicTreasury,
    Private,
}

impl DebtorType {
    /// Infers the debtor type from a party or office name
    pub fn infer(name: &str) -> Self {
        const PUBLIC_MARKERS: [&str; 8] = [
            "FAZENDA", "PÚBLICA", "PUBLICA", "UNIÃO", "UNIAO", "ESTADO", "MUNICÍPIO", "MUNICIPIO",
        ];
        let name = name.to_uppercase();
        if PUBLIC_MARKERS.iter().any(|marker| name.contains(marker)) {
            DebtorType::PublicTreasury
        } else {
            DebtorType::Private
        }
    }
}

/// First month in which SELIC replaces correction and interest for public debtors
pub fn selic_milestone() -> CompetenceMonth {
    CompetenceMonth::new(2021, 12).expect("December 2021 is a valid month")
}

/// Series a preset needs, fetched and already cut
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetInputs {
    pub selic: Vec<SeriesPoint>,
    pub indices: Vec<IndexSeries>,
}

/// Regime composition for an action/debtor pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePreset {
    pub action: ActionType,
    pub debtor: DebtorType,
    pub correction_index: Option<EconomicIndex>,
    /// Correction points from this month onward are dropped
    pub index_cutoff: Option<CompetenceMonth>,
    pub regime_rules: Vec<RegimeRule>,
    pub description: String,
}

impl CasePreset {
    /// Builds the preset for a window
    ///
    /// # Arguments
    ///
    /// * `action` - Type of lawsuit
    /// * `debtor` - Public treasury or private debtor
    /// * `window` - Calculation window, used to bound whole-window regimes
    pub fn build(action: ActionType, debtor: DebtorType, window: DateRange) -> Self {
        let milestone = selic_milestone();
        let whole_window = |rule: RegimeRule| rule.starting(window.start).until(window.end);

        let correction_index = match action {
            ActionType::Tax => {
                return Self {
                    action,
                    debtor,
                    correction_index: None,
                    index_cutoff: None,
                    regime_rules: vec![whole_window(RegimeRule::new(InterestMethod::SelicPassthrough))],
                    description: "SELIC (tax)".to_string(),
                };
            }
            ActionType::SocialSecurity => EconomicIndex::Inpc,
            ActionType::Condemnation | ActionType::Expropriation => EconomicIndex::IpcaE,
        };
        let rate = preset_rate(action);

        match debtor {
            DebtorType::PublicTreasury => Self {
                action,
                debtor,
                correction_index: Some(correction_index),
                index_cutoff: Some(milestone),
                regime_rules: vec![
                    RegimeRule::simple(rate).until(milestone.first_day() - Days::new(1)),
                    RegimeRule::new(InterestMethod::SelicPassthrough).starting(milestone.first_day()),
                ],
                description: format!(
                    "{} + {}% interest (until 11/2021) / SELIC (from 12/2021)",
                    correction_index,
                    rate.normalize()
                ),
            },
            DebtorType::Private => Self {
                action,
                debtor,
                correction_index: Some(correction_index),
                index_cutoff: None,
                regime_rules: vec![whole_window(RegimeRule::simple(rate))],
                description: format!("{} + {}% monthly interest", correction_index, rate.normalize()),
            },
        }
    }

    /// Splits the fixed-rate regimes at the month of filing
    ///
    /// Months up to and including the filing month accrue simple interest at
    /// `rate_before`; later months accrue at `rate_after` with `method_after`.
    /// Regimes that take their rate from SELIC are kept as they are, so a
    /// public debtor still switches to SELIC in December 2021.
    ///
    /// # Arguments
    ///
    /// * `filed_on` - Filing date of the lawsuit
    /// * `rate_before` - Monthly percentage before filing
    /// * `rate_after` - Monthly percentage after filing
    /// * `method_after` - Accrual method after filing
    pub fn with_filing_milestone(
        mut self,
        filed_on: NaiveDate,
        rate_before: Decimal,
        rate_after: Decimal,
        method_after: AccrualMethod,
    ) -> Self {
        let filing_month = CompetenceMonth::from_date(filed_on);
        let mut rules = Vec::with_capacity(self.regime_rules.len() + 1);

        for rule in self.regime_rules.drain(..) {
            if rule.method.uses_selic() {
                rules.push(rule);
                continue;
            }

            let starts_after_filing = rule
                .from
                .is_some_and(|from| CompetenceMonth::from_date(from) > filing_month);
            let ends_by_filing = rule
                .to
                .is_some_and(|to| CompetenceMonth::from_date(to) <= filing_month);

            if !starts_after_filing {
                let mut before = RegimeRule::simple(rate_before);
                before.from = rule.from;
                before.to = Some(match rule.to {
                    Some(to) if ends_by_filing => to,
                    _ => filing_month.first_day(),
                });
                rules.push(before);
            }
            if !ends_by_filing {
                let mut after = RegimeRule::new(method_after.into()).with_rate(rate_after);
                after.from = Some(match rule.from {
                    Some(from) if starts_after_filing => from,
                    _ => filing_month.next().first_day(),
                });
                after.to = rule.to;
                rules.push(after);
            }
        }

        debug!(filing = %filing_month, rules = rules.len(), "filing milestone applied");
        self.regime_rules = rules;
        self.description = format!(
            "{} (filing {}: {}% / {}% {})",
            self.description,
            filing_month,
            rate_before.normalize(),
            rate_after.normalize(),
            match method_after {
                AccrualMethod::Simple => "simple",
                AccrualMethod::Compound => "compound",
            }
        );
        self
    }

    /// Returns true if any regime of the preset derives interest from SELIC
    pub fn needs_selic(&self) -> bool {
        self.regime_rules.iter().any(|rule| rule.method.uses_selic())
    }

    /// Fetches the series this preset needs and applies the index cut
    ///
    /// # Errors
    ///
    /// Returns `RestatementError::Series` when the collaborator fails.
    pub async fn inputs(
        &self,
        port: &dyn SeriesPort,
        window: DateRange,
    ) -> Result<PresetInputs, RestatementError> {
        let mut inputs = PresetInputs::default();

        if self.needs_selic() {
            inputs.selic = port.get_series(EconomicIndex::Selic, window).await?;
        }

        if let Some(index) = self.correction_index {
            let series = IndexSeries::new(index, port.get_series(index, window).await?);
            let series = match self.index_cutoff {
                Some(cutoff) => series.before(cutoff),
                None => series,
            };
            inputs.indices.push(series);
        }

        debug!(
            action = ?self.action,
            debtor = ?self.debtor,
            selic_points = inputs.selic.len(),
            "preset inputs fetched"
        );
        Ok(inputs)
    }

    /// Assembles a restatement request from the preset and its inputs
    pub fn request(&self, principal: Money, window: DateRange, inputs: PresetInputs) -> RestatementRequest {
        let mut request = RestatementRequest::new(principal, window)
            .with_selic(inputs.selic)
            .with_regime_rules(self.regime_rules.clone());
        request.indices = inputs.indices;
        request
    }
}

impl fmt::Display for CasePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Monthly interest percentage a preset applies before any SELIC switch
pub fn preset_rate(action: ActionType) -> Decimal {
    match action {
        ActionType::Tax => Decimal::ZERO,
        ActionType::SocialSecurity => dec!(0.5),
        ActionType::Condemnation | ActionType::Expropriation => dec!(1.0),
    }
}
