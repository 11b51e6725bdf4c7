//! Test Data Builders
//!
//! Provides builder patterns for constructing restatement requests with
//! sensible defaults. Tests specify only the fields they care about; the
//! defaults are the reference scenario.

use core_kernel::{DateRange, Money};
use domain_restatement::{
    AggregateRequest, Basis, EconomicIndex, FixedInterest, IndexSeries, LegalRatePolicy,
    RegimeRule, RestatementOptions, RestatementRequest, RoundingPolicy, SelicTreatment,
    SeriesPoint, StepOrder,
};
use rust_decimal::Decimal;

use crate::fixtures::{MoneyFixtures, ReferenceScenario, SeriesFixtures, TemporalFixtures};

/// Builder for restatement and aggregate requests
#[derive(Debug, Clone)]
pub struct RestatementRequestBuilder {
    principal: Money,
    window: DateRange,
    basis: Basis,
    rounding: RoundingPolicy,
    selic: Vec<SeriesPoint>,
    selic_treatment: SelicTreatment,
    indices: Vec<IndexSeries>,
    fixed_interest: Option<FixedInterest>,
    regime_rules: Vec<RegimeRule>,
    options: RestatementOptions,
}

impl Default for RestatementRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RestatementRequestBuilder {
    /// Creates a builder holding the reference scenario
    pub fn new() -> Self {
        Self {
            principal: MoneyFixtures::reference_principal(),
            window: TemporalFixtures::first_quarter_2024(),
            basis: Basis::Monthly,
            rounding: RoundingPolicy::final_only(2),
            selic: Vec::new(),
            selic_treatment: SelicTreatment::default(),
            indices: vec![IndexSeries::new(
                EconomicIndex::IpcaE,
                SeriesFixtures::reference_ipca_e(),
            )],
            fixed_interest: Some(FixedInterest::simple(ReferenceScenario::monthly_interest())),
            regime_rules: Vec::new(),
            options: RestatementOptions::default(),
        }
    }

    /// Creates a builder with no series, no interest and no rounding
    pub fn bare(principal: Money, window: DateRange) -> Self {
        Self {
            principal,
            window,
            rounding: RoundingPolicy::none(),
            indices: Vec::new(),
            fixed_interest: None,
            ..Self::new()
        }
    }

    pub fn with_principal(mut self, principal: Money) -> Self {
        self.principal = principal;
        self
    }

    pub fn with_window(mut self, window: DateRange) -> Self {
        self.window = window;
        self
    }

    pub fn with_basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    /// Sets the SELIC series and how the aggregate path treats it
    pub fn with_selic(mut self, points: Vec<SeriesPoint>, treatment: SelicTreatment) -> Self {
        self.selic = points;
        self.selic_treatment = treatment;
        self
    }

    /// Replaces the correction series
    pub fn with_indices(mut self, indices: Vec<IndexSeries>) -> Self {
        self.indices = indices;
        self
    }

    pub fn without_indices(self) -> Self {
        self.with_indices(Vec::new())
    }

    pub fn with_fixed_interest(mut self, interest: Option<FixedInterest>) -> Self {
        self.fixed_interest = interest;
        self
    }

    /// Sets a simple monthly interest rate in percent
    pub fn with_simple_interest(self, monthly_rate: Decimal) -> Self {
        self.with_fixed_interest(Some(FixedInterest::simple(monthly_rate)))
    }

    /// Sets a compound monthly interest rate in percent
    pub fn with_compound_interest(self, monthly_rate: Decimal) -> Self {
        self.with_fixed_interest(Some(FixedInterest::compound(monthly_rate)))
    }

    pub fn with_regime_rules(mut self, rules: Vec<RegimeRule>) -> Self {
        self.regime_rules = rules;
        self
    }

    pub fn with_legal_rate_policy(mut self, policy: LegalRatePolicy) -> Self {
        self.options.legal_rate_policy = policy;
        self
    }

    pub fn with_step_order(mut self, order: StepOrder) -> Self {
        self.options.step_order = order;
        self
    }

    /// Builds the ledger request
    pub fn build(self) -> RestatementRequest {
        let mut request = RestatementRequest::new(self.principal, self.window)
            .with_basis(self.basis)
            .with_rounding(self.rounding)
            .with_selic(self.selic)
            .with_regime_rules(self.regime_rules)
            .with_options(self.options);
        request.indices = self.indices;
        request.fixed_interest = self.fixed_interest;
        request
    }

    /// Builds the equivalent aggregate request
    ///
    /// Basis, rounding, regime rules and options have no aggregate
    /// counterpart and are ignored.
    pub fn build_aggregate(self) -> AggregateRequest {
        let mut request = AggregateRequest::new(self.principal, self.window)
            .with_selic(self.selic, self.selic_treatment);
        request.indices = self.indices;
        request.fixed_interest = self.fixed_interest;
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_builder_is_reference_scenario() {
        let request = RestatementRequestBuilder::new().build();

        assert_eq!(request.principal.amount(), dec!(10000.00));
        assert_eq!(request.indices.len(), 1);
        assert!(request.rounding.is_final());
        assert_eq!(request.fixed_interest, Some(FixedInterest::simple(dec!(1.0))));
    }

    #[test]
    fn test_bare_builder_has_no_inputs() {
        let request =
            RestatementRequestBuilder::bare(MoneyFixtures::brl_1000(), TemporalFixtures::year(2023)).build();

        assert!(request.indices.is_empty());
        assert!(request.selic.is_empty());
        assert_eq!(request.fixed_interest, None);
    }

    #[test]
    fn test_aggregate_request_shares_inputs() {
        let aggregate = RestatementRequestBuilder::new().build_aggregate();
        assert_eq!(aggregate.indices.len(), 1);
        assert_eq!(aggregate.window, TemporalFixtures::first_quarter_2024());
    }
}
