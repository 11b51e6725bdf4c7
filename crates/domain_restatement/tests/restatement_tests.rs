//! Restatement Engine Tests
//!
//! End-to-end checks of the ledger engine, the aggregate calculator and the
//! case presets against hand-computed values.
//!
//! # Test Coverage
//!
//! ## Reference Scenario
//! - Month-by-month corrected principal, interest and final value
//! - Final rounding applied once to the last row and the totals
//!
//! ## Equivalence
//! - Ledger and aggregate agree for simple, compound and SELIC pass-through
//! - Series points outside the window are ignored by both
//!
//! ## Policies
//! - Simple vs compound SELIC accumulation
//! - Legal rate netting and its floor
//! - Monthly vs final rounding, down to differing final values
//! - Order of operations within a month
//!
//! ## Presets
//! - Public debtor switch to SELIC at December 2021 through a series port
//!
//! # Test Organization
//!
//! - `reference_scenario` - The three-month IPCA-E + 1% simple case
//! - `equivalence_tests` - Ledger vs aggregate
//! - `policy_tests` - SELIC treatment, legal rate, rounding, step order
//! - `preset_tests` - Presets fed by `InMemorySeriesAdapter`

use core_kernel::{DateRange, Money};
use domain_restatement::{
    aggregate, restate, validate_window, ActionType, CasePreset, DebtorType, EconomicIndex,
    InMemorySeriesAdapter, IndexSeries, InterestMethod, LegalRatePolicy, RegimeRule,
    RestatementError, RoundingPolicy, SelicTreatment, StepOrder,
};
use rust_decimal_macros::dec;
use test_utils::{
    assert_decimal_approx_eq, assert_ledger_consistent, assert_money_approx_eq,
    assert_money_rounded, date, month, MoneyFixtures, ReferenceScenario,
    RestatementRequestBuilder, SeriesFixtures, TemporalFixtures,
};

// ============================================================================
// REFERENCE SCENARIO
// ============================================================================

mod reference_scenario {
    use super::*;

    #[test]
    fn test_intermediate_rows_are_unrounded() {
        let result = restate(&RestatementRequestBuilder::new().build());

        assert_eq!(result.rows.len(), 3);
        for i in 0..2 {
            let row = &result.rows[i];
            assert_eq!(row.corrected_principal.amount(), ReferenceScenario::corrected()[i]);
            assert_eq!(row.accrued_interest.amount(), ReferenceScenario::accrued()[i]);
            assert_eq!(row.final_value.amount(), ReferenceScenario::final_values()[i]);
        }
    }

    #[test]
    fn test_last_row_and_totals_are_rounded_once() {
        let result = restate(&RestatementRequestBuilder::new().build());
        let last = result.rows.last().unwrap();

        assert_eq!(last.corrected_principal.amount(), dec!(10231.70));
        assert_eq!(last.accrued_interest.amount(), dec!(304.82));
        assert_eq!(last.final_value.amount(), ReferenceScenario::rounded_final_value());
        assert_eq!(result.totals.final_value, last.final_value);
        assert_money_rounded(&result.totals.accrued_interest, 2);
        assert_ledger_consistent(&result, dec!(0.01));
    }

    #[test]
    fn test_unrounded_scenario_keeps_full_precision() {
        let result = restate(
            &RestatementRequestBuilder::new()
                .with_rounding(RoundingPolicy::none())
                .build(),
        );

        assert_eq!(result.totals.final_value.amount(), ReferenceScenario::final_values()[2]);
        assert_eq!(result.totals.cumulative_index_factor, dec!(1.0231704));
        assert_ledger_consistent(&result, dec!(0));
    }

    #[test]
    fn test_row_metadata() {
        let result = restate(&RestatementRequestBuilder::new().build());

        assert_eq!(result.rows[0].competence, month(2024, 1));
        assert_eq!(result.rows[2].competence, month(2024, 3));
        assert_eq!(result.rows[1].index_percent, dec!(0.5));
        assert!(result.rows.iter().all(|r| r.interest_percent == dec!(1.0)));
        assert!(result.rows.iter().all(|r| r.interest_method == InterestMethod::Simple));
    }
}

// ============================================================================
// LEDGER / AGGREGATE EQUIVALENCE
// ============================================================================

mod equivalence_tests {
    use super::*;

    fn year_of_ipca_e() -> RestatementRequestBuilder {
        let window = TemporalFixtures::year(2023);
        let ipca_e = SeriesFixtures::monthly(
            month(2023, 1),
            &[
                dec!(0.53),
                dec!(0.76),
                dec!(0.69),
                dec!(0.57),
                dec!(0.51),
                dec!(0.04),
                dec!(-0.07),
                dec!(0.28),
                dec!(0.35),
                dec!(0.21),
                dec!(0.33),
                dec!(0.40),
            ],
        );
        RestatementRequestBuilder::bare(MoneyFixtures::brl_1000(), window)
            .with_indices(vec![SeriesFixtures::ipca_e_series(ipca_e)])
    }

    #[test]
    fn test_simple_interest_matches_aggregate() {
        let builder = year_of_ipca_e().with_simple_interest(dec!(1.0));

        let ledger = restate(&builder.clone().build());
        let aggregated = aggregate(&builder.build_aggregate());

        assert_money_approx_eq(&ledger.totals.final_value, &aggregated.final_value, dec!(0.01));
        assert_money_approx_eq(&ledger.totals.corrected_principal, &aggregated.corrected_value, dec!(0.01));
    }

    #[test]
    fn test_compound_interest_matches_aggregate() {
        let builder = year_of_ipca_e().with_compound_interest(dec!(0.5));

        let ledger = restate(&builder.clone().build());
        let aggregated = aggregate(&builder.build_aggregate());

        assert_money_approx_eq(&ledger.totals.final_value, &aggregated.final_value, dec!(0.01));
        assert_decimal_approx_eq(
            ledger.totals.cumulative_interest_factor,
            aggregated.interest_factor,
            dec!(0.000001),
        );
    }

    #[test]
    fn test_selic_passthrough_matches_aggregate() {
        let window = TemporalFixtures::first_quarter_2024();
        let builder = RestatementRequestBuilder::bare(MoneyFixtures::brl_1000(), window)
            .with_selic(SeriesFixtures::daily_selic(window, dec!(0.04)), SelicTreatment::CompoundMonthly)
            .with_regime_rules(vec![RegimeRule::new(InterestMethod::SelicPassthrough)]);

        let ledger = restate(&builder.clone().build());
        let aggregated = aggregate(&builder.build_aggregate());

        assert_money_approx_eq(&ledger.totals.final_value, &aggregated.final_value, dec!(0.01));
        assert!(ledger.rows.iter().all(|r| r.interest_method == InterestMethod::SelicPassthrough));
    }

    #[test]
    fn test_empty_series_leave_principal_unchanged() {
        let builder = RestatementRequestBuilder::bare(MoneyFixtures::brl_1000(), TemporalFixtures::year(2023));

        let ledger = restate(&builder.clone().build());
        let aggregated = aggregate(&builder.build_aggregate());

        assert_eq!(ledger.totals.final_value.amount(), dec!(1000));
        assert_eq!(aggregated.final_value.amount(), dec!(1000));
        assert_eq!(aggregated.percentages.total, dec!(0));
    }

    #[test]
    fn test_series_wider_than_window_matches_aggregate() {
        let window = TemporalFixtures::first_quarter_2024();
        let ipca_e = SeriesFixtures::monthly(month(2023, 11), &[dec!(1); 6]);
        let builder = RestatementRequestBuilder::bare(MoneyFixtures::brl_1000(), window)
            .with_indices(vec![SeriesFixtures::ipca_e_series(ipca_e)])
            .with_compound_interest(dec!(1.0));

        let ledger = restate(&builder.clone().build());
        let aggregated = aggregate(&builder.build_aggregate());

        assert_eq!(aggregated.index_factor, dec!(1.030301));
        assert_money_approx_eq(&ledger.totals.final_value, &aggregated.final_value, dec!(0.01));
    }
}

// ============================================================================
// POLICY TESTS
// ============================================================================

mod policy_tests {
    use super::*;

    #[test]
    fn test_compound_selic_exceeds_simple_sum() {
        let window = TemporalFixtures::year(2023);
        let selic = SeriesFixtures::daily_selic(window, dec!(0.05));
        let builder = RestatementRequestBuilder::bare(MoneyFixtures::brl_1000(), window);

        let compound = aggregate(
            &builder
                .clone()
                .with_selic(selic.clone(), SelicTreatment::CompoundMonthly)
                .build_aggregate(),
        );
        let simple = aggregate(&builder.with_selic(selic.clone(), SelicTreatment::Simple).build_aggregate());

        let days = rust_decimal::Decimal::from(selic.len() as u64);
        assert_eq!(simple.selic_factor, dec!(1) + dec!(0.0005) * days);
        assert!(compound.selic_factor > simple.selic_factor);
        assert!(compound.final_value.amount() > simple.final_value.amount());
    }

    fn legal_rate_builder(policy: LegalRatePolicy) -> RestatementRequestBuilder {
        let window = TemporalFixtures::first_quarter_2024();
        RestatementRequestBuilder::bare(MoneyFixtures::brl_1000(), window)
            .with_indices(vec![SeriesFixtures::ipca_e_series(SeriesFixtures::flat_monthly(window, dec!(0.8)))])
            .with_selic(SeriesFixtures::monthly_selic(window, dec!(0.5)), SelicTreatment::CompoundMonthly)
            .with_regime_rules(vec![RegimeRule::new(InterestMethod::LegalRate)])
            .with_legal_rate_policy(policy)
    }

    #[test]
    fn test_legal_rate_floors_at_zero_when_index_exceeds_selic() {
        let result = restate(&legal_rate_builder(LegalRatePolicy::NetOfIndex).build());

        assert!(result.rows.iter().all(|r| r.interest_percent == dec!(0)));
        assert_eq!(result.totals.final_value, result.totals.corrected_principal);
        assert!(result.totals.accrued_interest.is_zero());
    }

    #[test]
    fn test_gross_selic_ignores_index() {
        let result = restate(&legal_rate_builder(LegalRatePolicy::GrossSelic).build());

        assert!(result.rows.iter().all(|r| r.interest_percent == dec!(0.5)));
        assert!(result.totals.accrued_interest > Money::ZERO);
    }

    #[test]
    fn test_monthly_rounding_accumulates_rounded_increments() {
        let monthly = restate(
            &RestatementRequestBuilder::new()
                .with_rounding(RoundingPolicy::monthly(2))
                .build(),
        );
        let final_only = restate(&RestatementRequestBuilder::new().build());

        // 101.00 + 101.51 + 102.32 against 304.82204 rounded once
        assert_eq!(monthly.totals.accrued_interest.amount(), dec!(304.83));
        assert_eq!(final_only.totals.accrued_interest.amount(), dec!(304.82));
        assert_eq!(monthly.totals.final_value.amount(), dec!(10536.53));
        for row in &monthly.rows {
            assert_money_rounded(&row.corrected_principal, 2);
            assert_money_rounded(&row.final_value, 2);
        }
    }

    #[test]
    fn test_rounding_level_changes_final_value() {
        let builder = RestatementRequestBuilder::bare(Money::brl(dec!(1.00)), TemporalFixtures::first_quarter_2024())
            .with_simple_interest(dec!(0.5));

        let monthly = restate(&builder.clone().with_rounding(RoundingPolicy::monthly(2)).build());
        let final_only = restate(&builder.with_rounding(RoundingPolicy::final_only(2)).build());

        // 0.005 rounds up to 0.01 every month; 0.015 rounds once to 0.02
        assert_eq!(monthly.totals.accrued_interest.amount(), dec!(0.03));
        assert_eq!(monthly.totals.final_value.amount(), dec!(1.03));
        assert_eq!(final_only.totals.accrued_interest.amount(), dec!(0.02));
        assert_eq!(final_only.totals.final_value.amount(), dec!(1.02));
        assert_ne!(monthly.totals.final_value, final_only.totals.final_value);
    }

    #[test]
    fn test_step_order_commutes_for_compound_interest() {
        let builder = RestatementRequestBuilder::new()
            .with_rounding(RoundingPolicy::none())
            .with_compound_interest(dec!(1.0));

        let index_first = restate(&builder.clone().build());
        let interest_first = restate(&builder.with_step_order(StepOrder::InterestThenIndex).build());

        assert_money_approx_eq(
            &index_first.totals.final_value,
            &interest_first.totals.final_value,
            dec!(0.000001),
        );
    }

    #[test]
    fn test_step_order_changes_simple_interest_base() {
        let builder = RestatementRequestBuilder::new().with_rounding(RoundingPolicy::none());

        let index_first = restate(&builder.clone().build());
        let interest_first = restate(&builder.with_step_order(StepOrder::InterestThenIndex).build());

        // month 1 interest on 10000.00 instead of 10100.00
        assert_eq!(interest_first.rows[0].accrued_interest.amount(), dec!(100.00));
        assert!(index_first.totals.final_value.amount() > interest_first.totals.final_value.amount());
        assert_eq!(
            index_first.totals.corrected_principal,
            interest_first.totals.corrected_principal
        );
    }

    #[test]
    fn test_inverted_window_is_rejected_before_calculation() {
        let error = validate_window(date(2024, 3, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(error, RestatementError::InvalidWindow { .. }));

        let inverted = DateRange {
            start: date(2024, 3, 1),
            end: date(2024, 1, 1),
        };
        let result = restate(&RestatementRequestBuilder::new().with_window(inverted).build());
        assert!(result.rows.is_empty());
        assert_eq!(result.totals.final_value, MoneyFixtures::reference_principal());
    }
}

// ============================================================================
// PRESET TESTS
// ============================================================================

mod preset_tests {
    use super::*;

    fn adapter(window: DateRange) -> InMemorySeriesAdapter {
        InMemorySeriesAdapter::new()
            .with_series(EconomicIndex::IpcaE, SeriesFixtures::flat_monthly(window, dec!(0.5)))
            .with_series(EconomicIndex::Selic, SeriesFixtures::daily_selic(window, dec!(0.03)))
    }

    #[tokio::test]
    async fn test_public_condemnation_switches_to_selic_in_december_2021() {
        let window = TemporalFixtures::around_selic_milestone();
        let port = adapter(window);
        let preset = CasePreset::build(ActionType::Condemnation, DebtorType::PublicTreasury, window);

        let inputs = preset.inputs(&port, window).await.unwrap();
        let result = restate(&preset.request(Money::brl(dec!(50000)), window, inputs));

        assert_eq!(result.rows.len(), 7);
        for row in &result.rows {
            if row.competence < month(2021, 12) {
                assert_eq!(row.interest_method, InterestMethod::Simple);
                assert_eq!(row.interest_percent, dec!(1.0));
                assert_eq!(row.index_percent, dec!(0.5));
            } else {
                assert_eq!(row.interest_method, InterestMethod::SelicPassthrough);
                assert_eq!(row.index_percent, dec!(0));
                assert!(row.interest_percent > dec!(0));
            }
        }
    }

    #[tokio::test]
    async fn test_private_social_security_ignores_selic() {
        let window = TemporalFixtures::around_selic_milestone();
        let port = InMemorySeriesAdapter::new()
            .with_series(EconomicIndex::Inpc, SeriesFixtures::flat_monthly(window, dec!(0.4)));
        let preset = CasePreset::build(ActionType::SocialSecurity, DebtorType::Private, window);

        let inputs = preset.inputs(&port, window).await.unwrap();
        assert!(inputs.selic.is_empty());
        assert_eq!(inputs.indices, vec![IndexSeries::new(
            EconomicIndex::Inpc,
            SeriesFixtures::flat_monthly(window, dec!(0.4)),
        )]);

        let result = restate(&preset.request(Money::brl(dec!(1000)), window, inputs));
        assert!(result.rows.iter().all(|r| r.interest_percent == dec!(0.5)));
    }

    #[tokio::test]
    async fn test_missing_series_surfaces_port_error() {
        let window = TemporalFixtures::around_selic_milestone();
        let preset = CasePreset::build(ActionType::Tax, DebtorType::Private, window);

        let error = preset
            .inputs(&InMemorySeriesAdapter::new(), window)
            .await
            .unwrap_err();

        match error {
            RestatementError::Series(port_error) => assert!(port_error.is_not_found()),
            other => panic!("expected a series error, got {other:?}"),
        }
    }
}
