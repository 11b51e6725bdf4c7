//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating principals, windows, series
//! and tariff rules that keep the engines' preconditions (ordered windows,
//! non-negative percentages, valid rule bounds).

use core_kernel::{CompetenceMonth, DateRange, Money};
use domain_restatement::SeriesPoint;
use domain_tariff::{TariffInput, TariffRule};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for principals between 0.01 and 10,000,000.00
pub fn principal_strategy() -> impl Strategy<Value = Money> {
    (1i64..1_000_000_000i64).prop_map(Money::from_centavos)
}

/// Strategy for monthly percentages from 0.00% to 2.00%
pub fn monthly_percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=200i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for daily SELIC percentages from 0.0000% to 0.0600%
pub fn daily_percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=600i64).prop_map(|n| Decimal::new(n, 4))
}

/// Strategy for whole-month windows of 1 to `max_months` months starting
/// between 2010 and 2024
pub fn window_strategy(max_months: u32) -> impl Strategy<Value = DateRange> {
    (2010i32..2025i32, 1u32..=12u32, 1u32..=max_months.max(1)).prop_map(|(year, month, length)| {
        let start = CompetenceMonth::new(year, month).unwrap();
        let mut end = start;
        for _ in 1..length {
            end = end.next();
        }
        DateRange::months(start, end).unwrap()
    })
}

/// Strategy for a window together with one monthly point per competence month
pub fn window_with_monthly_series(
    max_months: u32,
) -> impl Strategy<Value = (DateRange, Vec<SeriesPoint>)> {
    window_strategy(max_months).prop_flat_map(|window| {
        let months = window.competence_months();
        proptest::collection::vec(monthly_percent_strategy(), months.len()).prop_map(move |percents| {
            let points = months
                .iter()
                .zip(percents)
                .map(|(month, percent)| SeriesPoint::new(month.first_day(), percent))
                .collect();
            (window, points)
        })
    })
}

/// Strategy for valid tariff rules of any formula
pub fn tariff_rule_strategy() -> impl Strategy<Value = TariffRule> {
    let amount = (0i64..100_000i64).prop_map(|n| Decimal::new(n, 2));
    prop_oneof![
        amount.clone().prop_map(|value| TariffRule::fixed("fixed", "Fixed", value)),
        (0i64..500i64, proptest::option::of(0i64..10_000i64)).prop_map(|(rate, min)| {
            TariffRule::percentage(
                "percentage",
                "Percentage",
                Decimal::new(rate, 4),
                min.map(|m| Decimal::new(m, 2)),
                None,
            )
        }),
        (amount, 0i64..1_000i64).prop_map(|(base, per_km)| {
            TariffRule::distance("distance", "Distance", base, Decimal::new(per_km, 2))
        }),
    ]
}

/// Strategy for tariff inputs with every field populated
pub fn tariff_input_strategy() -> impl Strategy<Value = TariffInput> {
    (0i64..100_000_000i64, 0i64..50_000i64, 1u32..10u32).prop_map(|(claim, km, quantity)| TariffInput {
        claim_value: Some(Decimal::new(claim, 2)),
        executed_value: None,
        distance_km: Some(Decimal::new(km, 1)),
        quantity: Some(quantity),
    })
}
