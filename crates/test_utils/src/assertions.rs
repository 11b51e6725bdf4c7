//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for restatement and tariff results
//! that give more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_restatement::Restatement;
use domain_tariff::CostResult;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Arguments
///
/// * `actual` - The actual Money value
/// * `expected` - The expected Money value
/// * `tolerance` - The allowed difference in the amount
///
/// # Panics
///
/// Panics if the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a decimal value is approximately equal to another
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a Money value has at most `decimals` decimal places
pub fn assert_money_rounded(money: &Money, decimals: u32) {
    assert_eq!(
        money.amount(),
        money.amount().round_dp(decimals),
        "Expected {} rounded to {} decimals",
        money,
        decimals
    );
}

/// Asserts that every ledger row splits into corrected principal plus interest
/// and that the totals match the last row
pub fn assert_ledger_consistent(restatement: &Restatement, tolerance: Decimal) {
    for row in &restatement.rows {
        let parts = row.corrected_principal.amount() + row.accrued_interest.amount();
        assert_decimal_approx_eq(parts, row.final_value.amount(), tolerance);
    }

    if let Some(last) = restatement.rows.last() {
        assert_eq!(
            last.final_value, restatement.totals.final_value,
            "Totals final value does not match the last row of {}",
            last.competence
        );
        assert_eq!(last.corrected_principal, restatement.totals.corrected_principal);
    }
}

/// Asserts that the final value never decreases from one row to the next
pub fn assert_final_value_monotonic(restatement: &Restatement) {
    for pair in restatement.rows.windows(2) {
        assert!(
            pair[1].final_value.amount() >= pair[0].final_value.amount(),
            "Final value decreased from {} ({}) to {} ({})",
            pair[0].competence,
            pair[0].final_value,
            pair[1].competence,
            pair[1].final_value
        );
    }
}

/// Asserts that a cost total equals the sum of its subtotals
pub fn assert_cost_total_consistent(result: &CostResult) {
    let sum: Decimal = result.items.iter().map(|item| item.subtotal.amount()).sum();
    assert_eq!(
        sum,
        result.total.amount(),
        "Sum of subtotals ({}) doesn't equal total ({})",
        sum,
        result.total.amount()
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
