//! Rounding policy
//!
//! When a calculation rounds changes the result: rounding at every month
//! close changes the base the next month compounds on, rounding once at the
//! end does not. Both are legitimate and neither reconciles with the other.

use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// When monetary values are rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingLevel {
    /// Never round; full precision throughout
    #[default]
    None,
    /// Round the interest increment, the corrected principal and the final
    /// value at the close of every competence month
    Monthly,
    /// Round once, after the last month
    Final,
}

fn default_decimals() -> u32 {
    2
}

/// Rounding level plus the number of decimal places (half-up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    #[serde(default)]
    pub level: RoundingLevel,
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl RoundingPolicy {
    pub fn new(level: RoundingLevel, decimals: u32) -> Self {
        Self { level, decimals }
    }

    pub fn none() -> Self {
        Self::new(RoundingLevel::None, default_decimals())
    }

    pub fn monthly(decimals: u32) -> Self {
        Self::new(RoundingLevel::Monthly, decimals)
    }

    pub fn final_only(decimals: u32) -> Self {
        Self::new(RoundingLevel::Final, decimals)
    }

    pub fn is_monthly(&self) -> bool {
        self.level == RoundingLevel::Monthly
    }

    pub fn is_final(&self) -> bool {
        self.level == RoundingLevel::Final
    }

    /// Rounds unconditionally to the configured places
    pub fn round(&self, value: Money) -> Money {
        value.round_half_up(self.decimals)
    }

    /// Rounds only under the monthly level
    pub fn at_month_close(&self, value: Money) -> Money {
        if self.is_monthly() {
            self.round(value)
        } else {
            value
        }
    }
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rounds_at_close() {
        let policy = RoundingPolicy::monthly(2);
        assert_eq!(policy.at_month_close(Money::brl(dec!(101.505))).amount(), dec!(101.51));
    }

    #[test]
    fn test_final_does_not_round_at_close() {
        let policy = RoundingPolicy::final_only(2);
        assert_eq!(policy.at_month_close(Money::brl(dec!(101.505))).amount(), dec!(101.505));
        assert_eq!(policy.round(Money::brl(dec!(101.505))).amount(), dec!(101.51));
    }

    #[test]
    fn test_decimals_default_to_two() {
        let policy: RoundingPolicy = serde_json::from_str(r#"{"level":"final"}"#).unwrap();
        assert_eq!(policy.decimals, 2);
        assert!(policy.is_final());
    }
}
