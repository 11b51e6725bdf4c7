//! Tariff rules
//!
//! A rule prices one line item. Its formula is one of three shapes, matched
//! exhaustively:
//!
//! - `fixed`: a flat amount per act
//! - `percentage`: a rate over the claim value (or the executed value),
//!   clamped to optional floor and ceiling
//! - `distance`: a base amount plus a per-kilometre amount
//!
//! Amounts are in reais; rates are fractions (`0.01` is 1%).

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TariffError;

/// Pricing formula of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TariffFormula {
    Fixed {
        amount: Decimal,
    },
    Percentage {
        rate: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Decimal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Decimal>,
    },
    Distance {
        base_amount: Decimal,
        per_km_amount: Decimal,
    },
}

/// Case data a rule is priced against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TariffInput {
    #[serde(default)]
    pub claim_value: Option<Decimal>,
    #[serde(default)]
    pub executed_value: Option<Decimal>,
    #[serde(default)]
    pub distance_km: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl TariffInput {
    /// Input carrying a claim value
    pub fn claim(value: Decimal) -> Self {
        Self {
            claim_value: Some(value),
            ..Self::default()
        }
    }

    /// Input carrying an executed value
    pub fn executed(value: Decimal) -> Self {
        Self {
            executed_value: Some(value),
            ..Self::default()
        }
    }

    /// Input carrying a distance in kilometres
    pub fn distance(km: Decimal) -> Self {
        Self {
            distance_km: Some(km),
            ..Self::default()
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Quantity, 1 when not given
    pub fn quantity_or_default(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Percentage base: claim value, else executed value, else zero
    pub fn base_value(&self) -> Decimal {
        self.claim_value
            .or(self.executed_value)
            .unwrap_or(Decimal::ZERO)
    }
}

/// A priced line item definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRule {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub formula: TariffFormula,
}

impl TariffRule {
    pub fn fixed(id: impl Into<String>, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            formula: TariffFormula::Fixed { amount },
        }
    }

    pub fn percentage(
        id: impl Into<String>,
        label: impl Into<String>,
        rate: Decimal,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            formula: TariffFormula::Percentage { rate, min, max },
        }
    }

    pub fn distance(
        id: impl Into<String>,
        label: impl Into<String>,
        base_amount: Decimal,
        per_km_amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            formula: TariffFormula::Distance {
                base_amount,
                per_km_amount,
            },
        }
    }

    /// Unit value of the rule for an input
    ///
    /// Percentage rules apply the floor, then the ceiling.
    pub fn unit_value(&self, input: &TariffInput) -> Decimal {
        match &self.formula {
            TariffFormula::Fixed { amount } => *amount,
            TariffFormula::Percentage { rate, min, max } => {
                let mut value = input.base_value() * rate;
                if let Some(min) = min {
                    value = value.max(*min);
                }
                if let Some(max) = max {
                    value = value.min(*max);
                }
                value
            }
            TariffFormula::Distance {
                base_amount,
                per_km_amount,
            } => {
                let km = input.distance_km.unwrap_or(Decimal::ZERO);
                *base_amount + km * per_km_amount
            }
        }
    }

    /// Checks the rule's parameters
    ///
    /// # Errors
    ///
    /// Returns `TariffError::InvalidRule` for an empty id, negative amounts
    /// or rates, and a floor above the ceiling.
    pub fn validate(&self) -> Result<(), TariffError> {
        let invalid = |reason: &str| -> Result<(), TariffError> {
            Err(TariffError::invalid_rule(&self.id, reason))
        };

        if self.id.trim().is_empty() {
            return Err(TariffError::invalid_rule("", "rule id must not be empty"));
        }

        match &self.formula {
            TariffFormula::Fixed { amount } if *amount < Decimal::ZERO => {
                invalid("fixed amount must not be negative")
            }
            TariffFormula::Percentage { rate, min, max } => {
                if *rate < Decimal::ZERO {
                    return invalid("rate must not be negative");
                }
                if min.map_or(false, |m| m < Decimal::ZERO) || max.map_or(false, |m| m < Decimal::ZERO) {
                    return invalid("bounds must not be negative");
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return invalid("minimum exceeds maximum");
                    }
                }
                Ok(())
            }
            TariffFormula::Distance {
                base_amount,
                per_km_amount,
            } if *base_amount < Decimal::ZERO || *per_km_amount < Decimal::ZERO => {
                invalid("distance amounts must not be negative")
            }
            _ => Ok(()),
        }
    }
}

/// Validates every rule and rejects duplicate ids
pub fn validate_rules(rules: &[TariffRule]) -> Result<(), TariffError> {
    let mut seen = HashSet::new();
    for rule in rules {
        rule.validate()?;
        if !seen.insert(rule.id.as_str()) {
            return Err(TariffError::DuplicateRule(rule.id.clone()));
        }
    }
    Ok(())
}
