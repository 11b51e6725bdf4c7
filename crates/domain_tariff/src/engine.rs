//! Tariff rule engine
//!
//! Evaluates a rule list against inputs keyed by rule id. Rules keep their
//! order in the result; a rule without an input is priced against an empty
//! input (quantity 1, no values). Evaluation does not validate and does not
//! know about exemptions.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use core_kernel::Money;

use crate::rule::{TariffInput, TariffRule};

/// One priced line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub id: String,
    pub label: String,
    pub quantity: u32,
    pub unit_value: Money,
    /// `unit_value × quantity`
    pub subtotal: Money,
}

/// Itemized costs and their total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostResult {
    pub items: Vec<CostLineItem>,
    pub total: Money,
}

impl CostResult {
    /// Builds a result, summing the subtotals
    pub fn from_items(items: Vec<CostLineItem>) -> Self {
        let total = items.iter().map(|item| &item.subtotal).sum();
        Self { items, total }
    }

    /// Finds a line item by rule id
    pub fn item(&self, id: &str) -> Option<&CostLineItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Prices one rule
pub fn price(rule: &TariffRule, input: &TariffInput) -> CostLineItem {
    let quantity = input.quantity_or_default();
    let unit_value = Money::brl(rule.unit_value(input));
    CostLineItem {
        id: rule.id.clone(),
        label: rule.label.clone(),
        quantity,
        unit_value,
        subtotal: unit_value * Decimal::from(quantity),
    }
}

/// Evaluates rules into line items and a total
///
/// # Arguments
///
/// * `rules` - Rule list, evaluated in order
/// * `inputs` - Case data keyed by rule id
///
/// # Returns
///
/// One line item per rule and the sum of their subtotals
#[instrument(skip_all, fields(rules = rules.len()))]
pub fn evaluate(rules: &[TariffRule], inputs: &HashMap<String, TariffInput>) -> CostResult {
    let empty = TariffInput::default();
    let items = rules
        .iter()
        .map(|rule| price(rule, inputs.get(&rule.id).unwrap_or(&empty)))
        .collect();
    CostResult::from_items(items)
}
