//! Legal-aid exemptions
//!
//! Exemption is jurisdiction configuration, so it lives outside the engine as
//! pre- or post-processing:
//!
//! - **Blanket** (`ZeroAll`): evaluate normally, then zero every unit value,
//!   subtotal and the total
//! - **Itemized** (`ExemptItems`): drop the exempt rule ids before evaluation

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::Money;

use crate::catalog::TariffCategory;
use crate::engine::{evaluate, CostResult};
use crate::rule::{TariffInput, TariffRule};

/// How an exempt party's costs are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemptionMode {
    #[default]
    ZeroAll,
    ExemptItems,
}

/// Exemption applied to one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Exemption {
    #[serde(default)]
    pub mode: ExemptionMode,
    /// Rule ids removed under `ExemptItems`
    #[serde(default)]
    pub exempt_ids: BTreeSet<String>,
}

impl Exemption {
    /// Zeroes everything
    pub fn blanket() -> Self {
        Self::default()
    }

    /// Removes the listed rules
    pub fn items<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode: ExemptionMode::ExemptItems,
            exempt_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Filters the rule list before evaluation
    pub fn apply_before(&self, rules: &[TariffRule]) -> Vec<TariffRule> {
        match self.mode {
            ExemptionMode::ZeroAll => rules.to_vec(),
            ExemptionMode::ExemptItems => rules
                .iter()
                .filter(|rule| !self.exempt_ids.contains(&rule.id))
                .cloned()
                .collect(),
        }
    }

    /// Post-processes an evaluation result
    pub fn apply_after(&self, mut result: CostResult) -> CostResult {
        if self.mode == ExemptionMode::ZeroAll {
            for item in &mut result.items {
                item.unit_value = Money::ZERO;
                item.subtotal = Money::ZERO;
            }
            result.total = Money::ZERO;
        }
        result
    }

    /// Filters, evaluates and post-processes in one call
    pub fn evaluate(&self, rules: &[TariffRule], inputs: &HashMap<String, TariffInput>) -> CostResult {
        let kept = self.apply_before(rules);
        debug!(mode = ?self.mode, removed = rules.len() - kept.len(), "exemption applied");
        self.apply_after(evaluate(&kept, inputs))
    }
}

/// Legal-aid configuration for every category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GratuityPolicy {
    #[serde(default)]
    pub mode: ExemptionMode,
    /// Exempt rule ids per category, used under `ExemptItems`
    #[serde(default)]
    pub exempt_ids: HashMap<TariffCategory, BTreeSet<String>>,
}

impl GratuityPolicy {
    /// The exemption to apply to a category's rules
    pub fn exemption_for(&self, category: TariffCategory) -> Exemption {
        Exemption {
            mode: self.mode,
            exempt_ids: self.exempt_ids.get(&category).cloned().unwrap_or_default(),
        }
    }
}
