//! Default rule catalog
//!
//! Court cost rules grouped by the kind of procedural act. The values are the
//! federal-court defaults and can be replaced by a regional schedule or by
//! caller-supplied rules.

use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TariffError;
use crate::rule::TariffRule;

/// Group of procedural acts a rule list prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffCategory {
    CivilActions,
    CivilAppeals,
    Enforcement,
    ObjectionsAndIncidents,
    WritsAndServices,
    CriminalActions,
}

impl TariffCategory {
    pub const ALL: [TariffCategory; 6] = [
        TariffCategory::CivilActions,
        TariffCategory::CivilAppeals,
        TariffCategory::Enforcement,
        TariffCategory::ObjectionsAndIncidents,
        TariffCategory::WritsAndServices,
        TariffCategory::CriminalActions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TariffCategory::CivilActions => "civil_actions",
            TariffCategory::CivilAppeals => "civil_appeals",
            TariffCategory::Enforcement => "enforcement",
            TariffCategory::ObjectionsAndIncidents => "objections_and_incidents",
            TariffCategory::WritsAndServices => "writs_and_services",
            TariffCategory::CriminalActions => "criminal_actions",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            TariffCategory::CivilActions => "Civil actions",
            TariffCategory::CivilAppeals => "Civil appeals",
            TariffCategory::Enforcement => "Enforcement",
            TariffCategory::ObjectionsAndIncidents => "Objections and incidents",
            TariffCategory::WritsAndServices => "Writs and services",
            TariffCategory::CriminalActions => "Criminal actions",
        }
    }
}

impl fmt::Display for TariffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TariffCategory {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        TariffCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| TariffError::UnknownCategory(s.to_string()))
    }
}

/// Default rules of a category, in display order
pub fn default_rules(category: TariffCategory) -> Vec<TariffRule> {
    match category {
        TariffCategory::CivilActions => vec![
            TariffRule::percentage("distribuicao", "Initial distribution", dec!(0.01), Some(dec!(50)), None),
            TariffRule::fixed("citacao", "Service of process", dec!(30)),
            TariffRule::fixed("audiencia", "Hearing", dec!(80)),
        ],
        TariffCategory::CivilAppeals => vec![
            TariffRule::percentage("preparo", "Appeal preparation", dec!(0.02), Some(dec!(80)), None),
            TariffRule::fixed("embargos_declaracao", "Motion for clarification", dec!(40)),
        ],
        TariffCategory::Enforcement => vec![
            TariffRule::percentage("taxa_execucao", "Enforcement fee", dec!(0.01), Some(dec!(60)), None),
            TariffRule::fixed("penhora", "Attachment", dec!(50)),
        ],
        TariffCategory::ObjectionsAndIncidents => vec![
            TariffRule::fixed("embargos_execucao", "Objection to enforcement", dec!(70)),
            TariffRule::fixed("incidente_processual", "Procedural incident", dec!(45)),
        ],
        TariffCategory::WritsAndServices => vec![
            TariffRule::distance("diligencia", "Bailiff diligence", dec!(60), dec!(1.5)),
            TariffRule::fixed("certidao", "Certificate", dec!(5)),
        ],
        TariffCategory::CriminalActions => vec![
            TariffRule::fixed("acao_penal_publica", "Public criminal action", dec!(0)),
            TariffRule::fixed("acao_penal_privada", "Private criminal action", dec!(0)),
        ],
    }
}
