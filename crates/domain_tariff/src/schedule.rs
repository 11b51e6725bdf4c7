//! Regional cost schedules of the federal courts
//!
//! Each regional court publishes its own tables. Table I prices the initial
//! filing as a percentage of the claim value with a regional floor; Table III
//! lists fixed acts (certificates, copies, auction acts). Remittance postage
//! is set per judicial subsection and is still unpublished for most of them.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TariffError;
use crate::rule::TariffRule;

/// Federal court region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    /// Federal Justice Council, national defaults
    #[default]
    Cjf,
    Trf1,
    Trf2,
    Trf3,
    Trf4,
    Trf5,
    Trf6,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Cjf,
        Region::Trf1,
        Region::Trf2,
        Region::Trf3,
        Region::Trf4,
        Region::Trf5,
        Region::Trf6,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::Cjf => "CJF",
            Region::Trf1 => "TRF1",
            Region::Trf2 => "TRF2",
            Region::Trf3 => "TRF3",
            Region::Trf4 => "TRF4",
            Region::Trf5 => "TRF5",
            Region::Trf6 => "TRF6",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Region::ALL
            .into_iter()
            .find(|region| region.code() == code)
            .ok_or_else(|| TariffError::UnknownRegion(s.to_string()))
    }
}

/// Table I: filing fee as a bounded percentage of the claim value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableIConfig {
    pub rate: Decimal,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

/// Table III entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableIIIItem {
    pub id: String,
    pub label: String,
    pub value: Decimal,
}

impl TableIIIItem {
    fn new(id: &str, label: &str, value: Decimal) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value,
        }
    }

    /// The entry as a fixed rule
    pub fn to_rule(&self) -> TariffRule {
        TariffRule::fixed(self.id.clone(), self.label.clone(), self.value)
    }
}

/// Remittance and return postage for one subsection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostageEntry {
    pub subsection: String,
    /// `None` while the subsection has not published a value
    pub value: Option<Decimal>,
}

/// Cost tables of one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalSchedule {
    pub region: Region,
    pub table_i: TableIConfig,
    pub table_iii: Vec<TableIIIItem>,
    pub postage: Vec<PostageEntry>,
    pub notes: String,
}

impl RegionalSchedule {
    /// Built-in schedule of a region
    pub fn for_region(region: Region) -> Self {
        let floor = match region {
            Region::Cjf | Region::Trf1 | Region::Trf2 => dec!(50),
            Region::Trf3 => dec!(80),
            Region::Trf4 | Region::Trf5 | Region::Trf6 => dec!(60),
        };
        let certificate = match region {
            Region::Trf2 => dec!(10),
            Region::Trf3 => dec!(6),
            _ => dec!(5),
        };

        Self {
            region,
            table_i: TableIConfig {
                rate: dec!(0.01),
                min: Some(floor),
                max: None,
            },
            table_iii: vec![
                TableIIIItem::new("arrematacao", "Auction sale", Decimal::ZERO),
                TableIIIItem::new("adjudicacao", "Adjudication", Decimal::ZERO),
                TableIIIItem::new("remicao", "Redemption", Decimal::ZERO),
                TableIIIItem::new("certidao", "Certificates", certificate),
                TableIIIItem::new("reprografia", "Copies", dec!(1)),
            ],
            postage: postage(region),
            notes: format!("Table I: 1% of the claim value, minimum R$ {floor}."),
        }
    }

    /// Table I as a percentage rule
    pub fn table_i_rule(&self, id: impl Into<String>, label: impl Into<String>) -> TariffRule {
        TariffRule::percentage(id, label, self.table_i.rate, self.table_i.min, self.table_i.max)
    }

    /// Table III as fixed rules
    pub fn table_iii_rules(&self) -> Vec<TariffRule> {
        self.table_iii.iter().map(TableIIIItem::to_rule).collect()
    }

    /// Postage of a subsection, if published
    pub fn postage_for(&self, subsection: &str) -> Option<Decimal> {
        self.postage
            .iter()
            .find(|entry| entry.subsection == subsection)
            .and_then(|entry| entry.value)
    }
}

fn postage(region: Region) -> Vec<PostageEntry> {
    let unpublished = |subsection: &str| PostageEntry {
        subsection: subsection.to_string(),
        value: None,
    };

    match region {
        Region::Cjf => Vec::new(),
        Region::Trf1 => {
            let mut entries = vec![PostageEntry {
                subsection: "SJDF-Distrito Federal".to_string(),
                value: Some(Decimal::ZERO),
            }];
            entries.extend(
                [
                    "SJGO-Goiás",
                    "SJMT-Mato Grosso",
                    "SJBA-Bahia",
                    "SJAM-Amazonas",
                    "SJPA-Pará",
                    "SJRO-Rondônia",
                    "SJAC-Acre",
                    "SJRR-Roraima",
                    "SJPI-Piauí",
                    "SJMA-Maranhão",
                    "SJTO-Tocantins",
                ]
                .into_iter()
                .map(unpublished),
            );
            entries
        }
        Region::Trf2 => ["JFRJ-Rio de Janeiro", "JFES-Espírito Santo"]
            .into_iter()
            .map(unpublished)
            .collect(),
        Region::Trf3 => ["JFSP-São Paulo", "JFMS-Mato Grosso do Sul"]
            .into_iter()
            .map(unpublished)
            .collect(),
        Region::Trf4 => ["JFPR-Curitiba", "JFSC-Florianópolis", "JFRS-Porto Alegre"]
            .into_iter()
            .map(unpublished)
            .collect(),
        Region::Trf5 => [
            "JFCE-Fortaleza",
            "JFPE-Recife",
            "JFPB-João Pessoa",
            "JFAL-Maceió",
            "JFRN-Natal",
            "JFSE-Aracaju",
        ]
        .into_iter()
        .map(unpublished)
        .collect(),
        Region::Trf6 => ["JFMG-Belo Horizonte", "JFMG-Uberlândia", "JFMG-Juiz de Fora"]
            .into_iter()
            .map(unpublished)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::TariffInput;

    #[test]
    fn test_trf3_table_i_floors_at_80() {
        let rule = RegionalSchedule::for_region(Region::Trf3).table_i_rule("distribuicao", "Distribution");

        assert_eq!(rule.unit_value(&TariffInput::claim(dec!(1000))), dec!(80));
        assert_eq!(rule.unit_value(&TariffInput::claim(dec!(20000))), dec!(200));
    }

    #[test]
    fn test_regional_floors() {
        let floor = |region| RegionalSchedule::for_region(region).table_i.min;
        assert_eq!(floor(Region::Cjf), Some(dec!(50)));
        assert_eq!(floor(Region::Trf2), Some(dec!(50)));
        assert_eq!(floor(Region::Trf5), Some(dec!(60)));
    }

    #[test]
    fn test_certificate_values() {
        let certificate = |region| {
            RegionalSchedule::for_region(region)
                .table_iii
                .into_iter()
                .find(|item| item.id == "certidao")
                .map(|item| item.value)
        };
        assert_eq!(certificate(Region::Trf1), Some(dec!(5)));
        assert_eq!(certificate(Region::Trf2), Some(dec!(10)));
        assert_eq!(certificate(Region::Trf3), Some(dec!(6)));
    }

    #[test]
    fn test_postage_lookup() {
        let trf1 = RegionalSchedule::for_region(Region::Trf1);
        assert_eq!(trf1.postage.len(), 12);
        assert_eq!(trf1.postage_for("SJDF-Distrito Federal"), Some(Decimal::ZERO));
        assert_eq!(trf1.postage_for("SJGO-Goiás"), None);
        assert!(RegionalSchedule::for_region(Region::Cjf).postage.is_empty());
    }

    #[test]
    fn test_region_parsing_and_display() {
        assert_eq!("trf3".parse::<Region>().unwrap(), Region::Trf3);
        assert_eq!(Region::Trf6.to_string(), "TRF6");
        assert_eq!(serde_json::to_string(&Region::Cjf).unwrap(), "\"CJF\"");
        assert!(matches!("TRF9".parse::<Region>(), Err(TariffError::UnknownRegion(_))));
    }
}
