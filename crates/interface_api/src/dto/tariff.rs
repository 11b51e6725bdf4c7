//! Tariff DTOs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use core_kernel::{Money, TariffQuoteId};
use domain_tariff::{CostLineItem, Exemption, Region, TariffCategory, TariffInput, TariffRule};

/// Either explicit rules or a default catalog
#[derive(Debug, Deserialize)]
pub struct EvaluateBody {
    pub rules: Option<Vec<TariffRule>>,
    pub category: Option<TariffCategory>,
    #[serde(default)]
    pub inputs: HashMap<String, TariffInput>,
    pub exemption: Option<Exemption>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub quote_id: TariffQuoteId,
    pub items: Vec<CostLineItem>,
    pub total: Money,
}

#[derive(Debug, Serialize)]
pub struct RegionListResponse {
    pub default: Region,
    pub regions: Vec<Region>,
}
