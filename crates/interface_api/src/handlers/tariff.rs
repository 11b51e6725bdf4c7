//! Tariff handlers

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use core_kernel::TariffQuoteId;
use domain_tariff::{default_rules, evaluate, validate_rules, Region, RegionalSchedule};

use crate::dto::tariff::*;
use crate::{error::ApiError, AppState};

/// Prices a rule set, optionally under a legal-aid exemption
pub async fn evaluate_tariff(Json(body): Json<EvaluateBody>) -> Result<Json<EvaluateResponse>, ApiError> {
    let rules = match (body.rules, body.category) {
        (Some(rules), _) => rules,
        (None, Some(category)) => default_rules(category),
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either rules or a category is required".to_string(),
            ))
        }
    };
    validate_rules(&rules)?;

    let result = match body.exemption {
        Some(exemption) => exemption.evaluate(&rules, &body.inputs),
        None => evaluate(&rules, &body.inputs),
    };
    let quote_id = TariffQuoteId::generate();

    info!(%quote_id, items = result.items.len(), total = %result.total, "tariff evaluated");

    Ok(Json(EvaluateResponse {
        quote_id,
        items: result.items,
        total: result.total,
    }))
}

/// Lists the regions with a built-in schedule
pub async fn list_regions(State(state): State<AppState>) -> Json<RegionListResponse> {
    Json(RegionListResponse {
        default: state.config.default_region,
        regions: Region::ALL.to_vec(),
    })
}

/// Gets the schedule of a region
pub async fn get_region(Path(code): Path<String>) -> Result<Json<RegionalSchedule>, ApiError> {
    let region: Region = code.parse()?;
    Ok(Json(RegionalSchedule::for_region(region)))
}
