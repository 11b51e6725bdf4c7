//! Restatement handlers

use axum::{extract::State, Json};
use tracing::info;

use core_kernel::{CalculationId, DateRange, Money};
use domain_restatement::{
    aggregate, check_daily_series_span, restate, validate_window, AggregateRequest,
    RestatementRequest, RoundingPolicy, SeriesSpanWarning,
};

use crate::dto::restatement::*;
use crate::{error::ApiError, AppState};

fn span_warnings(state: &AppState, window: DateRange, has_selic: bool) -> Vec<SeriesSpanWarning> {
    if !has_selic {
        return Vec::new();
    }
    check_daily_series_span(window, state.config.max_daily_series_years)
        .into_iter()
        .collect()
}

/// Restates a principal month by month
pub async fn restate_ledger(
    State(state): State<AppState>,
    Json(body): Json<RestatementBody>,
) -> Result<Json<RestatementResponse>, ApiError> {
    let window = validate_window(body.start, body.end)?;
    let warnings = span_warnings(&state, window, !body.selic.is_empty());

    let request = RestatementRequest {
        principal: Money::brl(body.principal),
        window,
        basis: body.basis,
        rounding: body
            .rounding
            .unwrap_or_else(|| RoundingPolicy::final_only(state.config.default_decimals)),
        selic: body.selic,
        indices: body.indices,
        fixed_interest: body.fixed_interest,
        regime_rules: body.regime_rules,
        options: body.options,
    };

    let result = restate(&request);
    let calculation_id = CalculationId::generate();

    info!(
        %calculation_id,
        months = result.rows.len(),
        final_value = %result.totals.final_value,
        "restatement calculated"
    );

    Ok(Json(RestatementResponse {
        calculation_id,
        rows: result.rows,
        totals: result.totals,
        warnings,
    }))
}

/// Computes the aggregate factors of a window
pub async fn restate_aggregate(
    State(state): State<AppState>,
    Json(body): Json<AggregateBody>,
) -> Result<Json<AggregateResponse>, ApiError> {
    let window = validate_window(body.start, body.end)?;
    let warnings = span_warnings(&state, window, !body.selic.is_empty());

    let request = AggregateRequest {
        principal: Money::brl(body.principal),
        window,
        selic: body.selic,
        selic_treatment: body.selic_treatment,
        indices: body.indices,
        fixed_interest: body.fixed_interest,
    };

    let result = aggregate(&request);
    let calculation_id = CalculationId::generate();

    info!(%calculation_id, final_value = %result.final_value, "aggregate calculated");

    Ok(Json(AggregateResponse {
        calculation_id,
        result,
        warnings,
    }))
}
