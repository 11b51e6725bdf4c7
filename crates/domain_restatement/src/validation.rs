//! Caller-side window checks
//!
//! The engines accept any window. These checks are for the layer that takes
//! user input: an inverted window is rejected, and a daily SELIC request that
//! exceeds what the Central Bank serves in one call is flagged, never
//! truncated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::DateRange;

use crate::error::RestatementError;

/// Longest span the SGS API returns for a daily series in one request
pub const DEFAULT_MAX_DAILY_SERIES_YEARS: u32 = 10;

/// Validates and builds a calculation window
///
/// # Errors
///
/// Returns `RestatementError::InvalidWindow` when `end` is before `start`.
/// A single-day window is valid.
pub fn validate_window(start: NaiveDate, end: NaiveDate) -> Result<DateRange, RestatementError> {
    if end < start {
        return Err(RestatementError::InvalidWindow {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(DateRange { start, end })
}

/// A daily series window that exceeds the upstream limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpanWarning {
    pub window: DateRange,
    pub max_years: u32,
    pub message: String,
}

/// Flags daily-series windows longer than `max_years`
pub fn check_daily_series_span(window: DateRange, max_years: u32) -> Option<SeriesSpanWarning> {
    if !window.exceeds_years(max_years) {
        return None;
    }

    let message = format!(
        "daily SELIC window {} to {} exceeds the {}-year limit of the data source",
        window.start, window.end, max_years
    );
    warn!(start = %window.start, end = %window.end, max_years, "{}", message);

    Some(SeriesSpanWarning {
        window,
        max_years,
        message,
    })
}
