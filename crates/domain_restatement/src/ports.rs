//! Series collaborator port
//!
//! Index series come from outside the engines: the Central Bank's SGS API, a
//! cache in front of it, or fixture files. The `SeriesPort` trait is the one
//! seam between those sources and the calculation. Callers fetch first and
//! then calculate; the engines never hold a port.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_restatement::{SeriesPort, EconomicIndex};
//! use std::sync::Arc;
//!
//! pub struct RestatementService {
//!     series: Arc<dyn SeriesPort>,
//! }
//!
//! impl RestatementService {
//!     pub async fn ipca_e(&self, window: DateRange) -> Result<Vec<SeriesPoint>, PortError> {
//!         self.series.get_series(EconomicIndex::IpcaE, window).await
//!     }
//! }
//! ```
//!
//! Caching and time-to-live policies belong to the adapter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use core_kernel::{DateRange, PortError};

use crate::series::{EconomicIndex, SeriesPoint};

/// Source of economic series
#[async_trait]
pub trait SeriesPort: Send + Sync {
    /// Retrieves the points of an index inside a window
    ///
    /// # Arguments
    ///
    /// * `index` - Which series to fetch
    /// * `window` - Inclusive date window
    ///
    /// # Returns
    ///
    /// Points ordered by date, or a `PortError` when the source fails
    async fn get_series(
        &self,
        index: EconomicIndex,
        window: DateRange,
    ) -> Result<Vec<SeriesPoint>, PortError>;
}

/// In-memory series source for tests and offline use
///
/// Returns the stored points that fall inside the window, sorted by date.
/// An index that was never loaded is reported as not found.
#[derive(Debug, Default, Clone)]
pub struct InMemorySeriesAdapter {
    series: Arc<RwLock<HashMap<EconomicIndex, Vec<SeriesPoint>>>>,
}

impl InMemorySeriesAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates an index
    ///
    /// Clones share their storage, so points added here are visible to
    /// every clone.
    pub fn with_series(self, index: EconomicIndex, points: Vec<SeriesPoint>) -> Self {
        self.load(index, points);
        self
    }

    /// Replaces the stored points of an index
    pub fn load(&self, index: EconomicIndex, points: Vec<SeriesPoint>) {
        self.series.write().insert(index, points);
    }
}

#[async_trait]
impl SeriesPort for InMemorySeriesAdapter {
    async fn get_series(
        &self,
        index: EconomicIndex,
        window: DateRange,
    ) -> Result<Vec<SeriesPoint>, PortError> {
        let series = self.series.read();
        let stored = series
            .get(&index)
            .ok_or_else(|| PortError::not_found(format!("{} (SGS {})", index, index.sgs_code())))?;

        let mut points: Vec<SeriesPoint> = stored
            .iter()
            .filter(|p| window.contains(p.date))
            .copied()
            .collect();
        points.sort_by_key(|p| p.date);

        debug!(%index, points = points.len(), "series served from memory");
        Ok(points)
    }
}
