//!
//! src/dashboard.rs  Andrew Belles  Oct 19th, 2026
//!
//! Defines the dashboard pipeline: category -> fetch -> project -> table.
//! Fetch failures and empty charts become a notice for the user and halt
//! that category, they are never returned as errors
//!

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::cache::ChartCache;
use crate::category::ChartCategory;
use crate::charts::TrackCharts;
use crate::config::CachePolicy;
use crate::errors::ProjectError;
use crate::fetch::ChartSource;
use crate::project::{self, ChartRow};
use crate::table::ChartTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Empty(ChartCategory),
    FetchFailed(String)
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Empty(category) =>
                format!("No se encontraron datos para {}.", category.label()),
            Notice::FetchFailed(details) =>
                format!("Error al obtener datos: {details}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub table: ChartTable,
    pub charts: Option<TrackCharts>,
    pub fetched_at: Option<DateTime<Utc>>
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Halted(Notice),
    Ready(ChartView)
}

pub struct Dashboard<S> {
    source: S,
    cache: ChartCache
}

impl<S: ChartSource> Dashboard<S> {
    pub fn new(source: S, policy: CachePolicy) -> Self {
        Self { source, cache: ChartCache::new(policy) }
    }

    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    /// Loads one category. `Err` only when a track item lacks its nested
    /// artist or album, which aborts the whole projection.
    pub async fn load(&mut self, category: ChartCategory) ->
        Result<DashboardView, ProjectError> {
        info!(field = category.api_field(), policy = ?self.cache.policy(),
            "dashboard.load");

        let items = match self.cache.get_or_fetch(&self.source, category).await {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, field = category.api_field(), "dashboard.fetch.failed");
                return Ok(DashboardView::Halted(Notice::FetchFailed(e.to_string())));
            }
        };

        if items.is_empty() {
            warn!(field = category.api_field(), "dashboard.empty");
            return Ok(DashboardView::Halted(Notice::Empty(category)));
        }

        let rows = project::project(category, &items)
            .inspect_err(|e| error!(error = %e, "dashboard.project.failed"))?;

        let charts = category.has_charts().then(|| {
            let tracks: Vec<_> = rows.iter()
                .filter_map(|r| match r {
                    ChartRow::Track(t) => Some(t.clone()),
                    _ => None
                })
                .collect();
            TrackCharts::from_rows(&tracks)
        });

        let table = ChartTable::build(category, &rows);
        info!(field = category.api_field(), rows = table.rows.len(), "dashboard.ready");

        Ok(DashboardView::Ready(ChartView {
            table,
            charts,
            fetched_at: self.cache.get(category).map(|e| e.fetched_at)
        }))
    }
}
