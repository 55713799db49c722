//! Refresh cycle orchestration
//!
//! One refresh = validate config → fetch and validate rows → compute the
//! insights report. All per-refresh state (dataset, reports, timestamps)
//! lives in the returned `RefreshOutcome` and is discarded with it;
//! nothing but the observability counters outlives a refresh, and
//! concurrent refreshes share no mutable state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use catalog::dataset::Dataset;
use catalog::errors::InsightsError;
use catalog::ids::RefreshId;

use crate::aggregates::{InsightsEngine, InsightsReport};
use crate::client::RowSource;
use crate::config::InsightsConfig;
use crate::loader::{self, LoadReport};
use crate::metrics::PipelineMetrics;

/// Everything one refresh produced.
///
/// Handed to the presentation surface whole: the report for charts, the
/// dataset for preview and search, the load report for data-quality
/// badges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshOutcome {
    pub refresh_id: RefreshId,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub dataset: Dataset,
    pub load: LoadReport,
    pub report: InsightsReport,
}

/// The insights pipeline: loader and engine under one configuration.
pub struct Pipeline {
    config: InsightsConfig,
    engine: InsightsEngine,
    metrics: PipelineMetrics,
}

impl Pipeline {
    /// Create a pipeline, rejecting invalid configuration up front.
    pub fn new(config: InsightsConfig) -> Result<Self, InsightsError> {
        config.validate()?;
        Ok(Self {
            engine: InsightsEngine::new(config.clone()),
            config,
            metrics: PipelineMetrics::new(),
        })
    }

    /// Pipeline with the stock dashboard configuration.
    pub fn with_defaults() -> Self {
        let config = InsightsConfig::default();
        Self {
            engine: InsightsEngine::new(config.clone()),
            config,
            metrics: PipelineMetrics::new(),
        }
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Run one end-to-end refresh cycle against the given row source.
    pub fn refresh(&self, source: &dyn RowSource) -> Result<RefreshOutcome, InsightsError> {
        let refresh_id = RefreshId::new();
        let started_at = Utc::now();
        info!(%refresh_id, "Starting refresh");

        let loaded = match loader::load(source, &self.config) {
            Ok(loaded) => loaded,
            Err(error) => {
                self.metrics.record_failure();
                warn!(%refresh_id, %error, "Refresh failed: data unavailable");
                return Err(error.into());
            }
        };

        let report = self.engine.compute(&loaded.dataset, &loaded.fields);
        self.metrics.record_refresh(&loaded.report);
        let completed_at = Utc::now();

        info!(
            %refresh_id,
            records = loaded.dataset.len(),
            rows_dropped = loaded.report.rows_dropped,
            aggregate_failures = report.failures.len(),
            "Refresh complete"
        );

        Ok(RefreshOutcome {
            refresh_id,
            started_at,
            completed_at,
            dataset: loaded.dataset,
            load: loaded.report,
            report,
        })
    }
}
