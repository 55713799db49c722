//! Observability counters for the insights pipeline
//!
//! Cross-refresh totals: refreshes completed and failed, records loaded,
//! rows dropped, coercion warnings. Counters are atomic so a pipeline
//! shared behind `&` stays sound if a deployment overlaps refreshes;
//! per-refresh numbers live in the `LoadReport`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::loader::LoadReport;

/// Core metrics for the insights pipeline.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    pub refreshes_completed: AtomicU64,
    pub refreshes_failed: AtomicU64,
    pub records_loaded_total: AtomicU64,
    pub rows_dropped_total: AtomicU64,
    pub coercion_warnings_total: AtomicU64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed refresh and its load counts.
    pub fn record_refresh(&self, report: &LoadReport) {
        self.refreshes_completed.fetch_add(1, Ordering::Relaxed);
        self.records_loaded_total
            .fetch_add(report.records_loaded as u64, Ordering::Relaxed);
        self.rows_dropped_total
            .fetch_add(report.rows_dropped as u64, Ordering::Relaxed);
        self.coercion_warnings_total
            .fetch_add(report.coercion_warnings as u64, Ordering::Relaxed);
    }

    /// Record a refresh that failed before producing a report.
    pub fn record_failure(&self) {
        self.refreshes_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            refreshes_completed: self.refreshes_completed.load(Ordering::Relaxed),
            refreshes_failed: self.refreshes_failed.load(Ordering::Relaxed),
            records_loaded_total: self.records_loaded_total.load(Ordering::Relaxed),
            rows_dropped_total: self.rows_dropped_total.load(Ordering::Relaxed),
            coercion_warnings_total: self.coercion_warnings_total.load(Ordering::Relaxed),
        }
    }
}

/// Serializable copy of the pipeline counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub refreshes_completed: u64,
    pub refreshes_failed: u64,
    pub records_loaded_total: u64,
    pub rows_dropped_total: u64,
    pub coercion_warnings_total: u64,
}
