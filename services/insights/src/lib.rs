//! Bookstore Insights Service
//!
//! Transforms the raw book catalog into the fixed set of aggregates the
//! dashboard charts:
//! - Per-category and per-author counts
//! - Price statistics (min/max/mean/median with exclusion counts)
//! - Top-N rankings over price, rating, and copies sold
//! - Rating distribution histogram
//! - Publication-year trend
//! - Headline summary metrics, catalog search, deterministic sampling
//!
//! # Architecture
//!
//! ```text
//! RowSource (external store)
//!        │ fetch_all()
//!    ┌───▼────┐
//!    │ Loader │  ← Coerces rows, drops titleless rows, counts drops
//!    └───┬────┘
//!        │ Dataset + FieldPresence + LoadReport
//!    ┌───▼────────────┐
//!    │ InsightsEngine │  ← Independent named aggregates
//!    └───┬────────────┘
//!        │ InsightsReport
//!    ┌───▼────────────┐
//!    │ RefreshOutcome │  → presentation surface
//!    └────────────────┘
//! ```

pub mod aggregates;
pub mod client;
pub mod config;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod search;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
