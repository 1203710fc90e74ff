// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod analyze;
pub mod catalog;
pub mod config;
pub mod ingest;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{run_scout, RankedResultSet, RankingAggregator, ScoutRequest};
pub use crate::analyze::{score, ScoredItem};
pub use crate::catalog::{CatalogError, SourceCatalog, SourceDescriptor};
pub use crate::ingest::types::{FeedFetcher, FetchError, RawContentItem, SortMode};
