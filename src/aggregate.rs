//! # Ranking Aggregator
//! Drives the fetcher over a set of sources, scores every returned post,
//! merges the batches and keeps the top N by opportunity score.
//!
//! Sequential runs sleep a fixed pacing delay between consecutive sources.
//! With `concurrency > 1` sources go through an order-preserving bounded
//! stream and a shared `Pacer` spaces request starts instead. Either way the
//! merged collection is in source order before the stable sort, so ties
//! resolve identically.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::analyze::scoring::{score, ScoredItem};
use crate::catalog::{CatalogError, SourceCatalog, SourceDescriptor};
use crate::ingest::types::{FeedFetcher, SortMode};
use crate::ingest::{fetch_or_empty, Pacer};

pub const DEFAULT_TOP_N: usize = 15;
pub const DEFAULT_FETCH_LIMIT: usize = 15;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResultSet {
    pub fetched_at: DateTime<Utc>,
    pub sort_mode: SortMode,
    pub sources_queried: usize,
    /// Items scored before truncation to top N.
    pub items_scored: usize,
    pub posts: Vec<ScoredItem>,
}

impl RankedResultSet {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    /// Items requested per source.
    pub fetch_limit: usize,
    pub pacing: Duration,
    pub concurrency: usize,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            pacing: Duration::from_millis(500),
            concurrency: 1,
        }
    }
}

/// Stable descending sort by opportunity score, then truncate.
pub fn rank(mut items: Vec<ScoredItem>, top_n: usize) -> Vec<ScoredItem> {
    items.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));
    items.truncate(top_n);
    items
}

pub struct RankingAggregator<'a> {
    fetcher: &'a dyn FeedFetcher,
    catalog: &'a SourceCatalog,
    settings: AggregatorSettings,
    pacer: Pacer,
}

impl<'a> RankingAggregator<'a> {
    pub fn new(
        fetcher: &'a dyn FeedFetcher,
        catalog: &'a SourceCatalog,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            fetcher,
            catalog,
            pacer: Pacer::new(settings.pacing),
            settings,
        }
    }

    pub async fn run(
        &self,
        sources: &[SourceDescriptor],
        sort: SortMode,
        top_n: usize,
    ) -> RankedResultSet {
        let batches = if self.settings.concurrency <= 1 {
            self.run_sequential(sources, sort).await
        } else {
            self.run_concurrent(sources, sort).await
        };

        let all: Vec<ScoredItem> = batches.into_iter().flatten().collect();
        let items_scored = all.len();
        metrics::counter!("scout_items_scored_total").increment(items_scored as u64);

        let posts = rank(all, top_n);
        info!(
            sources = sources.len(),
            scored = items_scored,
            kept = posts.len(),
            sort = sort.as_str(),
            "ranking complete"
        );

        RankedResultSet {
            fetched_at: Utc::now(),
            sort_mode: sort,
            sources_queried: sources.len(),
            items_scored,
            posts,
        }
    }

    async fn run_sequential(
        &self,
        sources: &[SourceDescriptor],
        sort: SortMode,
    ) -> Vec<Vec<ScoredItem>> {
        let mut batches = Vec::with_capacity(sources.len());
        for (i, src) in sources.iter().enumerate() {
            if i > 0 && !self.settings.pacing.is_zero() {
                tokio::time::sleep(self.settings.pacing).await;
            }
            batches.push(self.score_source(src, sort).await);
        }
        batches
    }

    async fn run_concurrent(
        &self,
        sources: &[SourceDescriptor],
        sort: SortMode,
    ) -> Vec<Vec<ScoredItem>> {
        stream::iter(sources.iter().map(|src| async move {
            self.pacer.wait().await;
            self.score_source(src, sort).await
        }))
        .buffered(self.settings.concurrency)
        .collect()
        .await
    }

    /// Fetch one source and score its batch against a single instant.
    async fn score_source(&self, src: &SourceDescriptor, sort: SortMode) -> Vec<ScoredItem> {
        let raw = fetch_or_empty(self.fetcher, &src.source_id, sort, self.settings.fetch_limit).await;
        let now = Utc::now();
        let category_label = self.catalog.category_label(&src.category_id);

        let scored: Vec<ScoredItem> = raw
            .iter()
            .map(|item| score(item, now).with_source(src, category_label))
            .collect();
        debug!(source = %src.display_label, items = scored.len(), "source scored");
        scored
    }
}

/// What the operator asked for.
#[derive(Debug, Clone)]
pub struct ScoutRequest {
    pub category: Option<String>,
    pub sort: SortMode,
    pub top_n: usize,
}

impl Default for ScoutRequest {
    fn default() -> Self {
        Self {
            category: None,
            sort: SortMode::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Resolve the requested category, then aggregate. An unknown category
/// fails before any fetch is issued.
pub async fn run_scout(
    catalog: &SourceCatalog,
    fetcher: &dyn FeedFetcher,
    settings: AggregatorSettings,
    request: &ScoutRequest,
) -> Result<RankedResultSet, CatalogError> {
    let sources = catalog.resolve(request.category.as_deref())?;
    info!(
        category = request.category.as_deref().unwrap_or("all"),
        sources = sources.len(),
        sort = request.sort.as_str(),
        "fetching posts"
    );
    let aggregator = RankingAggregator::new(fetcher, catalog, settings);
    Ok(aggregator.run(&sources, request.sort, request.top_n).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::ScoreSignals;

    fn item(id: &str, s: f64) -> ScoredItem {
        ScoredItem {
            post_id: id.into(),
            title: id.into(),
            url: String::new(),
            source_id: String::new(),
            source_label: String::new(),
            category_label: String::new(),
            flair_text: String::new(),
            popularity_score: 0,
            comment_count: 0,
            age_hours: 0.0,
            is_image: false,
            keyword_hit_count: 0,
            opportunity_score: s,
            created_at_epoch: 0.0,
            thumbnail_url: None,
            signals: ScoreSignals::default(),
        }
    }

    #[test]
    fn rank_is_stable_descending() {
        let items = vec![
            item("a", 10.0),
            item("b", 30.0),
            item("c", 10.0),
            item("d", 30.0),
            item("e", 5.0),
        ];
        let out = rank(items, 10);
        let ids: Vec<_> = out.iter().map(|i| i.post_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn rank_truncates() {
        let items: Vec<_> = (0..20).map(|i| item(&i.to_string(), i as f64)).collect();
        assert_eq!(rank(items.clone(), 15).len(), 15);
        assert_eq!(rank(items.clone(), 25).len(), 20);
        assert!(rank(items, 0).is_empty());
    }
}
