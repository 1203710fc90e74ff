// src/ingest/providers/fixture.rs
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::ingest::providers::reddit::parse_listing;
use crate::ingest::types::{FeedFetcher, FetchError, RawContentItem, SortMode};

enum Feed {
    Items(Vec<RawContentItem>),
    Fail(String),
}

/// In-memory fetcher keyed by source id. Unknown sources return an empty
/// listing. Counts every call so callers can assert on network usage.
#[derive(Default)]
pub struct FixtureFetcher {
    feeds: HashMap<String, Feed>,
    calls: AtomicUsize,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(mut self, source_id: &str, items: Vec<RawContentItem>) -> Self {
        self.feeds.insert(source_id.to_string(), Feed::Items(items));
        self
    }

    /// Register a listing body; it is parsed the same way a live response is.
    pub fn with_listing_json(self, source_id: &str, body: &str) -> Result<Self, serde_json::Error> {
        let items = parse_listing(body)?;
        Ok(self.with_items(source_id, items))
    }

    pub fn fail(mut self, source_id: &str, reason: &str) -> Self {
        self.feeds
            .insert(source_id.to_string(), Feed::Fail(reason.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedFetcher for FixtureFetcher {
    async fn fetch(
        &self,
        source_id: &str,
        _sort: SortMode,
        limit: usize,
    ) -> Result<Vec<RawContentItem>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.feeds.get(source_id) {
            Some(Feed::Items(items)) => Ok(items.iter().take(limit).cloned().collect()),
            Some(Feed::Fail(reason)) => Err(FetchError::Unavailable(format!(
                "{source_id}: {reason}"
            ))),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
