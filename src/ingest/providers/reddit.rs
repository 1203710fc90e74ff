// src/ingest/providers/reddit.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ScoutSettings;
use crate::ingest::types::{FeedFetcher, FetchError, RawContentItem, SortMode};

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: RawContentItem,
}

/// Parse a subreddit listing body into raw posts.
///
/// The body must carry a `data.children` array; error pages and other
/// objects served with a 200 are rejected rather than read as empty.
pub fn parse_listing(body: &str) -> Result<Vec<RawContentItem>, serde_json::Error> {
    let listing: Listing = serde_json::from_str(body)?;
    Ok(listing.data.children.into_iter().map(|c| c.data).collect())
}

/// Anonymous reader for `/r/<sub>/<sort>.json` listings.
pub struct RedditFetcher {
    base_url: String,
    client: Client,
}

impl RedditFetcher {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("building reddit http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_settings(settings: &ScoutSettings) -> Result<Self> {
        Self::new(&settings.base_url, &settings.user_agent, settings.timeout)
    }

    pub fn listing_url(&self, source_id: &str, sort: SortMode, limit: usize) -> String {
        format!(
            "{}/r/{}/{}.json?limit={}",
            self.base_url,
            source_id,
            sort.as_str(),
            limit
        )
    }
}

fn http_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: e,
        }
    }
}

#[async_trait]
impl FeedFetcher for RedditFetcher {
    async fn fetch(
        &self,
        source_id: &str,
        sort: SortMode,
        limit: usize,
    ) -> Result<Vec<RawContentItem>, FetchError> {
        let url = self.listing_url(source_id, sort, limit);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| http_error(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| http_error(&url, e))?;
        let items = parse_listing(&body).map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })?;

        tracing::debug!(
            source = source_id,
            sort = sort.as_str(),
            items = items.len(),
            "listing fetched"
        );
        Ok(items)
    }

    fn name(&self) -> &'static str {
        "reddit"
    }
}
