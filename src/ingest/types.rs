// src/ingest/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Upstream listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Rising,
    New,
    Hot,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Rising => "rising",
            SortMode::New => "new",
            SortMode::Hot => "hot",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One post exactly as the listing returned it. Missing fields fall back to
/// neutral defaults so scoring never has to fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContentItem {
    #[serde(deserialize_with = "string_or_default")]
    pub id: String,
    pub title: Option<String>,
    pub selftext: Option<String>,
    pub link_flair_text: Option<String>,
    #[serde(deserialize_with = "number_or_zero")]
    pub score: i64,
    #[serde(deserialize_with = "number_or_zero")]
    pub num_comments: i64,
    pub created_utc: Option<f64>,
    #[serde(deserialize_with = "string_or_default")]
    pub permalink: String,
    #[serde(deserialize_with = "string_or_default")]
    pub subreddit: String,
    pub post_hint: Option<String>,
    pub is_gallery: Option<bool>,
    pub thumbnail: Option<String>,
    pub preview: Option<Preview>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preview {
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewImage {
    pub source: Option<PreviewSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSource {
    pub url: Option<String>,
}

// Listing payloads occasionally carry null or float counters.
fn number_or_zero<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match v {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

fn string_or_default<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// `SourceFetchFailure`: anything that went wrong contacting one source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed listing from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(
        &self,
        source_id: &str,
        sort: SortMode,
        limit: usize,
    ) -> Result<Vec<RawContentItem>, FetchError>;

    fn name(&self) -> &'static str;
}
