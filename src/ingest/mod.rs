// src/ingest/mod.rs
pub mod pacer;
pub mod providers;
pub mod types;

use crate::ingest::types::{FeedFetcher, RawContentItem, SortMode};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

pub use pacer::Pacer;
pub use types::FetchError;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("scout_fetch_total", "Listing fetches attempted.");
        describe_counter!(
            "scout_fetch_errors_total",
            "Listing fetches that failed and contributed no items."
        );
        describe_counter!(
            "scout_items_scored_total",
            "Posts scored across all sources."
        );
        describe_histogram!("scout_fetch_ms", "Listing fetch time in milliseconds.");
    });
}

/// Fetch one source, swallowing any failure.
///
/// A failed source is logged and yields no items; the caller never sees
/// the error, so one dead feed cannot abort a run.
pub async fn fetch_or_empty(
    fetcher: &dyn FeedFetcher,
    source_id: &str,
    sort: SortMode,
    limit: usize,
) -> Vec<RawContentItem> {
    ensure_metrics_described();
    counter!("scout_fetch_total").increment(1);

    let t0 = std::time::Instant::now();
    let res = fetcher.fetch(source_id, sort, limit).await;
    histogram!("scout_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    match res {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(
                source = source_id,
                sort = sort.as_str(),
                provider = fetcher.name(),
                error = %e,
                "failed to fetch source; skipping"
            );
            counter!("scout_fetch_errors_total").increment(1);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::providers::fixture::FixtureFetcher;

    #[tokio::test]
    async fn failures_collapse_to_empty() {
        let f = FixtureFetcher::new().fail("golf", "connection reset");
        let items = fetch_or_empty(&f, "golf", SortMode::Rising, 15).await;
        assert!(items.is_empty());
        assert_eq!(f.calls(), 1);
    }

    #[tokio::test]
    async fn successes_pass_through() {
        let item = RawContentItem {
            id: "a1".into(),
            title: Some("My WITB".into()),
            ..Default::default()
        };
        let f = FixtureFetcher::new().with_items("golf", vec![item.clone()]);
        let items = fetch_or_empty(&f, "golf", SortMode::Hot, 15).await;
        assert_eq!(items, vec![item]);
    }

    #[test]
    fn sort_mode_strings() {
        assert_eq!(SortMode::default(), SortMode::Rising);
        assert_eq!(SortMode::New.to_string(), "new");
        assert_eq!(SortMode::Hot.as_str(), "hot");
    }
}
