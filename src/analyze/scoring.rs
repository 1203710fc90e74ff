//! Opportunity scoring for one listing item.
//!
//! opportunity = engagement + freshness + 10 * keyword hits + flair + media + early
//!
//! - engagement : score + 3 * comments
//! - freshness  : step schedule on age (<1h 50, <3h 30, <6h 15, <12h 5, else 0)
//! - flair      : +20 when the flair contains a curated fragment
//! - media      : +15 for image or gallery posts
//! - early      : +25 (score > 10, comments < 10) or +15 (score > 50, comments < 20)
//!
//! The evaluation instant is an argument, so the function is pure.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::keywords::{any_hit, count_hits, CURATION_KEYWORDS, GOOD_FLAIRS};
use crate::catalog::SourceDescriptor;
use crate::ingest::types::RawContentItem;

/// Host joined with a post's permalink to form its absolute URL.
pub const PERMALINK_HOST: &str = "https://reddit.com";

/// Age assumed for items without a creation timestamp.
pub const UNKNOWN_AGE_HOURS: f64 = 999.0;

pub const KEYWORD_HIT_BONUS: f64 = 10.0;
pub const FLAIR_BONUS: f64 = 20.0;
pub const MEDIA_BONUS: f64 = 15.0;

/// Each bonus actually added to the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreSignals {
    pub engagement: f64,
    pub freshness: f64,
    pub keyword: f64,
    pub flair: f64,
    pub media: f64,
    pub early: f64,
}

impl ScoreSignals {
    pub fn total(&self) -> f64 {
        self.engagement + self.freshness + self.keyword + self.flair + self.media + self.early
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredItem {
    pub post_id: String,
    pub title: String,
    pub url: String,
    pub source_id: String,
    pub source_label: String,
    pub category_label: String,
    pub flair_text: String,
    pub popularity_score: i64,
    pub comment_count: i64,
    /// Rounded to one decimal; thresholds use the unrounded age.
    pub age_hours: f64,
    pub is_image: bool,
    pub keyword_hit_count: u32,
    pub opportunity_score: f64,
    pub created_at_epoch: f64,
    pub thumbnail_url: Option<String>,
    pub signals: ScoreSignals,
}

impl ScoredItem {
    /// Attach the source the item was fetched from.
    pub fn with_source(self, source: &SourceDescriptor, category_label: &str) -> Self {
        Self {
            source_id: source.source_id.clone(),
            source_label: source.display_label.clone(),
            category_label: category_label.to_string(),
            ..self
        }
    }
}

pub fn freshness_bonus(age_hours: f64) -> f64 {
    if age_hours < 1.0 {
        50.0
    } else if age_hours < 3.0 {
        30.0
    } else if age_hours < 6.0 {
        15.0
    } else if age_hours < 12.0 {
        5.0
    } else {
        0.0
    }
}

/// Gaining traction with a still-quiet comment section. First band wins.
pub fn early_bonus(score: i64, comments: i64) -> f64 {
    if score > 10 && comments < 10 {
        25.0
    } else if score > 50 && comments < 20 {
        15.0
    } else {
        0.0
    }
}

/// Hours between creation and `now`; `UNKNOWN_AGE_HOURS` without a timestamp.
pub fn age_hours(created_utc: Option<f64>, now: DateTime<Utc>) -> f64 {
    match created_utc {
        Some(created) if created != 0.0 => {
            let now_secs = now.timestamp_millis() as f64 / 1_000.0;
            (now_secs - created) / 3_600.0
        }
        _ => UNKNOWN_AGE_HOURS,
    }
}

fn thumbnail_url(item: &RawContentItem) -> Option<String> {
    let preview = item
        .preview
        .as_ref()
        .and_then(|p| p.images.first())
        .and_then(|img| img.source.as_ref())
        .and_then(|s| s.url.as_deref())
        .filter(|u| !u.is_empty());
    if let Some(url) = preview {
        return Some(html_escape::decode_html_entities(url).into_owned());
    }
    item.thumbnail
        .as_deref()
        .filter(|t| t.starts_with("http"))
        .map(str::to_string)
}

/// Score one raw item at the given evaluation instant. Never fails.
pub fn score(item: &RawContentItem, now: DateTime<Utc>) -> ScoredItem {
    let title = item.title.as_deref().unwrap_or_default();
    let body = item.selftext.as_deref().unwrap_or_default();
    let flair = item.link_flair_text.as_deref().unwrap_or_default();
    let flair_lower = flair.to_lowercase();

    let age = age_hours(item.created_utc, now);

    let text = format!("{} {} {}", title.to_lowercase(), body.to_lowercase(), flair_lower);
    let keyword_hits = count_hits(&text, CURATION_KEYWORDS);

    let is_image = item.post_hint.as_deref() == Some("image") || item.is_gallery == Some(true);

    let signals = ScoreSignals {
        engagement: item.score as f64 + 3.0 * item.num_comments as f64,
        freshness: freshness_bonus(age),
        keyword: keyword_hits as f64 * KEYWORD_HIT_BONUS,
        flair: if any_hit(&flair_lower, GOOD_FLAIRS) {
            FLAIR_BONUS
        } else {
            0.0
        },
        media: if is_image { MEDIA_BONUS } else { 0.0 },
        early: early_bonus(item.score, item.num_comments),
    };

    ScoredItem {
        post_id: item.id.clone(),
        title: html_escape::decode_html_entities(title).into_owned(),
        url: format!("{PERMALINK_HOST}{}", item.permalink),
        source_id: item.subreddit.clone(),
        source_label: String::new(),
        category_label: String::new(),
        flair_text: flair.to_string(),
        popularity_score: item.score,
        comment_count: item.num_comments,
        age_hours: (age * 10.0).round() / 10.0,
        is_image,
        keyword_hit_count: keyword_hits,
        opportunity_score: signals.total(),
        created_at_epoch: item.created_utc.unwrap_or(0.0),
        thumbnail_url: thumbnail_url(item),
        signals,
    }
}
