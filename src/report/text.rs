// src/report/text.rs
use anyhow::Result;
use std::fmt::Write as _;

use super::Presenter;
use crate::aggregate::RankedResultSet;
use crate::analyze::ScoredItem;

pub const EMPTY_MESSAGE: &str = "No posts found. Try --sort hot or different --cat";

const RULE_WIDTH: usize = 80;

/// Terminal report: one block per post, then engagement tips.
pub struct TextReport;

/// `2.5h ago` under a day, whole days after that.
pub fn format_age(age_hours: f64) -> String {
    if age_hours < 24.0 {
        format!("{age_hours:.1}h ago")
    } else {
        format!("{:.0}d ago", age_hours / 24.0)
    }
}

fn media_glyph(post: &ScoredItem) -> &'static str {
    if post.is_image {
        "📷"
    } else {
        "📝"
    }
}

impl Presenter for TextReport {
    fn render(&self, set: &RankedResultSet) -> Result<String> {
        let mut out = String::new();
        if set.is_empty() {
            writeln!(out, "{EMPTY_MESSAGE}")?;
            return Ok(out);
        }

        let rule = "─".repeat(RULE_WIDTH);
        writeln!(
            out,
            "📊 Top {} of {} posts to engage with (as of {}, sort: {}):",
            set.len(),
            set.items_scored,
            set.fetched_at.format("%H:%M UTC"),
            set.sort_mode
        )?;
        writeln!(out)?;
        writeln!(out, "{rule}")?;

        for (i, post) in set.posts.iter().enumerate() {
            let flair = if post.flair_text.is_empty() {
                String::new()
            } else {
                format!(" [{}]", post.flair_text)
            };
            writeln!(out)?;
            writeln!(
                out,
                "  #{}  {}  {} · {}{}",
                i + 1,
                media_glyph(post),
                post.category_label,
                post.source_label,
                flair
            )?;
            writeln!(out, "      {}", post.title)?;
            writeln!(
                out,
                "      ⬆ {}  💬 {}  🕐 {}  ⚡ score:{}",
                post.popularity_score,
                post.comment_count,
                format_age(post.age_hours),
                post.opportunity_score
            )?;
            writeln!(out, "      {}", post.url)?;
        }

        writeln!(out)?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;
        writeln!(out, "💡 Engagement tips:")?;
        writeln!(out, "   • Posts with ⚡ score:100+ are highest priority")?;
        writeln!(out, "   • 📷 = image/gallery post (setup photos, flat lays)")?;
        writeln!(
            out,
            "   • Target posts < 3h old with < 20 comments for best visibility"
        )?;
        writeln!(
            out,
            "   • Ask about specific products: \"What monitor arm is that?\" > \"Nice setup!\""
        )?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_formatting() {
        assert_eq!(format_age(0.3), "0.3h ago");
        assert_eq!(format_age(2.0), "2.0h ago");
        assert_eq!(format_age(23.9), "23.9h ago");
        assert_eq!(format_age(24.0), "1d ago");
        assert_eq!(format_age(999.0), "42d ago");
    }
}
