//! Curated signal tables for opportunity scoring.
//!
//! Matching is plain lower-case substring containment. `"my .* setup"` is
//! kept as a literal string: it only matches text that spells out `.*`.

/// Phrases that mark product-curation content. Each entry is one possible hit.
pub const CURATION_KEYWORDS: &[&str] = &[
    "setup",
    "carry",
    "haul",
    "bag",
    "collection",
    "rotation",
    "dump",
    "packing",
    "bought",
    "recommendation",
    "routine",
    "kit",
    "gear",
    "essentials",
    "favorite",
    "favourites",
    "review",
    "witb",
    "what's in",
    "whats in",
    "products",
    "list",
    "peripherals",
    "gadgets",
    "edc",
    "flatlay",
    "flat lay",
    "daily",
    "travel",
    "loadout",
    "inventory",
    "my .* setup",
    "starter",
    "upgrade",
    "new to",
    "first time",
    "rate my",
    "roast my",
    "show me yours",
];

/// Flair fragments worth a flat bonus.
pub const GOOD_FLAIRS: &[&str] = &[
    "rotation",
    "bag",
    "pocket dump",
    "packing list",
    "haul",
    "fotd",
    "so i bought",
    "gear",
    "work edc",
    "battlestations",
    "seeking recommendations",
    "question",
    "advice",
];

/// Count table entries contained in `text_lower`. Entries are checked
/// independently; overlapping phrases each count.
pub fn count_hits(text_lower: &str, table: &[&str]) -> u32 {
    table.iter().filter(|kw| text_lower.contains(**kw)).count() as u32
}

pub fn any_hit(text_lower: &str, table: &[&str]) -> bool {
    table.iter().any(|kw| text_lower.contains(*kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_phrases_each_count() {
        // "bag", "edc" and "work edc" are all separate hits here.
        assert_eq!(count_hits("work edc bag", &["bag", "edc", "work edc"]), 3);
        assert_eq!(count_hits("whats in my bag", CURATION_KEYWORDS), 2);
    }

    #[test]
    fn wildcard_entry_is_literal() {
        assert_eq!(count_hits("my new desk setup", &["my .* setup"]), 0);
        assert_eq!(count_hits("literally my .* setup", &["my .* setup"]), 1);
    }

    #[test]
    fn no_word_boundaries() {
        // "kit" inside "skittles", "list" inside "playlist"
        assert!(any_hit("skittles", &["kit"]));
        assert_eq!(count_hits("playlist", CURATION_KEYWORDS), 1);
        assert!(!any_hit("", GOOD_FLAIRS));
    }
}
