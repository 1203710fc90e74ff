// src/analyze/mod.rs
//! Scoring pipeline entry: curated tables plus the opportunity scorer.

pub mod keywords;
pub mod scoring;

// Re-export convenient types.
pub use crate::analyze::keywords::{CURATION_KEYWORDS, GOOD_FLAIRS};
pub use crate::analyze::scoring::{score, ScoreSignals, ScoredItem};
