// src/report/json.rs
use anyhow::{Context, Result};

use super::Presenter;
use crate::aggregate::RankedResultSet;

/// Machine-readable dump of the ranked set.
pub struct JsonReport {
    pub pretty: bool,
}

impl Presenter for JsonReport {
    fn render(&self, set: &RankedResultSet) -> Result<String> {
        let out = if self.pretty {
            serde_json::to_string_pretty(set)
        } else {
            serde_json::to_string(set)
        };
        out.context("serializing ranked posts")
    }
}
