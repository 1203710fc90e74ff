// src/report/mod.rs
//! Operator-facing rendering of a ranked result set.

pub mod json;
pub mod text;

use anyhow::Result;

use crate::aggregate::RankedResultSet;

pub use json::JsonReport;
pub use text::TextReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub trait Presenter {
    fn render(&self, set: &RankedResultSet) -> Result<String>;
}

pub fn presenter_for(format: OutputFormat) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Text => Box::new(TextReport),
        OutputFormat::Json => Box::new(JsonReport { pretty: true }),
    }
}
