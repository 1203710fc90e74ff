// src/config/catalog.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{CategoryEntry, SourceCatalog};

pub const ENV_CATALOG_PATH: &str = "SCOUT_CATALOG_PATH";

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<CategoryEntry>,
}

/// Load a catalog from an explicit path. Supports TOML or JSON formats.
pub fn load_catalog_from(path: &Path) -> Result<SourceCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading catalog from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_catalog(&content, ext.as_str())
        .with_context(|| format!("parsing catalog {}", path.display()))
}

/// Resolve the catalog:
/// 1) explicit path (CLI)
/// 2) $SCOUT_CATALOG_PATH
/// 3) config/catalog.toml
/// 4) config/catalog.json
/// 5) built-in seed
pub fn load_catalog_default(explicit: Option<&Path>) -> Result<SourceCatalog> {
    if let Some(p) = explicit {
        return load_catalog_from(p);
    }
    if let Ok(p) = std::env::var(ENV_CATALOG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_catalog_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CATALOG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/catalog.toml");
    if toml_p.exists() {
        return load_catalog_from(&toml_p);
    }
    let json_p = PathBuf::from("config/catalog.json");
    if json_p.exists() {
        return load_catalog_from(&json_p);
    }
    Ok(SourceCatalog::default_seed())
}

fn parse_catalog(s: &str, hint_ext: &str) -> Result<SourceCatalog> {
    let file: CatalogFile = if hint_ext == "json" || s.trim_start().starts_with('{') {
        serde_json::from_str(s)?
    } else {
        toml::from_str(s)?
    };
    Ok(SourceCatalog::from_entries(file.categories)?)
}
