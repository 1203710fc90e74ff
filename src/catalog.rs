//! # Source Catalog
//!
//! Static mapping from category identifiers (e.g. "golf", "tech") to the
//! subreddit feeds scanned for that category.
//!
//! - Built once at startup from `default_seed()` or a catalog file.
//! - Category lookup is an exact match on the configured identifier.
//! - `resolve(None)` flattens all categories, keeping configured order.
//!
//! No I/O here; loading from disk lives in `config::catalog`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One feed the scout reads from. Immutable after catalog construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Upstream identifier (subreddit name, without the `r/` prefix).
    pub source_id: String,
    /// Human label, e.g. `r/golf`.
    pub display_label: String,
    /// Identifier of the owning category.
    pub category_id: String,
}

/// A named group of sources selected together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub sources: Vec<SourceDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown category `{requested}` (known: {known})")]
    UnknownCategory { requested: String, known: String },

    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Serialized shape of one category inside a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SourceCatalog {
    categories: Vec<Category>,
}

impl SourceCatalog {
    /// Build a catalog from file entries, validating ids and emptiness.
    pub fn from_entries(entries: Vec<CategoryEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Invalid("no categories configured".into()));
        }

        let mut categories: Vec<Category> = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = entry.id.trim().to_string();
            if id.is_empty() {
                return Err(CatalogError::Invalid("category with empty id".into()));
            }
            if categories.iter().any(|c| c.id == id) {
                return Err(CatalogError::Invalid(format!("duplicate category `{id}`")));
            }

            let mut sources = Vec::with_capacity(entry.sources.len());
            for s in entry.sources {
                let source_id = s.id.trim().to_string();
                if source_id.is_empty() {
                    return Err(CatalogError::Invalid(format!(
                        "category `{id}` has a source with empty id"
                    )));
                }
                let display_label = s
                    .label
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| format!("r/{source_id}"));
                sources.push(SourceDescriptor {
                    source_id,
                    display_label,
                    category_id: id.clone(),
                });
            }
            if sources.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "category `{id}` has no sources"
                )));
            }

            let label = entry
                .label
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| id.clone());
            categories.push(Category { id, label, sources });
        }

        Ok(Self { categories })
    }

    /// Sources for one category, or all categories flattened in configured order.
    pub fn resolve(&self, category_id: Option<&str>) -> Result<Vec<SourceDescriptor>, CatalogError> {
        match category_id {
            Some(id) => self
                .find(id)
                .map(|c| c.sources.clone())
                .ok_or_else(|| CatalogError::UnknownCategory {
                    requested: id.to_string(),
                    known: self.categories().join(", "),
                }),
            None => Ok(self
                .categories
                .iter()
                .flat_map(|c| c.sources.iter().cloned())
                .collect()),
        }
    }

    /// Category identifiers in configured order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }

    /// Display label for a category id; falls back to the id itself.
    pub fn category_label<'a>(&'a self, category_id: &'a str) -> &'a str {
        self.find(category_id)
            .map(|c| c.label.as_str())
            .unwrap_or(category_id)
    }

    fn find(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Built-in catalog used when no catalog file is configured.
    pub fn default_seed() -> Self {
        let seed: [(&str, &str, &[&str]); 10] = [
            (
                "tech",
                "Tech / Desk",
                &[
                    "battlestations",
                    "desksetup",
                    "MechanicalKeyboards",
                    "audiophile",
                    "macsetups",
                    "workspaces",
                ],
            ),
            (
                "beauty",
                "Beauty",
                &[
                    "Sephora",
                    "MakeupAddiction",
                    "SkincareAddiction",
                    "30PlusSkinCare",
                    "curlyhair",
                ],
            ),
            (
                "edc",
                "EDC / Bags",
                &["EDC", "handbags", "BuyItForLife", "whatsinthebag"],
            ),
            ("golf", "Golf", &["golf", "golfequipment"]),
            ("travel", "Travel", &["onebag", "HerOneBag", "travel"]),
            (
                "fashion",
                "Fashion",
                &[
                    "malefashionadvice",
                    "femalefashionadvice",
                    "frugalmalefashion",
                ],
            ),
            ("fitness", "Fitness", &["homegym", "GarminWatches"]),
            ("gaming", "Gaming", &["gamingsetups", "pcmasterrace"]),
            ("photography", "Photography", &["photography", "videography"]),
            ("espresso", "Espresso / Coffee", &["espresso", "Coffee"]),
        ];

        let categories = seed
            .iter()
            .map(|(id, label, subs)| Category {
                id: id.to_string(),
                label: label.to_string(),
                sources: subs
                    .iter()
                    .map(|sub| SourceDescriptor {
                        source_id: sub.to_string(),
                        display_label: format!("r/{sub}"),
                        category_id: id.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }
}
