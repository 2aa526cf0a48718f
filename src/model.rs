// Core structs: BrandRelation, Product, MatchResult
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the hand-curated brand relationship table.
/// `related_aliases` is a `;`-separated list of brand names.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandRelation {
    pub primary_alias: String,
    pub related_aliases: String,
}

/// A scraped catalog product. Read-only input; matching never mutates it.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub title: String,
    pub source_id: String,
}

/// Per-product outcome of the matching stage. One record per product per run,
/// serialized into the batch output artifact.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub title: String,
    pub matched_aliases: Vec<String>,
    pub priority_alias: Option<String>,
    pub assigned_brand: Option<String>,
    pub product_key: String,
}

impl MatchResult {
    /// Result for a title in which no known alias was found.
    pub fn unmatched(title: &str, product_key: String) -> Self {
        Self {
            title: title.to_string(),
            matched_aliases: Vec::new(),
            priority_alias: None,
            assigned_brand: None,
            product_key,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed record #{index} in {path}: {reason}")]
    MalformedRecord {
        path: String,
        index: usize,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
