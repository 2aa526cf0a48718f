// Static dataset loading: brand relations and per-source product lists
use crate::model::{BrandRelation, CatalogError, Product};
use serde_json::Value;
use tokio::fs;

/// Seam for the pre-loaded catalog datasets. The engine only ever sees the
/// returned collections; where they come from is this trait's business.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load_relations(&self, path: &str) -> Result<Vec<BrandRelation>, CatalogError>;
    async fn load_products(&self, path: &str) -> Result<Vec<Product>, CatalogError>;
}

/// Reads datasets from JSON files on disk.
pub struct JsonCatalog;

impl JsonCatalog {
    pub fn new() -> Self {
        Self
    }

    async fn read_array(path: &str) -> Result<Vec<Value>, CatalogError> {
        let content = fs::read_to_string(path).await.map_err(|source| CatalogError::Io {
            path: path.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

impl Default for JsonCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CatalogSource for JsonCatalog {
    /// Loads the relationship table. A record without a usable primary alias
    /// is an input-shape violation and fails the whole load, naming the
    /// record, rather than being dropped silently.
    async fn load_relations(&self, path: &str) -> Result<Vec<BrandRelation>, CatalogError> {
        let rows = Self::read_array(path).await?;

        let mut relations = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let relation: BrandRelation =
                serde_json::from_value(row).map_err(|e| CatalogError::MalformedRecord {
                    path: path.to_string(),
                    index,
                    reason: e.to_string(),
                })?;
            if relation.primary_alias.trim().is_empty() {
                return Err(CatalogError::MalformedRecord {
                    path: path.to_string(),
                    index,
                    reason: "empty primary_alias".to_string(),
                });
            }
            relations.push(relation);
        }

        Ok(relations)
    }

    async fn load_products(&self, path: &str) -> Result<Vec<Product>, CatalogError> {
        let rows = Self::read_array(path).await?;

        let mut products = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let product: Product =
                serde_json::from_value(row).map_err(|e| CatalogError::MalformedRecord {
                    path: path.to_string(),
                    index,
                    reason: e.to_string(),
                })?;
            products.push(product);
        }

        Ok(products)
    }
}
