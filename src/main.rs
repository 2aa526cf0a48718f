mod catalog;
mod config;
mod graph;
mod matcher;
mod model;
mod normalizer;
mod output;
mod utils;

use catalog::{CatalogSource, JsonCatalog};
use config::{AppConfig, SourceConfig, load_config};
use futures::future::join_all;
use matcher::{BrandMatcher, MatchPolicy};
use normalizer::TitleNormalizer;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let catalog = JsonCatalog::new();

    info!("Loading brand relations from {}...", config.relations_path);
    let relations = match catalog.load_relations(&config.relations_path).await {
        Ok(r) => r,
        Err(e) => {
            error!("Relations load error: {}", e);
            return;
        }
    };
    info!("Loaded {} relation rows", relations.len());

    // The engine is built once per batch; every source job shares it
    // read-only.
    let policy = MatchPolicy::from_config(&config.policy);
    let engine = match BrandMatcher::from_relations(&relations, &policy) {
        Ok(m) => Arc::new(m),
        Err(e) => {
            error!("Pattern compilation error: {}", e);
            return;
        }
    };
    info!("Compiled {} alias patterns", engine.known_aliases());

    let catalog = Arc::new(catalog);
    let tasks: Vec<_> = config
        .sources
        .iter()
        .map(|source_cfg| {
            process_source(source_cfg, engine.clone(), catalog.clone(), config.clone())
        })
        .collect();
    join_all(tasks).await;

    info!("Batch finished.");
}

/// Runs one (country, source) job: load products, match each title against
/// the shared engine, write the result artifact.
async fn process_source(
    source_cfg: &SourceConfig,
    engine: Arc<BrandMatcher>,
    catalog: Arc<JsonCatalog>,
    config: Arc<AppConfig>,
) {
    let job = format!("{}/{}", source_cfg.country_code, source_cfg.source);
    info!("Processing source {}...", job);

    let products = match catalog.load_products(&source_cfg.products_path).await {
        Ok(p) => p,
        Err(e) => {
            warn!("Product load error for {}: {}", job, e);
            return;
        }
    };
    info!("Loaded {} products for {}", products.len(), job);

    // The normalization memo is the only mutable matching state, so it is
    // kept job-local.
    let mut normalizer = TitleNormalizer::new();
    let mut results = Vec::with_capacity(products.len());
    let mut matched_count = 0usize;

    for product in &products {
        let key = utils::product_key(
            &source_cfg.source,
            &source_cfg.country_code,
            &product.source_id,
        );
        let result = engine.match_title(&product.title, key, &mut normalizer);
        if result.assigned_brand.is_some() {
            matched_count += 1;
        }
        results.push(result);
    }

    info!(
        "Matched {}/{} products for {}",
        matched_count,
        results.len(),
        job
    );

    let path = output::artifact_path(&config.output_dir, &source_cfg.country_code, &source_cfg.source);
    if let Err(e) = output::write_results(&path, &results) {
        error!("Failed to write artifact for {}: {}", job, e);
        return;
    }
    info!("Wrote {}", path.display());
}
