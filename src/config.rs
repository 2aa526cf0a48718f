use serde::Deserialize;
use std::fs;

/// One batch job: match every product of one source in one country.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub country_code: String,
    pub source: String,
    pub products_path: String,
}

/// Matching policy tables. Kept in configuration rather than as module
/// constants so tests can substitute alternate policy sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// Aliases treated as noise words: never matched, never chosen canonical.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Aliases that only count when they are the first title token.
    #[serde(default)]
    pub first_word_only: Vec<String>,
    /// Aliases that only count as the first or second title token.
    #[serde(default)]
    pub first_or_second_word: Vec<String>,
    /// Aliases matched case-sensitively against their upper-cased form
    /// because the lower-cased spelling is a common word ("happy").
    #[serde(default)]
    pub exact_case: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub relations_path: String,
    pub output_dir: String,
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub policy: PolicyConfig,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
