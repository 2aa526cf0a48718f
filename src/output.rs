// Batch result artifact, standing in for the product-mapping persistence
use crate::model::{MatchResult, OutputError};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the artifact for one (country, source) job.
pub fn artifact_path(output_dir: &str, country_code: &str, source: &str) -> PathBuf {
    Path::new(output_dir).join(format!("brands_{country_code}_{source}.json"))
}

/// Writes the results of one job as a JSON array. I/O failures propagate to
/// the caller; nothing is swallowed here.
pub fn write_results(path: &Path, results: &[MatchResult]) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let body = serde_json::to_string_pretty(results)?;
    fs::write(path, body).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })
}
