// Accent-insensitive title normalization
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Decomposes the title and strips combining diacritical marks. Titles
/// without any marks come back unchanged, so the function is idempotent.
pub fn strip_diacritics(title: &str) -> String {
    let mut stripped = String::with_capacity(title.len());
    let mut had_marks = false;

    for c in title.nfd() {
        if is_combining_mark(c) {
            had_marks = true;
        } else {
            stripped.push(c);
        }
    }

    if had_marks { stripped } else { title.to_string() }
}

/// Batch-scoped normalization memo. Catalog titles repeat across sources, so
/// decomposition results are cached keyed by the exact input string. The
/// cache is dropped with the batch job that owns it.
#[derive(Debug, Default)]
pub struct TitleNormalizer {
    cache: HashMap<String, String>,
}

impl TitleNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, title: &str) -> String {
        if let Some(hit) = self.cache.get(title) {
            return hit.clone();
        }
        let normalized = strip_diacritics(title);
        self.cache.insert(title.to_string(), normalized.clone());
        normalized
    }
}
