// Utility functions
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Stable key for a product within one source and country, used downstream
/// as the persistence identifier.
pub fn product_key(source: &str, country_code: &str, source_id: &str) -> String {
    let mut hasher = DefaultHasher::new();
    format!("{source}_{country_code}_{source_id}").hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        assert_eq!(
            product_key("apo", "de", "123"),
            product_key("apo", "de", "123")
        );
    }

    #[test]
    fn key_varies_with_every_component() {
        let base = product_key("apo", "de", "123");
        assert_ne!(base, product_key("apo", "de", "124"));
        assert_ne!(base, product_key("apo", "at", "123"));
        assert_ne!(base, product_key("shop", "de", "123"));
    }
}
