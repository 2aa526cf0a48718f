// Per-title brand detection and ambiguity resolution
use crate::graph::{AliasGraph, CanonicalLookup};
use crate::matcher::patterns::{MatchPolicy, PatternCache};
use crate::model::{BrandRelation, MatchResult};
use crate::normalizer::TitleNormalizer;

/// The assembled matching engine: alias graph, canonical lookup and the
/// compiled pattern cache. Built once per batch and shared read-only by
/// every product evaluation.
#[derive(Debug)]
pub struct BrandMatcher {
    graph: AliasGraph,
    lookup: CanonicalLookup,
    cache: PatternCache,
}

impl BrandMatcher {
    /// Builds the full engine from raw relationship rows and policy tables.
    pub fn from_relations(
        relations: &[BrandRelation],
        policy: &MatchPolicy,
    ) -> Result<Self, regex::Error> {
        let graph = AliasGraph::build(relations);
        let lookup = CanonicalLookup::build(&graph, policy.ignore_set());
        let cache = PatternCache::compile(graph.aliases(), policy)?;
        Ok(Self { graph, lookup, cache })
    }

    pub fn known_aliases(&self) -> usize {
        self.cache.len()
    }

    /// Detects brand aliases in one title and resolves them to a single
    /// canonical brand. A title matching nothing is a normal outcome, not
    /// an error.
    pub fn match_title(
        &self,
        title: &str,
        product_key: String,
        normalizer: &mut TitleNormalizer,
    ) -> MatchResult {
        let normalized = normalizer.normalize(title);

        let mut matched: Vec<String> = Vec::new();
        for pattern in self.cache.iter() {
            if pattern.is_match(&normalized) && !matched.iter().any(|m| m == &pattern.alias) {
                matched.push(pattern.alias.clone());
            }
        }

        if matched.is_empty() {
            return MatchResult::unmatched(title, product_key);
        }

        let priority = self.priority_alias(&matched, &normalized);
        let assigned = self.lookup.canonical(&priority).to_string();

        MatchResult {
            title: title.to_string(),
            matched_aliases: matched,
            priority_alias: Some(priority),
            assigned_brand: Some(assigned),
            product_key,
        }
    }

    /// The most likely intended brand among several matches: candidates are
    /// the matched aliases plus their direct neighbors, and the one whose
    /// first occurrence in the title is leftmost wins. Ties go to the
    /// earliest-scanned candidate. A candidate set with no literal
    /// occurrence (a neighbor need not appear in the title) falls back to
    /// the first matched alias.
    fn priority_alias(&self, matched: &[String], normalized: &str) -> String {
        let mut candidates: Vec<&str> = Vec::new();
        for alias in matched {
            if !candidates.contains(&alias.as_str()) {
                candidates.push(alias);
            }
            for neighbor in self.graph.neighbors(alias) {
                if !candidates.contains(&neighbor.as_str()) {
                    candidates.push(neighbor);
                }
            }
        }

        let haystack = normalized.to_lowercase();
        candidates
            .iter()
            .filter_map(|c| haystack.find(*c).map(|idx| (idx, *c)))
            .min_by_key(|(idx, _)| *idx)
            .map(|(_, c)| c.to_string())
            .unwrap_or_else(|| matched[0].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;

    fn relation(primary: &str, related: &str) -> BrandRelation {
        BrandRelation {
            primary_alias: primary.to_string(),
            related_aliases: related.to_string(),
        }
    }

    fn matcher(relations: &[BrandRelation], config: PolicyConfig) -> BrandMatcher {
        let policy = MatchPolicy::from_config(&config);
        BrandMatcher::from_relations(relations, &policy).unwrap()
    }

    fn match_title(matcher: &BrandMatcher, title: &str) -> MatchResult {
        let mut normalizer = TitleNormalizer::new();
        matcher.match_title(title, "key".into(), &mut normalizer)
    }

    #[test]
    fn title_without_known_aliases_yields_null_brand() {
        let m = matcher(
            &[relation("heel", ""), relation("gum", ""), relation("rff", "")],
            PolicyConfig::default(),
        );
        let result = match_title(&m, "Generic Vitamin C Tablets");

        assert!(result.matched_aliases.is_empty());
        assert_eq!(result.priority_alias, None);
        assert_eq!(result.assigned_brand, None);
    }

    #[test]
    fn single_match_resolves_to_its_canonical() {
        let m = matcher(
            &[
                relation("heel", "heel cosmetics"),
                relation("heel cosmetics", "heel"),
            ],
            PolicyConfig::default(),
        );
        let result = match_title(&m, "Heel Cosmetics Cream 50ml");

        assert_eq!(result.matched_aliases, ["heel cosmetics", "heel"]);
        assert_eq!(result.priority_alias.as_deref(), Some("heel cosmetics"));
        assert_eq!(result.assigned_brand.as_deref(), Some("heel"));
    }

    #[test]
    fn leftmost_occurrence_wins_ambiguity() {
        let m = matcher(
            &[relation("heel", "contour"), relation("contour", "heel")],
            PolicyConfig::default(),
        );
        let result = match_title(&m, "Heel Contour Cream 50ml");

        assert_eq!(result.priority_alias.as_deref(), Some("heel"));
        assert_eq!(result.assigned_brand.as_deref(), Some("heel"));
    }

    #[test]
    fn earlier_occurrence_of_longer_alias_takes_priority() {
        let m = matcher(
            &[relation("balance", "bal pharma")],
            PolicyConfig::default(),
        );
        let result = match_title(&m, "Bal Pharma Balance Drops");

        assert_eq!(result.matched_aliases, ["bal pharma", "balance"]);
        assert_eq!(result.priority_alias.as_deref(), Some("bal pharma"));
    }

    #[test]
    fn unmatched_neighbor_found_in_title_can_take_priority() {
        // "heel" fails the whole-word test inside "Heelina" but is still a
        // candidate via the graph, and its substring index is leftmost.
        let m = matcher(
            &[relation("contour", "heel"), relation("heel", "contour")],
            PolicyConfig::default(),
        );
        let result = match_title(&m, "Heelina Contour Cream");

        assert_eq!(result.matched_aliases, ["contour"]);
        assert_eq!(result.priority_alias.as_deref(), Some("heel"));
        assert_eq!(result.assigned_brand.as_deref(), Some("heel"));
    }

    #[test]
    fn unfindable_candidates_fall_back_to_first_match() {
        // Neighbors that never occur in the title must not panic the
        // disambiguation; the first matched alias wins.
        let m = matcher(&[relation("heel", "biologische heilmittel")], PolicyConfig::default());
        let result = match_title(&m, "Heel Tabletten");

        assert_eq!(result.priority_alias.as_deref(), Some("heel"));
    }

    #[test]
    fn first_word_policy_is_enforced_end_to_end() {
        let config = PolicyConfig {
            first_word_only: vec!["gum".into()],
            ..Default::default()
        };
        let m = matcher(&[relation("gum", "sunstar gum")], config);

        let mid_title = match_title(&m, "Sensitive Gum Protection");
        assert!(mid_title.matched_aliases.is_empty());
        assert_eq!(mid_title.assigned_brand, None);

        let first_word = match_title(&m, "Gum Paste Relief");
        assert_eq!(first_word.matched_aliases, ["gum"]);
        assert_eq!(first_word.assigned_brand.as_deref(), Some("gum"));
    }

    #[test]
    fn ignored_alias_never_matches() {
        let config = PolicyConfig {
            ignore: vec!["free".into()],
            ..Default::default()
        };
        let m = matcher(&[relation("free", "freeward")], config);
        let result = match_title(&m, "Sugar Free Gum");

        assert!(result.matched_aliases.is_empty());
    }

    #[test]
    fn exact_case_alias_matches_uppercase_only() {
        let config = PolicyConfig {
            exact_case: vec!["happy".into()],
            ..Default::default()
        };
        let m = matcher(&[relation("happy", "")], config);

        assert!(match_title(&m, "happy brush soft").matched_aliases.is_empty());
        let result = match_title(&m, "HAPPY Brush Soft");
        assert_eq!(result.matched_aliases, ["happy"]);
        assert_eq!(result.assigned_brand.as_deref(), Some("happy"));
    }

    #[test]
    fn accented_titles_match_plain_aliases() {
        let m = matcher(&[relation("bepanthene", "")], PolicyConfig::default());
        let result = match_title(&m, "Bepanthène Crème 30g");

        assert_eq!(result.matched_aliases, ["bepanthene"]);
    }

    #[test]
    fn longer_alias_is_listed_before_embedded_shorter_one() {
        let m = matcher(
            &[relation("sunstar gum", "gum"), relation("gum", "sunstar gum")],
            PolicyConfig::default(),
        );
        let result = match_title(&m, "Sunstar Gum Soft Picks");

        assert_eq!(result.matched_aliases, ["sunstar gum", "gum"]);
        // "sunstar gum" starts at 0, the embedded "gum" only at 8.
        assert_eq!(result.priority_alias.as_deref(), Some("sunstar gum"));
    }
}
