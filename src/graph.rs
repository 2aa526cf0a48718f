// Alias graph construction and canonical label derivation
use crate::model::BrandRelation;
use std::collections::{HashMap, HashSet};

const RELATED_DELIMITER: char = ';';

/// Undirected graph of brand aliases. Every alias is stored lower-cased;
/// neighbor lists keep first-insert order so tie-breaks downstream are
/// deterministic, and `order` records the global first-seen order.
#[derive(Debug, Default)]
pub struct AliasGraph {
    edges: HashMap<String, Vec<String>>,
    order: Vec<String>,
    index: HashMap<String, usize>,
}

impl AliasGraph {
    /// Builds the graph from raw relationship rows. Both directions of every
    /// (primary, secondary) pair are inserted; rows with an empty related
    /// list contribute a node but no edges.
    pub fn build(relations: &[BrandRelation]) -> Self {
        let mut graph = Self::default();

        for relation in relations {
            let primary = relation.primary_alias.trim().to_lowercase();
            if primary.is_empty() {
                continue;
            }
            graph.ensure_node(&primary);

            for secondary in relation.related_aliases.split(RELATED_DELIMITER) {
                let secondary = secondary.trim().to_lowercase();
                if secondary.is_empty() {
                    continue;
                }
                graph.insert_edge(&primary, &secondary);
                graph.insert_edge(&secondary, &primary);
            }
        }

        graph
    }

    fn ensure_node(&mut self, alias: &str) {
        if !self.index.contains_key(alias) {
            self.index.insert(alias.to_string(), self.order.len());
            self.order.push(alias.to_string());
            self.edges.insert(alias.to_string(), Vec::new());
        }
    }

    fn insert_edge(&mut self, from: &str, to: &str) {
        self.ensure_node(from);
        self.ensure_node(to);
        let neighbors = self.edges.get_mut(from).unwrap();
        if !neighbors.iter().any(|n| n == to) {
            neighbors.push(to.to_string());
        }
    }

    /// Direct neighbors of an alias, in insertion order. Unknown aliases
    /// have no neighbors.
    pub fn neighbors(&self, alias: &str) -> &[String] {
        self.edges.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All known aliases in global first-seen order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Position in the global first-seen order; usize::MAX for unknowns.
    pub fn first_seen(&self, alias: &str) -> usize {
        self.index.get(alias).copied().unwrap_or(usize::MAX)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Maps every alias to the representative label of its relationship class.
#[derive(Debug, Default)]
pub struct CanonicalLookup {
    map: HashMap<String, String>,
}

impl CanonicalLookup {
    /// Derives the canonical label per alias: from the alias itself plus its
    /// direct neighbors, drop ignored aliases and take the shortest string;
    /// ties go to the alias seen earliest in the graph. If every candidate
    /// is ignored, fall back to the unfiltered pool so the mapping never
    /// fails. A neighborless alias maps to itself.
    pub fn build(graph: &AliasGraph, ignore: &HashSet<String>) -> Self {
        let mut map = HashMap::with_capacity(graph.len());

        for alias in graph.aliases() {
            let pool: Vec<&str> = std::iter::once(alias)
                .chain(graph.neighbors(alias).iter().map(String::as_str))
                .collect();

            let canonical = Self::pick(pool.iter().copied().filter(|a| !ignore.contains(*a)), graph)
                .or_else(|| Self::pick(pool.iter().copied(), graph))
                .unwrap_or(alias);

            map.insert(alias.to_string(), canonical.to_string());
        }

        Self { map }
    }

    fn pick<'a>(candidates: impl Iterator<Item = &'a str>, graph: &AliasGraph) -> Option<&'a str> {
        candidates.min_by_key(|a| (a.chars().count(), graph.first_seen(a)))
    }

    /// The canonical label for an alias. Aliases outside the graph stand for
    /// themselves.
    pub fn canonical<'a>(&'a self, alias: &'a str) -> &'a str {
        self.map.get(alias).map(String::as_str).unwrap_or(alias)
    }
}
