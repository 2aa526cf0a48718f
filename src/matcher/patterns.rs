// Position policies and the precompiled alias pattern cache
use crate::config::PolicyConfig;
use regex::Regex;
use std::collections::HashSet;

/// Where in a title an alias must appear to count as a match. Positional
/// policies exist for aliases that coincide with common words ("free",
/// "beauty", "gum") and would otherwise produce false positives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPolicy {
    Anywhere,
    FirstWordOnly,
    FirstOrSecondWord,
}

/// Policy tables resolved from configuration, lower-cased for lookup.
#[derive(Debug, Default)]
pub struct MatchPolicy {
    ignore: HashSet<String>,
    first_word_only: HashSet<String>,
    first_or_second_word: HashSet<String>,
    exact_case: HashSet<String>,
}

impl MatchPolicy {
    pub fn from_config(config: &PolicyConfig) -> Self {
        fn to_set(list: &[String]) -> HashSet<String> {
            list.iter().map(|a| a.trim().to_lowercase()).collect()
        }
        Self {
            ignore: to_set(&config.ignore),
            first_word_only: to_set(&config.first_word_only),
            first_or_second_word: to_set(&config.first_or_second_word),
            exact_case: to_set(&config.exact_case),
        }
    }

    pub fn ignore_set(&self) -> &HashSet<String> {
        &self.ignore
    }

    fn position_for(&self, alias: &str) -> PositionPolicy {
        if self.first_word_only.contains(alias) {
            PositionPolicy::FirstWordOnly
        } else if self.first_or_second_word.contains(alias) {
            PositionPolicy::FirstOrSecondWord
        } else {
            PositionPolicy::Anywhere
        }
    }
}

/// One compiled alias pattern. The positional pattern fully replaces the
/// generic whole-word check: a positional alias that fails its position
/// does not match at all.
#[derive(Debug)]
pub struct AliasPattern {
    pub alias: String,
    pub policy: PositionPolicy,
    regex: Regex,
}

impl AliasPattern {
    fn compile(alias: &str, policy: &MatchPolicy) -> Result<Self, regex::Error> {
        let position = policy.position_for(alias);

        // Case-sensitive aliases match their upper-cased spelling only;
        // everything else is case-insensitive.
        let (literal, flags) = if policy.exact_case.contains(alias) {
            (regex::escape(&alias.to_uppercase()), "")
        } else {
            (regex::escape(alias), "(?i)")
        };

        let pattern = match position {
            PositionPolicy::FirstWordOnly => {
                format!(r"{flags}^{literal}(?:\b|\s|$)")
            }
            PositionPolicy::FirstOrSecondWord => {
                format!(r"{flags}^(?:\S+\s+)?{literal}(?:\b|\s|$)")
            }
            PositionPolicy::Anywhere => {
                // Whole standalone word/phrase, or the alias bounded by
                // start/space/end (covers multi-word aliases and titles
                // that are the alias alone).
                format!(r"{flags}\b{literal}\b|{flags}(?:^|\s){literal}(?:\s|$)")
            }
        };

        Ok(Self {
            alias: alias.to_string(),
            policy: position,
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn is_match(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }
}

/// Compiled patterns for all matchable aliases, longest alias first so more
/// specific aliases are evaluated before shorter ones they embed.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: Vec<AliasPattern>,
}

impl PatternCache {
    /// Compiles one pattern per alias. Aliases on the ignore set are left
    /// out of the cache entirely.
    pub fn compile<'a>(
        aliases: impl Iterator<Item = &'a str>,
        policy: &MatchPolicy,
    ) -> Result<Self, regex::Error> {
        let mut patterns = Vec::new();
        for alias in aliases {
            if policy.ignore.contains(alias) {
                continue;
            }
            patterns.push(AliasPattern::compile(alias, policy)?);
        }
        patterns.sort_by(|a, b| b.alias.chars().count().cmp(&a.alias.chars().count()));
        Ok(Self { patterns })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
