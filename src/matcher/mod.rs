// Matcher module: pattern compilation and per-title brand detection.

pub mod engine;
pub mod patterns;

pub use engine::BrandMatcher;
pub use patterns::{MatchPolicy, PatternCache, PositionPolicy};
