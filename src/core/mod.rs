// Core algorithm exports
pub mod matcher;

pub use matcher::{evaluate, score, MatchEvaluator, MatchQuality, MatchResult, DEFAULT_MAX_SCORE};
