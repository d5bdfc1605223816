use crate::models::Trip;
use serde::{Deserialize, Serialize};

/// Highest score that still counts as a match
pub const DEFAULT_MAX_SCORE: u8 = 2;

/// How well two (source, destination) pairs overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    /// Both source and destination overlap
    Perfect,
    /// Exactly one of source or destination overlaps
    Partial,
    NoMatch,
}

impl MatchQuality {
    pub fn score(self) -> u8 {
        match self {
            MatchQuality::Perfect => 0,
            MatchQuality::Partial => 1,
            MatchQuality::NoMatch => 5,
        }
    }
}

/// Case-insensitive containment in either direction
///
/// An empty string is contained in everything, so empty fields always overlap.
#[inline]
fn places_overlap(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Classify the overlap between two trips' place names
pub fn evaluate(source_a: &str, dest_a: &str, source_b: &str, dest_b: &str) -> MatchQuality {
    let source_match = places_overlap(source_a, source_b);
    let dest_match = places_overlap(dest_a, dest_b);

    match (source_match, dest_match) {
        (true, true) => MatchQuality::Perfect,
        (true, false) | (false, true) => MatchQuality::Partial,
        (false, false) => MatchQuality::NoMatch,
    }
}

/// Match score: 0 perfect, 1 partial, 5 no overlap
#[inline]
pub fn score(source_a: &str, dest_a: &str, source_b: &str, dest_b: &str) -> u8 {
    evaluate(source_a, dest_a, source_b, dest_b).score()
}

/// Result of filtering a candidate pool
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<Trip>,
    pub total_candidates: usize,
}

/// Applies the score threshold to candidate trips
#[derive(Debug, Clone, Copy)]
pub struct MatchEvaluator {
    max_score: u8,
}

impl MatchEvaluator {
    pub fn new(max_score: u8) -> Self {
        Self { max_score }
    }

    pub fn max_score(&self) -> u8 {
        self.max_score
    }

    pub fn score(&self, source_a: &str, dest_a: &str, source_b: &str, dest_b: &str) -> u8 {
        score(source_a, dest_a, source_b, dest_b)
    }

    /// Whether two pairs are close enough to be offered to each other
    pub fn is_match(&self, source_a: &str, dest_a: &str, source_b: &str, dest_b: &str) -> bool {
        self.score(source_a, dest_a, source_b, dest_b) <= self.max_score
    }

    /// Keep the candidates whose route overlaps the queried one
    ///
    /// The query pair is passed first. Candidate order is preserved.
    pub fn find_matches(&self, source: &str, destination: &str, candidates: &[Trip]) -> MatchResult {
        let matches = candidates
            .iter()
            .filter(|trip| self.is_match(source, destination, &trip.source, &trip.destination))
            .cloned()
            .collect();

        MatchResult {
            matches,
            total_candidates: candidates.len(),
        }
    }
}

impl Default for MatchEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCORE)
    }
}
