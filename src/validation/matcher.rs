//! Fuzzy species-name matching.

use crate::common::error::MatchError;

/// Similarity between two strings on a 0..=100 scale.
pub trait SimilarityScorer {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Token-order-insensitive similarity.
///
/// Both strings are lowercased, split on whitespace, sorted and rejoined,
/// then compared with normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio;

fn sorted_tokens(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut tokens: Vec<&str> = lowered.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

impl SimilarityScorer for TokenSortRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a = sorted_tokens(a);
        let b = sorted_tokens(b);
        strsim::normalized_levenshtein(&a, &b) * 100.0
    }
}

/// Highest-scoring candidate for `raw`. Ties go to the earliest candidate.
pub fn best_match<'a, S, I>(scorer: &S, raw: &str, candidates: I) -> Result<&'a str, MatchError>
where
    S: SimilarityScorer + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = scorer.score(raw, candidate);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(name, _)| name).ok_or(MatchError::NotFound)
}
