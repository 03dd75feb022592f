//! Reconciles free-text region names from the event inventory with the
//! canonical names used by the geometry sources.
//!
//! Resolution is best effort: every query resolves to *some* candidate, even
//! a poor one. Spellings in the inventory drift from the geometry sources
//! (diacritics, abbreviations, renamed states), and showing the closest
//! region is preferred over showing nothing. Callers that need a stricter
//! answer use [`GeoNameResolver::resolve_above`].

use crate::fuzz::{full_process, weighted_ratio_processed};
use fdv_core::{FloodError, Result};
use serde::Serialize;

/// A resolved candidate and its similarity score (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NameMatch<'a> {
    pub name: &'a str,
    pub score: u8,
}

/// Fuzzy matcher over a fixed, ordered, non-empty set of candidate names.
///
/// Candidates are normalized once at construction.
#[derive(Debug, Clone)]
pub struct GeoNameResolver {
    candidates: Vec<String>,
    processed: Vec<String>,
}

impl GeoNameResolver {
    /// Build a resolver; fails with `InvalidArgument` when `candidates` is empty.
    pub fn new<I, S>(candidates: I) -> Result<GeoNameResolver>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        if candidates.is_empty() {
            return Err(FloodError::InvalidArgument(
                "cannot resolve names against an empty candidate set".to_string(),
            ));
        }
        let processed = candidates.iter().map(|c| full_process(c)).collect();
        Ok(GeoNameResolver {
            candidates,
            processed,
        })
    }

    /// Position and score of the best candidate for `query`.
    fn best_index(&self, query: &str) -> (usize, u8) {
        if let Some(exact) = self.candidates.iter().position(|c| c == query) {
            return (exact, 100);
        }

        let processed_query = full_process(query);
        let mut best = (0, weighted_ratio_processed(&processed_query, &self.processed[0]));
        for (index, processed) in self.processed.iter().enumerate().skip(1) {
            let score = weighted_ratio_processed(&processed_query, processed);
            if score > best.1 {
                best = (index, score);
            }
        }
        best
    }

    /// Highest-scoring candidate for `query`.
    ///
    /// An exact candidate wins outright. Otherwise ties go to the earliest
    /// candidate.
    pub fn best_match(&self, query: &str) -> NameMatch<'_> {
        let (index, score) = self.best_index(query);
        let name = self.candidates[index].as_str();
        log::debug!("Resolved '{}' to '{}' ({})", query, name, score);
        NameMatch { name, score }
    }

    /// Name of the highest-scoring candidate. Never fails.
    pub fn resolve(&self, query: &str) -> &str {
        self.best_match(query).name
    }

    /// Best match only if it scores at least `threshold`.
    pub fn resolve_above(&self, query: &str, threshold: u8) -> Option<NameMatch<'_>> {
        let best = self.best_match(query);
        if best.score >= threshold {
            Some(best)
        } else {
            log::debug!(
                "'{}' best matched '{}' at {}, below threshold {}",
                query,
                best.name,
                best.score,
                threshold
            );
            None
        }
    }
}

/// One-off resolution against a borrowed candidate list.
///
/// Fails with `InvalidArgument` when `candidates` is empty.
pub fn resolve<'a>(query: &str, candidates: &[&'a str]) -> Result<&'a str> {
    let resolver = GeoNameResolver::new(candidates.iter().copied())?;
    let (index, _) = resolver.best_index(query);
    Ok(candidates[index])
}
