//! Reconcile what the generator placed against what was requested.

use std::collections::{HashMap, HashSet};

use crate::placement::PlacedWord;

/// Candidate words with no placement, in candidate order.
#[must_use]
pub fn dropped_words(candidates: &[String], placed: &[PlacedWord]) -> Vec<String> {
    let placed_set: HashSet<&str> = placed.iter().map(|p| p.word.as_str()).collect();
    candidates
        .iter()
        .filter(|c| !placed_set.contains(c.as_str()))
        .cloned()
        .collect()
}

/// Words the generator placed more than once, in first-placement order.
///
/// The generator is trusted not to do this; the pipeline only logs it.
#[must_use]
pub fn duplicate_placements(placed: &[PlacedWord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for p in placed {
        let count = counts.entry(p.word.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(p.word.clone());
        }
    }
    order
}

/// Placed words that were never requested.
#[must_use]
pub fn unknown_placements(candidates: &[String], placed: &[PlacedWord]) -> Vec<String> {
    let requested: HashSet<&str> = candidates.iter().map(String::as_str).collect();
    placed
        .iter()
        .filter(|p| !requested.contains(p.word.as_str()))
        .map(|p| p.word.clone())
        .collect()
}
