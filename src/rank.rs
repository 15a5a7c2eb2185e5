//! Threshold filtering and score ranking over alignment collections.
//!
//! Every function here derives a new view; the input collection is never
//! modified.

use crate::models::{Alignment, AlignmentCollection};

/// Keep alignments with at least `minimum_secondary_matches` matches.
pub fn filter_by_secondary_matches(
    collection: &AlignmentCollection,
    minimum_secondary_matches: usize,
) -> AlignmentCollection {
    let kept = collection
        .iter()
        .filter(|a| a.match_count() >= minimum_secondary_matches)
        .cloned()
        .collect();
    AlignmentCollection::new(kept)
}

/// Highest match score in the collection, 0 when empty.
pub fn find_best_score(collection: &AlignmentCollection) -> f64 {
    collection
        .iter()
        .map(Alignment::best_score)
        .fold(0.0, f64::max)
}

/// Minimum score a match needs to be displayed.
pub fn display_cutoff(collection: &AlignmentCollection, print_best_only: bool) -> f64 {
    if print_best_only {
        find_best_score(collection)
    } else {
        0.0
    }
}

/// Alignments with at least one match at or above `cutoff`.
pub fn visible_alignments(
    collection: &AlignmentCollection,
    cutoff: f64,
) -> impl Iterator<Item = &Alignment> + '_ {
    collection
        .iter()
        .filter(move |a| a.has_matches_at_least(cutoff))
}

/// (primary windows shown, secondary matches shown) at `cutoff`.
pub fn left_right_counts(collection: &AlignmentCollection, cutoff: f64) -> (usize, usize) {
    visible_alignments(collection, cutoff).fold((0, 0), |(left, right), a| {
        (left + 1, right + a.count_at_least(cutoff))
    })
}

/// Alignments ordered by best score, highest first; ties keep document order.
pub fn rank_by_best_score<'a>(
    alignments: impl IntoIterator<Item = &'a Alignment>,
) -> Vec<&'a Alignment> {
    let mut ranked: Vec<&Alignment> = alignments.into_iter().collect();
    ranked.sort_by(|a, b| b.best_score().total_cmp(&a.best_score()));
    ranked
}
