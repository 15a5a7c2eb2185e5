//! Inverted index and candidate window filtering.
//!
//! This module narrows the secondary windows a primary window has to be
//! scored against. The index maps each significant normalized form of the
//! secondary document to the positions where it occurs.

use std::collections::{HashMap, HashSet};

use crate::models::Document;
use crate::window::calculate_window_count;

/// Read-only index over the secondary document's significant tokens.
///
/// Positions are indices into the document's significant tokens, so a
/// window starting at significant position `s` covers `s..s + window_size`.
#[derive(Debug, Clone)]
pub struct SecondaryIndex {
    postings: HashMap<String, Vec<usize>>,
    window_size: usize,
    window_count: usize,
}

impl SecondaryIndex {
    pub fn build(document: &Document, window_size: usize) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        let tokens = document.tokens();

        for (sig_pos, &token_idx) in document.significant_positions().iter().enumerate() {
            postings
                .entry(tokens[token_idx].normalized.clone())
                .or_default()
                .push(sig_pos);
        }

        SecondaryIndex {
            postings,
            window_size,
            window_count: calculate_window_count(document.significant_count(), window_size),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn window_count(&self) -> usize {
        self.window_count
    }

    /// Number of distinct indexed forms
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    pub fn positions(&self, form: &str) -> &[usize] {
        self.postings.get(form).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every secondary window start (brute force mode)
    pub fn all_windows(&self) -> Vec<usize> {
        (0..self.window_count).collect()
    }

    /// Secondary window starts that could reach `minimum_matches` overlap
    /// with a primary window holding `primary_forms`.
    ///
    /// For each window we count the positions whose form occurs anywhere in
    /// the primary window. That count bounds the overlap from above, so no
    /// window able to match is dropped.
    pub fn candidate_windows(&self, primary_forms: &[&str], minimum_matches: usize) -> Vec<usize> {
        if self.window_count == 0 {
            return Vec::new();
        }

        let distinct: HashSet<&str> = primary_forms.iter().copied().collect();
        let mut shared_counts: HashMap<usize, usize> = HashMap::new();

        for form in distinct {
            for &pos in self.positions(form) {
                let first = (pos + 1).saturating_sub(self.window_size);
                let last = pos.min(self.window_count - 1);
                for start in first..=last {
                    *shared_counts.entry(start).or_default() += 1;
                }
            }
        }

        let mut candidates: Vec<usize> = shared_counts
            .into_iter()
            .filter(|&(_, count)| count >= minimum_matches)
            .map(|(start, _)| start)
            .collect();
        candidates.sort_unstable();
        candidates
    }
}

/// Fraction of window pairs skipped by candidate filtering
pub fn filter_rate(candidate_pairs: usize, primary_windows: usize, secondary_windows: usize) -> f64 {
    let total_pairs = primary_windows * secondary_windows;
    if total_pairs == 0 {
        return 0.0;
    }
    1.0 - candidate_pairs as f64 / total_pairs as f64
}
