//! Fuzzy window matching.
//!
//! Two windows match when enough of their significant tokens are shared.
//! Strict search only counts shared tokens that appear in the same relative
//! order; otherwise the overlap is a plain multiset intersection.

use std::collections::HashMap;

use crate::config::ComparisonParams;
use crate::filter::SecondaryIndex;
use crate::models::{Alignment, Document, Match, Window};

/// Number of primary forms found among the secondary forms.
///
/// In strict mode each primary form is looked up left to right from just
/// past the previous hit; a form with no later occurrence is skipped.
/// The greedy walk is not symmetric: an early primary form matched late in
/// the secondary blocks the forms after it, so swapping the arguments can
/// change the count. Primary windows are always passed first.
pub fn overlap_count(primary: &[&str], secondary: &[&str], strict: bool) -> usize {
    if primary.is_empty() || secondary.is_empty() {
        return 0;
    }

    if strict {
        let mut cursor = 0usize;
        let mut count = 0usize;
        for form in primary {
            if let Some(offset) = secondary[cursor..].iter().position(|s| s == form) {
                count += 1;
                cursor += offset + 1;
                if cursor == secondary.len() {
                    break;
                }
            }
        }
        count
    } else {
        let mut remaining: HashMap<&str, usize> = HashMap::with_capacity(secondary.len());
        for &form in secondary {
            *remaining.entry(form).or_default() += 1;
        }
        primary
            .iter()
            .filter(|form| match remaining.get_mut(*form) {
                Some(n) if *n > 0 => {
                    *n -= 1;
                    true
                }
                _ => false,
            })
            .count()
    }
}

/// Score a window pair, returning a Match if it clears the threshold.
///
/// The score is the overlap divided by the longer window's significant
/// length, which for base windows is exactly the window size.
pub fn score_pair(
    primary_doc: &Document,
    primary: &Window,
    secondary_doc: &Document,
    secondary: &Window,
    params: &ComparisonParams,
) -> Option<Match> {
    let longest = primary.sig_len.max(secondary.sig_len);
    if longest == 0 {
        return None;
    }

    let primary_forms = primary_doc.significant_forms(primary);
    let secondary_forms = secondary_doc.significant_forms(secondary);
    let overlap = overlap_count(&primary_forms, &secondary_forms, params.strict_search);

    if overlap < params.required_overlap(longest) {
        return None;
    }

    Some(Match {
        primary: *primary,
        secondary: *secondary,
        overlap,
        score: overlap as f64 / longest as f64,
    })
}

/// Match one primary window against the secondary document.
///
/// Returns the alignment (if any window matched) and the number of
/// candidate windows that were scored.
pub fn match_primary_window(
    primary_doc: &Document,
    primary: &Window,
    secondary_doc: &Document,
    index: &SecondaryIndex,
    params: &ComparisonParams,
) -> (Option<Alignment>, usize) {
    let candidates = if params.brute_force {
        index.all_windows()
    } else {
        let forms = primary_doc.significant_forms(primary);
        index.candidate_windows(&forms, params.minimum_matches)
    };

    let scored = candidates.len();
    let matches: Vec<Match> = candidates
        .into_iter()
        .filter_map(|sig_start| secondary_doc.window_at(sig_start, index.window_size()))
        .filter_map(|secondary| score_pair(primary_doc, primary, secondary_doc, &secondary, params))
        .collect();

    (Alignment::new(*primary, matches), scored)
}
