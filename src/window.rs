//! Windowing over normalized documents.
//!
//! Windows are counted in significant tokens: a window of size W starts and
//! ends on a significant token and holds exactly W of them, with any stop
//! words in between carried along. Windows start at every significant
//! position, so consecutive windows overlap.

use crate::config::ComparisonParams;
use crate::matcher::score_pair;
use crate::models::{Alignment, AlignmentCollection, Document, Window};

/// Number of base windows a document of `significant_count` tokens yields.
pub fn calculate_window_count(significant_count: usize, window_size: usize) -> usize {
    if window_size == 0 || significant_count < window_size {
        return 0;
    }
    significant_count - window_size + 1
}

/// Lazily generate every base window of `window_size` significant tokens.
///
/// A document shorter than the window size yields nothing.
pub fn generate_windows(document: &Document, window_size: usize) -> impl Iterator<Item = Window> + '_ {
    let count = calculate_window_count(document.significant_count(), window_size);
    (0..count).filter_map(move |sig_start| document.window_at(sig_start, window_size))
}

/// Grow a window by `steps` significant tokens, stopping at the document end.
pub fn extend_clamped(document: &Document, window: &Window, steps: usize) -> Window {
    let available = document.significant_count().saturating_sub(window.sig_start);
    let target = (window.sig_len + steps).min(available);
    document.window_at(window.sig_start, target).unwrap_or(*window)
}

/// Replace base alignments with greedily extended ones.
///
/// Each alignment, in primary order, is grown forward one significant token
/// at a time together with its best secondary window, as long as the pair
/// keeps the base tolerance ratio. Base windows that fall inside an already
/// extended window are folded into it: their matches to secondary windows
/// the extended alignment does not already cover are carried over.
pub fn maximize_alignments(
    primary: &Document,
    secondary: &Document,
    base: &AlignmentCollection,
    params: &ComparisonParams,
) -> AlignmentCollection {
    let mut extended: Vec<Alignment> = Vec::with_capacity(base.len());
    let mut carried = 0usize;

    for alignment in base {
        if let Some(current) = extended
            .last_mut()
            .filter(|c| c.primary().contains(alignment.primary()))
        {
            if let Some(uncovered) = uncovered_matches(primary, secondary, current, alignment, params) {
                carried += uncovered.match_count();
                current.absorb(uncovered);
            }
            continue;
        }
        extended.push(extend_alignment(primary, secondary, alignment, params));
    }

    log::debug!(
        "Maximized {} base alignments into {} ({} matches carried)",
        base.len(),
        extended.len(),
        carried
    );

    AlignmentCollection::new(extended)
}

/// Matches of `inner`, whose primary window lies inside `outer`'s, that no
/// match of `outer` already covers, keyed to `outer`'s primary window.
///
/// Each is re-scored against the outer window with its secondary window
/// shifted and grown to line up; one that no longer clears the threshold
/// keeps its base pairing.
fn uncovered_matches(
    primary: &Document,
    secondary: &Document,
    outer: &Alignment,
    inner: &Alignment,
    params: &ComparisonParams,
) -> Option<Alignment> {
    let widest = *outer.primary();
    let offset = inner.primary().sig_start.saturating_sub(widest.sig_start);

    let matches = inner
        .matches()
        .iter()
        .filter(|m| !outer.matches().iter().any(|c| c.secondary.contains(&m.secondary)))
        .map(|m| {
            m.secondary
                .sig_start
                .checked_sub(offset)
                .and_then(|sig_start| {
                    let available = secondary.significant_count().saturating_sub(sig_start);
                    secondary.window_at(sig_start, widest.sig_len.min(available))
                })
                .and_then(|partner| score_pair(primary, &widest, secondary, &partner, params))
                .unwrap_or_else(|| m.clone())
        })
        .collect();

    Alignment::new(widest, matches)
}

/// Extend one alignment's primary window as far as its best match allows.
///
/// Other matches are re-scored against the extended window; one that fails
/// there keeps its base pairing, so no secondary match is lost.
pub fn extend_alignment(
    primary: &Document,
    secondary: &Document,
    alignment: &Alignment,
    params: &ComparisonParams,
) -> Alignment {
    let best = alignment.best_match();
    let mut steps = 0usize;
    let mut widest: Option<Window> = None;

    while let Some(candidate) =
        primary.window_at(best.primary.sig_start, best.primary.sig_len + steps + 1)
    {
        let partner = extend_clamped(secondary, &best.secondary, steps + 1);
        if score_pair(primary, &candidate, secondary, &partner, params).is_none() {
            break;
        }
        steps += 1;
        widest = Some(candidate);
    }

    let Some(widest) = widest else {
        return alignment.clone();
    };

    let matches = alignment
        .matches()
        .iter()
        .map(|m| {
            let partner = extend_clamped(secondary, &m.secondary, steps);
            score_pair(primary, &widest, secondary, &partner, params).unwrap_or_else(|| m.clone())
        })
        .collect();

    Alignment::new(widest, matches).unwrap_or_else(|| alignment.clone())
}
