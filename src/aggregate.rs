//! Group accepted matches into alignments keyed by primary window.
//!
//! Grouping is a merge-by-key over a `BTreeMap`, so partial maps built on
//! different threads can be combined in any order with the same result.

use std::collections::BTreeMap;

use crate::models::{Alignment, AlignmentCollection, Match, WindowKey};

pub type AlignmentMap = BTreeMap<WindowKey, Alignment>;

/// Group a stream of matches by their primary window.
pub fn group_matches<I>(matches: I) -> AlignmentCollection
where
    I: IntoIterator<Item = Match>,
{
    let mut grouped: BTreeMap<WindowKey, Vec<Match>> = BTreeMap::new();
    for m in matches {
        grouped.entry(m.primary.key()).or_default().push(m);
    }

    let alignments = grouped
        .into_values()
        .filter_map(|matches| {
            let primary = matches.first()?.primary;
            Alignment::new(primary, matches)
        })
        .collect();

    AlignmentCollection::new(alignments)
}

/// Add one alignment to a map, merging with an existing entry for the same window.
pub fn insert_alignment(mut map: AlignmentMap, alignment: Alignment) -> AlignmentMap {
    let key = alignment.primary().key();
    match map.get_mut(&key) {
        Some(existing) => existing.absorb(alignment),
        None => {
            map.insert(key, alignment);
        }
    }
    map
}

/// Combine two partial maps.
pub fn merge_alignment_maps(left: AlignmentMap, right: AlignmentMap) -> AlignmentMap {
    let (mut large, small) = if left.len() >= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    for alignment in small.into_values() {
        large = insert_alignment(large, alignment);
    }
    large
}

pub fn into_collection(map: AlignmentMap) -> AlignmentCollection {
    AlignmentCollection::new(map.into_values().collect())
}
