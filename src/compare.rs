//! Pairwise comparison orchestration.
//!
//! This module coordinates the full pipeline between two texts:
//! normalization, windowing, candidate filtering, matching, aggregation,
//! optional window maximization and secondary-match filtering.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use crate::aggregate::{insert_alignment, into_collection, merge_alignment_maps, AlignmentMap};
use crate::config::{ComparisonParams, ConfigError};
use crate::filter::{filter_rate, SecondaryIndex};
use crate::matcher::match_primary_window;
use crate::models::*;
use crate::normalize::Normalizer;
use crate::rank::{filter_by_secondary_matches, find_best_score};
use crate::window::{generate_windows, maximize_alignments};

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Counts gathered while matching, before secondary-match filtering
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    pub primary_windows: usize,
    pub secondary_windows: usize,
    pub candidate_pairs: usize,
}

/// Compare two texts and return every alignment that survives filtering.
pub fn compare_documents(
    primary_text: &str,
    secondary_text: &str,
    params: &ComparisonParams,
) -> Result<ComparisonResult, CompareError> {
    compare_documents_with_progress(primary_text, secondary_text, params, false)
}

/// Same as `compare_documents`, optionally drawing a progress bar on stderr.
pub fn compare_documents_with_progress(
    primary_text: &str,
    secondary_text: &str,
    params: &ComparisonParams,
    show_progress: bool,
) -> Result<ComparisonResult, CompareError> {
    params.validate()?;

    let normalizer = Normalizer::from_params(params);
    log::debug!("Normalization stages: {:?}", normalizer.stage_names());

    let primary = normalizer.normalize(DocumentRole::Primary, primary_text);
    let secondary = normalizer.normalize(DocumentRole::Secondary, secondary_text);
    log::info!(
        "Primary: {} tokens ({} significant), secondary: {} tokens ({} significant)",
        primary.len(),
        primary.significant_count(),
        secondary.len(),
        secondary.significant_count()
    );

    let (unfiltered, stats) = find_alignments(&primary, &secondary, params, show_progress);

    let alignments = filter_by_secondary_matches(&unfiltered, params.minimum_secondary_matches);
    if alignments.len() != unfiltered.len() {
        log::info!(
            "After requiring {} secondary matches: {} of {} alignments",
            params.minimum_secondary_matches,
            alignments.len(),
            unfiltered.len()
        );
    }

    let summary = ComparisonSummary {
        primary_tokens: primary.len(),
        secondary_tokens: secondary.len(),
        primary_windows: stats.primary_windows,
        secondary_windows: stats.secondary_windows,
        candidate_pairs: stats.candidate_pairs,
        unfiltered_alignments: unfiltered.len(),
        alignment_count: alignments.len(),
        match_count: alignments.match_count(),
        best_score: find_best_score(&alignments),
    };

    Ok(ComparisonResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        parameters: params.clone(),
        primary,
        secondary,
        summary,
        alignments,
    })
}

/// Match every primary window against the secondary document.
///
/// Primary windows are matched in parallel against a shared read-only
/// index; per-thread maps are merged by primary window. No secondary-match
/// filtering is applied here. Parameters are assumed valid.
pub fn find_alignments(
    primary: &Document,
    secondary: &Document,
    params: &ComparisonParams,
    show_progress: bool,
) -> (AlignmentCollection, MatchStats) {
    let index = SecondaryIndex::build(secondary, params.window_size);
    let primary_windows: Vec<Window> = generate_windows(primary, params.window_size).collect();

    log::info!(
        "Windows: {} primary, {} secondary (size {}); index holds {} forms",
        primary_windows.len(),
        index.window_count(),
        params.window_size,
        index.vocabulary_size()
    );
    if params.brute_force {
        log::info!(
            "Mode: BRUTE FORCE (all {} pairs)",
            primary_windows.len() * index.window_count()
        );
    }

    let progress = if show_progress {
        let pb = ProgressBar::new(primary_windows.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let candidate_pairs = AtomicUsize::new(0);

    let map: AlignmentMap = primary_windows
        .par_iter()
        .filter_map(|window| {
            let (alignment, scored) =
                match_primary_window(primary, window, secondary, &index, params);
            candidate_pairs.fetch_add(scored, Ordering::Relaxed);

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            alignment
        })
        .fold(AlignmentMap::new, insert_alignment)
        .reduce(AlignmentMap::new, merge_alignment_maps);

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    let stats = MatchStats {
        primary_windows: primary_windows.len(),
        secondary_windows: index.window_count(),
        candidate_pairs: candidate_pairs.into_inner(),
    };

    log::info!(
        "Candidate pairs: {} ({:.1}% filtered)",
        stats.candidate_pairs,
        100.0 * filter_rate(stats.candidate_pairs, stats.primary_windows, stats.secondary_windows)
    );

    let mut alignments = into_collection(map);
    log::info!("Alignments found: {}", alignments.len());

    if params.maximize_primary_window_size {
        alignments = maximize_alignments(primary, secondary, &alignments, params);
        log::info!("Alignments after maximizing windows: {}", alignments.len());
    }

    (alignments, stats)
}
