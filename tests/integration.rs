//! Integration tests for intertext-finder.
//!
//! These tests verify the end-to-end behaviour of the comparison pipeline.

use intertext_finder::compare::{compare_documents, find_alignments, CompareError};
use intertext_finder::config::{ComparisonParams, ConfigError};
use intertext_finder::models::{ComparisonResult, DocumentRole};
use intertext_finder::normalize::normalize_document;
use intertext_finder::rank::{filter_by_secondary_matches, find_best_score};

/// Parameters with every normalization stage off.
fn literal_params(window_size: usize, minimum_matches: usize) -> ComparisonParams {
    ComparisonParams {
        window_size,
        minimum_matches,
        match_case: true,
        use_porter_stemmer: false,
        use_stop_words: false,
        strict_search: true,
        ..Default::default()
    }
}

fn run(primary: &str, secondary: &str, params: &ComparisonParams) -> ComparisonResult {
    compare_documents(primary, secondary, params).expect("valid parameters")
}

#[test]
fn test_identity_every_window_matches_itself() {
    let text = "Tell me, O Muse, of that ingenious hero who travelled far and wide \
                after he had sacked the famous town of Troy";
    let params = literal_params(4, 4);
    let result = run(text, text, &params);

    assert!(result.summary.primary_windows > 0);
    assert_eq!(result.alignments.len(), result.summary.primary_windows);
    for alignment in &result.alignments {
        assert!(alignment.match_count() >= 1);
        assert!((alignment.best_score() - 1.0).abs() < 1e-9);
        assert!(alignment
            .matches()
            .iter()
            .any(|m| m.secondary.start == alignment.primary().start
                && m.secondary.len == alignment.primary().len));
    }
}

#[test]
fn test_empty_secondary() {
    let result = run("anything at all here", "", &literal_params(2, 1));
    assert!(result.alignments.is_empty());

    let result = run("anything at all here", "   \n\t  ", &ComparisonParams::default());
    assert!(result.alignments.is_empty());
}

#[test]
fn test_empty_primary() {
    let result = run("", "some secondary text", &literal_params(1, 1));
    assert!(result.alignments.is_empty());
    assert_eq!(result.summary.primary_windows, 0);
}

#[test]
fn test_case_sensitivity() {
    let sensitive = literal_params(1, 1);
    assert!(run("Quote", "quote", &sensitive).alignments.is_empty());

    let folded = ComparisonParams {
        match_case: false,
        ..sensitive
    };
    assert_eq!(run("Quote", "quote", &folded).alignments.len(), 1);
}

#[test]
fn test_stemming() {
    let stemmed = ComparisonParams {
        use_porter_stemmer: true,
        match_case: false,
        ..literal_params(1, 1)
    };
    let result = run("running", "run", &stemmed);
    assert_eq!(result.alignments.len(), 1);
    let m = &result.alignments.as_slice()[0].matches()[0];
    assert_eq!(m.overlap, 1);
    assert!((m.score - 1.0).abs() < 1e-9);

    // Same overlap as an exact match
    let exact = run("run", "run", &stemmed);
    assert_eq!(exact.alignments.as_slice()[0].matches()[0].overlap, m.overlap);

    let unstemmed = ComparisonParams {
        use_porter_stemmer: false,
        ..stemmed
    };
    assert!(run("running", "run", &unstemmed).alignments.is_empty());
}

#[test]
fn test_stop_word_neutrality() {
    let primary = "wrath goddess sing";
    let with_article = "wrath the goddess sing";

    let neutral = ComparisonParams {
        use_stop_words: true,
        ..literal_params(3, 2)
    };
    let plain = run(primary, primary, &neutral).summary.best_score;
    let inserted = run(primary, with_article, &neutral).summary.best_score;
    assert!((plain - inserted).abs() < 1e-9);
    assert!((plain - 1.0).abs() < 1e-9);

    let counted = literal_params(3, 2);
    let plain = run(primary, primary, &counted).summary.best_score;
    let inserted = run(primary, with_article, &counted).summary.best_score;
    assert!(inserted < plain);
}

#[test]
fn test_order_sensitivity() {
    let strict = literal_params(3, 1);
    let loose = ComparisonParams {
        strict_search: false,
        ..strict.clone()
    };

    let strict_score = run("dog bites man", "man bites dog", &strict).summary.best_score;
    let loose_score = run("dog bites man", "man bites dog", &loose).summary.best_score;
    assert!(strict_score < loose_score);
    assert!((loose_score - 1.0).abs() < 1e-9);

    // A full reversal cannot reach two ordered shared tokens
    let strict_two = literal_params(3, 2);
    assert!(run("dog bites man", "man bites dog", &strict_two).alignments.is_empty());
}

#[test]
fn test_end_to_end_quick_brown() {
    let params = ComparisonParams {
        window_size: 3,
        minimum_matches: 2,
        use_stop_words: true,
        use_porter_stemmer: false,
        match_case: false,
        ..Default::default()
    };
    let result = run("the quick brown fox", "a quick brown dog", &params);

    assert_eq!(result.alignments.len(), 1);
    let alignment = &result.alignments.as_slice()[0];
    assert_eq!(alignment.match_count(), 1);
    let m = &alignment.matches()[0];
    assert_eq!(m.overlap, 2);
    assert!((m.score - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(result.primary.excerpt(alignment.primary()), "quick brown fox");
    assert_eq!(result.secondary.excerpt(&m.secondary), "quick brown dog");
}

#[test]
fn test_threshold_monotonicity() {
    let primary = "sing sing sing of the sea and the sea again";
    let secondary = "the sea the sea sing of the sea sing again and again";
    let params = ComparisonParams {
        use_porter_stemmer: false,
        ..literal_params(2, 1)
    };

    let primary_doc = normalize_document(primary, DocumentRole::Primary, &params);
    let secondary_doc = normalize_document(secondary, DocumentRole::Secondary, &params);
    let (all, _) = find_alignments(&primary_doc, &secondary_doc, &params, false);

    let mut previous = usize::MAX;
    for threshold in 0..8 {
        let size = filter_by_secondary_matches(&all, threshold).len();
        assert!(size <= previous);
        previous = size;
    }
}

#[test]
fn test_filtering_does_not_mutate_source() {
    let params = literal_params(1, 1);
    let primary_doc = normalize_document("echo echo narcissus", DocumentRole::Primary, &params);
    let secondary_doc = normalize_document("echo narcissus echo", DocumentRole::Secondary, &params);
    let (all, _) = find_alignments(&primary_doc, &secondary_doc, &params, false);

    let before = all.clone();
    let filtered = filter_by_secondary_matches(&all, 2);
    assert_eq!(all, before);
    assert!(filtered.len() < all.len());
    assert!(find_best_score(&filtered) <= find_best_score(&all));
}

#[test]
fn test_maximize_reports_longer_quotations() {
    let primary = "Then spoke he winged words: the rosy fingered dawn appeared over the wine dark sea.";
    let secondary = "And when the rosy fingered dawn appeared over the wine dark sea they sailed.";

    let base = ComparisonParams {
        window_size: 2,
        minimum_matches: 2,
        use_porter_stemmer: false,
        use_stop_words: true,
        ..Default::default()
    };
    let maximized = ComparisonParams {
        maximize_primary_window_size: true,
        ..base.clone()
    };

    let fragments = run(primary, secondary, &base);
    let quotes = run(primary, secondary, &maximized);

    assert!(fragments.alignments.len() > 1);
    assert_eq!(quotes.alignments.len(), 1);
    let alignment = &quotes.alignments.as_slice()[0];
    assert_eq!(
        quotes.primary.excerpt(alignment.primary()),
        "rosy fingered dawn appeared over the wine dark sea"
    );
    assert!((alignment.best_score() - 1.0).abs() < 1e-9);
}

#[test]
fn test_maximize_keeps_every_secondary_echo() {
    let primary = "alpha beta gamma delta";
    let secondary = "alpha beta gamma delta zz yy xx gamma delta";
    let base = literal_params(2, 2);
    let maximized = ComparisonParams {
        maximize_primary_window_size: true,
        ..base.clone()
    };

    let excerpts = |result: &ComparisonResult| -> Vec<(usize, String)> {
        let mut found: Vec<(usize, String)> = result
            .alignments
            .iter()
            .flat_map(|a| a.matches())
            .map(|m| (m.secondary.start, result.secondary.excerpt(&m.secondary).to_string()))
            .collect();
        found.sort();
        found
    };

    let fragments = run(primary, secondary, &base);
    let echoes: Vec<usize> = excerpts(&fragments)
        .into_iter()
        .filter(|(_, text)| text == "gamma delta")
        .map(|(start, _)| start)
        .collect();
    assert_eq!(echoes, vec![2, 7]);

    let quotes = run(primary, secondary, &maximized);
    assert_eq!(quotes.alignments.len(), 1);
    assert_eq!(
        excerpts(&quotes),
        vec![
            (0, "alpha beta gamma delta".to_string()),
            (7, "gamma delta".to_string()),
        ]
    );
}

#[test]
fn test_maximize_score_uses_longer_window() {
    let params = ComparisonParams {
        maximize_primary_window_size: true,
        ..literal_params(2, 1)
    };
    let result = run("a b c d e", "a b c d", &params);

    assert_eq!(result.alignments.len(), 1);
    let alignment = &result.alignments.as_slice()[0];
    assert_eq!(alignment.primary().sig_len, 5);
    let best = alignment.best_match();
    assert_eq!(best.secondary.sig_len, 4);
    assert_eq!(best.score, 4.0 / 5.0);
    assert_eq!(result.summary.best_score, 4.0 / 5.0);
}

#[test]
fn test_brute_force_matches_indexed() {
    let primary = "arms and the man I sing who first from the shores of troy came";
    let secondary = "I sing of arms and of the man from troy who came to the shores";
    let indexed = ComparisonParams {
        strict_search: false,
        ..literal_params(3, 1)
    };
    let brute = ComparisonParams {
        brute_force: true,
        ..indexed.clone()
    };

    let a = run(primary, secondary, &indexed);
    let b = run(primary, secondary, &brute);
    assert_eq!(a.alignments, b.alignments);
    assert!(a.summary.candidate_pairs <= b.summary.candidate_pairs);
}

#[test]
fn test_configuration_errors() {
    let zero_window = ComparisonParams {
        window_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        compare_documents("a", "a", &zero_window),
        Err(CompareError::Config(ConfigError::ZeroWindowSize))
    ));

    let too_many = literal_params(2, 5);
    assert!(matches!(
        compare_documents("a", "a", &too_many),
        Err(CompareError::Config(ConfigError::MinimumMatchesExceedsWindow { .. }))
    ));
}

#[test]
fn test_deterministic_results() {
    let params = ComparisonParams {
        window_size: 2,
        minimum_matches: 1,
        ..Default::default()
    };
    let primary = "The ships were drawn up on the shore, and the men slept beside them.";
    let secondary = "Beside the drawn ships the men slept on the shore.";
    let a = run(primary, secondary, &params);
    let b = run(primary, secondary, &params);
    assert_eq!(a.alignments, b.alignments);
}
