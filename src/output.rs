//! Report rendering for comparison results (text, JSON, CSV).

use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::config::ComparisonParams;
use crate::models::{Alignment, ComparisonResult, ComparisonSummary, Document, Match, Window};
use crate::normalize::STOP_WORDS;
use crate::rank::{display_cutoff, left_right_counts, rank_by_best_score, visible_alignments};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Report layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Facts about the run that the core does not know
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportContext {
    pub primary_source: String,
    pub secondary_source: String,
    #[serde(skip)]
    pub elapsed: Option<Duration>,
}

/// A located span of text
#[derive(Debug, Clone, Serialize)]
pub struct PassageRef {
    pub token_range: (usize, usize),  // [start, end) in the document's tokens
    pub byte_range: (usize, usize),   // [start, end) in the source text
    pub text: String,
}

impl PassageRef {
    pub fn from_window(document: &Document, window: &Window) -> Self {
        let tokens = document.window_tokens(window);
        let byte_range = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0, 0),
        };
        PassageRef {
            token_range: (window.start, window.end()),
            byte_range,
            text: document.excerpt(window).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchWithText {
    pub secondary: PassageRef,
    pub overlap: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentWithText {
    pub primary: PassageRef,
    pub best_score: f64,
    pub matches: Vec<MatchWithText>,
}

impl AlignmentWithText {
    /// Attach text to an alignment, keeping matches at or above `cutoff`.
    pub fn from_alignment(
        alignment: &Alignment,
        primary: &Document,
        secondary: &Document,
        cutoff: f64,
    ) -> Self {
        AlignmentWithText {
            primary: PassageRef::from_window(primary, alignment.primary()),
            best_score: alignment.best_score(),
            matches: alignment
                .matches_at_least(cutoff)
                .map(|m| MatchWithText {
                    secondary: PassageRef::from_window(secondary, &m.secondary),
                    overlap: m.overlap,
                    score: m.score,
                })
                .collect(),
        }
    }
}

/// JSON document written for a comparison
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub version: &'a str,
    pub sources: &'a ReportContext,
    pub elapsed_seconds: Option<f64>,
    pub parameters: &'a ComparisonParams,
    pub summary: &'a ComparisonSummary,
    pub display_cutoff: f64,
    pub left_match_count: usize,
    pub right_match_count: usize,
    pub alignments: Vec<AlignmentWithText>,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render the run settings block.
pub fn format_settings(params: &ComparisonParams, context: &ReportContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Primary Source: {}", context.primary_source);
    let _ = writeln!(out, "Secondary Source: {}", context.secondary_source);
    let _ = writeln!(out, "Match Case: {}", yes_no(params.match_case));
    let _ = writeln!(out, "Use Porter Stemmer: {}", yes_no(params.use_porter_stemmer));
    let _ = writeln!(out, "Strict Search: {}", yes_no(params.strict_search));
    if params.use_stop_words {
        let _ = writeln!(out, "Use Stop Words: Yes ({} stop words)", STOP_WORDS.len());
    } else {
        let _ = writeln!(out, "Use Stop Words: No");
    }
    let _ = writeln!(
        out,
        "Maximize Primary Window Size: {}",
        yes_no(params.maximize_primary_window_size)
    );
    let _ = writeln!(out, "Print Best Scores Only: {}", yes_no(params.print_best_only));
    let _ = writeln!(
        out,
        "Fuzzy Search Parameters: {}/{}",
        params.minimum_matches, params.window_size
    );
    let _ = writeln!(
        out,
        "Require at least {} secondary matches",
        params.minimum_secondary_matches
    );
    if let Some(elapsed) = context.elapsed {
        let _ = writeln!(
            out,
            "Time to complete (search): {:.3} seconds.",
            elapsed.as_secs_f64()
        );
    }
    out
}

/// Render one alignment: the primary passage, then each shown secondary match.
pub fn format_alignment(alignment: &Alignment, result: &ComparisonResult, cutoff: f64) -> String {
    let mut out = String::new();
    let primary = alignment.primary();
    let _ = writeln!(
        out,
        "[{}-{}] {}",
        primary.start,
        primary.end(),
        result.primary.excerpt(primary)
    );
    for m in alignment.matches_at_least(cutoff) {
        let _ = writeln!(out, "{}", format_match(m, &result.secondary));
    }
    out
}

fn format_match(m: &Match, secondary: &Document) -> String {
    format!(
        "    {:.3} ({}) [{}-{}] {}",
        m.score,
        m.overlap,
        m.secondary.start,
        m.secondary.end(),
        secondary.excerpt(&m.secondary)
    )
}

/// Full human-readable report.
pub fn format_report(result: &ComparisonResult, context: &ReportContext) -> String {
    let cutoff = display_cutoff(&result.alignments, result.parameters.print_best_only);
    let (left, right) = left_right_counts(&result.alignments, cutoff);

    let mut out = format_settings(&result.parameters, context);
    let _ = writeln!(out, "Left Match Count: {}", left);
    let _ = writeln!(out, "Right Match Count: {}", right);
    let _ = writeln!(out);

    for alignment in visible_alignments(&result.alignments, cutoff) {
        out.push_str(&format_alignment(alignment, result, cutoff));
        out.push('\n');
    }
    out
}

/// Build the serializable report.
pub fn build_json_report<'a>(
    result: &'a ComparisonResult,
    context: &'a ReportContext,
) -> JsonReport<'a> {
    let cutoff = display_cutoff(&result.alignments, result.parameters.print_best_only);
    let (left, right) = left_right_counts(&result.alignments, cutoff);

    JsonReport {
        version: &result.version,
        sources: context,
        elapsed_seconds: context.elapsed.map(|d| d.as_secs_f64()),
        parameters: &result.parameters,
        summary: &result.summary,
        display_cutoff: cutoff,
        left_match_count: left,
        right_match_count: right,
        alignments: visible_alignments(&result.alignments, cutoff)
            .map(|a| AlignmentWithText::from_alignment(a, &result.primary, &result.secondary, cutoff))
            .collect(),
    }
}

/// Write the text report.
pub fn write_text<W: Write>(
    result: &ComparisonResult,
    context: &ReportContext,
    writer: &mut W,
) -> Result<(), OutputError> {
    writer.write_all(format_report(result, context).as_bytes())?;
    Ok(())
}

/// Write the report as JSON.
pub fn write_json<W: Write>(
    result: &ComparisonResult,
    context: &ReportContext,
    writer: &mut W,
) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(&build_json_report(result, context))?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write shown matches as CSV, one row per match.
pub fn write_csv<W: Write>(result: &ComparisonResult, writer: &mut W) -> Result<(), OutputError> {
    let cutoff = display_cutoff(&result.alignments, result.parameters.print_best_only);

    writeln!(
        writer,
        "primary_start,primary_end,primary_text,\
         secondary_start,secondary_end,secondary_text,overlap,score"
    )?;

    for alignment in visible_alignments(&result.alignments, cutoff) {
        let primary = alignment.primary();
        let primary_text = result.primary.excerpt(primary);
        for m in alignment.matches_at_least(cutoff) {
            writeln!(
                writer,
                "{},{},{:?},{},{},{:?},{},{}",
                primary.start,
                primary.end(),
                primary_text,
                m.secondary.start,
                m.secondary.end(),
                result.secondary.excerpt(&m.secondary),
                m.overlap,
                m.score
            )?;
        }
    }

    Ok(())
}

/// Write the report in the given format.
pub fn write_report<W: Write>(
    result: &ComparisonResult,
    context: &ReportContext,
    format: ReportFormat,
    writer: &mut W,
) -> Result<(), OutputError> {
    match format {
        ReportFormat::Text => write_text(result, context, writer),
        ReportFormat::Json => write_json(result, context, writer),
        ReportFormat::Csv => write_csv(result, writer),
    }
}

/// Write the report to a file.
pub fn write_report_file(
    result: &ComparisonResult,
    context: &ReportContext,
    format: ReportFormat,
    path: &Path,
) -> Result<(), OutputError> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_report(result, context, format, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Write a summary to stdout.
pub fn print_summary(result: &ComparisonResult) {
    let summary = &result.summary;
    println!("\n=== Comparison Summary ===");
    println!("Version: {}", result.version);
    println!();
    println!(
        "Primary: {} tokens, {} windows",
        summary.primary_tokens, summary.primary_windows
    );
    println!(
        "Secondary: {} tokens, {} windows",
        summary.secondary_tokens, summary.secondary_windows
    );
    println!();
    println!("Results:");
    println!("  Candidate pairs scored: {}", summary.candidate_pairs);
    println!("  Alignments before filtering: {}", summary.unfiltered_alignments);
    println!("  Alignments: {}", summary.alignment_count);
    println!("  Matches: {}", summary.match_count);
    println!("  Best score: {:.3}", summary.best_score);
}

/// Render the highest-scoring shown alignments, at most `limit` of them.
///
/// Only alignments with a match at or above the display cutoff are ranked,
/// so every primary line has secondary lines under it.
pub fn format_best_alignments(result: &ComparisonResult, limit: Option<usize>) -> String {
    let cutoff = display_cutoff(&result.alignments, result.parameters.print_best_only);
    let ranked = rank_by_best_score(visible_alignments(&result.alignments, cutoff));
    let to_print = match limit {
        Some(n) => &ranked[..n.min(ranked.len())],
        None => &ranked[..],
    };

    let mut out = String::new();
    for alignment in to_print {
        let _ = writeln!(out, "{}", format_alignment(alignment, result, cutoff));
    }

    if let Some(n) = limit {
        if ranked.len() > n {
            let _ = writeln!(out, "... and {} more alignments", ranked.len() - n);
        }
    }
    out
}

/// Print the highest-scoring alignments.
pub fn print_alignments(result: &ComparisonResult, limit: Option<usize>) {
    print!("{}", format_best_alignments(result, limit));
}
