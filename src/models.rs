//! Data structures for the intertext detection pipeline.

use serde::{Deserialize, Serialize};

use crate::config::ComparisonParams;

/// Which side of the comparison a document (and its windows) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentRole {
    Primary,
    Secondary,
}

/// A single word of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub surface: String,     // Text as written, used for display
    pub normalized: String,  // Comparison form after case folding and stemming
    pub start: usize,        // Byte offset in the source text
    pub end: usize,          // Exclusive
    pub significant: bool,   // False for stop words
}

/// An ordered token stream derived from one input text.
///
/// Built once by the normalizer and read-only afterwards. Keeps the
/// positions of significant tokens so windows can be counted in
/// significant tokens while stop words stay in place.
#[derive(Debug, Clone)]
pub struct Document {
    role: DocumentRole,
    text: String,
    tokens: Vec<Token>,
    significant: Vec<usize>,
}

impl Document {
    pub fn new(role: DocumentRole, text: impl Into<String>, tokens: Vec<Token>) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.significant)
            .map(|(i, _)| i)
            .collect();

        Document {
            role,
            text: text.into(),
            tokens,
            significant,
        }
    }

    pub fn role(&self) -> DocumentRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token indices of the significant tokens, in document order
    pub fn significant_positions(&self) -> &[usize] {
        &self.significant
    }

    pub fn significant_count(&self) -> usize {
        self.significant.len()
    }

    /// All tokens covered by a window, stop words included
    pub fn window_tokens(&self, window: &Window) -> &[Token] {
        &self.tokens[window.start..window.end()]
    }

    /// Normalized forms of the window's significant tokens, in order
    pub fn significant_forms(&self, window: &Window) -> Vec<&str> {
        self.significant[window.sig_start..window.sig_start + window.sig_len]
            .iter()
            .map(|&i| self.tokens[i].normalized.as_str())
            .collect()
    }

    /// Source text spanned by the window, punctuation included
    pub fn excerpt(&self, window: &Window) -> &str {
        let tokens = self.window_tokens(window);
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => &self.text[first.start..last.end],
            _ => "",
        }
    }

    /// Window covering `sig_len` significant tokens starting at the
    /// `sig_start`-th significant token. None when it would run past the end.
    pub fn window_at(&self, sig_start: usize, sig_len: usize) -> Option<Window> {
        if sig_len == 0 || sig_start + sig_len > self.significant.len() {
            return None;
        }
        let start = self.significant[sig_start];
        let last = self.significant[sig_start + sig_len - 1];
        Some(Window {
            role: self.role,
            start,
            len: last - start + 1,
            sig_start,
            sig_len,
        })
    }
}

/// Identity of a window: document, start token and token length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowKey {
    pub role: DocumentRole,
    pub start: usize,
    pub len: usize,
}

/// A contiguous run of a document's tokens.
///
/// A view only: it names a token range and never copies the tokens.
/// `sig_start`/`sig_len` locate the same range among significant tokens
/// and are fully determined by `start`/`len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Window {
    pub role: DocumentRole,
    pub start: usize,
    pub len: usize,
    pub sig_start: usize,
    pub sig_len: usize,
}

impl Window {
    pub fn key(&self) -> WindowKey {
        WindowKey {
            role: self.role,
            start: self.start,
            len: self.len,
        }
    }

    /// Exclusive end token index
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// True if `other` lies entirely inside this window
    pub fn contains(&self, other: &Window) -> bool {
        self.role == other.role && self.start <= other.start && other.end() <= self.end()
    }
}

/// An accepted pairing of a primary window with a secondary window.
///
/// Under maximize mode `primary` may be a window inside its alignment's
/// extended primary window, when the pairing only holds at base length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub primary: Window,
    pub secondary: Window,
    pub overlap: usize,  // Shared significant tokens
    pub score: f64,      // overlap / longer significant length, in [0, 1]
}

/// All secondary matches found for one primary window.
///
/// Never empty: `Alignment::new` refuses an empty match list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    primary: Window,
    matches: Vec<Match>,
}

impl Alignment {
    /// Build an alignment, ordering matches by secondary window.
    pub fn new(primary: Window, mut matches: Vec<Match>) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }
        matches.sort_by_key(|m| m.secondary.key());
        matches.dedup_by_key(|m| m.secondary.key());
        Some(Alignment { primary, matches })
    }

    pub fn primary(&self) -> &Window {
        &self.primary
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn best_score(&self) -> f64 {
        self.matches.iter().map(|m| m.score).fold(0.0, f64::max)
    }

    /// The best-scoring match; ties go to the earliest secondary window
    pub fn best_match(&self) -> &Match {
        let mut best = &self.matches[0];
        for m in &self.matches[1..] {
            if m.score > best.score {
                best = m;
            }
        }
        best
    }

    /// Matches scoring at least `score`. Restartable: call again for a fresh pass.
    pub fn matches_at_least(&self, score: f64) -> impl Iterator<Item = &Match> + Clone + '_ {
        self.matches.iter().filter(move |m| m.score >= score)
    }

    pub fn count_at_least(&self, score: f64) -> usize {
        self.matches_at_least(score).count()
    }

    pub fn has_matches_at_least(&self, score: f64) -> bool {
        self.matches_at_least(score).next().is_some()
    }

    /// Fold another alignment for the same primary window into this one.
    pub(crate) fn absorb(&mut self, other: Alignment) {
        debug_assert_eq!(self.primary.key(), other.primary.key());
        self.matches.extend(other.matches);
        self.matches.sort_by_key(|m| m.secondary.key());
        self.matches.dedup_by_key(|m| m.secondary.key());
    }
}

/// Alignments of one comparison, ordered by primary window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentCollection {
    alignments: Vec<Alignment>,
}

impl AlignmentCollection {
    pub fn new(mut alignments: Vec<Alignment>) -> Self {
        alignments.sort_by_key(|a| a.primary.key());
        AlignmentCollection { alignments }
    }

    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alignment> {
        self.alignments.iter()
    }

    pub fn as_slice(&self) -> &[Alignment] {
        &self.alignments
    }

    /// Total matches across all alignments
    pub fn match_count(&self) -> usize {
        self.alignments.iter().map(Alignment::match_count).sum()
    }

    pub fn get(&self, primary: &WindowKey) -> Option<&Alignment> {
        self.alignments
            .binary_search_by_key(primary, |a| a.primary.key())
            .ok()
            .map(|idx| &self.alignments[idx])
    }
}

impl<'a> IntoIterator for &'a AlignmentCollection {
    type Item = &'a Alignment;
    type IntoIter = std::slice::Iter<'a, Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.alignments.iter()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub primary_tokens: usize,
    pub secondary_tokens: usize,
    pub primary_windows: usize,
    pub secondary_windows: usize,
    pub candidate_pairs: usize,
    pub unfiltered_alignments: usize,  // Before the secondary-match threshold
    pub alignment_count: usize,
    pub match_count: usize,
    pub best_score: f64,
}

/// Full comparison result
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub version: String,
    pub parameters: ComparisonParams,
    pub primary: Document,
    pub secondary: Document,
    pub summary: ComparisonSummary,
    pub alignments: AlignmentCollection,
}
