//! Token normalization: raw text to a position-tagged token stream.
//!
//! Words are cut at Unicode word boundaries; punctuation and whitespace
//! never become tokens. Each token then passes through the stages enabled
//! by the parameters: case folding, stop-word marking and stemming. Only
//! the comparison form changes, the surface form is kept for display.

use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::ComparisonParams;
use crate::models::{Document, DocumentRole, Token};

/// High-frequency English function words. Sorted for binary search.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

/// True if the word, compared case-insensitively, is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.binary_search(&lower.as_str()).is_ok()
}

/// Split text into word segments with their byte offsets.
pub fn tokenize(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    text.split_word_bound_indices()
        .filter(|(_, segment)| segment.chars().any(char::is_alphanumeric))
}

/// One transformation applied to every token
pub enum Stage {
    CaseFold,
    MarkStopWords,
    Stem(Stemmer),
}

impl Stage {
    fn apply(&self, token: &mut Token) {
        match self {
            Stage::CaseFold => token.normalized = token.normalized.to_lowercase(),
            Stage::MarkStopWords => {
                if is_stop_word(&token.surface) {
                    token.significant = false;
                }
            }
            Stage::Stem(stemmer) => {
                let stemmed = stemmer.stem(&token.normalized).into_owned();
                token.normalized = stemmed;
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Stage::CaseFold => "case-fold",
            Stage::MarkStopWords => "stop-words",
            Stage::Stem(_) => "stem",
        }
    }
}

/// Ordered set of stages chosen from the comparison parameters
pub struct Normalizer {
    stages: Vec<Stage>,
}

impl Normalizer {
    pub fn new(stages: Vec<Stage>) -> Self {
        Normalizer { stages }
    }

    pub fn from_params(params: &ComparisonParams) -> Self {
        let mut stages = Vec::with_capacity(3);
        if !params.match_case {
            stages.push(Stage::CaseFold);
        }
        if params.use_stop_words {
            stages.push(Stage::MarkStopWords);
        }
        if params.use_porter_stemmer {
            stages.push(Stage::Stem(Stemmer::create(Algorithm::English)));
        }
        Normalizer { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    pub fn normalize_token(&self, surface: &str, start: usize) -> Token {
        let mut token = Token {
            surface: surface.to_string(),
            normalized: surface.to_string(),
            start,
            end: start + surface.len(),
            significant: true,
        };
        for stage in &self.stages {
            stage.apply(&mut token);
        }
        token
    }

    pub fn normalize(&self, role: DocumentRole, text: &str) -> Document {
        let tokens = tokenize(text)
            .map(|(start, word)| self.normalize_token(word, start))
            .collect();
        Document::new(role, text, tokens)
    }
}

/// Normalize one text under the given parameters.
pub fn normalize_document(text: &str, role: DocumentRole, params: &ComparisonParams) -> Document {
    Normalizer::from_params(params).normalize(role, text)
}
