//! Intertext Finder
//!
//! Detects shared and paraphrased phrases between a primary and a secondary
//! text. Both texts are normalized (case folding, stemming, stop-word
//! marking), cut into overlapping windows, and window pairs sharing enough
//! significant tokens are reported as fuzzy matches grouped per primary
//! window.
//!
//! # Example
//!
//! ```
//! use intertext_finder::prelude::*;
//!
//! let params = ComparisonParams {
//!     window_size: 3,
//!     minimum_matches: 2,
//!     use_porter_stemmer: false,
//!     ..Default::default()
//! };
//!
//! let result = compare_documents(
//!     "the quick brown fox",
//!     "a quick brown dog",
//!     &params,
//! )
//! .unwrap();
//!
//! assert_eq!(result.alignments.len(), 1);
//! for alignment in &result.alignments {
//!     println!("{}", result.primary.excerpt(alignment.primary()));
//! }
//! ```

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod filter;
pub mod loader;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod output;
pub mod rank;
pub mod window;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{group_matches, merge_alignment_maps, AlignmentMap};
    pub use crate::compare::{
        compare_documents, compare_documents_with_progress, find_alignments, CompareError,
        MatchStats,
    };
    pub use crate::config::{ComparisonParams, ConfigError};
    pub use crate::filter::SecondaryIndex;
    pub use crate::loader::{load_pair, load_text, LoadError};
    pub use crate::matcher::{match_primary_window, overlap_count, score_pair};
    pub use crate::models::{
        Alignment, AlignmentCollection, ComparisonResult, ComparisonSummary, Document,
        DocumentRole, Match, Token, Window, WindowKey,
    };
    pub use crate::normalize::{is_stop_word, normalize_document, Normalizer, Stage, STOP_WORDS};
    pub use crate::output::{
        format_best_alignments, format_report, print_alignments, print_summary, write_report,
        write_report_file, OutputError, ReportContext, ReportFormat,
    };
    pub use crate::rank::{
        display_cutoff, filter_by_secondary_matches, find_best_score, left_right_counts,
        rank_by_best_score,
    };
    pub use crate::window::{calculate_window_count, generate_windows, maximize_alignments};
}

// Re-export commonly used types at the crate root
pub use compare::compare_documents;
pub use config::ComparisonParams;
pub use models::{Alignment, AlignmentCollection, ComparisonResult, Match};
