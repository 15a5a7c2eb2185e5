//! Intertext Finder command line
//!
//! Finds shared and paraphrased phrases between two text files.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use intertext_finder::compare::compare_documents_with_progress;
use intertext_finder::config::ComparisonParams;
use intertext_finder::loader::{load_pair, load_text};
use intertext_finder::models::DocumentRole;
use intertext_finder::normalize::{Normalizer, STOP_WORDS};
use intertext_finder::output::{
    print_alignments, print_summary, write_report, write_report_file, ReportContext, ReportFormat,
};

#[derive(Parser)]
#[command(name = "intertext-finder")]
#[command(about = "Find shared and paraphrased phrases between two texts")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress logging and summaries
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for the report (CLI version, mirrors output::ReportFormat)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliFormat {
    /// Settings, counts and excerpts as plain text
    Text,
    /// JSON document with excerpts and offsets
    Json,
    /// One CSV row per shown match
    Csv,
}

impl From<CliFormat> for ReportFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => ReportFormat::Text,
            CliFormat::Json => ReportFormat::Json,
            CliFormat::Csv => ReportFormat::Csv,
        }
    }
}

/// Parameter flags. Each is optional so an unset flag keeps the value from
/// the config file, or the library default when there is none.
#[derive(clap::Args, Debug, Default)]
struct ParamArgs {
    /// TOML file with comparison parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compare case-sensitively [default: false]
    #[arg(long, action = clap::ArgAction::Set)]
    match_case: Option<bool>,

    /// Require shared tokens in the same order [default: true]
    #[arg(long, action = clap::ArgAction::Set)]
    strict_search: Option<bool>,

    /// Stem tokens before comparing [default: true]
    #[arg(long, action = clap::ArgAction::Set)]
    use_porter_stemmer: Option<bool>,

    /// Exclude function words from scoring [default: true]
    #[arg(long, action = clap::ArgAction::Set)]
    use_stop_words: Option<bool>,

    /// Shared tokens needed per window [default: 1]
    #[arg(long)]
    minimum_matches: Option<usize>,

    /// Significant tokens per window [default: 1]
    #[arg(long)]
    window_size: Option<usize>,

    /// Greedily extend matched primary windows [default: false]
    #[arg(long, action = clap::ArgAction::Set)]
    maximize_primary_window_size: Option<bool>,

    /// Matches a primary window needs to be reported [default: 1]
    #[arg(long)]
    minimum_secondary_matches: Option<usize>,

    /// Only show matches at the best score [default: true]
    #[arg(long, action = clap::ArgAction::Set)]
    print_best_only: Option<bool>,

    /// Skip the inverted index and score every window pair
    #[arg(long)]
    brute_force: bool,
}

impl ParamArgs {
    fn resolve(&self) -> Result<ComparisonParams, Box<dyn std::error::Error>> {
        // Start with the config file or library defaults
        let base = match &self.config {
            Some(path) => ComparisonParams::from_toml_file(path)?,
            None => ComparisonParams::default(),
        };

        Ok(ComparisonParams {
            match_case: self.match_case.unwrap_or(base.match_case),
            strict_search: self.strict_search.unwrap_or(base.strict_search),
            use_porter_stemmer: self.use_porter_stemmer.unwrap_or(base.use_porter_stemmer),
            use_stop_words: self.use_stop_words.unwrap_or(base.use_stop_words),
            minimum_matches: self.minimum_matches.unwrap_or(base.minimum_matches),
            window_size: self.window_size.unwrap_or(base.window_size),
            maximize_primary_window_size: self
                .maximize_primary_window_size
                .unwrap_or(base.maximize_primary_window_size),
            minimum_secondary_matches: self
                .minimum_secondary_matches
                .unwrap_or(base.minimum_secondary_matches),
            print_best_only: self.print_best_only.unwrap_or(base.print_best_only),
            brute_force: self.brute_force || base.brute_force,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a primary and a secondary text
    Compare {
        /// Primary text file
        #[arg(long)]
        primary: PathBuf,

        /// Secondary text file
        #[arg(long)]
        secondary: PathBuf,

        /// Report file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value = "text")]
        format: CliFormat,

        #[command(flatten)]
        params: ParamArgs,

        /// Show a progress bar while matching
        #[arg(long)]
        progress: bool,

        /// Print the N best alignments to the console
        #[arg(long)]
        show: Option<usize>,
    },

    /// Print the normalized token stream of a file
    Tokens {
        /// Text file
        #[arg(long)]
        input: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// List the stop words
    Stopwords,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Compare {
            primary,
            secondary,
            output,
            format,
            params,
            progress,
            show,
        } => {
            let params = params.resolve()?;
            log::debug!("Parameters: {:?}", params);

            let (primary_text, secondary_text) = load_pair(&primary, &secondary)?;

            let start = Instant::now();
            let result = compare_documents_with_progress(
                &primary_text,
                &secondary_text,
                &params,
                progress && !cli.quiet,
            )?;
            let elapsed = start.elapsed();

            let context = ReportContext {
                primary_source: primary.display().to_string(),
                secondary_source: secondary.display().to_string(),
                elapsed: Some(elapsed),
            };

            match &output {
                Some(path) => {
                    write_report_file(&result, &context, format.into(), path)?;
                    if !cli.quiet {
                        print_summary(&result);
                        eprintln!("\nOutput: {}", path.display());
                    }
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut handle = stdout.lock();
                    write_report(&result, &context, format.into(), &mut handle)?;
                }
            }

            if let Some(limit) = show {
                println!("\n=== Best Alignments ===");
                print_alignments(&result, Some(limit));
            }
        }

        Commands::Tokens { input, params } => {
            let params = params.resolve()?;
            let text = load_text(&input)?;
            let document = Normalizer::from_params(&params).normalize(DocumentRole::Primary, &text);

            for (idx, token) in document.tokens().iter().enumerate() {
                println!(
                    "{}\t{}..{}\t{}\t{}{}",
                    idx,
                    token.start,
                    token.end,
                    token.surface,
                    token.normalized,
                    if token.significant { "" } else { "\t(stop)" }
                );
            }
        }

        Commands::Stopwords => {
            for word in STOP_WORDS {
                println!("{}", word);
            }
        }
    }

    Ok(())
}

/// Initialize env_logger from the verbosity flag; RUST_LOG still wins.
fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
