use clap::{Parser, Subcommand};
use moodtrip_core::Mood;
use moodtrip_lexicon::AcceptancePolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodtrip")]
#[command(author, version, about = "Lexicon-based mood inference and trip recommendation")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "moodtrip.yaml", global = true)]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a word lexicon from a labeled emotion corpus
    BuildLexicon {
        /// Corpus TSV file (repeatable; replaces configured inputs)
        #[arg(short, long)]
        input: Vec<PathBuf>,

        /// Output lexicon file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Acceptance preset: permissive, balanced or strict
        #[arg(long, value_parser = parse_policy)]
        policy: Option<AcceptancePolicy>,

        /// Minimum dominant-category count (overrides preset)
        #[arg(long)]
        min_count: Option<u32>,

        /// Minimum dominant-category share, exclusive (overrides preset)
        #[arg(long)]
        min_ratio: Option<f64>,

        /// Write words by descending confidence
        #[arg(long)]
        sort: bool,
    },

    /// Download the GoEmotions corpus splits
    FetchCorpus {
        /// Target directory
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,

        /// Re-download splits that already exist
        #[arg(long)]
        force: bool,
    },

    /// Infer mood and VAD for text (reads stdin when no text is given)
    Analyze {
        text: Option<String>,

        /// Include matched tokens and centroid distances
        #[arg(long)]
        explain: bool,
    },

    /// Infer mood and list matching trips
    Recommend {
        text: Option<String>,

        /// User the inference is recorded for
        #[arg(short, long)]
        user: Option<String>,

        /// Maximum trips to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show stored inferences
    History {
        /// Only this mood
        #[arg(short, long, value_parser = parse_mood)]
        mood: Option<Mood>,

        /// Only this user
        #[arg(short, long)]
        user: Option<String>,

        /// Maximum records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Print per-mood counts instead of records
        #[arg(long)]
        tally: bool,
    },
}

fn parse_policy(s: &str) -> Result<AcceptancePolicy, String> {
    AcceptancePolicy::preset(s)
        .ok_or_else(|| format!("unknown policy '{}' (expected permissive, balanced or strict)", s))
}

fn parse_mood(s: &str) -> Result<Mood, String> {
    s.parse()
}
