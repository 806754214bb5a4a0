use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "deck-quota")]
#[command(about = "Tally card tags and build quota-constrained decks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build an attribute table from a card list
    Build {
        /// File with card names, one per line
        #[arg(long)]
        cards: PathBuf,

        /// File with target tags, one per line
        #[arg(long)]
        tags: PathBuf,

        /// File with target types (e.g. creature, artifact), one per line
        #[arg(long)]
        types: PathBuf,

        /// JSON card catalog to resolve names against
        #[arg(long)]
        catalog: PathBuf,

        /// Cache file (created if missing)
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Milliseconds to wait after a card that missed the cache
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        /// Output file (.json or .tsv); TSV on stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count how many cards have each attribute
    Count {
        /// Table file (.json or .tsv)
        #[arg(long)]
        table: PathBuf,

        /// Attributes to count (default: every column)
        #[arg(long = "attr")]
        attrs: Vec<String>,
    },

    /// Select a deck that satisfies a rule file
    Select {
        /// Table file (.json or .tsv)
        #[arg(long)]
        table: PathBuf,

        /// JSON rule file
        #[arg(long)]
        rules: PathBuf,

        /// Reorder the table with this seed before selecting
        #[arg(long)]
        shuffle: Option<u64>,

        /// Print the decision for every scanned card
        #[arg(long)]
        trace: bool,

        /// Print the full result as JSON
        #[arg(long, conflicts_with = "trace")]
        json: bool,
    },
}
