use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pantry_lib::config::{DEFAULT_BIND_ADDR, DEFAULT_TOP_K};
use pantry_lib::context::PantryContext;

use crate::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(
    name = "pantry",
    about = "Recipe recommendations from a pre-trained nearest-neighbor index"
)]
pub struct Cli {
    /// Recipe dataset CSV (overrides `PANTRY_DATASET`).
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Similarity index artifact (overrides `PANTRY_INDEX`).
    #[arg(long, global = true)]
    pub index: Option<PathBuf>,

    /// Log line format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Layer the path flags over an environment-derived context.
    pub fn apply_overrides(&self, mut context: PantryContext) -> PantryContext {
        if let Some(path) = &self.dataset {
            context = context.with_dataset(path.clone());
        }
        if let Some(path) = &self.index {
            context = context.with_index(path.clone());
        }
        context
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer one request: read JSON from a file or stdin, print the response.
    Recommend {
        /// Request file; stdin is read when omitted.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Nearest neighbors retrieved before filtering.
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Serve `POST /recommend` over HTTP.
    Serve {
        /// Address to bind (host:port).
        #[arg(long, env = "PANTRY_BIND", default_value = DEFAULT_BIND_ADDR)]
        bind: String,
        /// Nearest neighbors retrieved before filtering.
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },

    /// Print the category-to-code mapping derived from the dataset.
    Categories,

    /// Print what was loaded: paths, sizes, metric and fingerprints.
    Info,
}
