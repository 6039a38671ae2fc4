//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Derive responsive width/format variants for images in an object store
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print per-variant details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: resizer.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "resizer.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Override the destination prefix (`output.prefix`)
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Restrict processing to these sections (`route.sections`), repeatable
    #[arg(long = "section", global = true, value_name = "SECTION")]
    pub sections: Vec<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Process a queue batch of storage notifications
    #[command(visible_alias = "p")]
    Process {
        /// Batch JSON file. Use `-` to read from stdin.
        #[arg(value_name = "BATCH", value_hint = clap::ValueHint::FilePath)]
        batch: PathBuf,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Show what would be written for a single object, without encoding
    #[command(visible_alias = "i")]
    Inspect {
        /// Bucket name
        bucket: String,

        /// Object key (already decoded)
        key: String,

        #[command(flatten)]
        store: StoreArgs,
    },
}

/// Object store selection shared by all commands.
#[derive(clap::Args, Debug, Clone)]
pub struct StoreArgs {
    /// Local store root; buckets are its subdirectories
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub store: PathBuf,
}

impl Cli {
    /// Read the batch from stdin.
    pub fn batch_from_stdin(batch: &std::path::Path) -> bool {
        batch.as_os_str() == "-"
    }
}
