//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contracts::OutputLayout;

/// ver2plt - streaming .ver to .plt mesh table converter
#[derive(Parser, Debug)]
#[command(
    name = "ver2plt",
    author,
    version,
    about = "Convert .ver mesh descriptions to tab-separated .plt tables",
    long_about = "A streaming converter for .ver mesh/geometry descriptions.\n\n\
                  Classifies each input line (coordinates, index triples, header,\n\
                  singleton markers) and routes it to the output file owning that\n\
                  category, shifting index triples from 1-based to 0-based on the way."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "VER2PLT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "VER2PLT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the conversion pipeline
    Convert(ConvertArgs),

    /// Classify the input without writing any output
    Inspect(InspectArgs),
}

/// Arguments for the `convert` command
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// Input .ver file
    pub input: PathBuf,

    /// Output layout: split coords/idxs files, or a combined header+coords
    /// file plus an idxs file
    #[arg(long, value_enum, default_value = "split", env = "VER2PLT_LAYOUT")]
    pub layout: LayoutArg,

    /// Directory for the derived .plt files (defaults to the input's
    /// directory)
    #[arg(long, env = "VER2PLT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Capacity of each sink's inbound queue
    #[arg(long, default_value = "100", env = "VER2PLT_QUEUE_CAPACITY")]
    pub queue_capacity: usize,
}

/// Arguments for the `inspect` command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Input .ver file
    pub input: PathBuf,

    /// Layout whose classification rules to apply (singleton anchoring
    /// differs between layouts)
    #[arg(long, value_enum, default_value = "split", env = "VER2PLT_LAYOUT")]
    pub layout: LayoutArg,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Output layout selection
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LayoutArg {
    /// coords-<base>.plt + idxs-<base>.plt
    #[default]
    Split,
    /// <base>.plt (header + coordinates) + idxs-<base>.plt
    Combined,
}

impl From<LayoutArg> for OutputLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Split => OutputLayout::Split,
            LayoutArg::Combined => OutputLayout::Combined,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
