//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use c64dreams_core::{Region, TargetDevice};

#[derive(Parser)]
#[command(name = "c64dreams")]
#[command(about = "Lay out the C64 Dreams collection for real hardware", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every pipeline stage. Unset values fall back to the
/// settings file, then to built-in defaults.
#[derive(Args, Clone, Debug)]
pub(crate) struct PipelineArgs {
    /// Path to the C64 Dreams directory
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Destination path for generated files
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Path to the spreadsheet CSV with metadata
    #[arg(long, global = true)]
    pub sheet: Option<PathBuf>,

    /// Target device: sd2iec, pi1541, kungfuflash, or ultimate
    #[arg(long, global = true)]
    pub target: Option<TargetDevice>,

    /// Maximum filename length; uses the target profile when zero
    #[arg(long, global = true)]
    pub max_name_len: Option<usize>,

    /// Region filter: pal, ntsc, or both
    #[arg(long, global = true)]
    pub region: Option<Region>,

    /// Grouping strategy; `letter` is the same as --group-alpha
    #[arg(long, global = true, value_enum)]
    pub group_by: Option<GroupBy>,

    /// Preview actions without writing files (pass `--dry-run false` to write)
    #[arg(
        long,
        global = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub dry_run: bool,

    /// Allow overwriting existing files when applying layout
    #[arg(long, global = true)]
    pub overwrite: bool,

    /// Group output by media type (disks/tape/cart)
    #[arg(long, global = true)]
    pub group_media: bool,

    /// Group output alphabetically
    #[arg(long, global = true)]
    pub group_alpha: bool,

    /// Alphabetical bucket size when grouping
    #[arg(long, global = true)]
    pub alpha_bucket_size: Option<usize>,

    /// Emit JSON output for automation
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum GroupBy {
    Letter,
    None,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load and echo metadata from the C64 Dreams spreadsheet
    Ingest,

    /// Normalize the collection's names for a hardware target
    Normalize,

    /// Scan the C64 Dreams directory and report contents
    Scan,

    /// Run ingest, normalize, collide, layout and apply
    Build {
        /// Only locate sources; report every copy as a skip
        #[arg(long)]
        verify_only: bool,
    },

    /// Show the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the settings file location and contents
    Show,

    /// Print the settings file path
    Path,
}
