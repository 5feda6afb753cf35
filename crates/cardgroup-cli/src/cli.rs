//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cardgroup",
    version,
    about = "Replay and inspect drag-and-drop card boards",
    long_about = "Drive the card grouping engine from the command line.\n\n\
                  Replays JSON message scripts against a board, prints the\n\
                  resulting groups and item analytics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Only rejected messages are logged by default; -v adds replay
    /// progress, -vv every board mutation, -vvv drag and membership
    /// events, -q keeps errors only.
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Color for board tables and log lines.
    #[command(flatten)]
    pub color: Color,

    /// Log level for the cardgroup crates; takes precedence over -v/-q.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log line layout; json emits one object per event.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append log lines to this file; tables still go to stdout.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with the time of the event.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Show which module emitted each log line.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Engine settings (TOML) for colors and default labels.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the Tasks/Ideas sample board and print it.
    Demo,

    /// Apply a message script to a board.
    Replay(ReplayArgs),

    /// Print analytics for a saved board.
    Stats(StatsArgs),
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// JSON array of board messages.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Starting board snapshot (JSON).
    #[arg(long = "board", value_name = "FILE", conflicts_with = "seed")]
    pub board: Option<PathBuf>,

    /// Starting per-group seed (JSON).
    #[arg(long = "seed", value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Use sequential ids and a fixed hue so output is reproducible.
    #[arg(long = "deterministic")]
    pub deterministic: bool,

    /// Write the resulting board snapshot to this file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Board snapshot (JSON).
    #[arg(value_name = "FILE")]
    pub board: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
