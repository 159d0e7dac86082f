//! Command-line parsing for the fit plotter.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! loading and rendering. `app` resolves these args into a `PlotConfig`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "fitplot",
    version,
    about = "Plot x,y observations with a precomputed linear fit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the figure in a terminal viewer and wait until it is closed (default).
    Show(ShowArgs),
    /// Write the figure to an SVG file.
    Render(RenderArgs),
    /// Print a fixed-size ASCII plot to stdout.
    Ascii(AsciiArgs),
    /// Write observations with fitted values and residuals to CSV.
    Export(ExportArgs),
}

impl Command {
    pub fn input_args(&self) -> &InputArgs {
        match self {
            Command::Show(args) => &args.input,
            Command::Render(args) => &args.input,
            Command::Ascii(args) => &args.input,
            Command::Export(args) => &args.input,
        }
    }
}

/// Options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Input file: `x,y` lines followed by one `slope,intercept` line.
    ///
    /// Defaults to `$FITPLOT_INPUT` (also read from `.env`), else `data.txt`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Fail on data lines that are not exactly `x,y` instead of skipping them.
    #[arg(long)]
    pub strict: bool,

    /// Print a run summary (counts, line, RMSE) to stderr.
    #[arg(long)]
    pub summary: bool,

    /// Write debug logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output SVG path.
    #[arg(short = 'o', long, value_name = "SVG")]
    pub output: PathBuf,

    /// Image width (pixels).
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Image height (pixels).
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

#[derive(Debug, Args, Clone)]
pub struct AsciiArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,
}
