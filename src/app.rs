//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves configuration
//! - sets up logging
//! - runs the load -> evaluate pipeline
//! - hands the result to the selected renderer

use std::ffi::OsString;
use std::fs::File;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::domain::{LineMode, PlotConfig, RenderTarget};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the default input file.
pub const INPUT_ENV: &str = "FITPLOT_INPUT";
/// Environment variable holding a tracing filter for `--log` output.
pub const LOG_ENV: &str = "FITPLOT_LOG";
/// Input file used when neither the CLI nor the environment names one.
pub const DEFAULT_INPUT: &str = "data.txt";

/// Size of the ASCII fallback when the viewer has no terminal to draw on.
const FALLBACK_PLOT_SIZE: (usize, usize) = (100, 25);

/// Entry point for the `fitplot` binary.
pub fn run() -> Result<(), AppError> {
    // `fitplot` and `fitplot data.txt` should behave like `fitplot show ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    if let Some(path) = &cli.command.input_args().log {
        init_logging(path)?;
    }

    let config = plot_config_from_args(&cli.command)?;
    tracing::info!(input = %config.input.display(), target = ?config.target, "starting fitplot");

    let run = pipeline::run_pipeline(&config)?;

    if config.summary {
        eprint!(
            "{}",
            crate::report::format_run_summary(&run.data, &run.residuals)
        );
    }

    render(&config.target, &run)
}

fn render(target: &RenderTarget, run: &pipeline::RunOutput) -> Result<(), AppError> {
    let observations = &run.data.observations;
    let params = &run.data.params;

    match target {
        RenderTarget::Viewer => {
            if !std::io::stdout().is_terminal() {
                // No terminal to block on; print the plot and return.
                tracing::info!("stdout is not a terminal; printing ascii plot");
                let (width, height) = FALLBACK_PLOT_SIZE;
                let plot = crate::plot::render_ascii_plot(observations, &run.fitted, params, width, height)?;
                print!("{plot}");
                return Ok(());
            }
            let figure = crate::plot::chart::Figure::new(observations, &run.fitted, params)?;
            let status = format!(
                "{} observations | {}",
                observations.len(),
                params.equation_label()
            );
            crate::tui::run(&figure, status)
        }
        RenderTarget::Image { path, width, height } => {
            crate::plot::render_chart_file(path, *width, *height, observations, &run.fitted, params)
        }
        RenderTarget::Ascii { width, height } => {
            let plot = crate::plot::render_ascii_plot(observations, &run.fitted, params, *width, *height)?;
            print!("{plot}");
            Ok(())
        }
        RenderTarget::Export { path } => crate::io::export::write_fitted_csv(path, &run.residuals),
    }
}

/// Resolve CLI args plus environment into a `PlotConfig`.
pub fn plot_config_from_args(command: &Command) -> Result<PlotConfig, AppError> {
    let input_args = command.input_args();

    let input = match &input_args.input {
        Some(path) => path.clone(),
        None => {
            dotenvy::dotenv().ok();
            resolve_input(None, std::env::var_os(INPUT_ENV))
        }
    };

    let target = match command {
        Command::Show(_) => RenderTarget::Viewer,
        Command::Render(args) => {
            ensure_svg_path(&args.output)?;
            if args.width == 0 || args.height == 0 {
                return Err(AppError::input("Image width and height must be positive."));
            }
            RenderTarget::Image {
                path: args.output.clone(),
                width: args.width,
                height: args.height,
            }
        }
        Command::Ascii(args) => RenderTarget::Ascii {
            width: args.width,
            height: args.height,
        },
        Command::Export(args) => RenderTarget::Export {
            path: args.output.clone(),
        },
    };

    Ok(PlotConfig {
        input,
        line_mode: if input_args.strict {
            LineMode::Strict
        } else {
            LineMode::Skip
        },
        summary: input_args.summary,
        target,
    })
}

/// CLI path wins, then the environment value, then `data.txt`.
fn resolve_input(cli: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    cli.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

fn ensure_svg_path(path: &Path) -> Result<(), AppError> {
    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        Ok(())
    } else {
        Err(AppError::input(format!(
            "Unsupported output '{}': only .svg images are written.",
            path.display()
        )))
    }
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to open log file '{}': {e}", path.display())))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::render(format!("Failed to install logger: {e}")))?;
    Ok(())
}

/// Rewrite argv so `fitplot` defaults to `fitplot show`.
///
/// Rules:
/// - `fitplot`                      -> `fitplot show`
/// - `fitplot data.txt --strict`    -> `fitplot show data.txt --strict`
/// - `fitplot --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "render" | "ascii" | "export");
    if !is_subcommand {
        argv.insert(1, "show".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(rewrite_args(argv(args))).unwrap().command
    }

    #[test]
    fn rewrite_defaults_to_show() {
        assert_eq!(rewrite_args(argv(&["fitplot"])), argv(&["fitplot", "show"]));
        assert_eq!(
            rewrite_args(argv(&["fitplot", "points.txt"])),
            argv(&["fitplot", "show", "points.txt"])
        );
        assert_eq!(
            rewrite_args(argv(&["fitplot", "--strict"])),
            argv(&["fitplot", "show", "--strict"])
        );
        assert_eq!(rewrite_args(argv(&["fitplot", "--help"])), argv(&["fitplot", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["fitplot", "ascii", "a.txt"])),
            argv(&["fitplot", "ascii", "a.txt"])
        );
    }

    #[test]
    fn input_resolution_order() {
        assert_eq!(
            resolve_input(Some(PathBuf::from("cli.txt")), Some(OsString::from("env.txt"))),
            PathBuf::from("cli.txt")
        );
        assert_eq!(resolve_input(None, Some(OsString::from("env.txt"))), PathBuf::from("env.txt"));
        assert_eq!(resolve_input(None, Some(OsString::new())), PathBuf::from(DEFAULT_INPUT));
        assert_eq!(resolve_input(None, None), PathBuf::from(DEFAULT_INPUT));
    }

    #[test]
    fn config_from_render_args() {
        let config = plot_config_from_args(&parse(&["fitplot", "render", "in.txt", "-o", "fig.SVG", "--summary"])).unwrap();
        assert_eq!(config.input, PathBuf::from("in.txt"));
        assert_eq!(config.line_mode, LineMode::Skip);
        assert!(config.summary);
        assert_eq!(
            config.target,
            RenderTarget::Image {
                path: PathBuf::from("fig.SVG"),
                width: 1024,
                height: 768
            }
        );
    }

    #[test]
    fn config_rejects_non_svg_output() {
        let err = plot_config_from_args(&parse(&["fitplot", "render", "in.txt", "-o", "fig.png"])).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn config_strict_show() {
        let config = plot_config_from_args(&parse(&["fitplot", "in.txt", "--strict"])).unwrap();
        assert_eq!(config.line_mode, LineMode::Strict);
        assert_eq!(config.target, RenderTarget::Viewer);
    }
}
