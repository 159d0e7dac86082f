//! Input file ingest.
//!
//! The input is a flat text file:
//!
//! ```text
//! x0,y0
//! x1,y1
//! ...
//! slope,intercept
//! ```
//!
//! Every line except the last is a candidate observation. Lines that do not
//! split into exactly two comma-separated tokens are skipped (or rejected in
//! strict mode). The last line always holds the fit parameters.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{FitParameters, LineMode, LoadedData, Observation, SkippedLine};

/// Failures while loading an input file. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open input '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is empty: expected data lines followed by a `slope,intercept` line")]
    Empty,

    #[error("Line {line}: invalid number '{token}' ({source})")]
    Parse {
        line: usize,
        token: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Line {line}: expected `x,y`, found {tokens} token(s) in '{content}'")]
    MalformedLine {
        line: usize,
        tokens: usize,
        content: String,
    },

    #[error("Line {line}: expected `slope,intercept`, found '{content}'")]
    MissingParameter { line: usize, content: String },
}

/// Load observations and fit parameters from `path`.
pub fn load_dataset(path: &Path, mode: LineMode) -> Result<LoadedData, LoadError> {
    let text = {
        let mut file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut text = String::new();
        file.read_to_string(&mut text).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        text
    };

    let mut data = parse_dataset(&text, mode)?;
    data.source = path.to_path_buf();

    tracing::info!(
        input = %path.display(),
        lines = data.lines_read,
        observations = data.observations.len(),
        skipped = data.skipped.len(),
        "loaded input"
    );

    Ok(data)
}

/// Parse already-read input text. `source` on the result is left empty.
pub fn parse_dataset(text: &str, mode: LineMode) -> Result<LoadedData, LoadError> {
    // `\n`, `\r\n` and a bare `\r` all end a line.
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = text.lines().collect();
    let Some((last, data_lines)) = lines.split_last() else {
        return Err(LoadError::Empty);
    };

    let mut observations = Vec::with_capacity(data_lines.len());
    let mut skipped = Vec::new();

    for (idx, raw) in data_lines.iter().enumerate() {
        let line = idx + 1;
        let tokens: Vec<&str> = raw.trim().split(',').collect();

        if let [x, y] = tokens.as_slice() {
            observations.push(Observation::new(parse_token(x, line)?, parse_token(y, line)?));
            continue;
        }

        match mode {
            LineMode::Skip => {
                tracing::debug!(line, tokens = tokens.len(), content = *raw, "skipping data line");
                skipped.push(SkippedLine {
                    line,
                    content: raw.to_string(),
                });
            }
            LineMode::Strict => {
                return Err(LoadError::MalformedLine {
                    line,
                    tokens: tokens.len(),
                    content: raw.to_string(),
                });
            }
        }
    }

    let params = parse_parameters(last, lines.len())?;

    Ok(LoadedData {
        source: PathBuf::new(),
        observations,
        params,
        skipped,
        lines_read: lines.len(),
    })
}

/// The parameter line is only required to carry two leading numeric tokens;
/// anything after the second comma is ignored.
fn parse_parameters(raw: &str, line: usize) -> Result<FitParameters, LoadError> {
    let mut tokens = raw.trim().split(',');
    let slope = parse_token(tokens.next().unwrap_or_default(), line)?;
    let intercept = tokens.next().ok_or_else(|| LoadError::MissingParameter {
        line,
        content: raw.to_string(),
    })?;

    Ok(FitParameters::new(slope, parse_token(intercept, line)?))
}

fn parse_token(token: &str, line: usize) -> Result<f64, LoadError> {
    let token = token.trim();
    token.parse::<f64>().map_err(|source| LoadError::Parse {
        line,
        token: token.to_string(),
        source,
    })
}
