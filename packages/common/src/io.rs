//! File-or-stdio input and output
//!
//! A path of `None` (or `-`) means standard input / standard output. Input is
//! always read in full; there is no streaming.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;
use serde::Serialize;

/// Result type for input/output helpers
pub type IoResult<T> = Result<T, IoError>;

/// Failure to read input or write output
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Reading a file or stdin failed
    #[error("unable to read input {source_name}: {source}")]
    Read {
        /// File path, or `<stdin>`
        source_name: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// Writing a file or stdout failed
    #[error("unable to write output {target}: {source}")]
    Write {
        /// File path, or `<stdout>`
        target: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The value could not be rendered as JSON
    #[error("failed to generate JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

/// Whether `path` designates standard input / standard output
pub fn is_stdio(path: Option<&Path>) -> bool {
    file_path(path).is_none()
}

/// Read the whole file at `path`, or all of stdin when `path` is `None`.
pub fn read_input(path: Option<&Path>) -> IoResult<Vec<u8>> {
    match file_path(path) {
        Some(path) => {
            let bytes = fs::read(path).map_err(|source| IoError::Read {
                source_name: path.display().to_string(),
                source,
            })?;
            debug!("read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .map_err(|source| IoError::Read {
                    source_name: "<stdin>".to_string(),
                    source,
                })?;
            debug!("read {} bytes from stdin", bytes.len());
            Ok(bytes)
        }
    }
}

/// Write `data` to the file at `path` (replacing it), or to stdout.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> IoResult<()> {
    match file_path(path) {
        Some(path) => fs::write(path, data).map_err(|source| IoError::Write {
            target: path.display().to_string(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|()| stdout.flush())
                .map_err(|source| IoError::Write {
                    target: "<stdout>".to_string(),
                    source,
                })
        }
    }
}

/// Write `line` and a newline to stdout.
pub fn print_line(line: &str) -> IoResult<()> {
    write_output(None, format!("{line}\n").as_bytes())
}

/// Write `value` as two-space indented JSON (no trailing newline).
pub fn write_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> IoResult<()> {
    let json = serde_json::to_vec_pretty(value)?;
    write_output(path, &json)
}
