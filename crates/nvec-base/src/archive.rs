//! A minimal stand-in for Kaldi's `scp:`/`ark:` table I/O, used only by this
//! workspace's two CLI binaries so they're runnable end to end without an
//! external archive library. Not a reimplementation of Kaldi's table
//! format — just a sequential, whitespace-delimited keyed-matrix format:
//!
//! ```text
//! <utterance-key>
//! <rows> <cols>
//! <row 0 values, whitespace-separated>
//! ...
//! <row rows-1 values>
//! ```
//!
//! repeated per utterance. A vector is written/read as a one-row matrix.

use crate::matrix::Matrix;
use std::fmt;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub enum ArchiveError {
    Io(std::io::Error),
    Malformed(String),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::Io(e) => write!(f, "archive I/O error: {e}"),
            ArchiveError::Malformed(msg) => write!(f, "malformed archive entry: {msg}"),
        }
    }
}

impl std::error::Error for ArchiveError {}

impl From<std::io::Error> for ArchiveError {
    fn from(e: std::io::Error) -> Self {
        ArchiveError::Io(e)
    }
}

/// Reads one `(key, matrix)` entry, or `Ok(None)` at a clean end of input
/// (no key line present before EOF).
pub fn read_entry(r: &mut impl BufRead) -> Result<Option<(String, Matrix)>, ArchiveError> {
    let mut key_line = String::new();
    let n = r.read_line(&mut key_line)?;
    if n == 0 {
        return Ok(None);
    }
    let key = key_line.trim().to_string();
    if key.is_empty() {
        return Ok(None);
    }

    let mut dims_line = String::new();
    if r.read_line(&mut dims_line)? == 0 {
        return Err(ArchiveError::Malformed(format!("{key}: missing dimensions line")));
    }
    let mut dims = dims_line.split_whitespace();
    let rows: usize = dims
        .next()
        .ok_or_else(|| ArchiveError::Malformed(format!("{key}: missing row count")))?
        .parse()
        .map_err(|_| ArchiveError::Malformed(format!("{key}: non-numeric row count")))?;
    let cols: usize = dims
        .next()
        .ok_or_else(|| ArchiveError::Malformed(format!("{key}: missing column count")))?
        .parse()
        .map_err(|_| ArchiveError::Malformed(format!("{key}: non-numeric column count")))?;

    let mut data = Vec::with_capacity(rows * cols);
    for row_idx in 0..rows {
        let mut row_line = String::new();
        if r.read_line(&mut row_line)? == 0 {
            return Err(ArchiveError::Malformed(format!("{key}: missing row {row_idx}")));
        }
        let values: Result<Vec<f64>, _> = row_line.split_whitespace().map(|t| t.parse::<f64>()).collect();
        let values = values.map_err(|_| ArchiveError::Malformed(format!("{key}: non-numeric value in row {row_idx}")))?;
        if values.len() != cols {
            return Err(ArchiveError::Malformed(format!(
                "{key}: row {row_idx} has {} values, expected {cols}",
                values.len()
            )));
        }
        data.extend(values);
    }

    let mut matrix = Matrix::zeros(rows, cols);
    for r_idx in 0..rows {
        for c_idx in 0..cols {
            matrix.set(r_idx, c_idx, data[r_idx * cols + c_idx]);
        }
    }
    Ok(Some((key, matrix)))
}

/// Reads every entry in the stream into a `Vec`.
pub fn read_all(r: &mut impl BufRead) -> Result<Vec<(String, Matrix)>, ArchiveError> {
    let mut out = Vec::new();
    while let Some(entry) = read_entry(r)? {
        out.push(entry);
    }
    Ok(out)
}

pub fn write_entry(w: &mut impl Write, key: &str, matrix: &Matrix) -> Result<(), ArchiveError> {
    writeln!(w, "{key}")?;
    writeln!(w, "{} {}", matrix.rows(), matrix.cols())?;
    for r in 0..matrix.rows() {
        let row = matrix.row(r);
        let rendered: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(w, "{}", rendered.join(" "))?;
    }
    Ok(())
}
