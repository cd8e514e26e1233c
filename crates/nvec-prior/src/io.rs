//! Binary and textual (de)serialization of [`Prior`], bracketed by the
//! literal tokens `<OnlineNoisePrior>` / `</OnlineNoisePrior>`, fields in the
//! fixed order `mu_n, a, B, Lambda_n, Lambda_s`.

use crate::error::PriorError;
use crate::prior::Prior;
use nvec_base::{Matrix, Vector};
use std::io::{Read, Write};

const OPEN_TOKEN: &str = "<OnlineNoisePrior>";
const CLOSE_TOKEN: &str = "</OnlineNoisePrior>";

fn write_token(w: &mut impl Write, token: &str) -> Result<(), PriorError> {
    writeln!(w, "{token}").map_err(|e| PriorError::Io(e.to_string()))
}

fn expect_token(r: &mut impl Read, expected: &str) -> Result<(), PriorError> {
    let mut buf = Vec::with_capacity(expected.len() + 1);
    let mut byte = [0u8; 1];
    loop {
        let n = r.read(&mut byte).map_err(|e| PriorError::Io(e.to_string()))?;
        if n == 0 {
            return Err(PriorError::FormatError(format!(
                "expected token '{expected}', got EOF"
            )));
        }
        if byte[0] == b'\n' {
            break;
        }
        buf.push(byte[0]);
    }
    let got = String::from_utf8_lossy(&buf);
    if got.trim() != expected {
        return Err(PriorError::FormatError(format!(
            "expected token '{expected}', got '{}'",
            got.trim()
        )));
    }
    Ok(())
}

// --- binary payload ---

fn write_u32(w: &mut impl Write, v: u32) -> Result<(), PriorError> {
    w.write_all(&v.to_le_bytes()).map_err(|e| PriorError::Io(e.to_string()))
}

fn read_u32(r: &mut impl Read) -> Result<u32, PriorError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(|e| PriorError::Io(e.to_string()))?;
    Ok(u32::from_le_bytes(buf))
}

fn write_f64_slice(w: &mut impl Write, data: &[f64]) -> Result<(), PriorError> {
    for v in data {
        w.write_all(&v.to_le_bytes()).map_err(|e| PriorError::Io(e.to_string()))?;
    }
    Ok(())
}

fn read_f64_vec(r: &mut impl Read, n: usize) -> Result<Vec<f64>, PriorError> {
    let mut out = Vec::with_capacity(n);
    let mut buf = [0u8; 8];
    for _ in 0..n {
        r.read_exact(&mut buf).map_err(|e| PriorError::Io(e.to_string()))?;
        out.push(f64::from_le_bytes(buf));
    }
    Ok(out)
}

fn write_vector_binary(w: &mut impl Write, v: &Vector) -> Result<(), PriorError> {
    write_u32(w, v.dim() as u32)?;
    write_f64_slice(w, v.as_slice())
}

fn read_vector_binary(r: &mut impl Read) -> Result<Vector, PriorError> {
    let dim = read_u32(r)? as usize;
    Ok(Vector::from_vec(read_f64_vec(r, dim)?))
}

fn write_matrix_binary(w: &mut impl Write, m: &Matrix) -> Result<(), PriorError> {
    write_u32(w, m.rows() as u32)?;
    write_u32(w, m.cols() as u32)?;
    write_f64_slice(w, m.as_slice())
}

fn read_matrix_binary(r: &mut impl Read) -> Result<Matrix, PriorError> {
    let rows = read_u32(r)? as usize;
    let cols = read_u32(r)? as usize;
    let data = read_f64_vec(r, rows * cols)?;
    let mut rows_vec = Vec::with_capacity(rows);
    for i in 0..rows {
        rows_vec.push(data[i * cols..(i + 1) * cols].to_vec());
    }
    Ok(if rows == 0 { Matrix::zeros(0, cols) } else { Matrix::from_rows(rows_vec) })
}

pub fn write_binary(w: &mut impl Write, prior: &Prior) -> Result<(), PriorError> {
    write_token(w, OPEN_TOKEN)?;
    write_vector_binary(w, &prior.mu_n)?;
    write_vector_binary(w, &prior.a)?;
    write_matrix_binary(w, &prior.b)?;
    write_matrix_binary(w, &prior.lambda_n)?;
    write_matrix_binary(w, &prior.lambda_s)?;
    write_token(w, CLOSE_TOKEN)
}

pub fn read_binary(r: &mut impl Read) -> Result<Prior, PriorError> {
    expect_token(r, OPEN_TOKEN)?;
    let mu_n = read_vector_binary(r)?;
    let a = read_vector_binary(r)?;
    let b = read_matrix_binary(r)?;
    let lambda_n = read_matrix_binary(r)?;
    let lambda_s = read_matrix_binary(r)?;
    expect_token(r, CLOSE_TOKEN)?;
    Ok(Prior { mu_n, a, b, lambda_n, lambda_s, r_n: 1.0, r_s: 1.0 })
}

// --- textual payload ---

fn write_vector_text(w: &mut impl Write, v: &Vector) -> Result<(), PriorError> {
    write!(w, "[").map_err(|e| PriorError::Io(e.to_string()))?;
    for x in v.as_slice() {
        write!(w, " {x}").map_err(|e| PriorError::Io(e.to_string()))?;
    }
    writeln!(w, " ]").map_err(|e| PriorError::Io(e.to_string()))
}

fn write_matrix_text(w: &mut impl Write, m: &Matrix) -> Result<(), PriorError> {
    writeln!(w, "[").map_err(|e| PriorError::Io(e.to_string()))?;
    for r in 0..m.rows() {
        for x in m.row(r) {
            write!(w, " {x}").map_err(|e| PriorError::Io(e.to_string()))?;
        }
        writeln!(w).map_err(|e| PriorError::Io(e.to_string()))?;
    }
    writeln!(w, "]").map_err(|e| PriorError::Io(e.to_string()))
}

fn read_line(r: &mut impl Read) -> Result<String, PriorError> {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        let n = r.read(&mut byte).map_err(|e| PriorError::Io(e.to_string()))?;
        if n == 0 {
            if buf.is_empty() {
                return Err(PriorError::FormatError("unexpected EOF".to_string()));
            }
            break;
        }
        if byte[0] == b'\n' {
            break;
        }
        buf.push(byte[0]);
    }
    String::from_utf8(buf).map_err(|e| PriorError::FormatError(e.to_string()))
}

fn parse_floats(line: &str) -> Result<Vec<f64>, PriorError> {
    line.split_whitespace()
        .filter(|tok| *tok != "[" && *tok != "]")
        .map(|tok| tok.parse::<f64>().map_err(|e| PriorError::FormatError(e.to_string())))
        .collect()
}

fn read_vector_text(r: &mut impl Read) -> Result<Vector, PriorError> {
    let line = read_line(r)?;
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| PriorError::FormatError(format!("malformed vector line: '{trimmed}'")))?;
    Ok(Vector::from_vec(parse_floats(inner)?))
}

fn read_matrix_text(r: &mut impl Read) -> Result<Matrix, PriorError> {
    let open = read_line(r)?;
    if open.trim() != "[" {
        return Err(PriorError::FormatError(format!("expected matrix start '[', got '{}'", open.trim())));
    }
    let mut rows = Vec::new();
    loop {
        let line = read_line(r)?;
        let trimmed = line.trim();
        if trimmed == "]" {
            break;
        }
        rows.push(parse_floats(trimmed)?);
    }
    if rows.is_empty() {
        return Ok(Matrix::zeros(0, 0));
    }
    Ok(Matrix::from_rows(rows))
}

pub fn write_text(w: &mut impl Write, prior: &Prior) -> Result<(), PriorError> {
    write_token(w, OPEN_TOKEN)?;
    write_vector_text(w, &prior.mu_n)?;
    write_vector_text(w, &prior.a)?;
    write_matrix_text(w, &prior.b)?;
    write_matrix_text(w, &prior.lambda_n)?;
    write_matrix_text(w, &prior.lambda_s)?;
    write_token(w, CLOSE_TOKEN)
}

pub fn read_text(r: &mut impl Read) -> Result<Prior, PriorError> {
    expect_token(r, OPEN_TOKEN)?;
    let mu_n = read_vector_text(r)?;
    let a = read_vector_text(r)?;
    let b = read_matrix_text(r)?;
    let lambda_n = read_matrix_text(r)?;
    let lambda_s = read_matrix_text(r)?;
    expect_token(r, CLOSE_TOKEN)?;
    Ok(Prior { mu_n, a, b, lambda_n, lambda_s, r_n: 1.0, r_s: 1.0 })
}
