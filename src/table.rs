//! CSV loading and writing for review tables.
//!
//! This module provides the table loader (with column type inference and
//! byte-size capture) and the table writer, both built on the `csv` crate
//! with matching conventions so a load/save cycle round-trips.

use crate::error::{ReviewLensError, Result};
use crate::models::{LoadMetadata, ReviewTable, Value};
use csv::{ReaderBuilder, Writer};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Load a delimited file into a [`ReviewTable`], recording its byte size.
///
/// The first row is the header. Column types are inferred from content:
/// a column becomes numeric when every non-empty cell parses as a float,
/// otherwise it stays text. Empty cells become [`Value::Missing`].
///
/// # Errors
///
/// Returns [`ReviewLensError::Load`] when the path does not exist, is not
/// readable, or the content is not valid delimited text (including rows
/// with inconsistent column counts).
pub fn load_table(path: &Path) -> Result<(ReviewTable, LoadMetadata)> {
    let raw = std::fs::read(path)
        .map_err(|e| ReviewLensError::Load(format!("cannot read {}: {e}", path.display())))?;
    let original_byte_size = raw.len() as u64;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(raw.as_slice());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReviewLensError::Load(format!("invalid header row: {e}")))?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| ReviewLensError::Load(format!("malformed record: {e}")))?;
        raw_rows.push(record.iter().map(ToString::to_string).collect());
    }

    let numeric = infer_numeric_columns(headers.len(), &raw_rows);

    let rows: Vec<Vec<Value>> = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(col, field)| parse_cell(&field, numeric[col]))
                .collect()
        })
        .collect();

    let table = ReviewTable { headers, rows };
    let metadata = LoadMetadata {
        original_byte_size,
        row_count: table.row_count(),
        column_count: table.headers.len(),
    };

    Ok((table, metadata))
}

/// Write a table to a delimited file using the loader's conventions.
///
/// # Errors
///
/// Returns [`ReviewLensError::Write`] when the destination cannot be created
/// or written.
pub fn write_table(table: &ReviewTable, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| ReviewLensError::Write(format!("cannot create {}: {e}", path.display())))?;
    let mut writer = Writer::from_writer(BufWriter::new(file));

    write_records(table, &mut writer)?;
    writer
        .flush()
        .map_err(|e| ReviewLensError::Write(format!("flush failed: {e}")))?;
    Ok(())
}

/// Re-encode a table as delimited text in memory.
///
/// Used by the size-reduction computation, which compares this byte length
/// against the original file size.
pub fn serialize_table(table: &ReviewTable) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    write_records(table, &mut writer)?;
    writer
        .into_inner()
        .map_err(|e| ReviewLensError::Write(format!("serialization failed: {e}")))
}

fn write_records<W: std::io::Write>(table: &ReviewTable, writer: &mut Writer<W>) -> Result<()> {
    writer
        .write_record(&table.headers)
        .map_err(|e| ReviewLensError::Write(format!("header write failed: {e}")))?;

    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(Value::to_field).collect();
        writer
            .write_record(&fields)
            .map_err(|e| ReviewLensError::Write(format!("record write failed: {e}")))?;
    }
    Ok(())
}

/// Decide per column whether every non-empty cell parses as a number
fn infer_numeric_columns(column_count: usize, rows: &[Vec<String>]) -> Vec<bool> {
    let mut numeric = vec![true; column_count];
    let mut seen_value = vec![false; column_count];

    for row in rows {
        for (col, field) in row.iter().enumerate() {
            let trimmed = field.trim();
            if trimmed.is_empty() {
                continue;
            }
            seen_value[col] = true;
            if trimmed.parse::<f64>().is_err() {
                numeric[col] = false;
            }
        }
    }

    // Columns with no values at all stay text-typed
    for col in 0..column_count {
        if !seen_value[col] {
            numeric[col] = false;
        }
    }

    numeric
}

fn parse_cell(field: &str, numeric: bool) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    if numeric {
        match trimmed.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(field.to_string()),
        }
    } else {
        Value::Text(field.to_string())
    }
}
