// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dataset file loading
//!
//! Rows are `;`-separated: `id;<ignored>;password hash;gene sequence`.
//! Fields may be double-quoted. A row whose first column is `ID` is a
//! header. Blank lines are skipped.

use csv::{ReaderBuilder, StringRecord, Trim};
use shoal_core::{Dataset, DatasetError, RecordId};
use std::path::Path;
use thiserror::Error;

const DELIMITER: u8 = b';';
const HASH_COLUMN: usize = 2;
const GENE_COLUMN: usize = 3;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Csv { line: usize, source: csv::Error },
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    MissingColumn {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid record id {value:?}")]
    BadId { line: usize, value: String },
    #[error("invalid dataset: {0}")]
    Invalid(#[from] DatasetError),
}

/// Read and validate a dataset file
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = parse(&text)?;
    tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// Parse dataset text
pub fn parse(text: &str) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|source| LoadError::Csv {
            line: source
                .position()
                .map_or(index + 1, |p| p.line() as usize),
            source,
        })?;
        let line = line_of(&row, index);
        let first = row.get(0).unwrap_or_default();
        if row.iter().all(str::is_empty) || first.eq_ignore_ascii_case("ID") {
            continue;
        }
        let (Some(hash), Some(gene)) = (row.get(HASH_COLUMN), row.get(GENE_COLUMN)) else {
            return Err(LoadError::MissingColumn {
                line,
                expected: GENE_COLUMN + 1,
                found: row.len(),
            });
        };
        let id: RecordId = first.parse().map_err(|_| LoadError::BadId {
            line,
            value: first.to_string(),
        })?;
        records.push((id, hash.to_string(), gene.to_string()));
    }
    Ok(Dataset::from_records(records)?)
}

/// One-based source line of a record
fn line_of(row: &StringRecord, index: usize) -> usize {
    row.position().map_or(index + 1, |p| p.line() as usize)
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
