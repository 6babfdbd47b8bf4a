//! Readers for the codon and enzyme databases.
//!
//! Both databases are plain text, one entry per line, fields separated by
//! whitespace. Blank lines are skipped.
//!
//! ## Codon database
//!
//! ```text
//! TTT F
//! TTC F
//! TTA L
//! ```
//!
//! ## Enzyme database
//!
//! The recognition sequence comes first; the rest of the line is the name.
//!
//! ```text
//! GAATTC EcoRI
//! GGATCC BamHI
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::genetic_code::{CodonTable, CodonTableError};

/// Errors that can occur while reading a database.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to read database: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Line {line}: expected two whitespace-separated fields, got '{content}'")]
    MissingField { line: usize, content: String },

    #[error("Codon table error: {0}")]
    CodonTable(#[from] CodonTableError),
}

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Splits each non-blank line into its first field and the remainder.
fn read_pairs<R: BufRead>(reader: R) -> DatabaseResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(char::is_whitespace) {
            Some((first, rest)) if !rest.trim().is_empty() => {
                pairs.push((first.to_string(), rest.trim().to_string()));
            }
            _ => {
                return Err(DatabaseError::MissingField {
                    line: idx + 1,
                    content: line.to_string(),
                })
            }
        }
    }
    Ok(pairs)
}

/// Parses a codon database into a codon table.
///
/// A malformed row aborts the whole load.
pub fn parse_codon_table<R: BufRead>(reader: R) -> DatabaseResult<CodonTable> {
    let pairs = read_pairs(reader)?;
    Ok(CodonTable::load(pairs)?)
}

/// Parses an enzyme database into `(recognition sequence, name)` pairs.
///
/// Recognition sequences are not validated here; invalid ones are skipped
/// when the motif index is built.
pub fn parse_enzymes<R: BufRead>(reader: R) -> DatabaseResult<Vec<(String, String)>> {
    read_pairs(reader)
}

/// Reads a codon database file.
pub fn read_codon_table<P: AsRef<Path>>(path: P) -> DatabaseResult<CodonTable> {
    let file = File::open(path)?;
    parse_codon_table(BufReader::new(file))
}

/// Reads an enzyme database file.
pub fn read_enzymes<P: AsRef<Path>>(path: P) -> DatabaseResult<Vec<(String, String)>> {
    let file = File::open(path)?;
    parse_enzymes(BufReader::new(file))
}
