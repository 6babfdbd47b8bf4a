//! Input sequence validation and normalization.
//!
//! Raw user input is cleaned (whitespace removed, upper-cased) and checked
//! against the relevant alphabet. Nucleotide input is translated to one or
//! more candidate amino acid strings.

use std::fmt;

use thiserror::Error;

use crate::genetic_code::{is_nucleotide, CodonTable, NUCLEOTIDES};

/// Errors for user-supplied sequences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Empty input sequence")]
    Empty,

    #[error("Input sequence contains invalid entries: {input} (first invalid character '{offending}')")]
    InvalidSequence { input: String, offending: char },
}

/// Result type for sequence normalization.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Kind of raw input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    AminoAcid,
    Nucleotide,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::AminoAcid => write!(f, "amino acid"),
            SequenceKind::Nucleotide => write!(f, "nucleotide"),
        }
    }
}

/// Removes all whitespace and upper-cases the rest.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Cleans and validates `raw`, returning the candidate amino acid strings
/// to scan.
///
/// Amino acid input yields exactly one candidate. Nucleotide input is
/// translated codon by codon; when its length is not a multiple of three,
/// the missing trailing bases are filled with every combination of A, C, G
/// and T (4 completions for one missing base, 16 for two) and each is
/// translated. Identical translations are returned once, in first-seen order.
pub fn normalize(raw: &str, kind: SequenceKind, table: &CodonTable) -> SequenceResult<Vec<String>> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(SequenceError::Empty);
    }

    let offending = match kind {
        SequenceKind::AminoAcid => cleaned.chars().find(|&c| !table.is_valid_amino_acid(c)),
        SequenceKind::Nucleotide => cleaned.chars().find(|&c| !c.is_ascii() || !is_nucleotide(c as u8)),
    };
    if let Some(offending) = offending {
        return Err(SequenceError::InvalidSequence {
            input: cleaned,
            offending,
        });
    }

    match kind {
        SequenceKind::AminoAcid => Ok(vec![cleaned]),
        SequenceKind::Nucleotide => Ok(translate_completions(cleaned.as_bytes(), table)),
    }
}

/// Translates every frame completion of `nucleotides`, dropping duplicates.
fn translate_completions(nucleotides: &[u8], table: &CodonTable) -> Vec<String> {
    let missing = (3 - nucleotides.len() % 3) % 3;

    let mut paddings: Vec<Vec<u8>> = vec![Vec::new()];
    for _ in 0..missing {
        paddings = paddings
            .iter()
            .flat_map(|prefix| {
                NUCLEOTIDES.iter().map(move |&b| {
                    let mut padded = prefix.clone();
                    padded.push(b);
                    padded
                })
            })
            .collect();
    }

    let mut candidates: Vec<String> = Vec::with_capacity(paddings.len());
    let mut completed = Vec::with_capacity(nucleotides.len() + missing);
    for padding in &paddings {
        completed.clear();
        completed.extend_from_slice(nucleotides);
        completed.extend_from_slice(padding);
        let translated = table.translate_sequence(&completed);
        if !candidates.contains(&translated) {
            candidates.push(translated);
        }
    }
    candidates
}
