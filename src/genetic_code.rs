//! Codon table definitions and translation logic.
//!
//! This module provides:
//! - A codon table loaded from `(codon, amino acid)` pairs
//! - Codon to amino acid translation
//! - Wildcard codon lookups used to build reading-frame motifs
//! - The built-in standard genetic code

use std::collections::HashMap;

use thiserror::Error;

/// The four nucleotide symbols, in the order used for padding and enumeration.
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Amino acids of the standard genetic code in NCBI codon order
/// (TTT, TTC, TTA, TTG, TCT, ...).
const STANDARD_NCBIEAA: &str = "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// Errors that can occur while loading a codon table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodonTableError {
    #[error("Malformed codon table entry {line}: '{codon} {amino_acid}' (expected a codon of three A/C/G/T and a one-letter amino acid)")]
    MalformedEntry {
        line: usize,
        codon: String,
        amino_acid: String,
    },
}

/// Result type for codon table operations.
pub type CodonTableResult<T> = Result<T, CodonTableError>;

/// A nucleotide codon: three symbols from {A, C, G, T}.
pub type Codon = [u8; 3];

/// Returns true if `b` is one of A, C, G, T.
pub fn is_nucleotide(b: u8) -> bool {
    NUCLEOTIDES.contains(&b)
}

/// Parses a codon string, upper-casing it.
fn parse_codon(codon: &str) -> Option<Codon> {
    let bytes = codon.trim().as_bytes();
    if bytes.len() != 3 {
        return None;
    }
    let mut out = [0u8; 3];
    for (slot, &b) in out.iter_mut().zip(bytes) {
        let b = b.to_ascii_uppercase();
        if !is_nucleotide(b) {
            return None;
        }
        *slot = b;
    }
    Some(out)
}

/// Parses a one-letter amino acid code. Letters are upper-cased; `*` marks a stop.
fn parse_amino_acid(aa: &str) -> Option<char> {
    let mut chars = aa.trim().chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_alphabetic() || c == '*' {
        Some(c.to_ascii_uppercase())
    } else {
        None
    }
}

/// A codon table for translating codons to amino acids.
///
/// The table may be partial: codons without an entry simply have no
/// translation. When the same codon is loaded twice, the first mapping wins.
#[derive(Debug, Clone, Default)]
pub struct CodonTable {
    /// Codons in load order, each with its amino acid
    entries: Vec<(Codon, char)>,
    /// Codon to amino acid lookup
    lookup: HashMap<Codon, char>,
    /// Distinct amino acid letters, in order of first appearance
    amino_acids: Vec<char>,
}

impl CodonTable {
    /// Loads a codon table from `(codon, amino acid)` pairs.
    ///
    /// Fails on the first entry whose codon is not three nucleotides or whose
    /// amino acid field is not a single letter. Entries are numbered from 1.
    pub fn load<I, C, A>(entries: I) -> CodonTableResult<Self>
    where
        I: IntoIterator<Item = (C, A)>,
        C: AsRef<str>,
        A: AsRef<str>,
    {
        let mut table = Self::default();
        for (idx, (codon, aa)) in entries.into_iter().enumerate() {
            let (codon, aa) = (codon.as_ref(), aa.as_ref());
            match (parse_codon(codon), parse_amino_acid(aa)) {
                (Some(c), Some(a)) => table.insert(c, a),
                _ => {
                    return Err(CodonTableError::MalformedEntry {
                        line: idx + 1,
                        codon: codon.to_string(),
                        amino_acid: aa.to_string(),
                    })
                }
            }
        }
        Ok(table)
    }

    /// The standard genetic code (NCBI table 1).
    pub fn standard() -> Self {
        let bases = [b'T', b'C', b'A', b'G'];
        let mut table = Self::default();
        let mut aas = STANDARD_NCBIEAA.chars();
        for &b1 in &bases {
            for &b2 in &bases {
                for &b3 in &bases {
                    if let Some(aa) = aas.next() {
                        table.insert([b1, b2, b3], aa);
                    }
                }
            }
        }
        table
    }

    fn insert(&mut self, codon: Codon, aa: char) {
        if self.lookup.contains_key(&codon) {
            return;
        }
        self.lookup.insert(codon, aa);
        self.entries.push((codon, aa));
        if !self.amino_acids.contains(&aa) {
            self.amino_acids.push(aa);
        }
    }

    /// Translates a single codon, or returns `None` if the table has no entry for it.
    pub fn translate(&self, codon: &[u8]) -> Option<char> {
        let codon: Codon = codon.try_into().ok()?;
        self.lookup.get(&codon).copied()
    }

    /// Translates a nucleotide string codon by codon, left to right.
    ///
    /// Trailing bases that do not fill a codon are ignored, as are codons
    /// the table does not map.
    pub fn translate_sequence(&self, sequence: &[u8]) -> String {
        sequence
            .chunks_exact(3)
            .filter_map(|codon| self.translate(codon))
            .collect()
    }

    /// All distinct amino acids produced by codons matching `pattern`,
    /// in table order. `None` in the pattern matches any base.
    pub fn wildcard_matches(&self, pattern: [Option<u8>; 3]) -> impl Iterator<Item = char> + '_ {
        self.entries
            .iter()
            .filter(move |(codon, _)| {
                pattern.iter().zip(codon.iter()).all(|(p, b)| match p {
                    Some(p) => p == b,
                    None => true,
                })
            })
            .map(|&(_, aa)| aa)
    }

    /// The distinct amino acid letters this table can produce.
    pub fn valid_amino_acids(&self) -> &[char] {
        &self.amino_acids
    }

    /// Returns true if `aa` is produced by some codon in the table.
    pub fn is_valid_amino_acid(&self, aa: char) -> bool {
        self.amino_acids.contains(&aa)
    }

    /// Number of mapped codons.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no codon is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
