//! Restriction enzymes and their recognition sequences.

use std::fmt;

use thiserror::Error;

use crate::genetic_code::is_nucleotide;

/// Length of every recognition sequence handled by the tool.
pub const SITE_LENGTH: usize = 6;

/// Common six-base cutters, used when no enzyme database is given.
const BUILTIN_ENZYMES: &[(&str, &str)] = &[
    ("AAGCTT", "HindIII"),
    ("ACTAGT", "SpeI"),
    ("AGATCT", "BglII"),
    ("AGGCCT", "StuI"),
    ("AGTACT", "ScaI"),
    ("ATCGAT", "ClaI"),
    ("CAGCTG", "PvuII"),
    ("CATATG", "NdeI"),
    ("CCATGG", "NcoI"),
    ("CCCGGG", "SmaI"),
    ("CTCGAG", "XhoI"),
    ("CTGCAG", "PstI"),
    ("GAATTC", "EcoRI"),
    ("GAGCTC", "SacI"),
    ("GATATC", "EcoRV"),
    ("GCATGC", "SphI"),
    ("GCTAGC", "NheI"),
    ("GGATCC", "BamHI"),
    ("GGTACC", "KpnI"),
    ("GTCGAC", "SalI"),
    ("TCTAGA", "XbaI"),
    ("TGATCA", "BclI"),
    ("TTCGAA", "BstBI"),
];

/// Errors for enzyme entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnzymeError {
    #[error("Invalid recognition sequence '{sequence}' for enzyme '{name}' (expected 6 bases from A, C, G, T)")]
    InvalidRecognitionSequence { name: String, sequence: String },
}

/// Result type for enzyme operations.
pub type EnzymeResult<T> = Result<T, EnzymeError>;

/// A six-base recognition sequence, upper-case A/C/G/T only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecognitionSequence([u8; SITE_LENGTH]);

impl RecognitionSequence {
    /// Parses a recognition sequence, upper-casing it. Returns `None` unless
    /// it is exactly six nucleotides.
    pub fn parse(sequence: &str) -> Option<Self> {
        let bytes = sequence.trim().as_bytes();
        if bytes.len() != SITE_LENGTH {
            return None;
        }
        let mut site = [0u8; SITE_LENGTH];
        for (slot, &b) in site.iter_mut().zip(bytes) {
            let b = b.to_ascii_uppercase();
            if !is_nucleotide(b) {
                return None;
            }
            *slot = b;
        }
        Some(Self(site))
    }

    pub fn as_bytes(&self) -> &[u8; SITE_LENGTH] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII nucleotides are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for RecognitionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A restriction enzyme: a display name and its recognition sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enzyme {
    pub name: String,
    pub site: RecognitionSequence,
}

impl Enzyme {
    /// Creates an enzyme, validating the recognition sequence.
    pub fn new(name: impl Into<String>, sequence: &str) -> EnzymeResult<Self> {
        let name = name.into();
        match RecognitionSequence::parse(sequence) {
            Some(site) => Ok(Self { name, site }),
            None => Err(EnzymeError::InvalidRecognitionSequence {
                name,
                sequence: sequence.to_string(),
            }),
        }
    }
}

/// The built-in enzyme list as `(recognition sequence, name)` pairs.
pub fn builtin_enzymes() -> impl Iterator<Item = (&'static str, &'static str)> {
    BUILTIN_ENZYMES.iter().copied()
}
