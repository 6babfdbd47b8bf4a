//! Reading-frame motifs for restriction enzyme sites.
//!
//! A six-base recognition sequence embedded in an open reading frame can sit
//! at any of three codon phases:
//!
//! ```text
//! Phase 0:   |s0 s1 s2|s3 s4 s5|
//! Phase 1: |? s0 s1|s2 s3 s4|s5 ? ?|
//! Phase 2: |? ? s0|s1 s2 s3|s4 s5 ?|
//! ```
//!
//! Codons that are fully inside the site translate to a single amino acid.
//! Boundary codons are only partly known, so they may encode any amino acid
//! whose codons share the known bases. Each slot is therefore a set.

use std::fmt;

use crate::enzyme::{Enzyme, EnzymeError};
use crate::genetic_code::{CodonTable, CodonTableResult};

/// An ordered, duplicate-free set of amino acid letters.
///
/// Iteration follows insertion order, which for generated motifs is the
/// codon table's order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AminoAcidSet {
    letters: Vec<char>,
}

impl AminoAcidSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a letter. Returns false if it was already present.
    pub fn insert(&mut self, aa: char) -> bool {
        if self.contains(aa) {
            return false;
        }
        self.letters.push(aa);
        true
    }

    pub fn contains(&self, aa: char) -> bool {
        self.letters.contains(&aa)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }
}

impl FromIterator<char> for AminoAcidSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = Self::new();
        for aa in iter {
            set.insert(aa);
        }
        set
    }
}

impl From<Option<char>> for AminoAcidSet {
    fn from(aa: Option<char>) -> Self {
        aa.into_iter().collect()
    }
}

impl fmt::Display for AminoAcidSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for aa in &self.letters {
            write!(f, "{}", aa)?;
        }
        Ok(())
    }
}

/// The codon phase at which a recognition sequence sits in a reading frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Codon boundaries coincide with the site start: two whole codons.
    Zero,
    /// One unknown base precedes the site.
    One,
    /// Two unknown bases precede the site.
    Two,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Zero, Phase::One, Phase::Two];

    /// Number of amino acids the motif spans.
    pub fn motif_len(self) -> usize {
        match self {
            Phase::Zero => 2,
            Phase::One | Phase::Two => 3,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Phase::Zero => 0,
            Phase::One => 1,
            Phase::Two => 2,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phase-{}", self.index())
    }
}

/// The amino acid pattern a recognition sequence produces at one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseMotif {
    pub phase: Phase,
    /// One set per codon slot: 2 slots for phase 0, 3 otherwise.
    pub positions: Vec<AminoAcidSet>,
}

impl PhaseMotif {
    /// Builds the motif for `site` at `phase` using `table`.
    pub fn generate(table: &CodonTable, site: &[u8; 6], phase: Phase) -> Self {
        let s = site;
        let exact = |codon: &[u8]| AminoAcidSet::from(table.translate(codon));
        let wildcard = |pattern: [Option<u8>; 3]| table.wildcard_matches(pattern).collect::<AminoAcidSet>();

        let positions = match phase {
            Phase::Zero => vec![exact(&s[0..3]), exact(&s[3..6])],
            Phase::One => vec![
                wildcard([None, Some(s[0]), Some(s[1])]),
                exact(&s[2..5]),
                wildcard([Some(s[5]), None, None]),
            ],
            Phase::Two => vec![
                wildcard([None, None, Some(s[0])]),
                exact(&s[1..4]),
                wildcard([Some(s[4]), Some(s[5]), None]),
            ],
        };
        Self { phase, positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if the motif matches `sequence` starting at `start`.
    /// A motif that would run past the end never matches.
    pub fn matches_at(&self, sequence: &[char], start: usize) -> bool {
        match sequence.get(start..start + self.len()) {
            Some(window) => self
                .positions
                .iter()
                .zip(window)
                .all(|(set, &aa)| set.contains(aa)),
            None => false,
        }
    }
}

/// An enzyme together with its three phase motifs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnzymeMotifs {
    pub enzyme: Enzyme,
    /// Indexed by [`Phase::index`].
    pub motifs: [PhaseMotif; 3],
}

impl EnzymeMotifs {
    pub fn generate(table: &CodonTable, enzyme: Enzyme) -> Self {
        let site = enzyme.site.as_bytes();
        let motifs = Phase::ALL.map(|phase| PhaseMotif::generate(table, site, phase));
        Self { enzyme, motifs }
    }

    pub fn motif(&self, phase: Phase) -> &PhaseMotif {
        &self.motifs[phase.index()]
    }
}

/// All enzyme motifs, in enzyme load order.
///
/// Built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MotifIndex {
    entries: Vec<EnzymeMotifs>,
    rejected: Vec<EnzymeError>,
}

impl MotifIndex {
    /// Generates motifs for every `(recognition sequence, name)` pair.
    ///
    /// Entries with an invalid recognition sequence are skipped and kept in
    /// [`MotifIndex::rejected`]; the remaining enzymes are still indexed.
    pub fn build<I, S, N>(table: &CodonTable, enzymes: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: AsRef<str>,
        N: Into<String>,
    {
        let mut index = Self::default();
        for (site, name) in enzymes {
            match Enzyme::new(name, site.as_ref()) {
                Ok(enzyme) => index.entries.push(EnzymeMotifs::generate(table, enzyme)),
                Err(e) => index.rejected.push(e),
            }
        }
        index
    }

    pub fn entries(&self) -> &[EnzymeMotifs] {
        &self.entries
    }

    /// Enzyme entries skipped because of a bad recognition sequence.
    pub fn rejected(&self) -> &[EnzymeError] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads a codon table from raw entries and indexes the enzyme list.
///
/// A malformed codon entry aborts the build. Invalid enzymes are skipped.
pub fn build_motif_index<C, CA, CB, E, S, N>(codons: C, enzymes: E) -> CodonTableResult<(CodonTable, MotifIndex)>
where
    C: IntoIterator<Item = (CA, CB)>,
    CA: AsRef<str>,
    CB: AsRef<str>,
    E: IntoIterator<Item = (S, N)>,
    S: AsRef<str>,
    N: Into<String>,
{
    let table = CodonTable::load(codons)?;
    let index = MotifIndex::build(&table, enzymes);
    Ok((table, index))
}
