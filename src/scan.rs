//! Scanning amino acid sequences for enzyme motifs.

use crate::enzyme::Enzyme;
use crate::motif::{MotifIndex, Phase};

/// One enzyme motif found in a scanned sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord<'a> {
    /// 0-based start position in the scanned sequence
    pub position: usize,
    pub phase: Phase,
    pub enzyme: &'a Enzyme,
}

impl MatchRecord<'_> {
    /// Number of amino acids covered by the match (2 or 3).
    pub fn motif_len(&self) -> usize {
        self.phase.motif_len()
    }

    /// Position one past the last matched residue.
    pub fn end(&self) -> usize {
        self.position + self.motif_len()
    }

    pub fn enzyme_name(&self) -> &str {
        &self.enzyme.name
    }

    pub fn recognition_sequence(&self) -> &str {
        self.enzyme.site.as_str()
    }
}

/// Finds every enzyme motif in `sequence`.
///
/// Results are ordered by position. At a given position all Phase-0 hits
/// come first, then Phase-1, then Phase-2, each in enzyme load order. A
/// motif is tested wherever it fits inside the sequence, so the last two
/// positions only admit the two-residue Phase-0 motifs.
pub fn scan<'a>(sequence: &str, index: &'a MotifIndex) -> Vec<MatchRecord<'a>> {
    let residues: Vec<char> = sequence.chars().collect();
    let mut matches = Vec::new();

    for position in 0..residues.len() {
        for phase in Phase::ALL {
            for entry in index.entries() {
                if entry.motif(phase).matches_at(&residues, position) {
                    matches.push(MatchRecord {
                        position,
                        phase,
                        enzyme: &entry.enzyme,
                    });
                }
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enzyme::builtin_enzymes;
    use crate::genetic_code::CodonTable;

    fn fixture_index() -> MotifIndex {
        let table = CodonTable::load([("AAA", "K"), ("AAC", "N"), ("ACA", "T"), ("CAA", "Q")]).unwrap();
        MotifIndex::build(&table, [("AAACAA", "TestRE")])
    }

    fn summary(matches: &[MatchRecord<'_>]) -> Vec<(usize, Phase, String)> {
        matches
            .iter()
            .map(|m| (m.position, m.phase, m.enzyme_name().to_string()))
            .collect()
    }

    #[test]
    fn test_fixture_scan() {
        // Phase-0 KQ, Phase-1 [KQ]T[KNT], Phase-2 [KTQ]N[KN]
        let index = fixture_index();
        let matches = scan("KQTNK", &index);
        assert_eq!(
            summary(&matches),
            vec![
                (0, Phase::Zero, "TestRE".to_string()),
                (1, Phase::One, "TestRE".to_string()),
                (2, Phase::Two, "TestRE".to_string()),
            ]
        );
        assert_eq!(matches[0].motif_len(), 2);
        assert_eq!(matches[1].motif_len(), 3);
        assert_eq!(matches[1].end(), 4);
        assert_eq!(matches[2].recognition_sequence(), "AAACAA");
    }

    #[test]
    fn test_boundary_only_short_motifs() {
        let index = fixture_index();
        // Phase-1 needs three residues; KQ at the very end still matches Phase-0
        let matches = scan("TTKQ", &index);
        assert_eq!(summary(&matches), vec![(2, Phase::Zero, "TestRE".to_string())]);

        assert!(scan("K", &index).is_empty());
        assert!(scan("", &index).is_empty());
    }

    #[test]
    fn test_all_hits_retained() {
        let index = fixture_index();
        let table = CodonTable::load([("AAA", "K"), ("AAC", "N"), ("ACA", "T"), ("CAA", "Q")]).unwrap();
        let twice = MotifIndex::build(&table, [("AAACAA", "First"), ("AAACAA", "Second")]);

        // KTK fits [KQ] T [KNT] only
        let matches = scan("KTK", &index);
        assert_eq!(summary(&matches), vec![(0, Phase::One, "TestRE".to_string())]);

        // Enzymes sharing a site both report, in load order
        let matches = scan("KQ", &twice);
        assert_eq!(
            summary(&matches),
            vec![
                (0, Phase::Zero, "First".to_string()),
                (0, Phase::Zero, "Second".to_string()),
            ]
        );
    }

    #[test]
    fn test_standard_scan_is_sorted_and_stable() {
        let table = CodonTable::standard();
        let index = MotifIndex::build(&table, builtin_enzymes());
        let sequence = "MEFGSKLAAGRSTDPLEHHHHHH";

        let first = scan(sequence, &index);
        let second = scan(sequence, &index);
        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert!(first.windows(2).all(|w| w[0].position <= w[1].position));
        assert!(first.iter().all(|m| m.end() <= sequence.len()));

        // EF is the Phase-0 motif of EcoRI (GAA TTC)
        assert!(first
            .iter()
            .any(|m| m.position == 1 && m.phase == Phase::Zero && m.enzyme_name() == "EcoRI"));
        // GS is the Phase-0 motif of BamHI (GGA TCC)
        assert!(first
            .iter()
            .any(|m| m.position == 3 && m.phase == Phase::Zero && m.enzyme_name() == "BamHI"));
    }
}
