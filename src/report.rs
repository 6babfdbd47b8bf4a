//! Text rendering of scan results.
//!
//! A report shows the scanned sequence wrapped at a fixed column, the name
//! of each matching enzyme placed under the residue where its motif starts,
//! and a listing of every match below each wrapped segment:
//!
//! ```text
//! ----------------------------------------------------------------------
//! MEFGSKL
//!  EcoRI
//!    BamHI
//!
//! Position in the input string: 2
//! Amino acid string at this position: EF
//! Restriction Enzyme site/s that can be introduced at this position: EcoRI (GAATTC)
//! ...
//! ```
//!
//! Labels that would collide on one row are moved to extra rows under the
//! same segment.

use textwrap::core::display_width;
use textwrap::{Options, WordSplitter};

use crate::motif::{AminoAcidSet, MotifIndex, Phase};
use crate::scan::MatchRecord;

/// Default wrap column.
pub const DEFAULT_WIDTH: usize = 80;

/// Narrowest accepted wrap column.
pub const MIN_WIDTH: usize = 10;

/// Rule printed at the top of every report.
pub const RULE: &str = "-----------------------------------------------------------------------";

/// Statement printed when a sequence has no match.
pub const NO_SITE: &str = "No site in the input string can be replaced with Restriction Enzymes";

/// Rendering settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Wrap column for sequence segments and label rows
    pub width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH }
    }
}

/// A wrapped segment of the sequence and the matches labelled under it.
#[derive(Debug)]
struct VisualLine<'m, 'a> {
    start: usize,
    end: usize,
    matches: Vec<&'m MatchRecord<'a>>,
}

/// Renders a report with the default options.
pub fn render_report(sequence: &str, matches: &[MatchRecord<'_>]) -> String {
    render_report_with(sequence, matches, &ReportOptions::default())
}

/// Renders `matches` found in `sequence` as an annotated text report.
pub fn render_report_with(sequence: &str, matches: &[MatchRecord<'_>], options: &ReportOptions) -> String {
    let width = options.width.max(MIN_WIDTH);
    let residues: Vec<char> = sequence.chars().collect();

    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');

    if matches.is_empty() {
        let wrap = Options::new(width)
            .break_words(true)
            .word_splitter(WordSplitter::NoHyphenation);
        for line in textwrap::wrap(sequence, wrap) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(NO_SITE);
        out.push('\n');
        return out;
    }

    let mut ordered: Vec<&MatchRecord<'_>> = matches.iter().collect();
    ordered.sort_by_key(|m| m.position);

    for line in layout_lines(residues.len(), &ordered, width) {
        render_line(&mut out, &residues, &line);
    }
    out
}

/// Display width of a match label.
fn label_width(m: &MatchRecord<'_>) -> usize {
    display_width(m.enzyme_name())
}

/// Splits the sequence into wrapped segments and assigns each match to the
/// segment where it starts.
///
/// A segment is at most `width` residues long. When a match's label would
/// run past the wrap column, or its residues past the segment, the segment
/// is cut before it so the match opens the next segment. The cut never
/// splits the span of a match kept on the current segment, and every match
/// at or after the cut moves along with it. A match at column 0 always
/// stays; its label may overflow.
fn layout_lines<'m, 'a>(len: usize, matches: &[&'m MatchRecord<'a>], width: usize) -> Vec<VisualLine<'m, 'a>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut next = 0;

    while start < len {
        let window_end = (start + width).min(len);
        let mut end = window_end;
        let mut line_matches: Vec<&'m MatchRecord<'a>> = Vec::new();

        while let Some(&m) = matches.get(next) {
            if m.position >= window_end {
                break;
            }
            let column = m.position.saturating_sub(start);
            let fits = column + label_width(m) <= width && m.end().min(len) <= window_end;
            if column > 0 && !fits {
                if let Some(cut) = cut_point(start, m.position, &line_matches) {
                    let moved = line_matches.iter().filter(|k| k.position >= cut).count();
                    line_matches.truncate(line_matches.len() - moved);
                    next -= moved;
                    end = cut;
                    break;
                }
            }
            line_matches.push(m);
            next += 1;
        }

        lines.push(VisualLine {
            start,
            end,
            matches: line_matches,
        });
        start = end;
    }

    lines
}

/// The last position in `start + 1..=limit` that no kept match spans across.
fn cut_point(start: usize, limit: usize, kept: &[&MatchRecord<'_>]) -> Option<usize> {
    (start + 1..=limit)
        .rev()
        .find(|&cut| kept.iter().all(|k| k.position >= cut || k.end() <= cut))
}

/// Places labels on as few rows as possible, first fit, keeping at least
/// one blank column between neighbours on the same row.
fn label_rows(line: &VisualLine<'_, '_>) -> Vec<String> {
    // (row text, display width)
    let mut rows: Vec<(String, usize)> = Vec::new();

    for m in &line.matches {
        let column = m.position.saturating_sub(line.start);
        let slot = rows.iter().position(|(_, used)| *used == 0 || *used < column);
        let idx = match slot {
            Some(idx) => idx,
            None => {
                rows.push((String::new(), 0));
                rows.len() - 1
            }
        };
        let (text, used) = &mut rows[idx];
        text.extend(std::iter::repeat(' ').take(column - *used));
        text.push_str(m.enzyme_name());
        *used = column + label_width(m);
    }

    rows.into_iter().map(|(text, _)| text).collect()
}

fn render_line(out: &mut String, residues: &[char], line: &VisualLine<'_, '_>) {
    out.extend(&residues[line.start..line.end]);
    out.push('\n');

    if line.matches.is_empty() {
        return;
    }

    for row in label_rows(line) {
        out.push_str(&row);
        out.push('\n');
    }
    out.push('\n');

    for m in &line.matches {
        let span: String = residues
            .get(m.position..m.end().min(residues.len()))
            .unwrap_or_default()
            .iter()
            .collect();
        out.push_str(&format!(
            "Position in the input string: {}\n\
             Amino acid string at this position: {}\n\
             Restriction Enzyme site/s that can be introduced at this position: {} ({})\n\n",
            m.position + 1,
            span,
            m.enzyme_name(),
            m.recognition_sequence()
        ));
    }
}

fn set_letters(set: &AminoAcidSet) -> String {
    if set.is_empty() {
        "-".to_string()
    } else {
        set.to_string()
    }
}

/// Renders the reading-frame table: one row per enzyme with its name, site,
/// the Phase-0 residues and the Phase-1 and Phase-2 slot sets.
pub fn render_motif_table(index: &MotifIndex) -> String {
    let mut out = String::new();
    for entry in index.entries() {
        let p0 = &entry.motif(Phase::Zero).positions;
        let p1 = &entry.motif(Phase::One).positions;
        let p2 = &entry.motif(Phase::Two).positions;
        out.push_str(&format!(
            "{:<45}{}  {} {}  {:<5} {} {:<8}{:<15} {} {}\n",
            entry.enzyme.name,
            entry.enzyme.site,
            set_letters(&p0[0]),
            set_letters(&p0[1]),
            set_letters(&p1[0]),
            set_letters(&p1[1]),
            set_letters(&p1[2]),
            set_letters(&p2[0]),
            set_letters(&p2[1]),
            set_letters(&p2[2]),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enzyme::Enzyme;
    use crate::genetic_code::CodonTable;
    use crate::scan::scan;

    fn record(position: usize, phase: Phase, enzyme: &Enzyme) -> MatchRecord<'_> {
        MatchRecord {
            position,
            phase,
            enzyme,
        }
    }

    fn listing(position: usize, span: &str, name: &str, site: &str) -> String {
        format!(
            "Position in the input string: {}\n\
             Amino acid string at this position: {}\n\
             Restriction Enzyme site/s that can be introduced at this position: {} ({})\n\n",
            position, span, name, site
        )
    }

    #[test]
    fn test_no_matches() {
        let report = render_report("ABCDE", &[]);
        assert_eq!(report, format!("{}\nABCDE\n{}\n", RULE, NO_SITE));
        assert!(!report.contains("Position"));
    }

    #[test]
    fn test_no_matches_wraps_long_sequence() {
        let sequence = "A".repeat(25);
        let report = render_report_with(&sequence, &[], &ReportOptions { width: 10 });
        let expected = format!("{}\n{}\n{}\n{}\n{}\n", RULE, "A".repeat(10), "A".repeat(10), "A".repeat(5), NO_SITE);
        assert_eq!(report, expected);
    }

    #[test]
    fn test_fixture_report() {
        let table = CodonTable::load([("AAA", "K"), ("AAC", "N"), ("ACA", "T"), ("CAA", "Q")]).unwrap();
        let index = MotifIndex::build(&table, [("AAACAA", "TestRE")]);
        let matches = scan("KQTNK", &index);
        let report = render_report("KQTNK", &matches);

        let expected = format!(
            "{}\nKQTNK\nTestRE\n TestRE\n  TestRE\n\n{}{}{}",
            RULE,
            listing(1, "KQ", "TestRE", "AAACAA"),
            listing(2, "QTN", "TestRE", "AAACAA"),
            listing(3, "TNK", "TestRE", "AAACAA"),
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_labels_share_rows_when_apart() {
        let ab = Enzyme::new("Ab", "GAATTC").unwrap();
        let cd = Enzyme::new("Cd", "GGATCC").unwrap();
        let ef = Enzyme::new("Ef", "AAGCTT").unwrap();
        let matches = vec![
            record(0, Phase::Zero, &ab),
            record(1, Phase::Zero, &cd),
            record(4, Phase::One, &ef),
        ];
        let report = render_report("ABCDEFGH", &matches);
        let mut lines = report.lines().skip(1);
        assert_eq!(lines.next(), Some("ABCDEFGH"));
        assert_eq!(lines.next(), Some("Ab  Ef"));
        assert_eq!(lines.next(), Some(" Cd"));
        assert_eq!(lines.next(), Some(""));
        assert!(report.contains(&listing(5, "EFG", "Ef", "AAGCTT")));
    }

    #[test]
    fn test_segments_wrap_at_width() {
        let xy = Enzyme::new("Xy", "GAATTC").unwrap();
        let matches = vec![record(12, Phase::Zero, &xy)];
        let report = render_report_with("ABCDEFGHIJKLMNOPQRST", &matches, &ReportOptions { width: 10 });
        let expected = format!(
            "{}\nABCDEFGHIJ\nKLMNOPQRST\n  Xy\n\n{}",
            RULE,
            listing(13, "MN", "Xy", "GAATTC")
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_overflowing_label_opens_next_segment() {
        let long = Enzyme::new("LongName", "GAATTC").unwrap();
        let matches = vec![record(6, Phase::Zero, &long)];
        let report = render_report_with("ABCDEFGHIJKLMNOPQRST", &matches, &ReportOptions { width: 10 });
        let expected = format!(
            "{}\nABCDEF\nGHIJKLMNOP\nLongName\n\n{}QRST\n",
            RULE,
            listing(7, "GH", "LongName", "GAATTC")
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_labels_at_same_position_move_together() {
        let short = Enzyme::new("Ab", "GAATTC").unwrap();
        let long = Enzyme::new("LongName", "GGATCC").unwrap();
        let matches = vec![record(5, Phase::Zero, &short), record(5, Phase::Zero, &long)];
        let report = render_report_with("ABCDEFGHIJKLMNOPQRST", &matches, &ReportOptions { width: 10 });
        let expected = format!(
            "{}\nABCDE\nFGHIJKLMNO\nAb\nLongName\n\n{}{}PQRST\n",
            RULE,
            listing(6, "FG", "Ab", "GAATTC"),
            listing(6, "FG", "LongName", "GGATCC")
        );
        assert_eq!(report, expected);

        // Every label sits inside the segment it annotates
        let lines = layout_lines(20, &matches.iter().collect::<Vec<_>>(), 10);
        for line in &lines {
            for m in &line.matches {
                assert!(m.position >= line.start && m.position < line.end);
            }
        }
    }

    #[test]
    fn test_span_stays_within_segment() {
        let x = Enzyme::new("X", "GAATTC").unwrap();
        let matches = vec![record(8, Phase::One, &x)];
        let report = render_report_with("ABCDEFGHIJKLMNOPQRST", &matches, &ReportOptions { width: 10 });
        let expected = format!(
            "{}\nABCDEFGH\nIJKLMNOPQR\nX\n\n{}ST\n",
            RULE,
            listing(9, "IJK", "X", "GAATTC")
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_cut_does_not_split_earlier_span() {
        let a = Enzyme::new("A", "GAATTC").unwrap();
        let long = Enzyme::new("LongName", "GGATCC").unwrap();
        let matches = vec![record(7, Phase::One, &a), record(8, Phase::Zero, &long)];
        let report = render_report_with("ABCDEFGHIJKLMNOPQRST", &matches, &ReportOptions { width: 10 });
        let expected = format!(
            "{}\nABCDEFG\nHIJKLMNOPQ\nA\n LongName\n\n{}{}RST\n",
            RULE,
            listing(8, "HIJ", "A", "GAATTC"),
            listing(9, "IJ", "LongName", "GGATCC")
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn test_width_below_minimum_is_clamped() {
        let report = render_report_with("ABCDEFGHIJKL", &[], &ReportOptions { width: 1 });
        assert!(report.contains("ABCDEFGHIJ\nKL\n"));
    }

    #[test]
    fn test_every_match_listed() {
        let table = CodonTable::standard();
        let index = MotifIndex::build(&table, crate::enzyme::builtin_enzymes());
        let sequence = "MEFGSKLAAGRSTDPLEHHHHHHMEFGSKLAAGRSTDPLEHHHHHHMEFGSKLAAGRSTDPLEHHHHHH";
        let matches = scan(sequence, &index);
        let report = render_report_with(sequence, &matches, &ReportOptions { width: 30 });

        assert_eq!(report.matches("Position in the input string:").count(), matches.len());
        for m in &matches {
            let needle = format!("Position in the input string: {}\n", m.position + 1);
            assert!(report.contains(&needle));
        }
        // Sequence segments reassemble to the input
        let segments: String = report
            .lines()
            .filter(|l| !l.is_empty() && l.chars().all(|c| c.is_ascii_uppercase()))
            .collect();
        assert_eq!(segments, sequence);
    }

    #[test]
    fn test_motif_table() {
        let table = CodonTable::load([("AAA", "K"), ("AAC", "N"), ("ACA", "T"), ("CAA", "Q")]).unwrap();
        let index = MotifIndex::build(&table, [("AAACAA", "TestRE"), ("GGGGGG", "Empty")]);
        let rendered = render_motif_table(&index);
        let mut rows = rendered.lines();

        let expected = format!("{:<45}AAACAA  K Q  KQ    T KNT     KTQ             N KN", "TestRE");
        assert_eq!(rows.next(), Some(expected.as_str()));

        let expected = format!("{:<45}GGGGGG  - -  -     - -       -               - -", "Empty");
        assert_eq!(rows.next(), Some(expected.as_str()));
        assert_eq!(rows.next(), None);
    }
}
