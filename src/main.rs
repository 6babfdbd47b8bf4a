//! silmut - Silent Mutation Site Finder
//!
//! Reports where restriction enzyme sites could be introduced into a
//! protein sequence by silent mutations.
//!
//! ## Usage
//!
//! ```bash
//! silmut MEFGSKLAAGR
//! silmut -t nucleotide ATGGAATTCGGATCC
//! silmut -i proteins.txt -o report.txt
//! silmut --codons dbase1 --enzymes dbase2 --table
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use silmut::database::{read_codon_table, read_enzymes};
use silmut::enzyme::builtin_enzymes;
use silmut::genetic_code::CodonTable;
use silmut::motif::MotifIndex;
use silmut::report::{render_motif_table, render_report_with, ReportOptions, DEFAULT_WIDTH, MIN_WIDTH};
use silmut::scan::scan;
use silmut::sequence::{normalize, SequenceKind};

/// Input sequence type for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Protein sequence, one-letter codes
    Amino,
    /// DNA sequence (A, C, G, T)
    Nucleotide,
}

impl From<KindArg> for SequenceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Amino => SequenceKind::AminoAcid,
            KindArg::Nucleotide => SequenceKind::Nucleotide,
        }
    }
}

/// silmut - find silent mutation sites for restriction enzymes
///
/// Sequences are taken from the command line, from -i/--input, or from
/// standard input, one per line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Sequences to analyse
    sequences: Vec<String>,

    /// File with one sequence per line ("-" for stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Type of the input sequences
    #[arg(short = 't', long = "type", value_enum, default_value = "amino")]
    kind: KindArg,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// Codon database ("CODON LETTER" per line). Defaults to the standard genetic code.
    #[arg(long = "codons")]
    codons: Option<PathBuf>,

    /// Enzyme database ("SITE NAME" per line). Defaults to a built-in list.
    #[arg(long = "enzymes")]
    enzymes: Option<PathBuf>,

    /// Wrap column for reports
    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Print the reading-frame motif table instead of scanning
    #[arg(long = "table")]
    table: bool,
}

/// Loads the codon table and motif index. Failure here is fatal.
fn load_index(args: &Args) -> Result<(CodonTable, MotifIndex)> {
    let table = match &args.codons {
        Some(path) => read_codon_table(path)
            .with_context(|| format!("Error opening codon database {}", path.display()))?,
        None => CodonTable::standard(),
    };

    let index = match &args.enzymes {
        Some(path) => {
            let enzymes = read_enzymes(path)
                .with_context(|| format!("Error opening enzyme database {}", path.display()))?;
            MotifIndex::build(&table, enzymes)
        }
        None => MotifIndex::build(&table, builtin_enzymes()),
    };

    for rejected in index.rejected() {
        eprintln!("Skipping enzyme: {}", rejected);
    }

    Ok((table, index))
}

/// Collects the raw sequences to analyse, in order.
fn collect_sequences(args: &Args) -> Result<Vec<String>> {
    let mut sequences = args.sequences.clone();

    let reader: Option<Box<dyn BufRead>> = match args.input.as_deref() {
        Some("-") => Some(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open input file {}", path))?;
            Some(Box::new(BufReader::new(file)))
        }
        None if sequences.is_empty() => Some(Box::new(BufReader::new(io::stdin()))),
        None => None,
    };

    if let Some(reader) = reader {
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                sequences.push(line);
            }
        }
    }

    Ok(sequences)
}

/// Scans every sequence and writes one report per distinct candidate.
/// Returns the number of reports written.
fn run(args: &Args, table: &CodonTable, index: &MotifIndex, out: &mut dyn Write) -> Result<usize> {
    let options = ReportOptions { width: args.width };
    let kind: SequenceKind = args.kind.into();
    let mut reports = 0;

    for raw in collect_sequences(args)? {
        let candidates = match normalize(&raw, kind, table) {
            Ok(candidates) => candidates,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("Please check the sequence and try again");
                continue;
            }
        };

        for protein in candidates {
            let matches = scan(&protein, index);
            writeln!(out)?;
            write!(out, "{}", render_report_with(&protein, &matches, &options))?;
            reports += 1;
        }
    }

    Ok(reports)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.width < MIN_WIDTH {
        anyhow::bail!("Width must be at least {} (got {})", MIN_WIDTH, args.width);
    }

    let (table, index) = load_index(&args)?;

    if args.output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if args.table {
            write!(handle, "{}", render_motif_table(&index))?;
        } else {
            run(&args, &table, &index, &mut handle)?;
        }
    } else {
        let mut file = File::create(&args.output)
            .with_context(|| format!("Failed to create output file {}", args.output))?;
        if args.table {
            write!(file, "{}", render_motif_table(&index))?;
            eprintln!("Wrote reading-frame table for {} enzymes to {}", index.len(), args.output);
        } else {
            let reports = run(&args, &table, &index, &mut file)?;
            eprintln!("Wrote {} reports to {}", reports, args.output);
        }
    }

    Ok(())
}
