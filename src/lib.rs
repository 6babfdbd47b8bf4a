//! # silmut - Silent Mutation Site Finder
//!
//! Finds positions in a protein sequence where a change in the underlying
//! DNA could introduce the recognition site of a restriction enzyme.
//!
//! ## Architecture
//!
//! The pipeline runs leaves first:
//! - `genetic_code`: Codon table loading and translation
//! - `enzyme`: Restriction enzymes and recognition sequences
//! - `motif`: Reading-frame motifs for each enzyme, collected in a `MotifIndex`
//! - `sequence`: Validation and normalization of raw input sequences
//! - `scan`: Motif matching over amino acid sequences
//! - `report`: Annotated text reports and the reading-frame table
//! - `database`: Readers for the codon and enzyme database files
//!
//! The codon table and motif index are built once and only read afterwards,
//! so they can be shared across any number of scans.
//!
//! ```
//! use silmut::enzyme::builtin_enzymes;
//! use silmut::genetic_code::CodonTable;
//! use silmut::motif::MotifIndex;
//! use silmut::report::render_report;
//! use silmut::scan::scan;
//! use silmut::sequence::{normalize, SequenceKind};
//!
//! let table = CodonTable::standard();
//! let index = MotifIndex::build(&table, builtin_enzymes());
//! for protein in normalize("MEFGS", SequenceKind::AminoAcid, &table).unwrap() {
//!     let matches = scan(&protein, &index);
//!     print!("{}", render_report(&protein, &matches));
//! }
//! ```

pub mod database;
pub mod enzyme;
pub mod genetic_code;
pub mod motif;
pub mod report;
pub mod scan;
pub mod sequence;

pub use motif::build_motif_index;
pub use report::render_report;
pub use scan::scan;
pub use sequence::normalize;
