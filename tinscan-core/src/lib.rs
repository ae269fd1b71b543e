//! # tinscan - transposable element insertion scanner
//!
//! Finds candidate insertions by comparing two assemblies. A query genome is
//! aligned against a target genome (for example with LASTZ); wherever two
//! neighbouring query segments align to the target with a gap of extra target
//! sequence between them, that gap is reported as a putative insertion.
//!
//! ## Overview
//!
//! The pipeline has three stages:
//!
//! 1. **Parsing**: a tab-delimited alignment table is read into hits grouped by
//!    target and query sequence, dropping hits below a minimum identity.
//! 2. **Pairing**: within each group every hit is tested against every other
//!    hit for flanks that are adjacent on the query but separated on the
//!    target.
//! 3. **Annotation**: each pair is written as a GFF3 insertion feature, with a
//!    target site duplication when the flanks overlap on the query and,
//!    optionally, the flanking alignments themselves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tinscan_core::{InsertionScanner, config::ScanConfig};
//!
//! let scanner = InsertionScanner::with_config(ScanConfig::default())?;
//! let summary = scanner.scan_file("tinscan_alignment.tab", "candidate_insertion_events.gff3")?;
//!
//! println!("Found {} candidate insertions", summary.candidates);
//! # Ok::<(), tinscan_core::types::TinscanError>(())
//! ```
//!
//! ## Working with the stages
//!
//! ```rust
//! use std::io::Cursor;
//! use tinscan_core::alignment::parse_alignments;
//! use tinscan_core::config::ScanConfig;
//! use tinscan_core::features::InsertionFeatures;
//! use tinscan_core::pairing::find_candidate_pairs;
//!
//! let input = "T\t+\t1\t100\tQ\t+\t1\t100\t0\t95\n\
//!              T\t+\t301\t400\tQ\t+\t91\t200\t0\t94\n";
//! let config = ScanConfig::default();
//!
//! let table = parse_alignments(Cursor::new(input), config.min_identity)?;
//! let pairs = find_candidate_pairs(&table, &config.thresholds);
//! assert_eq!(pairs.len(), 1);
//!
//! let features = InsertionFeatures::build(pairs[0], config.report_flanks);
//! assert_eq!((features.site.start, features.site.end), (100, 299));
//! assert_eq!(features.tsd.map(|tsd| tsd.length), Some(9));
//! # Ok::<(), tinscan_core::types::TinscanError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`alignment`]: Alignment table parsing and hit grouping
//! - [`pairing`]: Flank pair detection
//! - [`features`]: Insertion, TSD and flank coordinates
//! - [`output`]: GFF3 serialization
//! - [`engine`]: The end-to-end scanner
//! - [`config`]: Thresholds, presets and labels
//! - [`results`]: Scan summaries
//! - [`types`]: Core data types and errors
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, TinscanError>`](types::TinscanError),
//! reporting:
//!
//! - Lines with too few columns or unparsable numbers and strands
//! - Target coordinates in descending order
//! - I/O errors during file operations
//! - Threshold combinations that can never match

pub mod alignment;
pub mod config;
pub mod constants;
pub mod engine;
pub mod features;
pub mod output;
pub mod pairing;
pub mod results;
pub mod types;

pub use engine::InsertionScanner;
