//! Annotation output for candidate insertions.
//!
//! Candidate pairs are serialized as GFF3. Each insertion becomes one
//! feature with an `IS_<n>` identifier; target site duplications and flanking
//! alignments become child features pointing back at it through `Parent`.
//!
//! ```text
//! #gff-version 3
//! #seqid  source  type  start  end  score  strand  phase  attributes
//! chr1  InsertScanner  Candidate_Insertion  100  299  .  +  .  ID=IS_01;len=199;leftflank=...
//! chr1  InsertScanner  InsertFlank            0   99  .  +  .  ID=IS_01_Flank_L;Parent=IS_01;...
//! chr1  InsertScanner  InsertFlank          300  399  .  +  .  ID=IS_01_Flank_R;Parent=IS_01;...
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use std::io::Cursor;
//! use tinscan_core::alignment::parse_alignments;
//! use tinscan_core::config::ScanConfig;
//! use tinscan_core::output::write_gff;
//! use tinscan_core::pairing::find_candidate_pairs;
//!
//! let input = "T\t+\t1\t100\tQ\t+\t1\t100\t0\t95\n\
//!              T\t+\t301\t400\tQ\t+\t106\t200\t0\t94\n";
//! let config = ScanConfig::default();
//! let table = parse_alignments(Cursor::new(input), config.min_identity)?;
//! let pairs = find_candidate_pairs(&table, &config.thresholds);
//!
//! let mut buffer = Vec::new();
//! write_gff(&mut buffer, &pairs, &config)?;
//! let gff = String::from_utf8(buffer).unwrap();
//! assert_eq!(gff.lines().count(), 5);
//! # Ok::<(), tinscan_core::types::TinscanError>(())
//! ```

mod gff;

use std::io::Write;

use crate::config::ScanConfig;
use crate::pairing::CandidatePair;
use crate::types::TinscanError;

pub use gff::GffLineStream;

/// Writes the full annotation for `pairs`, header included.
///
/// # Arguments
///
/// * `writer` - Output writer (file, stdout, buffer, etc.)
/// * `pairs` - Candidate pairs in emission order
/// * `config` - Supplies the feature labels and the flank reporting flag
///
/// # Returns
///
/// The number of insertion features written.
///
/// # Errors
///
/// Returns [`TinscanError::IoError`] if writing fails.
pub fn write_gff<W: Write>(
    writer: &mut W,
    pairs: &[CandidatePair<'_>],
    config: &ScanConfig,
) -> Result<usize, TinscanError> {
    let mut stream = GffLineStream::new(pairs, &config.labels, config.report_flanks);
    for line in stream.by_ref() {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(stream.insertions_emitted())
}
