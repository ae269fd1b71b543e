use std::fmt;

use bio::bio_types::strand::Strand;
use thiserror::Error;

/// A zero-based, inclusive coordinate on a target or query sequence.
pub type Position = i64;

/// One accepted alignment between a target and a query sequence region.
///
/// Hits are produced by [`AlignmentReader`](crate::alignment::AlignmentReader)
/// and never change afterwards. Coordinates are zero-based and inclusive,
/// query coordinates are always ascending regardless of `query_strand`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentHit {
    /// Name of the target sequence
    pub target_id: String,
    /// Name of the query sequence
    pub query_id: String,
    /// Start of the alignment on the target
    pub target_start: Position,
    /// End of the alignment on the target
    pub target_end: Position,
    /// Strand of the alignment on the target
    pub target_strand: Strand,
    /// Start of the alignment on the query
    pub query_start: Position,
    /// End of the alignment on the query
    pub query_end: Position,
    /// Strand of the alignment on the query
    pub query_strand: Strand,
    /// Percent identity reported by the aligner
    pub identity_pct: f64,
    /// 1-based ordinal of the hit among accepted records
    pub uid: u64,
}

impl AlignmentHit {
    /// Number of target bases spanned, as reported in flank `len` attributes
    #[must_use]
    pub const fn target_span(&self) -> Position {
        self.target_end - self.target_start
    }

    /// `<query>_<strand>_<start>_<end>` description of the query-side interval
    pub(crate) fn query_summary(&self, quote_strand: bool) -> String {
        let strand = strand_symbol(self.query_strand);
        if quote_strand {
            format!(
                "{}_\"{}\"_{}_{}",
                self.query_id, strand, self.query_start, self.query_end
            )
        } else {
            format!(
                "{}_{}_{}_{}",
                self.query_id, strand, self.query_start, self.query_end
            )
        }
    }
}

/// Percent identity rendered with at least one fractional digit (`95.0`, `94.5`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Identity(pub f64);

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the shortest round-trip digits and always prints a fraction.
        write!(f, "{:?}", self.0)
    }
}

/// GFF strand column character for a [`Strand`]
#[must_use]
pub const fn strand_symbol(strand: Strand) -> char {
    match strand {
        Strand::Forward => '+',
        Strand::Reverse => '-',
        Strand::Unknown => '.',
    }
}

/// Error types that can occur while scanning alignments for insertions
#[derive(Error, Debug)]
pub enum TinscanError {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Record has fewer columns than the alignment table requires
    #[error("Line {line}: expected at least {expected} fields, found {found}")]
    MissingFields {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A numeric column holds something that is not a number
    #[error("Line {line}: invalid numeric value {value:?} in column {column}")]
    InvalidField {
        line: usize,
        column: usize,
        value: String,
    },
    /// A strand column holds something other than `+` or `-`
    #[error("Line {line}: invalid strand {value:?} in column {column}")]
    InvalidStrand {
        line: usize,
        column: usize,
        value: String,
    },
    /// Target coordinates run backwards
    #[error("Line {line}: target start {start} is after target end {end}")]
    InvalidCoordinates { line: usize, start: i64, end: i64 },
    /// Thresholds that can never be satisfied together
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
