//! Reader for tabular whole genome alignment results.
//!
//! The expected input is the ten-column table produced by the alignment step:
//!
//! ```text
//! #name1  strand1  start1  end1  name2  strand2  start2+  end2+  score  identity
//! chr1    +        1       100   ctg7   +        1        100    5000   95.0
//! ```
//!
//! Coordinates are one-based on input and zero-based on every [`AlignmentHit`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use bio::bio_types::strand::Strand;
use log::{debug, warn};

use crate::alignment::HitTable;
use crate::constants::{
    COL_IDENTITY, COL_QUERY_END, COL_QUERY_ID, COL_QUERY_START, COL_QUERY_STRAND, COL_TARGET_END,
    COL_TARGET_ID, COL_TARGET_START, COL_TARGET_STRAND, COMMENT_PREFIX, MIN_ALIGNMENT_FIELDS,
};
use crate::types::{AlignmentHit, Position, TinscanError};

/// Turns alignment lines into [`AlignmentHit`]s for a single pass over one input.
///
/// The reader owns the counter that hands out hit `uid`s, so every pass starts
/// at `1` and numbering depends only on the lines fed to it. Only lines that
/// pass the identity filter advance the counter.
///
/// # Examples
///
/// ```rust
/// use tinscan_core::alignment::AlignmentReader;
///
/// let mut reader = AlignmentReader::new(90.0);
/// assert!(reader.parse_line("# header", 1)?.is_none());
/// assert!(reader.parse_line("chr1\t+\t1\t50\tctg\t+\t1\t50\t10\t80.0", 2)?.is_none());
///
/// let hit = reader
///     .parse_line("chr1\t+\t1\t50\tctg\t-\t50\t1\t10\t99.0", 3)?
///     .unwrap();
/// assert_eq!(hit.uid, 1);
/// assert_eq!((hit.query_start, hit.query_end), (0, 49));
/// # Ok::<(), tinscan_core::types::TinscanError>(())
/// ```
#[derive(Debug)]
pub struct AlignmentReader {
    min_identity: f64,
    next_uid: u64,
    inverted_records: usize,
}

impl AlignmentReader {
    /// Creates a reader that keeps hits with identity `>= min_identity`.
    pub const fn new(min_identity: f64) -> Self {
        Self {
            min_identity,
            next_uid: 1,
            inverted_records: 0,
        }
    }

    /// Number of accepted records whose query coordinates were swapped so far
    pub const fn inverted_records(&self) -> usize {
        self.inverted_records
    }

    /// Parses one line of the alignment table.
    ///
    /// Returns `Ok(None)` for blank lines, comment lines and records below the
    /// identity threshold. A record whose query start is not below its query
    /// end has its query coordinates swapped and a warning is logged.
    ///
    /// # Arguments
    ///
    /// * `line` - Raw line, with or without its trailing newline
    /// * `line_number` - 1-based position of the line in the input, used in errors
    ///
    /// # Errors
    ///
    /// Returns an error if the record has fewer than ten fields, a coordinate
    /// or the identity is not a number, a strand is not `+` or `-`, or the
    /// target coordinates are descending.
    pub fn parse_line(
        &mut self,
        line: &str,
        line_number: usize,
    ) -> Result<Option<AlignmentHit>, TinscanError> {
        let fields: Vec<&str> = line.split_ascii_whitespace().collect();
        let Some(first) = fields.first() else {
            return Ok(None);
        };
        if first.starts_with(COMMENT_PREFIX) {
            return Ok(None);
        }
        if fields.len() < MIN_ALIGNMENT_FIELDS {
            return Err(TinscanError::MissingFields {
                line: line_number,
                expected: MIN_ALIGNMENT_FIELDS,
                found: fields.len(),
            });
        }

        let identity_pct: f64 = parse_number(&fields, COL_IDENTITY, line_number)?;
        if identity_pct.is_nan() || identity_pct < self.min_identity {
            return Ok(None);
        }

        let uid = self.next_uid;
        self.next_uid += 1;

        let target_strand = parse_strand(&fields, COL_TARGET_STRAND, line_number)?;
        let query_strand = parse_strand(&fields, COL_QUERY_STRAND, line_number)?;

        let target_start = parse_position(&fields, COL_TARGET_START, line_number)?;
        let target_end = parse_position(&fields, COL_TARGET_END, line_number)?;
        if target_start > target_end {
            return Err(TinscanError::InvalidCoordinates {
                line: line_number,
                start: target_start + 1,
                end: target_end + 1,
            });
        }

        let first_query = parse_position(&fields, COL_QUERY_START, line_number)?;
        let second_query = parse_position(&fields, COL_QUERY_END, line_number)?;
        let (query_start, query_end) = if first_query < second_query {
            (first_query, second_query)
        } else {
            warn!("Inverting query sequence coordinates for record number: {uid}");
            self.inverted_records += 1;
            (second_query, first_query)
        };

        Ok(Some(AlignmentHit {
            target_id: fields[COL_TARGET_ID].to_string(),
            query_id: fields[COL_QUERY_ID].to_string(),
            target_start,
            target_end,
            target_strand,
            query_start,
            query_end,
            query_strand,
            identity_pct,
            uid,
        }))
    }

    /// Reads every line from `reader` and groups the accepted hits.
    ///
    /// Consumes the reader, so the `uid` sequence cannot leak into another pass.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed line or I/O failure; no partial table is
    /// returned.
    pub fn read<R: BufRead>(mut self, reader: R) -> Result<HitTable, TinscanError> {
        let mut table = HitTable::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(hit) = self.parse_line(&line, index + 1)? {
                table.push(hit);
            }
        }
        table.set_inverted_records(self.inverted_records);
        debug!(
            "Accepted {} hits in {} target/query buckets",
            table.hit_count(),
            table.bucket_count()
        );
        Ok(table)
    }
}

/// Parses alignment lines from any buffered reader.
///
/// # Errors
///
/// See [`AlignmentReader::read`].
pub fn parse_alignments<R: BufRead>(
    reader: R,
    min_identity: f64,
) -> Result<HitTable, TinscanError> {
    AlignmentReader::new(min_identity).read(reader)
}

/// Opens and parses an alignment table from disk.
///
/// # Errors
///
/// Returns [`TinscanError::IoError`] if the file cannot be opened or read, and
/// a parse error for the first malformed line.
pub fn read_alignment_file<P: AsRef<Path>>(
    path: P,
    min_identity: f64,
) -> Result<HitTable, TinscanError> {
    let file = File::open(path)?;
    parse_alignments(BufReader::new(file), min_identity)
}

fn parse_number<T: FromStr>(
    fields: &[&str],
    column: usize,
    line_number: usize,
) -> Result<T, TinscanError> {
    fields[column]
        .parse()
        .map_err(|_| TinscanError::InvalidField {
            line: line_number,
            column: column + 1,
            value: fields[column].to_string(),
        })
}

/// One-based input coordinate converted to a zero-based [`Position`]
fn parse_position(
    fields: &[&str],
    column: usize,
    line_number: usize,
) -> Result<Position, TinscanError> {
    parse_number::<Position>(fields, column, line_number)?
        .checked_sub(1)
        .ok_or_else(|| TinscanError::InvalidField {
            line: line_number,
            column: column + 1,
            value: fields[column].to_string(),
        })
}

fn parse_strand(fields: &[&str], column: usize, line_number: usize) -> Result<Strand, TinscanError> {
    match fields[column] {
        "+" => Ok(Strand::Forward),
        "-" => Ok(Strand::Reverse),
        other => Err(TinscanError::InvalidStrand {
            line: line_number,
            column: column + 1,
            value: other.to_string(),
        }),
    }
}
