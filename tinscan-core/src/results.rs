use std::fmt;

/// Counts collected over one scan.
///
/// # Examples
///
/// ```rust,no_run
/// use tinscan_core::{InsertionScanner, config::ScanConfig};
///
/// let scanner = InsertionScanner::with_config(ScanConfig::default())?;
/// let summary = scanner.scan_file("alignments.tab", "insertions.gff3")?;
///
/// println!("{} hits in {} buckets", summary.hits, summary.buckets);
/// println!("{} candidate insertions, {} with a TSD", summary.candidates, summary.with_tsd);
/// # Ok::<(), tinscan_core::types::TinscanError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Alignment records that passed the identity filter
    pub hits: usize,

    /// Accepted records whose query coordinates were swapped
    pub inverted_records: usize,

    /// Distinct target/query sequence combinations
    pub buckets: usize,

    /// Hits in the largest target/query bucket.
    ///
    /// Pairing time grows with the square of this number.
    pub largest_bucket: usize,

    /// Candidate insertions written
    pub candidates: usize,

    /// Candidate insertions with a target site duplication
    pub with_tsd: usize,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} candidate insertions ({} with TSD) from {} hits in {} target/query pairs",
            self.candidates, self.with_tsd, self.hits, self.buckets
        )
    }
}
