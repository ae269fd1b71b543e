// =============================================================================
// Input layout
// =============================================================================

/// Version string for tinscan
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum number of columns in an alignment record
pub const MIN_ALIGNMENT_FIELDS: usize = 10;

/// Prefix marking a comment line in the alignment table
pub const COMMENT_PREFIX: char = '#';

// Zero-based column indices of the alignment table
pub const COL_TARGET_ID: usize = 0;
pub const COL_TARGET_STRAND: usize = 1;
pub const COL_TARGET_START: usize = 2;
pub const COL_TARGET_END: usize = 3;
pub const COL_QUERY_ID: usize = 4;
pub const COL_QUERY_STRAND: usize = 5;
pub const COL_QUERY_START: usize = 6;
pub const COL_QUERY_END: usize = 7;
pub const COL_IDENTITY: usize = 9;

// =============================================================================
// Pairing defaults
// =============================================================================

/// Minimum percent identity for a hit to be kept
pub const DEFAULT_MIN_IDENTITY: f64 = 90.0;

/// Maximum difference in percent identity between the two flanks of an insertion
pub const DEFAULT_MAX_IDENTITY_DIFF: f64 = 20.0;

/// Minimum target-side distance between flanks
pub const DEFAULT_MIN_INSERT: i64 = 100;

/// Maximum target-side distance between flanks
pub const DEFAULT_MAX_INSERT: i64 = 100_000;

/// Maximum target-side distance between flanks used by the legacy insert-finder labels
pub const LEGACY_MAX_INSERT: i64 = 20_000;

/// Maximum gap between flanks on the query sequence
pub const DEFAULT_Q_GAP: i64 = 100;

/// Maximum query-side overlap of flanks accepted as a target site duplication
pub const DEFAULT_MAX_TSD: i64 = 100;

// =============================================================================
// Output
// =============================================================================

/// Default name of the annotation file written by the scanner
pub const DEFAULT_GFF_NAME: &str = "candidate_insertion_events.gff3";

/// First header line of the annotation stream
pub const GFF_VERSION_LINE: &str = "#gff-version 3";

/// Column-name comment that follows the version line
pub const GFF_COLUMNS_LINE: &str = "#seqid\tsource\ttype\tstart\tend\tscore\tstrand\tphase\tattributes";

/// Prefix of insertion feature identifiers
pub const INSERTION_ID_PREFIX: &str = "IS_";
