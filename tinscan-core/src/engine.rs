use std::fs;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use tempfile::Builder;

use crate::alignment::{HitTable, parse_alignments, read_alignment_file};
use crate::config::ScanConfig;
use crate::features::TargetSiteDuplication;
use crate::output::write_gff;
use crate::pairing::{CandidatePair, find_candidate_pairs};
use crate::results::ScanSummary;
use crate::types::TinscanError;

/// High-level insertion scanner.
///
/// Runs the whole detection pipeline: the alignment table is parsed into
/// grouped hits, hits are paired, and every pair is written as GFF3 with its
/// target site duplication and flank features.
///
/// # Examples
///
/// ## Scan in memory
///
/// ```rust
/// use std::io::Cursor;
/// use tinscan_core::{InsertionScanner, config::ScanConfig};
///
/// let alignments = "T\t+\t1\t100\tQ\t+\t1\t100\t0\t95\n\
///                   T\t+\t301\t400\tQ\t+\t91\t200\t0\t94\n";
///
/// let scanner = InsertionScanner::with_config(ScanConfig::default())?;
/// let mut gff = Vec::new();
/// let summary = scanner.scan(Cursor::new(alignments), &mut gff)?;
///
/// assert_eq!(summary.candidates, 1);
/// assert_eq!(summary.with_tsd, 1);
/// # Ok::<(), tinscan_core::types::TinscanError>(())
/// ```
///
/// ## Scan files
///
/// ```rust,no_run
/// use tinscan_core::{InsertionScanner, config::{Preset, ScanConfig}};
///
/// let config = ScanConfig {
///     report_flanks: false,
///     ..ScanConfig::from_preset(Preset::InsertFinder)
/// };
/// let scanner = InsertionScanner::with_config(config)?;
/// let summary = scanner.scan_file("tinscan_alignment.tab", "candidate_insertion_events.gff3")?;
/// println!("{summary}");
/// # Ok::<(), tinscan_core::types::TinscanError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InsertionScanner {
    /// Thresholds, labels and output options
    pub config: ScanConfig,
}

impl InsertionScanner {
    /// Creates a scanner without checking the configuration.
    pub const fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Creates a scanner after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TinscanError::InvalidConfig`] if the thresholds can never be
    /// satisfied.
    pub fn with_config(config: ScanConfig) -> Result<Self, TinscanError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parses an alignment table with this scanner's identity threshold.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable input or the first malformed record.
    pub fn read_hits<R: BufRead>(&self, reader: R) -> Result<HitTable, TinscanError> {
        parse_alignments(reader, self.config.min_identity)
    }

    /// Candidate pairs of an already parsed table
    pub fn find_pairs<'a>(&self, table: &'a HitTable) -> Vec<CandidatePair<'a>> {
        let pairs = find_candidate_pairs(table, &self.config.thresholds);
        debug!(
            "Paired {} hits (largest bucket {}) into {} candidates",
            table.hit_count(),
            table.largest_bucket(),
            pairs.len()
        );
        pairs
    }

    /// Scans alignments from `reader` and writes GFF3 to `writer`.
    ///
    /// The whole input is parsed before anything is written, so malformed
    /// input leaves `writer` untouched.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed input or if writing fails.
    pub fn scan<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<ScanSummary, TinscanError> {
        let table = self.read_hits(reader)?;
        self.write_table(&table, writer)
    }

    /// Scans an alignment file and commits the annotation to `output`.
    ///
    /// The annotation is written to a temporary file next to `output` and
    /// moved into place only once complete; on any error `output` is left as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns [`TinscanError::IoError`] if the input cannot be read or the
    /// output cannot be created, and a parse error for malformed input.
    pub fn scan_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ScanSummary, TinscanError> {
        let input = input.as_ref();
        let output = output.as_ref();

        info!("Reading alignments from {}", input.display());
        let table = read_alignment_file(input, self.config.min_identity)?;

        let directory = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        fs::create_dir_all(&directory)?;

        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = Builder::new();
        // Same mode as `File::create`; the process umask still applies.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let staged = builder.tempfile_in(&directory)?;
        let summary = {
            let mut writer = BufWriter::new(staged.as_file());
            self.write_table(&table, &mut writer)?
        };
        staged.persist(output).map_err(|e| TinscanError::IoError(e.error))?;

        info!("Wrote {} candidate insertions to {}", summary.candidates, output.display());
        Ok(summary)
    }

    fn write_table<W: Write>(
        &self,
        table: &HitTable,
        writer: &mut W,
    ) -> Result<ScanSummary, TinscanError> {
        let pairs = self.find_pairs(table);
        let candidates = write_gff(writer, &pairs, &self.config)?;
        Ok(ScanSummary {
            hits: table.hit_count(),
            inverted_records: table.inverted_records(),
            buckets: table.bucket_count(),
            largest_bucket: table.largest_bucket(),
            candidates,
            with_tsd: pairs
                .iter()
                .filter(|pair| TargetSiteDuplication::detect(pair).is_some())
                .count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const INPUT: &str = "#name1\tstrand1\tstart1\tend1\tname2\tstrand2\tstart2+\tend2+\tscore\tidentity\n\
                         T\t+\t1\t100\tQ\t+\t1\t100\t5000\t95\n\
                         T\t+\t301\t400\tQ\t+\t106\t200\t4000\t94\n";

    #[test]
    fn test_scan_in_memory() {
        let scanner = InsertionScanner::default();
        let mut output = Vec::new();
        let summary = scanner.scan(Cursor::new(INPUT), &mut output).unwrap();

        assert_eq!(summary.hits, 2);
        assert_eq!(summary.buckets, 1);
        assert_eq!(summary.largest_bucket, 2);
        assert_eq!(summary.candidates, 1);
        assert_eq!(summary.with_tsd, 0);
        assert_eq!(summary.inverted_records, 0);

        let gff = String::from_utf8(output).unwrap();
        assert!(gff.contains("T\tInsertScanner\tCandidate_Insertion\t100\t299\t"));
    }

    #[test]
    fn test_scan_malformed_input_writes_nothing() {
        let scanner = InsertionScanner::default();
        let mut output = Vec::new();
        let input = format!("{INPUT}T\t+\t1\t100\n");
        let result = scanner.scan(Cursor::new(input), &mut output);
        assert!(matches!(
            result,
            Err(TinscanError::MissingFields { line: 4, .. })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = ScanConfig::default();
        config.thresholds.min_insert = 10;
        config.thresholds.max_insert = 5;
        assert!(InsertionScanner::with_config(config).is_err());
    }

    #[test]
    fn test_scan_file_commits_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("alignments.tab");
        fs::write(&input, INPUT).unwrap();
        let output = dir.path().join("nested").join("out.gff3");

        let scanner = InsertionScanner::default();
        let summary = scanner.scan_file(&input, &output).unwrap();
        assert_eq!(summary.candidates, 1);

        let gff = fs::read_to_string(&output).unwrap();
        assert!(gff.starts_with("#gff-version 3\n"));
        assert_eq!(gff.lines().count(), 5);
        // Only the committed file remains next to the input.
        let staged: Vec<_> = fs::read_dir(output.parent().unwrap()).unwrap().collect();
        assert_eq!(staged.len(), 1);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let created = dir.path().join("created.gff3");
            fs::File::create(&created).unwrap();
            let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode(&output), mode(&created));
        }
    }

    #[test]
    fn test_scan_file_keeps_previous_output_on_parse_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.tab");
        fs::write(&input, "T\t+\t1\t100\tQ\t+\t1\t100\t5000\tninety\n").unwrap();
        let output = dir.path().join("out.gff3");
        fs::write(&output, "previous run\n").unwrap();

        let result = InsertionScanner::default().scan_file(&input, &output);
        assert!(matches!(result, Err(TinscanError::InvalidField { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous run\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_scan_file_missing_input() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.gff3");
        let result = InsertionScanner::default().scan_file(dir.path().join("absent.tab"), &output);
        assert!(matches!(result, Err(TinscanError::IoError(_))));
        assert!(!output.exists());
    }
}
