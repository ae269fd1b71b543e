use crate::constants::{
    DEFAULT_MAX_IDENTITY_DIFF, DEFAULT_MAX_INSERT, DEFAULT_MAX_TSD, DEFAULT_MIN_IDENTITY,
    DEFAULT_MIN_INSERT, DEFAULT_Q_GAP, LEGACY_MAX_INSERT,
};
use crate::types::TinscanError;

/// Named sets of output labels and default thresholds.
///
/// The scanner has historically shipped in two flavours that differ only in
/// presentation and in the default insertion size limit. Both run the same
/// detection logic.
///
/// # Presets
///
/// - **Scanner**: `InsertScanner` source, `Candidate_*` feature types, quoted
///   query strand in flank descriptions, insertions up to 100 kb
/// - **InsertFinder**: `InsertFinder` source, bare `Insertion`/`TSD` feature
///   types, unquoted query strand, insertions up to 20 kb
///
/// # Examples
///
/// ```rust
/// use tinscan_core::config::{Preset, ScanConfig};
///
/// let config = ScanConfig::from_preset(Preset::InsertFinder);
/// assert_eq!(config.thresholds.max_insert, 20_000);
/// assert_eq!(config.labels.source, "InsertFinder");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Labels and defaults of the packaged scanner.
    #[default]
    Scanner,

    /// Labels and defaults of the standalone insert-finder script.
    InsertFinder,
}

impl Preset {
    /// Feature labels written by this preset
    #[must_use]
    pub fn labels(self) -> FeatureLabels {
        match self {
            Self::Scanner => FeatureLabels {
                source: "InsertScanner".to_string(),
                insertion_type: "Candidate_Insertion".to_string(),
                tsd_type: "Candidate_TSD".to_string(),
                flank_type: "InsertFlank".to_string(),
                quote_flank_strand: true,
            },
            Self::InsertFinder => FeatureLabels {
                source: "InsertFinder".to_string(),
                insertion_type: "Insertion".to_string(),
                tsd_type: "TSD".to_string(),
                flank_type: "InsertFlank".to_string(),
                quote_flank_strand: false,
            },
        }
    }

    /// Pairing thresholds this preset starts from
    #[must_use]
    pub const fn thresholds(self) -> PairingThresholds {
        let max_insert = match self {
            Self::Scanner => DEFAULT_MAX_INSERT,
            Self::InsertFinder => LEGACY_MAX_INSERT,
        };
        PairingThresholds {
            max_identity_diff: DEFAULT_MAX_IDENTITY_DIFF,
            min_insert: DEFAULT_MIN_INSERT,
            max_insert,
            q_gap: DEFAULT_Q_GAP,
            max_tsd: DEFAULT_MAX_TSD,
        }
    }
}

/// Presentation strings for emitted GFF features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLabels {
    /// GFF `source` column
    pub source: String,
    /// GFF `type` of insertion features
    pub insertion_type: String,
    /// GFF `type` of target site duplication features
    pub tsd_type: String,
    /// GFF `type` of flank features
    pub flank_type: String,
    /// Wrap the query strand in double quotes inside `leftflank`/`rightflank` values
    pub quote_flank_strand: bool,
}

impl Default for FeatureLabels {
    fn default() -> Self {
        Preset::default().labels()
    }
}

/// Numeric limits a pair of hits must satisfy to bracket a candidate insertion.
///
/// All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairingThresholds {
    /// Largest allowed difference in percent identity between the two flanks.
    ///
    /// **Default**: `20`
    pub max_identity_diff: f64,

    /// Smallest allowed distance between the flanks on the target
    /// (`mate.target_start - hit.target_end`).
    ///
    /// Very small values start picking up short indels that are not
    /// transposon insertions.
    ///
    /// **Default**: `100`
    pub min_insert: i64,

    /// Largest allowed distance between the flanks on the target.
    ///
    /// **Default**: `100000` (`20000` for [`Preset::InsertFinder`])
    pub max_insert: i64,

    /// Largest allowed gap between the flanks on the query. This corresponds to
    /// target sequence deleted when the element inserted.
    ///
    /// **Default**: `100`
    pub q_gap: i64,

    /// Largest query-side overlap of the flanks that is still read as a target
    /// site duplication. Pairs overlapping by more are discarded; setting this
    /// too high lets tandem duplications in the target pass as insertions.
    ///
    /// **Default**: `100`
    pub max_tsd: i64,
}

impl Default for PairingThresholds {
    fn default() -> Self {
        Preset::default().thresholds()
    }
}

/// Configuration settings for an insertion scan.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use tinscan_core::config::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.min_identity, 90.0);
/// assert!(config.report_flanks);
/// ```
///
/// ## Stricter hits, no flank features
///
/// ```rust
/// use tinscan_core::config::ScanConfig;
///
/// let mut config = ScanConfig {
///     min_identity: 95.0,
///     report_flanks: false,
///     ..Default::default()
/// };
/// config.thresholds.max_tsd = 20;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Hits below this percent identity are dropped while parsing.
    ///
    /// **Default**: `90`
    pub min_identity: f64,

    /// Limits applied when pairing hits.
    pub thresholds: PairingThresholds,

    /// Emit the two flanking alignments of every insertion as child features.
    ///
    /// **Default**: `true`
    pub report_flanks: bool,

    /// Source and type strings written to the GFF.
    pub labels: FeatureLabels,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl ScanConfig {
    /// Configuration with the labels and thresholds of `preset`
    #[must_use]
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            min_identity: DEFAULT_MIN_IDENTITY,
            thresholds: preset.thresholds(),
            report_flanks: true,
            labels: preset.labels(),
        }
    }

    /// Checks that the thresholds can be satisfied at all.
    ///
    /// # Errors
    ///
    /// Returns [`TinscanError::InvalidConfig`] when a limit is negative, not a
    /// number, or a lower bound exceeds its upper bound.
    pub fn validate(&self) -> Result<(), TinscanError> {
        let t = &self.thresholds;
        if !self.min_identity.is_finite() {
            return Err(TinscanError::InvalidConfig(format!(
                "minimum identity must be a finite number, got {}",
                self.min_identity
            )));
        }
        if t.max_identity_diff.is_nan() || t.max_identity_diff < 0.0 {
            return Err(TinscanError::InvalidConfig(format!(
                "maximum identity difference must be non-negative, got {}",
                t.max_identity_diff
            )));
        }
        if t.min_insert > t.max_insert {
            return Err(TinscanError::InvalidConfig(format!(
                "minimum insert ({}) is larger than maximum insert ({})",
                t.min_insert, t.max_insert
            )));
        }
        if t.max_tsd < 0 {
            return Err(TinscanError::InvalidConfig(format!(
                "maximum TSD length must be non-negative, got {}",
                t.max_tsd
            )));
        }
        if t.q_gap < -t.max_tsd {
            return Err(TinscanError::InvalidConfig(format!(
                "query gap ({}) is below the negated maximum TSD length ({})",
                t.q_gap, -t.max_tsd
            )));
        }
        Ok(())
    }
}
