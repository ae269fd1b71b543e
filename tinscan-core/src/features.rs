//! Geometry of the features derived from a candidate pair.
//!
//! For a pair `(hit, mate)` the insertion occupies the target bases strictly
//! between the two flanks. When the flanks overlap on the query, the overlap is
//! read as a target site duplication: the same query bases appear at the inner
//! end of both flanks on the target.

use bio::bio_types::strand::Strand;

use crate::pairing::CandidatePair;
use crate::types::{AlignmentHit, Position};

/// Closed interval on a target sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: Position,
    pub end: Position,
}

/// Target region between the two flanks of a pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionSite {
    /// First target base after the left flank
    pub start: Position,
    /// Last target base before the right flank
    pub end: Position,
    /// Target strand of the left flank
    pub strand: Strand,
}

impl InsertionSite {
    pub const fn from_pair(pair: &CandidatePair<'_>) -> Self {
        Self {
            start: pair.hit.target_end + 1,
            end: pair.mate.target_start - 1,
            strand: pair.hit.target_strand,
        }
    }

    /// `end - start`; zero or negative for flanks that abut on the target.
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> i64 {
        self.end - self.start
    }
}

/// Duplicated target site on either side of an insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSiteDuplication {
    /// Query-side overlap of the flanks, always positive
    pub length: i64,
    /// Copy at the inner end of the left flank
    pub left: Interval,
    /// Copy at the inner end of the right flank
    pub right: Interval,
    /// Strand of the owning insertion
    pub strand: Strand,
}

/// Query-side overlap of the flanks, positive when they share query bases.
///
/// On the forward query strand this is `hit.query_end - mate.query_start`, on
/// the reverse strand `mate.query_end - hit.query_start`.
pub const fn flank_overlap(pair: &CandidatePair<'_>) -> Option<i64> {
    match pair.hit.query_strand {
        Strand::Forward => Some(pair.hit.query_end - pair.mate.query_start),
        Strand::Reverse => Some(pair.mate.query_end - pair.hit.query_start),
        Strand::Unknown => None,
    }
}

impl TargetSiteDuplication {
    /// Finds the duplication implied by overlapping flanks, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bio::bio_types::strand::Strand;
    /// use tinscan_core::features::{Interval, TargetSiteDuplication};
    /// use tinscan_core::pairing::CandidatePair;
    /// use tinscan_core::types::AlignmentHit;
    ///
    /// let hit = AlignmentHit {
    ///     target_id: "T".into(),
    ///     query_id: "Q".into(),
    ///     target_start: 0,
    ///     target_end: 99,
    ///     target_strand: Strand::Forward,
    ///     query_start: 0,
    ///     query_end: 99,
    ///     query_strand: Strand::Forward,
    ///     identity_pct: 95.0,
    ///     uid: 1,
    /// };
    /// let mate = AlignmentHit {
    ///     target_start: 300,
    ///     target_end: 399,
    ///     query_start: 90,
    ///     query_end: 199,
    ///     uid: 2,
    ///     ..hit.clone()
    /// };
    ///
    /// let tsd = TargetSiteDuplication::detect(&CandidatePair { hit: &hit, mate: &mate }).unwrap();
    /// assert_eq!(tsd.length, 9);
    /// assert_eq!(tsd.left, Interval { start: 90, end: 99 });
    /// assert_eq!(tsd.right, Interval { start: 300, end: 309 });
    /// ```
    pub fn detect(pair: &CandidatePair<'_>) -> Option<Self> {
        let length = flank_overlap(pair).filter(|&overlap| overlap > 0)?;
        Some(Self {
            length,
            left: Interval {
                start: pair.hit.target_end - length,
                end: pair.hit.target_end,
            },
            right: Interval {
                start: pair.mate.target_start,
                end: pair.mate.target_start + length,
            },
            strand: pair.hit.target_strand,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlankSide {
    Left,
    Right,
}

impl FlankSide {
    /// Suffix appended to the insertion identifier
    pub const fn id_suffix(self) -> &'static str {
        match self {
            Self::Left => "_Flank_L",
            Self::Right => "_Flank_R",
        }
    }

    /// Prefix of the `*flank` and `*ID` attribute keys
    pub const fn attribute_prefix(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One of the two alignments bracketing an insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flank<'a> {
    pub side: FlankSide,
    pub hit: &'a AlignmentHit,
}

impl Flank<'_> {
    pub const fn interval(&self) -> Interval {
        Interval {
            start: self.hit.target_start,
            end: self.hit.target_end,
        }
    }
}

/// Everything emitted for one candidate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertionFeatures<'a> {
    pub pair: CandidatePair<'a>,
    pub site: InsertionSite,
    pub tsd: Option<TargetSiteDuplication>,
    pub flanks: Option<[Flank<'a>; 2]>,
}

impl<'a> InsertionFeatures<'a> {
    /// Derives the insertion, its duplication and optionally its flanks.
    pub fn build(pair: CandidatePair<'a>, report_flanks: bool) -> Self {
        let flanks = report_flanks.then(|| {
            [
                Flank {
                    side: FlankSide::Left,
                    hit: pair.hit,
                },
                Flank {
                    side: FlankSide::Right,
                    hit: pair.mate,
                },
            ]
        });
        Self {
            site: InsertionSite::from_pair(&pair),
            tsd: TargetSiteDuplication::detect(&pair),
            flanks,
            pair,
        }
    }
}
