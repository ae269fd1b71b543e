//! Pairing of alignment hits that bracket a candidate insertion.
//!
//! Two hits from the same target/query bucket form a candidate when the left
//! one (`hit`) ends shortly before the right one (`mate`) starts on the
//! target, while on the query the two are adjacent, separated by a small gap,
//! or overlapping by no more than a target site duplication. The target-side
//! distance is the size of the sequence present in the target but missing from
//! the query.
//!
//! ## Scaling
//!
//! Every bucket is scanned exhaustively, each hit against every other hit, so
//! the work for a bucket grows with the square of its size. Buckets are not
//! sorted and no best pairing is selected: a hit can take part in any number
//! of pairs, as left flank in some and right flank in others, and nested or
//! overlapping candidates are all reported.

use bio::bio_types::strand::Strand;

use crate::alignment::{HitBucket, HitTable};
use crate::config::PairingThresholds;
use crate::types::AlignmentHit;

/// Left (`hit`) and right (`mate`) flank of a putative insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePair<'a> {
    pub hit: &'a AlignmentHit,
    pub mate: &'a AlignmentHit,
}

impl<'a> CandidatePair<'a> {
    pub fn target_id(&self) -> &'a str {
        &self.hit.target_id
    }

    pub fn query_id(&self) -> &'a str {
        &self.hit.query_id
    }

    /// Distance between the flanks on the target
    pub const fn insert_length(&self) -> i64 {
        self.mate.target_start - self.hit.target_end
    }

    /// Distance between the flanks on the query, negative when they overlap.
    ///
    /// Measured in the direction of the query strand; `None` when the shared
    /// strand is unknown.
    pub const fn query_gap(&self) -> Option<i64> {
        query_gap(self.hit, self.mate)
    }
}

const fn query_gap(hit: &AlignmentHit, mate: &AlignmentHit) -> Option<i64> {
    match hit.query_strand {
        Strand::Forward => Some(mate.query_start - hit.query_end),
        Strand::Reverse => Some(hit.query_start - mate.query_end),
        Strand::Unknown => None,
    }
}

/// Checks whether `hit` followed by `mate` brackets a plausible insertion.
///
/// All of the following must hold:
///
/// 1. the hits are distinct (`uid` differs)
/// 2. both align to the same query strand
/// 3. their identities differ by at most `max_identity_diff`
/// 4. `min_insert <= mate.target_start - hit.target_end <= max_insert`
/// 5. the query-side gap lies in `[-max_tsd, q_gap]`
///
/// # Examples
///
/// ```rust
/// use bio::bio_types::strand::Strand;
/// use tinscan_core::config::PairingThresholds;
/// use tinscan_core::pairing::is_candidate_pair;
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
///     query_start: 105,
///     query_end: 199,
///     identity_pct: 94.0,
///     uid: 2,
///     ..hit.clone()
/// };
///
/// let thresholds = PairingThresholds::default();
/// assert!(is_candidate_pair(&hit, &mate, &thresholds));
/// assert!(!is_candidate_pair(&mate, &hit, &thresholds));
/// ```
pub fn is_candidate_pair(
    hit: &AlignmentHit,
    mate: &AlignmentHit,
    thresholds: &PairingThresholds,
) -> bool {
    if hit.uid == mate.uid || hit.query_strand != mate.query_strand {
        return false;
    }
    if (mate.identity_pct - hit.identity_pct).abs() > thresholds.max_identity_diff {
        return false;
    }
    let insert_length = mate.target_start - hit.target_end;
    if insert_length < thresholds.min_insert || insert_length > thresholds.max_insert {
        return false;
    }
    query_gap(hit, mate).is_some_and(|gap| gap >= -thresholds.max_tsd && gap <= thresholds.q_gap)
}

/// Every valid pair within one bucket, `hit`-major in bucket order.
pub fn bucket_pairs<'a>(
    bucket: &'a HitBucket,
    thresholds: &PairingThresholds,
) -> Vec<CandidatePair<'a>> {
    let mut pairs = Vec::new();
    for hit in &bucket.hits {
        for mate in &bucket.hits {
            if is_candidate_pair(hit, mate, thresholds) {
                pairs.push(CandidatePair { hit, mate });
            }
        }
    }
    pairs
}

/// Enumerates every candidate pair in the table.
///
/// Pairs are ordered by target (first appearance), then query within the
/// target, then `hit` and `mate` in bucket order. The same table and
/// thresholds always give the same list.
pub fn find_candidate_pairs<'a>(
    table: &'a HitTable,
    thresholds: &PairingThresholds,
) -> Vec<CandidatePair<'a>> {
    table
        .buckets()
        .flat_map(|bucket| bucket_pairs(bucket, thresholds))
        .collect()
}
