//! Alignment records grouped by target and query sequence.
//!
//! Hits are stored in buckets keyed by `(target_id, query_id)`. Iteration
//! follows the order in which targets, and then queries within a target, were
//! first seen in the input; hits inside a bucket keep their input order. The
//! pairing step relies on this ordering to produce a deterministic result.
//!
//! ## Examples
//!
//! ```rust
//! use std::io::Cursor;
//! use tinscan_core::alignment::parse_alignments;
//!
//! let table = parse_alignments(
//!     Cursor::new("chr1\t+\t1\t100\tctg7\t+\t1\t100\t5000\t95.0\n"),
//!     90.0,
//! )?;
//! assert_eq!(table.hit_count(), 1);
//! assert!(table.bucket("chr1", "ctg7").is_some());
//! # Ok::<(), tinscan_core::types::TinscanError>(())
//! ```

pub mod reader;

use rustc_hash::FxHashMap;

use crate::types::AlignmentHit;

pub use reader::{AlignmentReader, parse_alignments, read_alignment_file};

/// Hits shared by one target and one query sequence, in input order.
#[derive(Debug, Clone)]
pub struct HitBucket {
    pub target_id: String,
    pub query_id: String,
    pub hits: Vec<AlignmentHit>,
}

/// All buckets of a single target sequence.
#[derive(Debug, Clone)]
pub struct TargetHits {
    pub target_id: String,
    buckets: Vec<HitBucket>,
    query_index: FxHashMap<String, usize>,
}

impl TargetHits {
    fn new(target_id: String) -> Self {
        Self {
            target_id,
            buckets: Vec::new(),
            query_index: FxHashMap::default(),
        }
    }

    /// Buckets in order of first appearance of their query
    pub fn buckets(&self) -> &[HitBucket] {
        &self.buckets
    }

    fn bucket_mut(&mut self, query_id: &str) -> &mut HitBucket {
        let index = match self.query_index.get(query_id) {
            Some(&index) => index,
            None => {
                let index = self.buckets.len();
                self.buckets.push(HitBucket {
                    target_id: self.target_id.clone(),
                    query_id: query_id.to_string(),
                    hits: Vec::new(),
                });
                self.query_index.insert(query_id.to_string(), index);
                index
            }
        };
        &mut self.buckets[index]
    }
}

/// Accepted hits partitioned by `(target_id, query_id)`.
#[derive(Debug, Clone, Default)]
pub struct HitTable {
    targets: Vec<TargetHits>,
    target_index: FxHashMap<String, usize>,
    inverted_records: usize,
}

impl HitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `hit` to the end of its bucket, creating the bucket if needed.
    pub fn push(&mut self, hit: AlignmentHit) {
        let index = match self.target_index.get(&hit.target_id) {
            Some(&index) => index,
            None => {
                let index = self.targets.len();
                self.targets.push(TargetHits::new(hit.target_id.clone()));
                self.target_index.insert(hit.target_id.clone(), index);
                index
            }
        };
        self.targets[index].bucket_mut(&hit.query_id).hits.push(hit);
    }

    /// Targets in order of first appearance
    pub fn targets(&self) -> &[TargetHits] {
        &self.targets
    }

    /// Every bucket, target by target
    pub fn buckets(&self) -> impl Iterator<Item = &HitBucket> {
        self.targets.iter().flat_map(|target| target.buckets.iter())
    }

    pub fn bucket(&self, target_id: &str, query_id: &str) -> Option<&HitBucket> {
        let target = &self.targets[*self.target_index.get(target_id)?];
        let index = *target.query_index.get(query_id)?;
        target.buckets.get(index)
    }

    /// Every hit, bucket by bucket
    pub fn hits(&self) -> impl Iterator<Item = &AlignmentHit> {
        self.buckets().flat_map(|bucket| bucket.hits.iter())
    }

    pub fn hit_count(&self) -> usize {
        self.buckets().map(|bucket| bucket.hits.len()).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.targets.iter().map(|target| target.buckets.len()).sum()
    }

    /// Size of the biggest bucket. Pairing cost grows with its square.
    pub fn largest_bucket(&self) -> usize {
        self.buckets()
            .map(|bucket| bucket.hits.len())
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of accepted records whose query coordinates had to be swapped
    pub const fn inverted_records(&self) -> usize {
        self.inverted_records
    }

    pub(crate) fn set_inverted_records(&mut self, count: usize) {
        self.inverted_records = count;
    }
}

impl FromIterator<AlignmentHit> for HitTable {
    fn from_iter<I: IntoIterator<Item = AlignmentHit>>(iter: I) -> Self {
        let mut table = Self::new();
        for hit in iter {
            table.push(hit);
        }
        table
    }
}
