use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use bio::bio_types::strand::Strand;

use crate::config::FeatureLabels;
use crate::constants::{GFF_COLUMNS_LINE, GFF_VERSION_LINE, INSERTION_ID_PREFIX};
use crate::features::{Flank, InsertionFeatures, Interval, TargetSiteDuplication};
use crate::pairing::CandidatePair;
use crate::types::{Identity, Position, strand_symbol};

/// One nine-column GFF3 line; score and phase are always `.`
struct GffRecord<'a> {
    seqid: &'a str,
    source: &'a str,
    feature_type: &'a str,
    start: Position,
    end: Position,
    strand: Strand,
    attributes: String,
}

impl fmt::Display for GffRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t.\t{}\t.\t{}",
            self.seqid,
            self.source,
            self.feature_type,
            self.start,
            self.end,
            strand_symbol(self.strand),
            self.attributes
        )
    }
}

/// Single-pass producer of the annotation lines for a list of candidate pairs.
///
/// Yields the two header lines, then for every pair its insertion line, the
/// two TSD lines when the flanks overlap on the query, and the two flank lines
/// when flank reporting is on. Lines carry no trailing newline.
///
/// Insertion identifiers come from a counter owned by the stream, so a stream
/// cannot be cloned or rewound; build a new one for another pass.
pub struct GffLineStream<'a> {
    pairs: std::slice::Iter<'a, CandidatePair<'a>>,
    labels: &'a FeatureLabels,
    report_flanks: bool,
    id_width: usize,
    emitted: usize,
    pending: VecDeque<String>,
}

impl<'a> GffLineStream<'a> {
    pub fn new(
        pairs: &'a [CandidatePair<'a>],
        labels: &'a FeatureLabels,
        report_flanks: bool,
    ) -> Self {
        Self {
            pairs: pairs.iter(),
            labels,
            report_flanks,
            id_width: pairs.len().to_string().len() + 1,
            emitted: 0,
            pending: VecDeque::from([GFF_VERSION_LINE.to_string(), GFF_COLUMNS_LINE.to_string()]),
        }
    }

    /// Insertions emitted so far
    pub const fn insertions_emitted(&self) -> usize {
        self.emitted
    }

    fn next_id(&mut self) -> String {
        self.emitted += 1;
        format!(
            "{INSERTION_ID_PREFIX}{:0width$}",
            self.emitted,
            width = self.id_width
        )
    }

    fn queue_pair(&mut self, pair: CandidatePair<'a>) {
        let id = self.next_id();
        let features = InsertionFeatures::build(pair, self.report_flanks);
        let quote = self.labels.quote_flank_strand;
        let seqid = pair.target_id();

        let insertion = GffRecord {
            seqid,
            source: &self.labels.source,
            feature_type: &self.labels.insertion_type,
            start: features.site.start,
            end: features.site.end,
            strand: features.site.strand,
            attributes: format!(
                "ID={id};len={};leftflank={};rightflank={};leftID={};rightID={}",
                features.site.len(),
                pair.hit.query_summary(quote),
                pair.mate.query_summary(quote),
                Identity(pair.hit.identity_pct),
                Identity(pair.mate.identity_pct)
            ),
        }
        .to_string();
        self.pending.push_back(insertion);

        if let Some(tsd) = features.tsd {
            let lines = self.tsd_lines(seqid, &id, &tsd);
            self.pending.extend(lines);
        }
        if let Some(flanks) = features.flanks {
            let lines = flanks.map(|flank| self.flank_line(seqid, &id, &flank));
            self.pending.extend(lines);
        }
    }

    fn tsd_lines(&self, seqid: &str, id: &str, tsd: &TargetSiteDuplication) -> [String; 2] {
        let line = |suffix: &str, interval: Interval| {
            GffRecord {
                seqid,
                source: &self.labels.source,
                feature_type: &self.labels.tsd_type,
                start: interval.start,
                end: interval.end,
                strand: tsd.strand,
                attributes: format!("ID={id}{suffix};Parent={id};len={}", tsd.length),
            }
            .to_string()
        };
        [line("_TSD_L", tsd.left), line("_TSD_R", tsd.right)]
    }

    fn flank_line(&self, seqid: &str, id: &str, flank: &Flank<'_>) -> String {
        let interval = flank.interval();
        let key = flank.side.attribute_prefix();
        GffRecord {
            seqid,
            source: &self.labels.source,
            feature_type: &self.labels.flank_type,
            start: interval.start,
            end: interval.end,
            strand: flank.hit.target_strand,
            attributes: format!(
                "ID={id}{};Parent={id};len={};{key}flank={};{key}ID={}",
                flank.side.id_suffix(),
                flank.hit.target_span(),
                flank.hit.query_summary(self.labels.quote_flank_strand),
                Identity(flank.hit.identity_pct)
            ),
        }
        .to_string()
    }
}

impl Iterator for GffLineStream<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            let pair = *self.pairs.next()?;
            self.queue_pair(pair);
        }
    }
}

impl FusedIterator for GffLineStream<'_> {}
