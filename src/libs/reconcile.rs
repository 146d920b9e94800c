//! Widening gapped sequences and alignments with the gaps of another version.
//!
//! Two versions of a sequence that share one gap-free projection are brought
//! to a common shape in three steps:
//!
//! 1. `diff` the marks of both versions to get the extra gaps, in projection
//!    coordinates;
//! 2. `reindex` the extra gaps through the marks of the version being widened,
//!    which turns them into column coordinates of that version;
//! 3. `splice` the gaps into the version being widened.
//!
//! Column insertions found for one row of an alignment are valid for every
//! row, which is what [`merge_alignments`] relies on.

use crate::libs::fasta::SeqMap;
use crate::libs::mark::{self, MarkError, Marks, GAP};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error(transparent)]
    Mark(#[from] MarkError),

    #[error("the two versions have different residues")]
    ProjectionMismatch,

    #[error("sequence '{name}': {source}")]
    Record {
        name: String,
        #[source]
        source: Box<MergeError>,
    },

    #[error("anchor '{anchor}' not found in alignment #{index}")]
    MissingAnchor { anchor: String, index: usize },

    #[error("alignment #{index}: row '{name}' is {width} columns wide, expected {expected}")]
    RaggedAlignment {
        index: usize,
        name: String,
        width: usize,
        expected: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeOpt {
    pub gap: u8,
}

impl Default for MergeOpt {
    fn default() -> Self {
        Self { gap: GAP }
    }
}

/// Gaps `target` has beyond `anchor`, as insertion points in `anchor` itself.
///
/// Both sequences must share one gap-free projection; that is not checked
/// here.
///
/// ```
/// # use fasmerge::libs::reconcile::column_insertions;
/// let cols = column_insertions(b"A--AA", b"A---A-A", b'-').unwrap();
/// assert_eq!(cols.to_string(), "1:1,4:1");
/// ```
pub fn column_insertions(anchor: &[u8], target: &[u8], gap: u8) -> Result<Marks, MarkError> {
    let base = mark::encode(anchor, gap);
    let extra = mark::diff(&base, &mark::encode(target, gap))?;

    Ok(mark::reindex(&extra, &base))
}

/// Widens `seq` with the gaps that `target` has in addition.
///
/// The result has the shape of `target` wherever `seq` has no gaps of its
/// own; gaps only `seq` has would be lost and are rejected instead.
///
/// ```
/// # use fasmerge::libs::reconcile::{reconcile, MergeOpt};
/// let widened = reconcile(
///     b"----AAAAAAA------AAAAAAAA----",
///     b"----A-AA--AAA---A------AAA----AAAAA----",
///     &MergeOpt::default(),
/// )
/// .unwrap();
/// assert_eq!(widened, b"----A-AA--AAA---A------AAA----AAAAA----");
/// ```
pub fn reconcile(seq: &[u8], target: &[u8], opt: &MergeOpt) -> Result<Vec<u8>, MergeError> {
    if mark::strip(seq, opt.gap) != mark::strip(target, opt.gap) {
        return Err(MergeError::ProjectionMismatch);
    }
    let cols = column_insertions(seq, target, opt.gap)?;

    Ok(mark::splice(seq, &cols, opt.gap)?)
}

/// Reconciles each record with the record of the same id in `targets`.
///
/// Records without a counterpart are copied unchanged. Order follows
/// `records`.
pub fn widen_all(records: &SeqMap, targets: &SeqMap, opt: &MergeOpt) -> Result<SeqMap, MergeError> {
    records
        .par_iter()
        .map(|(name, seq)| {
            let widened = match targets.get(name) {
                Some(target) => reconcile(seq, target, opt).map_err(|e| MergeError::Record {
                    name: name.clone(),
                    source: Box::new(e),
                })?,
                None => {
                    log::debug!("'{}' has no counterpart, copied as is", name);
                    seq.clone()
                }
            };
            Ok::<_, MergeError>((name.clone(), widened))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|v| v.into_iter().collect())
}

/// Brings several alignments sharing the row `anchor` into one alignment.
///
/// Every alignment must have rows of equal width and contain `anchor`; all
/// anchor rows must share one gap-free projection. The anchor marks are
/// merged into the smallest gap pattern containing all of them, and each
/// alignment receives the columns it lacks. The output holds the anchor row
/// once, followed by the other rows in input order. A non-anchor id seen
/// before is dropped with a warning.
///
/// ```
/// # use fasmerge::libs::fasta::SeqMap;
/// # use fasmerge::libs::reconcile::{merge_alignments, MergeOpt};
/// let mut first = SeqMap::new();
/// first.insert("ref".to_string(), b"AC-GT".to_vec());
/// first.insert("a".to_string(), b"ACTGT".to_vec());
/// let mut second = SeqMap::new();
/// second.insert("ref".to_string(), b"ACG--T".to_vec());
/// second.insert("b".to_string(), b"ACGAAT".to_vec());
///
/// let merged = merge_alignments(&[first, second], "ref", &MergeOpt::default()).unwrap();
/// assert_eq!(merged["ref"], b"AC-G--T");
/// assert_eq!(merged["a"], b"ACTG--T");
/// assert_eq!(merged["b"], b"AC-GAAT");
/// ```
pub fn merge_alignments(
    alignments: &[SeqMap],
    anchor: &str,
    opt: &MergeOpt,
) -> Result<SeqMap, MergeError> {
    // anchor marks, one per alignment, in projection coordinates
    let anchor_marks = alignments
        .par_iter()
        .enumerate()
        .map(|(index, aln)| {
            let row = aln.get(anchor).ok_or_else(|| MergeError::MissingAnchor {
                anchor: anchor.to_string(),
                index: index + 1,
            })?;
            check_width(aln, index, row.len())?;
            Ok::<_, MergeError>(mark::encode(row, opt.gap))
        })
        .collect::<Result<Vec<_>, MergeError>>()?;

    let projection = match alignments.first() {
        Some(aln) => mark::strip(&aln[anchor], opt.gap),
        None => return Ok(SeqMap::new()),
    };
    if alignments
        .iter()
        .skip(1)
        .any(|aln| mark::strip(&aln[anchor], opt.gap) != projection)
    {
        return Err(MergeError::Record {
            name: anchor.to_string(),
            source: Box::new(MergeError::ProjectionMismatch),
        });
    }

    let target = mark::merge(&anchor_marks);
    log::info!(
        "{} alignments, merged anchor is {} columns wide",
        alignments.len(),
        projection.len() + target.gap_count()
    );

    let widened = alignments
        .par_iter()
        .zip(anchor_marks.par_iter())
        .map(|(aln, base)| {
            let cols = mark::reindex(&mark::diff(base, &target)?, base);
            log::debug!("column insertions: {}", cols);
            aln.iter()
                .map(|(name, seq)| Ok((name.clone(), mark::splice(seq, &cols, opt.gap)?)))
                .collect::<Result<SeqMap, MergeError>>()
        })
        .collect::<Result<Vec<_>, MergeError>>()?;

    let mut merged = SeqMap::new();
    merged.insert(anchor.to_string(), widened[0][anchor].clone());
    for (name, seq) in widened.into_iter().flatten() {
        if name == anchor {
            continue;
        }
        if merged.contains_key(&name) {
            log::warn!("'{}' occurs in more than one alignment, keeping the first", name);
            continue;
        }
        merged.insert(name, seq);
    }

    Ok(merged)
}

fn check_width(aln: &SeqMap, index: usize, expected: usize) -> Result<(), MergeError> {
    match aln.iter().find(|(_, seq)| seq.len() != expected) {
        Some((name, seq)) => Err(MergeError::RaggedAlignment {
            index: index + 1,
            name: name.clone(),
            width: seq.len(),
            expected,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ_1: &[u8] = b"----AAAAAAA------AAAAAAAA----";
    const MERGED: &[u8] = b"----A-AA--AAA---A------AAA----AAAAA----";

    fn seq_map(pairs: &[(&str, &str)]) -> SeqMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn diff_reindex_splice() {
        let base = mark::encode(SEQ_1, GAP);
        let extra = mark::diff(&base, &mark::encode(MERGED, GAP)).unwrap();
        let cols = mark::reindex(&extra, &base);
        assert_eq!(mark::splice(SEQ_1, &cols, GAP).unwrap(), MERGED);
    }

    #[test]
    fn reconcile_with_itself() {
        let opt = MergeOpt::default();
        assert_eq!(reconcile(SEQ_1, SEQ_1, &opt).unwrap(), SEQ_1);
        assert_eq!(reconcile(b"ACGT", b"ACGT", &opt).unwrap(), b"ACGT");
    }

    #[test]
    fn reconcile_errors() {
        let opt = MergeOpt::default();
        assert!(matches!(
            reconcile(b"AC-GT", b"ACGGT", &opt),
            Err(MergeError::ProjectionMismatch)
        ));
        // target lacks the gap after C
        assert!(matches!(
            reconcile(b"AC-GT", b"ACG-T", &opt),
            Err(MergeError::Mark(MarkError::NonMonotonicDiff { offset: 2, .. }))
        ));
    }

    #[test]
    fn reconcile_custom_gap() {
        let opt = MergeOpt { gap: b'.' };
        assert_eq!(reconcile(b"AC.GT", b"A.C.GT..", &opt).unwrap(), b"A.C.GT..");
    }

    #[test]
    fn widen_all_keeps_order() {
        let records = seq_map(&[("x", "AC-G"), ("y", "TT"), ("z", "A")]);
        let targets = seq_map(&[("z", "-A-"), ("x", "-AC-G")]);

        let widened = widen_all(&records, &targets, &MergeOpt::default()).unwrap();
        assert_eq!(widened.keys().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(widened["x"], b"-AC-G");
        assert_eq!(widened["y"], b"TT");
        assert_eq!(widened["z"], b"-A-");
    }

    #[test]
    fn widen_all_names_mismatch() {
        let records = seq_map(&[("x", "AC")]);
        let targets = seq_map(&[("x", "AG")]);
        assert_eq!(
            widen_all(&records, &targets, &MergeOpt::default()).unwrap_err(),
            MergeError::Record {
                name: "x".to_string(),
                source: Box::new(MergeError::ProjectionMismatch),
            }
        );
    }

    #[test]
    fn merge_three_alignments() {
        let alns = vec![
            seq_map(&[("ref", "A-CGT"), ("s1", "AACGT")]),
            seq_map(&[("s2", "ACG-T-"), ("ref", "ACG-T-")]),
            seq_map(&[("ref", "--ACGT"), ("s3", "GGAC-T"), ("s1", "--ACGT")]),
        ];
        let merged = merge_alignments(&alns, "ref", &MergeOpt::default()).unwrap();

        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["ref", "s1", "s2", "s3"]
        );
        assert_eq!(merged["ref"], b"--A-CG-T-");
        assert_eq!(merged["s1"], b"--AACG-T-");
        assert_eq!(merged["s2"], b"--A-CG-T-");
        assert_eq!(merged["s3"], b"GGA-C--T-");

        let width = merged["ref"].len();
        assert!(merged.values().all(|seq| seq.len() == width));
    }

    #[test]
    fn merge_alignment_errors() {
        let opt = MergeOpt::default();

        let alns = vec![seq_map(&[("ref", "AC")]), seq_map(&[("other", "AC")])];
        assert_eq!(
            merge_alignments(&alns, "ref", &opt).unwrap_err(),
            MergeError::MissingAnchor {
                anchor: "ref".to_string(),
                index: 2
            }
        );

        let alns = vec![seq_map(&[("ref", "AC"), ("a", "ACG")])];
        assert!(matches!(
            merge_alignments(&alns, "ref", &opt).unwrap_err(),
            MergeError::RaggedAlignment { width: 3, expected: 2, .. }
        ));

        let alns = vec![seq_map(&[("ref", "AC")]), seq_map(&[("ref", "A-G")])];
        assert!(matches!(
            merge_alignments(&alns, "ref", &opt).unwrap_err(),
            MergeError::Record { name, .. } if name == "ref"
        ));

        assert!(merge_alignments(&[], "ref", &opt).unwrap().is_empty());
    }
}
