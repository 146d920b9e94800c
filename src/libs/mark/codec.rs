use super::{Mark, MarkError, Marks};

/// Collapses each maximal run of `gap` into one mark.
///
/// The offset of a mark is the number of residues before the run.
///
/// ```
/// # use fasmerge::libs::mark::{encode, Marks};
/// let marks = encode(b"----AAAAAAA------AAAAAAAA----", b'-');
/// assert_eq!(marks, Marks::from_pairs(&[(0, 4), (7, 6), (15, 4)]).unwrap());
///
/// assert!(encode(b"", b'-').is_empty());
/// assert!(encode(b"ACGT", b'-').is_empty());
/// ```
pub fn encode(seq: &[u8], gap: u8) -> Marks {
    let mut marks: Vec<Mark> = vec![];
    let mut residues = 0;
    let mut run = 0;

    for &b in seq {
        if b == gap {
            run += 1;
        } else {
            if run > 0 {
                marks.push(Mark::new(residues, run));
                run = 0;
            }
            residues += 1;
        }
    }
    if run > 0 {
        marks.push(Mark::new(residues, run));
    }

    Marks::from_sorted(marks)
}

/// Rebuilds a gapped sequence from its gap-free projection.
///
/// Offsets refer to positions of the untouched projection.
///
/// ```
/// # use fasmerge::libs::mark::{decode, Marks};
/// let marks = Marks::from_pairs(&[(1, 1), (3, 2), (6, 3), (10, 4)]).unwrap();
/// let seq = decode("A".repeat(15).as_bytes(), &marks, b'-').unwrap();
/// assert_eq!(seq, b"A-AA--AAA---AAAA----AAAAA");
/// ```
pub fn decode(projection: &[u8], marks: &Marks, gap: u8) -> Result<Vec<u8>, MarkError> {
    splice(projection, marks, gap)
}

/// Inserts gap runs into `seq`, which may already contain gaps.
///
/// Offsets are positions of `seq` itself, gap characters included. A mark at
/// `seq.len()` appends to the end; zero-length marks are skipped.
///
/// ```
/// # use fasmerge::libs::mark::{splice, Marks};
/// let marks = Marks::from_pairs(&[(0, 0), (2, 1), (4, 2)]).unwrap();
/// assert_eq!(splice(b"A-AA", &marks, b'-').unwrap(), b"A--AA--");
///
/// let marks = Marks::from_pairs(&[(5, 1)]).unwrap();
/// assert!(splice(b"A-AA", &marks, b'-').is_err());
/// ```
pub fn splice(seq: &[u8], marks: &Marks, gap: u8) -> Result<Vec<u8>, MarkError> {
    if let Some(offset) = marks.max_offset() {
        if offset > seq.len() {
            return Err(MarkError::InvalidOffset {
                offset,
                reason: format!("beyond the {} positions of the sequence", seq.len()),
            });
        }
    }

    let mut out = Vec::with_capacity(seq.len() + marks.gap_count());
    let mut cursor = 0;
    for mark in marks {
        out.extend_from_slice(&seq[cursor..mark.offset]);
        out.resize(out.len() + mark.length, gap);
        cursor = mark.offset;
    }
    out.extend_from_slice(&seq[cursor..]);

    Ok(out)
}

/// The gap-free projection of `seq`.
///
/// ```
/// # use fasmerge::libs::mark::strip;
/// assert_eq!(strip(b"--AC-G--T-", b'-'), b"ACGT");
/// ```
pub fn strip(seq: &[u8], gap: u8) -> Vec<u8> {
    seq.iter().copied().filter(|&b| b != gap).collect()
}
