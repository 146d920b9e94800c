use super::{Mark, MarkError, Marks};
use itertools::{EitherOrBoth, Itertools};

/// Union of mark lists, keeping the longest run at each offset.
///
/// All lists must share one coordinate space, e.g. the gap-free projection of
/// a sequence aligned several ways. The result is the smallest gap pattern
/// that contains the gaps of every input.
///
/// ```
/// # use fasmerge::libs::mark::{merge, Marks};
/// let a = Marks::from_pairs(&[(0, 1), (2, 3)]).unwrap();
/// let b = Marks::from_pairs(&[(2, 5), (7, 8)]).unwrap();
/// assert_eq!(
///     merge(&[a, b]),
///     Marks::from_pairs(&[(0, 1), (2, 5), (7, 8)]).unwrap()
/// );
/// ```
pub fn merge(lists: &[Marks]) -> Marks {
    let mut merged: Vec<Mark> = vec![];

    for mark in lists.iter().map(|m| m.iter()).kmerge_by(|a, b| a.offset < b.offset) {
        match merged.last_mut() {
            Some(last) if last.offset == mark.offset => {
                last.length = last.length.max(mark.length);
            }
            _ => merged.push(*mark),
        }
    }

    Marks::from_sorted(merged)
}

/// The gaps `target` adds on top of `base`, offset by offset.
///
/// Every offset of either list appears in the result; an offset missing from
/// a list counts as length 0. A `target` shorter than `base` anywhere would
/// remove gap columns and is rejected.
///
/// ```
/// # use fasmerge::libs::mark::{diff, Marks, MarkError};
/// let base = Marks::from_pairs(&[(0, 1), (2, 3)]).unwrap();
/// let target = Marks::from_pairs(&[(0, 1), (2, 4), (9, 3)]).unwrap();
/// assert_eq!(
///     diff(&base, &target).unwrap(),
///     Marks::from_pairs(&[(0, 0), (2, 1), (9, 3)]).unwrap()
/// );
///
/// assert!(matches!(
///     diff(&target, &base),
///     Err(MarkError::NonMonotonicDiff { offset: 2, base: 4, target: 3 })
/// ));
/// ```
pub fn diff(base: &Marks, target: &Marks) -> Result<Marks, MarkError> {
    let mut delta: Vec<Mark> = Vec::with_capacity(base.len().max(target.len()));

    for pair in base
        .iter()
        .merge_join_by(target.iter(), |b, t| b.offset.cmp(&t.offset))
    {
        let (offset, base_len, target_len) = match pair {
            EitherOrBoth::Both(b, t) => (b.offset, b.length, t.length),
            EitherOrBoth::Left(b) => (b.offset, b.length, 0),
            EitherOrBoth::Right(t) => (t.offset, 0, t.length),
        };
        if target_len < base_len {
            return Err(MarkError::NonMonotonicDiff {
                offset,
                base: base_len,
                target: target_len,
            });
        }
        delta.push(Mark::new(offset, target_len - base_len));
    }

    Ok(Marks::from_sorted(delta))
}
