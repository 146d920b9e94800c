use super::{Mark, Marks};

/// Moves `marks` from a gap-free coordinate space into the space produced by
/// applying `layer` to it.
///
/// Each offset grows by the total length of the layer marks strictly before
/// it. A layer mark at the same offset is not counted, so the new run lands
/// in front of the existing one.
///
/// ```
/// # use fasmerge::libs::mark::{reindex, Marks};
/// let marks = Marks::from_pairs(&[(0, 1), (2, 4), (9, 3)]).unwrap();
/// let layer = Marks::from_pairs(&[(0, 2), (1, 2), (2, 6), (10, 11)]).unwrap();
/// assert_eq!(
///     reindex(&marks, &layer),
///     Marks::from_pairs(&[(0, 1), (6, 4), (19, 3)]).unwrap()
/// );
/// ```
pub fn reindex(marks: &Marks, layer: &Marks) -> Marks {
    let mut shifted: Vec<Mark> = Vec::with_capacity(marks.len());
    let mut layer_iter = layer.iter().peekable();
    let mut shift = 0;

    for mark in marks {
        while let Some(l) = layer_iter.next_if(|l| l.offset < mark.offset) {
            shift += l.length;
        }
        shifted.push(Mark::new(mark.offset + shift, mark.length));
    }

    Marks::from_sorted(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(pairs: &[(usize, usize)]) -> Marks {
        Marks::from_pairs(pairs).unwrap()
    }

    #[test]
    fn empty_layer_is_identity() {
        let m = marks(&[(0, 1), (2, 4), (9, 3)]);
        assert_eq!(reindex(&m, &Marks::new()), m);
        assert!(reindex(&Marks::new(), &m).is_empty());
    }

    #[test]
    fn shift_by_lower_offsets() {
        let m = marks(&[(0, 1), (2, 4), (9, 3)]);
        let layer = marks(&[(0, 2), (1, 2), (2, 6), (10, 11)]);
        let result = reindex(&m, &layer);

        for (before, after) in m.iter().zip(result.iter()) {
            let expected: usize = layer
                .iter()
                .filter(|l| l.offset < before.offset)
                .map(|l| l.length)
                .sum();
            assert_eq!(after.offset, before.offset + expected);
            assert_eq!(after.length, before.length);
        }
        assert!(result
            .as_slice()
            .windows(2)
            .all(|w| w[0].offset < w[1].offset));
    }

    #[test]
    fn layer_beyond_marks() {
        let m = marks(&[(1, 1)]);
        let layer = marks(&[(0, 3), (1, 5), (7, 2)]);
        assert_eq!(reindex(&m, &layer), marks(&[(4, 1)]));
    }
}
