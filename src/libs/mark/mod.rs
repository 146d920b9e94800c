//! Gap runs ("marks") and the operations over them.
//!
//! A gapped sequence is described by its gap-free projection plus a list of
//! marks. Each [`Mark`] says "insert `length` gaps before residue `offset`".
//!
//! * [`codec`] - gapped sequence <-> marks
//! * [`algebra`] - `merge` and `diff` of mark lists sharing a coordinate space
//! * [`reindex`] - shift marks into the coordinates of a gapped layer
//!
//! ```
//! use fasmerge::libs::mark::{self, Mark};
//!
//! let marks = mark::encode(b"A-AA--AAA---AAAA----AAAAA", b'-');
//! assert_eq!(
//!     marks.as_slice(),
//!     &[Mark::new(1, 1), Mark::new(3, 2), Mark::new(6, 3), Mark::new(10, 4)]
//! );
//! assert_eq!(marks.to_string(), "1:1,3:2,6:3,10:4");
//! ```

pub mod algebra;
pub mod codec;
pub mod reindex;

pub use algebra::{diff, merge};
pub use codec::{decode, encode, splice, strip};
pub use reindex::reindex;

use std::str::FromStr;
use thiserror::Error;

/// Default gap symbol.
pub const GAP: u8 = b'-';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkError {
    /// A mark points past the end of the sequence it is applied to, or an
    /// offset occurs twice in one list
    #[error("invalid mark offset {offset}: {reason}")]
    InvalidOffset { offset: usize, reason: String },

    #[error("target has {target} gaps at offset {offset} but base already has {base}")]
    NonMonotonicDiff {
        offset: usize,
        base: usize,
        target: usize,
    },

    #[error("mark offsets are not increasing: {offset} follows {previous}")]
    MalformedMarkList { previous: usize, offset: usize },

    #[error("can't parse mark list: {0}")]
    Parse(String),
}

/// `length` gap characters inserted before position `offset` of a gap-free
/// projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark {
    pub offset: usize,
    pub length: usize,
}

impl Mark {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.offset, self.length)
    }
}

impl FromStr for Mark {
    type Err = MarkError;

    /// ```
    /// # use fasmerge::libs::mark::Mark;
    /// let mark: Mark = "6:3".parse().unwrap();
    /// assert_eq!(mark, Mark::new(6, 3));
    /// assert!("6".parse::<Mark>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (offset, length) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| MarkError::Parse(format!("expected offset:length, got '{}'", s)))?;
        let offset = offset
            .parse::<usize>()
            .map_err(|e| MarkError::Parse(format!("offset '{}': {}", offset, e)))?;
        let length = length
            .parse::<usize>()
            .map_err(|e| MarkError::Parse(format!("length '{}': {}", length, e)))?;

        Ok(Mark::new(offset, length))
    }
}

/// A well-formed mark list: offsets strictly increasing, one mark per offset.
///
/// The only ways to obtain one are the validating constructors and the
/// operations in this module, so every `Marks` value upholds the invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Marks(Vec<Mark>);

impl Marks {
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Builds a mark list from `(offset, length)` pairs, checking order.
    ///
    /// ```
    /// # use fasmerge::libs::mark::{Marks, MarkError};
    /// assert!(Marks::from_pairs(&[(0, 1), (2, 3)]).is_ok());
    /// assert!(matches!(
    ///     Marks::from_pairs(&[(2, 1), (0, 3)]),
    ///     Err(MarkError::MalformedMarkList { .. })
    /// ));
    /// assert!(matches!(
    ///     Marks::from_pairs(&[(2, 1), (2, 3)]),
    ///     Err(MarkError::InvalidOffset { offset: 2, .. })
    /// ));
    /// ```
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Result<Self, MarkError> {
        Self::try_from(
            pairs
                .iter()
                .map(|&(offset, length)| Mark::new(offset, length))
                .collect::<Vec<_>>(),
        )
    }

    /// Caller guarantees strictly increasing offsets.
    pub(crate) fn from_sorted(marks: Vec<Mark>) -> Self {
        debug_assert!(marks.windows(2).all(|w| w[0].offset < w[1].offset));
        Self(marks)
    }

    pub fn as_slice(&self) -> &[Mark] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mark> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of gap characters described by the list.
    pub fn gap_count(&self) -> usize {
        self.0.iter().map(|m| m.length).sum()
    }

    /// Offset of the last mark, if any.
    pub fn max_offset(&self) -> Option<usize> {
        self.0.last().map(|m| m.offset)
    }
}

impl TryFrom<Vec<Mark>> for Marks {
    type Error = MarkError;

    fn try_from(marks: Vec<Mark>) -> Result<Self, Self::Error> {
        for w in marks.windows(2) {
            let (previous, offset) = (w[0].offset, w[1].offset);
            if offset == previous {
                return Err(MarkError::InvalidOffset {
                    offset,
                    reason: "duplicated in mark list".to_string(),
                });
            }
            if offset < previous {
                return Err(MarkError::MalformedMarkList { previous, offset });
            }
        }

        Ok(Self(marks))
    }
}

impl<'a> IntoIterator for &'a Marks {
    type Item = &'a Mark;
    type IntoIter = std::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Marks {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}

impl FromStr for Marks {
    type Err = MarkError;

    /// ```
    /// # use fasmerge::libs::mark::Marks;
    /// let marks: Marks = "0:1,2:3".parse().unwrap();
    /// assert_eq!(marks, Marks::from_pairs(&[(0, 1), (2, 3)]).unwrap());
    /// assert!("".parse::<Marks>().unwrap().is_empty());
    /// assert!("2:3,0:1".parse::<Marks>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Marks::new());
        }
        let marks = s
            .split(',')
            .map(|part| part.parse::<Mark>())
            .collect::<Result<Vec<_>, _>>()?;

        Marks::try_from(marks)
    }
}
