//! Index cursors.
//!
//! An [`IndexIter`] turns a subscript into the zero-based offsets it
//! addresses, in encounter order. Offsets may exceed the target's extent;
//! the consumer decides what an out-of-range offset means (`NA` on read,
//! growth on write).

use crate::{invalid_subscript, is_na_real, mixed_subscripts, EvalError, Value, NA_INTEGER};

/// Offset produced for an `NA` subscript. Always out of range.
pub const NA_OFFSET: usize = usize::MAX;

/// Cursor over the zero-based offsets addressed by a subscript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexIter {
    /// Addresses nothing.
    Empty,
    /// A single offset.
    Once { offset: usize, done: bool },
    /// Every offset in `0..max`.
    Full { max: usize, cursor: usize },
    /// Offsets `cursor + 1 ..= end`; negative offsets are skipped.
    Range { cursor: i64, end: i64 },
    /// Caller-supplied 1-based positions, walked in order.
    Array { positions: Vec<usize>, cursor: usize },
}

impl IndexIter {
    pub fn once(offset: usize) -> Self {
        IndexIter::Once {
            offset,
            done: false,
        }
    }

    pub fn full(max: usize) -> Self {
        IndexIter::Full { max, cursor: 0 }
    }

    /// Inclusive 1-based range `from:to`.
    pub fn range(from: i64, to: i64) -> Self {
        IndexIter::Range {
            cursor: from - 2,
            end: to - 1,
        }
    }

    /// 1-based positions; zeros are dropped.
    pub fn array(positions: Vec<usize>) -> Self {
        let positions = positions.into_iter().filter(|&p| p != 0).collect();
        IndexIter::Array {
            positions,
            cursor: 0,
        }
    }

    /// Every position in `1..=extent` not named in `negatives` (1-based).
    pub fn excluding(extent: usize, negatives: &[usize]) -> Self {
        let positions = (1..=extent).filter(|p| !negatives.contains(p)).collect();
        IndexIter::Array {
            positions,
            cursor: 0,
        }
    }

    /// Number of offsets still to be produced.
    pub fn length(&self) -> usize {
        match self {
            IndexIter::Empty => 0,
            IndexIter::Once { done, .. } => usize::from(!done),
            IndexIter::Full { max, cursor } => max.saturating_sub(*cursor),
            IndexIter::Range { cursor, end } => {
                let first = (cursor + 1).max(0);
                usize::try_from(end - first + 1).unwrap_or(0)
            }
            IndexIter::Array { positions, cursor } => positions.len().saturating_sub(*cursor),
        }
    }

    /// Cursor for the subscript value `index` applied to a target of
    /// `extent` elements.
    ///
    /// `0` addresses nothing; negative positions exclude; text subscripts
    /// fall back to [`IndexIter::Empty`] (name lookup happens before this).
    pub fn from_subscript(index: &Value, extent: usize) -> Result<Self, EvalError> {
        match index {
            Value::Null | Value::Text(_) => Ok(IndexIter::Empty),
            Value::Numeric(v) => {
                let positions: Vec<Option<i64>> = v
                    .values()
                    .iter()
                    .map(|&x| (!is_na_real(x) && !x.is_nan()).then(|| x.trunc() as i64))
                    .collect();
                Self::from_positions(&positions, extent, v.is_vector())
            }
            Value::Integer(v) => {
                let positions: Vec<Option<i64>> = v
                    .values()
                    .iter()
                    .map(|&i| (i != NA_INTEGER).then_some(i))
                    .collect();
                Self::from_positions(&positions, extent, v.is_vector())
            }
            Value::Recursive(_) | Value::Closure(_) | Value::Error(_) => {
                Err(invalid_subscript(index.type_name()))
            }
        }
    }

    /// `None` entries are `NA`.
    fn from_positions(
        positions: &[Option<i64>],
        extent: usize,
        is_vector: bool,
    ) -> Result<Self, EvalError> {
        let has_negative = positions.iter().any(|p| p.is_some_and(|p| p < 0));
        let has_positive = positions.iter().any(|p| p.map_or(true, |p| p > 0));
        if has_negative && has_positive {
            return Err(mixed_subscripts());
        }
        if has_negative {
            let negatives: Vec<usize> = positions
                .iter()
                .filter_map(|p| p.map(|p| p.unsigned_abs() as usize))
                .collect();
            return Ok(Self::excluding(extent, &negatives));
        }
        if !is_vector {
            return Ok(match positions.first() {
                Some(Some(0)) | None => IndexIter::Empty,
                Some(Some(p)) => IndexIter::once(*p as usize - 1),
                Some(None) => IndexIter::once(NA_OFFSET),
            });
        }
        let positions = positions
            .iter()
            .map(|p| match p {
                Some(p) => *p as usize,
                None => NA_OFFSET,
            })
            .collect();
        Ok(Self::array(positions))
    }
}

impl Iterator for IndexIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            IndexIter::Empty => None,
            IndexIter::Once { offset, done } => {
                if *done {
                    None
                } else {
                    *done = true;
                    Some(*offset)
                }
            }
            IndexIter::Full { max, cursor } => {
                if *cursor < *max {
                    *cursor += 1;
                    Some(*cursor - 1)
                } else {
                    None
                }
            }
            IndexIter::Range { cursor, end } => {
                while *cursor < *end {
                    *cursor += 1;
                    if let Ok(offset) = usize::try_from(*cursor) {
                        return Some(offset);
                    }
                }
                None
            }
            IndexIter::Array { positions, cursor } => {
                let position = *positions.get(*cursor)?;
                *cursor += 1;
                if position == NA_OFFSET {
                    Some(NA_OFFSET)
                } else {
                    Some(position - 1)
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.length();
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests;
