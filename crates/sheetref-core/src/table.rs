use std::ops::Range;

/// Positional access to a two-dimensional table.
///
/// This is everything reference resolution needs from a table: its current
/// shape, a scalar read, and a rectangular slice. Implementors own their
/// storage; nothing in this crate mutates a table.
pub trait Table {
    /// Scalar type returned for single-cell reads
    type Value;

    /// Current `(n_rows, n_cols)`
    fn shape(&self) -> (usize, usize);

    /// Value at a 0-indexed position, or `None` when outside the table
    fn value(&self, row: usize, col: usize) -> Option<Self::Value>;

    /// Sub-table over half-open row and column ranges (0-indexed).
    ///
    /// Ranges reaching past the table are clamped; an empty or reversed range
    /// yields an empty extent along that axis.
    fn slice(&self, rows: Range<usize>, cols: Range<usize>) -> Self
    where
        Self: Sized;

    fn n_rows(&self) -> usize {
        self.shape().0
    }

    fn n_cols(&self) -> usize {
        self.shape().1
    }
}

/// Clamp a half-open range to `0..len`, collapsing reversed ranges to empty
pub fn clamp_range(range: Range<usize>, len: usize) -> Range<usize> {
    let end = range.end.min(len);
    let start = range.start.min(end);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(0..3, 5), 0..3);
        assert_eq!(clamp_range(2..10, 5), 2..5);
        assert_eq!(clamp_range(7..9, 5), 5..5);
        assert_eq!(clamp_range(3..1, 5), 1..1);
    }
}
