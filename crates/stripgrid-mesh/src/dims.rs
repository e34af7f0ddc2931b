use crate::error::{MeshError, MeshResult};

/// Validated grid size: `rows` cells along Y, `cols` cells along X.
///
/// Both are at least 1, and the resulting vertex and index counts fit in `u32`
/// so every address can be stored in the index buffer and every strip range
/// can be handed to a draw call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GridDimensions {
    rows: u32,
    cols: u32,
}

impl GridDimensions {
    pub fn new(rows: u32, cols: u32) -> MeshResult<Self> {
        let invalid = MeshError::InvalidDimensions { rows, cols };
        if rows == 0 || cols == 0 {
            return Err(invalid);
        }

        let (r, c) = (u64::from(rows), u64::from(cols));
        let vertices = (r + 1) * (c + 1);
        let indices = 2 * c * (r + 1);
        if vertices > u64::from(u32::MAX) || indices > u64::from(u32::MAX) {
            return Err(invalid);
        }

        Ok(Self { rows, cols })
    }

    #[inline]
    pub fn rows(self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(self) -> u32 {
        self.cols
    }

    /// `(rows + 1) * (cols + 1)`
    #[inline]
    pub fn vertex_count(self) -> usize {
        (self.rows as usize + 1) * (self.cols as usize + 1)
    }

    /// `2 * cols * (rows + 1)`
    #[inline]
    pub fn index_count(self) -> usize {
        self.cols as usize * self.strip_len()
    }

    /// Indices (or emitted vertices) per column strip: `2 * (rows + 1)`.
    #[inline]
    pub fn strip_len(self) -> usize {
        2 * (self.rows as usize + 1)
    }

    /// Cell width in normalized units.
    #[inline]
    pub fn dx(self) -> f32 {
        2.0 / self.cols as f32
    }

    /// Cell height in normalized units.
    #[inline]
    pub fn dy(self) -> f32 {
        2.0 / self.rows as f32
    }

    /// Linear address of vertex `(col, row)`.
    ///
    /// Column-major: all rows of column 0 come first. Index generation and any
    /// renderer slicing the index buffer per column depend on this layout.
    #[inline]
    pub fn address(self, col: u32, row: u32) -> u32 {
        debug_assert!(col <= self.cols && row <= self.rows);
        col * (self.rows + 1) + row
    }

    /// Position of vertex `(col, row)`; the grid spans `[-1, 1] x [-1, 1]` at z = 0.
    #[inline]
    pub fn position(self, col: u32, row: u32) -> [f32; 3] {
        [
            -1.0 + col as f32 * self.dx(),
            -1.0 + row as f32 * self.dy(),
            0.0,
        ]
    }

    /// Returns a copy with rows/cols shifted by the given deltas, clamped to 1.
    ///
    /// Fails only if the result would exceed the 32-bit addressing limit.
    pub fn resized(self, d_rows: i64, d_cols: i64) -> MeshResult<Self> {
        let clamp = |v: u32, d: i64| (i64::from(v) + d).clamp(1, i64::from(u32::MAX)) as u32;
        Self::new(clamp(self.rows, d_rows), clamp(self.cols, d_cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rows_rejected() {
        assert_eq!(
            GridDimensions::new(0, 1),
            Err(MeshError::InvalidDimensions { rows: 0, cols: 1 })
        );
    }

    #[test]
    fn zero_cols_rejected() {
        assert!(GridDimensions::new(3, 0).is_err());
    }

    #[test]
    fn overflowing_counts_rejected() {
        assert!(GridDimensions::new(u32::MAX, 1).is_err());
        assert!(GridDimensions::new(70_000, 70_000).is_err());
    }

    #[test]
    fn counts_follow_formulas() {
        let d = GridDimensions::new(4, 3).unwrap();
        assert_eq!(d.vertex_count(), 5 * 4);
        assert_eq!(d.index_count(), 2 * 3 * 5);
        assert_eq!(d.strip_len(), 10);
    }

    #[test]
    fn long_index_formula_agrees() {
        // (rows+1)*(cols-1)*2 + (rows+1)*2 == 2*cols*(rows+1)
        for rows in 1..8usize {
            for cols in 1..8usize {
                let d = GridDimensions::new(rows as u32, cols as u32).unwrap();
                let long = (rows + 1) * (cols - 1) * 2 + (rows + 1) * 2;
                assert_eq!(d.index_count(), long);
            }
        }
    }

    #[test]
    fn address_is_column_major() {
        let d = GridDimensions::new(2, 3).unwrap();
        assert_eq!(d.address(0, 0), 0);
        assert_eq!(d.address(0, 2), 2);
        assert_eq!(d.address(1, 0), 3);
        assert_eq!(d.address(3, 2), 11);
    }

    #[test]
    fn resized_clamps_to_one() {
        let d = GridDimensions::new(1, 2).unwrap();
        let r = d.resized(-5, 1).unwrap();
        assert_eq!((r.rows(), r.cols()), (1, 3));
    }
}
