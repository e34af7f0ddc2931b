use std::ops::Range;

use crate::dims::GridDimensions;
use crate::vertex::GridVertex;

/// A tessellated grid: vertex buffer + column triangle-strip index buffer.
///
/// Built by [`GridMeshBuilder`](crate::GridMeshBuilder). The buffers are only
/// exposed as shared slices, so a mesh never changes after construction;
/// resizing means building a new one and dropping this one.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMesh {
    pub(crate) dims: GridDimensions,
    pub(crate) vertices: Vec<GridVertex>,
    pub(crate) indices: Vec<u32>,
}

impl GridMesh {
    #[inline]
    pub fn dims(&self) -> GridDimensions {
        self.dims
    }

    #[inline]
    pub fn vertices(&self) -> &[GridVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Indices per column strip.
    #[inline]
    pub fn strip_len(&self) -> usize {
        self.dims.strip_len()
    }

    /// Number of column strips (one draw call each).
    #[inline]
    pub fn strip_count(&self) -> u32 {
        self.dims.cols()
    }

    #[inline]
    pub fn address(&self, col: u32, row: u32) -> u32 {
        self.dims.address(col, row)
    }

    /// Vertex at column `col`, row `row`, or `None` when out of range.
    pub fn vertex_at(&self, col: u32, row: u32) -> Option<&GridVertex> {
        if col > self.dims.cols() || row > self.dims.rows() {
            return None;
        }
        self.vertices.get(self.address(col, row) as usize)
    }

    /// Index-buffer range drawn for column strip `col`.
    ///
    /// # Panics
    /// If `col >= cols`.
    pub fn strip_range(&self, col: u32) -> Range<u32> {
        assert!(col < self.dims.cols(), "strip {col} out of range");
        let len = self.strip_len() as u32;
        col * len..(col + 1) * len
    }

    /// Index run of column strip `col`.
    ///
    /// # Panics
    /// If `col >= cols`.
    pub fn column_strip(&self, col: u32) -> &[u32] {
        let r = self.strip_range(col);
        &self.indices[r.start as usize..r.end as usize]
    }

    /// Walks the stored vertices of strip `col` by address arithmetic,
    /// without touching the index buffer.
    pub fn addressed_strip(&self, col: u32) -> impl Iterator<Item = GridVertex> + '_ {
        assert!(col < self.dims.cols(), "strip {col} out of range");
        let next_col = self.dims.rows() as usize + 1;
        (0..=self.dims.rows()).flat_map(move |row| {
            let a = self.address(col, row) as usize;
            [self.vertices[a], self.vertices[a + next_col]]
        })
    }

    /// Walks strip `col` by resolving its index run against the vertex buffer.
    pub fn indexed_strip(&self, col: u32) -> impl Iterator<Item = GridVertex> + '_ {
        self.column_strip(col)
            .iter()
            .map(|&i| self.vertices[i as usize])
    }

    /// Releases ownership of both buffers.
    pub fn into_parts(self) -> (Vec<GridVertex>, Vec<u32>) {
        (self.vertices, self.indices)
    }
}

/// Recomputes strip `col` from the dimensions alone, with no stored buffers.
///
/// Uses the same coordinate formula as the builder, so the output is
/// bit-identical to [`GridMesh::addressed_strip`] for the same grid.
pub fn recomputed_strip(dims: GridDimensions, col: u32) -> impl Iterator<Item = GridVertex> {
    assert!(col < dims.cols(), "strip {col} out of range");
    (0..=dims.rows()).flat_map(move |row| {
        [
            GridVertex::flat(dims.position(col, row)),
            GridVertex::flat(dims.position(col + 1, row)),
        ]
    })
}
