use crate::dims::GridDimensions;
use crate::error::{BufferKind, MeshError, MeshResult};
use crate::mesh::GridMesh;
use crate::observer::MeshObserver;
use crate::vertex::GridVertex;

/// Builds a [`GridMesh`] for a validated [`GridDimensions`].
///
/// ```
/// use stripgrid_mesh::{GridDimensions, GridMeshBuilder};
///
/// let dims = GridDimensions::new(1, 1).unwrap();
/// let mesh = GridMeshBuilder::new(dims).build().unwrap();
/// assert_eq!(mesh.indices(), &[0, 2, 1, 3]);
/// ```
pub struct GridMeshBuilder<'o> {
    dims: GridDimensions,
    observer: Option<&'o mut dyn MeshObserver>,
}

impl<'o> GridMeshBuilder<'o> {
    pub fn new(dims: GridDimensions) -> Self {
        Self {
            dims,
            observer: None,
        }
    }

    /// Attaches an observer notified after a successful build.
    pub fn observer(mut self, observer: &'o mut dyn MeshObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> MeshResult<GridMesh> {
        let dims = self.dims;

        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(dims.vertex_count())
            .map_err(|_| MeshError::AllocationFailure {
                buffer: BufferKind::Vertex,
                len: dims.vertex_count(),
            })?;

        let mut indices = Vec::new();
        indices
            .try_reserve_exact(dims.index_count())
            .map_err(|_| MeshError::AllocationFailure {
                buffer: BufferKind::Index,
                len: dims.index_count(),
            })?;

        // Column outer, row inner: vertex (i, j) lands at i * (rows + 1) + j.
        for col in 0..=dims.cols() {
            for row in 0..=dims.rows() {
                vertices.push(GridVertex::flat(dims.position(col, row)));
            }
        }

        // One zig-zag run per column: (i, j), (i + 1, j) for every row.
        for col in 0..dims.cols() {
            for row in 0..=dims.rows() {
                indices.push(dims.address(col, row));
                indices.push(dims.address(col + 1, row));
            }
        }

        debug_assert_eq!(vertices.len(), dims.vertex_count());
        debug_assert_eq!(indices.len(), dims.index_count());

        let mesh = GridMesh {
            dims,
            vertices,
            indices,
        };

        if let Some(observer) = self.observer {
            observer.on_built(&mesh);
        }

        Ok(mesh)
    }
}

/// Validates `rows`/`cols` and builds the mesh without an observer.
pub fn build(rows: u32, cols: u32) -> MeshResult<GridMesh> {
    GridMeshBuilder::new(GridDimensions::new(rows, cols)?).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_scenario() {
        let mesh = build(1, 1).unwrap();
        let positions: Vec<[f32; 3]> = mesh.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [-1.0, -1.0, 0.0],
                [-1.0, 1.0, 0.0],
                [1.0, -1.0, 0.0],
                [1.0, 1.0, 0.0],
            ]
        );
        assert_eq!(mesh.indices(), &[0, 2, 1, 3]);
    }

    #[test]
    fn two_rows_one_col_scenario() {
        let mesh = build(2, 1).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.indices(), &[0, 3, 1, 4, 2, 5]);
        assert_eq!(mesh.vertices()[1].position, [-1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices()[4].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_rows_rejected_before_build() {
        assert_eq!(
            build(0, 1),
            Err(MeshError::InvalidDimensions { rows: 0, cols: 1 })
        );
    }

    #[test]
    fn observer_sees_finished_mesh() {
        let mut seen = None;
        let mut obs = |m: &GridMesh| seen = Some((m.vertex_count(), m.index_count()));
        let dims = GridDimensions::new(3, 2).unwrap();
        GridMeshBuilder::new(dims).observer(&mut obs).build().unwrap();
        assert_eq!(seen, Some((12, 16)));
    }

    #[test]
    fn normals_point_up() {
        let mesh = build(2, 2).unwrap();
        assert!(mesh.vertices().iter().all(|v| v.normal == GridVertex::NORMAL));
    }
}
