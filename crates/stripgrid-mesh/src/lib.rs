//! Grid tessellation for strip-based renderers.
//!
//! Produces an evenly spaced planar grid over `[-1, 1] x [-1, 1]` as a flat
//! vertex buffer plus an index buffer made of one triangle-strip run per
//! column, so a renderer can issue one strip draw per column by slicing the
//! index buffer in fixed `2 * (rows + 1)` chunks.
//!
//! ```
//! let mesh = stripgrid_mesh::build(2, 1).unwrap();
//! assert_eq!(mesh.vertex_count(), 6);
//! assert_eq!(mesh.column_strip(0), &[0, 3, 1, 4, 2, 5]);
//! ```

pub mod builder;
pub mod dims;
pub mod error;
pub mod mesh;
pub mod observer;
pub mod vertex;

pub use builder::{build, GridMeshBuilder};
pub use dims::GridDimensions;
pub use error::{BufferKind, MeshError, MeshResult};
pub use mesh::{recomputed_strip, GridMesh};
pub use observer::{LogObserver, MeshObserver};
pub use vertex::GridVertex;
