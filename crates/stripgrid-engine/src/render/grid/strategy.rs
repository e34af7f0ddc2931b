use stripgrid_mesh::{recomputed_strip, GridMesh, GridVertex};

use crate::render::backend::{IndexSource, StripBackend};

use super::RenderMode;

/// One render mode's behavior: how it sets up, draws, and tears down.
///
/// `enter` runs before the first `draw` with a given mesh, `exit` after the
/// last one; [`ModeMachine`](super::ModeMachine) guarantees the pairing.
pub trait DrawStrategy {
    fn mode(&self) -> RenderMode;

    fn enter(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh) {
        let _ = (backend, mesh);
    }

    fn exit(&mut self, backend: &mut dyn StripBackend) {
        let _ = backend;
    }

    fn draw(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh);
}

/// Builds the strategy implementing `mode`.
pub fn strategy_for(mode: RenderMode) -> Box<dyn DrawStrategy> {
    match mode {
        RenderMode::Immediate => Box::new(Immediate::default()),
        RenderMode::CachedVertices => Box::new(CachedVertices::default()),
        RenderMode::CachedVertexIndices => Box::new(CachedVertexIndices::default()),
        RenderMode::VertexArray => Box::new(VertexArray),
        RenderMode::VertexBufferObject => Box::new(VertexBufferObject),
    }
}

/// Collects every column strip into `scratch`, streams it, then issues one
/// strip draw per column.
fn emit_columns<I>(
    backend: &mut dyn StripBackend,
    scratch: &mut Vec<GridVertex>,
    mesh: &GridMesh,
    mut strip: impl FnMut(u32) -> I,
) where
    I: Iterator<Item = GridVertex>,
{
    let cols = mesh.strip_count();
    let len = mesh.strip_len() as u32;

    scratch.clear();
    scratch.reserve(mesh.index_count());
    for col in 0..cols {
        scratch.extend(strip(col));
    }
    debug_assert_eq!(scratch.len(), mesh.index_count());

    backend.stream_vertices(scratch);
    for col in 0..cols {
        backend.draw_strip(col * len..(col + 1) * len);
    }
}

/// Ignores the stored buffers and recomputes every coordinate.
#[derive(Debug, Default)]
pub struct Immediate {
    scratch: Vec<GridVertex>,
}

impl DrawStrategy for Immediate {
    fn mode(&self) -> RenderMode {
        RenderMode::Immediate
    }

    fn draw(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh) {
        let dims = mesh.dims();
        emit_columns(backend, &mut self.scratch, mesh, |col| {
            recomputed_strip(dims, col)
        });
    }
}

#[derive(Debug, Default)]
pub struct CachedVertices {
    scratch: Vec<GridVertex>,
}

impl DrawStrategy for CachedVertices {
    fn mode(&self) -> RenderMode {
        RenderMode::CachedVertices
    }

    fn draw(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh) {
        emit_columns(backend, &mut self.scratch, mesh, |col| {
            mesh.addressed_strip(col)
        });
    }
}

#[derive(Debug, Default)]
pub struct CachedVertexIndices {
    scratch: Vec<GridVertex>,
}

impl DrawStrategy for CachedVertexIndices {
    fn mode(&self) -> RenderMode {
        RenderMode::CachedVertexIndices
    }

    fn draw(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh) {
        emit_columns(backend, &mut self.scratch, mesh, |col| {
            mesh.indexed_strip(col)
        });
    }
}

fn draw_indexed_columns(backend: &mut dyn StripBackend, source: IndexSource, mesh: &GridMesh) {
    for col in 0..mesh.strip_count() {
        backend.draw_indexed_strip(source, mesh.strip_range(col));
    }
}

#[derive(Debug, Default)]
pub struct VertexArray;

impl DrawStrategy for VertexArray {
    fn mode(&self) -> RenderMode {
        RenderMode::VertexArray
    }

    fn enter(&mut self, backend: &mut dyn StripBackend, _mesh: &GridMesh) {
        backend.enable_client_arrays();
    }

    fn exit(&mut self, backend: &mut dyn StripBackend) {
        backend.disable_client_arrays();
    }

    fn draw(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh) {
        backend.bind_client_arrays(mesh.vertices(), mesh.indices());
        draw_indexed_columns(backend, IndexSource::Client, mesh);
    }
}

#[derive(Debug, Default)]
pub struct VertexBufferObject;

impl DrawStrategy for VertexBufferObject {
    fn mode(&self) -> RenderMode {
        RenderMode::VertexBufferObject
    }

    fn enter(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh) {
        backend.upload_resident(mesh.vertices(), mesh.indices());
    }

    fn exit(&mut self, backend: &mut dyn StripBackend) {
        backend.release_resident();
    }

    fn draw(&mut self, backend: &mut dyn StripBackend, mesh: &GridMesh) {
        draw_indexed_columns(backend, IndexSource::Resident, mesh);
    }
}
