//! The surface draw strategies talk to.
//!
//! A strategy never touches wgpu directly; it streams or uploads buffers and
//! issues strip draws through [`StripBackend`]. [`GpuStripBackend`] records
//! onto wgpu buffers, [`RecordingBackend`] just logs the calls.

mod gpu;
mod recording;

use std::ops::Range;

use stripgrid_mesh::GridVertex;

pub(crate) use gpu::grid_vertex_layout;
pub use gpu::{GpuStripBackend, GpuStripFrame};
pub use recording::{BackendCall, RecordingBackend};

/// Where an indexed strip draw reads its vertex and index data from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexSource {
    /// Host arrays re-sent by [`StripBackend::bind_client_arrays`] every frame.
    Client,
    /// Device buffers created once by [`StripBackend::upload_resident`].
    Resident,
}

/// Renderer backend consumed by the draw strategies.
///
/// Vertices are laid out as [`GridVertex`] (position then normal, stride
/// [`GridVertex::STRIDE`]); every draw is a triangle strip.
pub trait StripBackend {
    /// Replaces this frame's non-indexed vertex stream.
    fn stream_vertices(&mut self, vertices: &[GridVertex]);

    /// Records a strip over `vertices` of the current stream.
    fn draw_strip(&mut self, vertices: Range<u32>);

    /// Turns on client-side arrays.
    fn enable_client_arrays(&mut self);

    /// Hands this frame's host arrays to the backend.
    fn bind_client_arrays(&mut self, vertices: &[GridVertex], indices: &[u32]);

    /// Turns client-side arrays off and forgets the bound data.
    fn disable_client_arrays(&mut self);

    /// Creates device-resident buffers holding a copy of the mesh.
    fn upload_resident(&mut self, vertices: &[GridVertex], indices: &[u32]);

    /// Frees the resident buffers.
    fn release_resident(&mut self);

    /// Records a strip over the index run `indices` of `source`.
    fn draw_indexed_strip(&mut self, source: IndexSource, indices: Range<u32>);
}
