use std::ops::Range;

use stripgrid_mesh::GridVertex;

use super::{IndexSource, StripBackend};

/// One call made against a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    StreamVertices { count: usize },
    DrawStrip { vertices: Range<u32> },
    EnableClientArrays,
    BindClientArrays { vertices: usize, indices: usize },
    DisableClientArrays,
    UploadResident { vertices: usize, indices: usize },
    ReleaseResident,
    DrawIndexedStrip { source: IndexSource, indices: Range<u32> },
}

/// Backend that records calls instead of rendering.
///
/// Keeps the last streamed vertices and the resident copy so callers can
/// check what a GPU would have been given. Used for headless dry runs and
/// tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    pub streamed: Vec<GridVertex>,
    pub resident: Option<(Vec<GridVertex>, Vec<u32>)>,
    pub client_arrays_enabled: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the recorded calls, keeping buffer state.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Draw calls only, in order.
    pub fn draws(&self) -> impl Iterator<Item = &BackendCall> {
        self.calls.iter().filter(|c| {
            matches!(
                c,
                BackendCall::DrawStrip { .. } | BackendCall::DrawIndexedStrip { .. }
            )
        })
    }
}

impl StripBackend for RecordingBackend {
    fn stream_vertices(&mut self, vertices: &[GridVertex]) {
        self.streamed.clear();
        self.streamed.extend_from_slice(vertices);
        self.calls.push(BackendCall::StreamVertices {
            count: vertices.len(),
        });
    }

    fn draw_strip(&mut self, vertices: Range<u32>) {
        self.calls.push(BackendCall::DrawStrip { vertices });
    }

    fn enable_client_arrays(&mut self) {
        self.client_arrays_enabled = true;
        self.calls.push(BackendCall::EnableClientArrays);
    }

    fn bind_client_arrays(&mut self, vertices: &[GridVertex], indices: &[u32]) {
        self.calls.push(BackendCall::BindClientArrays {
            vertices: vertices.len(),
            indices: indices.len(),
        });
    }

    fn disable_client_arrays(&mut self) {
        self.client_arrays_enabled = false;
        self.calls.push(BackendCall::DisableClientArrays);
    }

    fn upload_resident(&mut self, vertices: &[GridVertex], indices: &[u32]) {
        self.resident = Some((vertices.to_vec(), indices.to_vec()));
        self.calls.push(BackendCall::UploadResident {
            vertices: vertices.len(),
            indices: indices.len(),
        });
    }

    fn release_resident(&mut self) {
        self.resident = None;
        self.calls.push(BackendCall::ReleaseResident);
    }

    fn draw_indexed_strip(&mut self, source: IndexSource, indices: Range<u32>) {
        self.calls.push(BackendCall::DrawIndexedStrip { source, indices });
    }
}
