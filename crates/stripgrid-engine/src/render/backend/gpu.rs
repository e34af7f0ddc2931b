use std::ops::Range;

use stripgrid_mesh::GridVertex;

use crate::render::RenderCtx;

use super::{IndexSource, StripBackend};

/// Vertex layout of [`GridVertex`] as seen by the grid shader: position only,
/// normal skipped via the stride.
pub(crate) const GRID_VERTEX_ATTRS: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];

pub(crate) fn grid_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: GridVertex::STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &GRID_VERTEX_ATTRS,
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum DrawSource {
    Stream,
    Indexed(IndexSource),
}

/// A device buffer rewritten from host memory, grown to the next power of two.
struct HostBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
}

impl HostBuffer {
    const MIN_CAPACITY: u64 = 256;

    fn new(label: &'static str, usage: wgpu::BufferUsages) -> Self {
        Self {
            label,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            buffer: None,
            capacity: 0,
        }
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }

        let needed = bytes.len() as u64;
        if self.buffer.is_none() || needed > self.capacity {
            let capacity = needed.next_power_of_two().max(Self::MIN_CAPACITY);
            log::debug!("{}: growing to {capacity} bytes", self.label);
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: capacity,
                usage: self.usage,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        if let Some(buffer) = self.buffer.as_ref() {
            queue.write_buffer(buffer, 0, bytes);
        }
    }

    fn release(&mut self) {
        self.buffer = None;
        self.capacity = 0;
    }
}

struct ResidentBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
}

/// wgpu buffers behind the [`StripBackend`] calls, kept across frames.
///
/// Draws are recorded while strategies run and replayed by
/// [`GpuStripBackend::encode`] inside a render pass. Use
/// [`GpuStripBackend::frame`] to get the `StripBackend` for one frame.
pub struct GpuStripBackend {
    stream: HostBuffer,
    client_vertices: HostBuffer,
    client_indices: HostBuffer,
    client_enabled: bool,
    client_bound: bool,
    resident: Option<ResidentBuffers>,

    draws: Vec<(DrawSource, Range<u32>)>,
    warned_unbound: bool,
}

impl Default for GpuStripBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuStripBackend {
    pub fn new() -> Self {
        Self {
            stream: HostBuffer::new("stripgrid stream vbo", wgpu::BufferUsages::VERTEX),
            client_vertices: HostBuffer::new("stripgrid client vbo", wgpu::BufferUsages::VERTEX),
            client_indices: HostBuffer::new("stripgrid client ibo", wgpu::BufferUsages::INDEX),
            client_enabled: false,
            client_bound: false,
            resident: None,
            draws: Vec::new(),
            warned_unbound: false,
        }
    }

    /// Borrows the backend together with the device and queue for one frame.
    pub fn frame<'a>(&'a mut self, ctx: &RenderCtx<'a>) -> GpuStripFrame<'a> {
        GpuStripFrame {
            backend: self,
            device: ctx.device,
            queue: ctx.queue,
        }
    }

    /// True if draws are waiting for [`encode`](Self::encode).
    pub fn has_draws(&self) -> bool {
        !self.draws.is_empty()
    }

    /// Replays the recorded draws into `rpass` and clears them.
    ///
    /// The caller sets the pipeline and bind groups first.
    pub fn encode(&mut self, rpass: &mut wgpu::RenderPass<'_>) {
        let mut bound: Option<DrawSource> = None;

        for (source, range) in self.draws.drain(..) {
            if bound != Some(source) {
                let ok = match source {
                    DrawSource::Stream => bind_vertices(rpass, self.stream.buffer.as_ref()),
                    DrawSource::Indexed(IndexSource::Client) => bind_indexed(
                        rpass,
                        self.client_vertices.buffer.as_ref(),
                        self.client_indices.buffer.as_ref(),
                    ),
                    DrawSource::Indexed(IndexSource::Resident) => match &self.resident {
                        Some(r) => bind_indexed(rpass, Some(&r.vertices), Some(&r.indices)),
                        None => false,
                    },
                };
                if !ok {
                    continue;
                }
                bound = Some(source);
            }

            match source {
                DrawSource::Stream => rpass.draw(range, 0..1),
                DrawSource::Indexed(_) => rpass.draw_indexed(range, 0, 0..1),
            }
        }
    }

    fn warn_unbound(&mut self, what: &str) {
        if !self.warned_unbound {
            log::warn!("indexed strip draw from {what} buffers that are not bound; skipped");
            self.warned_unbound = true;
        }
    }
}

fn bind_vertices(rpass: &mut wgpu::RenderPass<'_>, vbo: Option<&wgpu::Buffer>) -> bool {
    let Some(vbo) = vbo else { return false };
    rpass.set_vertex_buffer(0, vbo.slice(..));
    true
}

fn bind_indexed(
    rpass: &mut wgpu::RenderPass<'_>,
    vbo: Option<&wgpu::Buffer>,
    ibo: Option<&wgpu::Buffer>,
) -> bool {
    let (Some(vbo), Some(ibo)) = (vbo, ibo) else { return false };
    rpass.set_vertex_buffer(0, vbo.slice(..));
    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
    true
}

/// [`StripBackend`] for a single frame: the persistent buffers plus the
/// device/queue needed to (re)fill them.
pub struct GpuStripFrame<'a> {
    backend: &'a mut GpuStripBackend,
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl StripBackend for GpuStripFrame<'_> {
    fn stream_vertices(&mut self, vertices: &[GridVertex]) {
        self.backend
            .stream
            .write(self.device, self.queue, bytemuck::cast_slice(vertices));
    }

    fn draw_strip(&mut self, vertices: Range<u32>) {
        self.backend.draws.push((DrawSource::Stream, vertices));
    }

    fn enable_client_arrays(&mut self) {
        self.backend.client_enabled = true;
    }

    fn bind_client_arrays(&mut self, vertices: &[GridVertex], indices: &[u32]) {
        if !self.backend.client_enabled {
            log::warn!("client arrays bound while disabled; ignored");
            return;
        }
        let b = &mut *self.backend;
        b.client_vertices
            .write(self.device, self.queue, bytemuck::cast_slice(vertices));
        b.client_indices
            .write(self.device, self.queue, bytemuck::cast_slice(indices));
        b.client_bound = true;
    }

    fn disable_client_arrays(&mut self) {
        let b = &mut *self.backend;
        b.client_enabled = false;
        b.client_bound = false;
        b.client_vertices.release();
        b.client_indices.release();
    }

    fn upload_resident(&mut self, vertices: &[GridVertex], indices: &[u32]) {
        use wgpu::util::DeviceExt;

        let vbo = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("stripgrid resident vbo"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let ibo = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("stripgrid resident ibo"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "resident buffers uploaded: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );
        self.backend.resident = Some(ResidentBuffers {
            vertices: vbo,
            indices: ibo,
        });
    }

    fn release_resident(&mut self) {
        if self.backend.resident.take().is_some() {
            log::debug!("resident buffers released");
        }
    }

    fn draw_indexed_strip(&mut self, source: IndexSource, indices: Range<u32>) {
        let ready = match source {
            IndexSource::Client => self.backend.client_bound,
            IndexSource::Resident => self.backend.resident.is_some(),
        };
        if !ready {
            let what = match source {
                IndexSource::Client => "client",
                IndexSource::Resident => "resident",
            };
            self.backend.warn_unbound(what);
            return;
        }
        self.backend
            .draws
            .push((DrawSource::Indexed(source), indices));
    }
}
