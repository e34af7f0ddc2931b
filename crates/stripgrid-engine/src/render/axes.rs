//! Coordinate-axes overlay: x red, y green, z blue, drawn from the origin.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::camera::{CameraUniform, Ortho};
use super::pipeline::{create_pipeline, CameraBinding, PipelineDesc};
use super::{Color, RenderCtx, RenderTarget};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxesConfig {
    /// Length of each axis line in world units.
    pub length: f32,
    pub enabled: bool,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            length: 5.0,
            enabled: true,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct AxesVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl AxesVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<AxesVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Three line segments (six vertices) from the origin along +x, +y and +z.
pub fn axes_vertices(length: f32) -> [AxesVertex; 6] {
    let origin = [0.0, 0.0, 0.0];
    let line = |tip: [f32; 3], color: Color| {
        let color = color.to_array();
        [
            AxesVertex {
                position: origin,
                color,
            },
            AxesVertex {
                position: tip,
                color,
            },
        ]
    };

    let [x0, x1] = line([length, 0.0, 0.0], Color::RED);
    let [y0, y1] = line([0.0, length, 0.0], Color::GREEN);
    let [z0, z1] = line([0.0, 0.0, length], Color::BLUE);
    [x0, x1, y0, y1, z0, z1]
}

/// Draws the axes as a line list; callers draw it before the grid.
pub struct AxesRenderer {
    config: AxesConfig,
    ortho: Ortho,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    camera: Option<CameraBinding>,

    vbo: Option<wgpu::Buffer>,
}

impl AxesRenderer {
    pub fn new(config: AxesConfig, ortho: Ortho) -> Self {
        Self {
            config,
            ortho,
            pipeline_format: None,
            pipeline: None,
            camera: None,
            vbo: None,
        }
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if !self.config.enabled {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_vertices(ctx);

        let Some(camera) = self.camera.as_ref() else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        // Per-vertex colors; the uniform color is unused by this shader.
        camera.write(ctx.queue, &CameraUniform::new(&self.ortho, Color::WHITE.to_array()));

        let mut rpass = target.load_pass("stripgrid axes pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &camera.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..6, 0..1);
    }

    fn ensure_vertices(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() {
            return;
        }

        let vertices = axes_vertices(self.config.length);
        self.vbo = Some(
            ctx.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("stripgrid axes vbo"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
        );
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let camera = self
            .camera
            .get_or_insert_with(|| CameraBinding::new(ctx.device, "stripgrid axes camera"));

        self.pipeline = Some(create_pipeline(
            ctx,
            camera,
            PipelineDesc {
                label: "stripgrid axes pipeline",
                shader: include_str!("shaders/axes.wgsl"),
                buffers: &[AxesVertex::layout()],
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                polygon_mode: wgpu::PolygonMode::Fill,
            },
        ));
        self.pipeline_format = Some(ctx.surface_format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_axis_starts_at_origin() {
        let v = axes_vertices(5.0);
        for pair in v.chunks(2) {
            assert_eq!(pair[0].position, [0.0, 0.0, 0.0]);
            assert_eq!(pair[0].color, pair[1].color);
        }
        assert_eq!(v[1].position, [5.0, 0.0, 0.0]);
        assert_eq!(v[3].position, [0.0, 5.0, 0.0]);
        assert_eq!(v[5].position, [0.0, 0.0, 5.0]);
    }

    #[test]
    fn axis_colors_are_rgb() {
        let v = axes_vertices(1.0);
        assert_eq!(v[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(v[2].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(v[4].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn vertex_stride_is_28_bytes() {
        assert_eq!(std::mem::size_of::<AxesVertex>(), 28);
    }
}
