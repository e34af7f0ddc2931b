use crate::render::backend::{grid_vertex_layout, GpuStripBackend, GpuStripFrame};
use crate::render::camera::{CameraUniform, Ortho};
use crate::render::pipeline::{create_pipeline, CameraBinding, PipelineDesc};
use crate::render::{Color, RenderCtx, RenderTarget};

/// Draws whatever the active [`DrawStrategy`](super::DrawStrategy) recorded
/// into its backend as triangle strips, in one flat color.
///
/// Strips are drawn as wireframe when the device supports
/// `POLYGON_MODE_LINE`, filled otherwise.
pub struct GridRenderer {
    pipeline_key: Option<(wgpu::TextureFormat, bool)>,
    pipeline: Option<wgpu::RenderPipeline>,
    camera: Option<CameraBinding>,

    backend: GpuStripBackend,
    ortho: Ortho,
    color: Color,

    warned_filled: bool,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(Ortho::default(), Color::WHITE)
    }
}

impl GridRenderer {
    pub fn new(ortho: Ortho, color: Color) -> Self {
        Self {
            pipeline_key: None,
            pipeline: None,
            camera: None,
            backend: GpuStripBackend::new(),
            ortho,
            color,
            warned_filled: false,
        }
    }

    /// Backend handed to the mode machine for this frame.
    pub fn backend<'a>(&'a mut self, ctx: &RenderCtx<'a>) -> GpuStripFrame<'a> {
        self.backend.frame(ctx)
    }

    /// Replays this frame's recorded strips into `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if !self.backend.has_draws() {
            return;
        }

        self.ensure_pipeline(ctx);

        let Some(camera) = self.camera.as_ref() else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        camera.write(ctx.queue, &CameraUniform::new(&self.ortho, self.color.to_array()));

        let mut rpass = target.load_pass("stripgrid grid pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &camera.bind_group, &[]);
        self.backend.encode(&mut rpass);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let wireframe = ctx.supports_wireframe();
        let key = (ctx.surface_format, wireframe);
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }

        if !wireframe && !self.warned_filled {
            log::warn!("POLYGON_MODE_LINE unavailable; grid strips are drawn filled");
            self.warned_filled = true;
        }

        let camera = self
            .camera
            .get_or_insert_with(|| CameraBinding::new(ctx.device, "stripgrid grid camera"));

        let pipeline = create_pipeline(
            ctx,
            camera,
            PipelineDesc {
                label: "stripgrid grid pipeline",
                shader: include_str!("../shaders/grid.wgsl"),
                buffers: &[grid_vertex_layout()],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: Some(wgpu::IndexFormat::Uint32),
                polygon_mode: if wireframe {
                    wgpu::PolygonMode::Line
                } else {
                    wgpu::PolygonMode::Fill
                },
            },
        );

        log::debug!(
            "grid pipeline built for {:?} (wireframe: {wireframe})",
            ctx.surface_format
        );
        self.pipeline = Some(pipeline);
        self.pipeline_key = Some(key);
    }
}
