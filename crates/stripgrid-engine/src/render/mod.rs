//! GPU rendering subsystem.
//!
//! Strategies in [`grid`] describe a frame as strip draws on a
//! [`StripBackend`](backend::StripBackend); [`GridRenderer`](grid::GridRenderer)
//! and [`AxesRenderer`](axes::AxesRenderer) turn that into wgpu passes.
//! Each renderer owns its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - World space is right-handed, the grid lies in z = 0.
//! - Vertex shaders project with an [`Ortho`] uniform.

pub mod axes;
pub mod backend;
mod camera;
mod color;
mod ctx;
pub mod grid;
mod pipeline;

pub use camera::Ortho;
pub use color::Color;
pub use ctx::{RenderCtx, RenderTarget};
