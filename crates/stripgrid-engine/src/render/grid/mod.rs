//! Grid rendering: render modes, their draw strategies, and the wgpu renderer.

mod machine;
mod mode;
mod renderer;
mod strategy;

pub use machine::ModeMachine;
pub use mode::{ParseModeError, RenderMode};
pub use renderer::GridRenderer;
pub use strategy::{
    strategy_for, CachedVertexIndices, CachedVertices, DrawStrategy, Immediate, VertexArray,
    VertexBufferObject,
};
