use bytemuck::{Pod, Zeroable};

/// One grid vertex as laid out in the vertex buffer.
///
/// `#[repr(C)]` so the buffer can be handed to a GPU backend as raw bytes with
/// a stride of `size_of::<GridVertex>()`. The normal rides along for backends
/// that bind it; the builder always writes `+Z`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl GridVertex {
    pub const NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

    /// Byte stride between consecutive vertices.
    pub const STRIDE: u64 = std::mem::size_of::<GridVertex>() as u64;

    #[inline]
    pub const fn flat(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: Self::NORMAL,
        }
    }
}
