use bytemuck::{Pod, Zeroable};

/// Orthographic view volume, same parameters as a classic `glOrtho` call.
///
/// Depth is remapped to wgpu's `[0, 1]` clip range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ortho {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Ortho {
    /// Square volume `[-half, half]` in x and y, `[-1, 1]` in depth.
    pub const fn square(half: f32) -> Self {
        Self {
            left: -half,
            right: half,
            bottom: -half,
            top: half,
            near: -1.0,
            far: 1.0,
        }
    }

    /// Column-major projection matrix.
    pub fn matrix(&self) -> [[f32; 4]; 4] {
        let w = self.right - self.left;
        let h = self.top - self.bottom;
        let d = self.far - self.near;
        [
            [2.0 / w, 0.0, 0.0, 0.0],
            [0.0, 2.0 / h, 0.0, 0.0],
            [0.0, 0.0, -1.0 / d, 0.0],
            [
                -(self.right + self.left) / w,
                -(self.top + self.bottom) / h,
                -self.near / d,
                1.0,
            ],
        ]
    }

    /// Applies the projection to a point (w is always 1 for orthographic).
    pub fn project(&self, p: [f32; 3]) -> [f32; 3] {
        let m = self.matrix();
        let mut out = [0.0; 3];
        for (row, o) in out.iter_mut().enumerate() {
            *o = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
        }
        out
    }
}

impl Default for Ortho {
    fn default() -> Self {
        Self::square(2.0)
    }
}

/// Uniform block shared by the grid and axes shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub proj: [[f32; 4]; 4],
    /// Flat color for pipelines without per-vertex color.
    pub color: [f32; 4],
}

impl CameraUniform {
    pub(crate) fn new(ortho: &Ortho, color: [f32; 4]) -> Self {
        Self {
            proj: ortho.matrix(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn default_view_maps_grid_to_half_the_screen() {
        let o = Ortho::default();
        assert!(close(o.project([-1.0, -1.0, 0.0]), [-0.5, -0.5, 0.5]));
        assert!(close(o.project([1.0, 1.0, 0.0]), [0.5, 0.5, 0.5]));
        assert!(close(o.project([2.0, -2.0, 0.0]), [1.0, -1.0, 0.5]));
    }

    #[test]
    fn depth_range_is_zero_to_one() {
        let o = Ortho::square(1.0);
        assert!((o.project([0.0, 0.0, -1.0])[2] - 1.0).abs() < 1e-6);
        assert!(o.project([0.0, 0.0, 1.0])[2].abs() < 1e-6);
    }

    #[test]
    fn off_center_volume() {
        let o = Ortho { left: 0.0, right: 4.0, bottom: 0.0, top: 2.0, near: -1.0, far: 1.0 };
        assert!(close(o.project([0.0, 0.0, 0.0]), [-1.0, -1.0, 0.5]));
        assert!(close(o.project([4.0, 2.0, 0.0]), [1.0, 1.0, 0.5]));
    }

    #[test]
    fn uniform_is_80_bytes() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
