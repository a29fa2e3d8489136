use glam::{UVec2, Vec2};

use crate::render::cache::UniformCache;
use crate::render::error::SetupError;
use crate::render::gpu::{AttributeBuffer, IndexBuffer, ShaderProgram, StepRate, UploadPolicy};

/// Unit quad centered on the origin, counter-clockwise from the bottom-left
/// corner in local space.
pub(crate) const UNIT_QUAD_POSITIONS: [Vec2; 4] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(-0.5, 0.5),
];

pub(crate) const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Two triangles fanning out from vertex 0.
pub(crate) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Pixel-space corners of a `size` viewport, in the same order as
/// [`QUAD_UVS`] so that uv (0, 0) is the top-left pixel.
pub(crate) fn viewport_corners(size: UVec2) -> [Vec2; 4] {
    let size = size.as_vec2();
    [
        Vec2::ZERO,
        Vec2::new(size.x, 0.0),
        size,
        Vec2::new(0.0, size.y),
    ]
}

/// Full-viewport quad geometry for one program.
///
/// The position buffer is rewritten only when the viewport size differs from
/// the size it was last written for.
pub(crate) struct FullscreenQuad {
    positions: AttributeBuffer<Vec2>,
    uvs: AttributeBuffer<Vec2>,
    indices: IndexBuffer,
    size: UniformCache<UVec2>,
}

impl FullscreenQuad {
    pub(crate) fn create(
        device: &wgpu::Device,
        program: &ShaderProgram,
        label: &'static str,
    ) -> Result<Self, SetupError> {
        Ok(Self {
            positions: AttributeBuffer::create(
                device,
                program,
                "vertex_position",
                StepRate::Vertex,
                UploadPolicy::Static,
                &[Vec2::ZERO; 4],
            )?,
            uvs: AttributeBuffer::create(
                device,
                program,
                "vertex_uv",
                StepRate::Vertex,
                UploadPolicy::Static,
                &QUAD_UVS,
            )?,
            indices: IndexBuffer::create(device, label, &QUAD_INDICES),
            size: UniformCache::new(),
        })
    }

    pub(crate) fn layouts(&self) -> [wgpu::VertexBufferLayout<'_>; 2] {
        [self.positions.layout(), self.uvs.layout()]
    }

    /// Rewrites the corner positions if `size` changed.
    pub(crate) fn fit(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, size: UVec2) {
        let positions = &mut self.positions;
        self.size.sync(size, |size| {
            positions.set_data(device, queue, &viewport_corners(*size));
        });
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        self.positions.bind(pass, 0);
        self.uvs.bind(pass, 1);
        self.indices.bind(pass);
        pass.draw_indexed(0..self.indices.count(), 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_corners_follow_uv_order() {
        let corners = viewport_corners(UVec2::new(800, 600));
        for (corner, uv) in corners.iter().zip(QUAD_UVS) {
            assert_eq!(*corner, uv * Vec2::new(800.0, 600.0));
        }
    }

    #[test]
    fn indices_cover_all_four_corners() {
        let mut seen = QUAD_INDICES.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn unit_quad_is_centered() {
        let sum: Vec2 = UNIT_QUAD_POSITIONS.iter().copied().sum();
        assert_eq!(sum, Vec2::ZERO);
    }
}
