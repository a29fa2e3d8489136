use glam::{Mat4, UVec2, Vec2, Vec3};

use super::quad::{QUAD_INDICES, QUAD_UVS, UNIT_QUAD_POSITIONS};
use crate::geometry::{Line, ViewState};
use crate::render::blend;
use crate::render::cache::UniformCache;
use crate::render::error::SetupError;
use crate::render::gpu::{
    AttributeBuffer, IndexBuffer, LinkOptions, OffscreenTarget, ShaderProgram, StepRate, Uniform,
    UploadPolicy,
};
use crate::render::shaders;
use crate::render::RenderCtx;

/// Instanced ribbons rendered into an off-screen target.
///
/// One draw call covers every line: the unit quad is per-vertex data, the
/// transform, color and widths are per-instance data rewritten each frame.
pub(crate) struct LinesPass {
    program: ShaderProgram,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    projection: Uniform<Mat4>,

    positions: AttributeBuffer<Vec2>,
    uvs: AttributeBuffer<Vec2>,
    model_matrices: AttributeBuffer<Mat4>,
    model_colors: AttributeBuffer<Vec3>,
    vertex_widths: AttributeBuffer<Vec3>,
    indices: IndexBuffer,

    target: OffscreenTarget,
    target_size: UniformCache<UVec2>,

    // Per-frame staging, kept to reuse allocations.
    matrix_scratch: Vec<Mat4>,
    color_scratch: Vec<Vec3>,
    width_scratch: Vec<Vec3>,
}

impl LinesPass {
    /// Off-screen clear color: fully transparent black.
    const CLEAR: wgpu::Color = wgpu::Color::TRANSPARENT;

    pub(crate) fn create(ctx: &RenderCtx<'_>, size: UVec2) -> Result<Self, SetupError> {
        let device = ctx.device;
        let program = ShaderProgram::compile(device, "lines", shaders::lines())?;

        let projection = Uniform::create(device, &program, "projection_matrix")?;

        let positions = AttributeBuffer::create(
            device,
            &program,
            "vertex_position",
            StepRate::Vertex,
            UploadPolicy::Static,
            &UNIT_QUAD_POSITIONS,
        )?;
        let uvs = AttributeBuffer::create(
            device,
            &program,
            "vertex_uv",
            StepRate::Vertex,
            UploadPolicy::Static,
            &QUAD_UVS,
        )?;
        let model_matrices = AttributeBuffer::create(
            device,
            &program,
            "model_matrix",
            StepRate::Instance,
            UploadPolicy::Dynamic,
            &[],
        )?;
        let model_colors = AttributeBuffer::create(
            device,
            &program,
            "model_color",
            StepRate::Instance,
            UploadPolicy::Dynamic,
            &[],
        )?;
        let vertex_widths = AttributeBuffer::create(
            device,
            &program,
            "vertex_width",
            StepRate::Instance,
            UploadPolicy::Dynamic,
            &[],
        )?;
        let indices = IndexBuffer::create(device, "lines indices", &QUAD_INDICES);

        let (bind_group_layout, pipeline_layout) =
            super::layouts(device, "lines", &[projection.layout_entry()]);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lines"),
            layout: &bind_group_layout,
            entries: &[projection.bind_group_entry()],
        });

        let pipeline = program.link(
            device,
            &LinkOptions {
                layout: &pipeline_layout,
                buffers: &[
                    positions.layout(),
                    uvs.layout(),
                    model_matrices.layout(),
                    model_colors.layout(),
                    vertex_widths.layout(),
                ],
                format: OffscreenTarget::FORMAT,
                blend: blend::max_blend(),
                sample_count: OffscreenTarget::SAMPLE_COUNT,
            },
        )?;

        let target = OffscreenTarget::create(device, "lines frame buffer", (size.x, size.y));
        let mut target_size = UniformCache::new();
        target_size.sync(size, |_| {});

        log::debug!("{} pass ready", program.label());
        Ok(Self {
            program,
            pipeline,
            bind_group,
            projection,
            positions,
            uvs,
            model_matrices,
            model_colors,
            vertex_widths,
            indices,
            target,
            target_size,
            matrix_scratch: Vec::new(),
            color_scratch: Vec::new(),
            width_scratch: Vec::new(),
        })
    }

    /// The resolved output of the last [`LinesPass::render`].
    #[inline]
    pub(crate) fn target(&self) -> &OffscreenTarget {
        &self.target
    }

    pub(crate) fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        encoder: &mut wgpu::CommandEncoder,
        view: &ViewState,
        lines: &[Line],
    ) {
        let target = &mut self.target;
        follow_view(&mut self.target_size, view, |size| {
            target.set_size(ctx.device, size);
        });

        self.matrix_scratch.clear();
        self.color_scratch.clear();
        self.width_scratch.clear();
        for line in lines {
            self.matrix_scratch.push(*line.transform_matrix());
            self.color_scratch.push(line.color());
            self.width_scratch.push(line.vertex_widths());
        }

        self.model_matrices
            .set_data(ctx.device, ctx.queue, &self.matrix_scratch);
        self.model_colors
            .set_data(ctx.device, ctx.queue, &self.color_scratch);
        self.vertex_widths
            .set_data(ctx.device, ctx.queue, &self.width_scratch);
        self.projection.set_if_changed(ctx.queue, view.projection());

        // The pass always runs so the target is cleared even with no lines.
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.program.label()),
            color_attachments: &[Some(self.target.color_attachment(Self::CLEAR))],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if lines.is_empty() {
            return;
        }

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.positions.bind(&mut rpass, 0);
        self.uvs.bind(&mut rpass, 1);
        self.model_matrices.bind(&mut rpass, 2);
        self.model_colors.bind(&mut rpass, 3);
        self.vertex_widths.bind(&mut rpass, 4);
        self.indices.bind(&mut rpass);
        rpass.draw_indexed(0..self.indices.count(), 0, 0..lines.len() as u32);
    }
}

/// Calls `resize` with the view size when it differs from the size the target
/// was last sized for.
pub(super) fn follow_view(
    target_size: &mut UniformCache<UVec2>,
    view: &ViewState,
    resize: impl FnOnce((u32, u32)),
) -> bool {
    target_size.sync(view.size(), |size| resize((size.x, size.y)))
}
