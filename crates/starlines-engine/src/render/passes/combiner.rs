use glam::Mat4;

use super::quad::FullscreenQuad;
use crate::geometry::ViewState;
use crate::render::blend;
use crate::render::cache::UniformCache;
use crate::render::error::SetupError;
use crate::render::gpu::{LinkOptions, OffscreenTarget, ShaderProgram, Uniform, UniformLocation};
use crate::render::shaders;
use crate::render::{RenderCtx, RenderTarget};

/// Blits the lines target over the surface with the combiner blend.
pub(crate) struct CombinerPass {
    program: ShaderProgram,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,

    projection: Uniform<Mat4>,
    frame_buffer: UniformLocation,
    frame_buffer_sampler: UniformLocation,
    bound_generation: UniformCache<u64>,

    quad: FullscreenQuad,
}

impl CombinerPass {
    pub(crate) fn create(
        ctx: &RenderCtx<'_>,
        lines_target: &OffscreenTarget,
    ) -> Result<Self, SetupError> {
        let device = ctx.device;
        let program = ShaderProgram::compile(device, "combiner", shaders::combiner())?;

        let projection = Uniform::create(device, &program, "projection_matrix")?;
        let frame_buffer = program.uniform_location("lines_frame_buffer")?;
        let frame_buffer_sampler = program.uniform_location("lines_frame_buffer_sampler")?;
        let quad = FullscreenQuad::create(device, &program, "combiner indices")?;

        let (bind_group_layout, pipeline_layout) = super::layouts(
            device,
            "combiner",
            &[
                projection.layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: frame_buffer.binding,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: frame_buffer_sampler.binding,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        );

        let pipeline = program.link(
            device,
            &LinkOptions {
                layout: &pipeline_layout,
                buffers: &quad.layouts(),
                format: ctx.surface_format,
                blend: blend::combiner_blend(),
                sample_count: 1,
            },
        )?;

        let bind_group = create_bind_group(
            device,
            &bind_group_layout,
            &projection,
            frame_buffer,
            frame_buffer_sampler,
            lines_target,
        );
        let mut bound_generation = UniformCache::new();
        bound_generation.sync(lines_target.generation(), |_| {});

        log::debug!("{} pass ready", program.label());
        Ok(Self {
            program,
            pipeline,
            bind_group_layout,
            bind_group,
            projection,
            frame_buffer,
            frame_buffer_sampler,
            bound_generation,
            quad,
        })
    }

    pub(crate) fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view: &ViewState,
        lines_target: &OffscreenTarget,
    ) {
        // A resized target has new views; rebind before sampling it.
        let bind_group = &mut self.bind_group;
        let (layout, projection) = (&self.bind_group_layout, &self.projection);
        let (frame_buffer, frame_buffer_sampler) = (self.frame_buffer, self.frame_buffer_sampler);
        rebind_if_stale(&mut self.bound_generation, lines_target.generation(), || {
            *bind_group = create_bind_group(
                ctx.device,
                layout,
                projection,
                frame_buffer,
                frame_buffer_sampler,
                lines_target,
            );
        });

        self.projection.set_if_changed(ctx.queue, view.projection());
        self.quad.fit(ctx.device, ctx.queue, view.size());

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.program.label()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.quad.draw(&mut rpass);
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    projection: &Uniform<Mat4>,
    frame_buffer: UniformLocation,
    frame_buffer_sampler: UniformLocation,
    lines_target: &OffscreenTarget,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("combiner"),
        layout,
        entries: &[
            projection.bind_group_entry(),
            wgpu::BindGroupEntry {
                binding: frame_buffer.binding,
                resource: wgpu::BindingResource::TextureView(lines_target.sampled_view()),
            },
            wgpu::BindGroupEntry {
                binding: frame_buffer_sampler.binding,
                resource: wgpu::BindingResource::Sampler(lines_target.sampler()),
            },
        ],
    })
}

/// Calls `rebind` when the target was reallocated since the bind group was
/// built.
pub(super) fn rebind_if_stale(
    bound_generation: &mut UniformCache<u64>,
    target_generation: u64,
    rebind: impl FnOnce(),
) -> bool {
    bound_generation.sync(target_generation, |_| rebind())
}
