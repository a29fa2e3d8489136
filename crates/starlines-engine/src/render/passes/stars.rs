use glam::{Mat4, Vec3};

use super::quad::FullscreenQuad;
use crate::geometry::ViewState;
use crate::render::blend;
use crate::render::error::SetupError;
use crate::render::gpu::{LinkOptions, ShaderProgram, Uniform};
use crate::render::scene::StarfieldParams;
use crate::render::shaders;
use crate::render::{RenderCtx, RenderTarget};

/// Full-viewport procedural starfield, drawn straight onto the surface.
pub(crate) struct StarsPass {
    program: ShaderProgram,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    projection: Uniform<Mat4>,
    background_color: Uniform<Vec3>,
    star_density: Uniform<f32>,

    quad: FullscreenQuad,
}

impl StarsPass {
    pub(crate) fn create(ctx: &RenderCtx<'_>) -> Result<Self, SetupError> {
        let device = ctx.device;
        let program = ShaderProgram::compile(device, "stars", shaders::stars())?;

        let projection = Uniform::create(device, &program, "projection_matrix")?;
        let background_color = Uniform::create(device, &program, "background_color")?;
        let star_density = Uniform::create(device, &program, "star_density")?;
        let quad = FullscreenQuad::create(device, &program, "stars indices")?;

        let (bind_group_layout, pipeline_layout) = super::layouts(
            device,
            "stars",
            &[
                projection.layout_entry(),
                background_color.layout_entry(),
                star_density.layout_entry(),
            ],
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stars"),
            layout: &bind_group_layout,
            entries: &[
                projection.bind_group_entry(),
                background_color.bind_group_entry(),
                star_density.bind_group_entry(),
            ],
        });

        let pipeline = program.link(
            device,
            &LinkOptions {
                layout: &pipeline_layout,
                buffers: &quad.layouts(),
                format: ctx.surface_format,
                blend: blend::standard_alpha(),
                sample_count: 1,
            },
        )?;

        log::debug!("{} pass ready", program.label());
        Ok(Self {
            program,
            pipeline,
            bind_group,
            projection,
            background_color,
            star_density,
            quad,
        })
    }

    pub(crate) fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view: &ViewState,
        params: StarfieldParams,
    ) {
        self.projection.set_if_changed(ctx.queue, view.projection());
        self.background_color
            .set_if_changed(ctx.queue, params.background_color);
        self.star_density.set_if_changed(ctx.queue, params.density);
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
