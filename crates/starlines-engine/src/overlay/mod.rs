//! Immediate-mode UI overlay.
//!
//! `egui-winit` translates window events into egui input, `egui-wgpu` paints
//! the tessellated output on top of the surface after the scene passes.
//! The overlay never touches scene state; hiding it only changes what the UI
//! closure draws.

use winit::event::WindowEvent;
use winit::window::Window;

use crate::render::{RenderCtx, RenderTarget};

/// Tessellated output of one [`Overlay::run`], ready for [`Overlay::paint`].
pub struct OverlayFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    pixels_per_point: f32,
}

pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Overlay {
    pub fn new(window: &Window, device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let max_texture_side = device.limits().max_texture_dimension_2d as usize;

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(max_texture_side),
        );

        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        log::debug!("overlay initialized for {format:?}");
        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feeds a window event to egui. Returns `true` if egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Whether the pointer is over (or interacting with) overlay UI.
    pub fn wants_pointer(&self) -> bool {
        self.ctx.is_pointer_over_area() || self.ctx.wants_pointer_input()
    }

    /// Runs one UI frame and tessellates the result.
    pub fn run(&mut self, window: &Window, ui: impl FnMut(&egui::Context)) -> OverlayFrame {
        let input = self.state.take_egui_input(window);
        let output = self.ctx.run(input, ui);
        self.state
            .handle_platform_output(window, output.platform_output);

        OverlayFrame {
            primitives: self.ctx.tessellate(output.shapes, output.pixels_per_point),
            textures: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Paints `frame` over whatever `target` already holds.
    pub fn paint(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: OverlayFrame) {
        let OverlayFrame {
            primitives,
            textures,
            pixels_per_point,
        } = frame;

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [target.size.0, target.size.1],
            pixels_per_point,
        };

        for (id, delta) in &textures.set {
            self.renderer
                .update_texture(ctx.device, ctx.queue, *id, delta);
        }

        let callbacks = self.renderer.update_buffers(
            ctx.device,
            ctx.queue,
            target.encoder,
            &primitives,
            &screen,
        );
        if !callbacks.is_empty() {
            ctx.queue.submit(callbacks);
        }

        {
            let rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("overlay"),
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

            // egui-wgpu wants a pass that is not tied to the encoder borrow.
            let mut rpass = rpass.forget_lifetime();
            self.renderer.render(&mut rpass, &primitives, &screen);
        }

        for id in &textures.free {
            self.renderer.free_texture(id);
        }
    }
}
