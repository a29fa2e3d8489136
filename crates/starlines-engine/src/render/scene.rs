use glam::Vec3;

use super::error::SetupError;
use super::passes::{CombinerPass, LinesPass, StarsPass};
use super::{RenderCtx, RenderTarget};
use crate::geometry::{Line, ViewState};

/// Surface clear color. Any pixel still showing it was never drawn.
pub const SENTINEL_CLEAR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Inputs to the starfield program.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StarfieldParams {
    pub background_color: Vec3,
    /// In `[0, 1]`.
    pub density: f32,
}

/// Everything one frame of the scene reads.
pub struct SceneFrame<'a> {
    pub view: &'a ViewState,
    pub starfield: StarfieldParams,
    pub lines: &'a [Line],
}

/// Owns the three render passes and records them in order.
///
/// The surface is expected to be cleared to [`SENTINEL_CLEAR`] before
/// [`SceneRenderer::render`]; the passes then record:
///
/// 1. stars onto the surface (standard alpha),
/// 2. lines into the off-screen target (max blend),
/// 3. the target onto the surface (combiner blend).
pub struct SceneRenderer {
    stars: StarsPass,
    lines: LinesPass,
    combiner: CombinerPass,
}

impl SceneRenderer {
    /// Compiles and links every program and allocates the off-screen target
    /// at `view`'s size.
    pub fn new(ctx: &RenderCtx<'_>, view: &ViewState) -> Result<Self, SetupError> {
        let stars = StarsPass::create(ctx)?;
        let lines = LinesPass::create(ctx, view.size())?;
        let combiner = CombinerPass::create(ctx, lines.target())?;

        log::info!("scene renderer initialized");
        Ok(Self {
            stars,
            lines,
            combiner,
        })
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &SceneFrame<'_>,
    ) {
        self.stars.render(ctx, target, frame.view, frame.starfield);
        self.lines
            .render(ctx, target.encoder, frame.view, frame.lines);
        self.combiner
            .render(ctx, target, frame.view, self.lines.target());
    }
}
