use anyhow::Context;
use winit::event::WindowEvent;

use starlines_engine::core::{App, AppControl, FrameCtx, InitCtx, WindowCtx};
use starlines_engine::overlay::Overlay;
use starlines_engine::render::{SceneFrame, SceneRenderer, SENTINEL_CLEAR};
use starlines_engine::time::FpsCounter;

use crate::input::InputMapper;
use crate::panel::DebugPanel;
use crate::state::{DemoEvent, DemoState};

/// GPU-side objects, created once the window exists.
struct Graphics {
    scene: SceneRenderer,
    overlay: Overlay,
}

pub struct StarlinesApp {
    state: DemoState,
    input: InputMapper,
    panel: DebugPanel,
    fps: FpsCounter,
    gfx: Option<Graphics>,
}

impl StarlinesApp {
    pub fn new() -> Self {
        Self {
            state: DemoState::new(1, 1),
            input: InputMapper::default(),
            panel: DebugPanel::default(),
            fps: FpsCounter::new(),
            gfx: None,
        }
    }
}

impl Default for StarlinesApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for StarlinesApp {
    fn on_init(&mut self, ctx: &mut InitCtx<'_>) -> anyhow::Result<()> {
        self.state.handle(DemoEvent::Resize {
            width: ctx.size.width,
            height: ctx.size.height,
        });

        let scene = SceneRenderer::new(&ctx.render, self.state.view())
            .context("failed to build scene pipelines")?;
        let overlay = Overlay::new(ctx.window.window, ctx.render.device, ctx.render.surface_format);

        self.gfx = Some(Graphics { scene, overlay });
        Ok(())
    }

    fn on_window_event(&mut self, window: &WindowCtx<'_>, event: &WindowEvent) -> AppControl {
        let Some(gfx) = self.gfx.as_mut() else {
            return AppControl::Continue;
        };

        let consumed = gfx.overlay.on_window_event(window.window, event);
        let over_ui = self.state.ui_visible() && gfx.overlay.wants_pointer();

        match self.input.map(event) {
            Some(DemoEvent::Click(_)) if consumed || over_ui => AppControl::Continue,
            Some(event) => self.state.handle(event),
            None => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(gfx) = self.gfx.as_mut() else {
            return AppControl::Continue;
        };

        self.fps.tick(ctx.time.dt);

        let visible = self.state.ui_visible();
        let (panel, params, fps) = (&mut self.panel, &mut self.state.params, &self.fps);
        let ui = gfx.overlay.run(ctx.window.window, |ectx| {
            panel.show(ectx, params, fps.label(), visible)
        });

        let state = &self.state;
        let Graphics { scene, overlay } = gfx;
        ctx.render(SENTINEL_CLEAR, |rctx, target| {
            let frame = SceneFrame {
                view: state.view(),
                starfield: state.params.starfield(),
                lines: state.lines(),
            };
            scene.render(rctx, target, &frame);
            overlay.paint(rctx, target, ui);
        })
    }
}
