use glam::{Vec2, Vec3};

use starlines_engine::core::AppControl;
use starlines_engine::geometry::{Line, ViewState};
use starlines_engine::render::StarfieldParams;

/// Parameters the debug panel edits. The renderer only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub background_color: Vec3,
    /// In `[0, 1]`.
    pub star_density: f32,
    /// Applied to lines drawn from now on.
    pub line_color: Vec3,
    pub line_start_width: f32,
    pub line_end_width: f32,
    pub show_fps: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            background_color: Vec3::ZERO,
            star_density: 0.1,
            line_color: Vec3::ONE,
            line_start_width: 50.0,
            line_end_width: 20.0,
            show_fps: true,
        }
    }
}

impl RenderParams {
    pub fn starfield(&self) -> StarfieldParams {
        StarfieldParams {
            background_color: self.background_color,
            density: self.star_density.clamp(0.0, 1.0),
        }
    }
}

/// The four inputs the demo reacts to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DemoEvent {
    Quit,
    /// Left button pressed at a window position, in physical pixels.
    Click(Vec2),
    Resize { width: u32, height: u32 },
    ToggleUi,
}

/// Everything the demo owns between frames.
pub struct DemoState {
    pub params: RenderParams,
    lines: Vec<Line>,
    pending_start: Option<Vec2>,
    ui_visible: bool,
    view: ViewState,
}

impl DemoState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            params: RenderParams::default(),
            lines: Vec::new(),
            pending_start: None,
            ui_visible: true,
            view: ViewState::new(width, height),
        }
    }

    pub fn handle(&mut self, event: DemoEvent) -> AppControl {
        match event {
            DemoEvent::Quit => {
                log::info!("quit requested");
                return AppControl::Exit;
            }
            DemoEvent::Click(at) => self.click(at),
            DemoEvent::Resize { width, height } => {
                if self.view.resize(width, height) {
                    log::info!("view resized to {width}x{height}");
                }
            }
            DemoEvent::ToggleUi => {
                self.ui_visible = !self.ui_visible;
                log::debug!("debug ui visible: {}", self.ui_visible);
            }
        }
        AppControl::Continue
    }

    /// First click of a pair arms the gesture, the second one completes a line
    /// with the current line parameters.
    fn click(&mut self, at: Vec2) {
        let Some(start) = self.pending_start.take() else {
            self.pending_start = Some(at);
            return;
        };

        let params = &self.params;
        match Line::new(
            start,
            at,
            params.line_color,
            params.line_start_width,
            params.line_end_width,
        ) {
            Some(line) => {
                log::debug!("line {start} -> {at} ({} total)", self.lines.len() + 1);
                self.lines.push(line);
            }
            None => log::debug!("dropped zero-length line at {at}"),
        }
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[cfg(test)]
    pub fn pending_start(&self) -> Option<Vec2> {
        self.pending_start
    }

    #[inline]
    pub fn ui_visible(&self) -> bool {
        self.ui_visible
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }
}
