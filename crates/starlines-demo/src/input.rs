use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::state::DemoEvent;

/// Shows and hides the debug panel.
pub const TOGGLE_UI_KEY: KeyCode = KeyCode::F9;

/// Maps raw window events to [`DemoEvent`]s.
///
/// winit reports button presses without a position, so the last cursor
/// position is tracked here.
#[derive(Debug, Default)]
pub struct InputMapper {
    cursor: Option<Vec2>,
}

impl InputMapper {
    pub fn map(&mut self, event: &WindowEvent) -> Option<DemoEvent> {
        match event {
            WindowEvent::CloseRequested => Some(DemoEvent::Quit),
            WindowEvent::Resized(size) => Some(DemoEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.left_pressed(),
            WindowEvent::KeyboardInput { event, .. } => map_key(event),
            _ => None,
        }
    }

    fn cursor_moved(&mut self, position: Vec2) {
        self.cursor = Some(position);
    }

    fn left_pressed(&self) -> Option<DemoEvent> {
        self.cursor.map(DemoEvent::Click)
    }
}

fn map_key(event: &KeyEvent) -> Option<DemoEvent> {
    let pressed = event.state == ElementState::Pressed && !event.repeat;
    (pressed && event.physical_key == PhysicalKey::Code(TOGGLE_UI_KEY)).then_some(DemoEvent::ToggleUi)
}
