use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::controls::{InputEvent, PointerButton};

/// Pixels of browser-style wheel delta per scroll line
const LINE_HEIGHT: f32 = 100.0;

/// Turns winit window events into [`InputEvent`]s, tracking the cursor so
/// button events carry a position.
#[derive(Debug, Clone, Default)]
pub struct WinitInput {
    cursor: Vec2,
    pressed: HashSet<PointerButton>,
}

impl WinitInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Vec<InputEvent> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => match pointer_button(*button) {
                Some(button) => self.button(button, *state == ElementState::Pressed),
                None => Vec::new(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                vec![self.cursor_moved(Vec2::new(position.x as f32, position.y as f32))]
            }
            WindowEvent::MouseWheel { delta, .. } => vec![InputEvent::Wheel {
                delta_y: wheel_delta_y(*delta),
            }],
            WindowEvent::Resized(size) => vec![InputEvent::Resize {
                width: size.width,
                height: size.height,
            }],
            _ => Vec::new(),
        }
    }

    fn button(&mut self, button: PointerButton, pressed: bool) -> Vec<InputEvent> {
        let position = self.cursor;
        if pressed {
            self.pressed.insert(button);
            return vec![InputEvent::PointerDown { button, position }];
        }
        if !self.pressed.remove(&button) {
            // Release without a press we saw, e.g. pressed outside the window
            return vec![InputEvent::PointerUp { button, position }];
        }
        let mut events = vec![InputEvent::PointerUp { button, position }];
        if button == PointerButton::Primary {
            events.push(InputEvent::Click { position });
        }
        events
    }

    fn cursor_moved(&mut self, position: Vec2) -> InputEvent {
        self.cursor = position;
        InputEvent::PointerMove { position }
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    pub fn is_down(&self, button: PointerButton) -> bool {
        self.pressed.contains(&button)
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Browser sign convention: scrolling down is positive
fn wheel_delta_y(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    }
}
