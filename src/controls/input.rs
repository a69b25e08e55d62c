use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Window input normalized away from the windowing backend.
/// Positions are in physical pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp { button: PointerButton, position: Vec2 },
    /// Browser convention: positive `delta_y` scrolls the page down
    Wheel { delta_y: f32 },
    /// Primary button released; emitted after the matching `PointerUp`
    Click { position: Vec2 },
    Resize { width: u32, height: u32 },
}
