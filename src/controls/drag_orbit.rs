use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::InputEvent;
use crate::camera::PerspectiveCamera;
use crate::math::Spherical;

/// Radians of orbit per pixel dragged
pub const ROTATE_SPEED: f32 = 0.005;
pub const MIN_POLAR: f32 = 0.1;
pub const MAX_POLAR: f32 = PI - 0.1;
/// World units moved per wheel notch
pub const ZOOM_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { last: Vec2 },
}

/// Hand-rolled orbit: dragging swings the camera around the world origin on
/// a sphere, the wheel walks it along its view direction, and both re-aim
/// at a fixed focus point.
#[derive(Debug, Clone)]
pub struct DragOrbit {
    state: DragState,
    pub focus: Vec3,
    pub rotate_speed: f32,
    pub zoom_step: f32,
}

impl DragOrbit {
    pub fn new(focus: Vec3) -> Self {
        Self {
            state: DragState::Idle,
            focus,
            rotate_speed: ROTATE_SPEED,
            zoom_step: ZOOM_STEP,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Apply one input event; returns true when the camera moved
    pub fn handle(&mut self, event: &InputEvent, camera: &mut PerspectiveCamera) -> bool {
        match (*event, self.state) {
            (InputEvent::PointerDown { position, .. }, _) => {
                self.state = DragState::Dragging { last: position };
                false
            }
            (InputEvent::PointerMove { position }, DragState::Dragging { last }) => {
                self.orbit(camera, position - last);
                self.state = DragState::Dragging { last: position };
                true
            }
            (InputEvent::PointerUp { .. }, _) => {
                self.state = DragState::Idle;
                false
            }
            (InputEvent::Wheel { delta_y }, _) => {
                self.zoom(camera, delta_y);
                true
            }
            _ => false,
        }
    }

    fn orbit(&self, camera: &mut PerspectiveCamera, delta: Vec2) {
        let mut spherical = Spherical::from_vec3(camera.position);
        spherical.theta -= delta.x * self.rotate_speed;
        spherical.phi -= delta.y * self.rotate_speed;
        spherical.clamp_phi(MIN_POLAR, MAX_POLAR);
        camera.position = spherical.to_vec3();
        camera.look_at(self.focus);
    }

    fn zoom(&self, camera: &mut PerspectiveCamera, delta_y: f32) {
        let step = if delta_y > 0.0 { -self.zoom_step } else { self.zoom_step };
        camera.position += camera.forward() * step;
        camera.look_at(self.focus);
    }
}
