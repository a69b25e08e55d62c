//! Pointer-driven camera rigs and click picking.

mod drag_orbit;
mod input;
mod orbit;
mod picking;

pub use drag_orbit::{DragOrbit, DragState, MAX_POLAR, MIN_POLAR, ROTATE_SPEED, ZOOM_STEP};
pub use input::{InputEvent, PointerButton};
pub use orbit::{OrbitControls, DAMPING_FACTOR};
pub use picking::ClickToggle;

use crate::camera::PerspectiveCamera;

/// Whatever steers the camera for a scene
#[derive(Debug, Clone, Default)]
pub enum CameraRig {
    #[default]
    Fixed,
    Orbit(OrbitControls),
    DragOrbit(DragOrbit),
}

impl CameraRig {
    pub fn handle(&mut self, event: &InputEvent, camera: &mut PerspectiveCamera) {
        match self {
            CameraRig::Fixed => {}
            CameraRig::Orbit(controls) => controls.handle(event, camera),
            CameraRig::DragOrbit(orbit) => {
                orbit.handle(event, camera);
            }
        }
    }

    /// Per-frame step; only orbit controls integrate over time
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if let CameraRig::Orbit(controls) = self {
            controls.update(camera);
        }
    }
}
