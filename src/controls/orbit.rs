use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::{InputEvent, PointerButton};
use crate::camera::PerspectiveCamera;
use crate::math::Spherical;

pub const DAMPING_FACTOR: f32 = 0.05;
const POLAR_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    None,
    Rotate { last: Vec2 },
    Pan { last: Vec2 },
}

/// Orbit camera around a target: left drag rotates, right drag pans,
/// the wheel dollies. With damping enabled motion decays over several
/// updates instead of stopping dead.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Viewport height in pixels, used to scale drag distances
    pub viewport_height: f32,

    gesture: Gesture,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: DAMPING_FACTOR,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            viewport_height: 600.0,
            gesture: Gesture::None,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn with_damping(mut self) -> Self {
        self.enable_damping = true;
        self
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    /// Accumulate an input event; the camera moves on the next [`update`](Self::update)
    pub fn handle(&mut self, event: &InputEvent, camera: &PerspectiveCamera) {
        match *event {
            InputEvent::PointerDown { button, position } => {
                self.gesture = match button {
                    PointerButton::Primary if self.enable_rotate => Gesture::Rotate { last: position },
                    PointerButton::Secondary if self.enable_pan => Gesture::Pan { last: position },
                    _ => Gesture::None,
                };
            }
            InputEvent::PointerMove { position } => match self.gesture {
                Gesture::Rotate { last } => {
                    let delta = (position - last) * self.rotate_speed;
                    let h = self.viewport_height.max(1.0);
                    self.delta_theta -= TAU * delta.x / h;
                    self.delta_phi -= TAU * delta.y / h;
                    self.gesture = Gesture::Rotate { last: position };
                }
                Gesture::Pan { last } => {
                    self.pan(camera, (position - last) * self.pan_speed);
                    self.gesture = Gesture::Pan { last: position };
                }
                Gesture::None => {}
            },
            InputEvent::PointerUp { .. } => self.gesture = Gesture::None,
            InputEvent::Wheel { delta_y } if self.enable_zoom => {
                if delta_y < 0.0 {
                    self.scale *= self.zoom_scale();
                } else if delta_y > 0.0 {
                    self.scale /= self.zoom_scale();
                }
            }
            InputEvent::Resize { height, .. } => self.viewport_height = height as f32,
            _ => {}
        }
    }

    fn pan(&mut self, camera: &PerspectiveCamera, delta: Vec2) {
        let distance = (camera.position - self.target).length() * (camera.fov.to_radians() / 2.0).tan();
        let h = self.viewport_height.max(1.0);
        let left = 2.0 * delta.x * distance / h;
        let up = 2.0 * delta.y * distance / h;
        self.pan_offset += -camera.right() * left + camera.local_up() * up;
    }

    /// Move the camera by the accumulated deltas. Returns true if it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_vec3(offset);

        let step = if self.enable_damping { self.damping_factor } else { 1.0 };
        spherical.theta += self.delta_theta * step;
        spherical.phi += self.delta_phi * step;
        spherical.clamp_phi(self.min_polar_angle, self.max_polar_angle);
        spherical.clamp_phi(POLAR_EPSILON, PI - POLAR_EPSILON);

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * step;

        let before = camera.position;
        camera.position = self.target + spherical.to_vec3();
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        before.distance_squared(camera.position) > 1e-12
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::default().at(Vec3::new(0.0, 0.0, 10.0))
    }

    fn drag(controls: &mut OrbitControls, cam: &PerspectiveCamera, button: PointerButton, dx: f32, dy: f32) {
        controls.handle(&InputEvent::PointerDown { button, position: Vec2::ZERO }, cam);
        controls.handle(&InputEvent::PointerMove { position: Vec2::new(dx, dy) }, cam);
        controls.handle(&InputEvent::PointerUp { button, position: Vec2::new(dx, dy) }, cam);
    }

    #[test]
    fn test_update_aims_at_target() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let mut cam = PerspectiveCamera::default().at(Vec3::new(2.0, 2.0, 4.0));
        controls.update(&mut cam);
        let to_target = (controls.target - cam.position).normalize();
        assert!((cam.forward() - to_target).length() < 1e-4);
    }

    #[test]
    fn test_rotate_keeps_distance() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let mut cam = camera();
        drag(&mut controls, &cam, PointerButton::Primary, 120.0, 40.0);
        assert!(controls.update(&mut cam));
        assert!((cam.position.length() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_damping_spreads_motion() {
        let mut damped = OrbitControls::new(Vec3::ZERO).with_damping();
        let mut cam = camera();
        drag(&mut damped, &cam, PointerButton::Primary, 100.0, 0.0);
        damped.update(&mut cam);
        let first = cam.position;
        // Still coasting after the gesture ended
        assert!(damped.update(&mut cam));
        assert_ne!(first, cam.position);
    }

    #[test]
    fn test_wheel_dollies() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let mut cam = camera();
        controls.handle(&InputEvent::Wheel { delta_y: -1.0 }, &cam);
        controls.update(&mut cam);
        assert!((cam.position.length() - 9.5).abs() < 1e-3);
    }

    #[test]
    fn test_disabled_zoom_ignores_wheel() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.enable_zoom = false;
        let mut cam = camera();
        controls.handle(&InputEvent::Wheel { delta_y: -1.0 }, &cam);
        controls.update(&mut cam);
        assert!((cam.position.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        let mut cam = camera();
        controls.update(&mut cam);
        drag(&mut controls, &cam, PointerButton::Secondary, 60.0, 0.0);
        controls.update(&mut cam);
        // Dragging right drags the scene right, so the target moves left
        assert!(controls.target.x < 0.0);
        assert!((cam.position - controls.target - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-3);
    }

    #[test]
    fn test_polar_angle_clamped() {
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.max_polar_angle = PI / 2.0;
        let mut cam = camera();
        drag(&mut controls, &cam, PointerButton::Primary, 0.0, -5000.0);
        controls.update(&mut cam);
        assert!(cam.position.y >= -1e-4);
    }
}
