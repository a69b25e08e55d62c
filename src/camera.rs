use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::math::Ray;

/// Perspective camera looking down its local -Z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub rotation: Quat,
    pub up: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            up: Vec3::Y,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.look_at(target);
        self
    }

    /// Orient so that -Z points at `target`, keeping `up` as close to
    /// vertical as possible. A target at the camera position is ignored.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(back) = (self.position - target).try_normalize() else {
            return;
        };
        let up = if back.cross(self.up).length_squared() < 1e-8 {
            // Looking straight along the up axis
            if self.up.z.abs() < 0.9 { Vec3::Z } else { Vec3::X }
        } else {
            self.up
        };
        let right = up.cross(back).normalize();
        let true_up = back.cross(right);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, true_up, back)).normalize();
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn local_up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Picking ray through a point in normalized device coordinates
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(ndc.extend(0.5));
        Ray::new(self.position, through - self.position)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0)
    }
}

/// Window pixel coordinates to NDC, y up
pub fn screen_to_ndc(position: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(
        position.x / size.x.max(1.0) * 2.0 - 1.0,
        -(position.y / size.y.max(1.0)) * 2.0 + 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = PerspectiveCamera::default();
        assert!(approx(camera.forward(), Vec3::NEG_Z));
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let camera = PerspectiveCamera::default()
            .at(Vec3::new(0.0, 5.0, 10.0))
            .looking_at(Vec3::new(0.0, 1.0, 0.0));
        let expected = (Vec3::new(0.0, 1.0, 0.0) - Vec3::new(0.0, 5.0, 10.0)).normalize();
        assert!(approx(camera.forward(), expected));
        assert!(camera.right().y.abs() < 1e-5);
    }

    #[test]
    fn test_look_at_straight_down() {
        let camera = PerspectiveCamera::default()
            .at(Vec3::new(0.0, 10.0, 0.0))
            .looking_at(Vec3::ZERO);
        assert!(approx(camera.forward(), Vec3::NEG_Y));
        assert!(camera.rotation.is_finite());
    }

    #[test]
    fn test_center_ray_matches_forward() {
        let camera = PerspectiveCamera::new(60.0, 16.0 / 9.0, 0.1, 100.0)
            .at(Vec3::new(3.0, 2.0, 5.0))
            .looking_at(Vec3::ZERO);
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!(approx(ray.origin, camera.position));
        assert!(approx(ray.direction, camera.forward()));
    }

    #[test]
    fn test_ray_edge_follows_fov() {
        let camera = PerspectiveCamera::new(90.0, 1.0, 0.1, 100.0);
        let ray = camera.ray_from_ndc(Vec2::new(0.0, 1.0));
        // Half of a 90 degree fov: 45 degrees above forward
        assert!(approx(ray.direction, Vec3::new(0.0, 1.0, -1.0).normalize()));
    }

    #[test]
    fn test_screen_to_ndc() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(screen_to_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(screen_to_ndc(Vec2::new(0.0, 0.0), size), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(Vec2::new(800.0, 600.0), size), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_set_aspect_ignores_zero() {
        let mut camera = PerspectiveCamera::default();
        camera.set_aspect(800, 600);
        camera.set_aspect(0, 600);
        assert!((camera.aspect - 4.0 / 3.0).abs() < 1e-6);
    }
}
