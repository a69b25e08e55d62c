use glam::Vec3;

/// Spherical coordinates with +Y up: `phi` is the polar angle from +Y,
/// `theta` the azimuth around Y measured from +Z toward +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub const fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_vec3(&self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    pub fn clamp_phi(&mut self, min: f32, max: f32) {
        self.phi = self.phi.clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spherical_axes() {
        let up = Spherical::from_vec3(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(up.radius, 2.0);
        assert!(up.phi.abs() < 1e-6);

        let front = Spherical::from_vec3(Vec3::new(0.0, 0.0, 3.0));
        assert!((front.phi - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(front.theta.abs() < 1e-6);
    }

    #[test]
    fn test_spherical_back_to_cartesian() {
        let v = Vec3::new(0.0, 3.0, 10.0);
        let back = Spherical::from_vec3(v).to_vec3();
        assert!((back - v).length() < 1e-4);
    }

    #[test]
    fn test_spherical_zero_vector() {
        let s = Spherical::from_vec3(Vec3::ZERO);
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }
}
