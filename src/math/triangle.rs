use glam::Vec3;

#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32,       // Distance along ray
    pub u: f32,       // Barycentric coordinate u
    pub v: f32,       // Barycentric coordinate v
    pub normal: Vec3, // Geometric normal, counter-clockwise winding
}

/// Möller-Trumbore ray-triangle intersection
///
/// With `cull_back_faces` set, triangles seen from behind (clockwise from the
/// ray origin) are rejected.
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    cull_back_faces: bool,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    if cull_back_faces && a < EPSILON {
        return None;
    }
    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t < EPSILON {
        return None;
    }

    let normal = edge1.cross(edge2).normalize();

    Some(TriangleIntersection { t, u, v, normal })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_z() -> (Vec3, Vec3, Vec3) {
        (
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_front_face_hit() {
        let (a, b, c) = facing_z();
        let hit = moller_trumbore_intersect(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z, a, b, c, true)
            .expect("front face should be hit");
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_back_face_culled() {
        let (a, b, c) = facing_z();
        let origin = Vec3::new(0.0, 0.0, -3.0);
        assert!(moller_trumbore_intersect(origin, Vec3::Z, a, b, c, true).is_none());
        assert!(moller_trumbore_intersect(origin, Vec3::Z, a, b, c, false).is_some());
    }

    #[test]
    fn test_miss_outside_triangle() {
        let (a, b, c) = facing_z();
        let origin = Vec3::new(5.0, 5.0, 3.0);
        assert!(moller_trumbore_intersect(origin, Vec3::NEG_Z, a, b, c, false).is_none());
    }

    #[test]
    fn test_triangle_behind_origin() {
        let (a, b, c) = facing_z();
        let origin = Vec3::new(0.0, 0.0, 3.0);
        assert!(moller_trumbore_intersect(origin, Vec3::Z, a, b, c, false).is_none());
    }
}
