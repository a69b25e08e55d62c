use glam::Vec3;

use super::{MaterialId, NodeId, Scene, Side};
use crate::math::{intersect_aabb, moller_trumbore_intersect, Ray};

/// Nearest surface hit by a picking ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub node: NodeId,
    pub material: MaterialId,
    pub distance: f32,
    pub point: Vec3,
}

impl Scene {
    /// Closest visible mesh along the ray, in world space.
    ///
    /// Front-sided materials only report hits on faces turned toward the
    /// ray, back-sided ones only on faces turned away, double-sided on both.
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        for draw in self.collect_draws() {
            let Some(geometry) = self.geometry(draw.mesh.geometry) else {
                continue;
            };
            let Some(material) = self.material(draw.mesh.material) else {
                continue;
            };

            let bounds = geometry.bounds().transformed(&draw.world);
            let t_box = intersect_aabb(ray.origin, ray.direction, bounds.min, bounds.max);
            if t_box < 0.0 {
                continue;
            }
            // From inside the box the slab test reports the exit distance
            let t_enter = if bounds.contains(ray.origin) { 0.0 } else { t_box };
            if best.is_some_and(|b| t_enter >= b.distance) {
                continue;
            }

            for [a, b, c] in geometry.triangles() {
                let (v0, v1, v2) = (
                    draw.world.transform_point3(a),
                    draw.world.transform_point3(b),
                    draw.world.transform_point3(c),
                );
                let hit = match material.side {
                    Side::Front => moller_trumbore_intersect(ray.origin, ray.direction, v0, v1, v2, true),
                    Side::Back => moller_trumbore_intersect(ray.origin, ray.direction, v0, v2, v1, true),
                    Side::Double => moller_trumbore_intersect(ray.origin, ray.direction, v0, v1, v2, false),
                };
                let Some(hit) = hit else {
                    continue;
                };
                if hit.t <= 0.0 || best.is_some_and(|b| hit.t >= b.distance) {
                    continue;
                }
                best = Some(RayHit {
                    node: draw.node,
                    material: draw.mesh.material,
                    distance: hit.t,
                    point: ray.at(hit.t),
                });
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Material, Node};

    fn scene_with_two_walls() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let plane = scene.add_geometry(Geometry::plane(2.0, 2.0));
        let mat = scene.add_material(Material::standard(0xffffff).side(Side::Double));
        let near = scene.add(Node::mesh(plane, mat).at(Vec3::new(0.0, 0.0, 1.0)));
        let far = scene.add(Node::mesh(plane, mat).at(Vec3::new(0.0, 0.0, -1.0)));
        (scene, near, far)
    }

    #[test]
    fn test_raycast_returns_nearest() {
        let (scene, near, _) = scene_with_two_walls();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = scene.raycast(&ray).unwrap();
        assert_eq!(hit.node, near);
        assert!((hit.distance - 4.0).abs() < 1e-4);
        assert!((hit.point.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_skips_invisible() {
        let (mut scene, near, far) = scene_with_two_walls();
        scene.node_mut(near).unwrap().visible = false;
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(scene.raycast(&ray).unwrap().node, far);
    }

    #[test]
    fn test_front_side_culls_back_faces() {
        let mut scene = Scene::new();
        let plane = scene.add_geometry(Geometry::plane(2.0, 2.0));
        let mat = scene.add_material(Material::standard(0xffffff));
        scene.add(Node::mesh(plane, mat));

        let from_front = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
        let from_back = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        assert!(scene.raycast(&from_front).is_some());
        assert!(scene.raycast(&from_back).is_none());

        scene.material_mut(mat).unwrap().side = Side::Back;
        assert!(scene.raycast(&from_front).is_none());
        assert!(scene.raycast(&from_back).is_some());
    }

    #[test]
    fn test_raycast_follows_rotation() {
        let mut scene = Scene::new();
        let plane = scene.add_geometry(Geometry::plane(10.0, 10.0));
        let mat = scene.add_material(Material::standard(0xffffff));
        // Floor: plane rotated to face +Y
        let floor = scene.add(
            Node::mesh(plane, mat).rotated(Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0)),
        );
        let ray = Ray::new(Vec3::new(1.0, 4.0, 1.0), Vec3::NEG_Y);
        let hit = scene.raycast(&ray).unwrap();
        assert_eq!(hit.node, floor);
        assert!(hit.point.y.abs() < 1e-4);
    }

    #[test]
    fn test_origin_inside_later_bounds_still_finds_nearer_hit() {
        let mut scene = Scene::new();
        let mat = scene.add_material(Material::standard(0xffffff).side(Side::Double));
        let plane = scene.add_geometry(Geometry::plane(2.0, 2.0));
        let panel = scene.add(
            Node::mesh(plane, mat)
                .at(Vec3::new(-1.0, 4.0, 0.0))
                .rotated(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0)),
        );
        let ball = scene.add_geometry(Geometry::sphere(5.0, 32, 32));
        let sphere = scene.add(Node::mesh(ball, mat));

        // starts inside the sphere's bounds but outside the sphere itself
        let ray = Ray::new(Vec3::new(4.0, 4.0, 0.3), Vec3::NEG_X);
        let hit = scene.raycast(&ray).unwrap();
        assert_eq!(hit.node, sphere);
        assert_ne!(hit.node, panel);
        assert!(hit.distance < 1.5, "got {}", hit.distance);
    }

    #[test]
    fn test_miss_returns_none() {
        let (scene, _, _) = scene_with_two_walls();
        let ray = Ray::new(Vec3::new(10.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(scene.raycast(&ray).is_none());
    }
}
