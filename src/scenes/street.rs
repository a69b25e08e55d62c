//! Grass and road, three blocky buildings and a ball rolling down the street.

use std::f32::consts::PI;

use glam::Vec3;

use crate::app::{AppContext, SceneSetup};
use crate::camera::PerspectiveCamera;
use crate::controls::{CameraRig, OrbitControls};
use crate::scene::{Geometry, Material, Node, NodeId};
use crate::tween::{Axis, EaseDirection, Easing, Property, Repeat, Tween, TweenTarget};

use super::common::{assemble_boxes, BoxDescriptor, MaterialSharing};

const SPHERE_START_Z: f32 = -18.0;
const SPHERE_END_Z: f32 = 18.0;

#[derive(Debug, Default)]
pub struct Street {
    sphere: Option<NodeId>,
}

impl Street {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sphere(&self) -> Option<NodeId> {
        self.sphere
    }
}

impl SceneSetup for Street {
    fn name(&self) -> &'static str {
        "street"
    }

    fn build(&mut self, ctx: &mut AppContext) {
        ctx.camera = PerspectiveCamera::new(75.0, ctx.aspect(), 0.1, 1000.0).at(Vec3::new(0.0, 15.0, 30.0));
        ctx.rig = CameraRig::Orbit(OrbitControls::new(Vec3::ZERO).with_damping());

        let scene = &mut ctx.scene;

        let ground = scene.add(Node::group().named("ground"));
        let grass_geometry = scene.add_geometry(Geometry::plane(40.0, 40.0));
        let grass_material = scene.add_material(Material::basic(0x00ff00));
        let road_geometry = scene.add_geometry(Geometry::plane(4.0, 40.0));
        let road_material = scene.add_material(Material::basic(0x808080));
        scene.add_child(
            ground,
            Node::mesh(grass_geometry, grass_material)
                .named("grass")
                .rotated(Vec3::new(-PI / 2.0, 0.0, 0.0)),
        );
        scene.add_child(
            ground,
            Node::mesh(road_geometry, road_material)
                .named("road")
                .at(Vec3::new(0.0, 0.01, 0.0))
                .rotated(Vec3::new(-PI / 2.0, 0.0, 0.0)),
        );

        let root = scene.root();
        let white = scene.add_material(Material::basic(0xffffff));
        let upright = Vec3::new(PI / 2.0, 0.0, 0.0);
        assemble_boxes(
            scene,
            root,
            &[
                BoxDescriptor::new(Vec3::new(-8.0, 1.4, -7.0), Vec3::new(4.5, 8.0, 3.0)).rotated(upright),
                BoxDescriptor::new(Vec3::new(-8.0, 1.4, 10.0), Vec3::new(4.5, 8.0, 3.0)).rotated(upright),
            ],
            white,
            MaterialSharing::Shared,
        );
        let tower = scene.add_material(Material::basic(0xadd8e6));
        assemble_boxes(
            scene,
            root,
            &[BoxDescriptor::new(Vec3::new(12.0, 2.0, 7.0), Vec3::new(4.0, 20.0, 4.0))
                .rotated(Vec3::new(PI / 2.0, 0.0, 0.4))],
            tower,
            MaterialSharing::Shared,
        );

        let sphere_geometry = scene.add_geometry(Geometry::sphere(0.7, 32, 32));
        let sphere_material = scene.add_material(Material::basic(0x1e90ff));
        let sphere = scene.add(
            Node::mesh(sphere_geometry, sphere_material)
                .named("sphere")
                .at(Vec3::new(0.0, 0.7, SPHERE_START_Z)),
        );
        self.sphere = Some(sphere);

        ctx.timeline.add(
            Tween::to(TweenTarget::node(sphere, Property::Position(Axis::Z)), SPHERE_END_Z)
                .duration(3.0)
                .ease(Easing::Power(1, EaseDirection::InOut))
                .repeat(Repeat::Infinite)
                .yoyo(true),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetServer;

    #[test]
    fn test_sphere_rolls_the_length_of_the_road() {
        let mut ctx = AppContext::new(AssetServer::gltf("assets"), 800, 600);
        let mut street = Street::new();
        street.build(&mut ctx);
        let sphere = street.sphere().unwrap();

        ctx.timeline.advance(&mut ctx.scene, 0.0);
        ctx.timeline.advance(&mut ctx.scene, 3.0);
        let z = ctx.scene.node(sphere).unwrap().transform.position.z;
        assert!((z - SPHERE_END_Z).abs() < 1e-4);

        ctx.timeline.advance(&mut ctx.scene, 3.0);
        let z = ctx.scene.node(sphere).unwrap().transform.position.z;
        assert!((z - SPHERE_START_Z).abs() < 1e-4);
    }

    #[test]
    fn test_ground_group_holds_grass_and_road() {
        let mut ctx = AppContext::new(AssetServer::gltf("assets"), 800, 600);
        Street::new().build(&mut ctx);
        let ground = ctx.scene.find_by_name("ground").unwrap();
        assert_eq!(ctx.scene.children(ground).len(), 2);
        // ground group, 3 buildings, sphere under the root
        assert_eq!(ctx.scene.children(ctx.scene.root()).len(), 5);
    }
}
