//! A red cube sliding side to side while it spins.

use std::f32::consts::PI;

use glam::Vec3;

use crate::app::{AppContext, SceneSetup};
use crate::camera::PerspectiveCamera;
use crate::scene::{Geometry, Material, Node, NodeId};
use crate::tween::{Axis, Property, Repeat, Tween, TweenTarget};

#[derive(Debug, Default)]
pub struct Cube {
    cube: Option<NodeId>,
}

impl Cube {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cube(&self) -> Option<NodeId> {
        self.cube
    }
}

impl SceneSetup for Cube {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn build(&mut self, ctx: &mut AppContext) {
        ctx.camera = PerspectiveCamera::new(75.0, ctx.aspect(), 0.1, 1000.0).at(Vec3::new(0.0, 0.0, 5.0));

        let geometry = ctx.scene.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        let material = ctx.scene.add_material(Material::basic(0xff0000));
        let cube = ctx
            .scene
            .add(Node::mesh(geometry, material).named("cube").at(Vec3::new(-2.0, 0.0, 0.0)));
        self.cube = Some(cube);

        for (property, value) in [
            (Property::Position(Axis::X), 2.0),
            (Property::Rotation(Axis::Y), 2.0 * PI),
        ] {
            ctx.timeline.add(
                Tween::to(TweenTarget::node(cube, property), value)
                    .duration(2.0)
                    .repeat(Repeat::Infinite)
                    .yoyo(true),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetServer;

    #[test]
    fn test_cube_swings_between_both_sides() {
        let mut ctx = AppContext::new(AssetServer::gltf("assets"), 800, 600);
        let mut setup = Cube::new();
        setup.build(&mut ctx);
        let cube = setup.cube().unwrap();
        assert_eq!(ctx.timeline.len(), 2);

        ctx.timeline.advance(&mut ctx.scene, 0.0);
        ctx.timeline.advance(&mut ctx.scene, 2.0);
        let transform = ctx.scene.node(cube).unwrap().transform;
        assert!((transform.position.x - 2.0).abs() < 1e-4);
        assert!((transform.rotation.y - 2.0 * PI).abs() < 1e-4);

        ctx.timeline.advance(&mut ctx.scene, 2.0);
        let transform = ctx.scene.node(cube).unwrap().transform;
        assert!((transform.position.x + 2.0).abs() < 1e-4);
        assert!(transform.rotation.y.abs() < 1e-4);
    }
}
