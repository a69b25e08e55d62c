//! Four primitives on a plane under a directional and a spot light, in fog.

use std::f32::consts::PI;

use glam::Vec3;

use crate::app::{AppContext, ResizePolicy, SceneSetup};
use crate::camera::PerspectiveCamera;
use crate::controls::{CameraRig, OrbitControls};
use crate::scene::{Fog, Geometry, Light, Material, Node, ShadowConfig, ShadowMapKind};

pub const SURFACE_SIZE: (u32, u32) = (800, 600);
const FOG_COLOR: u32 = 0x262837;

#[derive(Debug, Default)]
pub struct Shadows;

impl Shadows {
    pub fn new() -> Self {
        Self
    }
}

impl SceneSetup for Shadows {
    fn name(&self) -> &'static str {
        "shadows"
    }

    fn preferred_size(&self) -> Option<(u32, u32)> {
        Some(SURFACE_SIZE)
    }

    fn build(&mut self, ctx: &mut AppContext) {
        let (width, height) = SURFACE_SIZE;
        ctx.resize_policy = ResizePolicy::Ignore;
        ctx.camera = PerspectiveCamera::new(75.0, width as f32 / height as f32, 0.1, 2000.0)
            .at(Vec3::new(2.0, 2.0, 4.0));
        ctx.rig = CameraRig::Orbit(OrbitControls::new(Vec3::ZERO).with_damping());

        let scene = &mut ctx.scene;
        scene.shadow_map = Some(ShadowMapKind::PcfSoft);
        scene.fog = Some(Fog::Exp2 {
            color: FOG_COLOR.into(),
            density: 0.2,
        });

        let material = scene.add_material(Material::standard(0xffffff).roughness(0.7));

        let sphere = scene.add_geometry(Geometry::sphere(0.6, 32, 32));
        scene.add(
            Node::mesh(sphere, material)
                .named("sphere")
                .at(Vec3::new(0.0, 0.0, 0.4))
                .shadows(true, false),
        );
        let plane = scene.add_geometry(Geometry::plane(5.0, 5.0));
        scene.add(
            Node::mesh(plane, material)
                .named("plane")
                .at(Vec3::new(0.0, -0.5, 0.0))
                .rotated(Vec3::new(-PI / 2.0, 0.0, 0.0))
                .shadows(false, true),
        );
        let cube = scene.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        scene.add(
            Node::mesh(cube, material)
                .named("cube")
                .at(Vec3::new(1.5, 0.0, 1.2))
                .shadows(true, false),
        );
        let knot = scene.add_geometry(Geometry::torus_knot(0.6, 0.1, 100, 16));
        scene.add(
            Node::mesh(knot, material)
                .named("torus knot")
                .at(Vec3::new(0.0, 0.5, -1.0))
                .shadows(true, false),
        );

        scene.add(Node::light(Light::ambient(0xffffff, 1.0)).named("ambient"));
        scene.add(
            Node::light(Light::directional(0xffffff, 1.5).with_shadow(ShadowConfig {
                map_width: 2048,
                map_height: 2048,
                radius: 10.0,
            }))
            .named("sun")
            .at(Vec3::new(2.0, 4.0, 3.0)),
        );
        scene.add(
            Node::light(Light::spot(0xffffff, 3.0, 10.0, PI * 0.3).casts_shadow())
                .named("spot")
                .at(Vec3::new(0.0, 2.0, 2.0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetServer;

    #[test]
    fn test_primitives_share_one_material() {
        let mut ctx = AppContext::new(AssetServer::gltf("assets"), 800, 600);
        Shadows::new().build(&mut ctx);
        assert_eq!(ctx.scene.material_count(), 1);
        assert_eq!(ctx.scene.mesh_count(), 4);
        assert_eq!(ctx.resize_policy, ResizePolicy::Ignore);
    }

    #[test]
    fn test_shadow_flags() {
        let mut ctx = AppContext::new(AssetServer::gltf("assets"), 800, 600);
        Shadows::new().build(&mut ctx);
        let plane = ctx.scene.find_by_name("plane").unwrap();
        let node = ctx.scene.node(plane).unwrap();
        assert!(node.receive_shadow && !node.cast_shadow);
        let sun = ctx.scene.find_by_name("sun").unwrap();
        let light = ctx.scene.node(sun).unwrap().as_light().unwrap();
        assert!(light.cast_shadow);
        assert_eq!(light.shadow.map_width, 2048);
        assert_eq!(ctx.scene.shadow_map, Some(ShadowMapKind::PcfSoft));
    }
}
