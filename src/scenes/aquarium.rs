//! A glass-walled cage of water with a spinning whale. Dragging orbits the
//! camera, the wheel zooms and clicking a wall or the whale makes it see-through.

use std::f32::consts::PI;

use glam::Vec3;

use crate::app::{AppContext, SceneSetup};
use crate::assets::{LoadOutcome, LoadRequest};
use crate::camera::PerspectiveCamera;
use crate::controls::{CameraRig, ClickToggle, DragOrbit};
use crate::scene::{Geometry, Light, Material, MaterialId, Node, NodeId, Side, TextureRef};
use crate::tween::{Axis, Easing, Property, Repeat, Tween, TweenTarget};

use super::common::{assemble_boxes, BoxDescriptor, MaterialSharing};

pub const WHALE_MODEL: &str = "models/Glass_whale.glb";
pub const CAGE_TEXTURE: &str = "textures/cage_texture.jpg";

const FOCUS: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const SKY: u32 = 0x87ceeb;
const WATER_LEVEL: f32 = 2.6;
const CYCLE_SECONDS: f32 = 10.0;

pub const WALLS: [BoxDescriptor; 4] = [
    BoxDescriptor::new(Vec3::new(0.0, 1.35, 3.0), Vec3::new(6.0, 2.7, 0.2)),
    BoxDescriptor::new(Vec3::new(0.0, 1.35, -3.0), Vec3::new(6.0, 2.7, 0.2)),
    BoxDescriptor::new(Vec3::new(-3.0, 1.35, 0.0), Vec3::new(0.2, 2.7, 6.0)),
    BoxDescriptor::new(Vec3::new(3.0, 1.35, 0.0), Vec3::new(0.2, 2.7, 6.0)),
];

pub const FLOOR: BoxDescriptor = BoxDescriptor::new(Vec3::ZERO, Vec3::new(6.0, 0.2, 6.0));

#[derive(Debug, Default)]
pub struct Aquarium {
    walls: Vec<NodeId>,
    water: Option<NodeId>,
    water_material: Option<MaterialId>,
    whale: Option<NodeId>,
}

impl Aquarium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn walls(&self) -> &[NodeId] {
        &self.walls
    }

    pub fn water(&self) -> Option<NodeId> {
        self.water
    }

    pub fn water_material(&self) -> Option<MaterialId> {
        self.water_material
    }

    pub fn whale(&self) -> Option<NodeId> {
        self.whale
    }
}

impl SceneSetup for Aquarium {
    fn name(&self) -> &'static str {
        "aquarium"
    }

    fn build(&mut self, ctx: &mut AppContext) {
        let (width, height) = ctx.surface_size();
        ctx.camera = PerspectiveCamera::new(75.0, ctx.aspect(), 0.1, 1000.0)
            .at(Vec3::new(0.0, 3.0, 10.0))
            .looking_at(FOCUS);
        ctx.rig = CameraRig::DragOrbit(DragOrbit::new(FOCUS));
        ctx.picker = Some(ClickToggle::new(width, height));

        let scene = &mut ctx.scene;
        scene.background = SKY.into();

        scene.add(Node::light(Light::ambient(0x404040, 2.0)).named("ambient"));
        scene.add(
            Node::light(Light::directional(0xffffff, 3.0))
                .named("key light")
                .at(Vec3::ONE.normalize()),
        );
        scene.add(
            Node::light(Light::directional(0xffffff, 3.0))
                .named("fill light")
                .at(Vec3::new(-1.0, 1.0, -1.0).normalize()),
        );
        scene.add(
            Node::light(Light::point(0xffffff, 2.0, 50.0))
                .named("water light")
                .at(Vec3::new(0.0, 2.0, 0.0)),
        );

        let cage = scene.add_material(
            Material::standard(0xffffff)
                .map(TextureRef::new(ctx.assets.resolve(CAGE_TEXTURE)))
                .side(Side::Double),
        );
        let root = scene.root();
        self.walls = assemble_boxes(scene, root, &WALLS, cage, MaterialSharing::ClonePerNode);
        assemble_boxes(scene, root, &[FLOOR], cage, MaterialSharing::Shared);

        let water_geometry = scene.add_geometry(Geometry::plane(6.0, 6.0));
        let water_material = scene.add_material(Material::water());
        let water = scene.add(
            Node::mesh(water_geometry, water_material)
                .named("water")
                .at(Vec3::new(0.0, WATER_LEVEL, 0.0))
                .rotated(Vec3::new(-PI / 2.0, 0.0, 0.0))
                .non_interactive(),
        );
        self.water = Some(water);
        self.water_material = Some(water_material);

        ctx.timeline.add(
            Tween::to(TweenTarget::uniform(water_material, "time"), 10.0)
                .duration(CYCLE_SECONDS)
                .ease(Easing::Linear)
                .repeat(Repeat::Infinite),
        );

        ctx.assets.load(
            LoadRequest::new("whale", WHALE_MODEL)
                .at(Vec3::new(0.0, 0.2, 0.0))
                .scaled(Vec3::new(0.01, 0.01, 0.02)),
        );
    }

    fn on_asset(&mut self, ctx: &mut AppContext, outcome: &LoadOutcome) {
        if outcome.label != "whale" {
            return;
        }
        let Some(whale) = outcome.node() else {
            return;
        };
        self.whale = Some(whale);
        ctx.timeline.add(
            Tween::to(TweenTarget::node(whale, Property::Rotation(Axis::Y)), 2.0 * PI)
                .duration(CYCLE_SECONDS)
                .ease(Easing::Linear)
                .repeat(Repeat::Infinite),
        );
    }
}
