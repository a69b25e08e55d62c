//! A walled classroom furnished with two desks and a window, all loaded models.

use std::f32::consts::PI;

use glam::Vec3;

use crate::app::{AppContext, SceneSetup};
use crate::assets::{LoadOutcome, LoadRequest};
use crate::camera::PerspectiveCamera;
use crate::controls::{CameraRig, OrbitControls};
use crate::scene::{Light, Material, Node, Side, TextureSet};

use super::common::{assemble_panels, MaterialSharing, PanelDescriptor};

pub const TABLE_MODEL: &str = "models/ArtLab_table.glb";
pub const CHAIR_MODEL: &str = "models/SchoolChair.glb";
pub const WINDOW_MODEL: &str = "models/window.glb";

const MODEL_SCALE: f32 = 0.01;

/// Room shell: back, front, left and right walls plus the ceiling
pub const WALLS: [PanelDescriptor; 5] = [
    PanelDescriptor::new(Vec3::new(0.0, 2.5, -5.0), Vec3::ZERO, 10.0, 5.0),
    PanelDescriptor::new(Vec3::new(0.0, 2.5, 5.0), Vec3::ZERO, 10.0, 5.0),
    PanelDescriptor::new(Vec3::new(-5.0, 2.5, 0.0), Vec3::new(0.0, PI / 2.0, 0.0), 10.0, 5.0),
    PanelDescriptor::new(Vec3::new(5.0, 2.5, 0.0), Vec3::new(0.0, -PI / 2.0, 0.0), 10.0, 5.0),
    PanelDescriptor::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(PI / 2.0, 0.0, 0.0), 10.0, 10.0),
];

pub const FLOOR: PanelDescriptor = PanelDescriptor::new(Vec3::ZERO, Vec3::new(-PI / 2.0, 0.0, 0.0), 10.0, 10.0);

/// Table position and the two chairs pulled up to it
pub const DESKS: [(Vec3, [Vec3; 2]); 2] = [
    (Vec3::new(1.0, 0.0, 0.0), [Vec3::new(0.5, 0.0, -0.5), Vec3::new(1.5, 0.0, -0.5)]),
    (Vec3::new(-2.0, 0.0, 0.0), [Vec3::new(-2.5, 0.0, -0.5), Vec3::new(-1.5, 0.0, -0.5)]),
];

fn chair_textures() -> TextureSet {
    TextureSet::new(
        "textures/SchoolChair_Diffuse.png",
        "textures/SchoolChair_Normal.png",
        "textures/SchoolChair_Metallic.png",
        "textures/SchoolChair_Roughness.png",
    )
}

fn table_textures() -> TextureSet {
    TextureSet::new(
        "textures/Table_Bake1_PBR_Diffuse.png",
        "textures/Table_Bake1_PBR_Normal.png",
        "textures/Table_Bake1_PBR_Metainess.png",
        "textures/Table_Bake1_PBR_Roughness.png",
    )
}

fn window_textures() -> TextureSet {
    TextureSet::new(
        "textures/window_w_BaseColor.png",
        "textures/window_w_Normal.png",
        "textures/window_w_Metallic.png",
        "textures/window_w_Roughness.png",
    )
}

#[derive(Debug, Default)]
pub struct Classroom {
    loaded: usize,
    failed: usize,
}

impl Classroom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }
}

impl SceneSetup for Classroom {
    fn name(&self) -> &'static str {
        "classroom"
    }

    fn build(&mut self, ctx: &mut AppContext) {
        ctx.camera = PerspectiveCamera::new(75.0, ctx.aspect(), 0.1, 1000.0)
            .at(Vec3::new(0.0, 2.0, 5.0))
            .looking_at(Vec3::new(0.0, 2.0, 0.0));
        ctx.rig = CameraRig::Orbit(OrbitControls::new(Vec3::ZERO));

        let scene = &mut ctx.scene;
        let root = scene.root();

        let wall = scene.add_material(Material::standard(0x2e8b57).side(Side::Double));
        assemble_panels(scene, root, &WALLS, wall, MaterialSharing::Shared);

        let floor = scene.add_material(Material::standard(0x808080).side(Side::Double));
        assemble_panels(scene, root, &[FLOOR], floor, MaterialSharing::Shared);

        scene.add(Node::light(Light::ambient(0x555555, 1.0)).named("ambient"));
        scene.add(
            Node::light(Light::point(0xffffff, 1.2, 20.0))
                .named("ceiling light")
                .at(Vec3::new(0.0, 3.0, 0.0)),
        );

        let furniture = Vec3::splat(MODEL_SCALE);
        for (table, chairs) in DESKS {
            ctx.assets.load(
                LoadRequest::new("table", TABLE_MODEL)
                    .at(table)
                    .rotated(Vec3::new(0.0, PI / 2.0, 0.0))
                    .scaled(furniture)
                    .textured(table_textures()),
            );
            for chair in chairs {
                ctx.assets.load(
                    LoadRequest::new("chair", CHAIR_MODEL)
                        .at(chair)
                        .scaled(furniture)
                        .textured(chair_textures()),
                );
            }
        }
        ctx.assets.load(
            LoadRequest::new("window", WINDOW_MODEL)
                .at(Vec3::new(0.0, 1.5, -4.9))
                .rotated(Vec3::ZERO)
                .scaled(furniture)
                .textured(window_textures()),
        );
    }

    fn on_asset(&mut self, _ctx: &mut AppContext, outcome: &LoadOutcome) {
        match outcome.node() {
            Some(_) => self.loaded += 1,
            None => self.failed += 1,
        }
    }
}
