use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::Vec3;
use scene_sketches::app::{Application, ResizePolicy};
use scene_sketches::assets::{AssetServer, ModelSource};
use scene_sketches::camera::PerspectiveCamera;
use scene_sketches::controls::InputEvent;
use scene_sketches::renderer::FrameRenderer;
use scene_sketches::scene::{Geometry, Material, Prefab, Scene};
use scene_sketches::scenes::{self, SceneKind};

/// Counts draws and remembers what the last frame looked like
#[derive(Default)]
struct RecordingRenderer {
    frames: usize,
    last_meshes: usize,
    last_aspect: f32,
    resizes: Vec<(u32, u32)>,
}

impl FrameRenderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()> {
        self.frames += 1;
        self.last_meshes = scene.mesh_count();
        self.last_aspect = camera.aspect;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }
}

/// Hands back a two-part model for every path and records what was asked for
#[derive(Clone, Default)]
struct FakeModels {
    requested: Rc<RefCell<Vec<PathBuf>>>,
}

impl ModelSource for FakeModels {
    fn load(&self, path: &Path) -> anyhow::Result<Prefab> {
        self.requested.borrow_mut().push(path.to_path_buf());
        Ok(Prefab::group("model")
            .with_child(Prefab::mesh("top", Geometry::cuboid(1.0, 0.1, 1.0), Material::standard(0x8b4513)))
            .with_child(Prefab::mesh("legs", Geometry::cuboid(0.1, 1.0, 0.1), Material::standard(0x222222))))
    }
}

fn run(kind: SceneKind, models: FakeModels) -> Application {
    let assets = AssetServer::new(models, "assets");
    Application::new(scenes::setup(kind), assets, 800, 600)
}

#[cfg(test)]
mod classroom_tests {
    use super::*;

    #[test]
    fn test_two_desks_yield_two_tables_and_four_chairs() {
        let models = FakeModels::default();
        let mut app = run(SceneKind::Classroom, models.clone());
        let mut renderer = RecordingRenderer::default();

        let scene = &app.context().scene;
        assert!(scene.top_level_named("table").is_empty(), "Loads resolve after construction");

        app.tick(&mut renderer).unwrap();

        let scene = &app.context().scene;
        assert_eq!(scene.top_level_named("table").len(), 2);
        assert_eq!(scene.top_level_named("chair").len(), 4);
        assert_eq!(scene.top_level_named("window").len(), 1);
        assert_eq!(models.requested.borrow().len(), 7);
        assert_eq!(app.context().assets.pending(), 0);
    }

    #[test]
    fn test_furniture_is_placed_and_textured() {
        let mut app = run(SceneKind::Classroom, FakeModels::default());
        app.tick(&mut RecordingRenderer::default()).unwrap();
        let scene = &app.context().scene;

        let tables = scene.top_level_named("table");
        let table = scene.node(tables[0]).unwrap();
        assert_eq!(table.transform.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(table.transform.scale, Vec3::splat(0.01));

        for id in scene.descendants(tables[0]) {
            if let Some(mesh) = scene.node(id).unwrap().as_mesh() {
                let material = scene.material(mesh.material).unwrap();
                assert_eq!(material.roughness, 1.0);
                assert_eq!(material.metalness, 0.0);
                let map = material.map.as_ref().unwrap();
                assert!(map.path.ends_with("Table_Bake1_PBR_Diffuse.png"));
            }
        }
    }
}

#[cfg(test)]
mod render_loop_tests {
    use super::*;

    #[test]
    fn test_every_scene_draws_once_per_tick() {
        for kind in SceneKind::ALL {
            let mut app = run(kind, FakeModels::default());
            let mut renderer = RecordingRenderer::default();
            for _ in 0..3 {
                app.tick(&mut renderer).unwrap();
            }
            assert_eq!(renderer.frames, 3, "{kind:?} drew {} times", renderer.frames);
            assert!(renderer.last_meshes > 0, "{kind:?} has nothing to draw");
        }
    }

    #[test]
    fn test_whale_spins_once_loaded() {
        let mut app = run(SceneKind::Aquarium, FakeModels::default());
        assert_eq!(app.context().timeline.len(), 1, "Only the water tween before the whale arrives");

        app.tick(&mut RecordingRenderer::default()).unwrap();

        let ctx = app.context();
        assert_eq!(ctx.timeline.len(), 2);
        let whale = ctx.scene.top_level_named("whale")[0];
        assert_eq!(ctx.scene.node(whale).unwrap().transform.scale, Vec3::new(0.01, 0.01, 0.02));
    }

    #[test]
    fn test_fixed_surface_keeps_camera_aspect() {
        let mut app = run(SceneKind::Shadows, FakeModels::default());
        assert_eq!(app.context().resize_policy, ResizePolicy::Ignore);

        app.handle_input(&InputEvent::Resize {
            width: 1920,
            height: 600,
        });
        let mut renderer = RecordingRenderer::default();
        app.tick(&mut renderer).unwrap();

        assert!((renderer.last_aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(app.context().surface_size(), (1920, 600));
    }

    #[test]
    fn test_tracking_surface_updates_camera_aspect() {
        let mut app = run(SceneKind::Street, FakeModels::default());
        app.handle_input(&InputEvent::Resize {
            width: 1000,
            height: 500,
        });
        let mut renderer = RecordingRenderer::default();
        app.tick(&mut renderer).unwrap();

        assert!((renderer.last_aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_click_toggles_aquarium_wall() {
        let mut app = run(SceneKind::Aquarium, FakeModels::default());
        let walls_before: Vec<bool> = {
            let scene = &app.context().scene;
            scene
                .collect_draws()
                .iter()
                .map(|d| scene.material(d.mesh.material).unwrap().transparent)
                .collect()
        };
        assert!(walls_before.iter().filter(|t| **t).count() == 1, "Only the water starts transparent");

        // centre of the view looks at the near wall through nothing else
        app.handle_input(&InputEvent::Click {
            position: glam::Vec2::new(400.0, 300.0),
        });

        let scene = &app.context().scene;
        let transparent = scene
            .collect_draws()
            .iter()
            .filter(|d| scene.material(d.mesh.material).unwrap().transparent)
            .count();
        assert_eq!(transparent, 2);
    }
}
