use glam::Vec2;

use super::InputEvent;
use crate::camera::{screen_to_ndc, PerspectiveCamera};
use crate::scene::{NodeId, Scene};

/// Clicking a mesh flips its material between opaque and translucent.
///
/// Only the nearest hit counts: when it belongs to a non-interactive node
/// the click does nothing, even if something toggleable lies behind it.
#[derive(Debug, Clone, Default)]
pub struct ClickToggle {
    viewport: Vec2,
}

impl ClickToggle {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Vec2::new(width as f32, height as f32),
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
    }

    /// Returns the toggled node, if any
    pub fn handle(&mut self, event: &InputEvent, camera: &PerspectiveCamera, scene: &mut Scene) -> Option<NodeId> {
        match *event {
            InputEvent::Click { position } => self.click(position, camera, scene),
            InputEvent::Resize { width, height } => {
                self.set_viewport(width, height);
                None
            }
            _ => None,
        }
    }

    pub fn click(&self, position: Vec2, camera: &PerspectiveCamera, scene: &mut Scene) -> Option<NodeId> {
        let ndc = screen_to_ndc(position, self.viewport);
        let hit = scene.raycast(&camera.ray_from_ndc(ndc))?;
        if !scene.node(hit.node)?.interactive {
            return None;
        }
        let material = scene.material_mut(hit.material)?;
        material.toggle_transparency();
        log::debug!(
            "toggled {:?}: transparent={} opacity={}",
            hit.node,
            material.transparent,
            material.opacity
        );
        Some(hit.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Material, Node, Side};
    use glam::Vec3;

    fn setup() -> (Scene, PerspectiveCamera, NodeId, NodeId) {
        let mut scene = Scene::new();
        let plane = scene.add_geometry(Geometry::plane(4.0, 4.0));
        let glass = scene.add_material(Material::standard(0xffffff).side(Side::Double));
        let water = scene.add_material(Material::water());
        let wall = scene.add(Node::mesh(plane, glass));
        let surface = scene.add(Node::mesh(plane, water).at(Vec3::new(0.0, 0.0, 1.0)).non_interactive());
        let camera = PerspectiveCamera::default().at(Vec3::new(0.0, 0.0, 5.0));
        (scene, camera, wall, surface)
    }

    #[test]
    fn test_click_toggles_nearest_mesh() {
        let (mut scene, camera, wall, surface) = setup();
        scene.node_mut(surface).unwrap().visible = false;
        let picker = ClickToggle::new(800, 600);
        assert_eq!(picker.click(Vec2::new(400.0, 300.0), &camera, &mut scene), Some(wall));

        let mat = scene.node(wall).unwrap().as_mesh().unwrap().material;
        assert!(scene.material(mat).unwrap().transparent);
        assert_eq!(scene.material(mat).unwrap().opacity, 0.2);
    }

    #[test]
    fn test_non_interactive_hit_blocks_click() {
        let (mut scene, camera, wall, _) = setup();
        let picker = ClickToggle::new(800, 600);
        assert_eq!(picker.click(Vec2::new(400.0, 300.0), &camera, &mut scene), None);
        let mat = scene.node(wall).unwrap().as_mesh().unwrap().material;
        assert!(!scene.material(mat).unwrap().transparent);
    }

    #[test]
    fn test_click_on_empty_space() {
        let (mut scene, camera, _, _) = setup();
        let picker = ClickToggle::new(800, 600);
        assert_eq!(picker.click(Vec2::new(0.0, 0.0), &camera, &mut scene), None);
    }
}
