use glam::Vec3;

use crate::scene::{Geometry, MaterialId, Node, NodeId, Scene};

/// Whether every assembled node draws with the same material or its own copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSharing {
    Shared,
    ClonePerNode,
}

/// Flat rectangle: a `width` x `height` plane facing +Z before rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDescriptor {
    pub position: Vec3,
    pub rotation: Vec3,
    pub width: f32,
    pub height: f32,
}

impl PanelDescriptor {
    pub const fn new(position: Vec3, rotation: Vec3, width: f32, height: f32) -> Self {
        Self {
            position,
            rotation,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDescriptor {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Width, height, depth
    pub size: Vec3,
}

impl BoxDescriptor {
    pub const fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            size,
        }
    }

    pub const fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

fn material_for(scene: &mut Scene, material: MaterialId, sharing: MaterialSharing) -> MaterialId {
    match sharing {
        MaterialSharing::Shared => material,
        MaterialSharing::ClonePerNode => scene.clone_material(material).unwrap_or(material),
    }
}

/// One plane mesh per descriptor under `parent`, transform copied verbatim
pub fn assemble_panels(
    scene: &mut Scene,
    parent: NodeId,
    panels: &[PanelDescriptor],
    material: MaterialId,
    sharing: MaterialSharing,
) -> Vec<NodeId> {
    panels
        .iter()
        .filter_map(|panel| {
            let geometry = scene.add_geometry(Geometry::plane(panel.width, panel.height));
            let material = material_for(scene, material, sharing);
            let node = Node::mesh(geometry, material).at(panel.position).rotated(panel.rotation);
            scene.add_child(parent, node)
        })
        .collect()
}

/// One box mesh per descriptor under `parent`, transform copied verbatim
pub fn assemble_boxes(
    scene: &mut Scene,
    parent: NodeId,
    boxes: &[BoxDescriptor],
    material: MaterialId,
    sharing: MaterialSharing,
) -> Vec<NodeId> {
    boxes
        .iter()
        .filter_map(|desc| {
            let geometry = scene.add_geometry(Geometry::cuboid(desc.size.x, desc.size.y, desc.size.z));
            let material = material_for(scene, material, sharing);
            let node = Node::mesh(geometry, material).at(desc.position).rotated(desc.rotation);
            scene.add_child(parent, node)
        })
        .collect()
}
