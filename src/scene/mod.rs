//! Scene graph: a tree of nodes over shared geometry and material pools.

mod geometry;
mod light;
mod material;
mod node;
mod prefab;
mod raycast;

pub use geometry::{Geometry, Primitive};
pub use light::{Light, LightKind, ShadowConfig, ShadowMapKind};
pub use material::{Material, MaterialKind, Side, TextureRef, TextureSet, TRANSLUCENT_OPACITY};
pub use node::{Mesh, Node, NodeKind, Transform};
pub use prefab::Prefab;
pub use raycast::RayHit;

use glam::{Mat4, Vec3};
use slotmap::SlotMap;

use crate::math::Color;

slotmap::new_key_type! {
    pub struct NodeId;
    pub struct MaterialId;
    pub struct GeometryId;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fog {
    /// Exponential-squared falloff with view depth
    Exp2 { color: Color, density: f32 },
}

/// One mesh to draw, with its world transform resolved
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub node: NodeId,
    pub world: Mat4,
    pub mesh: Mesh,
}

/// A light with its world placement resolved
#[derive(Debug, Clone, Copy)]
pub struct LightItem {
    pub light: Light,
    pub position: Vec3,
    /// Unit vector from the light toward the origin
    pub direction: Vec3,
}

pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    materials: SlotMap<MaterialId, Material>,
    geometries: SlotMap<GeometryId, Geometry>,
    root: NodeId,
    pub background: Color,
    pub fog: Option<Fog>,
    pub shadow_map: Option<ShadowMapKind>,
}

impl Scene {
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group().named("scene"));
        Self {
            nodes,
            materials: SlotMap::with_key(),
            geometries: SlotMap::with_key(),
            root,
            background: Color::BLACK,
            fog: None,
            shadow_map: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    // ------------------------------------------------------------------
    // Pools
    // ------------------------------------------------------------------

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.insert(geometry)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Independent copy of a pooled material
    pub fn clone_material(&mut self, id: MaterialId) -> Option<MaterialId> {
        let copy = self.materials.get(id)?.clone();
        Some(self.materials.insert(copy))
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    /// Attach a node under the root
    pub fn add(&mut self, node: Node) -> NodeId {
        let root = self.root;
        self.insert_under(root, node)
    }

    /// Attach a node under `parent`; `None` if the parent is gone
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        Some(self.insert_under(parent, node))
    }

    fn insert_under(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Detach and drop a node and its whole subtree. The root stays.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }
        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != id);
            }
        }
        for victim in self.descendants(id) {
            self.nodes.remove(victim);
        }
        true
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Total nodes including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// `id` and everything below it, parents before children
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    pub fn traverse(&self, id: NodeId, mut f: impl FnMut(NodeId, &Node)) {
        for current in self.descendants(id) {
            if let Some(node) = self.nodes.get(current) {
                f(current, node);
            }
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.nodes[id].is_named(name))
    }

    /// Direct children of the root carrying `name`
    pub fn top_level_named(&self, name: &str) -> Vec<NodeId> {
        self.children(self.root)
            .iter()
            .copied()
            .filter(|&id| self.nodes[id].is_named(name))
            .collect()
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut matrix = self.nodes.get(id)?.transform.matrix();
        let mut parent = self.nodes[id].parent;
        while let Some(p) = parent {
            let node = self.nodes.get(p)?;
            matrix = node.transform.matrix() * matrix;
            parent = node.parent;
        }
        Some(matrix)
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_matrix(id).map(|m| m.transform_point3(Vec3::ZERO))
    }

    /// Splice a detached subtree under `parent`, moving its geometry and
    /// materials into the pools. Returns the new subtree root.
    pub fn instantiate(&mut self, parent: NodeId, prefab: Prefab) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        Some(self.instantiate_under(parent, prefab))
    }

    /// Splice a prefab directly under the root
    pub fn add_prefab(&mut self, prefab: Prefab) -> NodeId {
        let root = self.root;
        self.instantiate_under(root, prefab)
    }

    fn instantiate_under(&mut self, parent: NodeId, prefab: Prefab) -> NodeId {
        let Prefab {
            name,
            transform,
            mesh,
            children,
        } = prefab;

        let mut node = match mesh {
            Some((geometry, material)) => {
                let geometry = self.add_geometry(geometry);
                let material = self.add_material(material);
                Node::mesh(geometry, material)
            }
            None => Node::group(),
        };
        node.name = name;
        node.transform = transform;

        let id = self.insert_under(parent, node);
        for child in children {
            self.instantiate_under(id, child);
        }
        id
    }

    // ------------------------------------------------------------------
    // Frame extraction
    // ------------------------------------------------------------------

    fn walk_visible(&self, mut f: impl FnMut(NodeId, &Node, Mat4)) {
        let mut stack = vec![(self.root, Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();
            f(id, node, world);
            stack.extend(node.children.iter().rev().map(|&c| (c, world)));
        }
    }

    /// Every visible mesh with its world matrix
    pub fn collect_draws(&self) -> Vec<DrawItem> {
        let mut draws = Vec::new();
        self.walk_visible(|id, node, world| {
            if let Some(mesh) = node.as_mesh() {
                draws.push(DrawItem {
                    node: id,
                    world,
                    mesh: *mesh,
                });
            }
        });
        draws
    }

    pub fn collect_lights(&self) -> Vec<LightItem> {
        let mut lights = Vec::new();
        self.walk_visible(|_, node, world| {
            if let Some(light) = node.as_light() {
                let position = world.transform_point3(Vec3::ZERO);
                lights.push(LightItem {
                    light: *light,
                    position,
                    direction: (-position).normalize_or(Vec3::NEG_Y),
                });
            }
        });
        lights
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.values().filter(|n| n.as_mesh().is_some()).count()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
