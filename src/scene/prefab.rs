use super::geometry::Geometry;
use super::material::{Material, TextureSet};
use super::node::Transform;

/// Detached subtree produced by a model source, spliced into a scene later
#[derive(Debug, Clone)]
pub struct Prefab {
    pub name: Option<String>,
    pub transform: Transform,
    pub mesh: Option<(Geometry, Material)>,
    pub children: Vec<Prefab>,
}

impl Prefab {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            transform: Transform::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self {
            mesh: Some((geometry, material)),
            ..Self::group(name)
        }
    }

    pub fn with_child(mut self, child: Prefab) -> Self {
        self.children.push(child);
        self
    }

    /// Visit this node and every descendant, parents before children
    pub fn traverse_mut(&mut self, f: &mut impl FnMut(&mut Prefab)) {
        f(self);
        for child in &mut self.children {
            child.traverse_mut(f);
        }
    }

    pub fn traverse(&self, f: &mut impl FnMut(&Prefab)) {
        f(self);
        for child in &self.children {
            child.traverse(f);
        }
    }

    /// Bind `set` onto every mesh in the subtree, overriding metalness,
    /// roughness and emissive unconditionally.
    pub fn bind_textures(&mut self, set: &TextureSet) {
        self.traverse_mut(&mut |node| {
            if let Some((_, material)) = node.mesh.as_mut() {
                material.apply_texture_set(set);
            }
        });
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |_| count += 1);
        count
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |node| {
            if node.mesh.is_some() {
                count += 1;
            }
        });
        count
    }
}
