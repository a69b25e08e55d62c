use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::math::Color;

/// Opacity a toggled-translucent material is rendered at
pub const TRANSLUCENT_OPACITY: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Unlit flat color
    Basic,
    /// Lit metalness/roughness surface
    Standard,
    /// Procedural water ripple driven by the `time` uniform
    Water,
}

/// Reference to an image file, decoded lazily by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef {
    pub path: PathBuf,
}

impl TextureRef {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// The four maps bound to every mesh of a post-processed model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSet {
    pub map: TextureRef,
    pub normal_map: TextureRef,
    pub metalness_map: TextureRef,
    pub roughness_map: TextureRef,
}

impl TextureSet {
    pub fn new(
        map: impl AsRef<Path>,
        normal_map: impl AsRef<Path>,
        metalness_map: impl AsRef<Path>,
        roughness_map: impl AsRef<Path>,
    ) -> Self {
        Self {
            map: TextureRef::new(map),
            normal_map: TextureRef::new(normal_map),
            metalness_map: TextureRef::new(metalness_map),
            roughness_map: TextureRef::new(roughness_map),
        }
    }

    /// Same set with every path joined onto `root`
    pub fn resolved(&self, root: &Path) -> Self {
        let join = |t: &TextureRef| TextureRef::new(root.join(&t.path));
        Self {
            map: join(&self.map),
            normal_map: join(&self.normal_map),
            metalness_map: join(&self.metalness_map),
            roughness_map: join(&self.roughness_map),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    pub map: Option<TextureRef>,
    pub normal_map: Option<TextureRef>,
    pub metalness_map: Option<TextureRef>,
    pub roughness_map: Option<TextureRef>,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Color,
    pub transparent: bool,
    pub opacity: f32,
    pub side: Side,
    pub uniforms: BTreeMap<String, f32>,
    version: u64,
}

impl Material {
    fn with_kind(kind: MaterialKind) -> Self {
        Self {
            kind,
            color: Color::WHITE,
            map: None,
            normal_map: None,
            metalness_map: None,
            roughness_map: None,
            metalness: 0.0,
            roughness: 1.0,
            emissive: Color::BLACK,
            transparent: false,
            opacity: 1.0,
            side: Side::Front,
            uniforms: BTreeMap::new(),
            version: 0,
        }
    }

    pub fn basic(color: impl Into<Color>) -> Self {
        Self::with_kind(MaterialKind::Basic).color(color)
    }

    pub fn standard(color: impl Into<Color>) -> Self {
        Self::with_kind(MaterialKind::Standard).color(color)
    }

    /// Translucent double-sided ripple surface
    pub fn water() -> Self {
        let mut material = Self::with_kind(MaterialKind::Water);
        material.transparent = true;
        material.side = Side::Double;
        material.uniforms.insert("time".to_string(), 0.0);
        material
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn emissive(mut self, emissive: impl Into<Color>) -> Self {
        self.emissive = emissive.into();
        self
    }

    pub fn map(mut self, texture: TextureRef) -> Self {
        self.map = Some(texture);
        self
    }

    pub fn opacity(mut self, transparent: bool, opacity: f32) -> Self {
        self.transparent = transparent;
        self.opacity = opacity;
        self
    }

    /// Bind all four maps and pin the surface to a fully rough dielectric,
    /// whatever the source asset authored.
    pub fn apply_texture_set(&mut self, set: &TextureSet) {
        self.map = Some(set.map.clone());
        self.normal_map = Some(set.normal_map.clone());
        self.metalness_map = Some(set.metalness_map.clone());
        self.roughness_map = Some(set.roughness_map.clone());
        self.metalness = 0.0;
        self.roughness = 1.0;
        self.emissive = Color::BLACK;
        self.mark_changed();
    }

    /// Flip between opaque (opacity 1) and translucent (opacity 0.2)
    pub fn toggle_transparency(&mut self) {
        self.transparent = !self.transparent;
        self.opacity = if self.transparent { TRANSLUCENT_OPACITY } else { 1.0 };
        self.mark_changed();
    }

    pub fn uniform(&self, name: &str) -> Option<f32> {
        self.uniforms.get(name).copied()
    }

    /// Writes an existing uniform; returns false for unknown names
    pub fn set_uniform(&mut self, name: &str, value: f32) -> bool {
        match self.uniforms.get_mut(name) {
            Some(slot) => {
                *slot = value;
                self.mark_changed();
                true
            }
            None => false,
        }
    }

    /// Whether blending is needed when drawing
    pub fn is_blended(&self) -> bool {
        (self.transparent && self.opacity < 1.0) || self.kind == MaterialKind::Water
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn mark_changed(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_defaults() {
        let m = Material::default();
        assert_eq!(m.kind, MaterialKind::Standard);
        assert_eq!(m.metalness, 0.0);
        assert_eq!(m.roughness, 1.0);
        assert_eq!(m.opacity, 1.0);
        assert!(!m.transparent);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut m = Material::standard(0x2e8b57);
        m.toggle_transparency();
        assert!(m.transparent);
        assert_eq!(m.opacity, TRANSLUCENT_OPACITY);
        m.toggle_transparency();
        assert!(!m.transparent);
        assert_eq!(m.opacity, 1.0);
        assert_eq!(m.version(), 2);
    }

    #[test]
    fn test_texture_set_overrides_authored_values() {
        let mut m = Material::standard(0xffffff)
            .metalness(0.9)
            .roughness(0.1)
            .emissive(0x112233);
        let set = TextureSet::new("d.png", "n.png", "m.png", "r.png");
        m.apply_texture_set(&set);
        assert_eq!(m.metalness, 0.0);
        assert_eq!(m.roughness, 1.0);
        assert_eq!(m.emissive, Color::BLACK);
        assert_eq!(m.map, Some(TextureRef::new("d.png")));
        assert_eq!(m.roughness_map, Some(TextureRef::new("r.png")));
    }

    #[test]
    fn test_texture_set_resolved() {
        let set = TextureSet::new("d.png", "n.png", "m.png", "r.png").resolved(Path::new("assets"));
        assert_eq!(set.normal_map.path, Path::new("assets").join("n.png"));
    }

    #[test]
    fn test_water_uniforms() {
        let mut water = Material::water();
        assert_eq!(water.uniform("time"), Some(0.0));
        assert!(water.set_uniform("time", 4.5));
        assert_eq!(water.uniform("time"), Some(4.5));
        assert!(!water.set_uniform("speed", 1.0));
        assert!(water.is_blended());
    }
}
