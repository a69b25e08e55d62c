use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::PerspectiveCamera;
use crate::math::Color;
use crate::scene::{DrawItem, Fog, Geometry, LightKind, Material, MaterialKind, Scene};

pub const MAX_LIGHTS: usize = 8;

const LIGHT_DIRECTIONAL: f32 = 1.0;
const LIGHT_POINT: f32 = 2.0;
const LIGHT_SPOT: f32 = 3.0;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn from_geometry(geometry: &Geometry) -> Vec<Vertex> {
        geometry
            .positions
            .iter()
            .zip(&geometry.normals)
            .zip(&geometry.uvs)
            .map(|((p, n), uv)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }
}

/// sRGB-encoded color to linear light
pub fn linear(color: Color) -> [f32; 3] {
    color.to_array().map(|c| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    })
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightUniform {
    /// xyz world position, w kind
    pub position: [f32; 4],
    /// xyz unit vector the light shines along, w intensity
    pub direction: [f32; 4],
    /// rgb linear color, a cutoff distance (0 = none)
    pub color: [f32; 4],
    /// decay, cone cosine, penumbra cosine, unused
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GlobalUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// rgb linear fog color, a density (0 = no fog)
    pub fog: [f32; 4],
    pub ambient: [f32; 4],
    /// x light count
    pub counts: [u32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl GlobalUniform {
    pub fn new(scene: &Scene, camera: &PerspectiveCamera) -> Self {
        let mut uniform = Self::zeroed();
        uniform.view_proj = camera.view_projection().to_cols_array_2d();
        uniform.camera_position = camera.position.extend(1.0).to_array();

        if let Some(Fog::Exp2 { color, density }) = scene.fog {
            let [r, g, b] = linear(color);
            uniform.fog = [r, g, b, density];
        }

        let mut ambient = [0.0f32; 3];
        let mut count = 0;
        for item in scene.collect_lights() {
            let light = item.light;
            let [r, g, b] = linear(light.color);
            let kind = match light.kind {
                LightKind::Ambient => {
                    ambient[0] += r * light.intensity;
                    ambient[1] += g * light.intensity;
                    ambient[2] += b * light.intensity;
                    continue;
                }
                LightKind::Directional => [LIGHT_DIRECTIONAL, 0.0, 0.0, 0.0, 0.0],
                LightKind::Point { distance, decay } => [LIGHT_POINT, distance, decay, 0.0, 0.0],
                LightKind::Spot {
                    distance,
                    angle,
                    penumbra,
                    decay,
                } => [
                    LIGHT_SPOT,
                    distance,
                    decay,
                    angle.cos(),
                    (angle * (1.0 - penumbra)).cos(),
                ],
            };
            if count == MAX_LIGHTS {
                log::warn!("more than {MAX_LIGHTS} lights; extra lights ignored");
                break;
            }
            let [kind, distance, decay, cone, penumbra] = kind;
            uniform.lights[count] = LightUniform {
                position: item.position.extend(kind).to_array(),
                direction: item.direction.extend(light.intensity).to_array(),
                color: [r, g, b, distance],
                params: [decay, cone, penumbra, 0.0],
            };
            count += 1;
        }
        uniform.ambient = [ambient[0], ambient[1], ambient[2], 1.0];
        uniform.counts = [count as u32, 0, 0, 0];
        uniform
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb linear base color, a opacity
    pub color: [f32; 4],
    pub emissive: [f32; 4],
    /// x material kind, y water time
    pub params: [f32; 4],
}

impl DrawUniform {
    pub fn new(item: &DrawItem, material: &Material) -> Self {
        let [r, g, b] = linear(material.color);
        let [er, eg, eb] = linear(material.emissive);
        let opacity = if material.transparent { material.opacity } else { 1.0 };
        let kind = match material.kind {
            MaterialKind::Basic => 0.0,
            MaterialKind::Standard => 1.0,
            MaterialKind::Water => 2.0,
        };
        Self {
            model: item.world.to_cols_array_2d(),
            normal_matrix: normal_matrix(item.world).to_cols_array_2d(),
            color: [r, g, b, opacity],
            emissive: [er, eg, eb, 0.0],
            params: [kind, material.uniform("time").unwrap_or(0.0), 0.0, 0.0],
        }
    }
}

fn normal_matrix(world: Mat4) -> Mat4 {
    if world.determinant().abs() < 1e-12 {
        return Mat4::IDENTITY;
    }
    world.inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Light, Node};
    use glam::Vec3;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<GlobalUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<DrawUniform>() % 16, 0);
        assert!(std::mem::size_of::<DrawUniform>() <= 256);
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(linear(Color::BLACK), [0.0, 0.0, 0.0]);
        let white = linear(Color::WHITE);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_ambient_lights_are_summed_not_listed() {
        let mut scene = Scene::new();
        scene.add(Node::light(Light::ambient(0xffffff, 0.5)));
        scene.add(Node::light(Light::ambient(0xffffff, 0.25)));
        scene.add(Node::light(Light::directional(0xffffff, 1.5)).at(Vec3::new(2.0, 4.0, 3.0)));

        let uniform = GlobalUniform::new(&scene, &PerspectiveCamera::default());
        assert_eq!(uniform.counts[0], 1);
        assert!((uniform.ambient[0] - 0.75).abs() < 1e-6);
        assert_eq!(uniform.lights[0].position[3], LIGHT_DIRECTIONAL);
        assert_eq!(uniform.lights[0].direction[3], 1.5);
    }

    #[test]
    fn test_opaque_material_ignores_stale_opacity() {
        let material = Material::standard(0xffffff).opacity(false, 0.3);
        let item = DrawItem {
            node: Default::default(),
            world: Mat4::IDENTITY,
            mesh: crate::scene::Mesh {
                geometry: Default::default(),
                material: Default::default(),
            },
        };
        assert_eq!(DrawUniform::new(&item, &material).color[3], 1.0);
    }
}
