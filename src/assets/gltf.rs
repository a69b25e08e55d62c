use std::path::Path;

use anyhow::{Context, Result};
use glam::{EulerRot, Quat, Vec2, Vec3};

use super::ModelSource;
use crate::math::Color;
use crate::scene::{Geometry, Material, Prefab, Side, TextureRef, Transform};

/// glTF 2.0 / GLB loader
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfSource;

impl ModelSource for GltfSource {
    fn load(&self, path: &Path) -> Result<Prefab> {
        std::fs::metadata(path).with_context(|| format!("Failed to load glTF file: {}", path.display()))?;
        let (document, buffers, _images) = ::gltf::import(path)
            .with_context(|| format!("Failed to load glTF file: {}", path.display()))?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .context("glTF file contains no scenes")?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        let mut root = Prefab::group(name);
        for node in scene.nodes() {
            root.children.push(process_node(&node, &buffers, path)?);
        }

        log::debug!(
            "{}: {} nodes, {} meshes",
            path.display(),
            root.node_count(),
            root.mesh_count()
        );
        Ok(root)
    }
}

/// Recursively converts glTF nodes, keeping the hierarchy
fn process_node(node: &::gltf::Node, buffers: &[::gltf::buffer::Data], path: &Path) -> Result<Prefab> {
    let (translation, rotation, scale) = node.transform().decomposed();
    let (rx, ry, rz) = Quat::from_array(rotation).to_euler(EulerRot::XYZ);

    let mut prefab = Prefab {
        name: node.name().map(str::to_owned),
        transform: Transform {
            position: Vec3::from_array(translation),
            rotation: Vec3::new(rx, ry, rz),
            scale: Vec3::from_array(scale),
        },
        mesh: None,
        children: Vec::new(),
    };

    if let Some(mesh) = node.mesh() {
        let mut parts = process_mesh(&mesh, buffers, path)?;
        if parts.len() == 1 {
            prefab.mesh = parts.pop();
        } else {
            // One child per primitive so each keeps its own material
            let name = mesh.name().unwrap_or("primitive");
            for (geometry, material) in parts {
                prefab.children.push(Prefab::mesh(name, geometry, material));
            }
        }
    }

    for child in node.children() {
        prefab.children.push(process_node(&child, buffers, path)?);
    }

    Ok(prefab)
}

fn process_mesh(
    mesh: &::gltf::Mesh,
    buffers: &[::gltf::buffer::Data],
    path: &Path,
) -> Result<Vec<(Geometry, Material)>> {
    let mut parts = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != ::gltf::mesh::Mode::Triangles {
            log::debug!("skipping non-triangle primitive in {:?}", mesh.name());
            continue;
        }
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(Vec3::from_array)
            .collect();
        if positions.is_empty() {
            continue;
        }

        let normals: Vec<Vec3> = reader
            .read_normals()
            .map(|n| n.map(Vec3::from_array).collect())
            .unwrap_or_default();
        let uvs: Vec<Vec2> = reader
            .read_tex_coords(0)
            .map(|t| t.into_f32().map(Vec2::from_array).collect())
            .unwrap_or_default();
        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let geometry = Geometry::from_triangles(positions, normals, uvs, indices);
        parts.push((geometry, convert_material(&primitive.material(), path)));
    }

    Ok(parts)
}

fn convert_material(source: &::gltf::Material, path: &Path) -> Material {
    let pbr = source.pbr_metallic_roughness();
    let [r, g, b, a] = pbr.base_color_factor();
    let [er, eg, eb] = source.emissive_factor();

    let mut material = Material::standard(Color::rgb(r, g, b))
        .metalness(pbr.metallic_factor())
        .roughness(pbr.roughness_factor())
        .emissive(Color::rgb(er, eg, eb));

    if source.alpha_mode() == ::gltf::material::AlphaMode::Blend {
        material = material.opacity(true, a);
    }
    if source.double_sided() {
        material = material.side(Side::Double);
    }

    // Only external images can be referenced by path; embedded ones are skipped
    if let Some(info) = pbr.base_color_texture() {
        if let ::gltf::image::Source::Uri { uri, .. } = info.texture().source().source() {
            if !uri.starts_with("data:") {
                let dir = path.parent().unwrap_or_else(|| Path::new("."));
                material = material.map(TextureRef::new(dir.join(uri)));
            }
        }
    }

    material
}

#[cfg(test)]
mod tests {
    use super::*;

    // One triangle in a data-URI buffer: three positions then three u16 indices
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "name": "fin", "mesh": 0, "translation": [0.0, 2.0, 0.0] }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }] }],
        "materials": [{
            "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.5, 0.0, 1.0], "metallicFactor": 0.25 },
            "doubleSided": true
        }],
        "buffers": [{
            "byteLength": 44,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA="
        }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
            { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
        ]
    }"#;

    fn write_fixture(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("scene-sketches-{}-{name}", std::process::id()));
        std::fs::write(&path, TRIANGLE_GLTF).unwrap();
        path
    }

    #[test]
    fn test_load_single_triangle() {
        let path = write_fixture("triangle.gltf");
        let prefab = GltfSource.load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(prefab.children.len(), 1);
        let fin = &prefab.children[0];
        assert_eq!(fin.name.as_deref(), Some("fin"));
        assert_eq!(fin.transform.position, Vec3::new(0.0, 2.0, 0.0));

        let (geometry, material) = fin.mesh.as_ref().unwrap();
        assert_eq!(geometry.triangle_count(), 1);
        assert_eq!(material.color, Color::rgb(1.0, 0.5, 0.0));
        assert_eq!(material.metalness, 0.25);
        assert_eq!(material.side, Side::Double);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = GltfSource.load(Path::new("/definitely/not/here.glb")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load glTF file"));
    }
}
