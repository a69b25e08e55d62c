use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use crate::math::AABB;

/// Parameters a geometry was generated from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Plane { width: f32, height: f32 },
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32, width_segments: u32, height_segments: u32 },
    TorusKnot { radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32, p: u32, q: u32 },
}

/// Indexed triangle list in local space
#[derive(Debug, Clone)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    pub primitive: Option<Primitive>,
    bounds: AABB,
}

impl Geometry {
    /// Build from raw attributes; missing normals/uvs are zero-filled
    pub fn from_triangles(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
    ) -> Self {
        let count = positions.len();
        let normals = if normals.len() == count { normals } else { vec![Vec3::ZERO; count] };
        let uvs = if uvs.len() == count { uvs } else { vec![Vec2::ZERO; count] };
        let bounds = AABB::from_points(positions.iter().copied())
            .unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO));
        Self {
            positions,
            normals,
            uvs,
            indices,
            primitive: None,
            bounds,
        }
    }

    /// Plane in the XY plane facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let positions = vec![
            Vec3::new(-hw, hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
        ];
        let uvs = vec![Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let mut geometry = Self::from_triangles(positions, vec![Vec3::Z; 4], uvs, vec![0, 2, 1, 2, 3, 1]);
        geometry.primitive = Some(Primitive::Plane { width, height });
        geometry
    }

    /// Axis-aligned box centered on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut uvs = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        // (normal, u axis, v axis) per face: +x, -x, +y, -y, +z, -z
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        for (normal, u_axis, v_axis) in faces {
            let base = positions.len() as u32;
            let center = normal * half;
            let u = u_axis * half;
            let v = v_axis * half;
            for (su, sv, uv) in [
                (-1.0, 1.0, Vec2::new(0.0, 1.0)),
                (1.0, 1.0, Vec2::new(1.0, 1.0)),
                (-1.0, -1.0, Vec2::new(0.0, 0.0)),
                (1.0, -1.0, Vec2::new(1.0, 0.0)),
            ] {
                positions.push(center + u * su + v * sv);
                normals.push(normal);
                uvs.push(uv);
            }
            indices.extend_from_slice(&[base, base + 2, base + 1, base + 2, base + 3, base + 1]);
        }

        let mut geometry = Self::from_triangles(positions, normals, uvs, indices);
        geometry.primitive = Some(Primitive::Box { width, height, depth });
        geometry
    }

    /// UV sphere; seams at the poles are degenerate-free
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut grid = Vec::with_capacity(hs as usize + 1);

        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            let mut row = Vec::with_capacity(ws as usize + 1);
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let p = Vec3::new(
                    -radius * (u * TAU).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * TAU).sin() * (v * PI).sin(),
                );
                row.push(positions.len() as u32);
                positions.push(p);
                normals.push(p.normalize_or_zero());
                uvs.push(Vec2::new(u, 1.0 - v));
            }
            grid.push(row);
        }

        let mut indices = Vec::new();
        for iy in 0..hs as usize {
            for ix in 0..ws as usize {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        let mut geometry = Self::from_triangles(positions, normals, uvs, indices);
        geometry.primitive = Some(Primitive::Sphere {
            radius,
            width_segments: ws,
            height_segments: hs,
        });
        geometry
    }

    /// (p, q) torus knot swept with a circular tube
    pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> Self {
        Self::torus_knot_pq(radius, tube, tubular_segments, radial_segments, 2, 3)
    }

    pub fn torus_knot_pq(
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    ) -> Self {
        let curve = |u: f32| {
            let qu_over_p = q as f32 / p as f32 * u;
            let cs = qu_over_p.cos();
            Vec3::new(
                radius * (2.0 + cs) * 0.5 * u.cos(),
                radius * (2.0 + cs) * u.sin() * 0.5,
                radius * qu_over_p.sin() * 0.5,
            )
        };

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();

        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
            let p1 = curve(u);
            let p2 = curve(u + 0.01);
            let tangent = p2 - p1;
            let mut n = p2 + p1;
            let binormal = tangent.cross(n);
            n = binormal.cross(tangent);
            let binormal = binormal.normalize_or_zero();
            let n = n.normalize_or_zero();

            for j in 0..=radial_segments {
                let v = j as f32 / radial_segments as f32 * TAU;
                let cx = -tube * v.cos();
                let cy = tube * v.sin();
                let vertex = p1 + n * cx + binormal * cy;
                positions.push(vertex);
                normals.push((vertex - p1).normalize_or_zero());
                uvs.push(Vec2::new(
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ));
            }
        }

        let mut indices = Vec::new();
        let stride = radial_segments + 1;
        for j in 1..=tubular_segments {
            for i in 1..=radial_segments {
                let a = stride * (j - 1) + (i - 1);
                let b = stride * j + (i - 1);
                let c = stride * j + i;
                let d = stride * (j - 1) + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        let mut geometry = Self::from_triangles(positions, normals, uvs, indices);
        geometry.primitive = Some(Primitive::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        });
        geometry
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Triangles as vertex triples, skipping out-of-range indices
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                *self.positions.get(tri[0] as usize)?,
                *self.positions.get(tri[1] as usize)?,
                *self.positions.get(tri[2] as usize)?,
            ])
        })
    }
}
