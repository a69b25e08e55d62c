//! Drawing the scene: the renderer seam plus the CPU-side frame plan.

mod gpu;
mod uniforms;

pub use gpu::GpuRenderer;
pub use uniforms::{DrawUniform, GlobalUniform, LightUniform, Vertex, MAX_LIGHTS};

use crate::camera::PerspectiveCamera;
use crate::scene::{DrawItem, Scene};

/// Anything that can put a scene on screen, once per tick
pub trait FrameRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()>;

    fn resize(&mut self, width: u32, height: u32);
}

#[derive(Debug, Clone, Copy)]
pub struct DrawCall {
    pub item: DrawItem,
    pub blended: bool,
    /// Distance from the camera to the mesh origin
    pub depth: f32,
}

/// Opaque meshes in scene order, then blended ones from far to near
pub fn plan_draws(scene: &Scene, camera: &PerspectiveCamera) -> Vec<DrawCall> {
    let (mut opaque, mut blended): (Vec<DrawCall>, Vec<DrawCall>) = scene
        .collect_draws()
        .into_iter()
        .filter(|item| scene.geometry(item.mesh.geometry).is_some_and(|g| g.triangle_count() > 0))
        .filter_map(|item| {
            let material = scene.material(item.mesh.material)?;
            let origin = item.world.transform_point3(glam::Vec3::ZERO);
            Some(DrawCall {
                item,
                blended: material.is_blended(),
                depth: origin.distance(camera.position),
            })
        })
        .partition(|call| !call.blended);

    blended.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    opaque.append(&mut blended);
    opaque
}
