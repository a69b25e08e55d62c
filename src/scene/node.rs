use glam::{EulerRot, Mat4, Quat, Vec3};

use super::light::Light;
use super::{GeometryId, MaterialId, NodeId};

/// Local transform relative to the parent node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    pub geometry: GeometryId,
    pub material: MaterialId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    Mesh(Mesh),
    Light(Light),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: Option<String>,
    pub transform: Transform,
    pub kind: NodeKind,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Eligible for click-to-toggle
    pub interactive: bool,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            name: None,
            transform: Transform::IDENTITY,
            kind,
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            interactive: true,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group() -> Self {
        Self::with_kind(NodeKind::Group)
    }

    pub fn mesh(geometry: GeometryId, material: MaterialId) -> Self {
        Self::with_kind(NodeKind::Mesh(Mesh { geometry, material }))
    }

    pub fn light(light: Light) -> Self {
        Self::with_kind(NodeKind::Light(light))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_transform_matrix_order() {
        // Scale, then rotate, then translate
        let t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
            .with_scale(Vec3::splat(2.0));
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_euler_xyz_matches_nested_rotations() {
        let t = Transform::IDENTITY.with_rotation(Vec3::new(0.3, 0.5, 0.7));
        let expected = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(0.5) * Mat4::from_rotation_z(0.7);
        let p = Vec3::new(1.0, 2.0, 3.0);
        let delta = t.matrix().transform_point3(p) - expected.transform_point3(p);
        assert!(delta.length() < 1e-5);
    }

    #[test]
    fn test_node_defaults() {
        let node = Node::group();
        assert!(node.visible);
        assert!(node.interactive);
        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
        assert!(!Node::group().non_interactive().interactive);
    }
}
