//! Renderer-independent scene description.
//!
//! A scene is a flat list of [`SceneNode`]s. Hierarchy is expressed through
//! `parent` indices and every parent precedes its children, so world
//! matrices can be resolved in a single forward pass.

use crate::color::Color;
use crate::label::LabelSpec;
use glam::{EulerRot, Mat4, Quat, Vec3};

pub type NodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    /// Intrinsic X, then Y, then Z rotation.
    pub fn with_euler(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unit meshes shared by every node; a [`Shape`] maps onto one of these plus
/// a per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Box,
    Cylinder,
    Cone,
    Sphere,
    Plane,
}

impl MeshKind {
    pub const ALL: [MeshKind; 5] = [
        MeshKind::Box,
        MeshKind::Cylinder,
        MeshKind::Cone,
        MeshKind::Sphere,
        MeshKind::Plane,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Transform-only node used to group children.
    Group,
    Box { size: Vec3 },
    Cylinder { radius: f32, height: f32 },
    Cone { radius: f32, height: f32 },
    Sphere { radius: f32 },
    /// XY plane facing +Z.
    Plane { width: f32, height: f32 },
}

impl Shape {
    pub fn mesh_kind(&self) -> Option<MeshKind> {
        match self {
            Shape::Group => None,
            Shape::Box { .. } => Some(MeshKind::Box),
            Shape::Cylinder { .. } => Some(MeshKind::Cylinder),
            Shape::Cone { .. } => Some(MeshKind::Cone),
            Shape::Sphere { .. } => Some(MeshKind::Sphere),
            Shape::Plane { .. } => Some(MeshKind::Plane),
        }
    }

    /// Scale that maps the unit mesh of [`Shape::mesh_kind`] onto this shape.
    pub fn unit_scale(&self) -> Vec3 {
        match *self {
            Shape::Group => Vec3::ONE,
            Shape::Box { size } => size,
            Shape::Cylinder { radius, height } | Shape::Cone { radius, height } => {
                Vec3::new(radius, height, radius)
            }
            Shape::Sphere { radius } => Vec3::splat(radius),
            Shape::Plane { width, height } => Vec3::new(width, height, 1.0),
        }
    }
}

/// Identifies a texture the host has to produce (rasterize or decode).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Plaque,
    Banner,
    Photo { generation: u64, slot: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: f32,
    pub opacity: f32,
    /// Skip lighting entirely (flames, glows).
    pub unlit: bool,
    pub texture: Option<TextureKey>,
}

impl Material {
    pub fn standard(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            emissive: 0.0,
            opacity: 1.0,
            unlit: false,
            texture: None,
        }
    }

    pub fn basic(color: Color, opacity: f32) -> Self {
        Self {
            unlit: true,
            opacity,
            ..Self::standard(color, 1.0, 0.0)
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_texture(mut self, key: TextureKey) -> Self {
        self.texture = Some(key);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// What the animation loop needs to know about a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTag {
    Static,
    Flame,
    FlameGlow,
    Plaque,
    Banner,
    PhotoFrame,
    PhotoPane,
    GiftBody,
    GiftRibbon,
    GiftLid,
    GiftBow,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: &'static str,
    pub tag: NodeTag,
    pub parent: Option<NodeId>,
    pub transform: Transform,
    pub shape: Shape,
    pub material: Material,
}

impl SceneNode {
    pub fn new(name: &'static str, shape: Shape, material: Material, transform: Transform) -> Self {
        Self {
            name,
            tag: NodeTag::Static,
            parent: None,
            transform,
            shape,
            material,
        }
    }

    pub fn group(name: &'static str, transform: Transform) -> Self {
        Self::new(
            name,
            Shape::Group,
            Material::standard(Color::WHITE, 1.0, 0.0),
            transform,
        )
    }

    pub fn tagged(mut self, tag: NodeTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn child_of(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Light travels from `position` towards the origin.
    Directional { position: Vec3 },
    Point { position: Vec3, range: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn directional(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional { position },
            color,
            intensity,
        }
    }

    pub fn point(position: Vec3, range: f32, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point { position, range },
            color,
            intensity,
        }
    }
}

/// Immutable output of a scene builder; the renderer instantiates GPU
/// objects from it.
#[derive(Clone, Debug, Default)]
pub struct SceneDescription {
    pub nodes: Vec<SceneNode>,
    pub lights: Vec<Light>,
    /// Textures that are rasterized from text rather than decoded.
    pub labels: Vec<(TextureKey, LabelSpec)>,
    /// `None` keeps the surface transparent (page shows through).
    pub background: Option<Color>,
}

impl SceneDescription {
    pub fn push(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn tagged(&self, tag: NodeTag) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.tag == tag)
            .map(|(i, _)| i)
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// Resolve world matrices for `nodes` under `root` into `out` (cleared first).
/// A parent index that does not precede its child falls back to `root`.
pub fn compute_world_matrices(nodes: &[SceneNode], root: Mat4, out: &mut Vec<Mat4>) {
    out.clear();
    for (i, node) in nodes.iter().enumerate() {
        let parent = match node.parent {
            Some(p) if p < i => out[p],
            _ => root,
        };
        out.push(parent * node.transform.matrix());
    }
}
