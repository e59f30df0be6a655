//! Procedural unit meshes. Every [`Shape`](crate::scene::Shape) is drawn as
//! one of these, scaled per axis.
//!
//! All meshes are centered on the origin, wound counter-clockwise when seen
//! from outside, and carry per-vertex normals and UVs.

use crate::scene::MeshKind;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

pub const CYLINDER_SEGMENTS: u32 = 48;
pub const CONE_SEGMENTS: u32 = 16;
pub const SPHERE_STACKS: u32 = 16;
pub const SPHERE_SLICES: u32 = 24;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

pub fn unit_mesh(kind: MeshKind) -> MeshData {
    match kind {
        MeshKind::Box => unit_box(),
        MeshKind::Cylinder => unit_cylinder(CYLINDER_SEGMENTS),
        MeshKind::Cone => unit_cone(CONE_SEGMENTS),
        MeshKind::Sphere => unit_sphere(SPHERE_STACKS, SPHERE_SLICES),
        MeshKind::Plane => unit_plane(),
    }
}

/// 1×1×1 cube.
pub fn unit_box() -> MeshData {
    // (normal, u axis, v axis) with u × v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let base = mesh.base();
        let center = n * 0.5;
        let corners = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
        for (cu, cv) in corners {
            let p = center + u * cu + v * cv;
            mesh.vertices
                .push(Vertex::new(p, n, Vec2::new(cu + 0.5, 0.5 - cv)));
        }
        mesh.quad(base, base + 1, base + 2, base + 3);
    }
    mesh
}

/// Unit square in the XY plane facing +Z. UV (0, 0) is the top-left corner
/// so images map upright.
pub fn unit_plane() -> MeshData {
    let mut mesh = MeshData::default();
    let corners = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
    for (x, y) in corners {
        mesh.vertices.push(Vertex::new(
            Vec3::new(x, y, 0.0),
            Vec3::Z,
            Vec2::new(x + 0.5, 0.5 - y),
        ));
    }
    mesh.quad(0, 1, 2, 3);
    mesh
}

/// Radius 1, height 1 (y in [-0.5, 0.5]), capped.
pub fn unit_cylinder(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();

    let side = mesh.base();
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let (s, c) = (t * TAU).sin_cos();
        let n = Vec3::new(c, 0.0, s);
        mesh.vertices
            .push(Vertex::new(Vec3::new(c, -0.5, s), n, Vec2::new(t, 1.0)));
        mesh.vertices
            .push(Vertex::new(Vec3::new(c, 0.5, s), n, Vec2::new(t, 0.0)));
    }
    for i in 0..segments {
        let b0 = side + i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        mesh.indices.extend_from_slice(&[b0, t0, b1, b1, t0, t1]);
    }

    push_cap(&mut mesh, segments, 0.5, true);
    push_cap(&mut mesh, segments, -0.5, false);
    mesh
}

/// Base radius 1 at y = -0.5, apex at y = 0.5.
pub fn unit_cone(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();
    let apex = Vec3::new(0.0, 0.5, 0.0);
    let slant = |angle: f32| {
        let (s, c) = angle.sin_cos();
        Vec3::new(c, 1.0, s).normalize()
    };

    for i in 0..segments {
        let t0 = i as f32 / segments as f32;
        let t1 = (i + 1) as f32 / segments as f32;
        let (a0, a1) = (t0 * TAU, t1 * TAU);
        let base = mesh.base();
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(c0, -0.5, s0),
            slant(a0),
            Vec2::new(t0, 1.0),
        ));
        mesh.vertices.push(Vertex::new(
            apex,
            slant((a0 + a1) * 0.5),
            Vec2::new((t0 + t1) * 0.5, 0.0),
        ));
        mesh.vertices.push(Vertex::new(
            Vec3::new(c1, -0.5, s1),
            slant(a1),
            Vec2::new(t1, 1.0),
        ));
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    push_cap(&mut mesh, segments, -0.5, false);
    mesh
}

/// Radius 1 UV sphere.
pub fn unit_sphere(stacks: u32, slices: u32) -> MeshData {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut mesh = MeshData::default();
    for y in 0..=stacks {
        let v = y as f32 / stacks as f32;
        let phi = v * PI;
        for x in 0..=slices {
            let u = x as f32 / slices as f32;
            let theta = u * TAU;
            let p = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.vertices.push(Vertex::new(p, p, Vec2::new(u, v)));
        }
    }
    let row = slices + 1;
    for y in 0..stacks {
        for x in 0..slices {
            let a = y * row + x;
            let b = a + row;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

fn push_cap(mesh: &mut MeshData, segments: u32, y: f32, facing_up: bool) {
    let n = if facing_up { Vec3::Y } else { Vec3::NEG_Y };
    let center = mesh.base();
    mesh.vertices.push(Vertex::new(
        Vec3::new(0.0, y, 0.0),
        n,
        Vec2::splat(0.5),
    ));
    for i in 0..=segments {
        let (s, c) = (i as f32 / segments as f32 * TAU).sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(c, y, s),
            n,
            Vec2::new(0.5 + c * 0.5, 0.5 + s * 0.5),
        ));
    }
    for i in 0..segments {
        let r0 = center + 1 + i;
        let r1 = r0 + 1;
        if facing_up {
            mesh.indices.extend_from_slice(&[center, r1, r0]);
        } else {
            mesh.indices.extend_from_slice(&[center, r0, r1]);
        }
    }
}
