//! GPU-side layouts and the CPU code that fills them.

use card_core::animation::Cloud;
use card_core::constants::MAX_POINT_LIGHTS;
use card_core::particles::ParticleBuffer;
use card_core::scene::{Light, LightKind, Material, SceneNode};
use card_core::state::Camera;
use glam::{Mat3, Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    pub position_range: [f32; 4],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub ambient: [f32; 4],
    pub sun_dir: [f32; 4],
    pub sun_color: [f32; 4],
    pub points: [PointLightRaw; MAX_POINT_LIGHTS],
}

impl Globals {
    pub fn new(camera: &Camera, lights: &[Light]) -> Self {
        let mut g = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: [0.0; 4],
            sun_dir: [0.0; 4],
            sun_color: [0.0; 4],
            points: [PointLightRaw::default(); MAX_POINT_LIGHTS],
        };
        pack_lights(lights, &mut g);
        g
    }

    pub fn point_count(&self) -> usize {
        self.ambient[3] as usize
    }
}

/// Ambient lights are summed, the first directional light becomes the sun,
/// point lights beyond [`MAX_POINT_LIGHTS`] are dropped.
pub fn pack_lights(lights: &[Light], g: &mut Globals) {
    let mut ambient = Vec3::ZERO;
    let mut points = 0usize;
    let mut sun = false;
    for light in lights {
        let rgb = Vec3::from(light.color.to_array()) * light.intensity;
        match light.kind {
            LightKind::Ambient => ambient += rgb,
            LightKind::Directional { position } if !sun => {
                sun = true;
                g.sun_dir = position.normalize_or_zero().extend(1.0).to_array();
                g.sun_color = rgb.extend(1.0).to_array();
            }
            LightKind::Directional { .. } => {}
            LightKind::Point { position, range } if points < MAX_POINT_LIGHTS => {
                g.points[points] = PointLightRaw {
                    position_range: position.extend(range).to_array(),
                    color: rgb.extend(1.0).to_array(),
                };
                points += 1;
            }
            LightKind::Point { .. } => {}
        }
    }
    g.ambient = ambient.extend(points as f32).to_array();
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
    pub color: [f32; 4],
    /// roughness, metalness, emissive, unlit
    pub surface: [f32; 4],
}

impl InstanceData {
    pub fn new(world: Mat4, material: &Material) -> Self {
        let n = Mat3::from_mat4(world).inverse().transpose();
        Self {
            model: world.to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
            color: material.color.with_alpha(material.opacity),
            surface: [
                material.roughness,
                material.metalness,
                material.emissive,
                if material.unlit { 1.0 } else { 0.0 },
            ],
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::from_slice(&self.model[3][..3])
    }
}

/// World matrix of the node's unit mesh.
pub fn mesh_matrix(node_world: Mat4, node: &SceneNode) -> Mat4 {
    node_world * Mat4::from_scale(node.shape.unit_scale())
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub right: [f32; 4],
    pub up: [f32; 4],
    pub params: [f32; 4],
}

impl CloudUniform {
    pub fn new(camera: &Camera, cloud: &Cloud<'_>) -> Self {
        let view = camera.view_matrix();
        // Rows of the view rotation are the camera axes in world space.
        let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: cloud.model().to_cols_array_2d(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
            params: [cloud.buffer.opacity, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub center_size: [f32; 4],
    pub color: [f32; 4],
}

pub fn pack_particles(buffer: &ParticleBuffer, out: &mut Vec<ParticleInstance>) {
    out.clear();
    out.extend(
        buffer
            .positions
            .iter()
            .zip(buffer.colors.iter())
            .map(|(p, c)| ParticleInstance {
                center_size: p.extend(buffer.size).to_array(),
                color: [c[0], c[1], c[2], 1.0],
            }),
    );
}
