//! wgpu renderer for card scenes. Every node is an instance of one of a
//! handful of unit meshes; particle clouds are drawn as camera-facing sprites.

mod gpu;
pub mod helpers;
pub mod meshes;
pub mod packing;
pub mod textures;

pub use gpu::SceneRenderer;
pub use packing::{pack_lights, pack_particles, Globals, InstanceData, ParticleInstance};

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
