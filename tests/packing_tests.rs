// Host-side tests for the CPU side of GPU uploads.

use card_core::constants::MAX_POINT_LIGHTS;
use card_core::*;
use card_render::helpers::grow_capacity;
use card_render::packing::mesh_matrix;
use card_render::*;
use glam::{Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn camera() -> Camera {
    Camera::cake_rig(12.0, 16.0 / 9.0)
}

#[test]
fn point_lights_beyond_the_limit_are_dropped() {
    let mut lights = vec![
        Light::ambient(Color::WHITE, 0.5),
        Light::ambient(Color::WHITE, 0.25),
        Light::directional(Vec3::new(0.0, 10.0, 0.0), Color::WHITE, 1.0),
        Light::directional(Vec3::new(10.0, 0.0, 0.0), Color::WHITE, 1.0),
    ];
    for i in 0..12 {
        lights.push(Light::point(Vec3::X * i as f32, 3.0, Color::WHITE, 1.0));
    }
    let g = Globals::new(&camera(), &lights);
    assert_eq!(g.point_count(), MAX_POINT_LIGHTS);
    assert!((g.ambient[0] - 0.75).abs() < 1e-6);
    // the first directional light wins
    assert_eq!(&g.sun_dir[..3], &[0.0, 1.0, 0.0]);
    assert_eq!(g.points[7].position_range, [7.0, 0.0, 0.0, 3.0]);
}

#[test]
fn scene_without_lights_packs_zeroes() {
    let g = Globals::new(&camera(), &[]);
    assert_eq!(g.point_count(), 0);
    assert_eq!(g.sun_color, [0.0; 4]);
}

#[test]
fn cake_lights_fit_in_the_uniform() {
    let scene = build_cake_scene(&CakeSceneConfig::festive(), "x");
    let points = scene
        .lights
        .iter()
        .filter(|l| matches!(l.kind, LightKind::Point { .. }))
        .count();
    let g = Globals::new(&camera(), &scene.lights);
    assert_eq!(g.point_count(), points.min(MAX_POINT_LIGHTS));
}

#[test]
fn instance_carries_material_and_world_transform() {
    let material = Material::basic(Color::hex(0xff6600), 0.4);
    let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let inst = InstanceData::new(world, &material);
    assert_eq!(inst.translation(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(inst.color[3], 0.4);
    assert_eq!(inst.surface[3], 1.0);
    assert_eq!(inst.normal[0], [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn mesh_matrix_scales_the_unit_mesh() {
    let node = SceneNode::new(
        "tier",
        Shape::Cylinder {
            radius: 2.0,
            height: 0.5,
        },
        Material::standard(Color::WHITE, 0.5, 0.0),
        Transform::IDENTITY,
    );
    let m = mesh_matrix(Mat4::IDENTITY, &node);
    let rim = m.transform_point3(Vec3::new(1.0, 0.5, 0.0));
    assert!(rim.distance(Vec3::new(2.0, 0.25, 0.0)) < 1e-6);
}

#[test]
fn particles_pack_position_size_and_color() {
    let field = SparkleField::new(&SparkleConfig::default(), &mut SmallRng::seed_from_u64(5));
    let mut out = vec![];
    pack_particles(field.buffer(), &mut out);
    assert_eq!(out.len(), field.buffer().len());
    let p = field.buffer().positions[0];
    assert_eq!(out[0].center_size, [p.x, p.y, p.z, field.buffer().size]);
    assert_eq!(out[0].color[3], 1.0);

    pack_particles(field.buffer(), &mut out);
    assert_eq!(out.len(), field.buffer().len());
}

#[test]
fn buffers_grow_in_powers_of_two() {
    assert_eq!(grow_capacity(0), 16);
    assert_eq!(grow_capacity(17), 32);
    assert_eq!(grow_capacity(300), 512);
}
