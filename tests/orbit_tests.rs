// Host-side tests for the drag/zoom orbit.

use card_core::constants::*;
use card_core::*;
use glam::{Vec2, Vec3};

#[test]
fn drag_right_turns_yaw_and_leaves_pitch() {
    let mut orbit = OrbitController::default();
    orbit.pointer_down(Vec2::new(100.0, 200.0));
    let mut last = orbit.state.yaw;
    for step in 1..=100 {
        orbit.pointer_move(Vec2::new(100.0 + step as f32 * 10.0, 200.0));
        assert!(orbit.state.yaw > last);
        last = orbit.state.yaw;
    }
    assert!((orbit.state.yaw - 1000.0 * ORBIT_DRAG_SENSITIVITY).abs() < 1e-4);
    assert_eq!(orbit.state.pitch, 0.0);
}

#[test]
fn pitch_is_clamped_both_ways() {
    let mut orbit = OrbitController::default();
    orbit.pointer_down(Vec2::ZERO);
    orbit.pointer_move(Vec2::new(0.0, 10_000.0));
    assert!((orbit.state.pitch - ORBIT_PITCH_LIMIT).abs() < 1e-6);
    orbit.pointer_move(Vec2::new(0.0, -10_000.0));
    assert!((orbit.state.pitch + ORBIT_PITCH_LIMIT).abs() < 1e-6);
}

#[test]
fn moves_without_a_press_are_ignored() {
    let params = OrbitParams::default();
    let state = OrbitState::default();
    let next = transition(state, OrbitInput::PointerMove(Vec2::new(500.0, 500.0)), &params);
    assert_eq!(next, state);
}

#[test]
fn release_ends_the_drag() {
    let mut orbit = OrbitController::default();
    orbit.pointer_down(Vec2::ZERO);
    assert!(orbit.is_dragging());
    orbit.pointer_up();
    assert!(!orbit.is_dragging());
    let yaw = orbit.state.yaw;
    orbit.pointer_move(Vec2::new(300.0, 0.0));
    assert_eq!(orbit.state.yaw, yaw);
}

#[test]
fn idle_rotation_only_when_not_dragging() {
    let mut orbit = OrbitController::default();
    orbit.idle_step();
    orbit.idle_step();
    assert!((orbit.state.yaw - 2.0 * IDLE_YAW_PER_FRAME).abs() < 1e-7);

    orbit.pointer_down(Vec2::ZERO);
    let yaw = orbit.state.yaw;
    orbit.idle_step();
    assert_eq!(orbit.state.yaw, yaw);
}

#[test]
fn new_press_does_not_jump() {
    let mut orbit = OrbitController::default();
    orbit.pointer_down(Vec2::ZERO);
    orbit.pointer_move(Vec2::new(50.0, 0.0));
    orbit.pointer_up();
    let yaw = orbit.state.yaw;
    orbit.pointer_down(Vec2::new(400.0, 400.0));
    orbit.pointer_move(Vec2::new(400.0, 400.0));
    assert_eq!(orbit.state.yaw, yaw);
}

#[test]
fn wheel_zoom_is_clamped() {
    let mut orbit = OrbitController::default();
    assert_eq!(orbit.distance(), CAMERA_DISTANCE_DEFAULT);
    orbit.wheel(1000.0);
    assert!((orbit.distance() - (CAMERA_DISTANCE_DEFAULT + 1.0)).abs() < 1e-5);
    orbit.wheel(1e7);
    assert_eq!(orbit.distance(), CAMERA_DISTANCE_MAX);
    orbit.wheel(-1e7);
    assert_eq!(orbit.distance(), CAMERA_DISTANCE_MIN);
}

#[test]
fn zoom_works_mid_drag() {
    let mut orbit = OrbitController::default();
    orbit.pointer_down(Vec2::ZERO);
    orbit.wheel(-2000.0);
    assert!(orbit.is_dragging());
    assert!((orbit.distance() - (CAMERA_DISTANCE_DEFAULT - 2.0)).abs() < 1e-5);
}

#[test]
fn root_matrix_applies_yaw_then_pitch() {
    let mut orbit = OrbitController::default();
    orbit.state.yaw = std::f32::consts::FRAC_PI_2;
    let p = orbit.root_matrix().transform_point3(Vec3::X);
    assert!(p.distance(Vec3::new(0.0, 0.0, -1.0)) < 1e-5);
}

#[test]
fn zoom_keeps_the_cake_view_direction() {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    let mut cake = CakeScene::new(
        &CakeSceneConfig::classic(),
        "x",
        &mut SmallRng::seed_from_u64(2),
    );
    cake.advance(Duration::ZERO);
    let before = (cake.camera().target - cake.camera().eye).normalize();
    cake.wheel(-4000.0);
    cake.advance(Duration::from_millis(16));
    let after = (cake.camera().target - cake.camera().eye).normalize();
    assert!(before.distance(after) < 1e-6);
    assert_eq!(cake.camera().eye.y, CAMERA_HEIGHT);
    assert!((cake.camera().eye.z - (CAMERA_DISTANCE_DEFAULT - 4.0)).abs() < 1e-5);
}

#[test]
fn cake_camera_follows_zoom() {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    let mut cake = CakeScene::new(
        &CakeSceneConfig::classic(),
        "x",
        &mut SmallRng::seed_from_u64(1),
    );
    cake.wheel(3000.0);
    cake.advance(Duration::from_millis(16));
    assert_eq!(cake.camera().eye, Vec3::new(0.0, CAMERA_HEIGHT, 15.0));
    assert!(cake.orbit().state.yaw > 0.0);
}
