// Host-side tests for the gift box.

use card_core::constants::*;
use card_core::gift::{BOW_Y, LID_Y};
use card_core::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

fn gift() -> GiftBox {
    GiftBox::new(GiftBoxConfig::default(), &mut SmallRng::seed_from_u64(9))
}

fn run(gift: &mut GiftBox, frames: u64) {
    for n in 1..=frames {
        gift.advance(Duration::from_micros(16_667 * n));
    }
}

#[test]
fn closed_box_spins_slowly() {
    let mut g = gift();
    run(&mut g, 10);
    assert_eq!(g.phase(), GiftPhase::Closed);
    assert!((g.spin() - 10.0 * GIFT_SPIN_PER_FRAME).abs() < 1e-6);
    assert!(g.body().transform.translation.y.abs() <= GIFT_BOB_AMPLITUDE);
}

#[test]
fn opening_takes_fifty_frames() {
    let mut g = gift();
    assert!(g.open());
    run(&mut g, 25);
    assert_eq!(g.phase(), GiftPhase::Opening);
    assert!((g.progress() - 0.5).abs() < 1e-6);

    run(&mut g, 25);
    assert_eq!(g.phase(), GiftPhase::Open);
    assert_eq!(g.progress(), 1.0);

    run(&mut g, 20);
    assert_eq!(g.progress(), 1.0);
}

#[test]
fn lid_rises_and_tips_with_progress() {
    let mut g = gift();
    g.open();
    run(&mut g, GIFT_OPEN_FRAMES as u64);
    let lid = g.lid().transform.translation.y;
    assert!((lid - (LID_Y + GIFT_LID_RISE)).abs() < 1e-5);
    let (tip, _, _) = g.lid().transform.rotation.to_euler(glam::EulerRot::XYZ);
    assert!((tip - GIFT_LID_TIP).abs() < 1e-3);
    assert!(g.bow().transform.translation.y > lid);
}

#[test]
fn lid_height_ignores_the_last_bob_once_opening() {
    let mut g = gift();
    // a second in, the box is well off its rest height
    run(&mut g, 60);
    assert!(g.body().transform.translation.y.abs() > 0.01);
    g.open();
    run(&mut g, 1);
    let progress = g.progress();
    let lid = g.lid().transform.translation.y;
    let bow = g.bow().transform.translation.y;
    assert!((lid - (LID_Y + GIFT_LID_RISE * progress)).abs() < 1e-5);
    assert!((bow - (BOW_Y + GIFT_LID_RISE * progress)).abs() < 1e-5);

    run(&mut g, GIFT_OPEN_FRAMES as u64);
    assert!((g.lid().transform.translation.y - (LID_Y + GIFT_LID_RISE)).abs() < 1e-5);
    assert!((g.bow().transform.translation.y - (BOW_Y + GIFT_LID_RISE)).abs() < 1e-5);
}

#[test]
fn spin_stops_once_opening() {
    let mut g = gift();
    run(&mut g, 5);
    g.open();
    let spin = g.spin();
    run(&mut g, 5);
    assert_eq!(g.spin(), spin);
}

#[test]
fn second_open_is_ignored() {
    let mut g = gift();
    assert!(g.open());
    run(&mut g, 10);
    assert!(!g.open());
    assert_eq!(g.phase(), GiftPhase::Opening);
    assert!((g.progress() - 10.0 / GIFT_OPEN_FRAMES as f32).abs() < 1e-6);
}

#[test]
fn hover_eases_toward_the_target_scale() {
    let mut g = gift();
    g.set_hovered(true);
    run(&mut g, 1);
    assert!((g.scale() - (1.0 + (GIFT_HOVER_SCALE - 1.0) * GIFT_HOVER_LERP)).abs() < 1e-6);
    run(&mut g, 200);
    assert!((g.scale() - GIFT_HOVER_SCALE).abs() < 1e-4);

    g.set_hovered(false);
    run(&mut g, 200);
    assert!((g.scale() - 1.0).abs() < 1e-4);
}

#[test]
fn hover_still_applies_after_opening() {
    let mut g = gift();
    g.open();
    run(&mut g, GIFT_OPEN_FRAMES as u64);
    g.set_hovered(true);
    run(&mut g, 1);
    assert!(g.scale() > 1.0);
}

#[test]
fn center_of_the_screen_picks_the_box() {
    let mut g = gift();
    g.set_aspect(800.0 / 600.0);
    run(&mut g, 1);
    let (origin, dir) = g.camera().screen_ray(400.0, 300.0, 800.0, 600.0);
    assert!(g.pick(origin, dir));
    let (origin, dir) = g.camera().screen_ray(0.0, 0.0, 800.0, 600.0);
    assert!(!g.pick(origin, dir));
}

#[test]
fn gift_frame_keeps_the_page_visible() {
    let mut g = gift();
    run(&mut g, 1);
    let frame = g.frame();
    assert!(frame.background.is_none());
    assert_eq!(frame.node_sets.len(), 1);
    assert_eq!(frame.node_sets[0].nodes.len(), 5);
    assert_eq!(frame.clouds.len(), 1);
    assert_eq!(frame.clouds[0].buffer.len(), 200);
}
