// Host-side checks on page and scene constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use card_core::constants as scene;

#[test]
fn element_ids_are_distinct() {
    let ids = [
        constants::GIFT_CONTAINER_ID,
        constants::GIFT_TITLE_ID,
        constants::GIFT_SUBTITLE_ID,
        constants::GIFT_OPEN_ID,
        constants::CAKE_CONTAINER_ID,
        constants::CONTENT_ID,
        constants::MESSAGE_ID,
        constants::GALLERY_ID,
        constants::GALLERY_INPUT_ID,
        constants::PREVIEW_ID,
        constants::MUSIC_INPUT_ID,
        constants::MUSIC_PLAY_ID,
        constants::MUSIC_MUTE_ID,
        constants::MUSIC_TRACK_ID,
        constants::TOAST_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(ids[i + 1..].iter().all(|b| a != b), "duplicate id {}", a);
    }
}

#[test]
fn canvas_limits_are_sane() {
    assert!(constants::PHOTO_TEXTURE_MAX_SIDE <= constants::CANVAS_MAX_SIDE);
    assert!(constants::TOAST_DURATION_MS > 0);
    assert!(!constants::DEFAULT_DISPLAY_NAME.is_empty());
}

#[test]
fn camera_range_contains_the_default() {
    assert!(scene::CAMERA_DISTANCE_MIN < scene::CAMERA_DISTANCE_DEFAULT);
    assert!(scene::CAMERA_DISTANCE_DEFAULT < scene::CAMERA_DISTANCE_MAX);
}

#[test]
fn photo_exclusion_fits_on_the_table() {
    let corner = scene::PHOTO_SCATTER_HALF_EXTENT * std::f32::consts::SQRT_2;
    assert!(scene::PHOTO_EXCLUSION_RADIUS < scene::PHOTO_SCATTER_HALF_EXTENT);
    assert!(corner > scene::PHOTO_EXCLUSION_RADIUS);
    assert!(scene::ORBIT_PITCH_LIMIT < std::f32::consts::FRAC_PI_2);
}
