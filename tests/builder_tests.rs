// Host-side tests for the cake scene builder.

use card_core::constants::*;
use card_core::*;
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;

fn named<'a>(scene: &'a SceneDescription, name: &str) -> Vec<&'a SceneNode> {
    scene.nodes.iter().filter(|n| n.name == name).collect()
}

fn label(scene: &SceneDescription, key: TextureKey) -> Option<&LabelSpec> {
    scene.labels.iter().find(|(k, _)| *k == key).map(|(_, l)| l)
}

#[test]
fn rosettes_are_evenly_spaced_on_each_tier_rim() {
    let config = CakeSceneConfig::festive();
    let scene = build_cake_scene(&config, "Ana");
    let (placed, _) = stack_tiers(&config.tiers);
    let rosettes = named(&scene, "rosette");

    let mut offset = 0;
    for (spec, at) in config.tiers.iter().zip(placed.iter()) {
        let n = spec.rosettes;
        for i in 0..n {
            let theta = TAU * i as f32 / n as f32;
            let expected = Vec3::new(spec.radius * theta.cos(), at.top, spec.radius * theta.sin());
            let got = rosettes[offset + i].transform.translation;
            assert!(
                got.distance(expected) < 1e-4,
                "rosette {} of {}: {:?} != {:?}",
                i,
                n,
                got,
                expected
            );
        }
        offset += n;
    }
    assert_eq!(offset, rosettes.len());
}

#[test]
fn ring_positions_handles_zero_count() {
    assert_eq!(ring_positions(1.0, 0.0, 0).count(), 0);
    let first: Vec<Vec3> = ring_positions(2.0, 0.5, 4).collect();
    assert!(first[0].distance(Vec3::new(2.0, 0.5, 0.0)) < 1e-5);
    assert!(first[1].distance(Vec3::new(0.0, 0.5, 2.0)) < 1e-5);
}

#[test]
fn tiers_stack_from_the_table_with_frosting_between() {
    let config = CakeSceneConfig::classic();
    let (placed, top) = stack_tiers(&config.tiers);
    assert_eq!(placed.len(), 3);
    assert!((placed[0].bottom - TABLE_TOP_Y).abs() < 1e-6);
    for (pair, spec) in placed.windows(2).zip(config.tiers.iter()) {
        let below = pair[0];
        let above = pair[1];
        assert!((above.bottom - (below.top + spec.frosting)).abs() < 1e-5);
        assert!(above.radius < below.radius);
    }
    let last = config.tiers.last().unwrap();
    assert!((top - (placed[2].top + last.frosting)).abs() < 1e-5);
}

#[test]
fn classic_layout_counts() {
    let config = CakeSceneConfig::classic();
    let scene = build_cake_scene(&config, "Ana");
    assert_eq!(named(&scene, "tier").len(), 3);
    assert_eq!(named(&scene, "rosette").len(), 24 + 20 + 16);
    assert_eq!(named(&scene, "candle").len(), 5);
    assert_eq!(named(&scene, "wick").len(), 5);
    assert_eq!(scene.tagged(NodeTag::Flame).count(), 5);
    assert_eq!(scene.tagged(NodeTag::FlameGlow).count(), 5);
    assert_eq!(named(&scene, "strawberry").len(), 4);
    assert_eq!(named(&scene, "table-leg").len(), 4);
    assert!(named(&scene, "pearl").is_empty());
    assert!(scene.find("wall").is_none());
    assert!(scene.find("balloon").is_none());
    assert!(label(&scene, TextureKey::Banner).is_none());
    assert!(config.confetti.is_none());
}

#[test]
fn festive_adds_wall_banner_balloons_and_pearls() {
    let config = CakeSceneConfig::festive();
    let scene = build_cake_scene(&config, "Ana");
    assert_eq!(named(&scene, "rosette").len(), 36 + 30 + 24);
    assert_eq!(named(&scene, "pearl").len(), 48 + 40 + 32);
    assert_eq!(named(&scene, "balloon").len(), 6);
    assert_eq!(named(&scene, "balloon-string").len(), 6);
    assert!(scene.find("wall").is_some());
    assert_eq!(scene.tagged(NodeTag::Banner).count(), 1);
    let banner = label(&scene, TextureKey::Banner).expect("banner label");
    assert_eq!(banner.text, "Happy Birthday!");
    assert!(config.confetti.is_some());
}

#[test]
fn default_config_is_festive() {
    let default = build_cake_scene(&CakeSceneConfig::default(), "x");
    let festive = build_cake_scene(&CakeSceneConfig::festive(), "x");
    assert_eq!(default.nodes.len(), festive.nodes.len());
}

#[test]
fn plaque_carries_the_display_name() {
    let scene = build_cake_scene(&CakeSceneConfig::classic(), "Ana");
    assert_eq!(scene.tagged(NodeTag::Plaque).count(), 1);
    let plaque = label(&scene, TextureKey::Plaque).expect("plaque label");
    assert_eq!(plaque.text, "Ana");
    assert_eq!((plaque.width, plaque.height), (1024, 256));

    let node = scene.find("plaque").unwrap();
    assert_eq!(node.material.texture, Some(TextureKey::Plaque));
}

#[test]
fn empty_name_still_gets_a_plaque() {
    let scene = build_cake_scene(&CakeSceneConfig::classic(), "");
    let plaque = label(&scene, TextureKey::Plaque).expect("plaque label");
    assert!(plaque.text.is_empty());
    assert!(scene.find("plaque").is_some());
}

#[test]
fn single_tier_cake_puts_plaque_on_that_tier() {
    let config = CakeSceneConfig {
        tiers: vec![TierSpec::new(1.5, 1.0, 0.1, 8, 0.1)],
        ..CakeSceneConfig::classic()
    };
    let scene = build_cake_scene(&config, "Solo");
    let plaque = scene.find("plaque").unwrap();
    assert!((plaque.transform.translation.z - 1.51).abs() < 1e-4);
    assert_eq!(named(&scene, "rosette").len(), 8);
}

#[test]
fn candles_sit_on_the_top_frosting() {
    let config = CakeSceneConfig {
        candle_offsets: vec![Vec2::new(0.2, -0.1)],
        ..CakeSceneConfig::classic()
    };
    let (_, top) = stack_tiers(&config.tiers);
    let scene = build_cake_scene(&config, "x");
    let candle = scene.find("candle").unwrap();
    let t = candle.transform.translation;
    assert!((t.x - 0.2).abs() < 1e-6 && (t.z + 0.1).abs() < 1e-6);
    // candle is 0.6 tall, centered
    assert!((t.y - 0.3 - top).abs() < 1e-5);
}

#[test]
fn candle_lights_are_capped() {
    let config = CakeSceneConfig {
        candle_offsets: (0..20).map(|i| Vec2::new(i as f32 * 0.01, 0.0)).collect(),
        ..CakeSceneConfig::classic()
    };
    let scene = build_cake_scene(&config, "x");
    assert_eq!(scene.tagged(NodeTag::Flame).count(), 20);
    assert!(scene.lights.len() <= MAX_POINT_LIGHTS + 2);
}

#[test]
fn cake_scene_has_an_opaque_background() {
    let scene = build_cake_scene(&CakeSceneConfig::classic(), "x");
    assert_eq!(scene.background, Some(Color::hex(0xfff5f5)));
}
