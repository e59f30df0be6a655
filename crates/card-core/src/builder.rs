//! Cake scene builder.
//!
//! One parameterized builder covers every look of the card: the tier list,
//! decoration density, palette and particle settings all come from
//! [`CakeSceneConfig`]. Decorations around a tier are always spread evenly,
//! `θ = 2πi/n`, at the tier's radius.

use crate::color::Color;
use crate::constants::*;
use crate::label::LabelSpec;
use crate::particles::{ConfettiConfig, SparkleConfig};
use crate::scene::*;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

#[derive(Clone, Debug)]
pub struct TierSpec {
    pub radius: f32,
    pub height: f32,
    /// Thickness of the frosting disc on top of the tier.
    pub frosting: f32,
    pub rosettes: usize,
    pub rosette_size: f32,
    /// Pearls ringing the base of the tier (0 for none).
    pub pearls: usize,
}

impl TierSpec {
    pub const fn new(radius: f32, height: f32, frosting: f32, rosettes: usize, rosette_size: f32) -> Self {
        Self {
            radius,
            height,
            frosting,
            rosettes,
            rosette_size,
            pearls: 0,
        }
    }

    pub const fn with_pearls(mut self, pearls: usize) -> Self {
        self.pearls = pearls;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Palette {
    pub background: Color,
    pub floor: Color,
    pub wall: Color,
    pub table: Color,
    pub sponge: Color,
    pub frosting: Color,
    pub cream: Color,
    pub pearl: Color,
    pub candle: Color,
    pub flame: Color,
    pub flame_glow: Color,
    pub strawberry: Color,
    pub leaf: Color,
    pub string: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::hex(0xfff5f5),
            floor: Color::hex(0xf5e6e8),
            wall: Color::hex(0xffe4ec),
            table: Color::hex(0x8b4513),
            sponge: Color::hex(0xfff8dc),
            frosting: Color::hex(0xffb6c1),
            cream: Color::hex(0xffb6c1),
            pearl: Color::hex(0xfffaf0),
            candle: Color::hex(0xffffff),
            flame: Color::hex(0xff6600),
            flame_glow: Color::hex(0xffaa00),
            strawberry: Color::hex(0xff0000),
            leaf: Color::hex(0x228b22),
            string: Color::hex(0xcccccc),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Balloon {
    pub position: Vec3,
    pub color: Color,
}

impl Balloon {
    pub const fn new(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            color,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CakeSceneConfig {
    /// Bottom to top.
    pub tiers: Vec<TierSpec>,
    /// Candle positions on the top tier, relative to its axis.
    pub candle_offsets: Vec<Vec2>,
    pub strawberry_offsets: Vec<Vec2>,
    pub balloons: Vec<Balloon>,
    /// Back wall with this banner text; `None` leaves the room open.
    pub banner: Option<String>,
    pub palette: Palette,
    pub sparkles: SparkleConfig,
    pub confetti: Option<ConfettiConfig>,
}

impl CakeSceneConfig {
    /// Three tiers, candles and strawberries; no wall, balloons or confetti.
    pub fn classic() -> Self {
        Self {
            tiers: vec![
                TierSpec::new(1.8, 1.2, 0.2, 24, 0.12),
                TierSpec::new(1.4, 1.0, 0.18, 20, 0.10),
                TierSpec::new(1.0, 0.8, 0.15, 16, 0.08),
            ],
            candle_offsets: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(-0.3, 0.0),
                Vec2::new(0.3, 0.0),
                Vec2::new(0.0, -0.3),
                Vec2::new(0.0, 0.3),
            ],
            strawberry_offsets: vec![
                Vec2::new(0.5, 0.3),
                Vec2::new(-0.4, -0.5),
                Vec2::new(0.6, -0.2),
                Vec2::new(-0.5, 0.4),
            ],
            balloons: Vec::new(),
            banner: None,
            palette: Palette::default(),
            sparkles: SparkleConfig::default(),
            confetti: None,
        }
    }

    /// Denser decoration, a balloon wall with banner, and confetti.
    pub fn festive() -> Self {
        let classic = Self::classic();
        Self {
            tiers: vec![
                TierSpec::new(1.8, 1.2, 0.2, 36, 0.12).with_pearls(48),
                TierSpec::new(1.4, 1.0, 0.18, 30, 0.10).with_pearls(40),
                TierSpec::new(1.0, 0.8, 0.15, 24, 0.08).with_pearls(32),
            ],
            balloons: vec![
                Balloon::new(-6.0, 5.0, -8.0, Color::hex(0xff69b4)),
                Balloon::new(-4.5, 6.2, -8.5, Color::hex(0xffd700)),
                Balloon::new(-7.2, 3.6, -7.0, Color::hex(0x98fb98)),
                Balloon::new(4.5, 5.6, -8.0, Color::hex(0xdda0dd)),
                Balloon::new(6.0, 6.6, -8.5, Color::hex(0x87ceeb)),
                Balloon::new(7.2, 4.0, -7.0, Color::hex(0xffa07a)),
            ],
            banner: Some("Happy Birthday!".to_string()),
            sparkles: SparkleConfig {
                count: 500,
                ..SparkleConfig::default()
            },
            confetti: Some(ConfettiConfig::default()),
            ..classic
        }
    }
}

impl Default for CakeSceneConfig {
    fn default() -> Self {
        Self::festive()
    }
}

/// `count` points evenly spread on a horizontal circle.
pub fn ring_positions(radius: f32, y: f32, count: usize) -> impl Iterator<Item = Vec3> {
    (0..count).map(move |i| {
        let angle = i as f32 / count as f32 * TAU;
        Vec3::new(radius * angle.cos(), y, radius * angle.sin())
    })
}

/// Where each tier ended up; handy for placing things relative to the cake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierPlacement {
    pub radius: f32,
    pub bottom: f32,
    pub center: f32,
    pub top: f32,
}

/// Stack tiers from the table surface. Each tier is followed by its frosting.
pub fn stack_tiers(tiers: &[TierSpec]) -> (Vec<TierPlacement>, f32) {
    let mut y = TABLE_TOP_Y;
    let mut placed = Vec::with_capacity(tiers.len());
    for t in tiers {
        placed.push(TierPlacement {
            radius: t.radius,
            bottom: y,
            center: y + t.height * 0.5,
            top: y + t.height,
        });
        y += t.height + t.frosting;
    }
    (placed, y)
}

pub fn build_cake_scene(config: &CakeSceneConfig, display_name: &str) -> SceneDescription {
    let palette = &config.palette;
    let mut scene = SceneDescription {
        background: Some(palette.background),
        ..SceneDescription::default()
    };

    add_lights(&mut scene);
    add_room(&mut scene, config);
    add_table(&mut scene, palette);
    let cake_top = add_cake(&mut scene, config, display_name);
    add_strawberries(&mut scene, config, cake_top);
    add_candles(&mut scene, config, cake_top);
    add_balloons(&mut scene, config);

    log::debug!(
        "[builder] cake scene: {} nodes, {} lights",
        scene.nodes.len(),
        scene.lights.len()
    );
    scene
}

fn add_lights(scene: &mut SceneDescription) {
    scene.lights.extend([
        Light::ambient(Color::WHITE, 0.6),
        Light::directional(Vec3::new(10.0, 15.0, 5.0), Color::WHITE, 0.8),
        Light::point(Vec3::new(-5.0, 5.0, 5.0), 20.0, Color::hex(0xffb6c1), 1.5),
        Light::point(Vec3::new(5.0, 5.0, -5.0), 20.0, Color::hex(0xffd700), 1.2),
    ]);
}

fn add_room(scene: &mut SceneDescription, config: &CakeSceneConfig) {
    let palette = &config.palette;
    scene.push(SceneNode::new(
        "floor",
        Shape::Plane {
            width: 30.0,
            height: 30.0,
        },
        Material::standard(palette.floor, 0.8, 0.2),
        Transform::from_xyz(0.0, -2.0, 0.0).with_euler(-FRAC_PI_2, 0.0, 0.0),
    ));

    let Some(text) = &config.banner else {
        return;
    };
    scene.push(SceneNode::new(
        "wall",
        Shape::Plane {
            width: 30.0,
            height: 14.0,
        },
        Material::standard(palette.wall, 0.9, 0.0),
        Transform::from_xyz(0.0, 5.0, -10.0),
    ));
    let label = LabelSpec::banner(text);
    let width = 8.0;
    scene.push(
        SceneNode::new(
            "banner",
            Shape::Plane {
                width,
                height: width / label.aspect(),
            },
            Material::standard(Color::WHITE, 0.5, 0.0).with_texture(TextureKey::Banner),
            Transform::from_xyz(0.0, 8.0, -9.95),
        )
        .tagged(NodeTag::Banner),
    );
    scene.labels.push((TextureKey::Banner, label));
}

fn add_table(scene: &mut SceneDescription, palette: &Palette) {
    let wood = Material::standard(palette.table, 0.6, 0.1);
    scene.push(SceneNode::new(
        "table-top",
        Shape::Box {
            size: Vec3::new(8.0, 0.3, 8.0),
        },
        wood,
        Transform::IDENTITY,
    ));
    for (x, z) in [(-3.0, -3.0), (3.0, -3.0), (-3.0, 3.0), (3.0, 3.0)] {
        scene.push(SceneNode::new(
            "table-leg",
            Shape::Cylinder {
                radius: 0.15,
                height: 2.0,
            },
            wood,
            Transform::from_xyz(x, -1.0, z),
        ));
    }
}

/// Returns the y of the top frosting surface.
fn add_cake(scene: &mut SceneDescription, config: &CakeSceneConfig, display_name: &str) -> f32 {
    let palette = &config.palette;
    let sponge = Material::standard(palette.sponge, 0.6, 0.05);
    let frosting = Material::standard(palette.frosting, 0.2, 0.3);
    let cream = Material::standard(palette.cream, 0.3, 0.2);
    let pearl = Material::standard(palette.pearl, 0.15, 0.6).with_emissive(0.05);

    let (placed, top) = stack_tiers(&config.tiers);
    for (spec, at) in config.tiers.iter().zip(placed.iter()) {
        scene.push(SceneNode::new(
            "tier",
            Shape::Cylinder {
                radius: spec.radius,
                height: spec.height,
            },
            sponge,
            Transform::from_xyz(0.0, at.center, 0.0),
        ));

        for p in ring_positions(spec.radius, at.top, spec.rosettes) {
            scene.push(SceneNode::new(
                "rosette",
                Shape::Sphere {
                    radius: spec.rosette_size,
                },
                cream,
                Transform::from_translation(p).with_scale(Vec3::new(1.0, 0.7, 0.8)),
            ));
        }

        if spec.frosting > 0.0 {
            scene.push(SceneNode::new(
                "frosting",
                Shape::Cylinder {
                    radius: spec.radius + 0.02,
                    height: spec.frosting,
                },
                frosting,
                Transform::from_xyz(0.0, at.top + spec.frosting * 0.5, 0.0),
            ));
        }

        let pearl_radius = spec.rosette_size * 0.5;
        for p in ring_positions(spec.radius + 0.02, at.bottom + pearl_radius, spec.pearls) {
            scene.push(SceneNode::new(
                "pearl",
                Shape::Sphere {
                    radius: pearl_radius,
                },
                pearl,
                Transform::from_translation(p),
            ));
        }
    }

    // Name plaque on the front of the second tier (or the only one).
    if let Some(at) = placed.get(1).or_else(|| placed.first()) {
        let label = LabelSpec::plaque(display_name);
        let width = (at.radius * 1.7).min(2.4);
        scene.push(
            SceneNode::new(
                "plaque",
                Shape::Plane {
                    width,
                    height: width / label.aspect(),
                },
                Material::standard(Color::WHITE, 0.4, 0.0).with_texture(TextureKey::Plaque),
                Transform::from_xyz(0.0, at.center, at.radius + 0.01),
            )
            .tagged(NodeTag::Plaque),
        );
        scene.labels.push((TextureKey::Plaque, label));
    }

    top
}

fn add_strawberries(scene: &mut SceneDescription, config: &CakeSceneConfig, top: f32) {
    let palette = &config.palette;
    for off in &config.strawberry_offsets {
        scene.push(SceneNode::new(
            "strawberry",
            Shape::Sphere { radius: 0.12 },
            Material::standard(palette.strawberry, 0.6, 0.0),
            Transform::from_xyz(off.x, top, off.y).with_scale(Vec3::new(1.0, 1.2, 1.0)),
        ));
        scene.push(SceneNode::new(
            "strawberry-leaf",
            Shape::Cone {
                radius: 0.08,
                height: 0.06,
            },
            Material::standard(palette.leaf, 0.7, 0.0),
            Transform::from_xyz(off.x, top + 0.14, off.y).with_euler(PI, 0.0, 0.0),
        ));
    }
}

fn add_candles(scene: &mut SceneDescription, config: &CakeSceneConfig, top: f32) {
    let palette = &config.palette;
    for off in &config.candle_offsets {
        scene.push(SceneNode::new(
            "candle",
            Shape::Cylinder {
                radius: 0.08,
                height: 0.6,
            },
            Material::standard(palette.candle, 0.4, 0.0),
            Transform::from_xyz(off.x, top + 0.3, off.y),
        ));
        scene.push(SceneNode::new(
            "wick",
            Shape::Cylinder {
                radius: 0.01,
                height: 0.1,
            },
            Material::standard(Color::hex(0x222222), 0.9, 0.0),
            Transform::from_xyz(off.x, top + 0.65, off.y),
        ));
        scene.push(
            SceneNode::new(
                "flame",
                Shape::Sphere { radius: 0.15 },
                Material::basic(palette.flame, 0.9),
                Transform::from_xyz(off.x, top + 0.7, off.y).with_scale(Vec3::new(0.8, 1.2, 0.8)),
            )
            .tagged(NodeTag::Flame),
        );
        scene.push(
            SceneNode::new(
                "flame-glow",
                Shape::Sphere { radius: 0.2 },
                Material::basic(palette.flame_glow, 0.4),
                Transform::from_xyz(off.x, top + 0.7, off.y),
            )
            .tagged(NodeTag::FlameGlow),
        );
        if scene.lights.len() < MAX_POINT_LIGHTS + 2 {
            scene.lights.push(Light::point(
                Vec3::new(off.x, top + 0.7, off.y),
                3.0,
                palette.flame,
                0.8,
            ));
        }
    }
}

fn add_balloons(scene: &mut SceneDescription, config: &CakeSceneConfig) {
    let string = Material::standard(config.palette.string, 0.9, 0.0);
    for b in &config.balloons {
        scene.push(SceneNode::new(
            "balloon",
            Shape::Sphere { radius: 0.5 },
            Material::standard(b.color, 0.3, 0.1).with_emissive(0.05),
            Transform::from_translation(b.position).with_scale(Vec3::new(1.0, 1.2, 1.0)),
        ));
        scene.push(SceneNode::new(
            "balloon-knot",
            Shape::Cone {
                radius: 0.06,
                height: 0.1,
            },
            Material::standard(b.color, 0.3, 0.1),
            Transform::from_translation(b.position - Vec3::new(0.0, 0.62, 0.0)),
        ));
        scene.push(SceneNode::new(
            "balloon-string",
            Shape::Cylinder {
                radius: 0.01,
                height: 2.0,
            },
            string,
            Transform::from_translation(b.position - Vec3::new(0.0, 1.67, 0.0)),
        ));
    }
}
