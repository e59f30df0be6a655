//! Gift box shown before the card opens.

use crate::animation::{Animated, Cloud, NodeSet, RenderFrame};
use crate::color::Color;
use crate::constants::*;
use crate::particles::{SparkleConfig, SparkleField};
use crate::scene::*;
use crate::state::{ray_sphere, Camera};
use glam::{Mat4, Vec3};
use rand::Rng;
use smallvec::smallvec;
use std::time::Duration;

/// Resting heights of the lid and bow centers.
pub const LID_Y: f32 = 1.15;
pub const BOW_Y: f32 = 1.5;
/// Bounding sphere used for hover and click picking.
const PICK_RADIUS: f32 = 1.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GiftPhase {
    Closed,
    Opening,
    Open,
}

#[derive(Clone, Debug)]
pub struct GiftBoxConfig {
    pub sparkles: SparkleConfig,
    pub open_frames: u32,
    pub hover_scale: f32,
    pub hover_lerp: f32,
}

impl Default for GiftBoxConfig {
    fn default() -> Self {
        Self {
            sparkles: SparkleConfig {
                count: 200,
                half_extent: 5.0,
                size: 0.05,
                drift: 0.0,
                ..SparkleConfig::default()
            },
            open_frames: GIFT_OPEN_FRAMES,
            hover_scale: GIFT_HOVER_SCALE,
            hover_lerp: GIFT_HOVER_LERP,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Parts {
    body: NodeId,
    ribbon_h: NodeId,
    ribbon_v: NodeId,
    lid: NodeId,
    bow: NodeId,
}

pub struct GiftBox {
    config: GiftBoxConfig,
    phase: GiftPhase,
    frames: u32,
    progress: f32,
    hovered: bool,
    scale: f32,
    spin: f32,
    bob: f32,
    description: SceneDescription,
    /// Posed copy of the description's nodes.
    nodes: Vec<SceneNode>,
    parts: Parts,
    sparkles: SparkleField,
    camera: Camera,
}

impl GiftBox {
    pub fn new(config: GiftBoxConfig, rng: &mut impl Rng) -> Self {
        let (description, parts) = build_gift_scene();
        Self {
            sparkles: SparkleField::new(&config.sparkles, rng),
            config,
            phase: GiftPhase::Closed,
            frames: 0,
            progress: 0.0,
            hovered: false,
            scale: 1.0,
            spin: 0.0,
            bob: 0.0,
            nodes: description.nodes.clone(),
            description,
            parts,
            camera: Camera::gift_rig(1.0),
        }
    }

    /// Start opening. Only has an effect while closed.
    pub fn open(&mut self) -> bool {
        if self.phase != GiftPhase::Closed {
            return false;
        }
        log::info!("[gift] opening");
        self.phase = GiftPhase::Opening;
        true
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Whether a world-space ray hits the box.
    pub fn pick(&self, origin: Vec3, dir: Vec3) -> bool {
        let center = Vec3::new(0.0, self.bob + 0.25, 0.0);
        ray_sphere(origin, dir, center, PICK_RADIUS * self.scale).is_some()
    }

    pub fn phase(&self) -> GiftPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn description(&self) -> &SceneDescription {
        &self.description
    }

    pub fn lid(&self) -> &SceneNode {
        &self.nodes[self.parts.lid]
    }

    pub fn bow(&self) -> &SceneNode {
        &self.nodes[self.parts.bow]
    }

    pub fn body(&self) -> &SceneNode {
        &self.nodes[self.parts.body]
    }

    pub fn sparkles(&self) -> &SparkleField {
        &self.sparkles
    }

    fn pose(&mut self) {
        let p = self.parts;
        let rise = GIFT_LID_RISE * self.progress;
        let tip = GIFT_LID_TIP * self.progress;
        let spin = self.spin;
        let bob = self.bob;
        let scale = Vec3::splat(self.scale);
        let nodes = &mut self.nodes;

        nodes[p.body].transform = Transform::from_xyz(0.0, bob, 0.0)
            .with_euler(0.0, spin, 0.0)
            .with_scale(scale);
        for r in [p.ribbon_h, p.ribbon_v] {
            nodes[r].transform = Transform::from_xyz(0.0, bob, 0.0)
                .with_euler(0.0, spin, 0.0)
                .with_scale(scale);
        }
        // the lid only bobs with the box while it is still shut
        let lift = if self.phase == GiftPhase::Closed { bob } else { rise };
        nodes[p.lid].transform = Transform::from_xyz(0.0, LID_Y + lift, 0.0)
            .with_euler(tip, spin, 0.0)
            .with_scale(scale);
        nodes[p.bow].transform = Transform::from_xyz(0.0, BOW_Y + lift, 0.0)
            .with_euler(tip, spin, 0.0)
            .with_scale(Vec3::new(1.0, 0.5, 1.0));
    }
}

impl Animated for GiftBox {
    fn advance(&mut self, now: Duration) {
        match self.phase {
            GiftPhase::Closed => {
                self.spin += GIFT_SPIN_PER_FRAME;
                self.bob = now.as_secs_f32().sin() * GIFT_BOB_AMPLITUDE;
            }
            GiftPhase::Opening => {
                self.frames += 1;
                let total = self.config.open_frames.max(1);
                self.progress = (self.frames as f32 / total as f32).min(1.0);
                if self.frames >= total {
                    self.progress = 1.0;
                    self.phase = GiftPhase::Open;
                    log::info!("[gift] open");
                }
            }
            GiftPhase::Open => {}
        }

        let target = if self.hovered {
            self.config.hover_scale
        } else {
            1.0
        };
        self.scale += (target - self.scale) * self.config.hover_lerp;

        self.pose();
        self.sparkles.update(now);
    }

    fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            camera: &self.camera,
            node_sets: smallvec![NodeSet {
                nodes: &self.nodes,
                root: Mat4::IDENTITY,
            }],
            clouds: smallvec![Cloud {
                buffer: self.sparkles.buffer(),
                root: Mat4::IDENTITY,
            }],
            lights: &self.description.lights,
            background: self.description.background,
        }
    }
}

fn build_gift_scene() -> (SceneDescription, Parts) {
    let mut scene = SceneDescription::default();
    scene.lights.extend([
        Light::ambient(Color::WHITE, 0.6),
        Light::point(Vec3::new(5.0, 5.0, 5.0), 100.0, Color::hex(0xffb6c1), 1.0),
        Light::point(Vec3::new(-5.0, 5.0, -5.0), 100.0, Color::hex(0xffd700), 0.8),
    ]);

    let ribbon = Material::standard(Color::hex(0xc77d7e), 0.25, 0.1);
    let body = scene.push(
        SceneNode::new(
            "gift-body",
            Shape::Box { size: Vec3::splat(2.0) },
            Material::standard(Color::hex(0xd4a5a5), 0.25, 0.1),
            Transform::IDENTITY,
        )
        .tagged(NodeTag::GiftBody),
    );
    let ribbon_h = scene.push(
        SceneNode::new(
            "gift-ribbon",
            Shape::Box {
                size: Vec3::new(2.1, 0.2, 0.3),
            },
            ribbon,
            Transform::IDENTITY,
        )
        .tagged(NodeTag::GiftRibbon),
    );
    let ribbon_v = scene.push(
        SceneNode::new(
            "gift-ribbon",
            Shape::Box {
                size: Vec3::new(0.3, 2.1, 0.3),
            },
            ribbon,
            Transform::IDENTITY,
        )
        .tagged(NodeTag::GiftRibbon),
    );
    let lid = scene.push(
        SceneNode::new(
            "gift-lid",
            Shape::Box {
                size: Vec3::new(2.2, 0.3, 2.2),
            },
            Material::standard(Color::hex(0xe6b8b8), 0.25, 0.1),
            Transform::from_xyz(0.0, LID_Y, 0.0),
        )
        .tagged(NodeTag::GiftLid),
    );
    let bow = scene.push(
        SceneNode::new(
            "gift-bow",
            Shape::Sphere { radius: 0.3 },
            ribbon,
            Transform::from_xyz(0.0, BOW_Y, 0.0).with_scale(Vec3::new(1.0, 0.5, 1.0)),
        )
        .tagged(NodeTag::GiftBow),
    );

    (
        scene,
        Parts {
            body,
            ribbon_h,
            ribbon_v,
            lid,
            bow,
        },
    )
}
