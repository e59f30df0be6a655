//! The animated cake scene: static description plus everything that moves.

use crate::animation::{Animated, Cloud, FrameSink, NodeSet, RenderFrame};
use crate::builder::{build_cake_scene, CakeSceneConfig};
use crate::constants::*;
use crate::orbit::{OrbitController, OrbitParams};
use crate::particles::{ConfettiField, SparkleField};
use crate::photos::{PhotoLayer, PhotoRequest, Scatter};
use crate::scene::*;
use crate::state::Camera;
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;
use smallvec::{smallvec, SmallVec};
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
struct Flame {
    node: NodeId,
    glow: Option<NodeId>,
    base: Transform,
    glow_base: Transform,
}

pub struct CakeScene {
    description: SceneDescription,
    /// Working copy of the description's nodes with animated transforms.
    nodes: Vec<SceneNode>,
    flames: Vec<Flame>,
    lights: Vec<Light>,
    orbit: OrbitController,
    photos: PhotoLayer,
    sparkles: SparkleField,
    confetti: Option<ConfettiField>,
    camera: Camera,
    /// Fixed from the starting rig; zoom slides the eye along z only.
    view_dir: Vec3,
    root: Mat4,
}

impl CakeScene {
    pub fn new(config: &CakeSceneConfig, display_name: &str, rng: &mut impl Rng) -> Self {
        Self::with_orbit(config, display_name, OrbitParams::default(), rng)
    }

    pub fn with_orbit(
        config: &CakeSceneConfig,
        display_name: &str,
        orbit: OrbitParams,
        rng: &mut impl Rng,
    ) -> Self {
        let description = build_cake_scene(config, display_name);
        let nodes = description.nodes.clone();

        // Each glow sits on its flame; pair them in build order.
        let glows: Vec<NodeId> = description.tagged(NodeTag::FlameGlow).collect();
        let flames = description
            .tagged(NodeTag::Flame)
            .enumerate()
            .map(|(i, node)| {
                let glow = glows.get(i).copied();
                Flame {
                    node,
                    glow,
                    base: nodes[node].transform,
                    glow_base: glow.map(|g| nodes[g].transform).unwrap_or_default(),
                }
            })
            .collect();

        let orbit = OrbitController::new(orbit);
        let camera = Camera::cake_rig(orbit.distance(), 1.0);
        let view_dir = camera.target - camera.eye;
        let lights = description.lights.clone();
        log::info!(
            "[cake] scene ready: {} nodes, {} lights",
            description.nodes.len(),
            description.lights.len()
        );
        Self {
            sparkles: SparkleField::new(&config.sparkles, rng),
            confetti: config.confetti.as_ref().map(|c| ConfettiField::new(c, rng)),
            description,
            nodes,
            flames,
            lights,
            orbit,
            photos: PhotoLayer::new(),
            camera,
            view_dir,
            root: Mat4::IDENTITY,
        }
    }

    /// Advance one frame and draw it.
    pub fn tick(&mut self, now: Duration, sink: &mut impl FrameSink) {
        self.advance(now);
        sink.render(&self.frame());
    }

    fn animate_flames(&mut self, now: Duration) {
        let t = now.as_secs_f32() * FLAME_TIME_SCALE;
        for (i, flame) in self.flames.iter().enumerate() {
            let phase = t + i as f32;
            let stretch = FLAME_STRETCH_BASE + phase.sin() * FLAME_STRETCH_AMPLITUDE;
            let width = 1.0 + (phase * 1.7).cos() * FLAME_WIDTH_AMPLITUDE;
            let jitter = (t * 2.0 + i as f32).sin() * FLAME_JITTER_AMPLITUDE;

            let base = flame.base;
            let node = &mut self.nodes[flame.node].transform;
            node.scale = Vec3::new(base.scale.x * width, stretch, base.scale.z * width);
            node.translation = base.translation + Vec3::Y * jitter;

            if let Some(g) = flame.glow {
                let glow = &mut self.nodes[g].transform;
                glow.translation = flame.glow_base.translation + Vec3::Y * jitter;
                glow.scale = flame.glow_base.scale * (0.95 + 0.05 * stretch / FLAME_STRETCH_BASE);
            }
        }
    }

    fn place_lights(&mut self) {
        for (dst, src) in self.lights.iter_mut().zip(self.description.lights.iter()) {
            dst.kind = match src.kind {
                LightKind::Ambient => LightKind::Ambient,
                LightKind::Directional { position } => LightKind::Directional {
                    position: self.root.transform_point3(position),
                },
                LightKind::Point { position, range } => LightKind::Point {
                    position: self.root.transform_point3(position),
                    range,
                },
            };
        }
    }

    pub fn set_photos(&mut self, sources: &[String], scatter: &mut impl Scatter) -> Vec<PhotoRequest> {
        self.photos.place(sources, scatter)
    }

    pub fn attach_photo(&mut self, key: TextureKey) -> bool {
        self.photos.attach_pane(key)
    }

    pub fn photo_failed(&mut self, key: TextureKey) {
        self.photos.mark_failed(key);
    }

    pub fn pointer_down(&mut self, at: Vec2) {
        self.orbit.pointer_down(at);
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.orbit.pointer_move(at);
    }

    pub fn pointer_up(&mut self) {
        self.orbit.pointer_up();
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.orbit.wheel(delta_y);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    pub fn description(&self) -> &SceneDescription {
        &self.description
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn photos(&self) -> &PhotoLayer {
        &self.photos
    }

    pub fn sparkles(&self) -> &SparkleField {
        &self.sparkles
    }

    pub fn confetti(&self) -> Option<&ConfettiField> {
        self.confetti.as_ref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn root(&self) -> Mat4 {
        self.root
    }

    pub fn flame_count(&self) -> usize {
        self.flames.len()
    }
}

impl Animated for CakeScene {
    fn advance(&mut self, now: Duration) {
        self.root = self.orbit.root_matrix();
        self.place_lights();
        self.animate_flames(now);
        self.orbit.idle_step();
        if let Some(confetti) = self.confetti.as_mut() {
            confetti.update(now);
        }
        self.sparkles.update(now);
        let eye = Vec3::new(0.0, CAMERA_HEIGHT, self.orbit.distance());
        self.camera.eye = eye;
        self.camera.target = eye + self.view_dir;
    }

    fn frame(&self) -> RenderFrame<'_> {
        let mut clouds: SmallVec<[Cloud<'_>; 2]> = smallvec![Cloud {
            buffer: self.sparkles.buffer(),
            root: self.root,
        }];
        if let Some(confetti) = &self.confetti {
            clouds.push(Cloud {
                buffer: confetti.buffer(),
                root: self.root,
            });
        }
        RenderFrame {
            camera: &self.camera,
            node_sets: smallvec![
                NodeSet {
                    nodes: &self.nodes,
                    root: self.root,
                },
                NodeSet {
                    nodes: self.photos.nodes(),
                    root: self.root,
                },
            ],
            clouds,
            lights: &self.lights,
            background: self.description.background,
        }
    }
}
