//! Photo frames scattered on the cake table.
//!
//! Frames are created synchronously from the source list; the picture inside
//! each frame arrives later, once the host has decoded the image. Every call
//! to [`PhotoLayer::place`] starts a new generation, and completions tagged
//! with an older generation are ignored.

use crate::color::Color;
use crate::constants::*;
use crate::lifetime::{LiveToken, SceneLifetime};
use crate::scene::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_6, TAU};

/// One draw of the table scatter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoCandidate {
    pub x: f32,
    pub z: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl PhotoCandidate {
    pub fn distance_from_center(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

pub trait Scatter {
    fn candidate(&mut self) -> PhotoCandidate;
}

/// Uniform position on the table square, random yaw and a slight roll.
pub struct TableScatter<R: Rng> {
    rng: R,
}

impl<R: Rng> TableScatter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Scatter for TableScatter<R> {
    fn candidate(&mut self) -> PhotoCandidate {
        let h = PHOTO_SCATTER_HALF_EXTENT;
        PhotoCandidate {
            x: self.rng.gen_range(-h..=h),
            z: self.rng.gen_range(-h..=h),
            yaw: self.rng.gen_range(0.0..TAU),
            roll: self.rng.gen_range(-PHOTO_MAX_ROLL..=PHOTO_MAX_ROLL),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaneState {
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhotoRecord {
    pub source: String,
    /// Index into the list passed to [`PhotoLayer::place`].
    pub source_index: usize,
    pub x: f32,
    pub z: f32,
    pub yaw: f32,
    pub roll: f32,
    pub pane: PaneState,
    frame_node: NodeId,
}

/// A texture the host has to decode for a frame.
#[derive(Clone, Debug)]
pub struct PhotoRequest {
    pub key: TextureKey,
    pub source: String,
    pub token: LiveToken,
}

#[derive(Debug, Default)]
pub struct PhotoLayer {
    records: Vec<PhotoRecord>,
    nodes: Vec<SceneNode>,
    generation: u64,
    lifetime: SceneLifetime,
}

impl PhotoLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frames with up to [`MAX_PHOTO_FRAMES`] new ones.
    ///
    /// One candidate is drawn per source; a candidate too close to the cake
    /// drops that source rather than drawing again.
    pub fn place(&mut self, sources: &[String], scatter: &mut impl Scatter) -> Vec<PhotoRequest> {
        self.lifetime.renew();
        self.generation += 1;
        self.records.clear();
        self.nodes.clear();

        let mut requests = Vec::new();
        for (i, source) in sources.iter().take(MAX_PHOTO_FRAMES).enumerate() {
            let c = scatter.candidate();
            if c.distance_from_center() < PHOTO_EXCLUSION_RADIUS {
                continue;
            }
            let slot = self.records.len();
            let frame_node = self.push_frame(&c);
            self.records.push(PhotoRecord {
                source: source.clone(),
                source_index: i,
                x: c.x,
                z: c.z,
                yaw: c.yaw,
                roll: c.roll,
                pane: PaneState::Loading,
                frame_node,
            });
            requests.push(PhotoRequest {
                key: TextureKey::Photo {
                    generation: self.generation,
                    slot,
                },
                source: source.clone(),
                token: self.lifetime.token(),
            });
        }

        log::info!(
            "[photos] placed {} of {} photo(s) (generation {})",
            self.records.len(),
            sources.len(),
            self.generation
        );
        requests
    }

    fn push_frame(&mut self, c: &PhotoCandidate) -> NodeId {
        let wood = Material::standard(Color::hex(0x8b7355), 0.7, 0.0);
        let group = self.nodes.len();
        self.nodes.push(
            SceneNode::group(
                "photo-frame",
                Transform::from_xyz(c.x, PHOTO_FRAME_Y, c.z).with_euler(0.0, c.yaw, c.roll),
            )
            .tagged(NodeTag::PhotoFrame),
        );
        self.nodes.push(
            SceneNode::new(
                "photo-border",
                Shape::Box {
                    size: Vec3::new(1.2, 1.6, 0.1),
                },
                wood,
                Transform::IDENTITY,
            )
            .child_of(group),
        );
        self.nodes.push(
            SceneNode::new(
                "photo-stand",
                Shape::Box {
                    size: Vec3::new(0.1, 1.0, 0.1),
                },
                wood,
                Transform::from_xyz(0.0, -0.8, -0.3).with_euler(FRAC_PI_6, 0.0, 0.0),
            )
            .child_of(group),
        );
        group
    }

    fn slot_for(&self, key: TextureKey) -> Option<usize> {
        match key {
            TextureKey::Photo { generation, slot }
                if generation == self.generation && slot < self.records.len() =>
            {
                Some(slot)
            }
            _ => None,
        }
    }

    /// Put the decoded picture into its frame. Returns `false` for stale or
    /// unknown keys and for frames that already resolved.
    pub fn attach_pane(&mut self, key: TextureKey) -> bool {
        let Some(slot) = self.slot_for(key) else {
            log::debug!("[photos] dropping stale pane {:?}", key);
            return false;
        };
        if self.records[slot].pane != PaneState::Loading {
            return false;
        }
        let parent = self.records[slot].frame_node;
        self.nodes.push(
            SceneNode::new(
                "photo-pane",
                Shape::Plane {
                    width: 1.0,
                    height: 1.4,
                },
                Material::standard(Color::WHITE, 0.5, 0.0).with_texture(key),
                Transform::from_xyz(0.0, 0.0, 0.06),
            )
            .tagged(NodeTag::PhotoPane)
            .child_of(parent),
        );
        self.records[slot].pane = PaneState::Loaded;
        true
    }

    /// The frame stays empty.
    pub fn mark_failed(&mut self, key: TextureKey) {
        if let Some(slot) = self.slot_for(key) {
            if self.records[slot].pane == PaneState::Loading {
                log::debug!("[photos] could not load photo {}", self.records[slot].source_index);
                self.records[slot].pane = PaneState::Failed;
            }
        }
    }

    /// Drop every frame and invalidate outstanding requests.
    pub fn clear(&mut self) {
        self.lifetime.renew();
        self.generation += 1;
        self.records.clear();
        self.nodes.clear();
    }

    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
