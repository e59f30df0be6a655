//! Per-frame driving of a scene and its renderer.

use crate::clock::{CancelHandle, FrameClock};
use crate::color::Color;
use crate::particles::ParticleBuffer;
use crate::scene::{Light, SceneNode};
use crate::state::Camera;
use glam::Mat4;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Nodes drawn under a shared root transform.
#[derive(Clone, Copy, Debug)]
pub struct NodeSet<'a> {
    pub nodes: &'a [SceneNode],
    pub root: Mat4,
}

#[derive(Clone, Copy, Debug)]
pub struct Cloud<'a> {
    pub buffer: &'a ParticleBuffer,
    /// Applied before the cloud's own yaw.
    pub root: Mat4,
}

impl Cloud<'_> {
    pub fn model(&self) -> Mat4 {
        self.root * self.buffer.model()
    }
}

/// Everything a renderer needs for one frame, borrowed from the scene.
#[derive(Clone, Debug)]
pub struct RenderFrame<'a> {
    pub camera: &'a Camera,
    pub node_sets: SmallVec<[NodeSet<'a>; 2]>,
    pub clouds: SmallVec<[Cloud<'a>; 2]>,
    /// World space.
    pub lights: &'a [Light],
    pub background: Option<Color>,
}

pub trait FrameSink {
    fn render(&mut self, frame: &RenderFrame<'_>);
}

pub trait Animated {
    /// Advance simulation state to `now` (time since the scene started).
    fn advance(&mut self, now: Duration);
    fn frame(&self) -> RenderFrame<'_>;
}

/// Renders nothing; counts frames. Useful for hosts without a surface.
#[derive(Debug, Default)]
pub struct NullSink {
    pub frames: u64,
}

impl FrameSink for NullSink {
    fn render(&mut self, _frame: &RenderFrame<'_>) {
        self.frames += 1;
    }
}

pub struct AnimationLoop<S, R> {
    scene: S,
    sink: R,
    frames: u64,
}

impl<S: Animated, R: FrameSink> AnimationLoop<S, R> {
    pub fn new(scene: S, sink: R) -> Self {
        Self {
            scene,
            sink,
            frames: 0,
        }
    }

    /// One frame: advance, then render exactly once.
    pub fn tick(&mut self, now: Duration) {
        self.scene.advance(now);
        self.sink.render(&self.scene.frame());
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    pub fn into_parts(self) -> (S, R) {
        (self.scene, self.sink)
    }
}

/// Hand a shared loop to `clock`. Event handlers keep their own clone of the
/// `Rc` and mutate the scene between frames.
pub fn start_shared<S, R>(
    shared: &Rc<RefCell<AnimationLoop<S, R>>>,
    clock: &mut impl FrameClock,
) -> CancelHandle
where
    S: Animated + 'static,
    R: FrameSink + 'static,
{
    let shared = shared.clone();
    clock.start(Box::new(move |now| shared.borrow_mut().tick(now)))
}
