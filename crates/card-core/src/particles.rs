//! Point-cloud simulations: ambient sparkles and falling confetti.
//!
//! Both keep fixed-size buffers that are randomized once and then mutated in
//! place every frame. `ParticleBuffer::generation` is bumped on each update so
//! renderers can skip uploads for unchanged clouds.

use crate::color::Color;
use crate::constants::*;
use glam::{Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct SparkleConfig {
    pub count: usize,
    /// Particles start inside a cube of this half extent around the origin.
    pub half_extent: f32,
    pub color: Color,
    pub size: f32,
    pub opacity: f32,
    /// Vertical drift amplitude; 0 keeps particles still inside the cloud.
    pub drift: f32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            count: 300,
            half_extent: 10.0,
            color: Color::hex(0xffb6c1),
            size: 0.08,
            opacity: 0.6,
            drift: SPARKLE_DRIFT_AMPLITUDE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConfettiConfig {
    pub count: usize,
    /// Horizontal spawn half extent.
    pub half_extent: f32,
    /// Per-frame fall distance range.
    pub min_speed: f32,
    pub max_speed: f32,
    pub colors: Vec<Color>,
    pub size: f32,
    pub floor_y: f32,
    pub reset_y: f32,
    /// Opacity starts decaying once the scene has run this long.
    pub fade_after: Duration,
    pub fade_step: f32,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            count: 200,
            half_extent: 8.0,
            min_speed: 0.02,
            max_speed: 0.06,
            colors: vec![
                Color::hex(0xff69b4),
                Color::hex(0xffd700),
                Color::hex(0x87ceeb),
                Color::hex(0x98fb98),
                Color::hex(0xdda0dd),
                Color::hex(0xffa07a),
            ],
            size: 0.15,
            floor_y: CONFETTI_FLOOR_Y,
            reset_y: CONFETTI_RESET_Y,
            fade_after: Duration::from_secs(5),
            fade_step: CONFETTI_FADE_STEP,
        }
    }
}

/// Parallel per-particle arrays plus the cloud's rigid transform.
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    pub positions: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
    pub size: f32,
    pub opacity: f32,
    /// Rotation of the whole cloud about +Y.
    pub yaw: f32,
    pub generation: u64,
}

impl ParticleBuffer {
    fn with_capacity(count: usize, size: f32, opacity: f32) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            size,
            opacity,
            yaw: 0.0,
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw)
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && !self.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct SparkleField {
    buffer: ParticleBuffer,
    base_y: Vec<f32>,
    drift: f32,
}

impl SparkleField {
    pub fn new(config: &SparkleConfig, rng: &mut impl Rng) -> Self {
        let mut buffer = ParticleBuffer::with_capacity(config.count, config.size, config.opacity);
        let mut base_y = Vec::with_capacity(config.count);
        let h = config.half_extent.max(f32::EPSILON);
        for _ in 0..config.count {
            let p = Vec3::new(
                rng.gen_range(-h..h),
                rng.gen_range(-h..h),
                rng.gen_range(-h..h),
            );
            let shade = rng.gen_range(0.85..=1.0);
            buffer.positions.push(p);
            buffer.colors.push([
                config.color.r * shade,
                config.color.g * shade,
                config.color.b * shade,
            ]);
            base_y.push(p.y);
        }
        Self {
            buffer,
            base_y,
            drift: config.drift,
        }
    }

    /// Per-particle vertical drift with an index phase offset, plus a slow
    /// yaw of the whole cloud.
    pub fn update(&mut self, now: Duration) {
        let t = now.as_secs_f32() * SPARKLE_DRIFT_RATE;
        for (i, (p, y0)) in self
            .buffer
            .positions
            .iter_mut()
            .zip(self.base_y.iter())
            .enumerate()
        {
            p.y = y0 + (t + i as f32).sin() * self.drift;
        }
        self.buffer.yaw += SPARKLE_YAW_PER_FRAME;
        self.buffer.generation += 1;
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn base_y(&self, index: usize) -> Option<f32> {
        self.base_y.get(index).copied()
    }
}

#[derive(Clone, Debug)]
pub struct ConfettiField {
    buffer: ParticleBuffer,
    speeds: Vec<f32>,
    half_extent: f32,
    floor_y: f32,
    reset_y: f32,
    fade_after: Duration,
    fade_step: f32,
    rng: SmallRng,
}

impl ConfettiField {
    pub fn new(config: &ConfettiConfig, rng: &mut impl Rng) -> Self {
        let mut buffer = ParticleBuffer::with_capacity(config.count, config.size, 1.0);
        let mut speeds = Vec::with_capacity(config.count);
        let h = config.half_extent.max(f32::EPSILON);
        let (lo_y, hi_y) = ordered(config.floor_y, config.reset_y);
        let (lo_v, hi_v) = ordered(config.min_speed, config.max_speed);
        for _ in 0..config.count {
            buffer.positions.push(Vec3::new(
                rng.gen_range(-h..h),
                rng.gen_range(lo_y..=hi_y),
                rng.gen_range(-h..h),
            ));
            let color = if config.colors.is_empty() {
                Color::WHITE
            } else {
                config.colors[rng.gen_range(0..config.colors.len())]
            };
            buffer.colors.push(color.to_array());
            speeds.push(rng.gen_range(lo_v..=hi_v));
        }
        Self {
            buffer,
            speeds,
            half_extent: h,
            floor_y: config.floor_y,
            reset_y: config.reset_y,
            fade_after: config.fade_after,
            fade_step: config.fade_step,
            rng: SmallRng::seed_from_u64(rng.gen()),
        }
    }

    /// Fall, recycle below the floor, and fade once past the threshold.
    pub fn update(&mut self, now: Duration) {
        let h = self.half_extent;
        for (p, speed) in self.buffer.positions.iter_mut().zip(self.speeds.iter()) {
            p.y -= speed;
            if p.y < self.floor_y {
                p.y = self.reset_y;
                p.x = self.rng.gen_range(-h..h);
                p.z = self.rng.gen_range(-h..h);
            }
        }
        if now >= self.fade_after && self.buffer.opacity > 0.0 {
            self.buffer.opacity = (self.buffer.opacity - self.fade_step).max(0.0);
        }
        self.buffer.generation += 1;
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn speeds(&self) -> &[f32] {
        &self.speeds
    }

    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }

    pub fn reset_y(&self) -> f32 {
        self.reset_y
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
