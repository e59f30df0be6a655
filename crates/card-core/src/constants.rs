use std::f32::consts::FRAC_PI_4;

// Shared scene tuning constants used by both web and native frontends.

// Orbit
pub const ORBIT_DRAG_SENSITIVITY: f32 = 0.005; // radians per pointer pixel
pub const ORBIT_PITCH_LIMIT: f32 = FRAC_PI_4;
pub const IDLE_YAW_PER_FRAME: f32 = 0.002; // idle auto-rotate

// Camera rig (eye at (0, CAMERA_HEIGHT, distance) looking at the origin)
pub const CAMERA_HEIGHT: f32 = 8.0;
pub const CAMERA_DISTANCE_DEFAULT: f32 = 12.0;
pub const CAMERA_DISTANCE_MIN: f32 = 6.0;
pub const CAMERA_DISTANCE_MAX: f32 = 20.0;
pub const ZOOM_WHEEL_SENSITIVITY: f32 = 0.001; // distance units per wheel pixel
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Table and photo frames
pub const TABLE_TOP_Y: f32 = 0.15; // upper surface of the table top
pub const MAX_PHOTO_FRAMES: usize = 6;
pub const PHOTO_SCATTER_HALF_EXTENT: f32 = 3.0;
pub const PHOTO_EXCLUSION_RADIUS: f32 = 2.5; // keeps frames off the cake
pub const PHOTO_MAX_ROLL: f32 = 0.15; // radians
pub const PHOTO_FRAME_Y: f32 = 0.5;

// Flame flicker
pub const FLAME_TIME_SCALE: f32 = 3.0; // phase advance per second
pub const FLAME_STRETCH_BASE: f32 = 1.2;
pub const FLAME_STRETCH_AMPLITUDE: f32 = 0.2;
pub const FLAME_WIDTH_AMPLITUDE: f32 = 0.08;
pub const FLAME_JITTER_AMPLITUDE: f32 = 0.02;

// Sparkles
pub const SPARKLE_DRIFT_RATE: f32 = 0.5; // phase advance per second
pub const SPARKLE_DRIFT_AMPLITUDE: f32 = 0.15;
pub const SPARKLE_YAW_PER_FRAME: f32 = 0.001;

// Confetti
pub const CONFETTI_FLOOR_Y: f32 = -2.0;
pub const CONFETTI_RESET_Y: f32 = 12.0;
pub const CONFETTI_FADE_STEP: f32 = 0.01; // opacity lost per frame once fading

// Gift box
pub const GIFT_SPIN_PER_FRAME: f32 = 0.005;
pub const GIFT_BOB_AMPLITUDE: f32 = 0.1;
pub const GIFT_OPEN_FRAMES: u32 = 50;
pub const GIFT_LID_RISE: f32 = 2.0;
pub const GIFT_LID_TIP: f32 = 0.3 * std::f32::consts::PI;
pub const GIFT_HOVER_SCALE: f32 = 1.1;
pub const GIFT_HOVER_LERP: f32 = 0.1;

// Page flow
pub const CONTENT_REVEAL_DELAY_SEC: f32 = 1.5;

// Lighting
pub const MAX_POINT_LIGHTS: usize = 8;
