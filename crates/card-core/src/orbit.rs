//! Pointer-driven scene orbit.
//!
//! Dragging rotates the whole scene (yaw about Y, pitch about X); the wheel
//! moves the camera along its rig. All state changes go through
//! [`transition`], which is a pure function of the previous state.

use crate::constants::*;
use glam::{Mat4, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitParams {
    /// Radians per pointer pixel.
    pub drag_sensitivity: f32,
    pub pitch_limit: f32,
    pub idle_yaw_per_frame: f32,
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            drag_sensitivity: ORBIT_DRAG_SENSITIVITY,
            pitch_limit: ORBIT_PITCH_LIMIT,
            idle_yaw_per_frame: IDLE_YAW_PER_FRAME,
            zoom_sensitivity: ZOOM_WHEEL_SENSITIVITY,
            min_distance: CAMERA_DISTANCE_MIN,
            max_distance: CAMERA_DISTANCE_MAX,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    pub dragging: bool,
    pub last_pointer: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitInput {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    /// One animation frame elapsed.
    Frame,
}

pub fn transition(state: OrbitState, input: OrbitInput, params: &OrbitParams) -> OrbitState {
    match input {
        OrbitInput::PointerDown(at) => OrbitState {
            dragging: true,
            last_pointer: at,
            ..state
        },
        OrbitInput::PointerMove(at) if state.dragging => {
            let delta = at - state.last_pointer;
            OrbitState {
                yaw: state.yaw + delta.x * params.drag_sensitivity,
                pitch: (state.pitch + delta.y * params.drag_sensitivity)
                    .clamp(-params.pitch_limit, params.pitch_limit),
                last_pointer: at,
                ..state
            }
        }
        OrbitInput::PointerMove(_) => state,
        OrbitInput::PointerUp => OrbitState {
            dragging: false,
            ..state
        },
        OrbitInput::Frame if !state.dragging => OrbitState {
            yaw: state.yaw + params.idle_yaw_per_frame,
            ..state
        },
        OrbitInput::Frame => state,
    }
}

/// Wheel zoom; independent of the drag state.
pub fn zoom(distance: f32, delta_y: f32, params: &OrbitParams) -> f32 {
    (distance + delta_y * params.zoom_sensitivity).clamp(params.min_distance, params.max_distance)
}

#[derive(Clone, Debug)]
pub struct OrbitController {
    pub state: OrbitState,
    pub params: OrbitParams,
    distance: f32,
}

impl OrbitController {
    pub fn new(params: OrbitParams) -> Self {
        Self {
            state: OrbitState::default(),
            distance: CAMERA_DISTANCE_DEFAULT.clamp(params.min_distance, params.max_distance),
            params,
        }
    }

    pub fn apply(&mut self, input: OrbitInput) {
        self.state = transition(self.state, input, &self.params);
    }

    pub fn pointer_down(&mut self, at: Vec2) {
        self.apply(OrbitInput::PointerDown(at));
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.apply(OrbitInput::PointerMove(at));
    }

    pub fn pointer_up(&mut self) {
        self.apply(OrbitInput::PointerUp);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        self.distance = zoom(self.distance, delta_y, &self.params);
    }

    pub fn idle_step(&mut self) {
        self.apply(OrbitInput::Frame);
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Scene root rotation: yaw about Y, then pitch about X.
    pub fn root_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.state.pitch) * Mat4::from_rotation_y(self.state.yaw)
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitParams::default())
    }
}
