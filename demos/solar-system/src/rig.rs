/// Orbit camera driven by pointer, wheel and touch input.

use std::f32::consts::FRAC_PI_2;
use glam::{Vec2, Vec3};
use orrery_engine::PointerButton;

const ROTATE_SENSITIVITY: f32 = 0.01;
const PAN_SENSITIVITY: f32 = 0.1;
const ZOOM_SENSITIVITY: f32 = 0.01;
const ZOOM_SMOOTHING: f32 = 0.1;
pub const MIN_DISTANCE: f32 = 10.0;
pub const MAX_DISTANCE: f32 = 200.0;
pub const START_DISTANCE: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RigMode {
    #[default]
    Idle,
    Rotating,
    Panning,
}

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Pitch, clamped to [-π/2, π/2].
    pub rotation_x: f32,
    /// Yaw, unbounded.
    pub rotation_y: f32,
    pub distance: f32,
    pub target_distance: f32,
    pub pan: Vec2,
    mode: RigMode,
    last_pointer: Vec2,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance: START_DISTANCE,
            target_distance: START_DISTANCE,
            pan: Vec2::ZERO,
            mode: RigMode::Idle,
            last_pointer: Vec2::ZERO,
        }
    }

    pub fn mode(&self) -> RigMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.mode != RigMode::Idle
    }

    /// Returns true when this press started a drag.
    pub fn pointer_down(&mut self, pos: Vec2, button: PointerButton) -> bool {
        if !pos.is_finite() {
            return false;
        }
        self.last_pointer = pos;
        if self.mode != RigMode::Idle {
            return false;
        }
        self.mode = match button {
            PointerButton::Primary => RigMode::Rotating,
            PointerButton::Secondary => RigMode::Panning,
            _ => return false,
        };
        true
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if !pos.is_finite() || !self.is_dragging() {
            return;
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        match self.mode {
            RigMode::Rotating => self.rotate(delta),
            RigMode::Panning => {
                self.pan.x -= delta.x * PAN_SENSITIVITY;
                self.pan.y += delta.y * PAN_SENSITIVITY;
            }
            RigMode::Idle => {}
        }
    }

    /// Release any drag. Used for pointer up, pointer leave and touch end.
    pub fn end_drag(&mut self) {
        self.mode = RigMode::Idle;
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        self.target_distance =
            (self.target_distance + delta_y * ZOOM_SENSITIVITY).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Single-finger touch starts rotating. Returns true when it did.
    pub fn touch_start(&mut self, pos: Vec2, touches: u32) -> bool {
        if touches != 1 || !pos.is_finite() {
            return false;
        }
        self.last_pointer = pos;
        let started = self.mode == RigMode::Idle;
        self.mode = RigMode::Rotating;
        started
    }

    pub fn touch_move(&mut self, pos: Vec2, touches: u32) {
        if touches != 1 || self.mode != RigMode::Rotating || !pos.is_finite() {
            return;
        }
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        self.rotate(delta);
    }

    fn rotate(&mut self, delta: Vec2) {
        self.rotation_y += delta.x * ROTATE_SENSITIVITY;
        self.rotation_x = (self.rotation_x + delta.y * ROTATE_SENSITIVITY).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Ease the distance toward its target and return the new pose.
    pub fn step(&mut self) -> CameraPose {
        self.distance += (self.target_distance - self.distance) * ZOOM_SMOOTHING;
        self.pose()
    }

    pub fn pose(&self) -> CameraPose {
        let (sx, cx) = self.rotation_x.sin_cos();
        let (sy, cy) = self.rotation_y.sin_cos();
        let d = self.distance;
        CameraPose {
            position: Vec3::new(cx * sy * d + self.pan.x, sx * d + self.pan.y, cx * cy * d),
            target: Vec3::new(self.pan.x, self.pan.y, 0.0),
        }
    }
}
