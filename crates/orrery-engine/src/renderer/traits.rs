//! Renderer contract.
//!
//! The engine never draws. Each frame it hands a `FrameData` snapshot to a
//! `Renderer`, which either packs it for a host-side renderer (the web bridge
//! writes a flat f32 buffer read by three.js) or records it in tests.

use super::camera::{CameraUniform, Viewport};
use super::instance::RenderInstance;
use crate::api::app::AppConfig;
use crate::api::types::UiEvent;
use crate::components::mesh::Color;
use crate::components::points::PointVertex;
use crate::systems::lighting::LightRecord;

/// Frame-wide presentation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub clear_color: Color,
    pub shadows: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            shadows: true,
        }
    }
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Monotonic frame number.
    pub frame: u64,
    pub viewport: Viewport,
    pub camera: CameraUniform,
    pub settings: RenderSettings,
    pub instances: &'a [RenderInstance],
    pub points: &'a [PointVertex],
    pub lights: &'a [LightRecord],
    /// UI events emitted this frame, in emission order.
    pub events: &'a [UiEvent],
}

pub trait Renderer {
    /// Backend identifier (e.g. "shared-buffer").
    fn backend(&self) -> &'static str;

    /// Size internal buffers for the app's capacities. Called once before the first frame.
    fn prepare(&mut self, _config: &AppConfig) {}

    fn draw(&mut self, frame: &FrameData);

    fn resize(&mut self, viewport: Viewport);
}
