/// Frame buffer layout shared with the host renderer.
/// Must stay in sync with the page's `protocol.js`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 40 floats]
/// [Instances: max_instances × 28 floats]
/// [Points: max_points × 6 floats]
/// [Lights: max_lights × 12 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame so the host can
/// compute offsets without a separate handshake.

use crate::api::app::AppConfig;
use crate::api::types::UiEvent;
use crate::components::points::PointVertex;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::RenderInstance;
use crate::systems::lighting::LightRecord;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_POINTS: usize = 4;
pub const HEADER_POINT_COUNT: usize = 5;
pub const HEADER_MAX_LIGHTS: usize = 6;
pub const HEADER_LIGHT_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_VIEWPORT_WIDTH: usize = 10;
pub const HEADER_VIEWPORT_HEIGHT: usize = 11;
pub const HEADER_CLEAR_R: usize = 12;
pub const HEADER_CLEAR_G: usize = 13;
pub const HEADER_CLEAR_B: usize = 14;
pub const HEADER_SHADOWS: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_points: usize,
    pub max_lights: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub instance_data_offset: usize,
    pub point_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_points: usize, max_lights: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CameraUniform::FLOATS;
        let point_data_offset = instance_data_offset + max_instances * RenderInstance::FLOATS;
        let light_data_offset = point_data_offset + max_points * PointVertex::FLOATS;
        let event_data_offset = light_data_offset + max_lights * LightRecord::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * UiEvent::FLOATS;

        Self {
            max_instances,
            max_points,
            max_lights,
            max_events,
            camera_offset,
            instance_data_offset,
            point_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_points,
            config.max_lights,
            config.max_events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sizes() {
        let layout = ProtocolLayout::from_config(&AppConfig::default());
        assert_eq!(layout.max_instances, 64);
        assert_eq!(layout.max_points, 4096);
        assert_eq!(layout.max_lights, 8);
        assert_eq!(layout.max_events, 32);

        let expected = 16 + 40 + 64 * 28 + 4096 * 6 + 8 * 12 + 32 * 4;
        assert_eq!(layout.buffer_total_floats, expected);
        assert_eq!(layout.buffer_total_bytes, expected * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20, 3, 5);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS + 40);
        assert_eq!(layout.point_data_offset, layout.instance_data_offset + 10 * 28);
        assert_eq!(layout.light_data_offset, layout.point_data_offset + 20 * 6);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + 3 * 12);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 5 * 4);
    }

    #[test]
    fn header_indices_fit() {
        assert!(HEADER_SHADOWS < HEADER_FLOATS);
    }
}
