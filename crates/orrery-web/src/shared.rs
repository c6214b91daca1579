use orrery_engine::bridge::protocol::*;
use orrery_engine::{AppConfig, FrameData, ProtocolLayout, Renderer, Viewport};

/// Renderer that packs each frame into one flat f32 buffer for the page's
/// three.js renderer, which reads it straight out of WASM memory.
pub struct SharedBufferRenderer {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    viewport: Viewport,
    overflow_warned: bool,
}

impl SharedBufferRenderer {
    pub fn new() -> Self {
        let layout = ProtocolLayout::from_config(&AppConfig::default());
        Self {
            buffer: vec![0.0; layout.buffer_total_floats],
            layout,
            viewport: Viewport::default(),
            overflow_warned: false,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    pub fn ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn len(&self) -> u32 {
        self.buffer.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Copy at most `max` records into the section starting at `offset`.
    /// Returns how many were written.
    fn write_section<T: bytemuck::Pod>(&mut self, offset: usize, items: &[T], max: usize) -> usize {
        let count = items.len().min(max);
        if count < items.len() && !self.overflow_warned {
            log::warn!(
                "shared buffer: {} records truncated to capacity {}",
                items.len(),
                max
            );
            self.overflow_warned = true;
        }
        let floats: &[f32] = bytemuck::cast_slice(&items[..count]);
        self.buffer[offset..offset + floats.len()].copy_from_slice(floats);
        count
    }
}

impl Default for SharedBufferRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SharedBufferRenderer {
    fn backend(&self) -> &'static str {
        "shared-buffer"
    }

    fn prepare(&mut self, config: &AppConfig) {
        self.layout = ProtocolLayout::from_config(config);
        self.buffer = vec![0.0; self.layout.buffer_total_floats];
        self.overflow_warned = false;
    }

    fn draw(&mut self, frame: &FrameData) {
        let layout = self.layout.clone();

        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame.camera));
        self.buffer[layout.camera_offset..layout.camera_offset + camera.len()].copy_from_slice(camera);

        let instances = self.write_section(layout.instance_data_offset, frame.instances, layout.max_instances);
        let points = self.write_section(layout.point_data_offset, frame.points, layout.max_points);
        let lights = self.write_section(layout.light_data_offset, frame.lights, layout.max_lights);
        let events = self.write_section(layout.event_data_offset, frame.events, layout.max_events);

        let clear = frame.settings.clear_color;
        let header = &mut self.buffer[..HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame.frame as f32;
        header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instances as f32;
        header[HEADER_MAX_POINTS] = layout.max_points as f32;
        header[HEADER_POINT_COUNT] = points as f32;
        header[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = lights as f32;
        header[HEADER_MAX_EVENTS] = layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = events as f32;
        header[HEADER_VIEWPORT_WIDTH] = self.viewport.width;
        header[HEADER_VIEWPORT_HEIGHT] = self.viewport.height;
        header[HEADER_CLEAR_R] = clear.r;
        header[HEADER_CLEAR_G] = clear.g;
        header[HEADER_CLEAR_B] = clear.b;
        header[HEADER_SHADOWS] = if frame.settings.shadows { 1.0 } else { 0.0 };
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}
