use bytemuck::{Pod, Zeroable};

/// Unique identifier for a node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// A UI event sent from Rust to the host page (tooltips, cursor, control state).
/// Generic container: `kind` identifies the event, `a`, `b`, `c` carry payload.
///
/// Wire format: 4 floats `[kind, a, b, c]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct UiEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl UiEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32, b: f32, c: f32) -> Self {
        Self { kind: kind as f32, a, b, c }
    }

    /// Event kind as an integer.
    pub fn kind(&self) -> u32 {
        self.kind as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<UiEvent>(), UiEvent::FLOATS * 4);
        let event = UiEvent::new(3, 1.0, 2.0, 3.0);
        assert_eq!(event.kind(), 3);
        assert_eq!(bytemuck::cast::<UiEvent, [f32; 4]>(event), [3.0, 1.0, 2.0, 3.0]);
    }
}
