/// Mouse button reported with pointer presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i32) -> Self {
        match button {
            0 => PointerButton::Primary,
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            other => PointerButton::Other(other.clamp(0, u16::MAX as i32) as u16),
        }
    }
}

/// Input event types the engine understands.
/// Coordinates are CSS pixels relative to the canvas' top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerUp { x: f32, y: f32, button: PointerButton },
    PointerMove { x: f32, y: f32 },
    /// The pointer left the canvas.
    PointerLeave,
    /// Wheel scroll; positive `delta_y` scrolls down.
    Wheel { delta_y: f32 },
    /// `touches` is the number of active contacts after the change.
    TouchStart { x: f32, y: f32, touches: u32 },
    TouchMove { x: f32, y: f32, touches: u32 },
    TouchEnd { touches: u32 },
    /// The drawing surface changed size.
    Resize { width: f32, height: f32 },
    /// The page was hidden or shown.
    Visibility { visible: bool },
    /// A custom event from the UI layer (buttons, sliders).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host pushes events between frames; the app reads them in order on the next tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, button: PointerButton::Primary });
        q.push(InputEvent::Wheel { delta_y: 120.0 });
        q.push(InputEvent::PointerLeave);
        assert_eq!(q.len(), 3);
        let events = q.drain();
        assert_eq!(events[1], InputEvent::Wheel { delta_y: 120.0 });
        assert_eq!(events[2], InputEvent::PointerLeave);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        match q.drain()[0] {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 7);
                assert_eq!((a, b, c), (1.5, 2.5, 3.5));
            }
            _ => panic!("Expected Custom event"),
        }
    }

    #[test]
    fn dom_buttons() {
        assert_eq!(PointerButton::from_dom(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_dom(1), PointerButton::Middle);
        assert_eq!(PointerButton::from_dom(2), PointerButton::Secondary);
        assert_eq!(PointerButton::from_dom(4), PointerButton::Other(4));
        assert_eq!(PointerButton::from_dom(-1), PointerButton::Other(0));
    }
}
