/// Hover picking and the tooltip/cursor events it produces.

use glam::Vec2;
use orrery_engine::{pick, EngineContext, NodeId, Ray};
use serde::Serialize;

use crate::bodies::{BodyRef, Catalog};

/// Offset from the pointer to the tooltip's top-left corner, in pixels.
pub const ANCHOR_OFFSET: Vec2 = Vec2::new(15.0, -10.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipEvent {
    Show { body: BodyRef, anchor: Vec2 },
    Hide,
    Cursor { pointer: bool },
}

/// Tracks the hovered body and the cursor style so events fire only on change.
#[derive(Debug, Default)]
pub struct TooltipBridge {
    hovered: Option<BodyRef>,
    pointer_cursor: bool,
}

impl TooltipBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<BodyRef> {
        self.hovered
    }

    /// Handle a pointer move. `pick` runs only when the camera is not being
    /// dragged.
    pub fn pointer_move(
        &mut self,
        pos: Vec2,
        dragging: bool,
        pick: impl FnOnce() -> Option<BodyRef>,
        out: &mut Vec<TooltipEvent>,
    ) {
        if dragging {
            self.hide(out);
            return;
        }
        match pick() {
            Some(body) => {
                if self.hovered != Some(body) {
                    self.hovered = Some(body);
                    out.push(TooltipEvent::Show { body, anchor: pos + ANCHOR_OFFSET });
                }
                self.set_cursor(true, out);
            }
            None => {
                self.hide(out);
                self.set_cursor(false, out);
            }
        }
    }

    /// Leaving the canvas always hides.
    pub fn pointer_leave(&mut self, out: &mut Vec<TooltipEvent>) {
        self.hovered = None;
        out.push(TooltipEvent::Hide);
    }

    pub fn drag_started(&mut self, out: &mut Vec<TooltipEvent>) {
        self.hide(out);
    }

    /// Hide the tooltip if one is showing.
    pub fn hide(&mut self, out: &mut Vec<TooltipEvent>) {
        if self.hovered.take().is_some() {
            out.push(TooltipEvent::Hide);
        }
    }

    fn set_cursor(&mut self, pointer: bool, out: &mut Vec<TooltipEvent>) {
        if self.pointer_cursor != pointer {
            self.pointer_cursor = pointer;
            out.push(TooltipEvent::Cursor { pointer });
        }
    }
}

/// Cast a ray from the camera through the pixel `pos` and return the nearest
/// body among `candidates`.
pub fn pick_body(
    ctx: &EngineContext,
    pos: Vec2,
    candidates: impl IntoIterator<Item = NodeId>,
) -> Option<BodyRef> {
    if !ctx.viewport.is_valid() || !pos.is_finite() {
        return None;
    }
    let ray = Ray::from_ndc(&ctx.camera, ctx.viewport.to_ndc(pos));
    let hit = pick(&ctx.scene, &ray, candidates)?;
    hit.user_data.map(BodyRef::from_code)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub label: &'static str,
    pub value: String,
}

/// What the page shows for a hovered body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    pub rows: Vec<TooltipRow>,
}

impl TooltipContent {
    pub fn for_body(catalog: &Catalog, body: BodyRef) -> Option<Self> {
        let desc = catalog.body(body)?;
        let mut content = TooltipContent {
            title: desc.name.clone(),
            accent: None,
            rows: Vec::new(),
        };
        let Some(info) = &desc.info else {
            return Some(content);
        };
        content.accent = Some(format!("#{:06x}", desc.color & 0xFF_FFFF));

        let fields: [(&'static str, &Option<String>); 3] = match body {
            BodyRef::Sun => [
                ("Mass", &info.mass),
                ("Temperature", &info.temperature),
                ("Type", &info.kind),
            ],
            BodyRef::Planet(_) => [
                ("Distance", &info.distance),
                ("Day Length", &info.day),
                ("Year Length", &info.year),
            ],
        };
        content.rows = std::iter::once(("Diameter", &info.diameter))
            .chain(fields)
            .filter_map(|(label, value)| {
                value.as_ref().map(|v| TooltipRow { label, value: v.clone() })
            })
            .collect();
        Some(content)
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}
