use orrery_engine::{Color, EngineContext, NodeId};

/// Page color scheme. The scene follows it through the clear color and the
/// starfield opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn clear_color(self) -> Color {
        match self {
            Theme::Dark => Color::from_hex(0x0a0a0a),
            Theme::Light => Color::from_hex(0xf0f0f0),
        }
    }

    pub fn starfield_opacity(self) -> f32 {
        match self {
            Theme::Dark => 0.8,
            Theme::Light => 0.3,
        }
    }

    /// 0 is dark, anything else light.
    pub fn from_index(index: u32) -> Self {
        if index == 0 { Theme::Dark } else { Theme::Light }
    }

    pub fn index(self) -> u32 {
        match self {
            Theme::Dark => 0,
            Theme::Light => 1,
        }
    }

    pub fn apply(self, ctx: &mut EngineContext, starfield: Option<NodeId>) {
        ctx.settings.clear_color = self.clear_color();
        let points = starfield
            .and_then(|id| ctx.scene.get_mut(id))
            .and_then(|node| node.points.as_mut());
        if let Some(points) = points {
            points.opacity = self.starfield_opacity();
        }
    }
}
