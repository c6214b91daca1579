/// Solar System: a sun, eight planets on decorative circular orbits and a
/// starfield, with an orbit camera, hover tooltips and speed controls.

use glam::Vec2;
use orrery_engine::core::time::sanitize_delta;
use orrery_engine::*;

use crate::bodies::{BodyRef, Catalog};
use crate::builder::{
    build_planet, build_starfield, build_sun, random_orbit_angle, setup_lighting, BodyInstance,
    StarfieldHandle, STAR_COUNT,
};
use crate::rig::CameraRig;
use crate::theme::Theme;
use crate::tooltip::{pick_body, TooltipBridge, TooltipContent, TooltipEvent};

// ── Custom event kinds from the page ────────────────────────────────

pub mod custom {
    /// a = global speed factor.
    pub const SET_GLOBAL_SPEED: u32 = 1;
    pub const TOGGLE_PAUSE: u32 = 2;
    /// a != 0 pauses.
    pub const SET_PAUSED: u32 = 3;
    /// a = planet index, b = orbital speed multiplier.
    pub const SET_BODY_SPEED: u32 = 4;
    pub const TOGGLE_THEME: u32 = 5;
    /// a = 0 dark, 1 light.
    pub const SET_THEME: u32 = 6;
}

// ── UI event kinds to the page ──────────────────────────────────────

pub mod events {
    /// a = body code, b/c = tooltip anchor in pixels.
    pub const TOOLTIP_SHOW: u32 = 1;
    pub const TOOLTIP_HIDE: u32 = 2;
    /// a = 1 pointer, 0 default.
    pub const CURSOR: u32 = 3;
    /// a = 1 paused.
    pub const PAUSE_STATE: u32 = 4;
    /// a = theme index.
    pub const THEME: u32 = 5;
    /// a = planet index, b = multiplier.
    pub const BODY_SPEED: u32 = 6;
}

// ── Animation ───────────────────────────────────────────────────────

const STARFIELD_SPIN: f32 = 0.01;
pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;
const DEFAULT_SEED: u64 = 0x0A11_5EED_1234_5678;

pub struct SolarSystem {
    catalog: Option<Catalog>,
    rng: Rng,
    rig: CameraRig,
    tooltip: TooltipBridge,
    theme: Theme,
    /// Scales every time-dependent rate. Not clamped.
    global_speed: f32,
    /// Freezes bodies and stars. The camera keeps responding.
    paused: bool,

    sun: Option<BodyInstance>,
    planets: Vec<BodyInstance>,
    starfield: Option<StarfieldHandle>,
    /// Mesh nodes the pointer can hover, sun first.
    pick_targets: Vec<NodeId>,
    tooltip_scratch: Vec<TooltipEvent>,
    pending: PendingUi,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Orbit phases and the starfield depend only on `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            catalog: None,
            rng: Rng::new(seed),
            rig: CameraRig::new(),
            tooltip: TooltipBridge::new(),
            theme: Theme::default(),
            global_speed: 1.0,
            paused: false,
            sun: None,
            planets: Vec::new(),
            starfield: None,
            pick_targets: Vec::new(),
            tooltip_scratch: Vec::new(),
            pending: PendingUi::default(),
        }
    }

    /// Use `catalog` instead of the built-in one.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn global_speed(&self) -> f32 {
        self.global_speed
    }

    pub fn hovered(&self) -> Option<BodyRef> {
        self.tooltip.hovered()
    }

    pub fn sun(&self) -> Option<&BodyInstance> {
        self.sun.as_ref()
    }

    pub fn planets(&self) -> &[BodyInstance] {
        &self.planets
    }

    pub fn starfield(&self) -> Option<StarfieldHandle> {
        self.starfield
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, event: InputEvent) {
        let mut out = std::mem::take(&mut self.tooltip_scratch);

        match event {
            InputEvent::PointerDown { x, y, button } => {
                self.rig.pointer_down(Vec2::new(x, y), button);
                // Any press hides the tooltip, whether or not it starts a drag.
                self.tooltip.drag_started(&mut out);
            }
            InputEvent::PointerMove { x, y } => {
                let pos = Vec2::new(x, y);
                self.rig.pointer_move(pos);
                let dragging = self.rig.is_dragging();
                let targets = &self.pick_targets;
                let view: &EngineContext = ctx;
                self.tooltip.pointer_move(
                    pos,
                    dragging,
                    || pick_body(view, pos, targets.iter().copied()),
                    &mut out,
                );
            }
            InputEvent::PointerUp { .. } => self.rig.end_drag(),
            InputEvent::PointerLeave => {
                self.rig.end_drag();
                self.tooltip.pointer_leave(&mut out);
            }
            InputEvent::Wheel { delta_y } => self.rig.wheel(delta_y),
            InputEvent::TouchStart { x, y, touches } => {
                self.rig.touch_start(Vec2::new(x, y), touches);
                self.tooltip.drag_started(&mut out);
            }
            InputEvent::TouchMove { x, y, touches } => self.rig.touch_move(Vec2::new(x, y), touches),
            InputEvent::TouchEnd { .. } => self.rig.end_drag(),
            InputEvent::Resize { width, height } => {
                log::debug!("solar-system: viewport {}x{}", width, height);
                self.tooltip.hide(&mut out);
            }
            InputEvent::Visibility { .. } => {}
            InputEvent::Custom { kind, a, b, .. } => self.handle_custom(ctx, kind, a, b),
        }

        for event in out.drain(..) {
            self.pending.record_tooltip(event);
        }
        self.tooltip_scratch = out;
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            custom::SET_GLOBAL_SPEED => {
                if a.is_finite() {
                    self.global_speed = a;
                    log::debug!("solar-system: global speed {}", a);
                } else {
                    log::warn!("solar-system: ignoring global speed {}", a);
                }
            }
            custom::TOGGLE_PAUSE => self.set_paused(!self.paused),
            custom::SET_PAUSED => self.set_paused(a != 0.0),
            custom::SET_BODY_SPEED => self.set_body_speed(a, b),
            custom::TOGGLE_THEME => self.set_theme(ctx, self.theme.toggled()),
            custom::SET_THEME => self.set_theme(ctx, Theme::from_index(a as u32)),
            other => log::debug!("solar-system: unknown custom event {}", other),
        }
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        log::info!("solar-system: {}", if paused { "paused" } else { "resumed" });
        self.pending.paused = Some(paused);
    }

    fn set_body_speed(&mut self, index: f32, multiplier: f32) {
        let valid_index = index.is_finite() && index >= 0.0 && index.fract() == 0.0;
        let planet = if valid_index { self.planets.get_mut(index as usize) } else { None };
        let Some(planet) = planet else {
            log::warn!("solar-system: no planet at index {}", index);
            return;
        };
        if !multiplier.is_finite() {
            log::warn!("solar-system: ignoring speed multiplier {}", multiplier);
            return;
        }
        planet.speed_multiplier = multiplier.clamp(0.0, MAX_SPEED_MULTIPLIER);
        log::debug!("solar-system: planet {} speed x{}", index, planet.speed_multiplier);
        self.pending.record_body_speed(index as usize, planet.speed_multiplier);
    }

    fn set_theme(&mut self, ctx: &mut EngineContext, theme: Theme) {
        self.theme = theme;
        theme.apply(ctx, self.starfield.map(|s| s.node));
        log::info!("solar-system: {:?} theme", theme);
        self.pending.theme = Some(theme);
    }

    // ── Animation ──────────────────────────────────────────────────

    fn advance(&mut self, ctx: &mut EngineContext, elapsed: f32) {
        let global = self.global_speed;
        if let Some(sun) = &mut self.sun {
            sun.advance(&mut ctx.graph, elapsed, global);
        }
        if let Some(stars) = self.starfield {
            if let Some(local) = ctx.graph.get_local_mut(stars.node) {
                local.rotation.y += elapsed * STARFIELD_SPIN * global;
            }
        }
        for planet in &mut self.planets {
            planet.advance(&mut ctx.graph, elapsed, global);
        }
    }
}

/// UI state changes gathered while consuming one tick's input. Each slot keeps
/// only its latest value, so the page always ends the tick with the final
/// state and an input burst cannot overflow the event buffer.
#[derive(Debug, Default)]
struct PendingUi {
    /// Last Show or Hide.
    tooltip: Option<TooltipEvent>,
    cursor: Option<bool>,
    paused: Option<bool>,
    theme: Option<Theme>,
    /// At most one entry per planet.
    body_speeds: Vec<(usize, f32)>,
}

impl PendingUi {
    fn record_tooltip(&mut self, event: TooltipEvent) {
        match event {
            TooltipEvent::Cursor { pointer } => self.cursor = Some(pointer),
            other => self.tooltip = Some(other),
        }
    }

    fn record_body_speed(&mut self, index: usize, multiplier: f32) {
        match self.body_speeds.iter_mut().find(|(i, _)| *i == index) {
            Some(slot) => slot.1 = multiplier,
            None => self.body_speeds.push((index, multiplier)),
        }
    }

    fn flush(&mut self, ctx: &mut EngineContext) {
        if let Some(event) = self.tooltip.take() {
            ctx.emit_event(tooltip_ui_event(event));
        }
        if let Some(pointer) = self.cursor.take() {
            ctx.emit_event(tooltip_ui_event(TooltipEvent::Cursor { pointer }));
        }
        if let Some(paused) = self.paused.take() {
            ctx.emit_event(UiEvent::new(events::PAUSE_STATE, paused as u32 as f32, 0.0, 0.0));
        }
        if let Some(theme) = self.theme.take() {
            ctx.emit_event(UiEvent::new(events::THEME, theme.index() as f32, 0.0, 0.0));
        }
        for (index, multiplier) in self.body_speeds.drain(..) {
            ctx.emit_event(UiEvent::new(events::BODY_SPEED, index as f32, multiplier, 0.0));
        }
    }
}

fn tooltip_ui_event(event: TooltipEvent) -> UiEvent {
    match event {
        TooltipEvent::Show { body, anchor } => {
            UiEvent::new(events::TOOLTIP_SHOW, body.code() as f32, anchor.x, anchor.y)
        }
        TooltipEvent::Hide => UiEvent::new(events::TOOLTIP_HIDE, 0.0, 0.0, 0.0),
        TooltipEvent::Cursor { pointer } => UiEvent::new(events::CURSOR, pointer as u32 as f32, 0.0, 0.0),
    }
}

impl App for SolarSystem {
    fn config(&self) -> AppConfig {
        AppConfig {
            max_instances: 32,
            max_points: 4096,
            ..AppConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        let catalog = match self.catalog.take() {
            Some(catalog) => catalog,
            None => Catalog::load()?,
        };

        // ── Lights and backdrop ──────────────────────────────────────
        setup_lighting(ctx);
        let stars = build_starfield(ctx, &mut self.rng, STAR_COUNT);
        log::debug!("solar-system: {} stars", stars.count);
        self.starfield = Some(stars);

        // ── Sun ──────────────────────────────────────────────────────
        let sun = build_sun(ctx, &catalog.sun);
        self.pick_targets.push(sun.mesh);
        self.sun = Some(sun);

        // ── Planets ──────────────────────────────────────────────────
        for (index, desc) in catalog.planets.iter().enumerate() {
            let angle = random_orbit_angle(&mut self.rng);
            let planet = build_planet(ctx, index, desc, angle);
            log::debug!("solar-system: {} at distance {} phase {:.2}", desc.body.name, desc.distance, angle);
            self.pick_targets.push(planet.mesh);
            self.planets.push(planet);
        }

        self.theme.apply(ctx, Some(stars.node));
        let pose = self.rig.pose();
        ctx.camera.look_at(pose.position, pose.target);

        log::info!("solar-system: scene ready with {} planets", self.planets.len());
        self.catalog = Some(catalog);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, elapsed: f32) {
        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            self.handle_input(ctx, *event);
        }
        self.pending.flush(ctx);

        // ── Camera ───────────────────────────────────────────────────
        let pose = self.rig.step();
        ctx.camera.look_at(pose.position, pose.target);

        // ── Bodies ───────────────────────────────────────────────────
        if !self.paused {
            self.advance(ctx, sanitize_delta(elapsed));
        }
    }

    fn query(&self, name: &str) -> Option<String> {
        match name {
            "tooltip" => {
                let body = self.tooltip.hovered()?;
                TooltipContent::for_body(self.catalog.as_ref()?, body)?.to_json()
            }
            "catalog" => serde_json::to_string(self.catalog.as_ref()?).ok(),
            _ => None,
        }
    }
}
