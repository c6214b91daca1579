/// Scene construction: sun, planets on orbit pivots, starfield and lights.

use std::f32::consts::TAU;
use glam::Vec3;
use orrery_engine::{
    Color, EngineContext, Light, LocalTransform, Material, MeshComponent, Node, NodeId,
    PointCloud, PointVertex, Rng, TransformGraph,
};

use crate::bodies::{BodyDescriptor, BodyRef, PlanetDescriptor};

const SUN_SEGMENTS: u32 = 32;
const PLANET_SEGMENTS: u32 = 16;

pub const STAR_COUNT: usize = 3000;
const STAR_MIN_RADIUS: f32 = 400.0;
const STAR_MAX_RADIUS: f32 = 800.0;
const STAR_SIZE: f32 = 2.0;
pub const STAR_OPACITY: f32 = 0.8;

/// Runtime state for one body: its nodes and animation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInstance {
    pub body: BodyRef,
    /// The rendered sphere. Its Y rotation is the body's spin.
    pub mesh: NodeId,
    /// Planets only: the node at the origin whose Y rotation is the orbit angle.
    pub pivot: Option<NodeId>,
    /// Orbital angular velocity (0 for the sun).
    pub speed: f32,
    pub rotation_speed: f32,
    pub orbit_angle: f32,
    /// Per-body multiplier on orbital speed, in [0, 3].
    pub speed_multiplier: f32,
}

impl BodyInstance {
    /// Advance orbit and spin by `elapsed` seconds. Spin ignores the per-body multiplier.
    pub fn advance(&mut self, graph: &mut TransformGraph, elapsed: f32, global_speed: f32) {
        if let Some(pivot) = self.pivot {
            self.orbit_angle += elapsed * self.speed * global_speed * self.speed_multiplier;
            if let Some(local) = graph.get_local_mut(pivot) {
                local.rotation.y = self.orbit_angle;
            }
        }
        if let Some(local) = graph.get_local_mut(self.mesh) {
            local.rotation.y += elapsed * self.rotation_speed * global_speed;
        }
    }

    /// Current spin angle of the mesh.
    pub fn spin(&self, graph: &TransformGraph) -> f32 {
        graph.get_local(self.mesh).map_or(0.0, |l| l.rotation.y)
    }
}

/// The backdrop node and how many stars it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldHandle {
    pub node: NodeId,
    pub count: usize,
}

pub fn build_sun(ctx: &mut EngineContext, sun: &BodyDescriptor) -> BodyInstance {
    let id = ctx.next_id();
    let mesh = MeshComponent::sphere(sun.radius, SUN_SEGMENTS, Color::from_hex(sun.color))
        .with_material(Material::Basic);
    let node = Node::new(id)
        .with_tag(sun.name.clone())
        .with_mesh(mesh)
        .with_user_data(BodyRef::Sun.code());
    let mesh = ctx.spawn(node, LocalTransform::new(), None);

    BodyInstance {
        body: BodyRef::Sun,
        mesh,
        pivot: None,
        speed: 0.0,
        rotation_speed: sun.rotation_speed,
        orbit_angle: 0.0,
        speed_multiplier: 1.0,
    }
}

pub fn build_planet(
    ctx: &mut EngineContext,
    index: usize,
    planet: &PlanetDescriptor,
    initial_angle: f32,
) -> BodyInstance {
    let body = BodyRef::Planet(index);

    let pivot_id = ctx.next_id();
    let pivot = ctx.spawn(
        Node::new(pivot_id).with_tag(format!("{}-orbit", planet.body.name)),
        LocalTransform::new().with_rotation(Vec3::new(0.0, initial_angle, 0.0)),
        None,
    );

    let mesh_id = ctx.next_id();
    let mesh = MeshComponent::sphere(planet.body.radius, PLANET_SEGMENTS, Color::from_hex(planet.body.color))
        .with_material(Material::Lambert)
        .with_shadows(true, true);
    let mesh = ctx.spawn(
        Node::new(mesh_id)
            .with_tag(planet.body.name.clone())
            .with_mesh(mesh)
            .with_user_data(body.code()),
        LocalTransform::new().with_translation(Vec3::new(planet.distance, 0.0, 0.0)),
        Some(pivot),
    );

    BodyInstance {
        body,
        mesh,
        pivot: Some(pivot),
        speed: planet.speed,
        rotation_speed: planet.body.rotation_speed,
        orbit_angle: initial_angle,
        speed_multiplier: 1.0,
    }
}

/// Uniform initial orbit angle in [0, 2π).
pub fn random_orbit_angle(rng: &mut Rng) -> f32 {
    (rng.next_f32() * TAU) % TAU
}

/// One sampled star: position on the shell, its polar angle and tint.
#[derive(Debug, Clone, Copy)]
pub struct StarSample {
    pub position: Vec3,
    pub phi: f32,
    pub color: Color,
}

/// Sample a star uniformly over solid angle on a shell of radius [400, 800).
pub fn sample_star(rng: &mut Rng) -> StarSample {
    let radius = rng.range(STAR_MIN_RADIUS, STAR_MAX_RADIUS);
    let theta = rng.range(0.0, TAU);
    let phi = rng.range(-1.0, 1.0).clamp(-1.0, 1.0).acos();
    let position = Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    );
    let color = Color::from_hsl(
        rng.range(0.15, 0.25),
        rng.range(0.2, 0.5),
        rng.range(0.8, 1.0),
    );
    StarSample { position, phi, color }
}

pub fn build_starfield(ctx: &mut EngineContext, rng: &mut Rng, count: usize) -> StarfieldHandle {
    let vertices: Vec<PointVertex> = (0..count)
        .map(|_| {
            let star = sample_star(rng);
            PointVertex {
                x: star.position.x,
                y: star.position.y,
                z: star.position.z,
                r: star.color.r,
                g: star.color.g,
                b: star.color.b,
            }
        })
        .collect();

    let id = ctx.next_id();
    let node = Node::new(id)
        .with_tag("starfield")
        .with_points(PointCloud::new(vertices, STAR_SIZE, STAR_OPACITY));
    let node = ctx.spawn(node, LocalTransform::new(), None);
    StarfieldHandle { node, count }
}

/// Dim ambient fill, the sun as a shadow-casting point light, and a weak
/// directional light so night sides are not black.
pub fn setup_lighting(ctx: &mut EngineContext) {
    ctx.lights.add(Light::ambient(Color::from_hex(0x404040), 0.4));
    ctx.lights.add(Light::point(Vec3::ZERO, Color::WHITE, 2.0, 200.0).with_shadow(true));
    ctx.lights.add(Light::directional(Vec3::splat(10.0), Color::WHITE, 0.3));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Catalog;
    use orrery_engine::LightKind;

    #[test]
    fn sun_sits_at_the_origin_unlit() {
        let catalog = Catalog::load().unwrap();
        let mut ctx = EngineContext::new();
        let sun = build_sun(&mut ctx, &catalog.sun);
        ctx.propagate();

        let node = ctx.scene.get(sun.mesh).unwrap();
        assert_eq!(node.world_position(), Vec3::ZERO);
        assert_eq!(node.user_data, Some(0));
        let mesh = node.mesh.unwrap();
        assert_eq!(mesh.material, Material::Basic);
        assert_eq!(mesh.segments(), 32);
        assert_eq!(mesh.radius(), 3.0);
        assert!(sun.pivot.is_none());
    }

    #[test]
    fn planet_hangs_off_its_pivot() {
        let catalog = Catalog::load().unwrap();
        let mut ctx = EngineContext::new();
        let earth = build_planet(&mut ctx, 2, catalog.planet(2).unwrap(), 0.0);
        ctx.propagate();

        let pivot = earth.pivot.unwrap();
        assert_eq!(ctx.graph.get_parent(earth.mesh), Some(pivot));
        assert!(ctx.scene.get(pivot).unwrap().mesh.is_none());

        let node = ctx.scene.get(earth.mesh).unwrap();
        assert!((node.world_position() - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(node.user_data, Some(3));
        let mesh = node.mesh.unwrap();
        assert_eq!(mesh.material, Material::Lambert);
        assert!(mesh.cast_shadow && mesh.receive_shadow);
    }

    #[test]
    fn orbit_advances_by_elapsed_times_speed() {
        let catalog = Catalog::load().unwrap();
        let mut ctx = EngineContext::new();
        let mut earth = build_planet(&mut ctx, 2, catalog.planet(2).unwrap(), 0.5);

        earth.advance(&mut ctx.graph, 2.0, 1.0);
        assert!((earth.orbit_angle - 2.5).abs() < 1e-6);
        let pivot = ctx.graph.get_local(earth.pivot.unwrap()).unwrap();
        assert!((pivot.rotation.y - 2.5).abs() < 1e-6);
        assert!((earth.spin(&ctx.graph) - 0.04).abs() < 1e-6);

        ctx.propagate();
        let pos = ctx.scene.get(earth.mesh).unwrap().world_position();
        assert!((pos.length() - 15.0).abs() < 1e-4);
        assert!(pos.y.abs() < 1e-5);
    }

    #[test]
    fn multiplier_scales_orbit_but_not_spin() {
        let catalog = Catalog::load().unwrap();
        let mut ctx = EngineContext::new();
        let mut mars = build_planet(&mut ctx, 3, catalog.planet(3).unwrap(), 0.0);
        mars.speed_multiplier = 3.0;
        mars.advance(&mut ctx.graph, 1.0, 2.0);
        assert!((mars.orbit_angle - 0.53 * 2.0 * 3.0).abs() < 1e-5);
        assert!((mars.spin(&ctx.graph) - 0.019 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn stars_are_uniform_over_solid_angle() {
        let mut rng = Rng::new(1234);
        let n = 20_000;
        let mut bins = [0usize; 10];
        let mut near_pole = 0usize;
        for _ in 0..n {
            let star = sample_star(&mut rng);
            let r = star.position.length();
            assert!((399.9..800.1).contains(&r));
            assert!(((star.position.z / r) - star.phi.cos()).abs() < 1e-3);

            let u = (star.phi.cos() + 1.0) / 2.0;
            bins[((u * 10.0) as usize).min(9)] += 1;
            if star.phi < std::f32::consts::PI / 10.0 {
                near_pole += 1;
            }
        }
        for count in bins {
            let share = count as f32 / n as f32;
            assert!((share - 0.1).abs() < 0.02, "cos(phi) bin share {share}");
        }
        // Uniform phi would put 10% here; uniform solid angle about 2.4%.
        let pole_share = near_pole as f32 / n as f32;
        assert!(pole_share < 0.05, "pole share {pole_share}");
    }

    #[test]
    fn star_tints_are_pale_and_warm() {
        let mut rng = Rng::new(99);
        for _ in 0..500 {
            let c = sample_star(&mut rng).color;
            for channel in c.to_array() {
                assert!((0.6..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn starfield_is_one_points_node() {
        let mut ctx = EngineContext::new();
        let mut rng = Rng::new(5);
        let stars = build_starfield(&mut ctx, &mut rng, STAR_COUNT);
        let node = ctx.scene.get(stars.node).unwrap();
        let cloud = node.points.as_ref().unwrap();
        assert_eq!(cloud.len(), 3000);
        assert_eq!(cloud.size, 2.0);
        assert_eq!(cloud.opacity, 0.8);
        assert!(node.mesh.is_none());
    }

    #[test]
    fn lighting_rig() {
        let mut ctx = EngineContext::new();
        setup_lighting(&mut ctx);
        let lights: Vec<_> = ctx.lights.iter().copied().collect();
        assert_eq!(lights.len(), 3);
        assert_eq!(lights[0].kind, LightKind::Ambient);
        assert!(matches!(lights[1].kind, LightKind::Point { range, .. } if range == 200.0));
        assert!(lights[1].cast_shadow);
        assert_eq!(lights[2].intensity, 0.3);
    }

    #[test]
    fn orbit_angles_cover_the_circle() {
        let mut rng = Rng::new(3);
        for _ in 0..1000 {
            let a = random_orbit_angle(&mut rng);
            assert!((0.0..TAU).contains(&a));
        }
    }
}
