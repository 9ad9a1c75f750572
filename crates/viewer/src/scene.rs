//! Scene construction: components for everything that moves, plus the world
//! spawner and the GPU asset loader.
//!
//! Angular speeds follow the catalog convention of radians per reference
//! frame; `update::gameplay` rescales them by the measured frame time.

use crate::catalog::{SpinDirection, PLANET_CONFIGS};
use crate::config::ViewerConfig;
use engine_core::{Vec3, World};
use picking::PickScene;
use procgen::{
    generate_starfield, GasGiantConfig, RingBandConfig, RockySurfaceConfig, StarfieldConfig,
    TextureData, TextureGenerator,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use renderer::{Mesh, Renderer, StarInstance, Texture};
use std::path::Path;

/// Comets roll a fresh trajectory once they drift past this radius.
pub(crate) const COMET_RESET_RADIUS: f32 = 70.0;
pub(crate) const COMET_HEAD_RADIUS: f32 = 0.22;
pub(crate) const COMET_TAIL_LENGTH: f32 = 8.0;
pub(crate) const COMET_TAIL_SEGMENTS: usize = 20;
/// Halo dot group spin, radians per reference frame.
pub(crate) const HALO_SPIN_SPEED: f32 = 0.008;

const SURFACE_W: u32 = 256;
const SURFACE_H: u32 = 128;
const RING_W: u32 = 256;
const RING_H: u32 = 16;

// ── Components ──────────────────────────────────────────────────────────────

/// Clockwise orbital motion about the sun.
pub struct Orbit {
    pub angle: f32,
    /// Radians per reference frame.
    pub speed: f32,
    /// Distance from the sun to the body center.
    pub radius: f32,
}

impl Orbit {
    /// World position on the ecliptic for the current angle.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.cos(),
            0.0,
            -self.radius * self.angle.sin(),
        )
    }
}

/// Spin about the body's own (tilted) axis.
pub struct Spin {
    pub angle: f32,
    /// Radians per reference frame.
    pub speed: f32,
    pub direction: SpinDirection,
}

/// Row in the planet catalog this entity represents.
#[derive(Clone, Copy)]
pub struct Planet {
    pub index: usize,
}

/// Handle into the pick scene for hover and click rays.
pub struct PickTarget {
    pub collider: u32,
}

/// Glittering dots riding a shell just above a planet's surface. The whole
/// group slowly wheels about the planet's Y axis.
pub struct Halo {
    pub angle: f32,
    /// Dot positions in the planet's local frame.
    pub offsets: Vec<Vec3>,
    /// World radius of one dot before selection scaling.
    pub dot_radius: f32,
}

impl Halo {
    pub fn random(rng: &mut impl Rng, planet_size: f32) -> Self {
        let count = rng.gen_range(1..=10);
        let base_radius = planet_size * 1.28;
        let offsets = (0..count)
            .map(|_| {
                // Uniform direction on the sphere
                let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
                let theta = rng.gen::<f32>() * std::f32::consts::TAU;
                let r = base_radius + rng.gen::<f32>() * 0.12;
                Vec3::new(
                    r * phi.sin() * theta.cos(),
                    r * phi.sin() * theta.sin(),
                    r * phi.cos(),
                )
            })
            .collect();
        Self {
            angle: 0.0,
            offsets,
            dot_radius: planet_size * 0.04,
        }
    }
}

/// One asteroid in the belt.
pub struct BeltRock {
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub height: f32,
    pub size: f32,
}

impl BeltRock {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.angle.cos(),
            self.height,
            self.radius * self.angle.sin(),
        )
    }
}

/// A comet drifting on a straight line through the system.
pub struct Comet {
    pub start: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    /// Distance traveled from `start`.
    pub t: f32,
}

impl Comet {
    /// Roll a trajectory entering from the rim, aimed loosely through the
    /// center.
    pub fn random(rng: &mut impl Rng) -> Self {
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let radius = 60.0 + rng.gen::<f32>() * 10.0;
        let y = (rng.gen::<f32>() - 0.5) * 20.0;
        let start = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);
        let target = Vec3::new(
            (rng.gen::<f32>() - 0.5) * 10.0,
            (rng.gen::<f32>() - 0.5) * 10.0,
            (rng.gen::<f32>() - 0.5) * 10.0,
        );
        let direction = (target - start).normalize();
        let speed = 0.6 + rng.gen::<f32>() * 0.4;
        Self {
            start,
            direction,
            speed,
            t: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.start + self.direction * self.t
    }
}

// ── World spawning ──────────────────────────────────────────────────────────

/// Handles into the spawned world, both aligned with the catalog order.
pub struct SceneEntities {
    pub planets: Vec<hecs::Entity>,
    pub colliders: Vec<u32>,
}

/// Spawn the planets, asteroid belt, and comets. Randomized pieces draw from
/// the config seed so a given seed always builds the same sky.
pub fn spawn_world(world: &mut World, pick: &mut PickScene, config: &ViewerConfig) -> SceneEntities {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut planets = Vec::with_capacity(PLANET_CONFIGS.len());
    let mut colliders = Vec::with_capacity(PLANET_CONFIGS.len());
    for (index, info) in PLANET_CONFIGS.iter().enumerate() {
        let orbit = Orbit {
            angle: 0.0,
            speed: info.orbit_speed,
            radius: info.orbit_offset(),
        };
        let spin = Spin {
            angle: 0.0,
            speed: info.rotation_speed,
            direction: info.spin,
        };
        let halo = Halo::random(&mut rng, info.size);
        let collider = pick.insert_ball(orbit.position(), info.size);
        let entity = world.spawn((
            Planet { index },
            orbit,
            spin,
            halo,
            PickTarget { collider },
        ));
        planets.push(entity);
        colliders.push(collider);
    }

    for _ in 0..config.belt_rock_count {
        let rock = BeltRock {
            angle: rng.gen::<f32>() * std::f32::consts::TAU,
            speed: 0.0005 + rng.gen::<f32>() * 0.0007,
            radius: 12.0 + rng.gen::<f32>() * 38.0,
            height: (rng.gen::<f32>() - 0.5) * 5.0,
            size: 0.07 + rng.gen::<f32>() * 0.08,
        };
        world.spawn((rock,));
    }

    for _ in 0..config.comet_count {
        world.spawn((Comet::random(&mut rng),));
    }

    log::info!(
        "Scene spawned: {} planets, {} belt rocks, {} comets",
        planets.len(),
        config.belt_rock_count,
        config.comet_count
    );

    SceneEntities { planets, colliders }
}

// ── GPU assets ──────────────────────────────────────────────────────────────

/// GPU resources for the scene: shared unit meshes plus per-body textures.
/// Bodies scale the unit sphere per instance.
pub struct SceneAssets {
    pub planet_mesh: Mesh,
    pub glow_mesh: Mesh,
    pub rock_mesh: Mesh,
    pub spark_mesh: Mesh,
    pub sun_texture: wgpu::BindGroup,
    /// Per-planet surface textures, catalog order.
    pub planet_textures: Vec<wgpu::BindGroup>,
    /// Annulus mesh and band texture for ringed planets, catalog order.
    pub rings: Vec<Option<(Mesh, wgpu::BindGroup)>>,
}

impl SceneAssets {
    /// Build every mesh and texture the scene needs and upload the starfield.
    pub fn load(renderer: &mut Renderer, config: &ViewerConfig) -> Self {
        let mut generator = TextureGenerator::new(config.seed);

        let planet_mesh = Mesh::sphere(renderer.device(), 1.0, 48, 24);
        let glow_mesh = Mesh::sphere(renderer.device(), 1.0, 32, 16);
        let rock_mesh = Mesh::sphere(renderer.device(), 1.0, 8, 5);
        let spark_mesh = Mesh::sphere(renderer.device(), 1.0, 12, 6);

        let sun = body_texture(renderer, &mut generator, "sun");
        let sun_texture = renderer.create_texture_bind_group(&sun);

        let mut planet_textures = Vec::with_capacity(PLANET_CONFIGS.len());
        let mut rings = Vec::with_capacity(PLANET_CONFIGS.len());
        for info in PLANET_CONFIGS.iter() {
            let surface = body_texture(renderer, &mut generator, info.id);
            planet_textures.push(renderer.create_texture_bind_group(&surface));

            rings.push(info.ring_radii().map(|(inner, outer)| {
                let mesh = Mesh::annulus(renderer.device(), inner, outer, 96);
                let band = ring_band(&mut generator, info.id);
                let texture = Texture::from_rgba8(
                    renderer.device(),
                    renderer.queue(),
                    &band.to_bytes(),
                    band.width,
                    band.height,
                    info.id,
                );
                (mesh, renderer.create_texture_bind_group(&texture))
            }));
        }

        let stars = generate_starfield(
            config.seed,
            &StarfieldConfig {
                count: config.star_count,
                ..Default::default()
            },
        );
        let instances: Vec<StarInstance> = stars
            .iter()
            .map(|star| StarInstance {
                position: star.position.to_array(),
                size: star.size,
                color: [star.color[0], star.color[1], star.color[2], 1.0],
            })
            .collect();
        renderer.upload_stars(&instances);

        Self {
            planet_mesh,
            glow_mesh,
            rock_mesh,
            spark_mesh,
            sun_texture,
            planet_textures,
            rings,
        }
    }
}

/// Surface texture for one body. A map dropped into `assets/textures/<id>.png`
/// (or `.jpg`) wins over the generated one.
fn body_texture(renderer: &Renderer, generator: &mut TextureGenerator, id: &str) -> Texture {
    for ext in ["png", "jpg"] {
        let path = Path::new("assets/textures").join(format!("{}.{}", id, ext));
        if path.exists() {
            match Texture::from_file(renderer.device(), renderer.queue(), &path) {
                Ok(texture) => {
                    log::info!("Loaded surface map {:?}", path);
                    return texture;
                }
                Err(e) => log::warn!("{}", e),
            }
        }
    }

    let data = if id == "sun" {
        generator.generate_sun(SURFACE_W, SURFACE_H)
    } else {
        planet_surface(generator, id)
    };
    Texture::from_rgba8(
        renderer.device(),
        renderer.queue(),
        &data.to_bytes(),
        data.width,
        data.height,
        id,
    )
}

fn planet_surface(generator: &mut TextureGenerator, id: &str) -> TextureData {
    match id {
        "mercury" => generator.generate_rocky(SURFACE_W, SURFACE_H, &RockySurfaceConfig::mercury()),
        "venus" => generator.generate_rocky(SURFACE_W, SURFACE_H, &RockySurfaceConfig::venus()),
        "earth" => generator.generate_earth(SURFACE_W, SURFACE_H),
        "mars" => generator.generate_rocky(SURFACE_W, SURFACE_H, &RockySurfaceConfig::mars()),
        "jupiter" => {
            generator.generate_gas_giant(SURFACE_W, SURFACE_H, &GasGiantConfig::jupiter())
        }
        "saturn" => generator.generate_gas_giant(SURFACE_W, SURFACE_H, &GasGiantConfig::saturn()),
        "uranus" => generator.generate_gas_giant(SURFACE_W, SURFACE_H, &GasGiantConfig::uranus()),
        "neptune" => {
            generator.generate_gas_giant(SURFACE_W, SURFACE_H, &GasGiantConfig::neptune())
        }
        other => {
            log::warn!("No surface generator for {}, using rocky default", other);
            generator.generate_rocky(SURFACE_W, SURFACE_H, &RockySurfaceConfig::mercury())
        }
    }
}

fn ring_band(generator: &mut TextureGenerator, id: &str) -> TextureData {
    match id {
        "saturn" => generator.generate_ring(RING_W, RING_H, &RingBandConfig::saturn()),
        _ => generator.generate_ring(RING_W, RING_H, &RingBandConfig::uranus()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_position_runs_clockwise() {
        let mut orbit = Orbit {
            angle: 0.0,
            speed: 0.01,
            radius: 10.0,
        };
        let ahead = orbit.position();
        assert!((ahead - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);

        // Clockwise means decreasing angle; seen from +Y the body moves
        // toward -Z after a quarter turn.
        orbit.angle = -std::f32::consts::FRAC_PI_2;
        let quarter = orbit.position();
        assert!(quarter.x.abs() < 1e-5);
        assert!((quarter.z - 10.0).abs() < 1e-5);
    }

    #[test]
    fn comet_spawns_on_rim_heading_inward() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let comet = Comet::random(&mut rng);
            let r = Vec3::new(comet.start.x, 0.0, comet.start.z).length();
            assert!(r >= 60.0 && r <= 70.0, "rim radius {r}");
            assert!(comet.start.y.abs() <= 10.0);
            assert!((comet.direction.length() - 1.0).abs() < 1e-5);
            assert!(comet.speed >= 0.6 && comet.speed <= 1.0);
            // Straight-line flight must cut inside the reset radius, or the
            // comet would respawn instantly.
            let closest = comet.start - comet.direction * comet.start.dot(comet.direction);
            assert!(closest.length() < COMET_RESET_RADIUS);
        }
    }

    #[test]
    fn halo_dots_hug_the_planet_shell() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let halo = Halo::random(&mut rng, 0.5);
            assert!(!halo.offsets.is_empty() && halo.offsets.len() <= 10);
            for offset in &halo.offsets {
                let r = offset.length();
                assert!(r >= 0.5 * 1.28 - 1e-4);
                assert!(r <= 0.5 * 1.28 + 0.12 + 1e-4);
            }
            assert!((halo.dot_radius - 0.02).abs() < 1e-6);
        }
    }

    #[test]
    fn spawn_world_aligns_with_catalog() {
        let mut world = World::new();
        let mut pick = PickScene::new();
        let config = ViewerConfig::default();
        let entities = spawn_world(&mut world, &mut pick, &config);

        assert_eq!(entities.planets.len(), PLANET_CONFIGS.len());
        assert_eq!(entities.colliders.len(), PLANET_CONFIGS.len());
        assert_eq!(pick.len(), PLANET_CONFIGS.len());

        for (index, &entity) in entities.planets.iter().enumerate() {
            let planet = world.get::<&Planet>(entity).unwrap();
            assert_eq!(planet.index, index);
            let orbit = world.get::<&Orbit>(entity).unwrap();
            assert!((orbit.radius - PLANET_CONFIGS[index].orbit_offset()).abs() < 1e-6);
        }

        let rocks = world.query::<&BeltRock>().iter().count();
        assert_eq!(rocks, config.belt_rock_count);
        let comets = world.query::<&Comet>().iter().count();
        assert_eq!(comets, config.comet_count);
    }

    #[test]
    fn belt_rocks_stay_inside_their_band() {
        let mut world = World::new();
        let mut pick = PickScene::new();
        let config = ViewerConfig::default();
        spawn_world(&mut world, &mut pick, &config);

        for (_, rock) in world.query::<&BeltRock>().iter() {
            assert!(rock.radius >= 12.0 && rock.radius <= 50.0);
            assert!(rock.height.abs() <= 2.5);
            assert!(rock.size >= 0.07 && rock.size <= 0.15);
            assert!(rock.speed >= 0.0005 && rock.speed <= 0.0012);
        }
    }
}
