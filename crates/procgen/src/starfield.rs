//! Starfield generation: seeded star positions on a far shell around the
//! system, rendered as camera-facing billboards.

use glam::Vec3;
use rand::prelude::*;

/// A single background star.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub position: Vec3,
    /// Billboard half-size in world units.
    pub size: f32,
    pub color: [f32; 3],
}

/// Configuration for starfield generation.
#[derive(Debug, Clone)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Shell radii; must stay inside the camera far plane.
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1500,
            min_radius: 85.0,
            max_radius: 95.0,
        }
    }
}

/// Generate the starfield. Deterministic per seed.
pub fn generate_starfield(seed: u64, config: &StarfieldConfig) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stars = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        // Uniform direction on the sphere
        let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
        let theta = rng.gen::<f32>() * std::f32::consts::TAU;
        let r = rng.gen_range(config.min_radius..config.max_radius);
        let position = Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.cos(),
            r * phi.sin() * theta.sin(),
        );

        // Blend between a warm and a blue-white tint, dimmed per star so the
        // field has depth
        let temp = rng.gen::<f32>();
        let brightness = rng.gen_range(0.35..1.0_f32);
        let warm = Vec3::new(1.0, 0.85, 0.7);
        let cool = Vec3::new(0.75, 0.82, 1.0);
        let tint = warm.lerp(cool, temp) * brightness;

        stars.push(Star {
            position,
            size: rng.gen_range(0.12..0.45),
            color: [tint.x, tint.y, tint.z],
        });
    }

    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starfield_deterministic_for_seed() {
        let config = StarfieldConfig::default();
        let a = generate_starfield(42, &config);
        let b = generate_starfield(42, &config);
        assert_eq!(a.len(), b.len());
        for (sa, sb) in a.iter().zip(&b) {
            assert_eq!(sa.position, sb.position);
            assert_eq!(sa.size, sb.size);
            assert_eq!(sa.color, sb.color);
        }
    }

    #[test]
    fn starfield_respects_count_and_shell() {
        let config = StarfieldConfig {
            count: 300,
            min_radius: 80.0,
            max_radius: 90.0,
        };
        let stars = generate_starfield(9, &config);
        assert_eq!(stars.len(), 300);
        for star in &stars {
            let r = star.position.length();
            assert!(r >= 80.0 - 1e-3 && r <= 90.0 + 1e-3, "star outside shell: {r}");
        }
    }
}
