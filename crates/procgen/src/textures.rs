//! Procedural texture generation for planet surfaces, rings, and the sun.
//! Creates upload-ready RGBA textures at runtime.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};
use rand::prelude::*;

/// RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
            a: 255,
        }
    }

    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
            a: (a.clamp(0.0, 1.0) * 255.0) as u8,
        }
    }
}

/// Generated texture data.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl TextureData {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::new(0, 0, 0, 255); (width * height) as usize],
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = pixel;
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Pixel::new(0, 0, 0, 255)
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.pixels).to_vec()
    }
}

/// Procedural texture generator.
///
/// Planet surfaces are sampled through a point on the unit sphere so the
/// equirectangular output has no seam at the u = 0/1 wrap.
pub struct TextureGenerator {
    perlin: Perlin,
    rng: StdRng,
}

impl TextureGenerator {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            perlin: Perlin::new(rng.gen()),
            rng,
        }
    }

    /// Generate a cratered rocky surface (Mercury, Venus, Mars).
    pub fn generate_rocky(
        &mut self,
        width: u32,
        height: u32,
        config: &RockySurfaceConfig,
    ) -> TextureData {
        let mut texture = TextureData::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let u = x as f64 / width as f64;
                let v = y as f64 / height as f64;
                let p = sphere_point(u, v);

                // Large-scale highlands vs lowlands
                let elevation = self.fbm_sphere(p, 2.5, 4);
                let highland = self.smooth_step(0.45, 0.6, elevation);
                let mut color = config
                    .lowland_color
                    .lerp(config.highland_color, highland as f32);

                // Impact craters: voronoi cells projected from the two
                // hemispheres to keep rims roughly circular
                let (crater_dist, _) = self.voronoi(
                    u * config.crater_density,
                    v * config.crater_density * 0.5,
                );
                let rim = self.smooth_step(0.12, 0.2, crater_dist)
                    - self.smooth_step(0.2, 0.35, crater_dist) * 0.6;
                let floor = 1.0 - self.smooth_step(0.0, 0.12, crater_dist);
                color *= 1.0 + rim as f32 * 0.25 - floor as f32 * config.crater_depth;

                // Fine grain
                let detail = self.fbm_sphere(p, 18.0, 3);
                color *= 0.85 + detail as f32 * 0.3;

                // Overall tint
                color *= config.base_color * 2.0;

                texture.set_pixel(x, y, Pixel::from_rgb(color.x, color.y, color.z));
            }
        }

        texture
    }

    /// Generate a banded gas-giant surface (Jupiter, Saturn, Uranus, Neptune).
    pub fn generate_gas_giant(
        &mut self,
        width: u32,
        height: u32,
        config: &GasGiantConfig,
    ) -> TextureData {
        let mut texture = TextureData::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let u = x as f64 / width as f64;
                let v = y as f64 / height as f64;
                let p = sphere_point(u, v);

                // Latitude bands, warped by turbulence so edges swirl
                let warp = self.fbm_sphere(p, 4.0, 4) - 0.5;
                let lat = v + warp * config.turbulence;
                let band = (lat * config.band_frequency * std::f64::consts::PI)
                    .sin()
                    * 0.5
                    + 0.5;

                let palette = &config.band_colors;
                let t = band as f32 * (palette.len() - 1) as f32;
                let i = (t as usize).min(palette.len() - 2);
                let mut color = palette[i].lerp(palette[i + 1], t - i as f32);

                // Fine streaking along the flow direction
                let streak = self.fbm_sphere(Vec3::new(p.x, p.y * 6.0, p.z), 8.0, 3);
                color *= 0.9 + streak as f32 * 0.2;

                // Storm oval (the great spot)
                if let Some(storm) = &config.storm {
                    let du = wrap_delta(u as f32 - storm.center.x);
                    let dv = v as f32 - storm.center.y;
                    let d = (du / storm.radius.x).powi(2) + (dv / storm.radius.y).powi(2);
                    if d < 1.0 {
                        let core = (1.0 - d).powf(1.5);
                        color = color.lerp(storm.color, core * 0.85);
                    }
                }

                // Slight polar darkening
                let polar = ((v - 0.5).abs() * 2.0).powi(4) as f32;
                color *= 1.0 - polar * 0.25;

                texture.set_pixel(x, y, Pixel::from_rgb(color.x, color.y, color.z));
            }
        }

        texture
    }

    /// Generate the Earth day map: oceans, continents, ice caps.
    pub fn generate_earth(&mut self, width: u32, height: u32) -> TextureData {
        let mut texture = TextureData::new(width, height);

        let ocean_deep = Vec3::new(0.02, 0.09, 0.25);
        let ocean_shallow = Vec3::new(0.05, 0.22, 0.42);
        let lowland = Vec3::new(0.13, 0.32, 0.10);
        let highland = Vec3::new(0.45, 0.38, 0.25);
        let ice = Vec3::new(0.92, 0.94, 0.97);

        for y in 0..height {
            for x in 0..width {
                let u = x as f64 / width as f64;
                let v = y as f64 / height as f64;
                let p = sphere_point(u, v);

                let continents = self.fbm_sphere(p, 1.8, 5);
                let detail = self.fbm_sphere(p, 9.0, 4);
                let elevation = continents * 0.8 + detail * 0.2;

                let land = self.smooth_step(0.52, 0.55, elevation);
                let mut color = if land > 0.0 {
                    let alt = self.smooth_step(0.55, 0.75, elevation) as f32;
                    let ground = lowland.lerp(highland, alt);
                    ocean_shallow.lerp(ground, land as f32)
                } else {
                    let depth = self.smooth_step(0.3, 0.52, elevation) as f32;
                    ocean_deep.lerp(ocean_shallow, depth)
                };

                // Polar ice caps with a noisy boundary
                let lat = (v - 0.5).abs() * 2.0;
                let cap = self.smooth_step(0.82, 0.9, lat + detail * 0.06) as f32;
                color = color.lerp(ice, cap);

                texture.set_pixel(x, y, Pixel::from_rgb(color.x, color.y, color.z));
            }
        }

        texture
    }

    /// Generate the sun's granulated surface. Brightness stays high so the
    /// bloom bright-pass picks the whole disc up.
    pub fn generate_sun(&mut self, width: u32, height: u32) -> TextureData {
        let mut texture = TextureData::new(width, height);

        for y in 0..height {
            for x in 0..width {
                let u = x as f64 / width as f64;
                let v = y as f64 / height as f64;
                let p = sphere_point(u, v);

                let granules = self.fbm_sphere(p, 12.0, 4);
                let cells = self.fbm_sphere(p, 3.0, 3);
                let heat = (granules * 0.6 + cells * 0.4).clamp(0.0, 1.0) as f32;

                let cool = Vec3::new(0.95, 0.45, 0.05);
                let hot = Vec3::new(1.0, 0.92, 0.55);
                let color = cool.lerp(hot, heat);

                texture.set_pixel(x, y, Pixel::from_rgb(color.x, color.y, color.z));
            }
        }

        texture
    }

    /// Generate a planetary ring strip. `u` is the radial coordinate from the
    /// inner edge (0) to the outer edge (1); brightness and alpha are purely
    /// radial so the annulus mesh wraps without a seam.
    pub fn generate_ring(
        &mut self,
        width: u32,
        height: u32,
        config: &RingBandConfig,
    ) -> TextureData {
        let mut texture = TextureData::new(width, height);

        // A handful of fixed gap positions per ring system, jittered by seed
        let gaps: Vec<(f64, f64)> = (0..config.gap_count)
            .map(|_| {
                (
                    self.rng.gen_range(0.15..0.9),
                    self.rng.gen_range(0.01..0.04),
                )
            })
            .collect();

        for x in 0..width {
            let u = x as f64 / width as f64;

            let bands = self.fbm(u * 24.0, 0.37, 4);
            let mut alpha = (0.35 + bands * 0.6) as f32;

            // Soft inner and outer falloff
            alpha *= self.smooth_step(0.0, 0.08, u) as f32;
            alpha *= 1.0 - self.smooth_step(0.92, 1.0, u) as f32;

            // Carved gaps
            for &(center, half_width) in &gaps {
                let d = (u - center).abs();
                alpha *= self.smooth_step(half_width * 0.4, half_width, d) as f32;
            }

            let brightness = 0.7 + bands as f32 * 0.3;
            let color = config.base_color * brightness;
            let alpha = (alpha * config.opacity).clamp(0.0, 1.0);

            for y in 0..height {
                texture.set_pixel(x, y, Pixel::from_rgba(color.x, color.y, color.z, alpha));
            }
        }

        texture
    }

    // Noise helper functions

    fn fbm(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = 1.0;

        for _ in 0..octaves {
            value += amplitude * (self.perlin.get([x * frequency, y * frequency]) * 0.5 + 0.5);
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        value
    }

    /// fbm sampled at a point on the unit sphere (seamless in longitude).
    fn fbm_sphere(&self, p: Vec3, scale: f64, octaves: u32) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = scale;

        for _ in 0..octaves {
            value += amplitude
                * (self
                    .perlin
                    .get([
                        p.x as f64 * frequency,
                        p.y as f64 * frequency,
                        p.z as f64 * frequency,
                    ])
                    * 0.5
                    + 0.5);
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        value
    }

    fn voronoi(&self, x: f64, y: f64) -> (f64, f64) {
        let n = (x.floor(), y.floor());
        let f = (x.fract(), y.fract());

        let mut min_dist = 8.0;
        let mut second_dist = 8.0;

        for j in -1..=1 {
            for i in -1..=1 {
                let g = (i as f64, j as f64);
                let o = (
                    self.hash2d(n.0 + g.0, n.1 + g.1),
                    self.hash2d(n.0 + g.0 + 17.0, n.1 + g.1 + 31.0),
                );
                let r = (g.0 + o.0 - f.0, g.1 + o.1 - f.1);
                let d = r.0 * r.0 + r.1 * r.1;

                if d < min_dist {
                    second_dist = min_dist;
                    min_dist = d;
                } else if d < second_dist {
                    second_dist = d;
                }
            }
        }

        (min_dist.sqrt(), second_dist.sqrt())
    }

    fn hash2d(&self, x: f64, y: f64) -> f64 {
        let p = Vec2::new(x as f32, y as f32);
        let p3 = (Vec3::new(p.x, p.y, p.x) * 0.1031).fract();
        let p3 = p3 + Vec3::splat(p3.dot(Vec3::new(p3.y + 33.33, p3.z + 33.33, p3.x + 33.33)));
        ((p3.x + p3.y) * p3.z).fract() as f64
    }

    fn smooth_step(&self, edge0: f64, edge1: f64, x: f64) -> f64 {
        let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// Map equirectangular (u, v) to a point on the unit sphere.
fn sphere_point(u: f64, v: f64) -> Vec3 {
    let theta = u * std::f64::consts::TAU;
    let phi = v * std::f64::consts::PI;
    Vec3::new(
        (phi.sin() * theta.cos()) as f32,
        phi.cos() as f32,
        (phi.sin() * theta.sin()) as f32,
    )
}

/// Shortest wrapped distance between two u coordinates.
fn wrap_delta(du: f32) -> f32 {
    let du = du - du.round();
    du
}

/// Configuration for rocky planet surfaces.
#[derive(Debug, Clone)]
pub struct RockySurfaceConfig {
    pub base_color: Vec3,
    pub highland_color: Vec3,
    pub lowland_color: Vec3,
    pub crater_density: f64,
    /// How dark crater floors get (0 = invisible).
    pub crater_depth: f32,
}

impl Default for RockySurfaceConfig {
    fn default() -> Self {
        Self {
            base_color: Vec3::new(0.5, 0.5, 0.5),
            highland_color: Vec3::new(0.65, 0.62, 0.58),
            lowland_color: Vec3::new(0.42, 0.4, 0.38),
            crater_density: 14.0,
            crater_depth: 0.25,
        }
    }
}

impl RockySurfaceConfig {
    pub fn mercury() -> Self {
        Self {
            base_color: Vec3::new(0.55, 0.5, 0.45),
            highland_color: Vec3::new(0.62, 0.58, 0.52),
            lowland_color: Vec3::new(0.38, 0.35, 0.32),
            crater_density: 20.0,
            crater_depth: 0.3,
        }
    }

    pub fn venus() -> Self {
        Self {
            base_color: Vec3::new(0.78, 0.6, 0.35),
            highland_color: Vec3::new(0.85, 0.72, 0.48),
            lowland_color: Vec3::new(0.6, 0.45, 0.28),
            crater_density: 6.0,
            crater_depth: 0.1,
        }
    }

    pub fn mars() -> Self {
        Self {
            base_color: Vec3::new(0.72, 0.42, 0.26),
            highland_color: Vec3::new(0.78, 0.5, 0.32),
            lowland_color: Vec3::new(0.5, 0.3, 0.2),
            crater_density: 12.0,
            crater_depth: 0.22,
        }
    }
}

/// Storm oval on a gas giant (ellipse in uv space).
#[derive(Debug, Clone)]
pub struct StormSpot {
    pub center: Vec2,
    pub radius: Vec2,
    pub color: Vec3,
}

/// Configuration for gas-giant surfaces.
#[derive(Debug, Clone)]
pub struct GasGiantConfig {
    /// Band palette, blended along the latitude sine.
    pub band_colors: [Vec3; 4],
    pub band_frequency: f64,
    pub turbulence: f64,
    pub storm: Option<StormSpot>,
}

impl GasGiantConfig {
    pub fn jupiter() -> Self {
        Self {
            band_colors: [
                Vec3::new(0.78, 0.66, 0.5),
                Vec3::new(0.92, 0.85, 0.72),
                Vec3::new(0.62, 0.45, 0.32),
                Vec3::new(0.85, 0.75, 0.6),
            ],
            band_frequency: 11.0,
            turbulence: 0.06,
            storm: Some(StormSpot {
                center: Vec2::new(0.3, 0.67),
                radius: Vec2::new(0.07, 0.035),
                color: Vec3::new(0.75, 0.3, 0.18),
            }),
        }
    }

    pub fn saturn() -> Self {
        Self {
            band_colors: [
                Vec3::new(0.82, 0.72, 0.52),
                Vec3::new(0.9, 0.84, 0.66),
                Vec3::new(0.72, 0.6, 0.42),
                Vec3::new(0.86, 0.78, 0.58),
            ],
            band_frequency: 9.0,
            turbulence: 0.04,
            storm: None,
        }
    }

    pub fn uranus() -> Self {
        Self {
            band_colors: [
                Vec3::new(0.55, 0.72, 0.78),
                Vec3::new(0.62, 0.78, 0.82),
                Vec3::new(0.5, 0.68, 0.75),
                Vec3::new(0.6, 0.76, 0.8),
            ],
            band_frequency: 5.0,
            turbulence: 0.02,
            storm: None,
        }
    }

    pub fn neptune() -> Self {
        Self {
            band_colors: [
                Vec3::new(0.2, 0.32, 0.75),
                Vec3::new(0.3, 0.45, 0.85),
                Vec3::new(0.16, 0.28, 0.65),
                Vec3::new(0.28, 0.42, 0.8),
            ],
            band_frequency: 6.0,
            turbulence: 0.05,
            storm: Some(StormSpot {
                center: Vec2::new(0.6, 0.4),
                radius: Vec2::new(0.05, 0.03),
                color: Vec3::new(0.1, 0.18, 0.45),
            }),
        }
    }
}

/// Configuration for ring-system strips.
#[derive(Debug, Clone)]
pub struct RingBandConfig {
    pub base_color: Vec3,
    pub gap_count: u32,
    pub opacity: f32,
}

impl RingBandConfig {
    pub fn saturn() -> Self {
        Self {
            base_color: Vec3::new(0.82, 0.72, 0.55),
            gap_count: 4,
            opacity: 0.95,
        }
    }

    pub fn uranus() -> Self {
        Self {
            base_color: Vec3::new(0.6, 0.68, 0.72),
            gap_count: 6,
            opacity: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rocky_surface_deterministic_for_seed() {
        let mut a = TextureGenerator::new(7);
        let mut b = TextureGenerator::new(7);
        let config = RockySurfaceConfig::mercury();
        let ta = a.generate_rocky(32, 16, &config);
        let tb = b.generate_rocky(32, 16, &config);
        assert_eq!(ta.to_bytes(), tb.to_bytes());
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = TextureGenerator::new(1);
        let mut b = TextureGenerator::new(2);
        let config = GasGiantConfig::jupiter();
        let ta = a.generate_gas_giant(32, 16, &config);
        let tb = b.generate_gas_giant(32, 16, &config);
        assert_ne!(ta.to_bytes(), tb.to_bytes());
    }

    #[test]
    fn texture_dimensions_and_byte_length() {
        let mut gen = TextureGenerator::new(0);
        let tex = gen.generate_earth(64, 32);
        assert_eq!(tex.width, 64);
        assert_eq!(tex.height, 32);
        assert_eq!(tex.to_bytes().len(), 64 * 32 * 4);
    }

    #[test]
    fn ring_strip_fades_at_edges() {
        let mut gen = TextureGenerator::new(3);
        let tex = gen.generate_ring(128, 4, &RingBandConfig::saturn());
        // Innermost and outermost texels are fully transparent
        assert_eq!(tex.get_pixel(0, 0).a, 0);
        assert_eq!(tex.get_pixel(127, 0).a, 0);
        // Somewhere in the middle the ring is visible
        let visible = (0..128).any(|x| tex.get_pixel(x, 0).a > 64);
        assert!(visible);
    }

    #[test]
    fn sun_surface_stays_bright() {
        let mut gen = TextureGenerator::new(11);
        let tex = gen.generate_sun(32, 16);
        for p in &tex.pixels {
            assert!(p.r > 180, "sun red channel too dark: {}", p.r);
        }
    }

    #[test]
    fn sphere_point_poles_and_equator() {
        let north = sphere_point(0.0, 0.0);
        assert!((north.y - 1.0).abs() < 1e-6);
        let south = sphere_point(0.5, 1.0);
        assert!((south.y + 1.0).abs() < 1e-6);
        let equator = sphere_point(0.0, 0.5);
        assert!(equator.y.abs() < 1e-6);
        assert!((equator.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wrap_delta_shortest_path() {
        assert!((wrap_delta(0.9 - 0.1) - (-0.2)).abs() < 1e-6);
        assert!((wrap_delta(0.1 - 0.9) - 0.2).abs() < 1e-6);
        assert!(wrap_delta(0.0).abs() < 1e-6);
    }
}
