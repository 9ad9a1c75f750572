//! Static catalog of the eight planets.
//!
//! Two parallel tables: [`PLANETS`] holds the fact sheet shown in the info
//! and comparison panels, [`PLANET_CONFIGS`] holds the scene parameters the
//! mesh builders consume. They are joined positionally: an index is the
//! planet's identity everywhere (scene nodes, pick results, UI selection).
//! Both tables carry the planet id so the join is testable instead of assumed.
//!
//! Angular speeds are radians per frame at a reference 60 fps; the update
//! loop rescales them by the measured frame time.

pub const PLANET_COUNT: usize = 8;

/// Sun mesh radius.
pub const SUN_RADIUS: f32 = 1.5;
/// Radius of the additive corona shell around the sun.
pub const SUN_CORONA_RADIUS: f32 = 2.0;

/// Which way a planet spins about its own axis, viewed from above the
/// ecliptic. Orbits all run clockwise; only the spin varies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    /// Sign of the per-frame angle increment.
    pub fn sign(&self) -> f32 {
        match self {
            SpinDirection::Clockwise => -1.0,
            SpinDirection::CounterClockwise => 1.0,
        }
    }
}

/// Ring system parameters for the two ringed planets.
#[derive(Clone, Copy, Debug)]
pub struct RingInfo {
    /// Radial width of the annulus, in scene units.
    pub width: f32,
}

/// Fact-sheet row shown in the info panel and the comparison table.
/// Values are preformatted for display.
#[derive(Debug)]
pub struct PlanetFacts {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub diameter: &'static str,
    pub moons: &'static str,
    pub sun_distance: &'static str,
    pub orbital_period: &'static str,
    /// Mass in kg. The panel shows "N/A" when absent.
    pub mass: Option<&'static str>,
}

/// Scene-construction row: everything the mesh builders, the mover, and the
/// picker need for one planet.
#[derive(Debug)]
pub struct PlanetConfig {
    pub id: &'static str,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub size: f32,
    pub rotation_speed: f32,
    pub spin: SpinDirection,
    /// Axial tilt in degrees, applied as a roll about Z.
    pub tilt_degrees: f32,
    /// Atmosphere rim color for the glow shell.
    pub rim_color: [f32; 3],
    pub rings: Option<RingInfo>,
}

impl PlanetConfig {
    /// Distance from the sun to the planet center. Nudged slightly inside the
    /// painted orbit line so large bodies straddle it instead of riding its
    /// outer edge.
    pub fn orbit_offset(&self) -> f32 {
        self.orbit_radius - self.size / 9.0
    }

    /// Inner and outer radii of the ring annulus, if the planet has one.
    pub fn ring_radii(&self) -> Option<(f32, f32)> {
        self.rings.map(|r| {
            let inner = self.size + 0.1;
            (inner, inner + r.width)
        })
    }
}

/// Fact sheets, ordered sun-outward.
pub static PLANETS: [PlanetFacts; PLANET_COUNT] = [
    PlanetFacts {
        id: "mercury",
        name: "Mercury",
        description: "The smallest planet and the closest to the Sun. Its cratered \
            surface swings between scorching days and freezing nights, with almost \
            no atmosphere to hold the heat.",
        diameter: "4,879 km",
        moons: "0",
        sun_distance: "0.39 AU",
        orbital_period: "88 days",
        mass: None,
    },
    PlanetFacts {
        id: "venus",
        name: "Venus",
        description: "The second planet from the Sun and the hottest in the solar \
            system. A crushing carbon dioxide atmosphere and sulfuric acid clouds \
            trap heat in a runaway greenhouse.",
        diameter: "12,104 km",
        moons: "0",
        sun_distance: "0.72 AU",
        orbital_period: "225 days",
        mass: None,
    },
    PlanetFacts {
        id: "earth",
        name: "Earth",
        description: "The third planet from the Sun and the only known world to \
            harbor life. Liquid water covers most of its surface beneath a thin \
            nitrogen and oxygen atmosphere.",
        diameter: "12,742 km",
        moons: "1",
        sun_distance: "1 AU",
        orbital_period: "365.25 days",
        mass: None,
    },
    PlanetFacts {
        id: "mars",
        name: "Mars",
        description: "The red planet owes its color to iron oxide dust. It hosts \
            the largest volcano in the solar system, Olympus Mons, and two small \
            moons, Phobos and Deimos.",
        diameter: "6,779 km",
        moons: "2",
        sun_distance: "1.52 AU",
        orbital_period: "687 days",
        mass: None,
    },
    PlanetFacts {
        id: "jupiter",
        name: "Jupiter",
        description: "The largest planet, a gas giant more massive than all the \
            others combined. Its Great Red Spot is a storm wider than Earth that \
            has raged for centuries.",
        diameter: "139,820 km",
        moons: "95",
        sun_distance: "5.2 AU",
        orbital_period: "11.86 years",
        mass: None,
    },
    PlanetFacts {
        id: "saturn",
        name: "Saturn",
        description: "A gas giant famous for its vast rings of ice and rock. \
            Saturn is the least dense planet and would float in a sufficiently \
            large ocean.",
        diameter: "116,460 km",
        moons: "146",
        sun_distance: "9.58 AU",
        orbital_period: "29.45 years",
        mass: None,
    },
    PlanetFacts {
        id: "uranus",
        name: "Uranus",
        description: "An ice giant that spins on its side, rolling around the Sun \
            with its poles in the orbital plane. Methane in its atmosphere gives \
            it a pale blue-green color.",
        diameter: "50,724 km",
        moons: "27",
        sun_distance: "19.22 AU",
        orbital_period: "84 years",
        mass: None,
    },
    PlanetFacts {
        id: "neptune",
        name: "Neptune",
        description: "The most distant planet and the windiest world known, with \
            gusts beyond 2,000 km/h. Its deep blue color also comes from methane \
            in a cold, stormy atmosphere.",
        diameter: "49,244 km",
        moons: "14",
        sun_distance: "30.05 AU",
        orbital_period: "164.79 years",
        mass: None,
    },
];

/// Scene parameters, in the same order as [`PLANETS`].
pub static PLANET_CONFIGS: [PlanetConfig; PLANET_COUNT] = [
    PlanetConfig {
        id: "mercury",
        orbit_radius: 10.0,
        orbit_speed: 0.00048,
        size: 0.2,
        rotation_speed: 0.005,
        spin: SpinDirection::CounterClockwise,
        tilt_degrees: 0.0,
        rim_color: [0.976, 0.812, 0.624], // 0xf9cf9f
        rings: None,
    },
    PlanetConfig {
        id: "venus",
        orbit_radius: 13.0,
        orbit_speed: 0.00035,
        size: 0.5,
        rotation_speed: 0.0005,
        spin: SpinDirection::Clockwise,
        tilt_degrees: 0.0,
        rim_color: [0.714, 0.435, 0.122], // 0xb66f1f
        rings: None,
    },
    PlanetConfig {
        id: "earth",
        orbit_radius: 16.0,
        orbit_speed: 0.00029,
        size: 0.5,
        rotation_speed: 0.01,
        spin: SpinDirection::CounterClockwise,
        tilt_degrees: -23.4,
        rim_color: [0.290, 0.565, 0.851], // 0x4a90d9
        rings: None,
    },
    PlanetConfig {
        id: "mars",
        orbit_radius: 19.0,
        orbit_speed: 0.00024,
        size: 0.3,
        rotation_speed: 0.01,
        spin: SpinDirection::CounterClockwise,
        tilt_degrees: 0.0,
        rim_color: [0.737, 0.392, 0.204], // 0xbc6434
        rings: None,
    },
    PlanetConfig {
        id: "jupiter",
        orbit_radius: 22.0,
        orbit_speed: 0.00013,
        size: 1.0,
        rotation_speed: 0.06,
        spin: SpinDirection::CounterClockwise,
        tilt_degrees: 0.0,
        rim_color: [0.953, 0.839, 0.714], // 0xf3d6b6
        rings: None,
    },
    PlanetConfig {
        id: "saturn",
        orbit_radius: 25.0,
        orbit_speed: 0.0001,
        size: 0.8,
        rotation_speed: 0.05,
        spin: SpinDirection::CounterClockwise,
        tilt_degrees: 0.0,
        rim_color: [0.839, 0.722, 0.573], // 0xd6b892
        rings: Some(RingInfo { width: 0.5 }),
    },
    PlanetConfig {
        id: "uranus",
        orbit_radius: 28.0,
        orbit_speed: 0.00007,
        size: 0.5,
        rotation_speed: 0.02,
        spin: SpinDirection::Clockwise,
        tilt_degrees: 0.0,
        rim_color: [0.604, 0.714, 0.761], // 0x9ab6c2
        rings: Some(RingInfo { width: 0.4 }),
    },
    PlanetConfig {
        id: "neptune",
        orbit_radius: 31.0,
        orbit_speed: 0.000054,
        size: 0.5,
        rotation_speed: 0.02,
        spin: SpinDirection::CounterClockwise,
        tilt_degrees: 0.0,
        rim_color: [0.361, 0.494, 0.843], // 0x5c7ed7
        rings: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_aligned() {
        assert_eq!(PLANETS.len(), PLANET_CONFIGS.len());
        for (facts, config) in PLANETS.iter().zip(PLANET_CONFIGS.iter()) {
            assert_eq!(facts.id, config.id);
        }
        let order = [
            "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
        ];
        for (facts, id) in PLANETS.iter().zip(order) {
            assert_eq!(facts.id, id);
        }
    }

    #[test]
    fn planets_are_ordered_sun_outward() {
        for pair in PLANET_CONFIGS.windows(2) {
            assert!(
                pair[0].orbit_radius < pair[1].orbit_radius,
                "{} should orbit inside {}",
                pair[0].id,
                pair[1].id
            );
        }
    }

    #[test]
    fn ids_are_unique_and_match_names() {
        for (i, planet) in PLANETS.iter().enumerate() {
            assert_eq!(planet.id, planet.name.to_lowercase());
            for other in &PLANETS[i + 1..] {
                assert_ne!(planet.id, other.id);
            }
        }
    }

    #[test]
    fn facts_stay_joined_to_scene_rows() {
        // Earth sits between Venus and Mars in both tables.
        let earth = &PLANETS[2];
        assert_eq!(earth.id, "earth");
        assert_eq!(earth.sun_distance, "1 AU");
        assert_eq!(earth.moons, "1");
        assert_eq!(PLANET_CONFIGS[2].orbit_radius, 16.0);

        let mars = &PLANETS[3];
        assert_eq!(mars.id, "mars");
        assert_eq!(mars.moons, "2");
        assert_eq!(PLANET_CONFIGS[3].size, 0.3);
    }

    #[test]
    fn inner_planets_orbit_faster() {
        for pair in PLANET_CONFIGS.windows(2) {
            assert!(pair[0].orbit_speed > pair[1].orbit_speed);
        }
    }

    #[test]
    fn ring_radii_hug_the_planet() {
        let (inner, outer) = PLANET_CONFIGS[5].ring_radii().unwrap();
        assert_eq!(PLANET_CONFIGS[5].id, "saturn");
        assert!((inner - 0.9).abs() < 1e-6);
        assert!((outer - 1.4).abs() < 1e-6);

        let (inner, outer) = PLANET_CONFIGS[6].ring_radii().unwrap();
        assert_eq!(PLANET_CONFIGS[6].id, "uranus");
        assert!((inner - 0.6).abs() < 1e-6);
        assert!((outer - 1.0).abs() < 1e-6);

        assert!(PLANET_CONFIGS[4].ring_radii().is_none());
    }

    #[test]
    fn orbit_offset_stays_inside_orbit_line() {
        for planet in &PLANET_CONFIGS {
            let offset = planet.orbit_offset();
            assert!(offset < planet.orbit_radius);
            assert!(offset > planet.orbit_radius - 0.2);
        }
    }

    #[test]
    fn spin_sign_matches_direction() {
        assert_eq!(SpinDirection::CounterClockwise.sign(), 1.0);
        assert_eq!(SpinDirection::Clockwise.sign(), -1.0);
        // Venus and Uranus are the two retrograde rotators.
        let retrograde: Vec<&str> = PLANET_CONFIGS
            .iter()
            .filter(|p| p.spin == SpinDirection::Clockwise)
            .map(|p| p.id)
            .collect();
        assert_eq!(retrograde, ["venus", "uranus"]);
    }
}
