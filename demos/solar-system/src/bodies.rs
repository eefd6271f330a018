//! Body tables: visual layout of the sun and planets, plus the facts shown
//! in the detail panel.
//!
//! Sizes, distances and speeds are stylized for readability, not to scale.

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 3.0;
pub const SUN_COLOR: u32 = 0xffff00;
pub const SUN_EMISSIVE: f32 = 0.5;

// ── Lights ───────────────────────────────────────────────────────────

pub const SUN_LIGHT_INTENSITY: f32 = 2.0;
pub const SUN_LIGHT_RANGE: f32 = 500.0;
pub const AMBIENT_COLOR: u32 = 0x404040;
pub const AMBIENT_INTENSITY: f32 = 0.2;

// ── Planets ──────────────────────────────────────────────────────────

/// Surface roughness shared by all planets.
pub const PLANET_ROUGHNESS: f32 = 0.8;

/// Layout and motion of one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetDesc {
    pub size: f32,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    /// Distance from the sun along the orbit group's local X axis.
    pub distance: f32,
    /// Revolution rate relative to the base speed.
    pub orbit_speed: f32,
    /// Orbit group Euler Z rotation (radians).
    pub tilt: f32,
    /// Rotation rate about the planet's own Y axis relative to the base speed.
    pub spin: f32,
}

pub const PLANETS: [PlanetDesc; PLANET_COUNT] = [
    PlanetDesc { size: 0.4,  color: 0x8c7853, distance: 8.0,  orbit_speed: 1.6,  tilt: 0.034, spin: 1.5 }, // Mercury
    PlanetDesc { size: 0.6,  color: 0xffc649, distance: 11.0, orbit_speed: 1.2,  tilt: 0.03,  spin: 0.8 }, // Venus
    PlanetDesc { size: 0.65, color: 0x6b93d6, distance: 14.0, orbit_speed: 1.0,  tilt: 0.0,   spin: 1.0 }, // Earth
    PlanetDesc { size: 0.5,  color: 0xc1440e, distance: 18.0, orbit_speed: 0.8,  tilt: 0.032, spin: 0.9 }, // Mars
    PlanetDesc { size: 1.4,  color: 0xd8ca9d, distance: 25.0, orbit_speed: 0.4,  tilt: 0.022, spin: 2.5 }, // Jupiter
    PlanetDesc { size: 1.2,  color: 0xfad5a5, distance: 32.0, orbit_speed: 0.3,  tilt: 0.044, spin: 2.3 }, // Saturn
    PlanetDesc { size: 0.9,  color: 0x4fd0e7, distance: 38.0, orbit_speed: 0.25, tilt: 0.032, spin: 1.4 }, // Uranus
    PlanetDesc { size: 0.9,  color: 0x4b70dd, distance: 44.0, orbit_speed: 0.2,  tilt: 0.025, spin: 1.5 }, // Neptune
];

/// Phong exponent that roughly matches a PBR surface of the given roughness.
pub fn roughness_to_shininess(roughness: f32) -> f32 {
    let r4 = roughness.clamp(0.05, 1.0).powi(4);
    (2.0 / r4 - 2.0).max(1.0)
}

// ── Saturn ring ──────────────────────────────────────────────────────

pub const RING_PLANET: usize = SATURN;
pub const RING_INNER: f32 = 1.5;
pub const RING_OUTER: f32 = 2.5;
pub const RING_COLOR: u32 = 0xffffff;
pub const RING_OPACITY: f32 = 0.6;

// ── Stars ────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 10_000;
pub const STAR_HALF_EXTENT: f32 = 1000.0;
pub const STAR_SIZE: f32 = 0.5;
pub const STAR_SEED: u64 = 0x5eed_0f_57a2;

// ── Detail panel facts ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Terrestrial,
    GasGiant,
    IceGiant,
}

impl BodyKind {
    pub fn label(self) -> &'static str {
        match self {
            BodyKind::Star => "Star (G-type main sequence)",
            BodyKind::Terrestrial => "Terrestrial Planet",
            BodyKind::GasGiant => "Gas Giant",
            BodyKind::IceGiant => "Ice Giant",
        }
    }
}

/// Static facts about a body, shown when it is selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyInfo {
    pub name: &'static str,
    pub kind: BodyKind,
    pub distance: &'static str,
    pub diameter: &'static str,
    pub day_length: &'static str,
    pub year_length: &'static str,
    pub temperature: &'static str,
    pub moons: u32,
    pub description: &'static str,
}

pub static SUN_INFO: BodyInfo = BodyInfo {
    name: "Sun",
    kind: BodyKind::Star,
    distance: "0 km (center of the system)",
    diameter: "1,392,700 km",
    day_length: "25 to 35 Earth days",
    year_length: "230 million years (around the galaxy)",
    temperature: "5,500°C (surface)",
    moons: 0,
    description: "The star at the center of the solar system. It holds 99.8% of the system's mass and its light and heat drive the climate of every planet.",
};

pub static PLANET_INFO: [BodyInfo; PLANET_COUNT] = [
    BodyInfo {
        name: "Mercury",
        kind: BodyKind::Terrestrial,
        distance: "57.9 million km",
        diameter: "4,879 km",
        day_length: "59 Earth days",
        year_length: "88 Earth days",
        temperature: "-173°C to 427°C",
        moons: 0,
        description: "The smallest planet and the closest to the sun. Its thin exosphere cannot hold heat, so nights are far colder than days.",
    },
    BodyInfo {
        name: "Venus",
        kind: BodyKind::Terrestrial,
        distance: "108.2 million km",
        diameter: "12,104 km",
        day_length: "243 Earth days",
        year_length: "225 Earth days",
        temperature: "462°C",
        moons: 0,
        description: "A dense carbon dioxide atmosphere traps heat, making Venus the hottest planet. It spins backwards, slower than it orbits.",
    },
    BodyInfo {
        name: "Earth",
        kind: BodyKind::Terrestrial,
        distance: "149.6 million km",
        diameter: "12,742 km",
        day_length: "24 hours",
        year_length: "365.25 days",
        temperature: "-88°C to 58°C",
        moons: 1,
        description: "Our home, and the only world known to host life. Liquid water covers about 71% of its surface.",
    },
    BodyInfo {
        name: "Mars",
        kind: BodyKind::Terrestrial,
        distance: "227.9 million km",
        diameter: "6,779 km",
        day_length: "24.6 hours",
        year_length: "687 Earth days",
        temperature: "-153°C to 20°C",
        moons: 2,
        description: "The red planet owes its color to iron oxide dust. It has the tallest volcano in the solar system, Olympus Mons.",
    },
    BodyInfo {
        name: "Jupiter",
        kind: BodyKind::GasGiant,
        distance: "778.5 million km",
        diameter: "139,820 km",
        day_length: "9.9 hours",
        year_length: "11.9 Earth years",
        temperature: "-108°C",
        moons: 95,
        description: "The largest planet, more than twice as massive as all the others combined. The Great Red Spot is a storm wider than Earth.",
    },
    BodyInfo {
        name: "Saturn",
        kind: BodyKind::GasGiant,
        distance: "1.43 billion km",
        diameter: "116,460 km",
        day_length: "10.7 hours",
        year_length: "29.5 Earth years",
        temperature: "-139°C",
        moons: 146,
        description: "Famous for its bright ring system of ice and rock. Saturn is the least dense planet and would float in water.",
    },
    BodyInfo {
        name: "Uranus",
        kind: BodyKind::IceGiant,
        distance: "2.87 billion km",
        diameter: "50,724 km",
        day_length: "17.2 hours",
        year_length: "84 Earth years",
        temperature: "-197°C",
        moons: 28,
        description: "An ice giant tipped on its side, so each pole gets about 42 years of continuous sunlight. Methane gives it a blue-green tint.",
    },
    BodyInfo {
        name: "Neptune",
        kind: BodyKind::IceGiant,
        distance: "4.5 billion km",
        diameter: "49,244 km",
        day_length: "16.1 hours",
        year_length: "165 Earth years",
        temperature: "-201°C",
        moons: 16,
        description: "The most distant planet, with the fastest winds in the solar system at over 2,000 km/h.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_ordered_outward() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
        }
        assert!(PLANETS[MERCURY].distance > SUN_RADIUS);
    }

    #[test]
    fn info_names_match_indices() {
        assert_eq!(PLANET_INFO[EARTH].name, "Earth");
        assert_eq!(PLANET_INFO[SATURN].name, "Saturn");
        assert_eq!(PLANET_INFO[NEPTUNE].name, "Neptune");
        assert_eq!(PLANET_INFO[VENUS].kind, BodyKind::Terrestrial);
        assert_eq!(PLANET_INFO[URANUS].kind, BodyKind::IceGiant);
        assert_eq!(PLANET_INFO[JUPITER].kind, BodyKind::GasGiant);
        assert_eq!(PLANET_INFO[MARS].moons, 2);
    }

    #[test]
    fn ring_fits_outside_its_planet() {
        assert!(RING_INNER > PLANETS[RING_PLANET].size);
        assert!(RING_OUTER > RING_INNER);
    }

    #[test]
    fn rough_surfaces_get_broad_highlights() {
        let rough = roughness_to_shininess(PLANET_ROUGHNESS);
        let smooth = roughness_to_shininess(0.2);
        assert!(rough >= 1.0);
        assert!(smooth > rough);
    }
}
