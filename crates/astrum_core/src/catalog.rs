/// Status of a mission in a planet's exploration log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionStatus {
    Active,
    Ended,
    Success,
    Failure,
}

impl MissionStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Ended => "Ended",
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }

    /// Only active missions get the highlighted badge
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionRecord {
    pub name: &'static str,
    pub year: &'static str,
    pub status: MissionStatus,
    pub agency: &'static str,
}

/// Fixed set of descriptive statistics shown in the HUD table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetStats {
    pub diameter: &'static str,
    pub mass: &'static str,
    pub gravity: &'static str,
    pub temperature: &'static str,
    /// Rotation period
    pub day: &'static str,
    /// Orbital period
    pub year: &'static str,
    pub moons: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScienceFacts {
    pub atmosphere: &'static str,
    pub structure: &'static str,
    pub pressure: &'static str,
    pub magnetic_field: &'static str,
    pub curiosities: &'static [&'static str],
}

/// Immutable catalog entry for one celestial body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    /// Scaled orbital distance from the origin (render units)
    pub distance: f32,
    /// Scaled sphere radius (render units)
    pub radius: f32,
    /// Base color as `#rrggbb`
    pub color: &'static str,
    pub stats: PlanetStats,
    pub science: ScienceFacts,
    pub missions: &'static [MissionRecord],
}

/// Parse `#rrggbb` into sRGB components in 0..=1
pub fn hex_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Look up a catalog planet by id
pub fn find(id: &str) -> Option<&'static PlanetRecord> {
    PLANETS.iter().find(|p| p.id == id)
}

const NO_STATS: PlanetStats = PlanetStats {
    diameter: "",
    mass: "",
    gravity: "",
    temperature: "",
    day: "",
    year: "",
    moons: 0,
};

const NO_SCIENCE: ScienceFacts = ScienceFacts {
    atmosphere: "",
    structure: "",
    pressure: "",
    magnetic_field: "",
    curiosities: &[],
};

/// The star at the origin. Clicking it returns to the overview.
pub static SUN: PlanetRecord = PlanetRecord {
    id: "sun",
    name: "Sun",
    tagline: "G2V Star",
    description: "The center of our solar system.",
    distance: 0.0,
    radius: 5.0,
    color: "#ffaa00",
    stats: NO_STATS,
    science: NO_SCIENCE,
    missions: &[],
};

/// Planets in orbital order
pub static PLANETS: [PlanetRecord; 8] = [
    PlanetRecord {
        id: "mercury",
        name: "Mercury",
        tagline: "The Scorched Messenger",
        description: "The smallest planet and the closest to the Sun, a cratered world of extremes with almost no atmosphere to hold its heat.",
        distance: 10.0,
        radius: 0.5,
        color: "#a8a8a8",
        stats: PlanetStats {
            diameter: "4,879 km",
            mass: "3.30 × 10^23 kg",
            gravity: "3.7 m/s²",
            temperature: "-173 °C to 427 °C",
            day: "58.6 Earth days",
            year: "88 Earth days",
            moons: 0,
        },
        science: ScienceFacts {
            atmosphere: "Tenuous exosphere of oxygen, sodium, hydrogen, helium and potassium.",
            structure: "Oversized iron core taking about 85% of the radius, thin silicate mantle and crust.",
            pressure: "Below 10^-14 bar",
            magnetic_field: "Weak global dipole, about 1% of Earth's field strength.",
            curiosities: &[
                "A solar day lasts two Mercurian years.",
                "Permanently shadowed polar craters hold water ice.",
                "The planet is still shrinking as its core cools.",
            ],
        },
        missions: &[
            MissionRecord { name: "Mariner 10", year: "1974", status: MissionStatus::Success, agency: "NASA" },
            MissionRecord { name: "MESSENGER", year: "2011", status: MissionStatus::Ended, agency: "NASA" },
            MissionRecord { name: "BepiColombo", year: "2018", status: MissionStatus::Active, agency: "ESA/JAXA" },
        ],
    },
    PlanetRecord {
        id: "venus",
        name: "Venus",
        tagline: "The Veiled Furnace",
        description: "Earth's twin in size, smothered under a crushing carbon dioxide atmosphere that makes it the hottest planet in the system.",
        distance: 15.0,
        radius: 0.95,
        color: "#e3bb76",
        stats: PlanetStats {
            diameter: "12,104 km",
            mass: "4.87 × 10^24 kg",
            gravity: "8.87 m/s²",
            temperature: "464 °C",
            day: "243 Earth days",
            year: "225 Earth days",
            moons: 0,
        },
        science: ScienceFacts {
            atmosphere: "96.5% carbon dioxide, 3.5% nitrogen, sulfuric acid cloud decks.",
            structure: "Iron-nickel core, rocky mantle, young volcanic crust.",
            pressure: "92 bar",
            magnetic_field: "No intrinsic field; an induced magnetosphere from the solar wind.",
            curiosities: &[
                "It rotates backwards, so the Sun rises in the west.",
                "A day on Venus is longer than its year.",
                "Its upper atmosphere circles the planet in four days.",
            ],
        },
        missions: &[
            MissionRecord { name: "Venera 7", year: "1970", status: MissionStatus::Success, agency: "USSR" },
            MissionRecord { name: "Magellan", year: "1990", status: MissionStatus::Ended, agency: "NASA" },
            MissionRecord { name: "Akatsuki", year: "2015", status: MissionStatus::Ended, agency: "JAXA" },
        ],
    },
    PlanetRecord {
        id: "earth",
        name: "Earth",
        tagline: "The Pale Blue Dot",
        description: "The only world known to harbor life, with liquid oceans, plate tectonics and a protective magnetic shield.",
        distance: 21.0,
        radius: 1.0,
        color: "#2f6fd6",
        stats: PlanetStats {
            diameter: "12,742 km",
            mass: "5.97 × 10^24 kg",
            gravity: "9.81 m/s²",
            temperature: "15 °C (mean)",
            day: "23 h 56 min",
            year: "365.25 days",
            moons: 1,
        },
        science: ScienceFacts {
            atmosphere: "78% nitrogen, 21% oxygen, argon and trace carbon dioxide.",
            structure: "Solid inner core, liquid outer core, convecting mantle, tectonic crust.",
            pressure: "1 bar",
            magnetic_field: "Strong dipole generated by the outer-core geodynamo.",
            curiosities: &[
                "About 71% of the surface is covered by water.",
                "The Moon slowly lengthens the day by tidal braking.",
                "It is the densest planet in the solar system.",
            ],
        },
        missions: &[
            MissionRecord { name: "Landsat 9", year: "2021", status: MissionStatus::Active, agency: "NASA/USGS" },
            MissionRecord { name: "Sentinel-6", year: "2020", status: MissionStatus::Active, agency: "ESA" },
            MissionRecord { name: "International Space Station", year: "1998", status: MissionStatus::Active, agency: "NASA/Roscosmos/ESA/JAXA/CSA" },
        ],
    },
    PlanetRecord {
        id: "mars",
        name: "Mars",
        tagline: "The Red Frontier",
        description: "A cold desert world of rust-colored dust, towering volcanoes and ancient river valleys.",
        distance: 28.0,
        radius: 0.7,
        color: "#c1440e",
        stats: PlanetStats {
            diameter: "6,779 km",
            mass: "6.42 × 10^23 kg",
            gravity: "3.71 m/s²",
            temperature: "-63 °C (mean)",
            day: "24 h 37 min",
            year: "687 Earth days",
            moons: 2,
        },
        science: ScienceFacts {
            atmosphere: "95% carbon dioxide, 2.8% nitrogen, 2% argon.",
            structure: "Partly molten iron-sulfur core, silicate mantle, basaltic crust.",
            pressure: "0.006 bar",
            magnetic_field: "No global field; remnant crustal magnetization in the south.",
            curiosities: &[
                "Olympus Mons is nearly three times the height of Everest.",
                "Valles Marineris would span the continental United States.",
                "Dust storms can cover the whole planet for months.",
            ],
        },
        missions: &[
            MissionRecord { name: "Viking 1", year: "1976", status: MissionStatus::Success, agency: "NASA" },
            MissionRecord { name: "Mars Reconnaissance Orbiter", year: "2006", status: MissionStatus::Active, agency: "NASA" },
            MissionRecord { name: "Perseverance", year: "2021", status: MissionStatus::Active, agency: "NASA" },
            MissionRecord { name: "Mars 96", year: "1996", status: MissionStatus::Failure, agency: "Roscosmos" },
        ],
    },
    PlanetRecord {
        id: "jupiter",
        name: "Jupiter",
        tagline: "The Storm King",
        description: "The largest planet, a gas giant banded by jet streams and marked by a storm wider than Earth.",
        distance: 42.0,
        radius: 3.2,
        color: "#d39c7e",
        stats: PlanetStats {
            diameter: "139,820 km",
            mass: "1.90 × 10^27 kg",
            gravity: "24.79 m/s²",
            temperature: "-108 °C (cloud tops)",
            day: "9 h 56 min",
            year: "11.86 Earth years",
            moons: 95,
        },
        science: ScienceFacts {
            atmosphere: "90% hydrogen, 10% helium, ammonia and water clouds.",
            structure: "Dilute core wrapped in metallic hydrogen under a deep molecular envelope.",
            pressure: "Unbounded; no solid surface",
            magnetic_field: "The strongest planetary field, about 20,000 times Earth's.",
            curiosities: &[
                "The Great Red Spot has raged for at least 350 years.",
                "It has the shortest day of any planet.",
                "Its moon Ganymede is larger than Mercury.",
            ],
        },
        missions: &[
            MissionRecord { name: "Galileo", year: "1995", status: MissionStatus::Ended, agency: "NASA" },
            MissionRecord { name: "Juno", year: "2016", status: MissionStatus::Active, agency: "NASA" },
            MissionRecord { name: "JUICE", year: "2023", status: MissionStatus::Active, agency: "ESA" },
        ],
    },
    PlanetRecord {
        id: "saturn",
        name: "Saturn",
        tagline: "The Ringed Jewel",
        description: "A gas giant less dense than water, crowned by a vast system of ice and rock rings.",
        distance: 58.0,
        radius: 2.7,
        color: "#e3d7a3",
        stats: PlanetStats {
            diameter: "116,460 km",
            mass: "5.68 × 10^26 kg",
            gravity: "10.44 m/s²",
            temperature: "-139 °C (cloud tops)",
            day: "10 h 33 min",
            year: "29.46 Earth years",
            moons: 146,
        },
        science: ScienceFacts {
            atmosphere: "96% hydrogen, 3% helium, methane and ammonia traces.",
            structure: "Rocky core, metallic hydrogen layer, molecular hydrogen envelope.",
            pressure: "Unbounded; no solid surface",
            magnetic_field: "Nearly perfectly aligned with the rotation axis.",
            curiosities: &[
                "The main rings are only about ten meters thick.",
                "A hexagonal jet stream circles the north pole.",
                "Titan has lakes of liquid methane.",
            ],
        },
        missions: &[
            MissionRecord { name: "Pioneer 11", year: "1979", status: MissionStatus::Success, agency: "NASA" },
            MissionRecord { name: "Cassini-Huygens", year: "2004", status: MissionStatus::Ended, agency: "NASA/ESA/ASI" },
        ],
    },
    PlanetRecord {
        id: "uranus",
        name: "Uranus",
        tagline: "The Tilted Ice Giant",
        description: "An ice giant knocked onto its side, rolling around the Sun with extreme seasons.",
        distance: 72.0,
        radius: 1.8,
        color: "#a6e4ec",
        stats: PlanetStats {
            diameter: "50,724 km",
            mass: "8.68 × 10^25 kg",
            gravity: "8.69 m/s²",
            temperature: "-197 °C (cloud tops)",
            day: "17 h 14 min",
            year: "84 Earth years",
            moons: 28,
        },
        science: ScienceFacts {
            atmosphere: "83% hydrogen, 15% helium, 2% methane giving the cyan hue.",
            structure: "Small rocky core, thick mantle of water, ammonia and methane ices.",
            pressure: "Unbounded; no solid surface",
            magnetic_field: "Tilted 59° from the spin axis and offset from the center.",
            curiosities: &[
                "Its axial tilt is about 98 degrees.",
                "Each pole gets 42 years of continuous daylight.",
                "It was the first planet found with a telescope.",
            ],
        },
        missions: &[
            MissionRecord { name: "Voyager 2", year: "1986", status: MissionStatus::Success, agency: "NASA" },
        ],
    },
    PlanetRecord {
        id: "neptune",
        name: "Neptune",
        tagline: "The Windswept Blue",
        description: "The outermost planet, a deep blue ice giant with the fastest winds in the solar system.",
        distance: 84.0,
        radius: 1.7,
        color: "#3f66d8",
        stats: PlanetStats {
            diameter: "49,244 km",
            mass: "1.02 × 10^26 kg",
            gravity: "11.15 m/s²",
            temperature: "-201 °C (cloud tops)",
            day: "16 h 6 min",
            year: "164.8 Earth years",
            moons: 16,
        },
        science: ScienceFacts {
            atmosphere: "80% hydrogen, 19% helium, methane haze.",
            structure: "Rocky core under a hot, dense mantle of water, ammonia and methane ices.",
            pressure: "Unbounded; no solid surface",
            magnetic_field: "Tilted 47° from the spin axis, strongly offset from the center.",
            curiosities: &[
                "Winds reach 2,100 km/h.",
                "It was located by mathematical prediction before it was seen.",
                "Triton orbits it backwards and is slowly spiraling inward.",
            ],
        },
        missions: &[
            MissionRecord { name: "Voyager 2", year: "1989", status: MissionStatus::Success, agency: "NASA" },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (i, a) in PLANETS.iter().enumerate() {
            for b in &PLANETS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
            assert_ne!(a.id, SUN.id);
        }
    }

    #[test]
    fn planets_are_ordered_by_distance() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
        }
        assert!(PLANETS[0].distance > SUN.radius);
    }

    #[test]
    fn every_catalog_color_parses() {
        for p in PLANETS.iter().chain(std::iter::once(&SUN)) {
            assert!(hex_rgb(p.color).is_some(), "bad color for {}", p.id);
        }
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_rgb("#ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(hex_rgb("ff0000"), None);
        assert_eq!(hex_rgb("#ff00"), None);
        assert_eq!(hex_rgb("#gg0000"), None);
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find("mars").map(|p| p.name), Some("Mars"));
        assert!(find("pluto").is_none());
        assert!(find("sun").is_none());
    }

    #[test]
    fn only_active_missions_are_highlighted() {
        assert!(MissionStatus::Active.is_active());
        for s in [MissionStatus::Ended, MissionStatus::Success, MissionStatus::Failure] {
            assert!(!s.is_active());
        }
    }
}
