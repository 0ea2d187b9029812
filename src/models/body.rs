use std::fmt;

/// German display names, keyed by the internal body key
const NAMES_DE: &[(&str, &str)] = &[
    ("Sun", "Sonne"),
    ("Moon", "Mond"),
    ("Mercury", "Merkur"),
    ("Venus", "Venus"),
    ("Mars", "Mars"),
    ("Jupiter", "Jupiter"),
    ("Saturn", "Saturn"),
    ("Uranus", "Uranus"),
    ("Neptune", "Neptun"),
    ("Pluto", "Pluto"),
    ("Chiron", "Chiron"),
];

/// Look up the German name for a body key, falling back to the key itself
pub fn german_name(key: &str) -> &str {
    NAMES_DE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
        .unwrap_or(key)
}

/// Bodies whose declination is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
}

impl CelestialBody {
    /// Catalog in response order
    pub fn all() -> &'static [CelestialBody] {
        &[
            CelestialBody::Sun,
            CelestialBody::Moon,
            CelestialBody::Mercury,
            CelestialBody::Venus,
            CelestialBody::Mars,
            CelestialBody::Jupiter,
            CelestialBody::Saturn,
            CelestialBody::Uranus,
            CelestialBody::Neptune,
            CelestialBody::Pluto,
            CelestialBody::Chiron,
        ]
    }

    /// Get Swiss Ephemeris body ID
    pub fn swe_id(&self) -> i32 {
        match self {
            CelestialBody::Sun => 0,      // SE_SUN
            CelestialBody::Moon => 1,     // SE_MOON
            CelestialBody::Mercury => 2,  // SE_MERCURY
            CelestialBody::Venus => 3,    // SE_VENUS
            CelestialBody::Mars => 4,     // SE_MARS
            CelestialBody::Jupiter => 5,  // SE_JUPITER
            CelestialBody::Saturn => 6,   // SE_SATURN
            CelestialBody::Uranus => 7,   // SE_URANUS
            CelestialBody::Neptune => 8,  // SE_NEPTUNE
            CelestialBody::Pluto => 9,    // SE_PLUTO
            CelestialBody::Chiron => 15,  // SE_CHIRON (needs seas_18.se1)
        }
    }

    /// Internal key, also the lookup key into the German name table
    pub fn key(&self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::Chiron => "Chiron",
        }
    }

    /// Data file the body needs beyond the analytical fallback
    pub fn data_file(&self) -> Option<&'static str> {
        match self {
            CelestialBody::Chiron => Some("seas_18.se1"),
            _ => None,
        }
    }

    pub fn german_name(&self) -> &'static str {
        german_name(self.key())
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
