/// Celestial catalog: the sun and the eight planets with their display data.
///
/// Distances and radii are scene units, not to scale. Speeds are orbital
/// angular velocities in rad/s at global speed 1 (Earth = 1.0).

use serde::{Deserialize, Serialize};

/// Embed the catalog JSON at compile time.
const CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Free-form facts shown in the tooltip. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Fields shared by the sun and the planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDescriptor {
    pub name: String,
    pub radius: f32,
    /// Packed `0xRRGGBB`; written as `"#RRGGBB"` in JSON.
    #[serde(with = "hex_color")]
    pub color: u32,
    /// Spin about the body's own Y axis, rad/s.
    pub rotation_speed: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<BodyInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDescriptor {
    #[serde(flatten)]
    pub body: BodyDescriptor,
    /// Orbit radius around the sun.
    pub distance: f32,
    /// Orbital angular velocity, rad/s.
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub sun: BodyDescriptor,
    pub planets: Vec<PlanetDescriptor>,
}

impl Catalog {
    /// Load the built-in catalog.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let catalog: Catalog = serde_json::from_str(json)?;
        if catalog.planets.windows(2).any(|w| w[0].distance >= w[1].distance) {
            log::warn!("catalog: planets are not ordered by increasing distance");
        }
        log::info!("catalog: {} and {} planets", catalog.sun.name, catalog.planets.len());
        Ok(catalog)
    }

    pub fn planet(&self, index: usize) -> Option<&PlanetDescriptor> {
        self.planets.get(index)
    }

    /// Descriptor for a body reference.
    pub fn body(&self, body: BodyRef) -> Option<&BodyDescriptor> {
        match body {
            BodyRef::Sun => Some(&self.sun),
            BodyRef::Planet(i) => self.planets.get(i).map(|p| &p.body),
        }
    }
}

/// Which catalog entry a scene node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRef {
    Sun,
    Planet(usize),
}

impl BodyRef {
    /// Encoding stored in `Node::user_data` and in UI events: 0 is the sun,
    /// 1 + i is planet i.
    pub fn code(self) -> u32 {
        match self {
            BodyRef::Sun => 0,
            BodyRef::Planet(i) => i as u32 + 1,
        }
    }

    pub fn from_code(code: u32) -> Self {
        match code {
            0 => BodyRef::Sun,
            n => BodyRef::Planet(n as usize - 1),
        }
    }
}

mod hex_color {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("#{:06X}", color & 0xFF_FFFF))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid color {raw:?}, expected #RRGGBB")))
    }

    pub(super) fn parse(raw: &str) -> Option<u32> {
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.sun.name, "Sun");
        assert_eq!(catalog.sun.radius, 3.0);
        assert_eq!(catalog.sun.color, 0xFDB813);
        assert_eq!(catalog.planets.len(), 8);

        let names: Vec<_> = catalog.planets.iter().map(|p| p.body.name.as_str()).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );

        let earth = catalog.planet(2).unwrap();
        assert_eq!(earth.distance, 15.0);
        assert_eq!(earth.speed, 1.0);
        assert_eq!(earth.body.rotation_speed, 0.02);
        assert_eq!(earth.body.color, 0x4F94CD);
        assert_eq!(
            earth.body.info.as_ref().and_then(|i| i.year.as_deref()),
            Some("365.25 days")
        );
    }

    #[test]
    fn planets_increase_in_distance() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.planets.windows(2).all(|w| w[0].distance < w[1].distance));
    }

    #[test]
    fn sun_info_has_star_fields() {
        let catalog = Catalog::load().unwrap();
        let info = catalog.sun.info.unwrap();
        assert_eq!(info.kind.as_deref(), Some("G-type main-sequence star"));
        assert_eq!(info.temperature.as_deref(), Some("5,778 K"));
        assert!(info.day.is_none());
    }

    #[test]
    fn entries_without_info_still_load() {
        let json = r##"{
            "sun": { "name": "Sol", "radius": 2, "color": "#ffffff", "rotationSpeed": 0.1 },
            "planets": [
                { "name": "Rock", "radius": 0.5, "distance": 5, "color": "#808080",
                  "speed": 1.0, "rotationSpeed": 0.01, "info": { "diameter": "1 km" } }
            ]
        }"##;
        let catalog = Catalog::from_json(json).unwrap();
        assert!(catalog.sun.info.is_none());
        let info = catalog.planets[0].body.info.as_ref().unwrap();
        assert_eq!(info.diameter.as_deref(), Some("1 km"));
        assert!(info.year.is_none());
    }

    #[test]
    fn bad_colors_are_rejected() {
        let json = r#"{
            "sun": { "name": "Sol", "radius": 2, "color": "orange", "rotationSpeed": 0.1 },
            "planets": []
        }"#;
        assert!(Catalog::from_json(json).is_err());
        assert_eq!(hex_color::parse("#4169E1"), Some(0x4169E1));
        assert_eq!(hex_color::parse("4169E1"), Some(0x4169E1));
        assert_eq!(hex_color::parse("#fff"), None);
        assert_eq!(hex_color::parse("#+12345"), None);
    }

    #[test]
    fn body_ref_codes() {
        assert_eq!(BodyRef::Sun.code(), 0);
        assert_eq!(BodyRef::Planet(2).code(), 3);
        assert_eq!(BodyRef::from_code(3), BodyRef::Planet(2));
        assert_eq!(BodyRef::from_code(0), BodyRef::Sun);
    }

    #[test]
    fn catalog_serializes_colors_as_hex() {
        let catalog = Catalog::load().unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.contains("\"#FDB813\""));
        assert!(json.contains("\"rotationSpeed\""));
    }
}
