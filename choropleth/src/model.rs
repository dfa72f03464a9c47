use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

pub type JsonObject = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// Parses `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// Screen-space point in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// One administrative region as read from the boundary file.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    pub name: String,
    pub geometry: Option<MultiPolygon<f64>>,
    pub properties: JsonObject,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub region: String,
    #[serde(rename = "CT_Index")]
    pub ct_index: f64,
}

/// A boundary with its index value attached, `None` when no index record
/// carries the same name.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedRegion {
    pub name: String,
    pub geometry: Option<MultiPolygon<f64>>,
    pub properties: JsonObject,
    pub ct_index: Option<f64>,
}

impl JoinedRegion {
    /// Regions that get a fill color and a label.
    pub fn is_labelled(&self) -> bool {
        self.geometry.is_some() && self.ct_index.is_some_and(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_reject() {
        let c = Color::from_hex("#08306b").unwrap();
        assert_eq!(c, Color::rgb(0x08, 0x30, 0x6b));
        assert_eq!(c.to_hex(), "#08306b");
        assert!(Color::from_hex("08306b").is_none());
        assert!(Color::from_hex("#0830").is_none());
        assert!(Color::from_hex("#zz306b").is_none());
    }

    #[test]
    fn lerp_clamps() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(128, 128, 128));
    }

    #[test]
    fn index_record_uses_source_key() {
        let rec: IndexRecord =
            serde_json::from_str(r#"{"region":"경기도","CT_Index":0.88}"#).unwrap();
        assert_eq!(rec.region, "경기도");
        assert_eq!(rec.ct_index, 0.88);
    }
}
