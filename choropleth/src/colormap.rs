//! Continuous single-hue color scales.

use serde::Serialize;

use crate::geometry::tolerance::{clamp01, safe_div};
use crate::model::Color;

/// Evenly spaced color stops, interpolated linearly in RGB.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Colormap {
    pub name: &'static str,
    pub stops: Vec<Color>,
}

impl Colormap {
    /// ColorBrewer sequential Blues, light to dark.
    pub fn blues() -> Colormap {
        Self::from_hex("Blues", &BLUES)
    }

    /// ColorBrewer sequential Greens, light to dark.
    pub fn greens() -> Colormap {
        Self::from_hex("Greens", &GREENS)
    }

    /// ColorBrewer sequential Reds, light to dark.
    pub fn reds() -> Colormap {
        Self::from_hex("Reds", &REDS)
    }

    pub fn by_name(name: &str) -> Option<Colormap> {
        match name {
            "Blues" => Some(Self::blues()),
            "Greens" => Some(Self::greens()),
            "Reds" => Some(Self::reds()),
            _ => None,
        }
    }

    fn from_hex(name: &'static str, hex: &[&str]) -> Colormap {
        let stops = hex.iter().filter_map(|h| Color::from_hex(h)).collect();
        Colormap { name, stops }
    }

    /// Color at position `t` in [0, 1]; out-of-range input is clamped.
    pub fn sample(&self, t: f64) -> Color {
        match self.stops.len() {
            0 => Color::BLACK,
            1 => self.stops[0],
            n => {
                let t = if t.is_finite() { clamp01(t) } else { 0.0 };
                let pos = t * (n - 1) as f64;
                let i = (pos.floor() as usize).min(n - 2);
                self.stops[i].lerp(self.stops[i + 1], pos - i as f64)
            }
        }
    }
}

const BLUES: [&str; 9] = [
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];

const GREENS: [&str; 9] = [
    "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
    "#00441b",
];

const REDS: [&str; 9] = [
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
    "#67000d",
];

/// Linear normalization of data values onto [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    /// Range of the finite values, `None` when there are none.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Normalize> {
        let mut range: Option<(f64, f64)> = None;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            range = Some(match range {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        range.map(|(vmin, vmax)| Normalize { vmin, vmax })
    }

    /// A single-valued range maps everything to the low end.
    pub fn apply(&self, v: f64) -> f64 {
        clamp01(safe_div(v - self.vmin, self.vmax - self.vmin, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blues_endpoints() {
        let cm = Colormap::blues();
        assert_eq!(cm.sample(0.0).to_hex(), "#f7fbff");
        assert_eq!(cm.sample(1.0).to_hex(), "#08306b");
        assert_eq!(cm.sample(0.5).to_hex(), "#6baed6");
        assert_eq!(cm.sample(f64::NAN), cm.sample(0.0));
    }

    #[test]
    fn samples_darken_monotonically() {
        let cm = Colormap::blues();
        let lum = |c: Color| c.r as u32 + c.g as u32 + c.b as u32;
        let mut prev = u32::MAX;
        for i in 0..=20 {
            let l = lum(cm.sample(i as f64 / 20.0));
            assert!(l <= prev, "step {} brighter than previous", i);
            prev = l;
        }
    }

    #[test]
    fn by_name_knows_sequential_maps() {
        assert_eq!(Colormap::by_name("Greens").unwrap().stops.len(), 9);
        assert!(Colormap::by_name("viridis").is_none());
    }

    #[test]
    fn normalize_skips_non_finite() {
        let n = Normalize::from_values([0.7, f64::NAN, 0.6, 0.9]).unwrap();
        assert_eq!((n.vmin, n.vmax), (0.6, 0.9));
        assert!((n.apply(0.75) - 0.5).abs() < 1e-12);
        assert_eq!(n.apply(2.0), 1.0);
        assert!(Normalize::from_values([f64::NAN]).is_none());
    }

    #[test]
    fn degenerate_range_maps_low() {
        let n = Normalize::from_values([0.5, 0.5]).unwrap();
        assert_eq!(n.apply(0.5), 0.0);
    }
}
