//! Colorbar legend keyed to the normalized index range.

use serde::Serialize;

use crate::colormap::{Colormap, Normalize};
use crate::font::RenderContext;
use crate::geometry::tolerance::{approx_eq, EPS_TICK};
use crate::model::{Color, Vec2};

const MAX_TICKS: usize = 6;
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
const STEP_MULTIPLES: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
    /// Anchor of the tick mark on the bar's right edge.
    pub at: Vec2,
}

/// Vertical strip, low values at the bottom.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Colorbar {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub stops: Vec<ColorStop>,
    pub ticks: Vec<Tick>,
    pub font_size: f64,
}

impl Colorbar {
    pub fn build(
        cmap: &Colormap,
        norm: Normalize,
        (x, y, w, h): (f64, f64, f64, f64),
        font_size: f64,
        ctx: &RenderContext,
    ) -> Colorbar {
        let n = cmap.stops.len().max(2);
        let stops = (0..n)
            .map(|i| {
                let offset = i as f64 / (n - 1) as f64;
                ColorStop { offset, color: cmap.sample(offset) }
            })
            .collect();
        let (values, decimals) = nice_ticks(norm.vmin, norm.vmax, MAX_TICKS);
        let ticks = values
            .into_iter()
            .map(|value| Tick {
                value,
                label: ctx.format_value(value, decimals),
                at: Vec2 { x: x + w, y: y + h - norm.apply(value) * h },
            })
            .collect();
        Colorbar { x, y, w, h, stops, ticks, font_size }
    }
}

/// Tick values on a 1/2/2.5/5 x 10^k grid inside [lo, hi], with the number
/// of decimals needed to print the step exactly.
pub fn nice_ticks(lo: f64, hi: f64, max_ticks: usize) -> (Vec<f64>, usize) {
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return (Vec::new(), 0);
    }
    if approx_eq(lo, hi, EPS_TICK) {
        return (vec![lo], 2);
    }
    let raw = (hi - lo) / max_ticks.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = STEP_MULTIPLES
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);
    if !step.is_finite() || step <= 0.0 {
        return (vec![lo], 2);
    }
    let first = (lo / step - EPS_TICK).ceil();
    let n = ((hi - first * step) / step + EPS_TICK).floor();
    // past 2^53 consecutive multiples of step are no longer distinct
    if !n.is_finite() || n < 0.0 || n > (2 * max_ticks.max(1)) as f64 || first.abs() >= MAX_EXACT {
        return (vec![lo], 2);
    }
    let decimals = decimals_for(step);
    let scale = 10f64.powi(decimals as i32);
    let ticks = (0..=n as usize)
        // snap away float noise such as 0.30000000000000004
        .map(|i| (((first + i as f64) * step) * scale).round() / scale + 0.0)
        .collect();
    (ticks, decimals)
}

fn decimals_for(step: f64) -> usize {
    for d in 0..=8 {
        let scaled = step * 10f64.powi(d as i32);
        if (scaled - scaled.round()).abs() < 1e-6 {
            return d;
        }
    }
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_for_embedded_range() {
        let (t, d) = nice_ticks(0.60, 0.92, MAX_TICKS);
        assert_eq!(d, 1);
        assert_eq!(t, vec![0.6, 0.7, 0.8, 0.9]);
        assert!(t.iter().all(|v| *v >= 0.60 - 1e-12 && *v <= 0.92 + 1e-12));
        assert!(t.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn ticks_unit_range() {
        let (t, d) = nice_ticks(0.0, 1.0, 5);
        assert_eq!(t, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(d, 1);
    }

    #[test]
    fn degenerate_range_gets_one_tick() {
        let (t, _) = nice_ticks(0.7, 0.7, MAX_TICKS);
        assert_eq!(t, vec![0.7]);
        assert!(nice_ticks(1.0, 0.0, MAX_TICKS).0.is_empty());
    }

    #[test]
    fn values_one_ulp_apart_get_one_tick() {
        let lo: f64 = 1.0e8;
        let hi = f64::from_bits(lo.to_bits() + 1);
        let (t, _) = nice_ticks(lo, hi, MAX_TICKS);
        assert_eq!(t, vec![lo]);
    }

    #[test]
    fn overflowing_range_gets_one_tick() {
        let (t, _) = nice_ticks(-1.7e308, 1.7e308, MAX_TICKS);
        assert_eq!(t, vec![-1.7e308]);
    }

    #[test]
    fn large_wide_range_stays_bounded() {
        let (t, d) = nice_ticks(1.0e8, 1.0e8 + 600.0, MAX_TICKS);
        assert_eq!(d, 0);
        assert_eq!(t.first().copied(), Some(1.0e8));
        assert_eq!(t.last().copied(), Some(1.0e8 + 600.0));
        assert!(t.len() <= 2 * MAX_TICKS + 1);
    }

    #[test]
    fn colorbar_ticks_sit_on_the_bar() {
        let norm = Normalize { vmin: 0.0, vmax: 1.0 };
        let cb = Colorbar::build(
            &Colormap::blues(),
            norm,
            (700.0, 100.0, 20.0, 500.0),
            10.0,
            &RenderContext::default(),
        );
        assert_eq!(cb.stops.len(), 9);
        let bottom = cb.ticks.first().unwrap();
        let top = cb.ticks.last().unwrap();
        assert_eq!(bottom.label, "0.0");
        assert!((bottom.at.y - 600.0).abs() < 1e-9);
        assert!((top.at.y - 100.0).abs() < 1e-9);
    }
}
