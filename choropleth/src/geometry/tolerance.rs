// Centralized tolerances for projection and centroid math

pub const EPS_EXTENT: f64 = 1e-12;        // zero-width bounding box threshold (data units)
pub const EPS_AREA: f64 = 1e-18;          // degenerate polygon area (data units^2)
pub const EPS_DENOM: f64 = 1e-12;         // denominator guard for ratios
pub const EPS_TICK: f64 = 1e-9;           // slack when walking tick steps

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }
#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }
#[inline] pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den.abs() <= EPS_DENOM { fallback } else { num / den }
}
