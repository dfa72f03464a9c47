use geo::{Coord, Rect};

use super::limits::is_lon_lat;
use super::tolerance::{near_zero, EPS_EXTENT};
use crate::model::Vec2;

/// Pixel rectangle the map is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Maps data coordinates into a frame, preserving aspect and flipping y.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    min: Coord<f64>,
    max_y: f64,
    sx: f64,
    sy: f64,
    ox: f64,
    oy: f64,
}

impl Viewport {
    /// Lon/lat extents get their y axis stretched by 1/cos(mid latitude) so
    /// shapes keep their ground proportions near the map center.
    pub fn fit(data: Rect<f64>, frame: Frame) -> Viewport {
        let (min, max) = (data.min(), data.max());
        let aspect = if is_lon_lat(min.x, min.y, max.x, max.y) {
            let mid = 0.5 * (min.y + max.y);
            1.0 / mid.to_radians().cos().max(EPS_EXTENT)
        } else {
            1.0
        };
        let dw = (max.x - min.x).max(0.0);
        let dh = (max.y - min.y).max(0.0) * aspect;
        let scale = match (near_zero(dw, EPS_EXTENT), near_zero(dh, EPS_EXTENT)) {
            (true, true) => 1.0,
            (true, false) => frame.h / dh,
            (false, true) => frame.w / dw,
            (false, false) => (frame.w / dw).min(frame.h / dh),
        };
        let ox = frame.x + 0.5 * (frame.w - dw * scale);
        let oy = frame.y + 0.5 * (frame.h - dh * scale);
        Viewport { min, max_y: max.y, sx: scale, sy: scale * aspect, ox, oy }
    }

    pub fn project(&self, c: Coord<f64>) -> Vec2 {
        Vec2 {
            x: self.ox + (c.x - self.min.x) * self.sx,
            y: self.oy + (self.max_y - c.y) * self.sy,
        }
    }
}
