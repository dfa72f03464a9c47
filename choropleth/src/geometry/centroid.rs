use geo::{Area, BoundingRect, Centroid, Coord, MultiPolygon, Rect};

use super::tolerance::EPS_AREA;

/// Area-weighted centroid of a region. Holes are subtracted; a region
/// whose polygons have no area falls back to the centroid of its rings.
pub fn region_centroid(mp: &MultiPolygon<f64>) -> Option<Coord<f64>> {
    if mp.0.is_empty() {
        return None;
    }
    if mp.unsigned_area() <= EPS_AREA {
        return ring_mean(mp);
    }
    mp.centroid().map(|p| p.0)
}

fn ring_mean(mp: &MultiPolygon<f64>) -> Option<Coord<f64>> {
    let mut sx = 0.0;
    let mut sy = 0.0;
    let mut n = 0usize;
    for p in &mp.0 {
        for c in p.exterior().coords() {
            sx += c.x;
            sy += c.y;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    Some(Coord { x: sx / n as f64, y: sy / n as f64 })
}

pub fn region_area(mp: &MultiPolygon<f64>) -> f64 {
    mp.unsigned_area()
}

/// Union of the bounding boxes of all given regions.
pub fn extent<'a, I>(regions: I) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = &'a MultiPolygon<f64>>,
{
    let mut acc: Option<Rect<f64>> = None;
    for mp in regions {
        let Some(r) = mp.bounding_rect() else { continue };
        acc = Some(match acc {
            None => r,
            Some(a) => Rect::new(
                Coord { x: a.min().x.min(r.min().x), y: a.min().y.min(r.min().y) },
                Coord { x: a.max().x.max(r.max().x), y: a.max().y.max(r.max().y) },
            ),
        });
    }
    acc
}
