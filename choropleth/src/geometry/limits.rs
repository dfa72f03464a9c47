// Ingestion limits for boundary files

// Raw document size
pub const MAX_GEOJSON_BYTES: usize = 256 * 1024 * 1024;

// Collection size caps
pub const MAX_FEATURES: usize = 50_000;
pub const MAX_VERTICES_TOTAL: usize = 20_000_000;

// Canvas bounds
pub const MIN_CANVAS_PX: u32 = 64;
pub const MAX_CANVAS_PX: u32 = 16_384;

#[inline]
pub fn in_canvas_bounds(px: u32) -> bool { (MIN_CANVAS_PX..=MAX_CANVAS_PX).contains(&px) }

#[inline]
pub fn is_lon_lat(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> bool {
    min_x >= -180.0 && max_x <= 180.0 && min_y >= -90.0 && max_y <= 90.0
}
