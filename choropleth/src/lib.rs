pub mod model;
pub mod error;
pub mod geometry {
    pub mod centroid;
    pub mod limits;
    pub mod projection;
    pub mod tolerance;
}
pub mod boundary;
pub mod colormap;
pub mod font;
pub mod index;
pub mod join;
pub mod legend;
pub mod render;
mod json;
mod svg;

pub use boundary::{load_boundaries, DEFAULT_NAME_FIELD};
pub use colormap::{Colormap, Normalize};
pub use error::MapError;
pub use font::{FontConfig, RenderContext};
pub use index::IndexTable;
pub use join::{left_join, JoinReport, Joined};
pub use model::{Boundary, Color, IndexRecord, JoinedRegion};
pub use render::{Figure, MapStyle, Renderer};

use serde_json::Value;

impl Figure {
    /// Standalone SVG document.
    pub fn to_svg(&self) -> String {
        svg::to_svg_document_impl(self)
    }
}

impl Joined {
    pub fn summary_json(&self) -> Result<Value, serde_json::Error> {
        json::summary_json_impl(self)
    }
}

/// Join and render in one go.
pub fn render_map(
    boundaries: Vec<Boundary>,
    table: &IndexTable,
    ctx: &RenderContext,
    style: &MapStyle,
) -> (Joined, Figure) {
    let joined = left_join(boundaries, table);
    let figure = Renderer::new(ctx, style).render(&joined);
    (joined, figure)
}
