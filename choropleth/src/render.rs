//! Fill and label passes over joined regions.

use geo::MultiPolygon;
use serde::Serialize;

use crate::colormap::{Colormap, Normalize};
use crate::font::RenderContext;
use crate::geometry::centroid::{extent, region_centroid};
use crate::geometry::projection::{Frame, Viewport};
use crate::join::Joined;
use crate::legend::Colorbar;
use crate::model::{Color, JoinedRegion, TextAlign, Vec2, VerticalAlign};

pub const DEFAULT_TITLE: &str = "지역별 CT 접근 지수 (p)";

// Figure layout in pixels
const MARGIN: f64 = 20.0;
const TITLE_BAND: f64 = 60.0;
const LEGEND_BAND: f64 = 90.0;
const LEGEND_GAP: f64 = 16.0;
const LEGEND_BAR_W: f64 = 18.0;
const LEGEND_FONT: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapStyle {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub title_size: f64,
    pub label_size: f64,
    pub edge_color: Color,
    pub line_width: f64,
    pub colormap: Colormap,
    pub legend: bool,
    pub background: Color,
}

impl Default for MapStyle {
    fn default() -> Self {
        MapStyle {
            width: 800,
            height: 1000,
            title: DEFAULT_TITLE.to_string(),
            title_size: 14.0,
            label_size: 8.0,
            edge_color: Color::GRAY,
            line_width: 0.8,
            colormap: Colormap::blues(),
            legend: true,
            background: Color::WHITE,
        }
    }
}

/// One region outline; `fill == None` leaves the interior blank.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillPath {
    pub region: String,
    pub rings: Vec<Vec<Vec2>>,
    pub fill: Option<Color>,
    pub stroke: Color,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextItem {
    pub text: String,
    pub at: Vec2,
    pub size: f64,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
}

/// Everything needed to draw the map, in pixel space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub font_family: String,
    pub font_file: Option<String>,
    pub title: Option<TextItem>,
    pub fills: Vec<FillPath>,
    pub labels: Vec<TextItem>,
    pub colorbar: Option<Colorbar>,
}

pub struct Renderer<'a> {
    ctx: &'a RenderContext,
    style: &'a MapStyle,
}

impl<'a> Renderer<'a> {
    pub fn new(ctx: &'a RenderContext, style: &'a MapStyle) -> Self {
        Renderer { ctx, style }
    }

    /// Axes area: below the title, left of the legend.
    pub fn map_frame(&self) -> Frame {
        let w = self.style.width as f64;
        let h = self.style.height as f64;
        let right = if self.style.legend { LEGEND_BAND } else { MARGIN };
        Frame {
            x: MARGIN,
            y: TITLE_BAND,
            w: (w - MARGIN - right).max(1.0),
            h: (h - TITLE_BAND - MARGIN).max(1.0),
        }
    }

    pub fn render(&self, joined: &Joined) -> Figure {
        let frame = self.map_frame();
        let viewport = extent(joined.regions.iter().filter_map(|r| r.geometry.as_ref()))
            .map(|r| Viewport::fit(r, frame));
        let norm = Normalize::from_values(joined.regions.iter().filter_map(|r| r.ct_index));

        let (fills, labels) = match &viewport {
            Some(vp) => (
                self.fill_pass(&joined.regions, vp, norm),
                self.label_pass(&joined.regions, vp),
            ),
            None => {
                tracing::warn!("no region has geometry; drawing an empty map");
                (Vec::new(), Vec::new())
            }
        };
        let colorbar = match norm {
            Some(n) if self.style.legend => Some(Colorbar::build(
                &self.style.colormap,
                n,
                (
                    frame.x + frame.w + LEGEND_GAP,
                    frame.y + 0.1 * frame.h,
                    LEGEND_BAR_W,
                    0.8 * frame.h,
                ),
                LEGEND_FONT,
                self.ctx,
            )),
            _ => None,
        };
        let title = (!self.style.title.is_empty()).then(|| TextItem {
            text: self.style.title.clone(),
            at: Vec2 { x: frame.x + 0.5 * frame.w, y: 0.5 * TITLE_BAND },
            size: self.style.title_size,
            align: TextAlign::Center,
            vertical_align: VerticalAlign::Middle,
        });
        tracing::debug!(fills = fills.len(), labels = labels.len(), "rendered figure");

        Figure {
            width: self.style.width,
            height: self.style.height,
            background: self.style.background,
            font_family: self.ctx.font_family_css(),
            font_file: self.ctx.font_file().map(|p| p.to_string_lossy().into_owned()),
            title,
            fills,
            labels,
            colorbar,
        }
    }

    /// One path per region with geometry. Regions without an index value
    /// keep their outline and get no fill.
    pub fn fill_pass(
        &self,
        regions: &[JoinedRegion],
        vp: &Viewport,
        norm: Option<Normalize>,
    ) -> Vec<FillPath> {
        regions
            .iter()
            .filter_map(|r| {
                let mp = r.geometry.as_ref()?;
                let fill = match (r.ct_index, norm) {
                    (Some(v), Some(n)) if v.is_finite() => {
                        Some(self.style.colormap.sample(n.apply(v)))
                    }
                    _ => None,
                };
                Some(FillPath {
                    region: r.name.clone(),
                    rings: project_rings(mp, vp),
                    fill,
                    stroke: self.style.edge_color,
                    stroke_width: self.style.line_width,
                })
            })
            .collect()
    }

    /// One centered label per region that has both geometry and a value.
    pub fn label_pass(&self, regions: &[JoinedRegion], vp: &Viewport) -> Vec<TextItem> {
        let mut labels = Vec::new();
        for r in regions {
            if !r.is_labelled() {
                continue;
            }
            let (Some(mp), Some(v)) = (r.geometry.as_ref(), r.ct_index) else { continue };
            let Some(c) = region_centroid(mp) else {
                tracing::debug!(region = %r.name, "empty geometry has no centroid; skipping label");
                continue;
            };
            labels.push(TextItem {
                text: self.ctx.format_value(v, 2),
                at: vp.project(c),
                size: self.style.label_size,
                align: TextAlign::Center,
                vertical_align: VerticalAlign::Middle,
            });
        }
        labels
    }
}

fn project_rings(mp: &MultiPolygon<f64>, vp: &Viewport) -> Vec<Vec<Vec2>> {
    let mut rings = Vec::new();
    for poly in &mp.0 {
        for ring in std::iter::once(poly.exterior()).chain(poly.interiors()) {
            let pts: Vec<Vec2> = ring.coords().map(|c| vp.project(*c)).collect();
            if pts.len() >= 3 {
                rings.push(pts);
            }
        }
    }
    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexTable;
    use crate::join::left_join;
    use crate::model::{Boundary, JsonObject};
    use geo::polygon;

    fn square(name: &str, x0: f64, y0: f64) -> Boundary {
        Boundary {
            name: name.to_string(),
            geometry: Some(MultiPolygon(vec![polygon![
                (x: x0, y: y0),
                (x: x0 + 1.0, y: y0),
                (x: x0 + 1.0, y: y0 + 1.0),
                (x: x0, y: y0 + 1.0)
            ]])),
            properties: JsonObject::new(),
        }
    }

    #[test]
    fn lowest_and_highest_take_colormap_ends() {
        let joined = left_join(
            vec![square("서울특별시", 127.0, 37.0), square("전라남도", 126.0, 34.0)],
            &IndexTable::embedded(),
        );
        let ctx = RenderContext::default();
        let style = MapStyle::default();
        let fig = Renderer::new(&ctx, &style).render(&joined);
        assert_eq!(fig.fills[0].fill.unwrap().to_hex(), "#08306b");
        assert_eq!(fig.fills[1].fill.unwrap().to_hex(), "#f7fbff");
        assert_eq!(fig.labels.len(), 2);
        assert_eq!(fig.labels[0].text, "0.92");
    }

    #[test]
    fn label_sits_on_projected_centroid() {
        let joined = left_join(vec![square("경기도", 0.0, 0.0)], &IndexTable::embedded());
        let ctx = RenderContext::default();
        let style = MapStyle { legend: false, ..MapStyle::default() };
        let r = Renderer::new(&ctx, &style);
        let fig = r.render(&joined);
        let frame = r.map_frame();
        let label = &fig.labels[0];
        assert!((label.at.x - (frame.x + 0.5 * frame.w)).abs() < 1e-6);
        assert!((label.at.y - (frame.y + 0.5 * frame.h)).abs() < 1e-6);
        assert_eq!(label.align, TextAlign::Center);
        assert_eq!(label.vertical_align, VerticalAlign::Middle);
        assert!(fig.colorbar.is_none());
    }

    #[test]
    fn no_geometry_renders_empty_map_with_title() {
        let mut b = square("경기도", 0.0, 0.0);
        b.geometry = None;
        let joined = left_join(vec![b], &IndexTable::embedded());
        let ctx = RenderContext::default();
        let style = MapStyle::default();
        let fig = Renderer::new(&ctx, &style).render(&joined);
        assert!(fig.fills.is_empty());
        assert!(fig.labels.is_empty());
        assert_eq!(fig.title.unwrap().text, DEFAULT_TITLE);
    }
}
