//! Command-line configuration.

use std::path::PathBuf;

use anyhow::{bail, Result};
use choropleth::font::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_PATH};
use choropleth::geometry::limits;
use choropleth::render::DEFAULT_TITLE;
use choropleth::{Colormap, FontConfig, MapStyle, DEFAULT_NAME_FIELD};
use clap::{ArgAction, Parser};

/// Render a CT-index choropleth of South Korea's provinces as SVG.
#[derive(Parser, Debug)]
#[command(name = "ctmap", version, about)]
pub struct Cli {
    /// GeoJSON FeatureCollection with one feature per region.
    #[arg(long, env = "CTMAP_BOUNDARIES", default_value = "skorea-geo.json")]
    pub boundaries: PathBuf,

    /// JSON array of {"region", "CT_Index"} replacing the built-in table.
    #[arg(long, env = "CTMAP_INDEX")]
    pub index: Option<PathBuf>,

    /// Feature property holding the region name.
    #[arg(long, default_value = DEFAULT_NAME_FIELD)]
    pub name_field: String,

    /// Font file with Hangul glyphs.
    #[arg(long, env = "CTMAP_FONT_PATH", default_value = DEFAULT_FONT_PATH)]
    pub font_path: PathBuf,

    #[arg(long, default_value = DEFAULT_FONT_FAMILY)]
    pub font_family: String,

    /// Draw negative numbers with U+2212 instead of '-'.
    #[arg(long)]
    pub unicode_minus: bool,

    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 1000)]
    pub height: u32,

    /// Sequential colormap: Blues, Greens or Reds.
    #[arg(long, default_value = "Blues")]
    pub cmap: String,

    #[arg(long)]
    pub no_legend: bool,

    /// Write the SVG here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when a boundary has no index value.
    #[arg(long)]
    pub strict: bool,

    /// Print a JSON join summary to stderr.
    #[arg(long)]
    pub summary: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn font_config(&self) -> FontConfig {
        FontConfig {
            family: self.font_family.clone(),
            path: Some(self.font_path.clone()),
            unicode_minus: self.unicode_minus,
        }
    }

    pub fn map_style(&self) -> Result<MapStyle> {
        for (what, px) in [("width", self.width), ("height", self.height)] {
            if !limits::in_canvas_bounds(px) {
                bail!(
                    "{} {} outside [{}, {}]",
                    what,
                    px,
                    limits::MIN_CANVAS_PX,
                    limits::MAX_CANVAS_PX
                );
            }
        }
        let Some(colormap) = Colormap::by_name(&self.cmap) else {
            bail!("unknown colormap '{}'", self.cmap);
        };
        Ok(MapStyle {
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            colormap,
            legend: !self.no_legend,
            ..MapStyle::default()
        })
    }
}
