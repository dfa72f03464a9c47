//! # ctmap
//!
//! Loads province boundaries, joins them with the CT index table and
//! writes the choropleth as SVG.

mod cli;
mod logging;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use choropleth::{load_boundaries, render_map, Figure, IndexTable, RenderContext};
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    let style = cli.map_style()?;
    let ctx = RenderContext::configure(cli.font_config());

    let boundaries = load_boundaries(&cli.boundaries, &cli.name_field)
        .with_context(|| format!("Failed to load boundaries from {}", cli.boundaries.display()))?;
    let table = match &cli.index {
        Some(path) => IndexTable::load(path)
            .with_context(|| format!("Failed to load index table from {}", path.display()))?,
        None => IndexTable::embedded(),
    };

    let (joined, figure) = render_map(boundaries, &table, &ctx, &style);
    if cli.strict {
        joined.report.ensure_complete().context("Strict join failed")?;
    }
    if cli.summary {
        let summary = serde_json::to_string_pretty(&joined.summary_json()?)?;
        eprintln!("{}", summary);
    }

    present(&figure, cli.output.as_deref())
}

fn present(figure: &Figure, output: Option<&Path>) -> Result<()> {
    let svg = figure.to_svg();
    match output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote map");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes()).context("Failed to write map to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
