use std::fmt::Write as _;

use crate::model::{Color, TextAlign, Vec2, VerticalAlign};
use crate::render::{Figure, FillPath, TextItem};

const GRADIENT_ID: &str = "colorbar-gradient";

/// Path data for each region: one closed subpath per ring.
pub fn to_svg_paths_impl(fig: &Figure) -> Vec<String> {
    fig.fills.iter().map(path_d).collect()
}

fn path_d(fill: &FillPath) -> String {
    let mut d = String::new();
    for ring in &fill.rings {
        let mut it = ring.iter();
        let Some(first) = it.next() else { continue };
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = write!(d, "M {} {}", num(first.x), num(first.y));
        for p in it {
            let _ = write!(d, " L {} {}", num(p.x), num(p.y));
        }
        d.push_str(" Z");
    }
    d
}

pub fn to_svg_document_impl(fig: &Figure) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fig.width,
        h = fig.height
    );
    write_style(&mut out, fig);
    if let Some(cb) = &fig.colorbar {
        let _ = writeln!(
            out,
            r#"<defs><linearGradient id="{}" x1="0" y1="1" x2="0" y2="0">"#,
            GRADIENT_ID
        );
        for s in &cb.stops {
            let _ = writeln!(
                out,
                r#"<stop offset="{}" stop-color="{}"/>"#,
                num(s.offset),
                s.color.to_hex()
            );
        }
        let _ = writeln!(out, "</linearGradient></defs>");
    }
    let _ = writeln!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        fig.width,
        fig.height,
        fig.background.to_hex()
    );

    let _ = writeln!(out, r#"<g class="regions" fill-rule="evenodd">"#);
    for (fill, d) in fig.fills.iter().zip(to_svg_paths_impl(fig)) {
        let (class, paint) = match fill.fill {
            Some(c) => ("region", c.to_hex()),
            None => ("region missing", "none".to_string()),
        };
        let _ = writeln!(
            out,
            r#"<path class="{}" data-name="{}" d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            class,
            escape(&fill.region),
            d,
            paint,
            fill.stroke.to_hex(),
            num(fill.stroke_width)
        );
    }
    let _ = writeln!(out, "</g>");

    let _ = writeln!(out, r#"<g class="labels">"#);
    for label in &fig.labels {
        write_text(&mut out, "label", label);
    }
    let _ = writeln!(out, "</g>");

    if let Some(cb) = &fig.colorbar {
        let _ = writeln!(out, r#"<g class="legend">"#);
        let _ = writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="url(#{})" stroke="{}" stroke-width="0.8"/>"#,
            num(cb.x),
            num(cb.y),
            num(cb.w),
            num(cb.h),
            GRADIENT_ID,
            Color::BLACK.to_hex()
        );
        for t in &cb.ticks {
            let _ = writeln!(
                out,
                r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="black" stroke-width="0.8"/>"#,
                num(t.at.x),
                num(t.at.x + 4.0),
                y = num(t.at.y)
            );
            let item = TextItem {
                text: t.label.clone(),
                at: Vec2 { x: t.at.x + 7.0, y: t.at.y },
                size: cb.font_size,
                align: TextAlign::Left,
                vertical_align: VerticalAlign::Middle,
            };
            write_text(&mut out, "tick", &item);
        }
        let _ = writeln!(out, "</g>");
    }

    if let Some(title) = &fig.title {
        write_text(&mut out, "title", title);
    }
    out.push_str("</svg>\n");
    out
}

fn write_style(out: &mut String, fig: &Figure) {
    let _ = writeln!(out, "<style>");
    if let Some(path) = &fig.font_file {
        let url = if path.starts_with('/') {
            format!("file://{}", path)
        } else {
            format!("file:///{}", path)
        };
        let first = fig.font_family.split(',').next().unwrap_or("sans-serif");
        let _ = writeln!(
            out,
            "@font-face {{ font-family: {}; src: url(\"{}\"); }}",
            escape(first.trim()),
            escape(&url)
        );
    }
    let _ = writeln!(out, "text {{ font-family: {}; fill: black; }}", escape(&fig.font_family));
    let _ = writeln!(out, "</style>");
}

fn write_text(out: &mut String, class: &str, t: &TextItem) {
    let anchor = match t.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    let baseline = match t.vertical_align {
        VerticalAlign::Top => "hanging",
        VerticalAlign::Middle => "central",
        VerticalAlign::Bottom => "alphabetic",
    };
    let _ = writeln!(
        out,
        r#"<text class="{}" x="{}" y="{}" font-size="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
        class,
        num(t.at.x),
        num(t.at.y),
        num(t.size),
        anchor,
        baseline,
        escape(&t.text)
    );
}

/// Two decimals is sub-pixel at any canvas size we allow.
fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
