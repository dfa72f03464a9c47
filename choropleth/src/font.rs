//! Font selection and number formatting for rendered text.
//!
//! Region names and the title are Hangul, so the configured family must
//! carry those glyphs. `RenderContext::configure` resolves the font once and
//! the resulting context is handed to the renderer.

use std::path::{Path, PathBuf};

pub const DEFAULT_FONT_FAMILY: &str = "Malgun Gothic";
pub const DEFAULT_FONT_PATH: &str = "C:/Windows/Fonts/malgun.ttf";

/// Families tried by the viewer when the configured one is unavailable.
const FALLBACK_FAMILIES: [&str; 4] = [
    "Noto Sans CJK KR",
    "Apple SD Gothic Neo",
    "NanumGothic",
    "sans-serif",
];

const UNICODE_MINUS: char = '\u{2212}';

#[derive(Clone, Debug, PartialEq)]
pub struct FontConfig {
    pub family: String,
    pub path: Option<PathBuf>,
    /// Render negative numbers with U+2212 instead of ASCII '-'.
    pub unicode_minus: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            family: DEFAULT_FONT_FAMILY.to_string(),
            path: Some(PathBuf::from(DEFAULT_FONT_PATH)),
            unicode_minus: false,
        }
    }
}

/// Resolved text settings threaded into rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    family: String,
    font_file: Option<PathBuf>,
    unicode_minus: bool,
}

impl RenderContext {
    pub fn configure(config: FontConfig) -> RenderContext {
        let font_file = match config.path {
            Some(p) if p.is_file() => {
                tracing::debug!(path = %p.display(), family = %config.family, "using font file");
                Some(p)
            }
            Some(p) => {
                tracing::warn!(
                    path = %p.display(),
                    family = %config.family,
                    "font file not found; falling back to installed fonts"
                );
                None
            }
            None => None,
        };
        RenderContext {
            family: config.family,
            font_file,
            unicode_minus: config.unicode_minus,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn font_file(&self) -> Option<&Path> {
        self.font_file.as_deref()
    }

    /// CSS `font-family` value: configured family first, then fallbacks.
    pub fn font_family_css(&self) -> String {
        let mut out = format!("'{}'", self.family.replace('\'', ""));
        for f in FALLBACK_FAMILIES {
            if f == self.family {
                continue;
            }
            out.push_str(", ");
            if f.contains(' ') {
                out.push_str(&format!("'{}'", f));
            } else {
                out.push_str(f);
            }
        }
        out
    }

    pub fn format_value(&self, v: f64, decimals: usize) -> String {
        let s = format!("{:.*}", decimals, v);
        // "-0.00" after rounding reads as zero
        let s = match s.strip_prefix('-') {
            Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
            _ => s,
        };
        if self.unicode_minus {
            s.replacen('-', &UNICODE_MINUS.to_string(), 1)
        } else {
            s
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext::configure(FontConfig { path: None, ..FontConfig::default() })
    }
}
