//! # Image Export
//!
//! Renders one quote as a themed PNG card.
//!
//! Cards are laid out on an 800x600 logical canvas (see [`layout`]) and then
//! scaled: [`ExportSize::Preview`] at 0.5 (400x300 px) for on-screen previews
//! and [`ExportSize::Download`] at 2.0 (1600x1200 px) for the saved file.
//! Previews show at most five content lines; downloads show everything.
//!
//! Rendering is deterministic: the same quote, theme, size and glyph source
//! always produce the same bytes.

pub mod canvas;
pub mod fonts;
pub mod glyphs;
pub mod layout;
pub mod theme;

pub use canvas::Canvas;
pub use fonts::FontCatalog;
pub use glyphs::{BlockGlyphs, FontGlyphs, GlyphSource};
pub use theme::{Background, Rgb, Theme, ThemeStyle};

use crate::error::{QuoteError, Result};
use crate::model::{Quote, UNKNOWN_AUTHOR};
use layout::{layout_card, Ink, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub const PREVIEW_MAX_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportSize {
    Preview,
    #[default]
    Download,
}

impl ExportSize {
    pub fn scale(self) -> f32 {
        match self {
            ExportSize::Preview => 0.5,
            ExportSize::Download => 2.0,
        }
    }

    pub fn dimensions(self) -> (u32, u32) {
        let scale = self.scale();
        (
            (LOGICAL_WIDTH * scale).round() as u32,
            (LOGICAL_HEIGHT * scale).round() as u32,
        )
    }

    pub fn max_lines(self) -> Option<usize> {
        match self {
            ExportSize::Preview => Some(PREVIEW_MAX_LINES),
            ExportSize::Download => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportSize::Preview => "preview",
            ExportSize::Download => "download",
        }
    }
}

impl fmt::Display for ExportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportSize {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preview" => Ok(ExportSize::Preview),
            "download" => Ok(ExportSize::Download),
            other => Err(QuoteError::Render(format!("unknown export size: {}", other))),
        }
    }
}

/// Glyphs for rendering cards: the configured font if it loads, then a
/// system CJK face, then the bundled faces. [`BlockGlyphs`] only when no
/// face at all can be loaded.
pub fn glyph_source(font_path: Option<&Path>) -> Arc<dyn GlyphSource> {
    let catalog = FontCatalog::system();
    let configured = font_path.and_then(|path| match FontGlyphs::load(path) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::warn!("{}; using installed fonts instead", e);
            None
        }
    });
    match resolve_glyphs(configured, &catalog) {
        Some(glyphs) => {
            if !glyphs.covers(fonts::HAN_SAMPLE_CHAR) {
                tracing::warn!(
                    "No Chinese font found; set one with `quotebook config font <path>`"
                );
            }
            Arc::new(glyphs)
        }
        None => {
            tracing::warn!("No usable font; drawing block glyphs");
            Arc::new(BlockGlyphs)
        }
    }
}

fn resolve_glyphs(configured: Option<FontGlyphs>, catalog: &FontCatalog) -> Option<FontGlyphs> {
    let fallback = FontGlyphs::from_faces(catalog.latin_face().into_iter().collect());
    match (configured, fallback) {
        (Some(font), Some(fallback)) => Some(font.with_fallback(fallback)),
        (Some(font), None) => Some(font),
        (None, _) => catalog.card_glyphs(),
    }
}

/// Renders the card to a raster surface without encoding it.
pub fn render_pixmap(
    quote: &Quote,
    theme: Theme,
    size: ExportSize,
    glyphs: &dyn GlyphSource,
) -> Result<Canvas> {
    let style = theme.style();
    let (width, height) = size.dimensions();
    let scale = size.scale();

    let mut canvas = Canvas::new(width, height)?;
    canvas.paint_background(style.background)?;

    let card = layout_card(quote, size.max_lines(), glyphs);
    for line in card.lines() {
        let color = match line.ink {
            Ink::Primary => style.primary,
            Ink::Secondary => style.secondary,
        };
        let font_size = line.size * scale;
        let baseline = line.baseline * scale;
        let mut x = line.x * scale;
        for ch in line.text.chars() {
            glyphs.rasterize(ch, x, baseline, font_size, &mut |px, py, coverage| {
                canvas.blend(px, py, color, coverage)
            });
            x += glyphs.advance(ch, font_size);
        }
    }

    tracing::debug!(
        id = quote.id,
        theme = %theme,
        size = %size,
        lines = card.content.len(),
        "rendered card"
    );
    Ok(canvas)
}

/// Renders the card and encodes it as PNG.
pub fn render_png(
    quote: &Quote,
    theme: Theme,
    size: ExportSize,
    glyphs: &dyn GlyphSource,
) -> Result<Vec<u8>> {
    render_pixmap(quote, theme, size, glyphs)?.encode_png()
}

/// `名言-{author}-{theme}-{id}.png`
pub fn export_filename(quote: &Quote, theme: Theme) -> String {
    format!(
        "名言-{}-{}-{}.png",
        sanitize_file_component(&quote.author),
        theme.display_name(),
        quote.id
    )
}

fn sanitize_file_component(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.');
    if cleaned.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        cleaned.to_string()
    }
}
