//! Glyph measurement and rasterization.
//!
//! Positions are in device pixels with `y` growing downwards; `baseline` is the
//! y coordinate of the text baseline. Rasterizers report coverage through a
//! `plot(x, y, coverage)` callback with coverage in `0.0..=1.0`.

use crate::error::{QuoteError, Result};
use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use std::fs;
use std::path::Path;
use unicode_width::UnicodeWidthChar;

pub trait GlyphSource: Send + Sync {
    /// Horizontal advance of `ch` at font size `size`.
    fn advance(&self, ch: char, size: f32) -> f32;

    fn rasterize(
        &self,
        ch: char,
        x: f32,
        baseline: f32,
        size: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    );

    /// Width of `text` laid out on one line.
    fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }
}

/// Glyphs from one or more TrueType/OpenType faces. Each character is drawn
/// with the first face that has it; characters no face covers use the
/// first face's missing-glyph box.
pub struct FontGlyphs {
    faces: Vec<FontArc>,
}

impl FontGlyphs {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|e| QuoteError::Font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data).map_err(|e| QuoteError::Font(format!("{}: {}", path.display(), e)))
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(data).map_err(|e| QuoteError::Font(e.to_string()))?;
        Ok(Self { faces: vec![font] })
    }

    /// Chains `faces` in priority order. `None` when there are none.
    pub fn from_faces(faces: Vec<FontArc>) -> Option<Self> {
        if faces.is_empty() {
            None
        } else {
            Some(Self { faces })
        }
    }

    /// Appends the faces of `other` as fallbacks.
    pub fn with_fallback(mut self, other: FontGlyphs) -> Self {
        self.faces.extend(other.faces);
        self
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether any face has an outline for `ch`.
    pub fn covers(&self, ch: char) -> bool {
        self.faces.iter().any(|face| face.glyph_id(ch).0 != 0)
    }

    fn face_for(&self, ch: char) -> &FontArc {
        self.faces
            .iter()
            .find(|face| face.glyph_id(ch).0 != 0)
            .unwrap_or(&self.faces[0])
    }
}

impl GlyphSource for FontGlyphs {
    fn advance(&self, ch: char, size: f32) -> f32 {
        let face = self.face_for(ch);
        face.as_scaled(PxScale::from(size)).h_advance(face.glyph_id(ch))
    }

    fn rasterize(
        &self,
        ch: char,
        x: f32,
        baseline: f32,
        size: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        let face = self.face_for(ch);
        let glyph = face
            .glyph_id(ch)
            .with_scale_and_position(PxScale::from(size), point(x, baseline));
        if let Some(outlined) = face.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| plot(left + gx as i32, top + gy as i32, coverage));
        }
    }
}

/// Font-less stand-in: every visible character is a solid cell whose width
/// follows its terminal column width, so CJK text occupies twice the width
/// of Latin text. Used for layout tests and when no font can be loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockGlyphs;

const CELL_ASCENT: f32 = 0.8;
const CELL_DESCENT: f32 = 0.1;
const CELL_INSET: f32 = 0.08;

impl GlyphSource for BlockGlyphs {
    fn advance(&self, ch: char, size: f32) -> f32 {
        let columns = ch.width().unwrap_or(0) as f32;
        size * columns / 2.0
    }

    fn rasterize(
        &self,
        ch: char,
        x: f32,
        baseline: f32,
        size: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        if ch.is_whitespace() {
            return;
        }
        let advance = self.advance(ch, size);
        if advance <= 0.0 {
            return;
        }
        let inset = size * CELL_INSET;
        let x0 = (x + inset).round() as i32;
        let x1 = (x + advance - inset).round() as i32;
        let y0 = (baseline - size * CELL_ASCENT).round() as i32;
        let y1 = (baseline + size * CELL_DESCENT).round() as i32;
        for py in y0..y1 {
            for px in x0..x1 {
                plot(px, py, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fonts::FontCatalog;

    #[test]
    fn test_block_advance_follows_column_width() {
        let g = BlockGlyphs;
        assert_eq!(g.advance('a', 32.0), 16.0);
        assert_eq!(g.advance('路', 32.0), 32.0);
        assert_eq!(g.measure("路a", 32.0), 48.0);
    }

    #[test]
    fn test_block_whitespace_draws_nothing() {
        let mut hits = 0;
        BlockGlyphs.rasterize(' ', 0.0, 20.0, 20.0, &mut |_, _, _| hits += 1);
        assert_eq!(hits, 0);
        assert_eq!(BlockGlyphs.advance(' ', 20.0), 10.0);
    }

    #[test]
    fn test_block_cell_sits_on_baseline() {
        let mut min_y = i32::MAX;
        let mut max_y = i32::MIN;
        BlockGlyphs.rasterize('字', 0.0, 100.0, 50.0, &mut |_, y, _| {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        });
        assert_eq!(min_y, 60);
        assert_eq!(max_y, 104);
    }

    #[test]
    fn test_font_glyph_has_antialiased_outline() {
        let glyphs = FontCatalog::bundled().card_glyphs().unwrap();
        let mut coverages = Vec::new();
        glyphs.rasterize('o', 0.0, 100.0, 64.0, &mut |_, _, c| coverages.push(c));
        assert!(coverages.iter().any(|&c| c > 0.0 && c < 1.0));
        // The counter of an 'o' stays empty.
        assert!(coverages.iter().any(|&c| c < 0.01));
        assert!(coverages.iter().any(|&c| c > 0.99));
    }

    #[test]
    fn test_uncovered_char_uses_first_face() {
        let glyphs = FontCatalog::bundled().card_glyphs().unwrap();
        assert!(!glyphs.covers('永'));
        assert!(glyphs.advance('永', 32.0) > 0.0);
    }

    #[test]
    fn test_invalid_font_bytes() {
        assert!(matches!(
            FontGlyphs::from_bytes(vec![0, 1, 2, 3]),
            Err(QuoteError::Font(_))
        ));
        assert!(matches!(
            FontGlyphs::load("/no/such/font.ttf"),
            Err(QuoteError::Font(_))
        ));
    }
}
