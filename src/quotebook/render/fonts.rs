//! Font discovery for cards.
//!
//! Quotes are mostly Chinese, so a card needs a CJK face first and a Latin
//! face for everything else. Faces come from, in order: the configured font
//! file, a CJK family installed on the system, and the faces bundled into
//! the binary (Latin only).

use super::glyphs::FontGlyphs;
use ab_glyph::{Font, FontArc, FontRef, FontVec};
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight, ID};
use std::sync::Arc;

/// Simplified-Chinese families tried before scanning every installed face.
pub const CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK SC",
    "Noto Serif CJK SC",
    "Source Han Sans SC",
    "Source Han Serif SC",
    "WenQuanYi Micro Hei",
    "WenQuanYi Zen Hei",
    "Droid Sans Fallback",
    "PingFang SC",
    "Hiragino Sans GB",
    "Songti SC",
    "Microsoft YaHei",
    "SimHei",
    "SimSun",
];

/// Bundled families, best match first.
pub const BUNDLED_FAMILIES: &[&str] = &[
    "Libertinus Serif",
    "New Computer Modern",
    "DejaVu Sans Mono",
];

/// Character used to decide whether a face can set Chinese text.
pub const HAN_SAMPLE_CHAR: char = '永';

pub struct FontCatalog {
    db: Database,
}

impl FontCatalog {
    /// Bundled faces only. Identical on every machine.
    pub fn bundled() -> Self {
        let mut db = Database::new();
        for data in typst_assets::fonts() {
            db.load_font_source(Source::Binary(Arc::new(data)));
        }
        Self { db }
    }

    /// Bundled faces plus everything installed on the system.
    pub fn system() -> Self {
        let mut catalog = Self::bundled();
        catalog.db.load_system_fonts();
        tracing::debug!(faces = catalog.db.len(), "loaded font catalog");
        catalog
    }

    /// A face that can draw Chinese: a well-known family if installed,
    /// otherwise the first face covering a common Han character.
    pub fn cjk_face(&self) -> Option<FontArc> {
        if let Some(face) = self.first_family(CJK_FAMILIES) {
            return Some(face);
        }
        self.db
            .faces()
            .filter(|info| !matches!(info.source, Source::Binary(_)))
            .find(|info| self.face_covers(info.id, HAN_SAMPLE_CHAR))
            .and_then(|info| self.load_face(info.id))
    }

    /// The preferred bundled face.
    pub fn latin_face(&self) -> Option<FontArc> {
        self.first_family(BUNDLED_FAMILIES)
    }

    /// CJK face first when one exists, the bundled face as fallback.
    pub fn card_glyphs(&self) -> Option<FontGlyphs> {
        let faces: Vec<FontArc> = self
            .cjk_face()
            .into_iter()
            .chain(self.latin_face())
            .collect();
        FontGlyphs::from_faces(faces)
    }

    fn first_family(&self, families: &[&str]) -> Option<FontArc> {
        families.iter().copied().find_map(|name| {
            let query = Query {
                families: &[Family::Name(name)],
                weight: Weight::NORMAL,
                stretch: Stretch::Normal,
                style: Style::Normal,
            };
            let id = self.db.query(&query)?;
            self.load_face(id)
        })
    }

    fn face_covers(&self, id: ID, ch: char) -> bool {
        self.db
            .with_face_data(id, |data, index| {
                FontRef::try_from_slice_and_index(data, index)
                    .map(|font| font.glyph_id(ch).0 != 0)
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    fn load_face(&self, id: ID) -> Option<FontArc> {
        let loaded = self.db.with_face_data(id, |data, index| {
            FontVec::try_from_vec_and_index(data.to_vec(), index)
        })?;
        match loaded {
            Ok(font) => Some(FontArc::new(font)),
            Err(e) => {
                tracing::warn!("Skipping unreadable font face: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::glyphs::GlyphSource;

    #[test]
    fn test_bundled_catalog_has_a_latin_face() {
        let catalog = FontCatalog::bundled();
        let face = catalog.latin_face().expect("bundled face");
        assert_ne!(face.glyph_id('Q').0, 0);
    }

    #[test]
    fn test_bundled_catalog_has_no_cjk_face() {
        assert!(FontCatalog::bundled().cjk_face().is_none());
    }

    #[test]
    fn test_card_glyphs_from_bundled_faces() {
        let glyphs = FontCatalog::bundled().card_glyphs().expect("glyphs");
        assert_eq!(glyphs.face_count(), 1);
        assert!(glyphs.covers('a'));
        assert!(glyphs.advance('a', 32.0) > 0.0);
    }
}
