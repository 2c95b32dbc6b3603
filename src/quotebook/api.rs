//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! client operations. It owns the loaded library, the favorites store and the
//! glyph source, normalizes inputs (theme names, filter strings) and
//! dispatches to `commands::*`. No business logic, no I/O formatting.
//!
//! `QuotebookApi<B: FavoritesBackend>` is generic over the favorites backend:
//! `QuotebookApi<FsBackend>` in the binary, `QuotebookApi<MemBackend>` in
//! tests.
//!
//! The HTTP service does not go through this facade: favorites are
//! client-local, so the server calls the read-only commands directly.

use crate::commands;
use crate::error::Result;
use crate::favorites::{FavoritesBackend, FavoritesStore};
use crate::filter::QuoteFilter;
use crate::loader::QuoteLibrary;
use crate::render::{ExportSize, GlyphSource, Theme};
use std::path::Path;
use std::sync::Arc;

pub struct QuotebookApi<B: FavoritesBackend> {
    library: QuoteLibrary,
    favorites: FavoritesStore<B>,
    glyphs: Arc<dyn GlyphSource>,
    paths: commands::QuotebookPaths,
}

impl<B: FavoritesBackend> QuotebookApi<B> {
    pub fn new(
        library: QuoteLibrary,
        backend: B,
        glyphs: Arc<dyn GlyphSource>,
        paths: commands::QuotebookPaths,
    ) -> Self {
        Self {
            library,
            favorites: FavoritesStore::new(backend),
            glyphs,
            paths,
        }
    }

    pub fn library(&self) -> &QuoteLibrary {
        &self.library
    }

    pub fn favorites_store(&self) -> &FavoritesStore<B> {
        &self.favorites
    }

    pub fn paths(&self) -> &commands::QuotebookPaths {
        &self.paths
    }

    pub fn list_quotes(&self, search: &str, category: &str) -> Result<commands::CmdResult> {
        commands::list::run(&self.library, &QuoteFilter::new(search, category))
    }

    pub fn view_quote(&self, id: u32) -> Result<commands::CmdResult> {
        commands::view::run(&self.library, id)
    }

    pub fn random_quote(&self) -> Result<commands::CmdResult> {
        commands::random::run(&self.library)
    }

    pub fn categories(&self) -> Result<commands::CmdResult> {
        commands::catalog::categories(&self.library)
    }

    pub fn tags(&self) -> Result<commands::CmdResult> {
        commands::catalog::tags(&self.library)
    }

    pub fn list_favorites(&self) -> Result<commands::CmdResult> {
        commands::favorites::list(&self.favorites)
    }

    pub fn add_favorite(&self, id: u32) -> Result<commands::CmdResult> {
        commands::favorites::add(&self.library, &self.favorites, id)
    }

    pub fn remove_favorite(&self, id: u32) -> Result<commands::CmdResult> {
        commands::favorites::remove(&self.favorites, id)
    }

    pub fn toggle_favorite(&self, id: u32) -> Result<commands::CmdResult> {
        commands::favorites::toggle(&self.library, &self.favorites, id)
    }

    pub fn check_favorite(&self, id: u32) -> Result<commands::CmdResult> {
        commands::favorites::check(&self.favorites, id)
    }

    /// Exports quote `id` into `out_dir`. Unknown theme names fall back to
    /// the classic theme.
    pub fn export_quote(
        &self,
        id: u32,
        theme: &str,
        size: ExportSize,
        out_dir: &Path,
    ) -> Result<commands::CmdResult> {
        commands::export::run(
            &self.library,
            id,
            Theme::resolve(theme),
            size,
            self.glyphs.as_ref(),
            out_dir,
        )
    }

    pub fn render_quote(
        &self,
        id: u32,
        theme: Theme,
        size: ExportSize,
    ) -> Result<commands::export::ExportedImage> {
        commands::export::render(&self.library, id, theme, size, self.glyphs.as_ref())
    }

    pub fn share_text(&self, id: u32) -> Result<String> {
        Ok(self.library.require(id)?.share_text())
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths.data_dir, action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::ExportedImage;
pub use commands::{CmdMessage, CmdResult, MessageLevel, QuotebookPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::library;
    use crate::error::QuoteError;
    use crate::favorites::MemBackend;
    use crate::render::BlockGlyphs;
    use std::path::PathBuf;

    fn api() -> QuotebookApi<MemBackend> {
        QuotebookApi::new(
            library(),
            MemBackend::new(),
            Arc::new(BlockGlyphs),
            QuotebookPaths {
                data_dir: PathBuf::from("/nonexistent/data"),
                quotes_dir: PathBuf::from("/nonexistent/quotes"),
            },
        )
    }

    #[test]
    fn list_passes_filter_through() {
        let result = api().list_quotes("孔子", "全部").unwrap();
        let ids: Vec<u32> = result.listed_quotes.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn favorites_go_through_the_store() {
        let api = api();
        api.toggle_favorite(3).unwrap();
        assert!(api.favorites_store().is_favorited(3));
        assert_eq!(api.list_favorites().unwrap().listed_quotes.len(), 1);
        api.remove_favorite(3).unwrap();
        assert!(api.favorites_store().get_all().is_empty());
    }

    #[test]
    fn unknown_theme_name_renders_classic() {
        let api = api();
        let classic = api.render_quote(1, Theme::Classic, ExportSize::Preview).unwrap();
        let fallback = api
            .render_quote(1, Theme::resolve("sparkly"), ExportSize::Preview)
            .unwrap();
        assert_eq!(classic.bytes, fallback.bytes);
        assert_eq!(fallback.filename, "名言-屈原-经典-1.png");
    }

    #[test]
    fn share_text_uses_library() {
        assert_eq!(api().share_text(1).unwrap(), "\"路漫漫其修远兮\" —— 屈原 《离骚》");
        assert!(matches!(api().share_text(9), Err(QuoteError::QuoteNotFound(9))));
    }
}
