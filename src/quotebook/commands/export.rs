use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuoteError, Result};
use crate::loader::QuoteLibrary;
use crate::render::{export_filename, render_png, ExportSize, GlyphSource, Theme};
use std::fs;
use std::path::Path;

/// An encoded card and the file name it downloads as.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub fn render(
    library: &QuoteLibrary,
    id: u32,
    theme: Theme,
    size: ExportSize,
    glyphs: &dyn GlyphSource,
) -> Result<ExportedImage> {
    let quote = library.require(id)?;
    let bytes = render_png(quote, theme, size, glyphs)?;
    Ok(ExportedImage {
        filename: export_filename(quote, theme),
        bytes,
    })
}

/// Renders the card and writes it into `out_dir`.
pub fn run(
    library: &QuoteLibrary,
    id: u32,
    theme: Theme,
    size: ExportSize,
    glyphs: &dyn GlyphSource,
    out_dir: &Path,
) -> Result<CmdResult> {
    let image = render(library, id, theme, size, glyphs)?;

    if !out_dir.exists() {
        fs::create_dir_all(out_dir).map_err(QuoteError::Io)?;
    }
    let path = out_dir.join(&image.filename);
    fs::write(&path, &image.bytes).map_err(QuoteError::Io)?;
    tracing::info!("Exported #{} to {}", id, path.display());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} ({} theme, {})",
        image.filename,
        theme.display_name(),
        size
    )));
    Ok(result.with_exported_paths(vec![path]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::library;
    use crate::render::BlockGlyphs;
    use tempfile::tempdir;

    #[test]
    fn writes_png_named_after_author_and_theme() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("cards");

        let result =
            run(&library(), 1, Theme::Gradient, ExportSize::Preview, &BlockGlyphs, &out).unwrap();

        let path = &result.exported_paths[0];
        assert_eq!(path, &out.join("名言-屈原-渐变-1.png"));
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn render_matches_written_bytes() {
        let dir = tempdir().unwrap();
        let lib = library();
        let image = render(&lib, 2, Theme::Warm, ExportSize::Preview, &BlockGlyphs).unwrap();
        let result =
            run(&lib, 2, Theme::Warm, ExportSize::Preview, &BlockGlyphs, dir.path()).unwrap();
        assert_eq!(fs::read(&result.exported_paths[0]).unwrap(), image.bytes);
    }

    #[test]
    fn unknown_id_writes_nothing() {
        let dir = tempdir().unwrap();
        let result = run(
            &library(),
            77,
            Theme::Classic,
            ExportSize::Preview,
            &BlockGlyphs,
            dir.path(),
        );
        assert!(matches!(result, Err(QuoteError::QuoteNotFound(77))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
