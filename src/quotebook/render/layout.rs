//! Card layout in logical units.
//!
//! Every card is laid out on an 800x600 logical canvas and scaled to device
//! pixels afterwards, so previews and downloads break lines at the same
//! characters.

use super::glyphs::GlyphSource;
use crate::model::Quote;

pub const LOGICAL_WIDTH: f32 = 800.0;
pub const LOGICAL_HEIGHT: f32 = 600.0;
pub const MAX_LINE_WIDTH: f32 = 700.0;
pub const CONTENT_FONT_SIZE: f32 = 32.0;
pub const META_FONT_SIZE: f32 = 24.0;
pub const FIRST_BASELINE: f32 = 200.0;
pub const LINE_HEIGHT: f32 = 50.0;
pub const AUTHOR_OFFSET: f32 = 80.0;
pub const SOURCE_OFFSET: f32 = 120.0;

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Left edge after centering on the vertical midline.
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub ink: Ink,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub content: Vec<TextLine>,
    pub author: TextLine,
    pub source: Option<TextLine>,
}

impl CardLayout {
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.content
            .iter()
            .chain(std::iter::once(&self.author))
            .chain(self.source.as_ref())
    }
}

/// Greedy character wrap: a character that would push the current line past
/// `max_width` starts a new line, except that a line always accepts its first
/// character. Newlines in the text force a break.
pub fn wrap_chars(text: &str, max_width: f32, size: f32, glyphs: &dyn GlyphSource) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0.0;

    for ch in text.chars() {
        match ch {
            '\r' => continue,
            '\n' => {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
                continue;
            }
            _ => {}
        }
        let advance = glyphs.advance(ch, size);
        if !line.is_empty() && width + advance > max_width {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
        }
        line.push(ch);
        width += advance;
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Drops lines past `max_lines` and marks the cut with an ellipsis that still
/// fits the width budget.
pub fn truncate_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    max_width: f32,
    size: f32,
    glyphs: &dyn GlyphSource,
) -> Vec<String> {
    if lines.len() <= max_lines || max_lines == 0 {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let budget = max_width - glyphs.advance(ELLIPSIS, size);
        while !last.is_empty() && glyphs.measure(last, size) > budget {
            last.pop();
        }
        last.push(ELLIPSIS);
    }
    lines
}

pub fn layout_card(
    quote: &Quote,
    max_lines: Option<usize>,
    glyphs: &dyn GlyphSource,
) -> CardLayout {
    let mut wrapped = wrap_chars(&quote.content, MAX_LINE_WIDTH, CONTENT_FONT_SIZE, glyphs);
    if let Some(max) = max_lines {
        wrapped = truncate_lines(wrapped, max, MAX_LINE_WIDTH, CONTENT_FONT_SIZE, glyphs);
    }

    let mut baseline = FIRST_BASELINE;
    let mut content = Vec::with_capacity(wrapped.len());
    for (i, text) in wrapped.into_iter().enumerate() {
        if i > 0 {
            baseline += LINE_HEIGHT;
        }
        content.push(centered(text, baseline, CONTENT_FONT_SIZE, Ink::Primary, glyphs));
    }

    let author = centered(
        format!("—— {}", quote.author),
        baseline + AUTHOR_OFFSET,
        META_FONT_SIZE,
        Ink::Secondary,
        glyphs,
    );
    let source = quote.has_source().then(|| {
        centered(
            format!("《{}》", quote.source),
            baseline + SOURCE_OFFSET,
            META_FONT_SIZE,
            Ink::Secondary,
            glyphs,
        )
    });

    CardLayout {
        content,
        author,
        source,
    }
}

fn centered(
    text: String,
    baseline: f32,
    size: f32,
    ink: Ink,
    glyphs: &dyn GlyphSource,
) -> TextLine {
    let width = glyphs.measure(&text, size);
    TextLine {
        x: LOGICAL_WIDTH / 2.0 - width / 2.0,
        text,
        baseline,
        size,
        ink,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::*;
    use crate::render::glyphs::BlockGlyphs;

    // 32 units per CJK character, so 21 fit in 700 units.
    const PER_LINE: usize = 21;

    #[test]
    fn test_short_content_is_one_line() {
        let lines = wrap_chars("路漫漫其修远兮", MAX_LINE_WIDTH, CONTENT_FONT_SIZE, &BlockGlyphs);
        assert_eq!(lines, vec!["路漫漫其修远兮"]);
    }

    #[test]
    fn test_long_content_wraps() {
        let text = "天".repeat(50);
        let lines = wrap_chars(&text, MAX_LINE_WIDTH, CONTENT_FONT_SIZE, &BlockGlyphs);
        assert!(lines.len() > 1);
        assert_eq!(lines[0].chars().count(), PER_LINE);
        assert_eq!(lines.concat(), text);
        for line in &lines {
            assert!(BlockGlyphs.measure(line, CONTENT_FONT_SIZE) <= MAX_LINE_WIDTH);
        }
    }

    #[test]
    fn test_first_character_always_fits() {
        let lines = wrap_chars("天地", 10.0, CONTENT_FONT_SIZE, &BlockGlyphs);
        assert_eq!(lines, vec!["天", "地"]);
    }

    #[test]
    fn test_newline_forces_break() {
        let lines = wrap_chars("上\r\n下", MAX_LINE_WIDTH, CONTENT_FONT_SIZE, &BlockGlyphs);
        assert_eq!(lines, vec!["上", "下"]);
    }

    #[test]
    fn test_truncate_adds_ellipsis_within_budget() {
        let text = "天".repeat(PER_LINE * 7);
        let lines = wrap_chars(&text, MAX_LINE_WIDTH, CONTENT_FONT_SIZE, &BlockGlyphs);
        let lines = truncate_lines(lines, 5, MAX_LINE_WIDTH, CONTENT_FONT_SIZE, &BlockGlyphs);
        assert_eq!(lines.len(), 5);
        let last = &lines[4];
        assert!(last.ends_with('…'));
        assert!(BlockGlyphs.measure(last, CONTENT_FONT_SIZE) <= MAX_LINE_WIDTH);
    }

    #[test]
    fn test_truncate_leaves_short_text_alone() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            truncate_lines(lines.clone(), 5, MAX_LINE_WIDTH, CONTENT_FONT_SIZE, &BlockGlyphs),
            lines
        );
    }

    #[test]
    fn test_card_positions() {
        let mut q = qu_yuan();
        q.content = "天".repeat(PER_LINE + 1);
        let card = layout_card(&q, None, &BlockGlyphs);

        assert_eq!(card.content.len(), 2);
        assert_eq!(card.content[0].baseline, FIRST_BASELINE);
        assert_eq!(card.content[1].baseline, FIRST_BASELINE + LINE_HEIGHT);
        assert_eq!(card.author.text, "—— 屈原");
        assert_eq!(card.author.baseline, FIRST_BASELINE + LINE_HEIGHT + AUTHOR_OFFSET);
        let source = card.source.as_ref().unwrap();
        assert_eq!(source.text, "《离骚》");
        assert_eq!(source.baseline, FIRST_BASELINE + LINE_HEIGHT + SOURCE_OFFSET);
        assert_eq!(source.ink, Ink::Secondary);
    }

    #[test]
    fn test_lines_are_centered() {
        let card = layout_card(&confucius(), None, &BlockGlyphs);
        for line in card.lines() {
            let width = BlockGlyphs.measure(&line.text, line.size);
            assert_eq!(line.x * 2.0 + width, LOGICAL_WIDTH, "{}", line.text);
        }
    }

    #[test]
    fn test_no_source_line_without_source() {
        let q = quote(10, "友情", "桃李满天下", "佚名", "", &[]);
        let card = layout_card(&q, None, &BlockGlyphs);
        assert!(card.source.is_none());
        assert_eq!(card.lines().count(), 2);
    }
}
