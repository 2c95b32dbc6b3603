use super::theme::{Background, Rgb};
use crate::error::{QuoteError, Result};
use tiny_skia::{
    ColorU8, GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode, Transform,
};

/// A raster surface for one exported card.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            QuoteError::Render(format!("cannot allocate a {}x{} surface", width, height))
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn paint_background(&mut self, background: Background) -> Result<()> {
        match background {
            Background::Solid(color) => {
                self.pixmap.fill(color.to_color());
                Ok(())
            }
            Background::Linear(from, to) => {
                let (w, h) = (self.width() as f32, self.height() as f32);
                let shader = LinearGradient::new(
                    Point::from_xy(0.0, 0.0),
                    Point::from_xy(w, h),
                    vec![
                        GradientStop::new(0.0, from.to_color()),
                        GradientStop::new(1.0, to.to_color()),
                    ],
                    SpreadMode::Pad,
                    Transform::identity(),
                )
                .ok_or_else(|| QuoteError::Render("invalid background gradient".to_string()))?;
                let rect = Rect::from_xywh(0.0, 0.0, w, h)
                    .ok_or_else(|| QuoteError::Render("invalid canvas bounds".to_string()))?;
                let paint = Paint {
                    shader,
                    ..Paint::default()
                };
                self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                Ok(())
            }
        }
    }

    /// Mixes `color` into the pixel at (`x`, `y`) by `coverage`. Out-of-bounds
    /// coordinates are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage == 0.0 {
            return;
        }
        let idx = y as usize * self.width() as usize + x as usize;
        let pixels = self.pixmap.pixels_mut();
        let dst = pixels[idx].demultiply();
        let mix = |src: u8, dst: u8| {
            (src as f32 * coverage + dst as f32 * (1.0 - coverage)).round() as u8
        };
        let alpha = (255.0 * coverage + dst.alpha() as f32 * (1.0 - coverage)).round() as u8;
        pixels[idx] = ColorU8::from_rgba(
            mix(color.0, dst.red()),
            mix(color.1, dst.green()),
            mix(color.2, dst.blue()),
            alpha,
        )
        .premultiply();
    }

    /// The straight-alpha color at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgb(c.red(), c.green(), c.blue()))
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| QuoteError::Render(format!("PNG encoding failed: {}", e)))
    }
}
