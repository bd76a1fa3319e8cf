//! Slide rendering: paints laid-out words onto a fixed-size canvas and
//! encodes it as PNG.

use crate::config::RenderConfig;
use crate::error::Result;
use crate::font::{FontHandle, FontResolver};
use crate::highlight::KeywordHighlighter;
use crate::layout::{layout_placeholder, layout_text, PlacedWord};
use crate::types::SlideText;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

/// An encoded slide image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl RenderedImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// PNG-encoded bytes.
    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }
}

/// Renders slide text with a fixed configuration and font.
///
/// The keyword color map is built once here and reused for every slide.
#[derive(Debug, Clone)]
pub struct SlideRenderer {
    config: RenderConfig,
    font: FontHandle,
    highlighter: KeywordHighlighter,
}

impl SlideRenderer {
    /// Create a renderer using an already resolved font.
    pub fn new(config: RenderConfig, font: FontHandle) -> Self {
        let highlighter = KeywordHighlighter::new(&config.keywords);
        Self {
            config,
            font,
            highlighter,
        }
    }

    /// Create a renderer, resolving the font at the configured size.
    pub fn with_resolver(config: RenderConfig, resolver: &FontResolver) -> Self {
        let font = resolver.resolve(config.font_size);
        Self::new(config, font)
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Render one slide. `slide_index` is zero-based and only used for the
    /// placeholder drawn when the slide has no text.
    pub fn render(&self, slide: &SlideText, slide_index: usize) -> Result<RenderedImage> {
        self.render_text(&slide.joined(), slide_index)
    }

    /// Render already-joined slide text.
    pub fn render_text(&self, text: &str, slide_index: usize) -> Result<RenderedImage> {
        let canvas = self.paint(text, slide_index);
        encode_png(&canvas)
    }

    /// Paint the slide without encoding it.
    pub fn paint(&self, text: &str, slide_index: usize) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(
            self.config.width,
            self.config.height,
            self.config.background.into(),
        );

        let words = if text.is_empty() {
            layout_placeholder(slide_index, &self.config)
        } else {
            layout_text(text, &self.config, &self.highlighter)
        };
        self.draw_words(&mut canvas, &words);

        canvas
    }

    fn draw_words(&self, canvas: &mut RgbImage, words: &[PlacedWord]) {
        for word in words {
            self.font
                .draw_text(canvas, word.x, word.y, &word.text, word.color);
        }
    }
}

fn encode_png(canvas: &RgbImage) -> Result<RenderedImage> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgb8,
    )?;

    Ok(RenderedImage {
        width: canvas.width(),
        height: canvas.height(),
        png,
    })
}
