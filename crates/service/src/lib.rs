//! Caller-facing operations over raw presentation bytes.
//!
//! Each operation parses the document once. A parse failure is returned
//! before anything is rendered, so callers never see partial output.

pub mod request;

pub use request::{parse_selections, RenderOptions, SlideImage, SlideImageBody, SlideInfo};

use slideshot_core::{
    Archive, BatchPackager, Error, FontResolver, Presentation, PresentationFormat, Result,
    SlideRenderer, SlideSource,
};
use slideshot_pptx::PptxParser;
use std::io::Cursor;

/// Entry point for slide-info, single-slide and batch requests.
#[derive(Debug, Clone, Default)]
pub struct SlideConverter {
    fonts: FontResolver,
    date_prefix: Option<String>,
}

impl SlideConverter {
    /// Create a converter using the platform font candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific font resolver.
    pub fn with_font_resolver(mut self, fonts: FontResolver) -> Self {
        self.fonts = fonts;
        self
    }

    /// Fix the `MM-DD` prefix used for archive entry names.
    pub fn with_date_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.date_prefix = Some(prefix.into());
        self
    }

    /// Count the slides in a document.
    pub fn slide_info(&self, data: &[u8], filename: &str) -> Result<SlideInfo> {
        detect_pptx(data, filename)?;
        let slide_count = PptxParser::new().slide_count(Cursor::new(data))?;

        Ok(SlideInfo {
            slide_count,
            filename: filename.to_string(),
        })
    }

    /// Render one slide. Fails with `InvalidSlideIndex` when `slide_index`
    /// is outside the document.
    pub fn render_slide(
        &self,
        data: &[u8],
        filename: &str,
        slide_index: i64,
        options: &RenderOptions,
    ) -> Result<SlideImage> {
        let presentation = load_presentation(data, filename)?;
        let count = presentation.slide_count();

        let index = usize::try_from(slide_index)
            .ok()
            .filter(|i| *i < count)
            .ok_or(Error::InvalidSlideIndex {
                index: slide_index,
                count,
            })?;

        let text = presentation
            .slide_text(index)
            .ok_or(Error::InvalidSlideIndex {
                index: slide_index,
                count,
            })?;

        let renderer = self.renderer(options);
        let image = renderer.render(text, index)?;

        Ok(SlideImage {
            slide_index: index,
            width: image.width(),
            height: image.height(),
            png: image.into_png(),
        })
    }

    /// Render the selected slides into a ZIP archive. Out-of-range
    /// selections are skipped.
    pub fn render_batch(
        &self,
        data: &[u8],
        filename: &str,
        selections: &[i64],
        options: &RenderOptions,
    ) -> Result<Archive> {
        let presentation = load_presentation(data, filename)?;

        let mut packager = BatchPackager::new(self.renderer(options));
        if let Some(prefix) = &self.date_prefix {
            packager = packager.with_date_prefix(prefix.clone());
        }

        let archive = packager.package(selections, &presentation)?;
        log::info!(
            "{}: packaged {} of {} requested slides into {}",
            filename,
            archive.entries.len(),
            selections.len(),
            archive.filename
        );
        Ok(archive)
    }

    fn renderer(&self, options: &RenderOptions) -> SlideRenderer {
        SlideRenderer::with_resolver(options.to_config(), &self.fonts)
    }
}

/// Parse a document into per-slide text.
pub fn load_presentation(data: &[u8], filename: &str) -> Result<Presentation> {
    detect_pptx(data, filename)?;
    PptxParser::new().parse(Cursor::new(data), filename)
}

fn detect_pptx(data: &[u8], filename: &str) -> Result<()> {
    let format = PresentationFormat::from_magic(data).or_else(|| {
        filename
            .rsplit_once('.')
            .and_then(|(_, ext)| PresentationFormat::from_extension(ext))
    });

    match format {
        Some(PresentationFormat::Pptx) => Ok(()),
        Some(PresentationFormat::Ppt) => Err(Error::UnsupportedFormat(
            "legacy .ppt files are not supported; save the deck as .pptx".to_string(),
        )),
        None => Err(Error::UnsupportedFormat(format!(
            "could not detect the format of '{}'",
            filename
        ))),
    }
}
