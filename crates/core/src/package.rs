//! Batch rendering of selected slides into a ZIP archive.

use crate::error::{Error, Result};
use crate::render::SlideRenderer;
use crate::types::SlideSource;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One rendered slide inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    /// Name inside the archive, `<MM-DD>-<sequence>.png`.
    pub filename: String,
    /// Zero-based source slide index.
    pub slide_index: usize,
    /// One-based position among rendered slides.
    pub sequence: usize,
}

/// A finished archive.
#[derive(Debug, Clone)]
pub struct Archive {
    /// Suggested download name, `<MM-DD>-<requested>.zip`.
    pub filename: String,
    pub bytes: Vec<u8>,
    pub entries: Vec<OutputEntry>,
}

/// Renders a selection of slides and bundles them into one ZIP.
#[derive(Debug, Clone)]
pub struct BatchPackager {
    renderer: SlideRenderer,
    date_prefix: String,
}

impl BatchPackager {
    /// Create a packager stamping entries with today's local date.
    pub fn new(renderer: SlideRenderer) -> Self {
        Self {
            renderer,
            date_prefix: today_prefix(),
        }
    }

    /// Override the `MM-DD` prefix.
    pub fn with_date_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.date_prefix = prefix.into();
        self
    }

    pub fn date_prefix(&self) -> &str {
        &self.date_prefix
    }

    /// Decide which slides get rendered and under which names.
    ///
    /// Selections are sorted ascending but not deduplicated. Indices outside
    /// `[0, slide_count)` are skipped and consume no sequence number.
    pub fn plan(&self, selections: &[i64], slide_count: usize) -> Vec<OutputEntry> {
        let mut sorted = selections.to_vec();
        sorted.sort_unstable();

        let mut entries = Vec::with_capacity(sorted.len());
        for index in sorted {
            let in_range = usize::try_from(index).ok().filter(|i| *i < slide_count);
            let Some(slide_index) = in_range else {
                log::debug!("Skipping slide index {} (count {})", index, slide_count);
                continue;
            };

            let sequence = entries.len() + 1;
            entries.push(OutputEntry {
                filename: format!("{}-{}.png", self.date_prefix, sequence),
                slide_index,
                sequence,
            });
        }
        entries
    }

    /// Render the selected slides of `slides` into a ZIP archive.
    pub fn package<S>(&self, selections: &[i64], slides: &S) -> Result<Archive>
    where
        S: SlideSource + ?Sized,
    {
        let entries = self.plan(selections, slides.slide_count());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &entries {
            let Some(text) = slides.slide_text(entry.slide_index) else {
                return Err(Error::ArchiveError(format!(
                    "slide {} missing from a source reporting {} slides",
                    entry.slide_index + 1,
                    slides.slide_count()
                )));
            };
            log::debug!(
                "Rendering slide {} as {}",
                entry.slide_index + 1,
                entry.filename
            );

            let image = self.renderer.render(text, entry.slide_index)?;

            zip.start_file(entry.filename.as_str(), options)
                .map_err(|e| Error::ArchiveError(format!("{}: {}", entry.filename, e)))?;
            zip.write_all(image.as_png())
                .map_err(|e| Error::ArchiveError(format!("{}: {}", entry.filename, e)))?;
        }

        let bytes = zip
            .finish()
            .map_err(|e| Error::ArchiveError(e.to_string()))?
            .into_inner();

        Ok(Archive {
            filename: format!("{}-{}.zip", self.date_prefix, selections.len()),
            bytes,
            entries,
        })
    }
}

/// Today's local date as `MM-DD`.
pub fn today_prefix() -> String {
    chrono::Local::now().format("%m-%d").to_string()
}
