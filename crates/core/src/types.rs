//! Domain types for representing extracted presentation content.

use serde::{Deserialize, Serialize};

/// Represents an entire presentation with its extracted slide text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presentation {
    /// Original filename (without path).
    pub filename: String,

    /// Detected format of the source file.
    pub format: PresentationFormat,

    /// Slides in presentation order.
    pub slides: Vec<ExtractedSlide>,
}

impl Presentation {
    /// Create a new presentation with the given filename and format.
    pub fn new(filename: impl Into<String>, format: PresentationFormat) -> Self {
        Self {
            filename: filename.into(),
            format,
            slides: Vec::new(),
        }
    }

    /// Add a slide to the presentation.
    pub fn add_slide(&mut self, slide: ExtractedSlide) {
        self.slides.push(slide);
    }
}

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary). Detected so it can be rejected cleanly.
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// A single extracted slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Text of the slide's text-bearing shapes.
    pub text: SlideText,
}

impl ExtractedSlide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            text: SlideText::new(),
        }
    }

    /// Add the text of one shape to this slide.
    pub fn add_shape_text(&mut self, text: &str) {
        self.text.push(text);
    }
}

/// Ordered text of the shapes on one slide, in shape-traversal order.
///
/// Every entry is trimmed and non-empty; shapes without text are never
/// represented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideText {
    shapes: Vec<String>,
}

impl SlideText {
    /// Create empty slide text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape's text. Whitespace-only text is skipped.
    pub fn push(&mut self, text: &str) {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.shapes.push(trimmed.to_string());
        }
    }

    /// The per-shape strings.
    pub fn shapes(&self) -> &[String] {
        &self.shapes
    }

    /// Whether the slide has no text at all.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The slide's raw text: shape strings joined with line breaks.
    pub fn joined(&self) -> String {
        self.shapes.join("\n")
    }
}

impl<S: AsRef<str>> FromIterator<S> for SlideText {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut text = SlideText::new();
        for s in iter {
            text.push(s.as_ref());
        }
        text
    }
}

/// Anything that can hand out slide text by zero-based index.
pub trait SlideSource {
    /// Number of slides available.
    fn slide_count(&self) -> usize;

    /// Text of the slide at `index`, or `None` when out of range.
    fn slide_text(&self, index: usize) -> Option<&SlideText>;
}

impl SlideSource for Presentation {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn slide_text(&self, index: usize) -> Option<&SlideText> {
        self.slides.get(index).map(|s| &s.text)
    }
}

impl SlideSource for [SlideText] {
    fn slide_count(&self) -> usize {
        self.len()
    }

    fn slide_text(&self, index: usize) -> Option<&SlideText> {
        self.get(index)
    }
}

impl SlideSource for Vec<SlideText> {
    fn slide_count(&self) -> usize {
        self.len()
    }

    fn slide_text(&self, index: usize) -> Option<&SlideText> {
        self.get(index)
    }
}
