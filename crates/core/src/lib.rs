//! Core of the slide renderer: domain types, color parsing, keyword
//! highlighting, line wrapping, font resolution, slide rendering and
//! archive packaging.

pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod highlight;
pub mod layout;
pub mod package;
pub mod render;
pub mod types;
pub mod wrap;

pub use color::Color;
pub use config::RenderConfig;
pub use error::{Error, ErrorKind, Result};
pub use font::{FontHandle, FontResolver};
pub use highlight::{KeywordHighlighter, KEYWORD_PALETTE};
pub use layout::PlacedWord;
pub use package::{Archive, BatchPackager, OutputEntry};
pub use render::{RenderedImage, SlideRenderer};
pub use types::{ExtractedSlide, Presentation, PresentationFormat, SlideSource, SlideText};
pub use wrap::{wrap_line, WrappedLine};
