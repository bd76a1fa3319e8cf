//! PPTX (Office Open XML) slide text source.
//!
//! Parses .pptx files, which are ZIP archives containing XML documents,
//! into per-slide shape text ready for rendering.

pub mod parser;

pub use parser::PptxParser;
