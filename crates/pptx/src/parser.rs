//! PPTX file parser implementation.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slideshot_core::{Error, ExtractedSlide, Presentation, PresentationFormat, Result};
use std::collections::HashMap;
use std::io::{Read, Seek};
use unicode_normalization::UnicodeNormalization;
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    ///
    /// Any unreadable part fails the whole parse; no partial presentation
    /// is returned.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Presentation> {
        let mut archive = open_archive(reader)?;

        let mut presentation = Presentation::new(filename, PresentationFormat::Pptx);

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("{}: {} slides", filename, slide_order.len());

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            presentation.add_slide(slide);
        }

        Ok(presentation)
    }

    /// Count slides without extracting their text.
    pub fn slide_count<R: Read + Seek>(&self, reader: R) -> Result<usize> {
        let mut archive = open_archive(reader)?;
        Ok(self.get_slide_order(&mut archive)?.len())
    }

    /// Get the ordered list of slide part paths.
    ///
    /// The order comes from `<p:sldIdLst>` in presentation.xml, resolved
    /// through the presentation relationships. Decks without a slide list
    /// fall back to the numeric suffix of each slide part.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, PRESENTATION_RELS_PATH)?;
        let slide_rels = parse_slide_relationships(&rels_content)?;

        let presentation_content = self.read_file_from_archive(archive, PRESENTATION_PATH)?;
        let listed = parse_slide_id_list(&presentation_content)?;

        if listed.is_empty() {
            let mut slides: Vec<String> = slide_rels.into_values().collect();
            slides.sort_by(|a, b| {
                match (extract_slide_number(a), extract_slide_number(b)) {
                    (Some(na), Some(nb)) => na.cmp(&nb),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => a.cmp(b),
                }
            });
            return Ok(slides);
        }

        listed
            .iter()
            .map(|rel_id| {
                slide_rels.get(rel_id).cloned().ok_or_else(|| {
                    Error::PptxParseError(format!(
                        "Slide relationship '{}' not found in {}",
                        rel_id, PRESENTATION_RELS_PATH
                    ))
                })
            })
            .collect()
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<ExtractedSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = ExtractedSlide::new(slide_number);

        let shapes = self
            .extract_shape_texts(&content)
            .map_err(|e| Error::XmlError(format!("{}: {}", slide_path, e)))?;

        for text in shapes {
            slide.add_shape_text(&text);
        }

        log::debug!(
            "Slide {} ({}): {} text shapes",
            slide_number,
            slide_path,
            slide.text.shapes().len()
        );

        Ok(slide)
    }

    /// Extract the text of each top-level shape, in document order.
    ///
    /// Only `<p:sp>` elements directly under the shape tree carry text;
    /// grouped shapes, pictures and graphic frames are skipped. Paragraphs
    /// and `<a:br/>` breaks become `\n`.
    fn extract_shape_texts(&self, xml_content: &str) -> std::result::Result<Vec<String>, String> {
        let mut texts = Vec::new();
        let mut reader = Reader::from_str(xml_content);

        let mut group_depth = 0usize;
        let mut current_shape: Option<ShapeText> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"grpSp" => group_depth += 1,
                    b"sp" if group_depth == 0 => current_shape = Some(ShapeText::default()),
                    name => {
                        if let Some(shape) = current_shape.as_mut() {
                            shape.open(name);
                        }
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.empty(local_name(e.name().as_ref()));
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(shape) = current_shape.as_mut().filter(|s| s.in_run_text) {
                        let text = e.unescape().map_err(|e| e.to_string())?;
                        shape.text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"grpSp" => group_depth = group_depth.saturating_sub(1),
                    b"sp" if group_depth == 0 => {
                        if let Some(shape) = current_shape.take() {
                            texts.push(shape.text.nfc().collect::<String>());
                        }
                    }
                    name => {
                        if let Some(shape) = current_shape.as_mut() {
                            shape.close(name);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(format!(
                        "error at position {}: {}",
                        reader.buffer_position(),
                        e
                    ));
                }
                _ => {}
            }
        }

        Ok(texts)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

fn open_archive<R: Read + Seek>(reader: R) -> Result<ZipArchive<R>> {
    ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))
}

/// Text being collected for one `<p:sp>`.
#[derive(Debug, Default)]
struct ShapeText {
    text: String,
    in_text_body: bool,
    paragraphs: usize,
    in_run_text: bool,
}

impl ShapeText {
    fn open(&mut self, name: &[u8]) {
        match name {
            b"txBody" => self.in_text_body = true,
            b"p" if self.in_text_body => self.start_paragraph(),
            b"t" if self.in_text_body => self.in_run_text = true,
            _ => {}
        }
    }

    fn empty(&mut self, name: &[u8]) {
        match name {
            b"p" if self.in_text_body => self.start_paragraph(),
            b"br" if self.in_text_body => self.text.push('\n'),
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"txBody" => self.in_text_body = false,
            b"t" => self.in_run_text = false,
            _ => {}
        }
    }

    fn start_paragraph(&mut self) {
        if self.paragraphs > 0 {
            self.text.push('\n');
        }
        self.paragraphs += 1;
    }
}

/// Map relationship Id to slide part path for every slide relationship.
fn parse_slide_relationships(rels_content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(rels_content);
    reader.trim_text(true);
    let mut slides = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let rel_type = attribute(e, b"Type").unwrap_or_default();
                let target = attribute(e, b"Target").unwrap_or_default();
                let id = attribute(e, b"Id").unwrap_or_default();

                if rel_type.ends_with("/slide") && !id.is_empty() && !target.is_empty() {
                    slides.insert(id, resolve_target(&target));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(slides)
}

/// Relationship ids of `<p:sldId>` entries, in presentation order.
fn parse_slide_id_list(presentation_content: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(presentation_content);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                let rel_id = e.attributes().flatten().find_map(|attr| {
                    let key = attr.key.as_ref();
                    // r:id, not the numeric id attribute
                    if key.contains(&b':') && local_name(key) == b"id" {
                        Some(String::from_utf8_lossy(&attr.value).to_string())
                    } else {
                        None
                    }
                });
                if let Some(rel_id) = rel_id {
                    ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing {}: {}",
                    PRESENTATION_PATH, e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Resolve a relationship target against the `ppt/` directory.
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut parts: Vec<&str> = vec!["ppt"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    // Remove common extensions first
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    // Try to find digits at the end
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
