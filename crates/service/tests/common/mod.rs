//! In-memory PPTX fixtures.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Builds a minimal PPTX. Each slide is a list of shapes; each shape's
/// text is split on `\n` into paragraphs.
#[derive(Default)]
pub struct PptxFixture {
    slides: Vec<Vec<String>>,
}

impl PptxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slide(mut self, shapes: &[&str]) -> Self {
        self.slides.push(shapes.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        let count = self.slides.len();

        let part_number = |i: usize| i + 1;

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
        );
        let mut ids = String::new();
        for i in 0..count {
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                i + 2,
                part_number(i)
            ));
            ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 2));
        }
        rels.push_str("</Relationships>");

        let presentation = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst>{}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#,
            ids
        );

        write_part(&mut zip, options, "[Content_Types].xml", "<Types/>");
        write_part(&mut zip, options, "ppt/presentation.xml", &presentation);
        write_part(&mut zip, options, "ppt/_rels/presentation.xml.rels", &rels);

        for (i, shapes) in self.slides.iter().enumerate() {
            let name = format!("ppt/slides/slide{}.xml", part_number(i));
            write_part(&mut zip, options, &name, &slide_xml(shapes));
        }

        zip.finish().unwrap().into_inner()
    }
}

fn write_part(zip: &mut ZipWriter<Cursor<Vec<u8>>>, options: FileOptions, name: &str, body: &str) {
    zip.start_file(name, options).unwrap();
    zip.write_all(body.as_bytes()).unwrap();
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn slide_xml(shapes: &[String]) -> String {
    let mut tree = String::new();
    for (i, shape) in shapes.iter().enumerate() {
        let paragraphs: String = shape
            .split('\n')
            .map(|p| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", escape(p)))
            .collect();
        tree.push_str(&format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Shape {}"/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/>{}</p:txBody></p:sp>"#,
            i + 2,
            i,
            paragraphs
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr>{}</p:spTree></p:cSld></p:sld>"#,
        tree
    )
}
