//! DOCX text: the `w:t` runs of every body-level `w:p` paragraph in
//! `word/document.xml`, paragraphs joined with a single space.
//!
//! Table cells are not read. Text boxes and `mc:Choice` alternates are skipped
//! in place, so the runs around them still belong to their paragraph.

use std::io::{Cursor, Read};

use xml::reader::XmlEvent;
use xml::EventReader;
use zip::ZipArchive;

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    let part = match zip.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractError::MissingPart(DOCUMENT_PART))
        }
        Err(e) => return Err(e.into()),
    };

    let paragraphs = read_paragraphs(part)?;
    Ok(paragraphs.join(" "))
}

fn read_paragraphs<R: Read>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // Depth of an open mc:Choice or w:txbxContent; nothing under it is read.
    let mut skip_depth: Option<usize> = None;

    for event in EventReader::new(source) {
        match event? {
            XmlEvent::StartElement { name, .. } => {
                depth += 1;
                if skip_depth.is_some() {
                    continue;
                }
                let word = is_word(&name.prefix);
                match name.local_name.as_str() {
                    "Choice" if name.prefix.as_deref() == Some("mc") => skip_depth = Some(depth),
                    "txbxContent" if word => skip_depth = Some(depth),
                    "body" if word => body_depth = Some(depth),
                    "p" if word && is_body_child(body_depth, depth) => {
                        current = Some(String::new())
                    }
                    "t" if word && current.is_some() => in_text = true,
                    "tab" | "br" if word => {
                        if let Some(text) = current.as_mut() {
                            text.push(' ');
                        }
                    }
                    _ => {}
                }
            }
            XmlEvent::EndElement { name } => {
                if skip_depth == Some(depth) {
                    skip_depth = None;
                } else if skip_depth.is_none() && is_word(&name.prefix) {
                    match name.local_name.as_str() {
                        "p" if is_body_child(body_depth, depth) => {
                            if let Some(text) = current.take() {
                                paragraphs.push(text);
                            }
                        }
                        "t" => in_text = false,
                        _ => {}
                    }
                }
                depth = depth.saturating_sub(1);
            }
            XmlEvent::Characters(chars) | XmlEvent::Whitespace(chars) => {
                if in_text && skip_depth.is_none() {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&chars);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Paragraphs directly under `w:body`; table cells and nested content are not.
fn is_body_child(body_depth: Option<usize>, depth: usize) -> bool {
    body_depth.is_some_and(|body| depth == body + 1)
}

fn is_word(prefix: &Option<String>) -> bool {
    prefix.as_deref() == Some("w")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const NAMESPACES: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006""#;

    /// Packs `document_xml` as `word/document.xml` in an in-memory archive.
    pub(crate) fn build_docx_from_xml(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", FileOptions::default())
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer
            .start_file(DOCUMENT_PART, FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// Minimal DOCX with one single-run paragraph per entry.
    pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        build_docx_from_xml(&format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NAMESPACES}><w:body>{body}</w:body></w:document>"#
        ))
    }

    #[test]
    fn test_paragraphs_joined_with_space() {
        let bytes = build_docx(&["Senior Rust Engineer", "Kafka, Kubernetes", "AWS"]);
        assert_eq!(
            extract(&bytes).unwrap(),
            "Senior Rust Engineer Kafka, Kubernetes AWS"
        );
    }

    #[test]
    fn test_runs_within_paragraph_concatenate() {
        let xml = format!(
            r#"<w:document {NAMESPACES}><w:body><w:p><w:r><w:t>Pyth</w:t></w:r><w:r><w:t>on</w:t></w:r><w:r><w:tab/><w:t xml:space="preserve"> developer</w:t></w:r></w:p></w:body></w:document>"#
        );
        let bytes = build_docx_from_xml(&xml);
        assert_eq!(extract(&bytes).unwrap(), "Python  developer");
    }

    #[test]
    fn test_alternate_content_choice_is_skipped() {
        let xml = format!(
            r#"<w:document {NAMESPACES}><w:body><w:p><w:r><w:t>cloud</w:t></w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:p><w:r><w:t>duplicate</w:t></w:r></w:p></mc:Choice><mc:Fallback><w:r><w:t> infrastructure</w:t></w:r></mc:Fallback></mc:AlternateContent></w:p></w:body></w:document>"#
        );
        let bytes = build_docx_from_xml(&xml);
        assert_eq!(extract(&bytes).unwrap(), "cloud infrastructure");
    }

    #[test]
    fn test_text_box_keeps_surrounding_runs() {
        let xml = format!(
            r#"<w:document {NAMESPACES} xmlns:v="urn:schemas-microsoft-com:vml"><w:body><w:p><w:r><w:t>python developer</w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><w:txbxContent><w:p><w:r><w:t>sidebar</w:t></w:r></w:p></w:txbxContent></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox><w:txbxContent><w:p><w:r><w:t>sidebar</w:t></w:r></w:p></w:txbxContent></v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:t xml:space="preserve"> cloud infrastructure</w:t></w:r></w:p><w:p><w:r><w:t>AWS</w:t></w:r></w:p></w:body></w:document>"#
        );
        let bytes = build_docx_from_xml(&xml);
        assert_eq!(
            extract(&bytes).unwrap(),
            "python developer cloud infrastructure AWS"
        );
    }

    #[test]
    fn test_table_cells_are_not_read() {
        let xml = format!(
            r#"<w:document {NAMESPACES}><w:body><w:p><w:r><w:t>intro</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>kubernetes</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>outro</w:t></w:r></w:p></w:body></w:document>"#
        );
        let bytes = build_docx_from_xml(&xml);
        assert_eq!(extract(&bytes).unwrap(), "intro outro");
    }

    #[test]
    fn test_empty_paragraphs_kept_as_separators() {
        let bytes = build_docx(&["a", "", "b"]);
        assert_eq!(extract(&bytes).unwrap(), "a  b");
    }

    #[test]
    fn test_missing_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", FileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(
            extract(&bytes),
            Err(ExtractError::MissingPart("word/document.xml"))
        ));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let bytes = build_docx_from_xml("<w:document><w:body><w:p>");
        assert!(extract(&bytes).is_err());
    }
}
