//! SVG metadata embed/extract.
//!
//! Every generated SVG is made self-describing by appending a `desc` element
//! to the root with four children, in fixed order:
//!
//! ```xml
//! <desc>
//!   <LatexPreamble>...</LatexPreamble>
//!   <LatexEquation>...</LatexEquation>
//!   <LatexPostamble>...</LatexPostamble>
//!   <svgScale>...</svgScale>
//! </desc>
//! ```
//!
//! The order is the contract: loaders read the children positionally. Text
//! values are XML-escaped on write and unescaped on read, so arbitrary LaTeX
//! (`&`, `<`, `>`, ...) survives the round trip.

use crate::error::MetadataError;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Tag names of the four metadata children, in their fixed order.
pub const METADATA_TAGS: [&str; 4] = [
    "LatexPreamble",
    "LatexEquation",
    "LatexPostamble",
    "svgScale",
];

/// The four raw string values embedded in (or extracted from) an SVG.
///
/// Scale is kept as its decimal string form here; numeric parsing is the
/// loader's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedSource {
    pub preamble: String,
    pub equation: String,
    pub postamble: String,
    pub scale: String,
}

impl EmbeddedSource {
    fn fields(&self) -> [&str; 4] {
        [&self.preamble, &self.equation, &self.postamble, &self.scale]
    }
}

/// One child element found under the `desc` wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataField {
    pub tag: String,
    pub value: String,
}

/// Rewrite `svg` with the metadata block appended to its root element.
///
/// All existing content is streamed through unchanged; the `desc` element is
/// injected immediately before the root's closing tag. A self-closed root is
/// reopened so the metadata has a parent.
pub fn embed(svg: &str, source: &EmbeddedSource) -> Result<String, MetadataError> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;
    let mut injected = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                writer.write_event(Event::Start(e))?;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if depth == 0 && !injected {
                    write_desc(&mut writer, source)?;
                    injected = true;
                }
                writer.write_event(Event::End(e))?;
            }
            Event::Empty(e) if depth == 0 && !injected => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                writer.write_event(Event::Start(e))?;
                write_desc(&mut writer, source)?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
                injected = true;
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    if !injected {
        return Err(MetadataError::MissingRoot);
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_desc(
    writer: &mut Writer<Vec<u8>>,
    source: &EmbeddedSource,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("desc")))?;
    for (tag, value) in METADATA_TAGS.iter().zip(source.fields()) {
        writer.write_event(Event::Start(BytesStart::new(*tag)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(*tag)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("desc")))?;
    Ok(())
}

/// Collect the child elements of the first `desc` element, in document
/// order, with their unescaped text content.
///
/// Fails with [`MetadataError::MissingDesc`] if the file carries no `desc`
/// wrapper at all (e.g. a hand-authored SVG). Interpretation of the fields
/// (count, positions, scale parsing) is left to the caller.
pub fn extract(svg: &str) -> Result<Vec<MetadataField>, MetadataError> {
    let mut reader = Reader::from_str(svg);
    let mut fields: Vec<MetadataField> = Vec::new();
    let mut in_desc = false;
    let mut child_depth = 0usize;
    let mut found_desc = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if !in_desc && e.local_name().as_ref() == b"desc" => {
                in_desc = true;
                found_desc = true;
            }
            Event::Start(e) if in_desc => {
                if child_depth == 0 {
                    fields.push(MetadataField {
                        tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        value: String::new(),
                    });
                }
                child_depth += 1;
            }
            Event::Empty(e) if in_desc && child_depth == 0 => {
                fields.push(MetadataField {
                    tag: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    value: String::new(),
                });
            }
            Event::Text(e) if in_desc && child_depth > 0 => {
                if let Some(field) = fields.last_mut() {
                    field.value.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) if in_desc && child_depth > 0 => {
                if let Some(field) = fields.last_mut() {
                    field.value.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) if in_desc && child_depth > 0 => {
                child_depth -= 1;
            }
            Event::End(_) if in_desc => break,
            Event::Eof => break,
            _ => {}
        }
    }

    if !found_desc {
        return Err(MetadataError::MissingDesc);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="24pt" height="8pt" viewBox="0 0 24 8">
  <path d="M 1 2 L 3 4"/>
</svg>"#;

    fn sample_source() -> EmbeddedSource {
        EmbeddedSource {
            preamble: "% Created by laveqed (2026-08-25_10-00-00)\n\\documentclass{article}\n"
                .to_string(),
            equation: "F=ma".to_string(),
            postamble: "\n\\end{document}".to_string(),
            scale: "4".to_string(),
        }
    }

    #[test]
    fn embed_then_extract_round_trips() {
        let source = sample_source();
        let annotated = embed(BARE_SVG, &source).expect("embed");
        let fields = extract(&annotated).expect("extract");

        assert_eq!(fields.len(), 4);
        for (field, tag) in fields.iter().zip(METADATA_TAGS) {
            assert_eq!(field.tag, tag);
        }
        assert_eq!(fields[0].value, source.preamble);
        assert_eq!(fields[1].value, source.equation);
        assert_eq!(fields[2].value, source.postamble);
        assert_eq!(fields[3].value, source.scale);
    }

    #[test]
    fn embed_escapes_latex_special_characters() {
        let source = EmbeddedSource {
            equation: "a < b \\text{ \\& } c > d".to_string(),
            ..sample_source()
        };
        let annotated = embed(BARE_SVG, &source).expect("embed");

        // Raw markup must stay well-formed XML
        assert!(annotated.contains("a &lt; b"));
        let fields = extract(&annotated).expect("extract");
        assert_eq!(fields[1].value, source.equation);
    }

    #[test]
    fn embed_preserves_existing_content() {
        let annotated = embed(BARE_SVG, &sample_source()).expect("embed");
        assert!(annotated.contains(r#"<path d="M 1 2 L 3 4"/>"#));
        assert!(annotated.contains(r#"viewBox="0 0 24 8""#));
        // Metadata sits inside the root element
        let desc_at = annotated.find("<desc>").expect("desc present");
        let close_at = annotated.rfind("</svg>").expect("root close present");
        assert!(desc_at < close_at);
    }

    #[test]
    fn embed_reopens_self_closed_root() {
        let annotated = embed(r#"<svg width="1" height="1"/>"#, &sample_source()).expect("embed");
        let fields = extract(&annotated).expect("extract");
        assert_eq!(fields.len(), 4);
        assert!(annotated.ends_with("</svg>"));
    }

    #[test]
    fn embed_without_root_fails() {
        let err = embed("not xml at all", &sample_source()).unwrap_err();
        assert!(matches!(err, MetadataError::MissingRoot));
    }

    #[test]
    fn extract_without_desc_fails() {
        let err = extract(BARE_SVG).unwrap_err();
        assert!(matches!(err, MetadataError::MissingDesc));
    }

    #[test]
    fn extract_reads_legacy_minidom_output() {
        // Shape produced by the original Python tool (xml.dom.minidom
        // writexml): no whitespace between the desc children.
        let legacy = "<?xml version=\"1.0\" ?><svg height=\"8pt\" width=\"24pt\">\
<g id=\"page1\"/>\
<desc><LatexPreamble>% Created by laveqed (2014-03-01_09-30-00)\n\
\\documentclass{article}\n</LatexPreamble>\
<LatexEquation>F=ma</LatexEquation>\
<LatexPostamble>\n\\end{document}</LatexPostamble>\
<svgScale>10</svgScale></desc></svg>";

        let fields = extract(legacy).expect("extract");
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1].value, "F=ma");
        assert_eq!(fields[3].value, "10");
        assert!(fields[0].value.ends_with("\\documentclass{article}\n"));
    }

    #[test]
    fn extract_not_well_formed_is_an_xml_error() {
        let err = extract("<svg><desc><LatexPreamble></svg>").unwrap_err();
        assert!(matches!(err, MetadataError::Xml(_)));
    }
}
