//! SVG metadata extraction.
//!
//! Reads a tile with a streaming XML reader and picks out the handful of
//! nodes the checks care about:
//!
//! - `width`, `height` and `viewBox` of the first `<svg>` element
//! - `<rdf:li>` items of the `<rdf:Bag>` under `<dc:subject>` (keywords)
//! - `<dc:identifier>` of the `<cc:Work>` description
//! - character data of every `<text>` and `<tspan>`
//!
//! Elements are matched by local name at any depth, so tiles that wrap their
//! content (or even their metadata) in groups are handled the same way.
//! Missing optional nodes simply leave the field empty.

use quick_xml::{
    Reader,
    escape::{resolve_predefined_entity, unescape},
    events::{BytesStart, Event},
};
use thiserror::Error;

/// Parsed view of one tile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileDocument {
    pub width: String,
    pub height: String,
    pub view_box: String,
    pub keywords: Vec<String>,
    pub identifier: String,
    pub text_runs: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not parse svg at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("could not parse svg: unclosed element <{0}>")]
    Unclosed(String),

    #[error("could not parse svg: unknown entity &{0};")]
    UnknownEntity(String),

    #[error("could not parse svg: no root element")]
    Empty,
}

/// What the reader is currently collecting character data for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    /// Index into `keywords`
    Keyword(usize),
    Identifier,
    /// Index into `text_runs`
    TextRun(usize),
}

/// An open element: its local name and the capture it started, if any.
struct Open {
    name: String,
    capture: Option<Capture>,
}

struct Extractor {
    doc: TileDocument,
    stack: Vec<Open>,
    seen_svg: bool,
    seen_identifier: bool,
    seen_root: bool,
}

impl TileDocument {
    /// Parse an SVG document.
    ///
    /// Fails only when the input is not well-formed XML.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);

        let mut extractor = Extractor {
            doc: TileDocument::default(),
            stack: Vec::new(),
            seen_svg: false,
            seen_identifier: false,
            seen_root: false,
        };

        loop {
            let event = reader.read_event().map_err(|source| ParseError::Xml {
                position: reader.error_position() as u64,
                source,
            })?;

            match event {
                Event::Start(e) => extractor.open(&e, false),
                Event::Empty(e) => extractor.open(&e, true),
                Event::End(_) => extractor.close(),
                Event::Text(t) => extractor.append(&String::from_utf8_lossy(&t)),
                Event::CData(t) => extractor.append(&String::from_utf8_lossy(&t)),
                Event::GeneralRef(r) => {
                    let name = String::from_utf8_lossy(&r).into_owned();
                    let resolved = resolve_reference(&name)
                        .ok_or_else(|| ParseError::UnknownEntity(name.clone()))?;
                    extractor.append(&resolved);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = extractor.stack.pop() {
            return Err(ParseError::Unclosed(open.name));
        }
        if !extractor.seen_root {
            return Err(ParseError::Empty);
        }

        Ok(extractor.finish())
    }

    /// Keywords joined for display.
    pub fn keyword_list(&self) -> String {
        self.keywords.join(", ")
    }
}

impl Extractor {
    fn open(&mut self, element: &BytesStart, empty: bool) {
        self.seen_root = true;
        let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();

        if name == "svg" && !self.seen_svg {
            self.seen_svg = true;
            self.read_dimensions(element);
        }

        let capture = self.capture_for(&name);
        if empty {
            return;
        }
        self.stack.push(Open { name, capture });
    }

    fn close(&mut self) {
        if let Some(Open {
            capture: Some(Capture::Identifier),
            ..
        }) = self.stack.pop()
        {
            self.seen_identifier = true;
        }
    }

    /// Decide whether a newly opened element starts a capture.
    ///
    /// Keyword items are created here (even if they end up empty) so the
    /// keyword list keeps one entry per `<li>`.
    fn capture_for(&mut self, name: &str) -> Option<Capture> {
        match name {
            "li" if self.within(&["subject", "Bag"]) => {
                self.doc.keywords.push(String::new());
                Some(Capture::Keyword(self.doc.keywords.len() - 1))
            }
            "identifier" if !self.seen_identifier && self.within(&["Work"]) => {
                Some(Capture::Identifier)
            }
            "text" | "tspan" => {
                self.doc.text_runs.push(String::new());
                Some(Capture::TextRun(self.doc.text_runs.len() - 1))
            }
            _ => None,
        }
    }

    /// All of `names` appear, in order, among the open elements.
    fn within(&self, names: &[&str]) -> bool {
        let mut wanted = names.iter().peekable();
        for open in &self.stack {
            if wanted.peek().is_some_and(|w| **w == open.name) {
                wanted.next();
            }
        }
        wanted.peek().is_none()
    }

    fn append(&mut self, text: &str) {
        let Some(capture) = self.stack.last().and_then(|o| o.capture) else {
            return;
        };
        match capture {
            Capture::Keyword(i) => self.doc.keywords[i].push_str(text),
            Capture::Identifier => self.doc.identifier.push_str(text),
            Capture::TextRun(i) => self.doc.text_runs[i].push_str(text),
        }
    }

    fn read_dimensions(&mut self, element: &BytesStart) {
        for attr in element.attributes().flatten() {
            let raw = String::from_utf8_lossy(&attr.value);
            let value = unescape(&raw).map_or_else(|_| raw.to_string(), |v| v.into_owned());
            match attr.key.local_name().as_ref() {
                b"width" => self.doc.width = value,
                b"height" => self.doc.height = value,
                b"viewBox" => self.doc.view_box = value,
                _ => {}
            }
        }
    }

    fn finish(mut self) -> TileDocument {
        self.doc.keywords = self
            .doc
            .keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .collect();
        self.doc.identifier = self.doc.identifier.trim().to_string();
        self.doc.text_runs.retain(|run| !run.trim().is_empty());
        self.doc
    }
}

/// Resolve `&name;` to its text: predefined entities and character references.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg xmlns:dc="http://purl.org/dc/elements/1.1/"
     xmlns:cc="http://creativecommons.org/ns#"
     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns="http://www.w3.org/2000/svg"
     width="96" height="120mm" viewBox="0 0 96 120">
  <metadata id="metadata7">
    <rdf:RDF>
      <cc:Work rdf:about="">
        <dc:format>image/svg+xml</dc:format>
        <dc:subject>
          <rdf:Bag>
            <rdf:li>road</rdf:li>
            <rdf:li>dirt track</rdf:li>
          </rdf:Bag>
        </dc:subject>
        <dc:identifier>tile-0042</dc:identifier>
      </cc:Work>
    </rdf:RDF>
  </metadata>
  <g id="layer1">
    <text x="10" y="20"><tspan x="10" y="20">Old/</tspan><tspan x="10" y="40">Mill</tspan></text>
  </g>
</svg>
"#;

    #[test]
    fn test_parse_full_tile() {
        let doc = TileDocument::parse(TILE).unwrap();
        assert_eq!(doc.width, "96");
        assert_eq!(doc.height, "120mm");
        assert_eq!(doc.view_box, "0 0 96 120");
        assert_eq!(doc.keywords, ["road", "dirt track"]);
        assert_eq!(doc.identifier, "tile-0042");
        assert_eq!(doc.text_runs, ["Old/", "Mill"]);
        assert_eq!(doc.keyword_list(), "road, dirt track");
    }

    #[test]
    fn test_parse_without_metadata() {
        let doc = TileDocument::parse(r#"<svg width="10" height="10"/>"#).unwrap();
        assert_eq!(doc.width, "10");
        assert_eq!(doc.height, "10");
        assert!(doc.view_box.is_empty());
        assert!(doc.keywords.is_empty());
        assert!(doc.identifier.is_empty());
        assert!(doc.text_runs.is_empty());
    }

    #[test]
    fn test_parse_metadata_nested_in_group() {
        let svg = r#"<svg width="100" height="100"><g><g>
            <metadata><rdf:RDF><cc:Work>
              <dc:subject><rdf:Bag><rdf:li>forest</rdf:li></rdf:Bag></dc:subject>
              <dc:identifier>deep</dc:identifier>
            </cc:Work></rdf:RDF></metadata>
            <text>lone run</text>
        </g></g></svg>"#;
        let doc = TileDocument::parse(svg).unwrap();
        assert_eq!(doc.keywords, ["forest"]);
        assert_eq!(doc.identifier, "deep");
        assert_eq!(doc.text_runs, ["lone run"]);
    }

    #[test]
    fn test_only_outer_svg_dimensions() {
        let svg = r#"<svg width="200" height="150"><svg width="5" height="5"/></svg>"#;
        let doc = TileDocument::parse(svg).unwrap();
        assert_eq!(doc.width, "200");
        assert_eq!(doc.height, "150");
    }

    #[test]
    fn test_li_outside_bag_is_not_keyword() {
        let svg = r#"<svg><metadata><rdf:RDF><cc:Work>
            <dc:creator><rdf:Alt><rdf:li>someone</rdf:li></rdf:Alt></dc:creator>
            <dc:identifier></dc:identifier>
        </cc:Work></rdf:RDF></metadata></svg>"#;
        let doc = TileDocument::parse(svg).unwrap();
        assert!(doc.keywords.is_empty());
        assert!(doc.identifier.is_empty());
    }

    #[test]
    fn test_entities_are_decoded() {
        let svg = r#"<svg width="1&#48;0"><metadata><rdf:RDF><cc:Work>
            <dc:subject><rdf:Bag><rdf:li>fish &amp; chips</rdf:li></rdf:Bag></dc:subject>
        </cc:Work></rdf:RDF></metadata><text>caf&#xE9;</text></svg>"#;
        let doc = TileDocument::parse(svg).unwrap();
        assert_eq!(doc.width, "100");
        assert_eq!(doc.keywords, ["fish & chips"]);
        assert_eq!(doc.text_runs, ["café"]);
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            TileDocument::parse("<svg><g></svg>"),
            Err(ParseError::Xml { .. })
        ));
        // Depending on the reader, a truncated document fails at EOF or
        // when the open elements are checked afterwards
        assert!(matches!(
            TileDocument::parse("<svg><g>"),
            Err(ParseError::Unclosed(_) | ParseError::Xml { .. })
        ));
        assert!(matches!(TileDocument::parse(""), Err(ParseError::Empty)));
        assert!(matches!(
            TileDocument::parse("<svg>&nbsp;</svg>"),
            Err(ParseError::UnknownEntity(name)) if name == "nbsp"
        ));
    }
}
