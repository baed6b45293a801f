//! Minimal element tree used on both sides of the codec.
//!
//! Quest documents are small and contain no attributes, so the tree keeps just
//! names, text and child elements. Parsing and rendering go through `quick-xml`.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::CodecError;

/// One element of a quest document.
///
/// `text` holds the concatenated character data directly inside the element.
/// For elements with children that is usually just formatting whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

/// Whether [`render`] writes the `<?xml ...?>` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prolog {
    /// Saved documents start with `<?xml version="1.0" encoding="UTF-8"?>`.
    Include,
    /// Previews show only the element tree.
    Omit,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Leaf element holding `text`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children called `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text of the first direct child called `name`, if that child exists.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }
}

/// Parse a whole document and return its root element.
///
/// Fails with [`CodecError::MalformedDocument`] when the input is not
/// well-formed: unbalanced or mismatched tags, no root, several roots, stray
/// text outside the root, or undecodable escapes.
pub fn parse_document(src: &str) -> Result<XmlElement, CodecError> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(format!("{e} (at byte {})", reader.error_position())))?;
        match event {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(malformed("more than one root element".to_string()));
                }
                stack.push(XmlElement::new(element_name(&start)?));
            },
            Event::Empty(start) => {
                let element = XmlElement::new(element_name(&start)?);
                attach(element, &mut stack, &mut root)?;
            },
            Event::End(end) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without an open element".to_string()))?;
                if end.name().as_ref() != element.name.as_bytes() {
                    return Err(malformed(format!(
                        "expected </{}>, found </{}>",
                        element.name,
                        String::from_utf8_lossy(end.name().as_ref())
                    )));
                }
                attach(element, &mut stack, &mut root)?;
            },
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| malformed(e.to_string()))?;
                push_text(&text, &mut stack)?;
            },
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata);
                push_text(&text, &mut stack)?;
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| malformed("document has no root element".to_string()))
}

/// Serialize `root` with two-space indentation.
///
/// Leaf text stays on the same line as its tags and keeps embedded newlines;
/// only `<`, `>` and `&` are escaped. Childless elements with no text are
/// written self-closing. Text on elements that also have children is dropped.
pub fn render(root: &XmlElement, prolog: Prolog) -> Result<String, CodecError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    if prolog == Prolog::Include {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_error)?;
    }
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(write_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), CodecError> {
    let name = element.name.as_str();
    if element.children.is_empty() && element.text.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(write_error);
    }

    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_error)?;
    if element.children.is_empty() {
        writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(&element.text))))
            .map_err(write_error)?;
    } else {
        for child in &element.children {
            write_element(writer, child)?;
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)
}

fn element_name(start: &BytesStart<'_>) -> Result<String, CodecError> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| malformed(format!("element name is not UTF-8: {e}")))
}

fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) -> Result<(), CodecError> {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("more than one root element".to_string())),
    }
    Ok(())
}

fn push_text(text: &str, stack: &mut [XmlElement]) -> Result<(), CodecError> {
    match stack.last_mut() {
        Some(open) => open.text.push_str(text),
        None if text.trim().is_empty() => {},
        None => return Err(malformed(format!("text outside the root element: '{}'", text.trim()))),
    }
    Ok(())
}

fn malformed(msg: String) -> CodecError {
    CodecError::MalformedDocument(msg)
}

fn write_error(e: impl std::fmt::Display) -> CodecError {
    CodecError::Write(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_text() {
        let doc = parse_document("<a>\n  <b>1</b>\n  <c/>\n  <b>two &amp; three</b>\n</a>").expect("parse ok");
        assert_eq!(doc.name, "a");
        assert_eq!(doc.children.len(), 3);
        let bs: Vec<&str> = doc.children_named("b").map(XmlElement::text).collect();
        assert_eq!(bs, vec!["1", "two & three"]);
        assert_eq!(doc.child_text("c"), Some(""));
        assert_eq!(doc.child("d"), None);
    }

    #[test]
    fn keeps_leaf_whitespace_and_newlines() {
        let doc = parse_document("<a><t>  first\n\nsecond </t></a>").expect("parse ok");
        assert_eq!(doc.child_text("t"), Some("  first\n\nsecond "));
    }

    #[test]
    fn cdata_counts_as_text() {
        let doc = parse_document("<a><t><![CDATA[x < y]]></t></a>").expect("parse ok");
        assert_eq!(doc.child_text("t"), Some("x < y"));
    }

    #[test]
    fn rejects_malformed_input() {
        for src in [
            "<a><b></a>",
            "<a><b>1</b>",
            "</a>",
            "",
            "   ",
            "<a/><b/>",
            "<a></a><b></b>",
            "stray<a/>",
            "<a>&bogus;</a>",
        ] {
            let err = parse_document(src).expect_err(src);
            assert!(matches!(err, CodecError::MalformedDocument(_)), "{src}: {err:?}");
        }
    }

    #[test]
    fn accepts_declaration_and_comments() {
        let src = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- note -->\n<a><b>1</b></a>\n";
        let doc = parse_document(src).expect("parse ok");
        assert_eq!(doc.child_text("b"), Some("1"));
    }

    #[test]
    fn renders_indented_with_inline_leaves() {
        let root = XmlElement::new("a")
            .with_child(XmlElement::leaf("b", "1"))
            .with_child(XmlElement::new("c"))
            .with_child(XmlElement::new("d").with_child(XmlElement::leaf("e", "x & <y>")));
        let out = render(&root, Prolog::Omit).expect("render ok");
        assert_eq!(
            out,
            "<a>\n  <b>1</b>\n  <c/>\n  <d>\n    <e>x &amp; &lt;y&gt;</e>\n  </d>\n</a>"
        );
    }

    #[test]
    fn prolog_is_written_first() {
        let out = render(&XmlElement::leaf("a", "it's"), Prolog::Include).expect("render ok");
        assert_eq!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a>it's</a>");
    }
}
