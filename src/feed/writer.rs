//! Thin wrapper over [`quick_xml::Writer`] that every feed entity renders
//! through.
//!
//! Text nodes and attribute values are escaped with [`crate::util::escape`]
//! before they reach quick-xml, so the writer never applies a second round
//! of escaping to values that were escaped on assignment.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::RssError;
use crate::util::{cdata_sections, escape};

/// Output formatting for rendered documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level. `None` (or `Some(0)`) renders compact output.
    pub indent: Option<usize>,
}

impl RenderOptions {
    /// Compact output with no whitespace between elements.
    pub fn compact() -> Self {
        Self { indent: None }
    }

    /// Indented output using `width` spaces per level.
    pub fn pretty(width: usize) -> Self {
        Self {
            indent: Some(width),
        }
    }
}

/// An entity that can write itself as an XML fragment.
pub trait WriteXml {
    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), RssError>;
}

/// Renders a single entity to a compact XML fragment.
pub(crate) fn render_fragment<T: WriteXml + ?Sized>(value: &T) -> Result<String, RssError> {
    let mut writer = XmlWriter::new(&RenderOptions::compact());
    value.write_xml(&mut writer)?;
    writer.finish()
}

/// In-memory XML writer used by the feed serializer.
pub struct XmlWriter {
    inner: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new(options: &RenderOptions) -> Self {
        let buffer = Cursor::new(Vec::new());
        let inner = match options.indent {
            Some(width) if width > 0 => Writer::new_with_indent(buffer, b' ', width),
            _ => Writer::new(buffer),
        };
        Self { inner }
    }

    /// `<?xml version="1.0"?>`
    pub fn declaration(&mut self) -> Result<(), RssError> {
        self.event(Event::Decl(BytesDecl::new("1.0", None, None)))
    }

    pub fn start(&mut self, element: BytesStart<'_>) -> Result<(), RssError> {
        self.event(Event::Start(element))
    }

    pub fn start_tag(&mut self, name: &str) -> Result<(), RssError> {
        self.start(BytesStart::new(name))
    }

    pub fn end_tag(&mut self, name: &str) -> Result<(), RssError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// Writes text that is already escaped.
    pub fn escaped_text(&mut self, escaped: &str) -> Result<(), RssError> {
        self.event(Event::Text(BytesText::from_escaped(escaped)))
    }

    /// Writes text as one or more CDATA sections.
    pub fn cdata(&mut self, text: &str) -> Result<(), RssError> {
        for section in cdata_sections(text) {
            self.event(Event::CData(BytesCData::new(section)))?;
        }
        Ok(())
    }

    /// `<name>text</name>`, escaping `text`.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<(), RssError> {
        self.escaped_text_element(name, &escape(text))
    }

    /// `<name>text</name>` for text that was escaped on assignment.
    pub fn escaped_text_element(&mut self, name: &str, escaped: &str) -> Result<(), RssError> {
        self.start_tag(name)?;
        self.escaped_text(escaped)?;
        self.end_tag(name)
    }

    /// `<name><![CDATA[text]]></name>`
    pub fn cdata_element(&mut self, name: &str, text: &str) -> Result<(), RssError> {
        self.start_tag(name)?;
        self.cdata(text)?;
        self.end_tag(name)
    }

    /// Self-closing element written as `<name attrs />`.
    ///
    /// quick-xml emits `<name attrs/>`; RSS tooling commonly matches the
    /// spaced form for `<enclosure>`.
    pub fn empty_element(&mut self, element: BytesStart<'_>) -> Result<(), RssError> {
        self.inner.write_indent().map_err(xml_error)?;
        let out = self.inner.get_mut();
        out.write_all(b"<")?;
        out.write_all(&element)?;
        out.write_all(b" />")?;
        Ok(())
    }

    /// Consumes the writer and returns the document text.
    pub fn finish(self) -> Result<String, RssError> {
        let bytes = self.inner.into_inner().into_inner();
        String::from_utf8(bytes).map_err(xml_error)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), RssError> {
        self.inner.write_event(event).map_err(xml_error)
    }
}

/// Adds `key="value"`, escaping the value.
pub fn push_attribute(element: &mut BytesStart<'_>, key: &str, value: &str) {
    push_escaped_attribute(element, key, &escape(value));
}

/// Adds `key="value"` for a value that is already escaped.
pub fn push_escaped_attribute(element: &mut BytesStart<'_>, key: &str, escaped: &str) {
    element.push_attribute((key.as_bytes(), escaped.as_bytes()));
}

fn xml_error(err: impl std::fmt::Display) -> RssError {
    RssError::Xml(err.to_string())
}
