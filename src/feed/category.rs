use std::fmt;

use quick_xml::events::BytesStart;

use super::writer::{push_escaped_attribute, render_fragment, WriteXml, XmlWriter};
use super::RssError;
use crate::util::escape;

/// A taxonomy classification attached to a channel or an item.
///
/// The domain is a forward-slash-separated path identifying a location in
/// the indicated taxonomy, e.g. `http://www.fool.com/cusips`. It is escaped
/// when assigned and written verbatim at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    text: String,
    domain: Option<String>,
}

impl Category {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            domain: None,
        }
    }

    pub fn with_domain(text: impl Into<String>, domain: &str) -> Self {
        let mut category = Self::new(text);
        category.set_domain(domain);
        category
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The escaped domain, if one was set.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_domain(&mut self, domain: &str) {
        self.domain = Some(escape(domain).into_owned());
    }

    pub fn clear_domain(&mut self) {
        self.domain = None;
    }

    /// Renders `<category>` as a standalone fragment.
    pub fn to_xml(&self) -> Result<String, RssError> {
        render_fragment(self)
    }
}

impl WriteXml for Category {
    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), RssError> {
        let mut element = BytesStart::new("category");
        if let Some(ref domain) = self.domain {
            push_escaped_attribute(&mut element, "domain", domain);
        }
        writer.start(element)?;
        writer.escaped_text(&escape(&self.text))?;
        writer.end_tag("category")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}
