use std::collections::BTreeMap;
use std::fmt;

use quick_xml::events::BytesStart;

use super::error::require_name;
use super::writer::{push_attribute, render_fragment, WriteXml, XmlWriter};
use super::RssError;
use crate::util::{escape, is_xml_name};

/// An element from a foreign namespace such as Atom or iTunes.
///
/// The owning [`Channel`](super::Channel) must declare the prefix with
/// [`Channel::add_namespace`](super::Channel::add_namespace). Attributes are
/// kept sorted by name so output is deterministic.
///
/// Prefix, tag and attribute names are checked when the tag is rendered;
/// an invalid name fails the render with [`RssError::InvalidName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTag {
    prefix: String,
    tag: String,
    value: String,
    attributes: BTreeMap<String, String>,
}

impl ExtensionTag {
    pub fn new(prefix: impl Into<String>, tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            tag: tag.into(),
            value: value.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute, returning the tag for chaining.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.attributes
    }

    /// `prefix:tag`
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.prefix, self.tag)
    }

    /// Checks that the prefix, tag and attribute names are valid XML names.
    ///
    /// Attribute names may carry one prefix (`xml:lang`).
    pub fn validate(&self) -> Result<(), RssError> {
        require_name("extension prefix", &self.prefix)?;
        require_name("extension tag", &self.tag)?;
        for key in self.attributes.keys() {
            let valid = match key.split_once(':') {
                Some((prefix, local)) => is_xml_name(prefix) && is_xml_name(local),
                None => is_xml_name(key),
            };
            if !valid {
                return Err(RssError::InvalidName {
                    element: "extension attribute",
                    name: key.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn to_xml(&self) -> Result<String, RssError> {
        render_fragment(self)
    }
}

impl WriteXml for ExtensionTag {
    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), RssError> {
        self.validate()?;
        let name = self.qualified_name();
        let mut element = BytesStart::new(name.as_str());
        for (key, value) in &self.attributes {
            push_attribute(&mut element, key, value);
        }
        writer.start(element)?;
        writer.escaped_text(&escape(&self.value))?;
        writer.end_tag(&name)
    }
}

impl fmt::Display for ExtensionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}
