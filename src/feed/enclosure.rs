use quick_xml::events::BytesStart;

use super::writer::{push_attribute, push_escaped_attribute, render_fragment, WriteXml, XmlWriter};
use super::RssError;
use crate::util::{escape, validate_url};

/// A media object attached to an item.
///
/// URL, length and MIME type are all required by RSS 2.0, so they are all
/// constructor arguments and none can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enclosure {
    url: String,
    length: u64,
    mime_type: String,
}

impl Enclosure {
    /// Creates an enclosure, validating that `url` is an absolute URI.
    ///
    /// The URL is stored escaped.
    ///
    /// # Errors
    ///
    /// Returns [`RssError::InvalidUrl`] if `url` does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use feedwright::Enclosure;
    ///
    /// let enclosure = Enclosure::new("http://x.example/a.mp3", 1024, "audio/mpeg").unwrap();
    /// assert_eq!(enclosure.length(), 1024);
    ///
    /// assert!(Enclosure::new("a.mp3", 1024, "audio/mpeg").is_err());
    /// ```
    pub fn new(url: &str, length: u64, mime_type: impl Into<String>) -> Result<Self, RssError> {
        validate_url(url).map_err(|e| RssError::invalid_url(url, e))?;
        Ok(Self {
            url: escape(url).into_owned(),
            length,
            mime_type: mime_type.into(),
        })
    }

    /// The escaped URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Size of the media file in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn to_xml(&self) -> Result<String, RssError> {
        render_fragment(self)
    }
}

impl WriteXml for Enclosure {
    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), RssError> {
        let mut element = BytesStart::new("enclosure");
        push_escaped_attribute(&mut element, "url", &self.url);
        push_escaped_attribute(&mut element, "length", &self.length.to_string());
        push_attribute(&mut element, "type", &self.mime_type);
        writer.empty_element(element)
    }
}
