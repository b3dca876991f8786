use thiserror::Error;

use crate::util::{is_xml_name, UrlValidationError};

/// Errors that can occur while building or rendering a feed.
#[derive(Debug, Error)]
pub enum RssError {
    /// A required element (title, link or description) was empty at render time.
    #[error("{element} is missing required field `{field}`")]
    MissingRequiredField {
        element: &'static str,
        field: &'static str,
    },

    /// An enclosure or image URL is not a valid absolute URI.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: UrlValidationError,
    },

    /// A namespace prefix, extension tag or attribute name is not a valid
    /// XML name.
    #[error("{element} has invalid XML name {name:?}")]
    InvalidName { element: &'static str, name: String },

    /// The XML writer rejected an event.
    #[error("XML write error: {0}")]
    Xml(String),

    /// Writing the rendered document to disk failed.
    #[error("Failed to write feed: {0}")]
    Io(#[from] std::io::Error),
}

impl RssError {
    pub(crate) fn invalid_url(url: &str, source: UrlValidationError) -> Self {
        RssError::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}

/// Fails with [`RssError::InvalidName`] unless `name` is a valid XML name.
pub(crate) fn require_name(element: &'static str, name: &str) -> Result<(), RssError> {
    if !is_xml_name(name) {
        return Err(RssError::InvalidName {
            element,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Fails with [`RssError::MissingRequiredField`] when `value` is empty.
pub(crate) fn require(
    element: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), RssError> {
    if value.is_empty() {
        return Err(RssError::MissingRequiredField { element, field });
    }
    Ok(())
}
