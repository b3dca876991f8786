use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    /// The input was empty or whitespace only.
    #[error("URL is empty")]
    Empty,
    /// The URL string could not be parsed as an absolute URI.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Validates that a string is a syntactically valid absolute URI.
///
/// Relative references (`/media/a.mp3`, `a.mp3`) are rejected because feed
/// readers resolve enclosure and image URLs without a base document.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input and
/// [`UrlValidationError::InvalidUrl`] when parsing fails.
///
/// # Examples
///
/// ```
/// use feedwright::util::validate_url;
///
/// let url = validate_url("https://example.com/podcast/ep1.mp3").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_url("/podcast/ep1.mp3").is_err());
/// assert!(validate_url("").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    if url_str.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }
    Ok(Url::parse(url_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(validate_url("https://example.com/feed.xml").is_ok());
        assert!(validate_url("http://news.example.org").is_ok());
        assert!(validate_url("ftp://files.example.org/a.mp3").is_ok());
    }

    #[test]
    fn test_url_with_query_accepted() {
        let url = validate_url("http://example.com/media?id=1&format=mp3").unwrap();
        assert_eq!(url.query(), Some("id=1&format=mp3"));
    }

    #[test]
    fn test_relative_url_rejected() {
        let result = validate_url("media/episode.mp3");
        assert!(matches!(
            result,
            Err(UrlValidationError::InvalidUrl(
                url::ParseError::RelativeUrlWithoutBase
            ))
        ));
    }

    #[test]
    fn test_empty_url_rejected() {
        assert_eq!(validate_url(""), Err(UrlValidationError::Empty));
        assert_eq!(validate_url("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_missing_host_rejected() {
        assert!(validate_url("http://").is_err());
    }

    #[test]
    fn test_error_message_mentions_url() {
        let err = validate_url("not a url").unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }
}
