use super::writer::XmlWriter;
use super::RssError;
use crate::util::validate_url;

/// Default image width and height in pixels.
pub const DEFAULT_IMAGE_SIZE: u32 = 88;
/// Maximum image width and height allowed by RSS 2.0.
pub const MAX_IMAGE_SIZE: u32 = 144;

/// A GIF, JPEG or PNG image displayed with the channel.
///
/// Title and link fall back to the channel's title and link when the
/// channel is rendered. Width and height are clamped to
/// [`MAX_IMAGE_SIZE`] on assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    url: String,
    title: Option<String>,
    link: Option<String>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates an image with default dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`RssError::InvalidUrl`] if `url` is not an absolute URI.
    pub fn new(url: &str) -> Result<Self, RssError> {
        validate_url(url).map_err(|e| RssError::invalid_url(url, e))?;
        Ok(Self {
            url: url.to_string(),
            title: None,
            link: None,
            width: DEFAULT_IMAGE_SIZE,
            height: DEFAULT_IMAGE_SIZE,
        })
    }

    /// Creates an image with an explicit title and link and default
    /// dimensions.
    pub fn with_details(
        url: &str,
        title: impl Into<String>,
        link: impl Into<String>,
    ) -> Result<Self, RssError> {
        let mut image = Self::new(url)?;
        image.set_title(title);
        image.set_link(link);
        Ok(image)
    }

    /// Creates a fully specified image. Width and height are clamped like
    /// [`set_width`](Image::set_width) and [`set_height`](Image::set_height).
    ///
    /// ```
    /// use feedwright::Image;
    ///
    /// let image = Image::with_dimensions(
    ///     "http://example.com/logo.png",
    ///     "Logo",
    ///     "http://example.com",
    ///     300,
    ///     31,
    /// )
    /// .unwrap();
    /// assert_eq!((image.width(), image.height()), (144, 31));
    /// ```
    pub fn with_dimensions(
        url: &str,
        title: impl Into<String>,
        link: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Result<Self, RssError> {
        let mut image = Self::with_details(url, title, link)?;
        image.set_width(width);
        image.set_height(height);
        Ok(image)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = Some(link.into());
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.min(MAX_IMAGE_SIZE);
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height.min(MAX_IMAGE_SIZE);
    }

    /// Writes `<image>`, substituting the channel title and link for unset
    /// fields.
    pub(crate) fn write_xml(
        &self,
        writer: &mut XmlWriter,
        channel_title: &str,
        channel_link: &str,
    ) -> Result<(), RssError> {
        writer.start_tag("image")?;
        writer.cdata_element("url", &self.url)?;
        writer.text_element("title", self.title.as_deref().unwrap_or(channel_title))?;
        writer.cdata_element("link", self.link.as_deref().unwrap_or(channel_link))?;
        writer.text_element("height", &self.height.to_string())?;
        writer.text_element("width", &self.width.to_string())?;
        writer.end_tag("image")
    }
}
