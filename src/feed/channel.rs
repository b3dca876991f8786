use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc, Weekday};
use quick_xml::events::BytesStart;

use super::error::{require, require_name};
use super::writer::{push_attribute, RenderOptions, WriteXml, XmlWriter};
use super::{Category, ExtensionTag, Image, Item, RssError};
use crate::util::{escape, format_rfc1123, weekday_name};

/// Where the RSS 2.0 specification lives; written into `<docs>`.
pub const RSS_DOCS_URL: &str = "http://cyber.law.harvard.edu/rss/rss.html";

/// Content type an HTTP layer should send with the rendered document.
pub const CONTENT_TYPE: &str = "text/xml";

/// Hours in a day; skip hours must be below this.
const HOURS_PER_DAY: u8 = 24;

/// Name and version of the software that produced a feed.
///
/// Defaults to this crate's package name and version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    pub name: String,
    pub version: String,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// The root of an RSS 2.0 document.
///
/// A channel owns its items, categories, extensions and image. Required
/// fields are checked when the channel is rendered, so a channel can be
/// built up in steps and only needs to be complete when
/// [`to_xml`](Channel::to_xml) is called.
///
/// # Example
///
/// ```
/// use feedwright::{Channel, Item};
///
/// let mut channel = Channel::new("My Feed", "http://example.com", "Desc", Vec::new());
/// channel.add(Item::new("Hello", "http://example.com/hello", "First post"));
///
/// let xml = channel.to_xml().unwrap();
/// assert!(xml.starts_with(r#"<?xml version="1.0"?><rss version="2.0">"#));
/// assert!(xml.contains("<item>"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    title: String,
    link: String,
    description: String,
    language: Option<String>,
    copyright: Option<String>,
    managing_editor_email: Option<String>,
    managing_editor_name: Option<String>,
    web_master_email: Option<String>,
    web_master_name: Option<String>,
    pub_date: Option<DateTime<Utc>>,
    last_build_date: Option<DateTime<Utc>>,
    ttl: Option<u32>,
    image: Option<Image>,
    skip_hours: Vec<u8>,
    skip_days: Vec<Weekday>,
    items: Vec<Item>,
    categories: Vec<Category>,
    namespaces: BTreeMap<String, String>,
    extensions: Vec<ExtensionTag>,
    generator: String,
}

impl Channel {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
        items: impl IntoIterator<Item = Item>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            language: None,
            copyright: None,
            managing_editor_email: None,
            managing_editor_name: None,
            web_master_email: None,
            web_master_name: None,
            pub_date: None,
            last_build_date: None,
            ttl: None,
            image: None,
            skip_hours: Vec::new(),
            skip_days: Vec::new(),
            items: items.into_iter().collect(),
            categories: Vec::new(),
            namespaces: BTreeMap::new(),
            extensions: Vec::new(),
            generator: Generator::default().to_string(),
        }
    }

    /// Replaces the `<generator>` text.
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    /// The stored copyright notice, already escaped.
    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// Sets the copyright notice.
    ///
    /// The text is escaped and every `©` becomes `&#169;`.
    ///
    /// ```
    /// use feedwright::Channel;
    ///
    /// let mut channel = Channel::new("T", "http://example.com", "D", Vec::new());
    /// channel.set_copyright("© 2024 Fish & Co");
    /// assert_eq!(channel.copyright(), Some("&#169; 2024 Fish &amp; Co"));
    /// ```
    pub fn set_copyright(&mut self, copyright: &str) {
        self.copyright = Some(escape(copyright).replace('©', "&#169;"));
    }

    pub fn managing_editor_email(&self) -> Option<&str> {
        self.managing_editor_email.as_deref()
    }

    pub fn set_managing_editor_email(&mut self, email: impl Into<String>) {
        self.managing_editor_email = Some(email.into());
    }

    pub fn managing_editor_name(&self) -> Option<&str> {
        self.managing_editor_name.as_deref()
    }

    pub fn set_managing_editor_name(&mut self, name: impl Into<String>) {
        self.managing_editor_name = Some(name.into());
    }

    pub fn web_master_email(&self) -> Option<&str> {
        self.web_master_email.as_deref()
    }

    pub fn set_web_master_email(&mut self, email: impl Into<String>) {
        self.web_master_email = Some(email.into());
    }

    pub fn web_master_name(&self) -> Option<&str> {
        self.web_master_name.as_deref()
    }

    pub fn set_web_master_name(&mut self, name: impl Into<String>) {
        self.web_master_name = Some(name.into());
    }

    pub fn pub_date(&self) -> Option<&DateTime<Utc>> {
        self.pub_date.as_ref()
    }

    pub fn set_pub_date<Tz: TimeZone>(&mut self, date: DateTime<Tz>) {
        self.pub_date = Some(date.with_timezone(&Utc));
    }

    pub fn last_build_date(&self) -> Option<&DateTime<Utc>> {
        self.last_build_date.as_ref()
    }

    pub fn set_last_build_date<Tz: TimeZone>(&mut self, date: DateTime<Tz>) {
        self.last_build_date = Some(date.with_timezone(&Utc));
    }

    /// Minutes the channel may be cached before refreshing.
    pub fn ttl(&self) -> Option<u32> {
        self.ttl
    }

    pub fn set_ttl(&mut self, minutes: u32) {
        self.ttl = Some(minutes);
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Image) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    // ------------------------------------------------------------------
    // Skip hours and days
    // ------------------------------------------------------------------

    pub fn skip_hours(&self) -> &[u8] {
        &self.skip_hours
    }

    /// Adds an hour (0-23) aggregators may skip. Out-of-range and repeated
    /// hours are ignored.
    pub fn add_skip_hour(&mut self, hour: u8) {
        if hour >= HOURS_PER_DAY {
            tracing::trace!(hour, "Ignoring out-of-range skip hour");
            return;
        }
        if self.skip_hours.contains(&hour) {
            tracing::trace!(hour, "Ignoring duplicate skip hour");
            return;
        }
        self.skip_hours.push(hour);
    }

    pub fn add_skip_hours(&mut self, hours: impl IntoIterator<Item = u8>) {
        for hour in hours {
            self.add_skip_hour(hour);
        }
    }

    pub fn clear_skip_hours(&mut self) {
        self.skip_hours.clear();
    }

    pub fn skip_days(&self) -> &[Weekday] {
        &self.skip_days
    }

    /// Adds a weekday aggregators may skip. Repeated days are ignored.
    pub fn add_skip_day(&mut self, day: Weekday) {
        if self.skip_days.contains(&day) {
            tracing::trace!(day = %day, "Ignoring duplicate skip day");
            return;
        }
        self.skip_days.push(day);
    }

    pub fn add_skip_days(&mut self, days: impl IntoIterator<Item = Weekday>) {
        for day in days {
            self.add_skip_day(day);
        }
    }

    pub fn clear_skip_days(&mut self) {
        self.skip_days.clear();
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_range(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // ------------------------------------------------------------------
    // Categories, namespaces and extensions
    // ------------------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut Vec<Category> {
        &mut self.categories
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Declared namespaces, prefix to URI.
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    pub fn namespaces_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.namespaces
    }

    /// Declares `xmlns:prefix="uri"` on the `<rss>` element.
    ///
    /// The prefix must be a valid XML name; an invalid one fails the render
    /// with [`RssError::InvalidName`].
    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.namespaces.insert(prefix.into(), uri.into());
    }

    pub fn extensions(&self) -> &[ExtensionTag] {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Vec<ExtensionTag> {
        &mut self.extensions
    }

    pub fn add_extension(&mut self, extension: ExtensionTag) {
        self.extensions.push(extension);
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Checks the channel's required fields, namespace prefixes, extension
    /// names and every item.
    pub fn validate(&self) -> Result<(), RssError> {
        require("channel", "title", &self.title)?;
        require("channel", "link", &self.link)?;
        require("channel", "description", &self.description)?;
        for prefix in self.namespaces.keys() {
            require_name("namespace prefix", prefix)?;
        }
        self.extensions.iter().try_for_each(ExtensionTag::validate)?;
        self.items.iter().try_for_each(Item::validate)
    }

    /// Renders the complete RSS 2.0 document in compact form.
    ///
    /// # Errors
    ///
    /// Returns [`RssError::MissingRequiredField`] if the channel or any of
    /// its items lacks a title, link or description. Nothing is returned
    /// in that case; there is no partial output.
    pub fn to_xml(&self) -> Result<String, RssError> {
        self.to_xml_with(&RenderOptions::compact())
    }

    /// Renders the complete RSS 2.0 document with the given formatting.
    pub fn to_xml_with(&self, options: &RenderOptions) -> Result<String, RssError> {
        self.validate()?;

        let mut writer = XmlWriter::new(options);
        writer.declaration()?;

        let mut rss = BytesStart::new("rss");
        push_attribute(&mut rss, "version", "2.0");
        for (prefix, uri) in &self.namespaces {
            push_attribute(&mut rss, &format!("xmlns:{}", prefix), uri);
        }
        writer.start(rss)?;
        writer.start_tag("channel")?;

        self.write_header(&mut writer)?;
        for item in &self.items {
            item.write_xml(&mut writer)?;
        }

        writer.end_tag("channel")?;
        writer.end_tag("rss")?;

        let xml = writer.finish()?;
        tracing::debug!(
            items = self.items.len(),
            bytes = xml.len(),
            "Rendered RSS channel"
        );
        Ok(xml)
    }

    fn write_header(&self, writer: &mut XmlWriter) -> Result<(), RssError> {
        writer.text_element("title", &self.title)?;
        writer.cdata_element("link", &self.link)?;
        writer.cdata_element("description", &self.description)?;

        if let Some(ref language) = self.language {
            writer.text_element("language", language)?;
        }
        if let Some(ref copyright) = self.copyright {
            writer.escaped_text_element("copyright", copyright)?;
        }
        if let Some(ref email) = self.managing_editor_email {
            let editor = contact(email, self.managing_editor_name.as_deref());
            writer.text_element("managingEditor", &editor)?;
        }
        if let Some(ref email) = self.web_master_email {
            let web_master = contact(email, self.web_master_name.as_deref());
            writer.text_element("webMaster", &web_master)?;
        }
        if let Some(ref date) = self.pub_date {
            writer.text_element("pubDate", &format_rfc1123(date))?;
        }
        if let Some(ref date) = self.last_build_date {
            writer.text_element("lastBuildDate", &format_rfc1123(date))?;
        }
        for category in &self.categories {
            category.write_xml(writer)?;
        }

        writer.text_element("generator", &self.generator)?;
        writer.text_element("docs", RSS_DOCS_URL)?;
        if let Some(ttl) = self.ttl {
            writer.text_element("ttl", &ttl.to_string())?;
        }
        if let Some(ref image) = self.image {
            image.write_xml(writer, &self.title, &self.link)?;
        }
        self.write_skip_blocks(writer)?;

        for extension in &self.extensions {
            extension.write_xml(writer)?;
        }
        Ok(())
    }

    fn write_skip_blocks(&self, writer: &mut XmlWriter) -> Result<(), RssError> {
        if !self.skip_hours.is_empty() {
            writer.start_tag("skipHours")?;
            for hour in &self.skip_hours {
                writer.text_element("hour", &hour.to_string())?;
            }
            writer.end_tag("skipHours")?;
        }
        if !self.skip_days.is_empty() {
            writer.start_tag("skipDays")?;
            for day in &self.skip_days {
                writer.text_element("day", weekday_name(*day))?;
            }
            writer.end_tag("skipDays")?;
        }
        Ok(())
    }

    /// Renders the document and writes it to `path` atomically.
    ///
    /// The document is written to a temporary file in the same directory,
    /// synced to disk, then renamed over `path`, so the destination is
    /// never left in a partial state.
    pub fn write_to_file(&self, path: &Path, options: &RenderOptions) -> Result<(), RssError> {
        use std::io::Write;
        use std::time::{SystemTime, UNIX_EPOCH};

        let content = self.to_xml_with(options)?;

        let random_suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)?;

        let written = file
            .write_all(content.as_bytes())
            .and_then(|()| file.sync_all());
        drop(file);

        if let Err(e) = written.and_then(|()| std::fs::rename(&temp_path, path)) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), "Wrote RSS feed");
        Ok(())
    }
}

/// Renders the compact document; fails if the channel does not validate.
impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

/// `email (name)`, with empty parentheses when the name is unset.
fn contact(email: &str, name: Option<&str>) -> String {
    format!("{} ({})", email, name.unwrap_or(""))
}
