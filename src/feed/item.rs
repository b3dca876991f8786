use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use quick_xml::events::BytesStart;

use super::error::require;
use super::writer::{push_escaped_attribute, render_fragment, WriteXml, XmlWriter};
use super::{Category, Enclosure, ExtensionTag, RssError};
use crate::util::format_rfc1123;

/// One entry in a channel.
///
/// Title, link and description are fixed at construction and checked when
/// the item is rendered; everything else is optional. Rendering never
/// mutates the item: when no GUID is set, the link is used for that render
/// only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    title: String,
    link: String,
    description: String,
    author_email: Option<String>,
    author_name: Option<String>,
    categories: Vec<Category>,
    comments: Option<String>,
    enclosure: Option<Enclosure>,
    pub_date: Option<DateTime<Utc>>,
    guid: Option<String>,
    guid_is_permalink: bool,
    extensions: Vec<ExtensionTag>,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            author_email: None,
            author_name: None,
            categories: Vec::new(),
            comments: None,
            enclosure: None,
            pub_date: None,
            guid: None,
            guid_is_permalink: false,
            extensions: Vec::new(),
        }
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

    pub fn author_email(&self) -> Option<&str> {
        self.author_email.as_deref()
    }

    /// Email of the author. `<author>` is only written when this is set.
    pub fn set_author_email(&mut self, email: impl Into<String>) {
        self.author_email = Some(email.into());
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author_name.as_deref()
    }

    pub fn set_author_name(&mut self, name: impl Into<String>) {
        self.author_name = Some(name.into());
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut Vec<Category> {
        &mut self.categories
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// URL of a page for comments relating to the item.
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn set_comments(&mut self, url: impl Into<String>) {
        self.comments = Some(url.into());
    }

    pub fn enclosure(&self) -> Option<&Enclosure> {
        self.enclosure.as_ref()
    }

    pub fn set_enclosure(&mut self, enclosure: Enclosure) {
        self.enclosure = Some(enclosure);
    }

    pub fn clear_enclosure(&mut self) {
        self.enclosure = None;
    }

    pub fn pub_date(&self) -> Option<&DateTime<Utc>> {
        self.pub_date.as_ref()
    }

    /// Publication date; converted to UTC and rendered as GMT.
    pub fn set_pub_date<Tz: TimeZone>(&mut self, date: DateTime<Tz>) {
        self.pub_date = Some(date.with_timezone(&Utc));
    }

    /// The explicitly assigned GUID, if any.
    pub fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }

    pub fn set_guid(&mut self, guid: impl Into<String>) {
        self.guid = Some(guid.into());
    }

    /// The GUID that will be rendered: the assigned GUID or the link.
    pub fn effective_guid(&self) -> &str {
        self.guid.as_deref().unwrap_or(&self.link)
    }

    pub fn guid_is_permalink(&self) -> bool {
        self.guid_is_permalink
    }

    pub fn set_guid_is_permalink(&mut self, permalink: bool) {
        self.guid_is_permalink = permalink;
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

    /// Checks the required fields and extension names without rendering.
    pub fn validate(&self) -> Result<(), RssError> {
        require("item", "title", &self.title)?;
        require("item", "link", &self.link)?;
        require("item", "description", &self.description)?;
        self.extensions.iter().try_for_each(ExtensionTag::validate)
    }

    /// Renders this item as an `<item>` fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RssError::MissingRequiredField`] when title, link or
    /// description is empty.
    pub fn to_xml(&self) -> Result<String, RssError> {
        render_fragment(self)
    }
}

impl WriteXml for Item {
    fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), RssError> {
        self.validate()?;

        writer.start_tag("item")?;
        writer.cdata_element("title", &self.title)?;
        writer.cdata_element("link", &self.link)?;
        writer.cdata_element("description", &self.description)?;

        if let Some(ref email) = self.author_email {
            let author = format!("{} ({})", email, self.author_name.as_deref().unwrap_or(""));
            writer.text_element("author", &author)?;
        }
        for category in &self.categories {
            category.write_xml(writer)?;
        }
        if let Some(ref comments) = self.comments {
            writer.cdata_element("comments", comments)?;
        }
        if let Some(ref enclosure) = self.enclosure {
            enclosure.write_xml(writer)?;
        }
        if let Some(ref date) = self.pub_date {
            writer.text_element("pubDate", &format_rfc1123(date))?;
        }

        let mut guid = BytesStart::new("guid");
        let permalink = if self.guid_is_permalink { "true" } else { "false" };
        push_escaped_attribute(&mut guid, "isPermaLink", permalink);
        writer.start(guid)?;
        writer.cdata(self.effective_guid())?;
        writer.end_tag("guid")?;

        for extension in &self.extensions {
            extension.write_xml(writer)?;
        }
        writer.end_tag("item")
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_minimal_item() {
        let item = Item::new("Hello", "http://example.com/1", "First post");
        assert_eq!(
            item.to_xml().unwrap(),
            "<item>\
             <title><![CDATA[Hello]]></title>\
             <link><![CDATA[http://example.com/1]]></link>\
             <description><![CDATA[First post]]></description>\
             <guid isPermaLink=\"false\"><![CDATA[http://example.com/1]]></guid>\
             </item>"
        );
    }

    #[test]
    fn test_ampersand_passes_through_cdata() {
        let item = Item::new("A&B", "http://x", "desc");
        assert!(item
            .to_xml()
            .unwrap()
            .contains("<title><![CDATA[A&B]]></title>"));
    }

    #[test]
    fn test_guid_defaults_to_link_without_mutation() {
        let item = Item::new("T", "http://example.com/post", "D");
        let first = item.to_xml().unwrap();
        assert!(first.contains(
            r#"<guid isPermaLink="false"><![CDATA[http://example.com/post]]></guid>"#
        ));
        assert_eq!(item.guid(), None);
        assert_eq!(item.effective_guid(), "http://example.com/post");
        assert_eq!(item.to_xml().unwrap(), first);
    }

    #[test]
    fn test_explicit_permalink_guid() {
        let mut item = Item::new("T", "http://example.com/post", "D");
        item.set_guid("http://example.com/p/42");
        item.set_guid_is_permalink(true);
        assert!(item
            .to_xml()
            .unwrap()
            .contains(r#"<guid isPermaLink="true"><![CDATA[http://example.com/p/42]]></guid>"#));
    }

    #[test]
    fn test_full_item_element_order() {
        let mut item = Item::new("Episode 1", "http://example.com/ep1", "<p>Pilot</p>");
        item.set_author_email("jane@example.com");
        item.set_author_name("Jane");
        item.add_category(Category::new("Audio"));
        item.add_category(Category::with_domain("Talk", "http://example.com/genres"));
        item.set_comments("http://example.com/ep1#comments");
        item.set_enclosure(Enclosure::new("http://x.example/a.mp3", 1024, "audio/mpeg").unwrap());
        item.set_pub_date(Utc.with_ymd_and_hms(2002, 9, 7, 0, 0, 1).unwrap());
        item.add_extension(ExtensionTag::new("itunes", "duration", "00:42:00"));

        assert_eq!(
            item.to_xml().unwrap(),
            "<item>\
             <title><![CDATA[Episode 1]]></title>\
             <link><![CDATA[http://example.com/ep1]]></link>\
             <description><![CDATA[<p>Pilot</p>]]></description>\
             <author>jane@example.com (Jane)</author>\
             <category>Audio</category>\
             <category domain=\"http://example.com/genres\">Talk</category>\
             <comments><![CDATA[http://example.com/ep1#comments]]></comments>\
             <enclosure url=\"http://x.example/a.mp3\" length=\"1024\" type=\"audio/mpeg\" />\
             <pubDate>Sat, 07 Sep 2002 00:00:01 GMT</pubDate>\
             <guid isPermaLink=\"false\"><![CDATA[http://example.com/ep1]]></guid>\
             <itunes:duration>00:42:00</itunes:duration>\
             </item>"
        );
    }

    #[test]
    fn test_author_without_name_has_empty_parens() {
        let mut item = Item::new("T", "http://example.com", "D");
        item.set_author_email("jane@example.com");
        assert!(item
            .to_xml()
            .unwrap()
            .contains("<author>jane@example.com ()</author>"));
    }

    #[test]
    fn test_author_name_ignored_without_email() {
        let mut item = Item::new("T", "http://example.com", "D");
        item.set_author_name("Jane");
        assert!(!item.to_xml().unwrap().contains("<author>"));
    }

    #[test]
    fn test_pub_date_converted_to_gmt() {
        let mut item = Item::new("T", "http://example.com", "D");
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        item.set_pub_date(offset.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap());
        assert!(item
            .to_xml()
            .unwrap()
            .contains("<pubDate>Sat, 02 Mar 2024 01:00:00 GMT</pubDate>"));
    }

    #[test]
    fn test_description_with_cdata_terminator() {
        let item = Item::new("T", "http://example.com", "x]]>y");
        assert!(item
            .to_xml()
            .unwrap()
            .contains("<description><![CDATA[x]]]]><![CDATA[>y]]></description>"));
    }

    #[test]
    fn test_missing_required_fields() {
        let err = Item::new("", "http://example.com", "D").to_xml().unwrap_err();
        assert!(matches!(
            err,
            RssError::MissingRequiredField {
                element: "item",
                field: "title"
            }
        ));

        let err = Item::new("T", "", "D").to_xml().unwrap_err();
        assert!(matches!(
            err,
            RssError::MissingRequiredField { field: "link", .. }
        ));

        let err = Item::new("T", "http://example.com", "").to_xml().unwrap_err();
        assert_eq!(err.to_string(), "item is missing required field `description`");
    }

    #[test]
    fn test_display_matches_to_xml() {
        let item = Item::new("Hello", "http://example.com/1", "First post");
        assert_eq!(item.to_string(), item.to_xml().unwrap());
    }

    #[test]
    fn test_invalid_extension_name_fails_render() {
        let mut item = Item::new("T", "http://example.com", "D");
        item.add_extension(ExtensionTag::new("itunes", "episode type", "full"));
        assert!(matches!(
            item.to_xml(),
            Err(RssError::InvalidName {
                element: "extension tag",
                ..
            })
        ));
    }

    #[test]
    fn test_clear_enclosure() {
        let mut item = Item::new("T", "http://example.com", "D");
        item.set_enclosure(Enclosure::new("http://x.example/a.mp3", 1, "audio/mpeg").unwrap());
        item.clear_enclosure();
        assert!(item.enclosure().is_none());
        assert!(!item.to_xml().unwrap().contains("<enclosure"));
    }
}
