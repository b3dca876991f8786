//! TOML feed definitions.
//!
//! A manifest describes a channel and its items in TOML. It is read by the
//! `feedwright` binary and converted into a [`Channel`] with
//! [`FeedManifest::into_channel`].
//!
//! Dates are RFC 3339 strings (`pub_date = "2024-01-15T09:00:00Z"`).
//! Required text fields default to empty so that a manifest missing a title
//! still loads and is reported by the renderer as a missing field.
//!
//! ```
//! use feedwright::config::Config;
//! use feedwright::manifest::FeedManifest;
//!
//! let manifest = FeedManifest::from_toml_str(r#"
//! [channel]
//! title = "My Feed"
//! link = "http://example.com"
//! description = "Desc"
//!
//! [[items]]
//! title = "Hello"
//! link = "http://example.com/hello"
//! description = "First post"
//! "#).unwrap();
//!
//! let channel = manifest.into_channel(&Config::default()).unwrap();
//! assert_eq!(channel.items().len(), 1);
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc, Weekday};
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::feed::{Category, Channel, Enclosure, ExtensionTag, Image, Item, RssError};

/// Errors that can occur while loading or converting a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in manifest: {0}")]
    Parse(#[from] toml::de::Error),

    /// Manifest file exceeds maximum allowed size.
    #[error("Manifest too large: {0}")]
    TooLarge(String),

    /// A `skip_days` entry is not a weekday name.
    #[error("Invalid weekday in skip_days: {0:?}")]
    InvalidWeekday(String),

    /// A URL or other value was rejected by the feed model.
    #[error(transparent)]
    Feed(#[from] RssError),
}

/// Top-level manifest document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedManifest {
    pub channel: ChannelSpec,

    /// Namespace prefix to URI, declared on the `<rss>` element.
    #[serde(default)]
    pub namespaces: BTreeMap<String, String>,

    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelSpec {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: Option<String>,
    pub copyright: Option<String>,
    pub managing_editor: Option<ContactSpec>,
    pub web_master: Option<ContactSpec>,
    pub pub_date: Option<DateTime<Utc>>,
    pub last_build_date: Option<DateTime<Utc>>,
    pub ttl: Option<u32>,
    pub image: Option<ImageSpec>,
    /// Any integer is accepted; values outside 0-23 are dropped.
    pub skip_hours: Vec<i64>,
    pub skip_days: Vec<String>,
    pub categories: Vec<CategorySpec>,
    pub extensions: Vec<ExtensionSpec>,
}

/// An email address with an optional display name.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSpec {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSpec {
    pub url: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategorySpec {
    pub text: String,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionSpec {
    pub prefix: String,
    pub tag: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnclosureSpec {
    pub url: String,
    pub length: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemSpec {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: Option<ContactSpec>,
    pub comments: Option<String>,
    pub guid: Option<String>,
    pub guid_is_permalink: bool,
    pub pub_date: Option<DateTime<Utc>>,
    pub enclosure: Option<EnclosureSpec>,
    pub categories: Vec<CategorySpec>,
    pub extensions: Vec<ExtensionSpec>,
}

impl FeedManifest {
    /// Maximum manifest size (16 MB).
    const MAX_FILE_SIZE: u64 = 16 * 1_048_576;

    /// Reads and parses a manifest file.
    ///
    /// Unlike the config file, a manifest is required: a missing file is an
    /// [`ManifestError::Io`] error.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(ManifestError::TooLarge(format!(
                "Manifest is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            items = manifest.items.len(),
            "Loaded feed manifest"
        );
        Ok(manifest)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds a [`Channel`], applying config defaults where the manifest is
    /// silent.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Feed`] for invalid enclosure or image URLs
    /// and [`ManifestError::InvalidWeekday`] for unknown `skip_days` names.
    /// Missing titles, links and descriptions are not checked here; they
    /// surface when the channel is rendered.
    pub fn into_channel(self, config: &Config) -> Result<Channel, ManifestError> {
        let items = self
            .items
            .into_iter()
            .map(ItemSpec::into_item)
            .collect::<Result<Vec<_>, _>>()?;

        let spec = self.channel;
        let mut channel = Channel::new(spec.title, spec.link, spec.description, items);
        if let Some(ref generator) = config.generator {
            channel = channel.with_generator(generator.as_str());
        }

        if let Some(language) = spec.language.or_else(|| config.default_language.clone()) {
            channel.set_language(language);
        }
        if let Some(ref copyright) = spec.copyright {
            channel.set_copyright(copyright);
        }
        if let Some(editor) = spec.managing_editor {
            channel.set_managing_editor_email(editor.email);
            if let Some(name) = editor.name {
                channel.set_managing_editor_name(name);
            }
        }
        if let Some(web_master) = spec.web_master {
            channel.set_web_master_email(web_master.email);
            if let Some(name) = web_master.name {
                channel.set_web_master_name(name);
            }
        }
        if let Some(date) = spec.pub_date {
            channel.set_pub_date(date);
        }
        if let Some(date) = spec.last_build_date {
            channel.set_last_build_date(date);
        }
        if let Some(ttl) = spec.ttl.or(config.default_ttl) {
            channel.set_ttl(ttl);
        }
        if let Some(image) = spec.image {
            channel.set_image(image.into_image()?);
        }

        for hour in spec.skip_hours {
            match u8::try_from(hour) {
                Ok(hour) => channel.add_skip_hour(hour),
                Err(_) => tracing::trace!(hour, "Ignoring out-of-range skip hour"),
            }
        }
        for day in &spec.skip_days {
            let weekday = day
                .parse::<Weekday>()
                .map_err(|_| ManifestError::InvalidWeekday(day.clone()))?;
            channel.add_skip_day(weekday);
        }

        channel
            .categories_mut()
            .extend(spec.categories.into_iter().map(CategorySpec::into_category));
        for (prefix, uri) in self.namespaces {
            channel.add_namespace(prefix, uri);
        }
        channel
            .extensions_mut()
            .extend(spec.extensions.into_iter().map(ExtensionSpec::into_extension));

        Ok(channel)
    }
}

impl ImageSpec {
    fn into_image(self) -> Result<Image, RssError> {
        let mut image = Image::new(&self.url)?;
        if let Some(title) = self.title {
            image.set_title(title);
        }
        if let Some(link) = self.link {
            image.set_link(link);
        }
        if let Some(width) = self.width {
            image.set_width(width);
        }
        if let Some(height) = self.height {
            image.set_height(height);
        }
        Ok(image)
    }
}

impl CategorySpec {
    fn into_category(self) -> Category {
        match self.domain {
            Some(ref domain) => Category::with_domain(self.text, domain),
            None => Category::new(self.text),
        }
    }
}

impl ExtensionSpec {
    fn into_extension(self) -> ExtensionTag {
        let mut tag = ExtensionTag::new(self.prefix, self.tag, self.value);
        tag.attributes_mut().extend(self.attributes);
        tag
    }
}

impl ItemSpec {
    fn into_item(self) -> Result<Item, RssError> {
        let mut item = Item::new(self.title, self.link, self.description);
        if let Some(author) = self.author {
            item.set_author_email(author.email);
            if let Some(name) = author.name {
                item.set_author_name(name);
            }
        }
        if let Some(comments) = self.comments {
            item.set_comments(comments);
        }
        if let Some(guid) = self.guid {
            item.set_guid(guid);
        }
        item.set_guid_is_permalink(self.guid_is_permalink);
        if let Some(date) = self.pub_date {
            item.set_pub_date(date);
        }
        if let Some(enclosure) = self.enclosure {
            item.set_enclosure(Enclosure::new(
                &enclosure.url,
                enclosure.length,
                enclosure.mime_type,
            )?);
        }
        item.categories_mut()
            .extend(self.categories.into_iter().map(CategorySpec::into_category));
        item.extensions_mut()
            .extend(self.extensions.into_iter().map(ExtensionSpec::into_extension));
        Ok(item)
    }
}
