//! Build RSS 2.0 feeds from a typed model and render them to XML.
//!
//! The [`feed`] module holds the model and serializer. [`config`] and
//! [`manifest`] back the `feedwright` command line tool, which renders a
//! TOML feed definition to a file or stdout.
//!
//! ```
//! use feedwright::{Category, Channel, Item};
//!
//! let mut channel = Channel::new("My Feed", "http://example.com", "Desc", Vec::new());
//! channel.add_category(Category::with_domain("Tech", "http://example.com/cats"));
//! channel.add(Item::new("A&B", "http://x", "desc"));
//!
//! let xml = channel.to_xml().unwrap();
//! assert!(xml.contains(r#"<category domain="http://example.com/cats">Tech</category>"#));
//! assert!(xml.contains("<title><![CDATA[A&B]]></title>"));
//! ```

pub mod config;
pub mod feed;
pub mod manifest;
pub mod util;

pub use feed::{
    Category, Channel, Enclosure, ExtensionTag, Generator, Image, Item, RenderOptions, RssError,
    CONTENT_TYPE, RSS_DOCS_URL,
};
