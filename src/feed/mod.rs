//! RSS 2.0 feed model and serializer.
//!
//! This module provides the entities that make up an RSS document and the
//! rendering that turns them into XML:
//!
//! - **Channel**: the feed root, owning items, categories, image, skip hints,
//!   namespace declarations and extensions
//! - **Item**: a single entry, with optional author, categories, enclosure,
//!   publication date, GUID and extensions
//! - **Category / Enclosure / Image / ExtensionTag**: small value entities
//!
//! # Architecture
//!
//! Every entity writes itself through [`XmlWriter`], a wrapper over
//! `quick_xml::Writer`. Rendering is read-only: defaults such as the GUID
//! falling back to the item link are computed during the render and never
//! stored. Required fields are checked when rendering starts, so an
//! incomplete channel produces an error and no output.
//!
//! # Example
//!
//! ```
//! use feedwright::{Category, Channel, Enclosure, Item};
//!
//! let mut item = Item::new("Episode 1", "http://example.com/ep1", "Pilot");
//! item.add_category(Category::new("Audio"));
//! item.set_enclosure(Enclosure::new("http://example.com/ep1.mp3", 1024, "audio/mpeg")?);
//!
//! let channel = Channel::new("My Podcast", "http://example.com", "Weekly", vec![item]);
//! let xml = channel.to_xml()?;
//! assert!(xml.contains(r#"<enclosure url="http://example.com/ep1.mp3" length="1024" type="audio/mpeg" />"#));
//! # Ok::<(), feedwright::RssError>(())
//! ```

mod category;
mod channel;
mod enclosure;
mod error;
mod extension;
mod image;
mod item;
mod writer;

pub use category::Category;
pub use channel::{Channel, Generator, CONTENT_TYPE, RSS_DOCS_URL};
pub use enclosure::Enclosure;
pub use error::RssError;
pub use extension::ExtensionTag;
pub use image::{Image, DEFAULT_IMAGE_SIZE, MAX_IMAGE_SIZE};
pub use item::Item;
pub use writer::{RenderOptions, WriteXml, XmlWriter};
