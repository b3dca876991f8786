//! Utility functions shared by the feed model.
//!
//! This module provides reusable utilities for:
//!
//! - **Escaping**: XML entity escaping, CDATA section splitting and name checks
//! - **URL validation**: Absolute-URI checks for enclosures and images
//! - **Dates**: RFC-1123 formatting and weekday names for RSS elements
//!
//! # Examples
//!
//! ```
//! use feedwright::util::{cdata_sections, escape, validate_url};
//!
//! assert_eq!(escape("A&B"), "A&amp;B");
//! assert_eq!(cdata_sections("a]]>b"), vec!["a]]", ">b"]);
//! assert!(validate_url("https://example.com/feed.xml").is_ok());
//! ```

mod datetime;
mod escape;
mod url_validator;

pub use datetime::{format_rfc1123, weekday_name};
pub use escape::{cdata_sections, escape, is_xml_name, CDATA_END};
pub use url_validator::{validate_url, UrlValidationError};
