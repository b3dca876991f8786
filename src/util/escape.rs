use std::borrow::Cow;

/// Closing delimiter of a CDATA section.
pub const CDATA_END: &str = "]]>";

/// Escapes text for use in XML character data or attribute values.
///
/// Encodes `&`, `<`, `>`, `"` and `'` as entities. Every other character is
/// passed through unchanged, so the function is total: any input yields a
/// string that is safe inside an element or a double-quoted attribute.
///
/// Returns `Cow::Borrowed` when nothing needed escaping.
///
/// # Examples
///
/// ```
/// use feedwright::util::escape;
///
/// assert_eq!(escape("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape("<b>\"hi\"</b>"), "&lt;b&gt;&quot;hi&quot;&lt;/b&gt;");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Splits text into pieces that can each be wrapped in a CDATA section.
///
/// A CDATA section ends at the first `]]>`, so the terminator is split
/// between `]]` and `>`: the first piece closes its section after `]]` and
/// the `>` opens the next one. Text without a terminator yields one piece.
///
/// # Examples
///
/// ```
/// use feedwright::util::cdata_sections;
///
/// assert_eq!(cdata_sections("a & b"), vec!["a & b"]);
/// assert_eq!(cdata_sections("x]]>y"), vec!["x]]", ">y"]);
/// ```
pub fn cdata_sections(text: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(CDATA_END) {
        let (head, tail) = rest.split_at(pos + 2);
        sections.push(head);
        rest = tail;
    }
    sections.push(rest);
    sections
}

/// Whether `name` can be used as an unprefixed XML element or attribute
/// name, or as a namespace prefix.
///
/// The first character must be a letter or `_`; the rest may also be digits,
/// `-` or `.`. Colons are not allowed, so prefixes and local names are
/// checked separately.
///
/// ```
/// use feedwright::util::is_xml_name;
///
/// assert!(is_xml_name("itunes"));
/// assert!(is_xml_name("media-content"));
/// assert!(!is_xml_name(""));
/// assert!(!is_xml_name("b c"));
/// assert!(!is_xml_name("2nd"));
/// ```
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_all_markup_characters() {
        assert_eq!(escape("&"), "&amp;");
        assert_eq!(escape("<"), "&lt;");
        assert_eq!(escape(">"), "&gt;");
        assert_eq!(escape("\""), "&quot;");
        assert_eq!(escape("'"), "&apos;");
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape("http://example.com/cats"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_leaves_unicode_alone() {
        assert_eq!(escape("café © 世界"), "café © 世界");
    }

    #[test]
    fn test_escape_query_string() {
        assert_eq!(
            escape("http://x.example/a.mp3?id=1&fmt=2"),
            "http://x.example/a.mp3?id=1&amp;fmt=2"
        );
    }

    #[test]
    fn test_cdata_sections_without_terminator() {
        assert_eq!(cdata_sections(""), vec![""]);
        assert_eq!(cdata_sections("<p>A&B</p>"), vec!["<p>A&B</p>"]);
    }

    #[test]
    fn test_cdata_sections_splits_every_terminator() {
        assert_eq!(cdata_sections("]]>"), vec!["]]", ">"]);
        assert_eq!(cdata_sections("a]]>b]]>c"), vec!["a]]", ">b]]", ">c"]);
    }

    #[test]
    fn test_xml_names() {
        assert!(is_xml_name("_private"));
        assert!(is_xml_name("dc.creator"));
        assert!(is_xml_name("café"));
        assert!(!is_xml_name("a:b"));
        assert!(!is_xml_name("-lead"));
        assert!(!is_xml_name("x<y"));
        assert!(!is_xml_name("tab\tname"));
    }

    #[test]
    fn test_cdata_sections_never_contain_terminator() {
        for section in cdata_sections("]]>]]>") {
            assert!(!section.contains(CDATA_END));
        }
    }

    proptest! {
        #[test]
        fn prop_escape_output_has_no_raw_markup(s in ".*") {
            let escaped = escape(&s);
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('>'));
            prop_assert!(!escaped.contains('"'));
        }

        #[test]
        fn prop_cdata_sections_rejoin_to_input(s in "[a-z\\]>]{0,24}") {
            let sections = cdata_sections(&s);
            prop_assert_eq!(sections.concat(), s.clone());
            for section in &sections {
                prop_assert!(!section.contains(CDATA_END));
            }
        }
    }
}
