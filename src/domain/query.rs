//! The validated search term.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Characters left unescaped in a query component.
///
/// Matches the unreserved set used by browsers for URI components:
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`. Everything else, including space, `&`,
/// `?`, `=` and `+`, is percent-encoded from its UTF-8 bytes.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters stripped from both ends of the input: Unicode white space and
/// the byte order mark, but not NEL (`U+0085`), the same set a browser's
/// `String.prototype.trim` removes.
fn is_trimmed(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// A non-empty, whitespace-trimmed search term.
///
/// The only way to obtain one is [`SearchQuery::parse`], so holding a
/// `SearchQuery` means the term is safe to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims `input` and returns `None` if nothing remains.
    ///
    /// # Examples
    ///
    /// ```
    /// use metastream::domain::SearchQuery;
    ///
    /// assert!(SearchQuery::parse(" \t ").is_none());
    /// assert_eq!(SearchQuery::parse("  cats ").unwrap().as_str(), "cats");
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim_matches(is_trimmed);
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encodes the term for use as a URL query parameter value.
    ///
    /// # Examples
    ///
    /// ```
    /// use metastream::domain::SearchQuery;
    ///
    /// let query = SearchQuery::parse("tom & jerry?").unwrap();
    /// assert_eq!(query.encoded(), "tom%20%26%20jerry%3F");
    /// ```
    #[must_use]
    pub fn encoded(&self) -> String {
        utf8_percent_encode(&self.0, QUERY_COMPONENT).to_string()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_rejected() {
        for input in ["", " ", "\t\n", "\u{a0}\u{2003}"] {
            assert!(SearchQuery::parse(input).is_none(), "accepted {input:?}");
        }
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        assert!(SearchQuery::parse("\u{feff}").is_none());
        assert!(SearchQuery::parse(" \u{feff}\t").is_none());
        assert_eq!(SearchQuery::parse("\u{feff}cats\u{feff}").unwrap().as_str(), "cats");
    }

    #[test]
    fn next_line_is_not_trimmed() {
        assert_eq!(SearchQuery::parse("\u{85}").unwrap().as_str(), "\u{85}");
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let query = SearchQuery::parse("  funny  cats\n").unwrap();
        assert_eq!(query.as_str(), "funny  cats");
    }

    #[test]
    fn encodes_reserved_characters() {
        let query = SearchQuery::parse("a+b=c/d#e").unwrap();
        assert_eq!(query.encoded(), "a%2Bb%3Dc%2Fd%23e");
    }

    #[test]
    fn leaves_unreserved_marks() {
        let query = SearchQuery::parse("it's-(a)_test.~!*").unwrap();
        assert_eq!(query.encoded(), "it's-(a)_test.~!*");
    }

    #[test]
    fn encodes_utf8_bytes() {
        let query = SearchQuery::parse("café").unwrap();
        assert_eq!(query.encoded(), "caf%C3%A9");
    }
}
