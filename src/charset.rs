//! RFC 3986 character classes for link segments.
//!
//! Values are checked, not escaped: a value containing a character outside
//! its segment's class makes the whole link fail.

use std::fmt;

/// The kind of URI segment an encoded value is placed in.
///
/// # Examples
///
/// ```
/// use fast_links::SegmentKind;
///
/// assert!(SegmentKind::PathSegment.is_allowed("2015-03-01"));
/// assert!(!SegmentKind::PathSegment.is_allowed("with blank"));
///
/// // `=`, `&` and `+` are query syntax
/// assert!(SegmentKind::PathSegment.is_allowed("a=b"));
/// assert!(!SegmentKind::QueryParam.is_allowed("a=b"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A `/`-delimited path segment (`pchar`)
    PathSegment,
    /// A query parameter value (`pchar`, `/`, `?` without `=`, `+`, `&`)
    QueryParam,
}

impl SegmentKind {
    /// Returns true if the character may appear unescaped in this segment.
    #[must_use]
    pub const fn is_allowed_char(self, c: char) -> bool {
        match self {
            Self::PathSegment => is_pchar(c),
            Self::QueryParam => {
                if matches!(c, '=' | '+' | '&') {
                    false
                } else {
                    is_pchar(c) || c == '/' || c == '?'
                }
            }
        }
    }

    /// Returns true if every character of `input` is allowed.
    #[must_use]
    pub fn is_allowed(self, input: &str) -> bool {
        input.chars().all(|c| self.is_allowed_char(c))
    }

    /// Returns the position and value of the first disallowed character.
    #[must_use]
    pub fn first_disallowed(self, input: &str) -> Option<(usize, char)> {
        input
            .chars()
            .enumerate()
            .find(|&(_, c)| !self.is_allowed_char(c))
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathSegment => write!(f, "path segment"),
            Self::QueryParam => write!(f, "query parameter"),
        }
    }
}

/// `ALPHA / DIGIT / "-" / "." / "_" / "~"`
#[must_use]
pub const fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// `"!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
#[must_use]
pub const fn is_sub_delim(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
    )
}

/// `unreserved / pct-encoded / sub-delims / ":" / "@"`, without `pct-encoded`.
#[must_use]
pub const fn is_pchar(c: char) -> bool {
    is_unreserved(c) || is_sub_delim(c) || c == ':' || c == '@'
}
