//! URL patterns and request-path normalization.
//!
//! An endpoint's `url` is a pattern of literal and parameter segments.
//! Parameters are written `{name}` or `:name` and match any non-empty
//! segment; literals match only themselves, so `/widgets/new` and
//! `/widgets/{id}` never collapse onto each other.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// One segment of a URL pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must match exactly.
    Literal(String),
    /// Matches any non-empty segment and binds it to the name.
    Param(String),
}

/// Why a `url` field is not a usable pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Patterns are absolute paths.
    #[error("url must start with '/': {0:?}")]
    NotAbsolute(String),
    /// `a//b` style empty segment.
    #[error("url contains an empty segment: {0:?}")]
    EmptySegment(String),
    /// `{}` or a bare `:`.
    #[error("url has a parameter without a name: {0:?}")]
    UnnamedParam(String),
}

/// A parsed endpoint URL pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl UrlPattern {
    /// Parse a pattern such as `/widgets/{id}/parts/:part`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::NotAbsolute(raw.to_string()));
        }

        let mut segments = Vec::new();
        for segment in split_segments(raw) {
            if segment.is_empty() {
                return Err(PatternError::EmptySegment(raw.to_string()));
            }
            let param = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .or_else(|| segment.strip_prefix(':'));
            match param {
                Some("") => return Err(PatternError::UnnamedParam(raw.to_string())),
                Some(name) => segments.push(Segment::Param(name.to_string())),
                None => segments.push(Segment::Literal(segment.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Route identity: parameter names erased, so `/a/{id}` and `/a/:key`
    /// are the same route.
    pub fn canonical(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(lit) => format!("/{lit}"),
                Segment::Param(_) => "/{}".to_string(),
            })
            .collect()
    }

    /// First segment, used to group endpoints for presentation. Empty for
    /// `/`; a leading parameter keys as `{name}` so it never shares a group
    /// with a literal of the same text.
    pub fn prefix(&self) -> Cow<'_, str> {
        match self.segments.first() {
            Some(Segment::Literal(lit)) => Cow::Borrowed(lit),
            Some(Segment::Param(name)) => Cow::Owned(format!("{{{name}}}")),
            None => Cow::Borrowed(""),
        }
    }

    /// Whether a request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }

    /// Parameter bindings when `path` matches.
    pub fn captures(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let actual: Vec<&str> = split_segments(path).collect();
        if actual.len() != self.segments.len() {
            return None;
        }

        let mut bindings = BTreeMap::new();
        for (expected, actual) in self.segments.iter().zip(actual) {
            match expected {
                Segment::Literal(lit) if lit == actual => {}
                Segment::Param(name) if !actual.is_empty() => {
                    bindings.insert(name.clone(), actual.to_string());
                }
                _ => return None,
            }
        }
        Some(bindings)
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Reduce an exchange URL to its path: scheme and authority, query string
/// and fragment are dropped.
///
/// Query and fragment are cut first, and `://` only counts as an origin when
/// it precedes the first `/`, so a URL carried in a query parameter never
/// replaces the path.
pub fn request_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];
    match url.find("://") {
        Some(idx) if !url[..idx].contains('/') => {
            let after = &url[idx + 3..];
            after.find('/').map_or("/", |slash| &after[slash..])
        }
        _ => url,
    }
}

/// Strip `base` from the front of `path` on a segment boundary.
///
/// An empty base owns every path. Returns the remainder, always starting
/// with `/`.
pub fn strip_base_path<'a>(base: &str, path: &'a str) -> Option<&'a str> {
    if base.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Normalize a declared base path: leading `/`, no trailing `/`, and the
/// root collapses to the empty string.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Split a path into segments, ignoring one leading and one trailing `/`.
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    let mut segments = Some(path.split('/'));
    if path.is_empty() {
        segments = None;
    }
    segments.into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pattern(raw: &str) -> UrlPattern {
        UrlPattern::parse(raw).unwrap()
    }

    #[test]
    fn test_literal_match() {
        let p = pattern("/widgets");
        assert!(p.matches("/widgets"));
        assert!(p.matches("/widgets/"));
        assert!(!p.matches("/widget"));
        assert!(!p.matches("/widgets/42"));
    }

    #[test]
    fn test_param_match_and_capture() {
        let p = pattern("/widgets/{id}/parts/:part");
        let caps = p.captures("/widgets/42/parts/bolt").unwrap();
        assert_eq!(caps.get("id").map(String::as_str), Some("42"));
        assert_eq!(caps.get("part").map(String::as_str), Some("bolt"));
        assert!(!p.matches("/widgets//parts/bolt"));
    }

    #[test]
    fn test_literals_do_not_collapse() {
        let new = pattern("/widgets/new");
        let by_id = pattern("/widgets/{id}");
        assert!(new.matches("/widgets/new"));
        assert!(!new.matches("/widgets/42"));
        assert!(by_id.matches("/widgets/new"));
    }

    #[test]
    fn test_root_pattern() {
        let root = pattern("/");
        assert!(root.matches("/"));
        assert!(root.matches(""));
        assert!(!root.matches("/x"));
        assert_eq!(root.prefix(), "");
        assert_eq!(root.canonical(), "/");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            UrlPattern::parse("widgets"),
            Err(PatternError::NotAbsolute("widgets".to_string()))
        );
        assert!(matches!(
            UrlPattern::parse("/a//b"),
            Err(PatternError::EmptySegment(_))
        ));
        assert!(matches!(
            UrlPattern::parse("/a/{}"),
            Err(PatternError::UnnamedParam(_))
        ));
        assert!(matches!(
            UrlPattern::parse("/a/:"),
            Err(PatternError::UnnamedParam(_))
        ));
    }

    #[test]
    fn test_canonical_erases_param_names() {
        assert_eq!(pattern("/a/{id}").canonical(), pattern("/a/:key").canonical());
        assert_ne!(pattern("/a/{id}").canonical(), pattern("/a/id").canonical());
    }

    #[test]
    fn test_prefix_and_params() {
        let p = pattern("/members/{id}/friends");
        assert_eq!(p.prefix(), "members");
        assert_eq!(p.params().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_param_prefix_is_braced() {
        assert_eq!(pattern("/{id}/parts").prefix(), "{id}");
        assert_eq!(pattern("/:id").prefix(), "{id}");
        assert_ne!(pattern("/{id}").prefix(), pattern("/id").prefix());
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("/widgets/42?expand=parts"), "/widgets/42");
        assert_eq!(request_path("/widgets/42#top"), "/widgets/42");
        assert_eq!(request_path("https://api.example.com/v1/widgets"), "/v1/widgets");
        assert_eq!(request_path("http://api.example.com"), "/");
        assert_eq!(request_path("https://api.example.com/v1?x=1#y"), "/v1");
    }

    #[test]
    fn test_request_path_ignores_urls_in_query() {
        assert_eq!(
            request_path("/widgets/42?next=https://example.com/a/b"),
            "/widgets/42"
        );
        assert_eq!(request_path("/widgets#https://example.com/x"), "/widgets");
        assert_eq!(
            request_path("https://api.example.com/widgets?next=http://other/a"),
            "/widgets"
        );
        assert_eq!(request_path("/redirect/https://example.com/a"), "/redirect/https://example.com/a");
    }

    #[test]
    fn test_strip_base_path() {
        assert_eq!(strip_base_path("", "/widgets"), Some("/widgets"));
        assert_eq!(strip_base_path("/api", "/api/widgets"), Some("/widgets"));
        assert_eq!(strip_base_path("/api", "/api"), Some("/"));
        assert_eq!(strip_base_path("/api", "/apis/widgets"), None);
        assert_eq!(strip_base_path("/api", "/widgets"), None);
    }

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("api/"), "/api");
        assert_eq!(normalize_base_path("/api/v1"), "/api/v1");
    }

    proptest! {
        #[test]
        fn literal_pattern_matches_itself(segs in prop::collection::vec("[a-z0-9_-]{1,8}", 0..5)) {
            let raw = format!("/{}", segs.join("/"));
            let p = UrlPattern::parse(&raw).unwrap();
            prop_assert!(p.matches(&raw));
        }

        #[test]
        fn param_matches_any_nonempty_segment(value in "[A-Za-z0-9._~-]{1,16}") {
            let p = UrlPattern::parse("/widgets/{id}").unwrap();
            let path = format!("/widgets/{value}");
            let caps = p.captures(&path).unwrap();
            prop_assert_eq!(caps.get("id").cloned(), Some(value));
        }

        #[test]
        fn distinct_literals_never_match(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
            prop_assume!(a != b);
            let p = UrlPattern::parse(&format!("/{a}")).unwrap();
            let other = format!("/{b}");
            prop_assert!(!p.matches(&other));
        }
    }
}
