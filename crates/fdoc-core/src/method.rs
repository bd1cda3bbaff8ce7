//! # HTTP Verbs
//!
//! The `HttpMethod` enum is the one definition of the verbs an endpoint
//! declaration may use. Parsing is case-insensitive so recorded exchanges
//! that carry lowercase verbs still resolve.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// A standard HTTP verb.
///
/// Serializes as the uppercase wire name; deserializes through [`FromStr`],
/// so any casing is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `CONNECT`
    Connect,
}

impl HttpMethod {
    /// Returns every verb in canonical order.
    pub fn all() -> &'static [HttpMethod] {
        &[
            Self::Get,
            Self::Head,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
            Self::Options,
            Self::Trace,
            Self::Connect,
        ]
    }

    /// Returns the uppercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method: {0:?}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_roundtrip() {
        for method in HttpMethod::all() {
            let parsed: HttpMethod = method.as_str().parse().unwrap();
            assert_eq!(*method, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!(" delete ".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("FETCH".parse::<HttpMethod>().is_err());
        assert!("".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let parsed: HttpMethod = serde_json::from_str("\"OPTIONS\"").unwrap();
        assert_eq!(parsed, HttpMethod::Options);
    }

    #[test]
    fn test_deserialize_any_casing() {
        let parsed: HttpMethod = serde_json::from_str("\"get\"").unwrap();
        assert_eq!(parsed, HttpMethod::Get);
        let parsed: HttpMethod = serde_json::from_str("\"Patch\"").unwrap();
        assert_eq!(parsed, HttpMethod::Patch);
        let err = serde_json::from_str::<HttpMethod>("\"fetch\"").unwrap_err();
        assert!(err.to_string().contains("unknown HTTP method"));
    }
}
