//! Annotation identifiers.
//!
//! Ids are issued by an `OverlayStore` from its own counter and are never
//! reused by that store, even across `clear`. The host sees them as
//! `text_<n>` strings.

use crate::error::EditorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "text_";

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(u64);

impl AnnotationId {
    pub const fn from_raw(n: u64) -> Self {
        Self(n)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{self}")
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.0)
    }
}

impl FromStr for AnnotationId {
    type Err = EditorError;

    /// Parse the `text_<n>` form handed out to the host.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(PREFIX)
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .map(AnnotationId)
            .ok_or_else(|| EditorError::InvalidId(s.to_string()))
    }
}

impl Serialize for AnnotationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnnotationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn displays_and_parses_host_form() {
        let id = AnnotationId::from_raw(7);
        assert_eq!(id.to_string(), "text_7");
        assert_eq!(format!("{id:?}"), "#text_7");
        assert_eq!("text_7".parse::<AnnotationId>(), Ok(id));
    }

    #[test]
    fn rejects_foreign_strings() {
        for bad in ["", "text_", "7", "text_-1", "text_+1", "text_1x", "note_1", "text_99999999999999999999"] {
            assert_eq!(
                bad.parse::<AnnotationId>(),
                Err(EditorError::InvalidId(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = AnnotationId::from_raw(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""text_3""#);
        assert_eq!(serde_json::from_str::<AnnotationId>(&json).unwrap(), id);
        assert!(serde_json::from_str::<AnnotationId>(r#""caption""#).is_err());
    }
}
