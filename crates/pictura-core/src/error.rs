//! Error taxonomy for the annotation editor.
//!
//! Every variant is local and recoverable: a rejected operation leaves the
//! store untouched and the editor interactable.

use crate::id::AnnotationId;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Text content was empty or whitespace-only.
    BlankContent,
    /// A move carried NaN or infinite coordinates.
    NonFinitePosition,
    /// The referenced annotation does not exist (or no longer exists).
    NotFound(AnnotationId),
    /// A host-supplied id string is not one the store hands out.
    InvalidId(String),
    /// Export was requested before a base image was loaded.
    ExportUnavailable,
    /// A color string could not be parsed.
    InvalidColor(String),
    /// Image bytes could not be decoded.
    Decode(String),
    /// The composited surface could not be encoded.
    Encode(String),
    /// Font bytes could not be loaded.
    Font(String),
    /// A configuration override could not be parsed.
    Config(String),
    /// The editor has no open session.
    NotOpen,
}

impl EditorError {
    /// Validation failures: the caller should show an inline notice.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EditorError::BlankContent
                | EditorError::NonFinitePosition
                | EditorError::InvalidColor(_)
        )
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::BlankContent => f.write_str("please enter some text"),
            EditorError::NonFinitePosition => f.write_str("position must be finite"),
            EditorError::NotFound(id) => write!(f, "annotation {id} not found"),
            EditorError::InvalidId(s) => write!(f, "invalid annotation id {s:?}"),
            EditorError::ExportUnavailable => {
                f.write_str("export unavailable: no base image has been loaded")
            }
            EditorError::InvalidColor(s) => write!(f, "invalid color {s:?}"),
            EditorError::Decode(msg) => write!(f, "failed to decode image: {msg}"),
            EditorError::Encode(msg) => write!(f, "failed to encode image: {msg}"),
            EditorError::Font(msg) => write!(f, "failed to load font: {msg}"),
            EditorError::Config(msg) => write!(f, "invalid editor config: {msg}"),
            EditorError::NotOpen => f.write_str("editor is not open"),
        }
    }
}

impl std::error::Error for EditorError {}
