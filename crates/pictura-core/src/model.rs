//! Text annotation data model.
//!
//! An annotation is a single line of text anchored at its baseline's left
//! edge, in image pixel space. Positions are unbounded so text can be
//! staged off-canvas.

use crate::color::Color;
use crate::id::AnnotationId;
use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 72;

/// Clamp a requested font size into `[MIN_FONT_SIZE, MAX_FONT_SIZE]`.
pub fn clamp_font_size(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

/// True when the content has nothing but whitespace.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

/// One placed piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    pub id: AnnotationId,
    pub content: String,
    /// Baseline left edge.
    pub x: f32,
    pub y: f32,
    pub font_size: u32,
    pub color: Color,
}

impl TextAnnotation {
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Partial update for an annotation. Absent fields are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationPatch {
    pub content: Option<String>,
    pub font_size: Option<u32>,
    pub color: Option<Color>,
}

impl AnnotationPatch {
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.font_size.is_none() && self.color.is_none()
    }
}

/// Copy of an annotation's editable fields, handed to an edit form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSnapshot {
    pub id: AnnotationId,
    pub content: String,
    pub font_size: u32,
    pub color: Color,
}

impl From<&TextAnnotation> for EditSnapshot {
    fn from(a: &TextAnnotation) -> Self {
        Self {
            id: a.id,
            content: a.content.clone(),
            font_size: a.font_size,
            color: a.color,
        }
    }
}
