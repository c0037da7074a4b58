//! Editor configuration.
//!
//! All fields have defaults; hosts override individual values through JSON
//! (`{"hitPadding": 8}`) so the browser page can tune behavior without a
//! rebuild.

use crate::color::Color;
use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Margin added on every side of a text box for hit testing.
    pub hit_padding: f32,
    /// Two clicks closer together than this are a double-click.
    pub double_click_window_ms: u64,
    /// Top-left of newly added text. The baseline lands `fontSize` below.
    pub default_anchor: (f32, f32),
    pub default_font_size: u32,
    /// Increment used by the edit form's font size buttons.
    pub font_size_step: u32,
    pub default_color: Color,
    /// Outline drawn around the selected annotation.
    pub highlight_color: Color,
    pub highlight_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_padding: 5.0,
            double_click_window_ms: 300,
            default_anchor: (50.0, 50.0),
            default_font_size: 32,
            font_size_step: 4,
            default_color: Color::WHITE,
            highlight_color: Color::from_rgba8(0, 255, 0, 255),
            highlight_width: 2.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        serde_json::from_str(json).map_err(|e| EditorError::Config(e.to_string()))
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_window_ms)
    }
}
