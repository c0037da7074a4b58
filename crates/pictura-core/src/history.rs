//! Session-local history of generated images.

use crate::request::ImageResponse;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub prompt: String,
    pub image: ImageResponse,
}

/// Ordered list of generations plus the one currently shown.
#[derive(Debug, Clone, Default)]
pub struct GenerationHistory {
    entries: Vec<Generation>,
    active: Option<usize>,
}

impl GenerationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly received image and make it active. A payload that is
    /// already in the history is ignored; returns whether it was appended.
    pub fn record(&mut self, prompt: &str, image: ImageResponse) -> bool {
        if self.entries.iter().any(|g| g.image == image) {
            return false;
        }
        self.entries.push(Generation {
            prompt: prompt.to_string(),
            image,
        });
        self.active = Some(self.entries.len() - 1);
        log::debug!("recorded generation #{}", self.entries.len() - 1);
        true
    }

    /// Switch the displayed generation. Out-of-range indexes are ignored.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Generation> {
        self.entries.get(self.active?)
    }

    /// Replace the active generation's image with an edited export
    /// (base64, no data-URL prefix). Returns false when nothing is active.
    pub fn replace_active_image(&mut self, b64_png: String) -> bool {
        let Some(entry) = self.active.and_then(|i| self.entries.get_mut(i)) else {
            return false;
        };
        entry.image.b64_json = b64_png;
        true
    }

    pub fn entries(&self) -> &[Generation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
