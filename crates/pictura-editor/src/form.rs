//! Edit form glue.
//!
//! The form itself lives in the host UI; this is its state plus the rules
//! for turning a submit/delete/cancel into store operations. One form serves
//! both adding new text and editing an existing annotation.

use pictura_core::model::{MAX_FONT_SIZE, MIN_FONT_SIZE, clamp_font_size};
use pictura_core::{
    AnnotationId, AnnotationPatch, Color, EditSnapshot, EditorConfig, EditorError, OverlayStore,
    TextAnnotation, parse_color,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Adding,
    Editing(AnnotationId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    mode: Option<FormMode>,
    text: String,
    font_size: u32,
    color: Color,
    step: u32,
    /// Font size and color a fresh add starts from.
    defaults: (u32, Color),
}

impl Default for EditForm {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditForm {
    /// A closed form holding the configured defaults.
    pub fn new(config: &EditorConfig) -> Self {
        let font_size = clamp_font_size(config.default_font_size);
        Self {
            mode: None,
            text: String::new(),
            font_size,
            color: config.default_color,
            step: config.font_size_step,
            defaults: (font_size, config.default_color),
        }
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Open empty for new text. Any edit in progress is abandoned.
    pub fn open_for_add(&mut self, store: &mut OverlayStore) {
        store.end_edit();
        let (font_size, color) = self.defaults;
        self.mode = Some(FormMode::Adding);
        self.text.clear();
        self.font_size = font_size;
        self.color = color;
    }

    /// Open prefilled from an annotation's snapshot.
    pub fn open_for_edit(&mut self, snapshot: EditSnapshot) {
        self.mode = Some(FormMode::Editing(snapshot.id));
        self.text = snapshot.content;
        self.font_size = snapshot.font_size;
        self.color = snapshot.color;
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Set the color from a CSS-style string. Invalid input keeps the old color.
    pub fn set_color(&mut self, color: &str) -> Result<Color, EditorError> {
        self.color = parse_color(color)?;
        Ok(self.color)
    }

    pub fn grow_font(&mut self) -> u32 {
        self.font_size = self.font_size.saturating_add(self.step).min(MAX_FONT_SIZE);
        self.font_size
    }

    pub fn shrink_font(&mut self) -> u32 {
        self.font_size = self.font_size.saturating_sub(self.step).max(MIN_FONT_SIZE);
        self.font_size
    }

    /// Commit the form to the store: add in Adding mode, update and end the
    /// edit in Editing mode. Blank text leaves both the form and the store
    /// as they were.
    pub fn submit(&mut self, store: &mut OverlayStore) -> Result<AnnotationId, EditorError> {
        let Some(mode) = self.mode else {
            return Err(EditorError::NotOpen);
        };
        let id = match mode {
            FormMode::Adding => store.add(&self.text, self.font_size, self.color)?,
            FormMode::Editing(id) => {
                let patch = AnnotationPatch::default()
                    .content(self.text.as_str())
                    .font_size(self.font_size)
                    .color(self.color);
                match store.update(id, patch) {
                    Ok(()) => {}
                    // The annotation is gone; there is nothing left to edit.
                    Err(err @ EditorError::NotFound(_)) => {
                        store.end_edit();
                        self.close();
                        return Err(err);
                    }
                    Err(err) => return Err(err),
                }
                store.end_edit();
                id
            }
        };
        self.close();
        Ok(id)
    }

    /// Remove the annotation being edited. Returns `Ok(None)` when the form
    /// is not editing anything.
    pub fn delete(
        &mut self,
        store: &mut OverlayStore,
    ) -> Result<Option<TextAnnotation>, EditorError> {
        let Some(FormMode::Editing(id)) = self.mode else {
            return Ok(None);
        };
        let removed = store.remove(id);
        store.end_edit();
        self.close();
        removed.map(Some)
    }

    pub fn cancel(&mut self, store: &mut OverlayStore) {
        store.end_edit();
        self.close();
    }

    /// Close without touching the store.
    pub fn close(&mut self) {
        self.mode = None;
        self.text.clear();
    }
}
