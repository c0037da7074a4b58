//! Overlay store: the ordered set of text annotations on one base image.
//!
//! Slots are an arena indexed by id. Insertion order is paint order
//! (later = drawn on top); removal tombstones the slot so survivors keep
//! their relative order, and the arena is compacted once tombstones
//! outnumber live slots. At most one annotation is selected and at most
//! one is being edited; both always reference live annotations.

use crate::color::Color;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::id::AnnotationId;
use crate::model::{
    AnnotationPatch, EditSnapshot, TextAnnotation, clamp_font_size, is_blank,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct OverlayStore {
    slots: Vec<Option<TextAnnotation>>,
    index: HashMap<AnnotationId, usize>,
    selected: Option<AnnotationId>,
    editing: Option<AnnotationId>,
    default_anchor: (f32, f32),
    /// Survives `clear` so stale ids never resolve again.
    next_id: u64,
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl OverlayStore {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            selected: None,
            editing: None,
            default_anchor: config.default_anchor,
            next_id: 1,
        }
    }

    /// Place new text at the default anchor. The baseline sits `font_size`
    /// below the anchor so the glyphs start inside the image.
    pub fn add(
        &mut self,
        content: &str,
        font_size: u32,
        color: Color,
    ) -> Result<AnnotationId, EditorError> {
        if is_blank(content) {
            log::warn!("add rejected: blank content");
            return Err(EditorError::BlankContent);
        }
        let font_size = clamp_font_size(font_size);
        let id = AnnotationId::from_raw(self.next_id);
        self.next_id += 1;
        let (ax, ay) = self.default_anchor;
        let annotation = TextAnnotation {
            id,
            content: content.to_string(),
            x: ax,
            y: ay + font_size as f32,
            font_size,
            color,
        };
        self.index.insert(id, self.slots.len());
        self.slots.push(Some(annotation));
        log::debug!("added {id} ({font_size}px, {color})");
        Ok(id)
    }

    /// Apply a partial update. Blank content is rejected before the lookup,
    /// so a rejected patch never touches the store.
    pub fn update(&mut self, id: AnnotationId, patch: AnnotationPatch) -> Result<(), EditorError> {
        if patch.content.as_deref().is_some_and(is_blank) {
            log::warn!("update of {id} rejected: blank content");
            return Err(EditorError::BlankContent);
        }
        let annotation = self.get_mut(id)?;
        if let Some(content) = patch.content {
            annotation.content = content;
        }
        if let Some(size) = patch.font_size {
            annotation.font_size = clamp_font_size(size);
        }
        if let Some(color) = patch.color {
            annotation.color = color;
        }
        log::debug!("updated {id}");
        Ok(())
    }

    /// Overwrite an annotation's anchor.
    pub fn move_to(&mut self, id: AnnotationId, x: f32, y: f32) -> Result<(), EditorError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(EditorError::NonFinitePosition);
        }
        let annotation = self.get_mut(id)?;
        annotation.x = x;
        annotation.y = y;
        log::trace!("moved {id} to ({x}, {y})");
        Ok(())
    }

    /// Remove an annotation, clearing selection/editing state that pointed at it.
    pub fn remove(&mut self, id: AnnotationId) -> Result<TextAnnotation, EditorError> {
        let Some(slot) = self.index.remove(&id) else {
            log::warn!("remove: {id} not found");
            return Err(EditorError::NotFound(id));
        };
        let removed = self.slots[slot].take().ok_or(EditorError::NotFound(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.editing == Some(id) {
            self.editing = None;
        }
        log::debug!("removed {id}");
        if self.slots.len() > 2 * self.index.len() {
            self.compact();
        }
        Ok(removed)
    }

    /// Drop tombstones and renumber the index. Paint order is unchanged.
    fn compact(&mut self) {
        let before = self.slots.len();
        self.slots.retain(Option::is_some);
        self.index = self
            .slots
            .iter()
            .flatten()
            .enumerate()
            .map(|(slot, a)| (a.id, slot))
            .collect();
        log::trace!("compacted overlay store: {before} -> {} slots", self.slots.len());
    }

    /// Set or clear the selection. Unknown ids are rejected and the
    /// previous selection is kept.
    pub fn select(&mut self, id: Option<AnnotationId>) -> Result<(), EditorError> {
        if let Some(id) = id
            && !self.contains(id)
        {
            log::warn!("select: {id} not found");
            return Err(EditorError::NotFound(id));
        }
        self.selected = id;
        Ok(())
    }

    /// Snapshot an annotation's fields for an edit form and mark it as being
    /// edited. The annotation itself is untouched until `update`.
    pub fn begin_edit(&mut self, id: AnnotationId) -> Result<EditSnapshot, EditorError> {
        let snapshot = self
            .get(id)
            .map(EditSnapshot::from)
            .ok_or(EditorError::NotFound(id))?;
        self.editing = Some(id);
        Ok(snapshot)
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    pub fn get(&self, id: AnnotationId) -> Option<&TextAnnotation> {
        let slot = *self.index.get(&id)?;
        self.slots.get(slot)?.as_ref()
    }

    fn get_mut(&mut self, id: AnnotationId) -> Result<&mut TextAnnotation, EditorError> {
        let Some(&slot) = self.index.get(&id) else {
            log::warn!("{id} not found");
            return Err(EditorError::NotFound(id));
        };
        self.slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .ok_or(EditorError::NotFound(id))
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.index.contains_key(&id)
    }

    /// Annotations in paint order (bottom first). Reverse it for hit testing.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TextAnnotation> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn ids(&self) -> Vec<AnnotationId> {
        self.iter().map(|a| a.id).collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn editing(&self) -> Option<AnnotationId> {
        self.editing
    }

    /// Drop every annotation and all selection/editing state. Ids already
    /// issued are not handed out again.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.selected = None;
        self.editing = None;
    }
}
