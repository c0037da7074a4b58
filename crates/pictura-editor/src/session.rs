//! Annotation editor session.
//!
//! Ties the overlay store, pointer interpreter, edit form and compositor
//! together behind one object with an explicit lifecycle:
//!
//! ```text
//! Closed ─open─▶ Opening ─▶ Open ─save──▶ Saving ─────▶ Closed
//!                             └──cancel─▶ Cancelling ─▶ Closed
//! ```
//!
//! Every mutation repaints synchronously, so the surface always reflects
//! the store by the time a method returns.

use crate::form::{EditForm, FormMode};
use crate::input::PointerEvent;
use crate::pointer::{Intent, PointerInterpreter};
use pictura_core::{
    AnnotationId, AnnotationPatch, Color, EditSnapshot, EditorConfig, EditorError, OverlayStore,
    TextAnnotation,
};
use pictura_render::{BaseImage, Compositor, ExportedImage, HighlightStyle, Typeface, hit_test};

/// Callbacks supplied by whoever opened the editor.
pub trait EditorHost {
    /// Receives the flattened image. Called exactly once per save.
    fn save(&mut self, image: ExportedImage);

    /// The editor was dismissed without saving.
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Closed,
    Opening,
    Open,
    Saving,
    Cancelling,
}

#[derive(Debug)]
pub struct AnnotationEditor {
    config: EditorConfig,
    typeface: Typeface,
    phase: EditorPhase,
    store: OverlayStore,
    pointer: PointerInterpreter,
    form: EditForm,
    compositor: Compositor,
}

impl Default for AnnotationEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), Typeface::default())
    }
}

impl AnnotationEditor {
    pub fn new(config: EditorConfig, typeface: Typeface) -> Self {
        Self {
            store: OverlayStore::new(&config),
            pointer: PointerInterpreter::from_config(&config),
            form: EditForm::new(&config),
            compositor: Compositor::new(),
            phase: EditorPhase::Closed,
            typeface,
            config,
        }
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Start a session on `base`. An already-open session is discarded.
    pub fn open(&mut self, base: BaseImage) -> Result<(), EditorError> {
        self.set_phase(EditorPhase::Opening);
        self.reset_session();
        if let Err(err) = self.compositor.attach(base) {
            self.set_phase(EditorPhase::Closed);
            return Err(err);
        }
        self.repaint();
        self.set_phase(EditorPhase::Open);
        Ok(())
    }

    /// Decode an encoded PNG/JPEG and open on it.
    pub fn open_encoded(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let base = BaseImage::decode(bytes)?;
        self.open(base)
    }

    /// Flatten, hand the result to the host, and close. On export failure
    /// the session stays open.
    pub fn save(&mut self, host: &mut impl EditorHost) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.set_phase(EditorPhase::Saving);

        // The selection outline is editor chrome, not part of the image.
        self.form.cancel(&mut self.store);
        self.store.select(None)?;
        self.repaint();

        match self.compositor.export() {
            Ok(image) => {
                log::info!(
                    "saving {}x{} {}",
                    image.width,
                    image.height,
                    image.format.mime()
                );
                host.save(image);
                self.reset_session();
                self.set_phase(EditorPhase::Closed);
                Ok(())
            }
            Err(err) => {
                log::warn!("save failed: {err}");
                self.set_phase(EditorPhase::Open);
                Err(err)
            }
        }
    }

    /// Discard the session and tell the host.
    pub fn cancel(&mut self, host: &mut impl EditorHost) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.set_phase(EditorPhase::Cancelling);
        host.close();
        self.reset_session();
        self.set_phase(EditorPhase::Closed);
        Ok(())
    }

    fn reset_session(&mut self) {
        self.store.clear();
        self.pointer.reset();
        self.form.close();
        self.compositor.release();
    }

    fn set_phase(&mut self, phase: EditorPhase) {
        if self.phase != phase {
            log::debug!("editor {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn ensure_open(&self) -> Result<(), EditorError> {
        if self.phase == EditorPhase::Open {
            Ok(())
        } else {
            Err(EditorError::NotOpen)
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == EditorPhase::Open
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &OverlayStore {
        &self.store
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    /// Swap the typeface (e.g. once a font has loaded) and repaint.
    pub fn set_typeface(&mut self, typeface: Typeface) {
        self.typeface = typeface;
        self.repaint();
    }

    // ─── Store operations ────────────────────────────────────────────────

    pub fn add_text(
        &mut self,
        content: &str,
        font_size: u32,
        color: Color,
    ) -> Result<AnnotationId, EditorError> {
        self.ensure_open()?;
        let id = self.store.add(content, font_size, color)?;
        self.repaint();
        Ok(id)
    }

    pub fn update_text(&mut self, id: AnnotationId, patch: AnnotationPatch) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.store.update(id, patch)?;
        self.repaint();
        Ok(())
    }

    pub fn move_text(&mut self, id: AnnotationId, x: f32, y: f32) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.store.move_to(id, x, y)?;
        self.repaint();
        Ok(())
    }

    pub fn remove_text(&mut self, id: AnnotationId) -> Result<TextAnnotation, EditorError> {
        self.ensure_open()?;
        let removed = self.store.remove(id)?;
        self.pointer.forget(id);
        if self.form.mode() == Some(FormMode::Editing(id)) {
            self.form.close();
        }
        self.repaint();
        Ok(removed)
    }

    pub fn select(&mut self, id: Option<AnnotationId>) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.store.select(id)?;
        self.repaint();
        Ok(())
    }

    /// Mark `id` as being edited and load it into the form.
    pub fn begin_edit(&mut self, id: AnnotationId) -> Result<EditSnapshot, EditorError> {
        self.ensure_open()?;
        let snapshot = self.store.begin_edit(id)?;
        self.form.open_for_edit(snapshot.clone());
        Ok(snapshot)
    }

    pub fn end_edit(&mut self) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.form.cancel(&mut self.store);
        Ok(())
    }

    // ─── Edit form ───────────────────────────────────────────────────────

    pub fn open_add_form(&mut self) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.form.open_for_add(&mut self.store);
        Ok(())
    }

    pub fn set_form_text(&mut self, text: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        self.form.set_text(text);
        Ok(())
    }

    pub fn set_form_color(&mut self, color: &str) -> Result<Color, EditorError> {
        self.ensure_open()?;
        self.form.set_color(color)
    }

    pub fn grow_form_font(&mut self) -> Result<u32, EditorError> {
        self.ensure_open()?;
        Ok(self.form.grow_font())
    }

    pub fn shrink_form_font(&mut self) -> Result<u32, EditorError> {
        self.ensure_open()?;
        Ok(self.form.shrink_font())
    }

    pub fn submit_form(&mut self) -> Result<AnnotationId, EditorError> {
        self.ensure_open()?;
        let id = self.form.submit(&mut self.store)?;
        self.repaint();
        Ok(id)
    }

    pub fn delete_from_form(&mut self) -> Result<Option<TextAnnotation>, EditorError> {
        self.ensure_open()?;
        let removed = self.form.delete(&mut self.store)?;
        if let Some(annotation) = &removed {
            self.pointer.forget(annotation.id);
            self.repaint();
        }
        Ok(removed)
    }

    pub fn cancel_form(&mut self) -> Result<(), EditorError> {
        self.end_edit()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Classify one pointer event and apply the resulting intent.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<Option<Intent>, EditorError> {
        self.ensure_open()?;

        let hit = match event {
            PointerEvent::PointerDown { x, y, .. } => {
                hit_test(&self.store, &self.typeface, x, y, self.config.hit_padding)
            }
            _ => None,
        };
        let Some(intent) = self.pointer.handle(&event, hit) else {
            return Ok(None);
        };
        log::trace!("pointer intent {intent:?}");

        match intent {
            Intent::Select(id) => {
                self.store.select(Some(id))?;
                self.repaint();
            }
            Intent::DragMove { id, x, y } => match self.store.move_to(id, x, y) {
                Ok(()) => {
                    self.repaint();
                }
                Err(err) => {
                    self.pointer.forget(id);
                    return Err(err);
                }
            },
            Intent::EditRequest(id) => {
                let snapshot = self.store.begin_edit(id)?;
                self.form.open_for_edit(snapshot);
            }
            Intent::Deselect => {
                let had_selection = self.store.selected().is_some();
                self.store.select(None)?;
                if had_selection {
                    self.repaint();
                }
            }
        }
        Ok(Some(intent))
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Redraw the surface. Returns `false` when no base image is attached.
    pub fn repaint(&mut self) -> bool {
        self.compositor.repaint(
            &self.store,
            &self.typeface,
            HighlightStyle::from(&self.config),
        )
    }

    /// Encode the surface as last painted.
    pub fn export(&self) -> Result<ExportedImage, EditorError> {
        self.compositor.export()
    }
}
