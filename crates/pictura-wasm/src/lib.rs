//! WASM bridge for PicturaMind: exposes the annotation editor to the page.
//!
//! Compiled via `wasm-pack build --target web`. JS owns the DOM (dialog,
//! form inputs, share menu); Rust owns the annotations, pointer logic and
//! pixels. Methods return `bool` or JSON strings so the JS side stays thin.

use pictura_core::request::{GenerateRequest, decode_image_payload};
use pictura_core::share::{DOWNLOAD_FILE_NAME, SHARE_FILE_NAME, SHARE_TITLE, ShareTarget};
use pictura_core::{AnnotationId, EditorConfig, EditorError};
use pictura_editor::{AnnotationEditor, EditorHost, FormMode, Intent, PointerEvent};
use pictura_render::{ExportedImage, Typeface};
use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, ImageData};

/// The editor dialog's controller. One instance per page; `open` starts a
/// session on an image and `save`/`cancel` end it.
#[wasm_bindgen]
pub struct PicturaEditor {
    editor: AnnotationEditor,
    /// Message of the most recent rejected operation, for toasts.
    last_error: Option<String>,
}

impl Default for PicturaEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PicturaEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            editor: AnnotationEditor::default(),
            last_error: None,
        }
    }

    /// Create with a JSON `EditorConfig`. Falls back to defaults on bad JSON.
    pub fn with_config(json: &str) -> Self {
        console_error_panic_hook_setup();
        let config = EditorConfig::from_json(json).unwrap_or_else(|e| {
            log::warn!("ignoring editor config: {e}");
            EditorConfig::default()
        });
        Self {
            editor: AnnotationEditor::new(config, Typeface::default()),
            last_error: None,
        }
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Open on encoded PNG/JPEG bytes. Returns `false` if they don't decode.
    pub fn open(&mut self, bytes: &[u8]) -> bool {
        let result = self.editor.open_encoded(bytes);
        self.record(result).is_some()
    }

    /// Open on a `data:image/...;base64,` URL or the bare base64 of a
    /// generation response.
    pub fn open_base64(&mut self, data: &str) -> bool {
        let result =
            decode_image_payload(data).and_then(|bytes| self.editor.open_encoded(&bytes));
        self.record(result).is_some()
    }

    /// Use a TTF/OTF font for measuring and drawing text.
    pub fn load_font(&mut self, bytes: Vec<u8>) -> bool {
        match Typeface::from_font_bytes(bytes) {
            Ok(face) => {
                self.editor.set_typeface(face);
                true
            }
            Err(e) => {
                self.record::<()>(Err(e));
                false
            }
        }
    }

    /// Export, call `on_save(dataUrl)` once, and close.
    pub fn save(&mut self, on_save: &js_sys::Function) -> bool {
        let mut host = JsHost {
            on_save: Some(on_save),
            on_close: None,
        };
        let result = self.editor.save(&mut host);
        self.record(result).is_some()
    }

    /// Close without exporting, calling `on_close()`.
    pub fn cancel(&mut self, on_close: &js_sys::Function) -> bool {
        let mut host = JsHost {
            on_save: None,
            on_close: Some(on_close),
        };
        let result = self.editor.cancel(&mut host);
        self.record(result).is_some()
    }

    pub fn is_open(&self) -> bool {
        self.editor.is_open()
    }

    pub fn width(&self) -> u32 {
        self.editor.compositor().size().map_or(0, |(w, _)| w)
    }

    pub fn height(&self) -> u32 {
        self.editor.compositor().size().map_or(0, |(_, h)| h)
    }

    /// Message from the last failed call, or empty.
    pub fn last_error(&self) -> String {
        self.last_error.clone().unwrap_or_default()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Returns the intent as JSON (see `intent_json`), or `""` when ignored.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32, time_ms: f64) -> String {
        self.pointer(PointerEvent::from_pointer_down(x, y, time_ms))
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> String {
        self.pointer(PointerEvent::from_pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> String {
        self.pointer(PointerEvent::from_pointer_up(x, y))
    }

    pub fn handle_pointer_leave(&mut self) -> String {
        self.pointer(PointerEvent::PointerLeave)
    }

    // ─── Edit form ───────────────────────────────────────────────────────

    pub fn open_add_form(&mut self) -> bool {
        let result = self.editor.open_add_form();
        self.record(result).is_some()
    }

    pub fn set_form_text(&mut self, text: &str) -> bool {
        let result = self.editor.set_form_text(text);
        self.record(result).is_some()
    }

    pub fn set_form_color(&mut self, color: &str) -> bool {
        let result = self.editor.set_form_color(color);
        self.record(result).is_some()
    }

    /// Returns the new font size, or 0 when the editor is closed.
    pub fn grow_font(&mut self) -> u32 {
        let result = self.editor.grow_form_font();
        self.record(result).unwrap_or(0)
    }

    pub fn shrink_font(&mut self) -> u32 {
        let result = self.editor.shrink_form_font();
        self.record(result).unwrap_or(0)
    }

    /// Returns the id of the added/updated annotation, or `""` on rejection.
    pub fn submit_form(&mut self) -> String {
        let result = self.editor.submit_form();
        self.record(result)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn delete_from_form(&mut self) -> bool {
        let result = self.editor.delete_from_form();
        matches!(self.record(result), Some(Some(_)))
    }

    pub fn cancel_form(&mut self) -> bool {
        let result = self.editor.cancel_form();
        self.record(result).is_some()
    }

    /// Form state as JSON:
    /// `{"open":bool,"mode":"add"|"edit"|null,"text":..,"fontSize":..,"color":..}`.
    pub fn form_json(&self) -> String {
        let form = self.editor.form();
        let mode = match form.mode() {
            Some(FormMode::Adding) => Some("add"),
            Some(FormMode::Editing(_)) => Some("edit"),
            None => None,
        };
        serde_json::json!({
            "open": form.is_open(),
            "mode": mode,
            "text": form.text(),
            "fontSize": form.font_size(),
            "color": form.color().to_hex(),
        })
        .to_string()
    }

    // ─── Direct annotation access ────────────────────────────────────────

    /// All annotations in paint order as a JSON array.
    pub fn annotations_json(&self) -> String {
        let annotations: Vec<_> = self.editor.store().iter().collect();
        serde_json::to_string(&annotations).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn get_selected_id(&self) -> String {
        self.editor
            .store()
            .selected()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Remove by the `text_<n>` id the editor handed out.
    pub fn remove_annotation(&mut self, id: &str) -> bool {
        let result = id
            .parse::<AnnotationId>()
            .and_then(|id| self.editor.remove_text(id));
        self.record(result).is_some()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Copy the composited surface onto a Canvas2D context at the origin.
    pub fn present(&self, ctx: &CanvasRenderingContext2d) -> bool {
        let Some(surface) = self.editor.compositor().snapshot() else {
            return false;
        };
        let (width, height) = surface.dimensions();
        let data =
            match ImageData::new_with_u8_clamped_array_and_sh(Clamped(surface.as_raw()), width, height) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("ImageData rejected surface: {e:?}");
                    return false;
                }
            };
        ctx.put_image_data(&data, 0.0, 0.0).is_ok()
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl PicturaEditor {
    fn pointer(&mut self, event: PointerEvent) -> String {
        let result = self.editor.pointer(event);
        self.record(result)
            .flatten()
            .map(|intent| intent_json(&intent))
            .unwrap_or_default()
    }

    /// Remember a rejection for `last_error` and turn the result into an
    /// option for the JS-facing return value.
    fn record<T>(&mut self, result: Result<T, EditorError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(e) => {
                log::debug!("rejected: {e}");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }
}

/// `{"intent":"select"|"drag"|"edit"|"deselect","id":..,"x":..,"y":..}`
fn intent_json(intent: &Intent) -> String {
    let value = match intent {
        Intent::Select(id) => serde_json::json!({ "intent": "select", "id": id.to_string() }),
        Intent::DragMove { id, x, y } => {
            serde_json::json!({ "intent": "drag", "id": id.to_string(), "x": x, "y": y })
        }
        Intent::EditRequest(id) => serde_json::json!({ "intent": "edit", "id": id.to_string() }),
        Intent::Deselect => serde_json::json!({ "intent": "deselect" }),
    };
    value.to_string()
}

/// Forwards editor callbacks to JS functions.
struct JsHost<'a> {
    on_save: Option<&'a js_sys::Function>,
    on_close: Option<&'a js_sys::Function>,
}

impl EditorHost for JsHost<'_> {
    fn save(&mut self, image: ExportedImage) {
        if let Some(f) = self.on_save
            && let Err(e) = f.call1(&JsValue::NULL, &JsValue::from_str(&image.to_data_url()))
        {
            log::warn!("save callback threw: {e:?}");
        }
    }

    fn close(&mut self) {
        if let Some(f) = self.on_close
            && let Err(e) = f.call0(&JsValue::NULL)
        {
            log::warn!("close callback threw: {e:?}");
        }
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("PicturaMind WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone page helpers (no editor needed) ──────────────────────────

/// JSON body for the generation endpoint, or `""` for a blank prompt.
#[wasm_bindgen]
pub fn generate_request_json(prompt: &str, user_api_key: &str, iterative_mode: bool) -> String {
    GenerateRequest::new(prompt, user_api_key, iterative_mode)
        .map(|r| r.to_json())
        .unwrap_or_default()
}

/// Share menu entries as JSON:
/// `[{"label":..,"text":..,"fallbackUrl":..,"attachesFile":..}, ...]`.
#[wasm_bindgen]
pub fn share_targets_json() -> String {
    let targets: Vec<_> = ShareTarget::ALL
        .iter()
        .map(|t| {
            serde_json::json!({
                "label": t.label(),
                "text": t.share_text(),
                "fallbackUrl": t.fallback_url(),
                "attachesFile": t.attaches_file(),
            })
        })
        .collect();
    serde_json::json!({
        "title": SHARE_TITLE,
        "shareFileName": SHARE_FILE_NAME,
        "downloadFileName": DOWNLOAD_FILE_NAME,
        "targets": targets,
    })
    .to_string()
}
