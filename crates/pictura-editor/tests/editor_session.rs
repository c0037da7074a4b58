//! Integration tests: full editor sessions.
//!
//! Open → annotate with pointer and form → save or cancel, checking what
//! the host receives and what the surface shows along the way.

use pictura_core::{AnnotationPatch, Color, EditorError, parse_color};
use pictura_editor::{AnnotationEditor, EditorHost, EditorPhase, FormMode, Intent, PointerEvent};
use pictura_render::{BaseImage, ExportFormat, ExportedImage};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn black(width: u32, height: u32) -> BaseImage {
    BaseImage::from_rgba(width, height, [0, 0, 0, 255].repeat((width * height) as usize)).unwrap()
}

#[derive(Default)]
struct RecordingHost {
    saved: Vec<ExportedImage>,
    closed: usize,
}

impl EditorHost for RecordingHost {
    fn save(&mut self, image: ExportedImage) {
        self.saved.push(image);
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

fn down(x: f32, y: f32, ms: u64) -> PointerEvent {
    PointerEvent::PointerDown {
        x,
        y,
        time: Duration::from_millis(ms),
    }
}

// ─── Save ────────────────────────────────────────────────────────────────

#[test]
fn add_move_and_save_flattens_text() {
    init_logging();
    let mut editor = AnnotationEditor::default();
    editor.open(black(100, 100)).unwrap();
    let id = editor
        .add_text("Hi", 32, parse_color("#ffffff").unwrap())
        .unwrap();
    editor.move_text(id, 10.0, 10.0).unwrap();

    let a = editor.store().get(id).unwrap();
    assert_eq!(a.content, "Hi");
    assert_eq!(a.position(), (10.0, 10.0));
    assert_eq!(a.font_size, 32);

    let mut host = RecordingHost::default();
    editor.save(&mut host).unwrap();

    assert_eq!(host.saved.len(), 1);
    assert_eq!(host.closed, 0);
    let exported = &host.saved[0];
    assert_eq!(exported.format, ExportFormat::Png);
    let pixels = exported.decode().unwrap();
    assert_eq!(pixels.dimensions(), (100, 100));
    assert_ne!(pixels.get_pixel(15, 5).0, [0, 0, 0, 255]);

    assert_eq!(editor.phase(), EditorPhase::Closed);
    assert!(editor.store().is_empty());
    assert_eq!(editor.export(), Err(EditorError::ExportUnavailable));
}

#[test]
fn saved_image_has_no_selection_outline() {
    init_logging();
    let mut editor = AnnotationEditor::default();
    editor.open(black(120, 120)).unwrap();
    let id = editor.add_text("Hi", 32, Color::WHITE).unwrap();
    editor.select(Some(id)).unwrap();
    // Tight box top edge is y = 82 - 32 = 50, x 50..88.4.
    let [_, g, _, _] = editor.compositor().pixel(70, 50).unwrap();
    assert!(g > 200);

    let mut host = RecordingHost::default();
    editor.save(&mut host).unwrap();
    let pixels = host.saved[0].decode().unwrap();
    assert_eq!(pixels.get_pixel(70, 49).0, [0, 0, 0, 255]);
}

#[test]
fn save_on_closed_editor_never_reaches_host() {
    let mut editor = AnnotationEditor::default();
    let mut host = RecordingHost::default();
    assert_eq!(editor.save(&mut host), Err(EditorError::NotOpen));
    assert_eq!(editor.cancel(&mut host), Err(EditorError::NotOpen));
    assert!(host.saved.is_empty());
    assert_eq!(host.closed, 0);
}

// ─── Cancel ──────────────────────────────────────────────────────────────

#[test]
fn cancel_closes_without_payload() {
    init_logging();
    let mut editor = AnnotationEditor::default();
    editor.open(black(50, 50)).unwrap();
    editor.add_text("draft", 20, Color::WHITE).unwrap();

    let mut host = RecordingHost::default();
    editor.cancel(&mut host).unwrap();
    assert_eq!(host.closed, 1);
    assert!(host.saved.is_empty());
    assert_eq!(editor.phase(), EditorPhase::Closed);
    assert!(editor.store().is_empty());
    assert_eq!(
        editor.add_text("late", 20, Color::WHITE),
        Err(EditorError::NotOpen)
    );
}

// ─── Pointer gestures ────────────────────────────────────────────────────

#[test]
fn click_drag_release_moves_text() {
    init_logging();
    let mut editor = AnnotationEditor::default();
    editor.open(black(200, 200)).unwrap();
    let id = editor.add_text("Hi", 32, Color::WHITE).unwrap();

    // Padding reaches 5px outside the tight box (x 50..88.4, y 50..82).
    assert_eq!(editor.pointer(down(46.0, 47.0, 0)), Ok(Some(Intent::Select(id))));
    assert_eq!(editor.store().selected(), Some(id));
    editor.pointer(PointerEvent::from_pointer_move(100.0, 150.0)).unwrap();
    editor.pointer(PointerEvent::from_pointer_up(100.0, 150.0)).unwrap();
    editor.pointer(PointerEvent::from_pointer_move(0.0, 0.0)).unwrap();

    assert_eq!(editor.store().get(id).unwrap().position(), (100.0, 150.0));
}

#[test]
fn topmost_annotation_wins_overlap() {
    let mut editor = AnnotationEditor::default();
    editor.open(black(200, 200)).unwrap();
    let _below = editor.add_text("under", 32, Color::WHITE).unwrap();
    let above = editor.add_text("over", 32, Color::WHITE).unwrap();
    assert_eq!(editor.pointer(down(60.0, 70.0, 0)), Ok(Some(Intent::Select(above))));
}

#[test]
fn click_on_empty_space_deselects() {
    let mut editor = AnnotationEditor::default();
    editor.open(black(200, 200)).unwrap();
    let id = editor.add_text("Hi", 32, Color::WHITE).unwrap();
    editor.pointer(down(60.0, 70.0, 0)).unwrap();
    assert_eq!(editor.store().selected(), Some(id));

    assert_eq!(editor.pointer(down(180.0, 180.0, 1_000)), Ok(Some(Intent::Deselect)));
    assert_eq!(editor.store().selected(), None);
}

#[test]
fn quick_hit_after_empty_click_opens_edit_form() {
    let mut editor = AnnotationEditor::default();
    editor.open(black(200, 200)).unwrap();
    let id = editor.add_text("Hi", 32, Color::WHITE).unwrap();

    assert_eq!(editor.pointer(down(180.0, 180.0, 0)), Ok(Some(Intent::Deselect)));
    editor.pointer(PointerEvent::from_pointer_up(180.0, 180.0)).unwrap();
    assert_eq!(
        editor.pointer(down(60.0, 70.0, 150)),
        Ok(Some(Intent::EditRequest(id)))
    );
    assert_eq!(editor.form().mode(), Some(FormMode::Editing(id)));
    assert_eq!(editor.store().selected(), None);
}

#[test]
fn double_click_edit_and_submit() {
    init_logging();
    let mut editor = AnnotationEditor::default();
    editor.open(black(200, 200)).unwrap();
    let id = editor.add_text("Hi", 32, Color::WHITE).unwrap();

    editor.pointer(down(60.0, 70.0, 0)).unwrap();
    editor.pointer(PointerEvent::from_pointer_up(60.0, 70.0)).unwrap();
    assert_eq!(
        editor.pointer(down(60.0, 70.0, 200)),
        Ok(Some(Intent::EditRequest(id)))
    );

    editor.set_form_text("Hello").unwrap();
    editor.set_form_color("rgb(255, 0, 0)").unwrap();
    assert_eq!(editor.grow_form_font(), Ok(36));
    assert_eq!(editor.submit_form(), Ok(id));

    let a = editor.store().get(id).unwrap();
    assert_eq!(a.content, "Hello");
    assert_eq!(a.font_size, 36);
    assert_eq!(a.color.to_hex(), "#ff0000");
    assert_eq!(editor.store().editing(), None);
    assert!(!editor.form().is_open());
}

#[test]
fn form_adds_at_default_position_and_deletes_in_edit_mode() {
    let mut editor = AnnotationEditor::default();
    editor.open(black(200, 200)).unwrap();

    editor.open_add_form().unwrap();
    editor.set_form_text("   ").unwrap();
    assert_eq!(editor.submit_form(), Err(EditorError::BlankContent));
    assert!(editor.form().is_open());

    editor.set_form_text("new").unwrap();
    let id = editor.submit_form().unwrap();
    assert_eq!(editor.store().get(id).unwrap().position(), (50.0, 82.0));

    editor.begin_edit(id).unwrap();
    let removed = editor.delete_from_form().unwrap().unwrap();
    assert_eq!(removed.id, id);
    assert!(editor.store().is_empty());
}

#[test]
fn rejected_operations_leave_editor_usable() {
    let mut editor = AnnotationEditor::default();
    editor.open(black(64, 64)).unwrap();
    let id = editor.add_text("ok", 20, Color::WHITE).unwrap();

    assert_eq!(
        editor.update_text(id, AnnotationPatch::default().content("")),
        Err(EditorError::BlankContent)
    );
    assert_eq!(
        editor.move_text(id, f32::INFINITY, 0.0),
        Err(EditorError::NonFinitePosition)
    );
    assert!(editor.is_open());
    editor.update_text(id, AnnotationPatch::default().content("still ok")).unwrap();
    assert_eq!(editor.store().get(id).unwrap().content, "still ok");
}

#[test]
fn reopen_from_encoded_export() {
    let mut first = AnnotationEditor::default();
    first.open(black(32, 24)).unwrap();
    first.add_text("x", 16, Color::WHITE).unwrap();
    let mut host = RecordingHost::default();
    first.save(&mut host).unwrap();

    let mut second = AnnotationEditor::default();
    second.open_encoded(&host.saved[0].bytes).unwrap();
    assert_eq!(second.compositor().size(), Some((32, 24)));
    assert!(second.store().is_empty());
}
