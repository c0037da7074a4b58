//! Integration tests: an outline font loaded through `Typeface::from_font_bytes`.
//!
//! Uses DejaVu Serif (license in `fixtures/DejaVu-LICENSE`). It is
//! proportional, so its metrics are easy to tell apart from the block face.

use pictura_core::{Color, OverlayStore};
use pictura_render::{BaseImage, Compositor, HighlightStyle, Typeface, hit_test};
use pretty_assertions::assert_eq;

static SERIF: &[u8] = include_bytes!("fixtures/DejaVuSerif.ttf");

fn serif() -> Typeface {
    let face = Typeface::from_font_bytes(SERIF.to_vec()).unwrap();
    assert!(matches!(face, Typeface::Font(_)));
    face
}

// ─── Measurement ─────────────────────────────────────────────────────────

#[test]
fn width_grows_with_text() {
    let face = serif();
    assert_eq!(face.measure("", 32.0), 0.0);
    let short = face.measure("Hi", 32.0);
    let long = face.measure("Hi there", 32.0);
    assert!(short > 0.0);
    assert!(short < long, "{short} vs {long}");
    assert!(face.measure("Hi", 16.0) < short);
}

#[test]
fn widths_follow_glyph_shapes() {
    let face = serif();
    let narrow = face.measure("iiii", 32.0);
    let wide = face.measure("MMMM", 32.0);
    assert!(narrow < wide, "{narrow} vs {wide}");
    assert_eq!(Typeface::Block.measure("iiii", 32.0), Typeface::Block.measure("MMMM", 32.0));
}

// ─── Rasterization ───────────────────────────────────────────────────────

#[test]
fn capitals_sit_on_the_baseline() {
    let face = serif();
    let (origin_x, baseline, size) = (10.0, 40.0, 32.0);
    let width = face.measure("HI", size);

    let mut covered = Vec::new();
    face.rasterize("HI", size, origin_x, baseline, |x, y, coverage| {
        if coverage > 0.0 {
            covered.push((x, y));
        }
    });

    assert!(!covered.is_empty());
    for &(x, y) in &covered {
        assert!(y < baseline as i32, "({x}, {y}) below the baseline");
        assert!(y >= (baseline - size) as i32, "({x}, {y}) above the em box");
        assert!(x >= origin_x as i32 - 1 && x <= (origin_x + width) as i32 + 1, "({x}, {y})");
    }
}

#[test]
fn composited_font_text_stays_inside_its_box() {
    let mut compositor = Compositor::new();
    let base = BaseImage::from_rgba(80, 60, [0, 0, 0, 255].repeat(80 * 60)).unwrap();
    compositor.attach(base).unwrap();

    let face = serif();
    let mut store = OverlayStore::default();
    let id = store.add("HI", 32, Color::WHITE).unwrap();
    store.move_to(id, 10.0, 40.0).unwrap();
    assert!(compositor.repaint(&store, &face, HighlightStyle::default()));

    let image = compositor.snapshot().unwrap();
    let changed: Vec<_> = image
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0 != [0, 0, 0, 255])
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!changed.is_empty());
    assert!(changed.iter().all(|&(_, y)| (8..40).contains(&y)), "{changed:?}");
}

// ─── Hit testing ─────────────────────────────────────────────────────────

#[test]
fn hit_test_uses_font_metrics() {
    let face = serif();
    let mut store = OverlayStore::default();
    let id = store.add("iiii", 32, Color::WHITE).unwrap();
    store.move_to(id, 20.0, 60.0).unwrap();
    let width = face.measure("iiii", 32.0);

    assert_eq!(hit_test(&store, &face, 20.0 + width / 2.0, 50.0, 5.0), Some(id));
    assert_eq!(hit_test(&store, &face, 20.0 + width + 4.0, 50.0, 5.0), Some(id));

    // Past the serif box, but still inside what the block face would measure.
    let past = 20.0 + width + 10.0;
    assert_eq!(hit_test(&store, &face, past, 50.0, 5.0), None);
    assert_eq!(hit_test(&store, &Typeface::Block, past, 50.0, 5.0), Some(id));
}
