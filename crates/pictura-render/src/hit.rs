//! Hit testing: pointer position → annotation lookup.
//!
//! Walks the store in reverse paint order (topmost first) against each
//! annotation's measured text box. The clickable box is the tight glyph box
//! inflated by a padding margin on every side.

use crate::text::Typeface;
use kurbo::{Point, Rect};
use pictura_core::{AnnotationId, OverlayStore, TextAnnotation};

/// Tight box around the measured text: from the anchor to `x + width`
/// horizontally, and `font_size` upward from the baseline.
pub fn text_bounds(typeface: &Typeface, annotation: &TextAnnotation) -> Rect {
    let size = annotation.font_size as f32;
    let width = typeface.measure(&annotation.content, size) as f64;
    let (x, y) = (annotation.x as f64, annotation.y as f64);
    Rect::new(x, y - size as f64, x + width, y)
}

/// Clickable box: `text_bounds` grown by `padding` on all sides.
pub fn hit_bounds(typeface: &Typeface, annotation: &TextAnnotation, padding: f32) -> Rect {
    let pad = padding as f64;
    text_bounds(typeface, annotation).inflate(pad, pad)
}

/// Edges count as inside.
fn contains(rect: &Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Find the topmost annotation at (px, py).
/// Returns `None` if nothing is hit (empty canvas).
pub fn hit_test(
    store: &OverlayStore,
    typeface: &Typeface,
    px: f32,
    py: f32,
    padding: f32,
) -> Option<AnnotationId> {
    let p = Point::new(px as f64, py as f64);
    store
        .iter()
        .rev()
        .find(|a| contains(&hit_bounds(typeface, a, padding), p))
        .map(|a| a.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictura_core::Color;
    use pretty_assertions::assert_eq;

    fn store_with(texts: &[(&str, f32, f32)]) -> (OverlayStore, Vec<AnnotationId>) {
        let mut store = OverlayStore::default();
        let ids = texts
            .iter()
            .map(|&(content, x, y)| {
                let id = store.add(content, 20, Color::WHITE).unwrap();
                store.move_to(id, x, y).unwrap();
                id
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn box_spans_upward_from_baseline() {
        let (store, ids) = store_with(&[("ab", 10.0, 50.0)]);
        let rect = text_bounds(&Typeface::Block, store.get(ids[0]).unwrap());
        assert_eq!((rect.x0, rect.y0, rect.y1), (10.0, 30.0, 50.0));
        assert!((rect.x1 - 34.0).abs() < 1e-4);
    }

    #[test]
    fn padding_extends_clickable_area() {
        let (store, ids) = store_with(&[("ab", 10.0, 50.0)]);
        let face = Typeface::Block;
        assert_eq!(hit_test(&store, &face, 6.0, 53.0, 5.0), Some(ids[0]));
        assert_eq!(hit_test(&store, &face, 6.0, 53.0, 0.0), None);
        assert_eq!(hit_test(&store, &face, 4.0, 40.0, 5.0), None);
    }

    #[test]
    fn topmost_annotation_wins_overlap() {
        let (store, ids) = store_with(&[("under", 10.0, 50.0), ("over", 12.0, 52.0)]);
        assert_eq!(hit_test(&store, &Typeface::Block, 20.0, 45.0, 5.0), Some(ids[1]));
    }

    #[test]
    fn miss_on_empty_space() {
        let (store, _) = store_with(&[("a", 10.0, 50.0)]);
        assert_eq!(hit_test(&store, &Typeface::Block, 300.0, 300.0, 5.0), None);
    }
}
