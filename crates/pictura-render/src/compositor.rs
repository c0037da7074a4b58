//! Compositor: base image + text annotations → pixel surface → export.
//!
//! `repaint` always redraws from scratch: clear, blit the base image at the
//! origin, draw every annotation in store order, then outline the selected
//! one. It keeps no state besides the surface itself, so calling it twice in
//! a row produces the same pixels.

use crate::hit::text_bounds;
use crate::raster::{BaseImage, ExportedImage, encode, pixmap_to_rgba};
use crate::text::Typeface;
use image::RgbaImage;
use pictura_core::{Color, EditorConfig, EditorError, OverlayStore, TextAnnotation};
use tiny_skia::{Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

/// Outline drawn around the selected annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    pub color: Color,
    pub width: f32,
}

impl From<&EditorConfig> for HighlightStyle {
    fn from(config: &EditorConfig) -> Self {
        Self {
            color: config.highlight_color,
            width: config.highlight_width,
        }
    }
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

#[derive(Debug, Default)]
pub struct Compositor {
    base: Option<BaseImage>,
    surface: Option<Pixmap>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a decoded base image and size the surface to it.
    pub fn attach(&mut self, base: BaseImage) -> Result<(), EditorError> {
        let surface = Pixmap::new(base.width(), base.height()).ok_or_else(|| {
            EditorError::Decode(format!("unusable size {}x{}", base.width(), base.height()))
        })?;
        log::debug!("compositor attached {}x{} surface", base.width(), base.height());
        self.base = Some(base);
        self.surface = Some(surface);
        Ok(())
    }

    /// Drop the base image and the surface.
    pub fn release(&mut self) {
        self.base = None;
        self.surface = None;
    }

    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.surface.as_ref().map(|s| (s.width(), s.height()))
    }

    /// Redraw the whole surface. Returns `false` when no base image is attached.
    pub fn repaint(
        &mut self,
        store: &OverlayStore,
        typeface: &Typeface,
        highlight: HighlightStyle,
    ) -> bool {
        let (Some(base), Some(surface)) = (self.base.as_ref(), self.surface.as_mut()) else {
            return false;
        };

        surface.fill(tiny_skia::Color::TRANSPARENT);
        surface.draw_pixmap(
            0,
            0,
            base.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        if let Some(mut mask) = Mask::new(surface.width(), surface.height()) {
            for annotation in store.iter() {
                paint_text(surface, &mut mask, typeface, annotation);
            }
        }

        if let Some(selected) = store.selected().and_then(|id| store.get(id)) {
            paint_highlight(surface, typeface, selected, highlight);
        }

        log::trace!("repainted {} annotations", store.len());
        true
    }

    /// Encode the surface exactly as last painted.
    pub fn export(&self) -> Result<ExportedImage, EditorError> {
        let (Some(base), Some(surface)) = (self.base.as_ref(), self.surface.as_ref()) else {
            return Err(EditorError::ExportUnavailable);
        };
        encode(pixmap_to_rgba(surface), base.format())
    }

    /// Unpremultiplied copy of the surface.
    pub fn snapshot(&self) -> Option<RgbaImage> {
        self.surface.as_ref().map(pixmap_to_rgba)
    }

    /// Unpremultiplied RGBA of one surface pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.surface.as_ref()?.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Accumulate glyph coverage into `mask`, then fill the covered region with
/// the annotation color.
fn paint_text(surface: &mut Pixmap, mask: &mut Mask, typeface: &Typeface, text: &TextAnnotation) {
    let (w, h) = (surface.width() as i32, surface.height() as i32);
    let data = mask.data_mut();
    data.fill(0);

    let mut covered: Option<(i32, i32, i32, i32)> = None;
    typeface.rasterize(&text.content, text.font_size as f32, text.x, text.y, |px, py, c| {
        if px < 0 || py < 0 || px >= w || py >= h {
            return;
        }
        let idx = (py * w + px) as usize;
        let value = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        data[idx] = data[idx].max(value);
        covered = Some(match covered {
            Some((x0, y0, x1, y1)) => (x0.min(px), y0.min(py), x1.max(px), y1.max(py)),
            None => (px, py, px, py),
        });
    });

    // Entirely off-canvas text has nothing to fill.
    let Some((x0, y0, x1, y1)) = covered else {
        return;
    };
    let Some(region) = Rect::from_ltrb(x0 as f32, y0 as f32, (x1 + 1) as f32, (y1 + 1) as f32)
    else {
        return;
    };
    surface.fill_rect(region, &paint_for(text.color), Transform::identity(), Some(&*mask));
}

fn paint_highlight(
    surface: &mut Pixmap,
    typeface: &Typeface,
    text: &TextAnnotation,
    style: HighlightStyle,
) {
    let bounds = text_bounds(typeface, text);
    let Some(rect) = Rect::from_ltrb(
        bounds.x0 as f32,
        bounds.y0 as f32,
        bounds.x1 as f32,
        bounds.y1 as f32,
    ) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let stroke = Stroke {
        width: style.width,
        ..Default::default()
    };
    surface.stroke_path(&path, &paint_for(style.color), &stroke, Transform::identity(), None);
}
