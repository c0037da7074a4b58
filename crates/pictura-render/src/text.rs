//! Text layout and glyph coverage.
//!
//! A `Typeface` is either a real outline font supplied by the host or the
//! built-in block face. The block face needs no font data: every character
//! advances `0.6 × size` and non-space characters render as a solid
//! cap-height block, so measurement and hit testing stay deterministic
//! before (or without) a font being loaded.

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use pictura_core::EditorError;
use smallvec::SmallVec;

/// Horizontal advance of one block-face character, as a fraction of the size.
pub const BLOCK_ADVANCE: f32 = 0.6;
/// Height of a block-face glyph above the baseline, as a fraction of the size.
const BLOCK_CAP_HEIGHT: f32 = 0.7;
/// Side bearing of a block-face glyph, as a fraction of the size.
const BLOCK_BEARING: f32 = 0.08;

#[derive(Clone, Default)]
pub enum Typeface {
    #[default]
    Block,
    Font(FontArc),
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Typeface::Block => f.write_str("Typeface::Block"),
            Typeface::Font(_) => f.write_str("Typeface::Font(..)"),
        }
    }
}

/// A glyph placed along the baseline, `x` relative to the text origin.
#[derive(Debug, Clone, Copy)]
pub struct PlacedGlyph {
    pub ch: char,
    pub id: GlyphId,
    pub x: f32,
}

/// A single laid-out line of text.
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub glyphs: SmallVec<[PlacedGlyph; 32]>,
    /// Total advance width.
    pub width: f32,
}

impl Typeface {
    /// Load a TrueType/OpenType font from raw bytes.
    pub fn from_font_bytes(bytes: Vec<u8>) -> Result<Self, EditorError> {
        FontArc::try_from_vec(bytes)
            .map(Typeface::Font)
            .map_err(|e| EditorError::Font(e.to_string()))
    }

    /// Lay out `text` on one line at `font_size` pixels.
    pub fn layout(&self, text: &str, font_size: f32) -> TextLayout {
        let mut glyphs = SmallVec::new();
        let mut caret = 0.0f32;

        match self {
            Typeface::Block => {
                for ch in text.chars() {
                    glyphs.push(PlacedGlyph {
                        ch,
                        id: GlyphId(0),
                        x: caret,
                    });
                    caret += font_size * BLOCK_ADVANCE;
                }
            }
            Typeface::Font(font) => {
                let scaled = font.as_scaled(font_size);
                let mut last: Option<GlyphId> = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = last {
                        caret += scaled.kern(prev, id);
                    }
                    glyphs.push(PlacedGlyph { ch, id, x: caret });
                    caret += scaled.h_advance(id);
                    last = Some(id);
                }
            }
        }

        TextLayout {
            glyphs,
            width: caret,
        }
    }

    /// Advance width of `text` at `font_size`.
    pub fn measure(&self, text: &str, font_size: f32) -> f32 {
        self.layout(text, font_size).width
    }

    /// Rasterize `text` with its baseline starting at `(origin_x, origin_y)`.
    /// `plot` receives canvas pixel coordinates and a coverage in `0.0..=1.0`;
    /// coordinates may fall outside the canvas and must be clipped by the caller.
    pub fn rasterize(
        &self,
        text: &str,
        font_size: f32,
        origin_x: f32,
        origin_y: f32,
        mut plot: impl FnMut(i32, i32, f32),
    ) {
        let layout = self.layout(text, font_size);

        match self {
            Typeface::Block => {
                let top = origin_y - font_size * BLOCK_CAP_HEIGHT;
                let inset = font_size * BLOCK_BEARING;
                let width = font_size * BLOCK_ADVANCE - 2.0 * inset;
                for glyph in layout.glyphs.iter().filter(|g| !g.ch.is_whitespace()) {
                    let left = origin_x + glyph.x + inset;
                    fill_block(left, top, left + width, origin_y, &mut plot);
                }
            }
            Typeface::Font(font) => {
                for glyph in &layout.glyphs {
                    let positioned = glyph
                        .id
                        .with_scale_and_position(font_size, point(origin_x + glyph.x, origin_y));
                    if let Some(outlined) = font.outline_glyph(positioned) {
                        let bounds = outlined.px_bounds();
                        let (bx, by) = (bounds.min.x as i32, bounds.min.y as i32);
                        outlined.draw(|px, py, coverage| {
                            plot(bx + px as i32, by + py as i32, coverage);
                        });
                    }
                }
            }
        }
    }
}

/// Plot every pixel whose center lies inside `[x0, x1) × [y0, y1)`.
fn fill_block(x0: f32, y0: f32, x1: f32, y1: f32, plot: &mut impl FnMut(i32, i32, f32)) {
    let first_x = (x0 - 0.5).ceil() as i32;
    let last_x = (x1 - 0.5).ceil() as i32;
    let first_y = (y0 - 0.5).ceil() as i32;
    let last_y = (y1 - 0.5).ceil() as i32;
    for py in first_y..last_y {
        for px in first_x..last_x {
            plot(px, py, 1.0);
        }
    }
}
