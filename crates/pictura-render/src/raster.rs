//! Raster boundary: decoding the base image and encoding the export.
//!
//! The base image is decoded once into a premultiplied `Pixmap` and held
//! for as long as the editor is open; every repaint blits from it.

use image::{DynamicImage, ImageFormat, RgbaImage};
use pictura_core::EditorError;
use pictura_core::request::to_data_url;
use std::io::Cursor;
use tiny_skia::{ColorU8, Pixmap};

/// Encoding used for the exported composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Decoded base image.
#[derive(Debug, Clone)]
pub struct BaseImage {
    pixmap: Pixmap,
    format: ExportFormat,
}

impl BaseImage {
    /// Decode an encoded image (PNG or JPEG). The export will use the same
    /// encoding family.
    pub fn decode(bytes: &[u8]) -> Result<Self, EditorError> {
        let format = image::guess_format(bytes).map_err(|e| EditorError::Decode(e.to_string()))?;
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| EditorError::Decode(e.to_string()))?
            .to_rgba8();
        let export = match format {
            ImageFormat::Jpeg => ExportFormat::Jpeg,
            _ => ExportFormat::Png,
        };
        Self::from_image(&decoded, export)
    }

    /// Wrap a raw RGBA8 (non-premultiplied) pixel buffer. Exports as PNG.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditorError> {
        let image = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            EditorError::Decode(format!("pixel buffer does not match {width}x{height}"))
        })?;
        Self::from_image(&image, ExportFormat::Png)
    }

    fn from_image(image: &RgbaImage, format: ExportFormat) -> Result<Self, EditorError> {
        let pixmap = rgba_to_pixmap(image).ok_or_else(|| {
            EditorError::Decode(format!(
                "unusable image size {}x{}",
                image.width(),
                image.height()
            ))
        })?;
        Ok(Self { pixmap, format })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// The flattened composite, encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
}

impl ExportedImage {
    pub fn to_data_url(&self) -> String {
        to_data_url(self.format.mime(), &self.bytes)
    }

    /// Decode the payload back into pixels.
    pub fn decode(&self) -> Result<RgbaImage, EditorError> {
        image::load_from_memory(&self.bytes)
            .map(|img| img.to_rgba8())
            .map_err(|e| EditorError::Decode(e.to_string()))
    }
}

pub(crate) fn rgba_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

pub(crate) fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

pub(crate) fn encode(image: RgbaImage, format: ExportFormat) -> Result<ExportedImage, EditorError> {
    let (width, height) = image.dimensions();
    let mut bytes = Vec::new();
    let mut cursor = Cursor::new(&mut bytes);
    let result = match format {
        ExportFormat::Png => DynamicImage::ImageRgba8(image).write_to(&mut cursor, ImageFormat::Png),
        // JPEG has no alpha channel.
        ExportFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8())
            .write_to(&mut cursor, ImageFormat::Jpeg),
    };
    result.map_err(|e| EditorError::Encode(e.to_string()))?;
    Ok(ExportedImage {
        bytes,
        format,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([200, 30, 30, 255])
            } else {
                image::Rgba([10, 10, 10, 255])
            }
        })
    }

    #[test]
    fn raw_buffer_size_is_checked() {
        assert!(matches!(
            BaseImage::from_rgba(4, 4, vec![0; 10]),
            Err(EditorError::Decode(_))
        ));
        assert!(matches!(
            BaseImage::from_rgba(0, 0, Vec::new()),
            Err(EditorError::Decode(_))
        ));
    }

    #[test]
    fn png_input_exports_as_png() {
        let img = checker(8, 6);
        let png = encode(img.clone(), ExportFormat::Png).unwrap();
        let base = BaseImage::decode(&png.bytes).unwrap();
        assert_eq!((base.width(), base.height()), (8, 6));
        assert_eq!(base.format(), ExportFormat::Png);
        assert_eq!(pixmap_to_rgba(base.pixmap()), img);
    }

    #[test]
    fn jpeg_input_exports_as_jpeg() {
        let jpeg = encode(checker(16, 16), ExportFormat::Jpeg).unwrap();
        let base = BaseImage::decode(&jpeg.bytes).unwrap();
        assert_eq!(base.format(), ExportFormat::Jpeg);
        assert!(jpeg.to_data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn undecodable_bytes_are_rejected() {
        assert!(matches!(
            BaseImage::decode(b"definitely not an image"),
            Err(EditorError::Decode(_))
        ));
    }
}
