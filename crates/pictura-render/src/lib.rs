pub mod compositor;
pub mod hit;
pub mod raster;
pub mod text;

pub use compositor::{Compositor, HighlightStyle};
pub use hit::{hit_bounds, hit_test, text_bounds};
pub use raster::{BaseImage, ExportFormat, ExportedImage};
pub use text::Typeface;
