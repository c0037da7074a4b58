pub mod color;
pub mod config;
pub mod debounce;
pub mod error;
pub mod history;
pub mod id;
pub mod model;
pub mod request;
pub mod share;
pub mod store;

pub use color::{Color, parse_color};
pub use config::EditorConfig;
pub use error::EditorError;
pub use id::AnnotationId;
pub use model::*;
pub use store::OverlayStore;
