pub mod form;
pub mod input;
pub mod pointer;
pub mod session;

pub use form::{EditForm, FormMode};
pub use input::PointerEvent;
pub use pointer::{Intent, LastDown, PointerInterpreter, PointerSession};
pub use session::{AnnotationEditor, EditorHost, EditorPhase};
