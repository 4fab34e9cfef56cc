/// State management module
///
/// Session and queue state for the application, kept free of any GUI types.

pub mod app_state;
pub mod convert_queue;
pub mod session;

// Re-export commonly used types
pub use app_state::AppState;
pub use convert_queue::{ConvertItem, ConvertQueue, ConvertStatus};
pub use session::{Document, Repaint, Session};
