/// Central application state
///
/// Everything the GUI mutates behind one lock: the editing session, the
/// batch conversion queue, persisted preferences, and the status line.
use crate::config::Config;
use crate::state::convert_queue::ConvertQueue;
use crate::state::session::Session;

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub convert_queue: ConvertQueue,
    pub config: Config,

    /// Latest user-facing status, shown in the footer
    pub status_message: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: Session::new(),
            convert_queue: ConvertQueue::new(),
            config: Config::default(),
            status_message: "Drop an SVG file to begin".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_empty() {
        let state = AppState::default();
        assert!(!state.session.is_loaded());
        assert!(state.convert_queue.is_empty());
        assert_eq!(state.status_message, "Drop an SVG file to begin");
    }
}
