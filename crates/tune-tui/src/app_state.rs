//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.  The App event-loop replaces
//! `session` with a fresh snapshot after every `StateUpdated` broadcast.

use tune_proto::catalog::Track;
use tune_proto::protocol::SessionState;

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    pub session: SessionState,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn new(session: SessionState) -> Self {
        Self {
            session,
            input_mode: InputMode::Normal,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.session.current_track()
    }

    /// Whether `id` is the now-playing pointer (every list highlights this).
    pub fn is_current(&self, id: &str) -> bool {
        self.session.is_current(id)
    }

    pub fn is_playing(&self) -> bool {
        self.session.selection.is_playing
    }

    pub fn carousel_index(&self) -> usize {
        self.session.selection.carousel_index
    }
}
