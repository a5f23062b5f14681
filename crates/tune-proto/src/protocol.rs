use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError, Category, Track};
use crate::query::QueryState;
use crate::selection::{Direction, Selection};

/// Messages sent from the UI to the session core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    EnterMain,
    SelectTrack { id: String },
    Advance { direction: Direction },
    TogglePlayPause,
    SetCarouselIndex { index: usize },
    SetActiveCategory { id: String },
    SubmitQuery { text: String },
    DismissResult,
}

/// Which top-level screen is shown.  Splash → Main only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Splash,
    Main,
}

/// Full snapshot of the session.  `rev` is a monotonically increasing counter
/// incremented every time anything in the snapshot changes.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub rev: u64,
    pub catalog: Arc<Catalog>,
    pub selection: Selection,
    pub query: QueryState,
    pub view_mode: ViewMode,
}

impl SessionState {
    /// Validates the catalog; an empty or ambiguous library is a startup error.
    pub fn new(catalog: Catalog, view_mode: ViewMode) -> Result<Self, CatalogError> {
        catalog.validate()?;
        let selection = Selection::initial(&catalog).ok_or(CatalogError::Empty)?;
        Ok(Self {
            rev: 1,
            catalog: Arc::new(catalog),
            selection,
            query: QueryState::default(),
            view_mode,
        })
    }

    /// The track the pointer resolves to.  `None` only after a lookup miss.
    pub fn current_track(&self) -> Option<&Track> {
        self.catalog.track_by_id(&self.selection.current_track_id)
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.selection.current_track_id == id
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.catalog.category_by_id(&self.selection.active_category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_on_first_track() {
        let state = SessionState::new(Catalog::seed(), ViewMode::Splash).unwrap();
        assert_eq!(state.rev, 1);
        assert_eq!(state.current_track().unwrap().title, "Echoes of Midnight");
        assert_eq!(state.active_category().unwrap().label, "All");
        assert!(!state.query.is_loading);
        assert_eq!(state.view_mode, ViewMode::Splash);
    }

    #[test]
    fn empty_catalog_fails_fast() {
        let err = SessionState::new(Catalog::default(), ViewMode::Main).unwrap_err();
        assert_eq!(err, CatalogError::Empty);
    }
}
