//! StateManager: owner of the single session record.
//!
//! The session core is the only writer; the UI reads snapshots after each
//! `StateUpdated` broadcast.  Every mutating method bumps `rev` when it
//! actually changed something.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::{Catalog, CatalogError};
use crate::protocol::{SessionState, ViewMode};
use crate::query::QueryTicket;
use crate::selection::{Direction, SelectOutcome};

pub struct StateManager {
    state: Arc<RwLock<SessionState>>,
}

impl StateManager {
    pub fn new(catalog: Catalog, view_mode: ViewMode) -> Result<Self, CatalogError> {
        let state = SessionState::new(catalog, view_mode)?;
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    pub async fn get_state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Returns `false` when the session was already in the main view.
    pub async fn enter_main(&self) -> bool {
        let mut state = self.state.write().await;
        if state.view_mode == ViewMode::Main {
            return false;
        }
        state.view_mode = ViewMode::Main;
        state.rev += 1;
        true
    }

    pub async fn select_track(&self, id: &str) -> SelectOutcome {
        let mut state = self.state.write().await;
        let catalog = Arc::clone(&state.catalog);
        let outcome = state.selection.select_track(&catalog, id);
        state.rev += 1;
        outcome
    }

    pub async fn advance(&self, direction: Direction) -> Option<usize> {
        let mut state = self.state.write().await;
        let catalog = Arc::clone(&state.catalog);
        let moved = state.selection.advance(&catalog, direction);
        if moved.is_some() {
            state.rev += 1;
        }
        moved
    }

    pub async fn toggle_play_pause(&self) -> bool {
        let mut state = self.state.write().await;
        state.selection.toggle_play_pause();
        state.rev += 1;
        state.selection.is_playing
    }

    pub async fn set_carousel_index(&self, index: usize) -> Option<usize> {
        let mut state = self.state.write().await;
        let catalog = Arc::clone(&state.catalog);
        let moved = state.selection.set_carousel_index(&catalog, index);
        if moved.is_some() {
            state.rev += 1;
        }
        moved
    }

    pub async fn set_active_category(&self, id: &str) {
        let mut state = self.state.write().await;
        state.selection.set_active_category(id);
        state.rev += 1;
    }

    /// Guard + trigger half of a query submission.  `None` means the text was
    /// blank and nothing changed.
    pub async fn begin_query(&self, text: &str) -> Option<QueryTicket> {
        let mut state = self.state.write().await;
        let ticket = state.query.submit(text)?;
        state.rev += 1;
        Some(ticket)
    }

    /// Returns `false` if the response belonged to a superseded submission.
    pub async fn resolve_query(&self, ticket: QueryTicket, text: String) -> bool {
        let mut state = self.state.write().await;
        let applied = state.query.resolve(ticket, text);
        if applied {
            state.rev += 1;
        }
        applied
    }

    pub async fn dismiss_result(&self) {
        let mut state = self.state.write().await;
        state.query.dismiss_result();
        state.rev += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> StateManager {
        StateManager::new(Catalog::seed(), ViewMode::Splash).unwrap()
    }

    #[tokio::test]
    async fn rev_bumps_only_on_change() {
        let sm = manager();
        let r0 = sm.get_state().await.rev;
        assert!(sm.begin_query("  ").await.is_none());
        assert_eq!(sm.get_state().await.rev, r0);

        sm.toggle_play_pause().await;
        assert_eq!(sm.get_state().await.rev, r0 + 1);
    }

    #[tokio::test]
    async fn enter_main_is_one_way() {
        let sm = manager();
        assert!(sm.enter_main().await);
        assert!(!sm.enter_main().await);
        assert_eq!(sm.get_state().await.view_mode, ViewMode::Main);
    }

    #[tokio::test]
    async fn selection_ops_keep_views_in_sync() {
        let sm = manager();
        assert_eq!(sm.select_track("5").await, SelectOutcome::Synced(4));
        assert_eq!(sm.advance(Direction::Next).await, Some(5));
        assert_eq!(sm.advance(Direction::Next).await, Some(0));
        assert_eq!(sm.set_carousel_index(3).await, Some(3));

        let state = sm.get_state().await;
        assert_eq!(state.current_track().unwrap().title, "Electric Dreams");
        assert!(state.selection.is_synced(&state.catalog));
        assert!(state.selection.is_playing);
    }

    #[tokio::test]
    async fn query_lifecycle_through_manager() {
        let sm = manager();
        let ticket = sm.begin_query("late night coding").await.unwrap();
        assert!(sm.get_state().await.query.is_loading);

        assert!(sm.resolve_query(ticket, "1. Song - Artist".to_string()).await);
        let state = sm.get_state().await;
        assert!(!state.query.is_loading);
        assert_eq!(state.query.last_result.as_deref(), Some("1. Song - Artist"));

        sm.dismiss_result().await;
        assert_eq!(sm.get_state().await.query.last_result, None);
    }
}
