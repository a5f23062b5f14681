//! Playback/selection state machine.
//!
//! A flat record plus total transition functions.  The one invariant every
//! view relies on: `carousel_index` equals the catalog position of
//! `current_track_id`, except right after a `select_track` whose id is not in
//! the catalog (the pointer moves, the index stays put).

use crate::catalog::Catalog;

/// Step direction for `Selection::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// What `select_track` managed to update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Pointer moved and the carousel index followed it.
    Synced(usize),
    /// Pointer moved but the id is not in the catalog; index untouched.
    IndexUnchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub current_track_id: String,
    pub is_playing: bool,
    pub carousel_index: usize,
    pub active_category_id: String,
}

impl Selection {
    /// Initial selection: first track, paused, first category.
    /// Returns `None` for an empty catalog.
    pub fn initial(catalog: &Catalog) -> Option<Self> {
        let first = catalog.track_at(0)?;
        Some(Self {
            current_track_id: first.id.clone(),
            is_playing: false,
            carousel_index: 0,
            active_category_id: catalog
                .categories()
                .first()
                .map(|c| c.id.clone())
                .unwrap_or_default(),
        })
    }

    pub fn select_track(&mut self, catalog: &Catalog, id: &str) -> SelectOutcome {
        self.current_track_id = id.to_string();
        self.is_playing = true;
        match catalog.position_of(id) {
            Some(idx) => {
                self.carousel_index = idx;
                SelectOutcome::Synced(idx)
            }
            None => SelectOutcome::IndexUnchanged,
        }
    }

    /// Step one track with wraparound.  Returns the new position, or `None`
    /// when the catalog is empty.  Play state is left alone.
    ///
    /// After a lookup miss the pointer has no catalog position, so the step
    /// starts from `carousel_index` (the last synced frame) rather than from
    /// a virtual position −1.  From a miss on track 2 of 3, `Next` lands on
    /// track 3 and `Previous` on track 1, never on an unrelated end of the
    /// catalog.
    pub fn advance(&mut self, catalog: &Catalog, direction: Direction) -> Option<usize> {
        let len = catalog.track_count();
        if len == 0 {
            return None;
        }
        let current = catalog
            .position_of(&self.current_track_id)
            .unwrap_or(self.carousel_index % len);
        let next = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        };
        self.sync_to(catalog, next);
        Some(next)
    }

    pub fn toggle_play_pause(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Carousel-driven selection.  Out-of-range input wraps modulo the
    /// catalog length; an empty catalog is a no-op.
    pub fn set_carousel_index(&mut self, catalog: &Catalog, index: usize) -> Option<usize> {
        let len = catalog.track_count();
        if len == 0 {
            return None;
        }
        let idx = index % len;
        self.sync_to(catalog, idx);
        Some(idx)
    }

    pub fn set_active_category(&mut self, id: &str) {
        self.active_category_id = id.to_string();
    }

    /// True when the index and the pointer agree.
    pub fn is_synced(&self, catalog: &Catalog) -> bool {
        catalog.position_of(&self.current_track_id) == Some(self.carousel_index)
    }

    fn sync_to(&mut self, catalog: &Catalog, idx: usize) {
        if let Some(track) = catalog.track_at(idx) {
            self.current_track_id = track.id.clone();
            self.carousel_index = idx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Track};

    fn abc() -> Catalog {
        let t = |id: &str, title: &str| Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Artist".to_string(),
            cover_url: String::new(),
            duration_secs: 180,
        };
        Catalog::new(
            vec![t("1", "A"), t("2", "B"), t("3", "C")],
            vec![Category {
                id: "all".to_string(),
                label: "All".to_string(),
            }],
        )
    }

    #[test]
    fn initial_points_at_first_track() {
        let catalog = abc();
        let sel = Selection::initial(&catalog).unwrap();
        assert_eq!(sel.current_track_id, "1");
        assert_eq!(sel.carousel_index, 0);
        assert!(!sel.is_playing);
        assert_eq!(sel.active_category_id, "all");
        assert!(Selection::initial(&Catalog::default()).is_none());
    }

    #[test]
    fn wraparound_both_ends() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        sel.set_carousel_index(&catalog, 2);
        assert_eq!(sel.advance(&catalog, Direction::Next), Some(0));
        assert_eq!(sel.current_track_id, "1");
        assert_eq!(sel.advance(&catalog, Direction::Previous), Some(2));
        assert_eq!(sel.current_track_id, "3");
        assert_eq!(sel.carousel_index, 2);
    }

    #[test]
    fn advance_keeps_play_state() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        sel.advance(&catalog, Direction::Next);
        assert!(!sel.is_playing);
        sel.toggle_play_pause();
        sel.advance(&catalog, Direction::Previous);
        assert!(sel.is_playing);
    }

    #[test]
    fn toggle_twice_restores_and_never_moves_pointer() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        sel.select_track(&catalog, "2");
        let before = sel.clone();
        for _ in 0..5 {
            sel.toggle_play_pause();
            assert_eq!(sel.current_track_id, before.current_track_id);
            assert_eq!(sel.carousel_index, before.carousel_index);
        }
        sel.toggle_play_pause();
        assert_eq!(sel, before);
    }

    #[test]
    fn lookup_miss_moves_pointer_but_not_index() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        sel.select_track(&catalog, "2");
        let outcome = sel.select_track(&catalog, "nonexistent-id");
        assert_eq!(outcome, SelectOutcome::IndexUnchanged);
        assert_eq!(sel.current_track_id, "nonexistent-id");
        assert!(sel.is_playing);
        assert_eq!(sel.carousel_index, 1);
        assert!(!sel.is_synced(&catalog));
    }

    #[test]
    fn advance_after_miss_steps_from_carousel_frame() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        sel.select_track(&catalog, "2");
        sel.select_track(&catalog, "ghost");
        assert_eq!(sel.advance(&catalog, Direction::Next), Some(2));
        assert_eq!(sel.current_track_id, "3");
        assert!(sel.is_synced(&catalog));
    }

    #[test]
    fn previous_after_miss_steps_back_from_carousel_frame() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        sel.select_track(&catalog, "2");
        sel.select_track(&catalog, "ghost");
        assert_eq!(sel.advance(&catalog, Direction::Previous), Some(0));
        assert_eq!(sel.current_track_id, "1");
        assert!(sel.is_synced(&catalog));
    }

    #[test]
    fn carousel_index_wraps_out_of_range_input() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        assert_eq!(sel.set_carousel_index(&catalog, 7), Some(1));
        assert_eq!(sel.current_track_id, "2");
        assert!(sel.is_synced(&catalog));
    }

    #[test]
    fn empty_catalog_is_a_no_op() {
        let empty = Catalog::default();
        let mut sel = Selection {
            current_track_id: "1".to_string(),
            is_playing: false,
            carousel_index: 0,
            active_category_id: String::new(),
        };
        let before = sel.clone();
        assert_eq!(sel.advance(&empty, Direction::Next), None);
        assert_eq!(sel.advance(&empty, Direction::Previous), None);
        assert_eq!(sel.set_carousel_index(&empty, 3), None);
        assert_eq!(sel, before);
    }

    #[test]
    fn category_is_independent_of_track() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        sel.set_active_category("not-a-category");
        assert_eq!(sel.active_category_id, "not-a-category");
        assert_eq!(sel.current_track_id, "1");
        assert_eq!(sel.carousel_index, 0);
        assert!(!sel.is_playing);
    }

    #[test]
    fn invariant_holds_over_mixed_sequence() {
        let catalog = abc();
        let mut sel = Selection::initial(&catalog).unwrap();
        let ids = ["3", "1", "2"];
        for step in 0..30usize {
            match step % 4 {
                0 => {
                    sel.select_track(&catalog, ids[step % 3]);
                }
                1 => {
                    sel.advance(&catalog, Direction::Next);
                }
                2 => {
                    sel.advance(&catalog, Direction::Previous);
                }
                _ => {
                    sel.set_carousel_index(&catalog, step);
                }
            }
            assert!(sel.is_synced(&catalog), "desync after step {}", step);
        }
    }
}
