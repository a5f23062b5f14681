//! FocusRing: keyboard focus cycling between the main-view panes.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        let len = self.items.len();
        self.current = (self.current + len - 1) % len;
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Focus the Nth pane (0-indexed). No-op if out of bounds.
    pub fn set_by_position(&mut self, pos: usize) -> Option<ComponentId> {
        if pos < self.items.len() {
            self.current = pos;
            self.current()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> FocusRing {
        FocusRing::new(vec![
            ComponentId::HeroCarousel,
            ComponentId::CategoryPills,
            ComponentId::PopularSongs,
        ])
    }

    #[test]
    fn cycles_both_ways() {
        let mut r = ring();
        assert_eq!(r.prev(), Some(ComponentId::PopularSongs));
        assert_eq!(r.next(), Some(ComponentId::HeroCarousel));
        assert_eq!(r.next(), Some(ComponentId::CategoryPills));
    }

    #[test]
    fn set_ignores_unknown_ids() {
        let mut r = ring();
        r.set(ComponentId::PopularSongs);
        r.set(ComponentId::SearchBar);
        assert!(r.is_focused(ComponentId::PopularSongs));
        assert_eq!(r.set_by_position(9), None);
        assert!(r.is_focused(ComponentId::PopularSongs));
    }

    #[test]
    fn empty_ring_has_no_focus() {
        let mut r = FocusRing::new(Vec::new());
        assert_eq!(r.next(), None);
        assert_eq!(r.prev(), None);
        assert_eq!(r.current(), None);
    }
}
