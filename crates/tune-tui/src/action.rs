//! Action enum: all user-initiated intents and internal events.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SearchBar,
    HeroCarousel,
    CategoryPills,
    PopularSongs,
    RecentSongs,
    PlayerBar,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Screen ───────────────────────────────────────────────────────────────
    EnterMain,

    // ── Playback / selection ─────────────────────────────────────────────────
    SelectTrack(String), // track id
    Next,
    Prev,
    TogglePlay,
    SetCarouselIndex(usize),
    SetCategory(String), // category id

    // ── Assistant ────────────────────────────────────────────────────────────
    SubmitQuery(String),
    DismissResult,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    OpenSearch,
    CloseSearch,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleExpandPlayer,
    ToggleKeys,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}
