//! Catalog: the fixed, ordered collection of tracks and categories.
//!
//! Loaded once at startup (built-in seed or a TOML override) and read-only for
//! the rest of the session.  Every position handed out by the selection state
//! machine is an index into `Catalog::tracks`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Number of leading tracks shown by the hero carousel.
pub const CAROUSEL_LIMIT: usize = 5;
/// Number of leading tracks shown in the "Recently listened" list.
pub const RECENT_LIMIT: usize = 4;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no tracks")]
    Empty,
    #[error("duplicate track id: {0}")]
    DuplicateTrackId(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub cover_url: String,
    /// Canonical duration.  The `m:ss` label is always derived from this.
    pub duration_secs: u32,
}

impl Track {
    /// Display duration, e.g. `3:58`.
    pub fn duration_label(&self) -> String {
        format_duration(self.duration_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub label: String,
}

pub fn format_duration(secs: u32) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<Track>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog without validation.  An empty catalog is representable;
    /// `validate` is what session startup uses to reject it.
    pub fn new(tracks: Vec<Track>, categories: Vec<Category>) -> Self {
        Self { tracks, categories }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for t in &self.tracks {
            if !seen.insert(t.id.as_str()) {
                return Err(CatalogError::DuplicateTrackId(t.id.clone()));
            }
        }
        Ok(())
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn track_by_id(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Catalog position of `id`, `None` on a lookup miss.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Tracks eligible for the hero carousel (leading slice).
    pub fn carousel_window(&self) -> &[Track] {
        &self.tracks[..self.tracks.len().min(CAROUSEL_LIMIT)]
    }

    /// Tracks shown in the "Recently listened" list (leading slice).
    pub fn recent(&self) -> &[Track] {
        &self.tracks[..self.tracks.len().min(RECENT_LIMIT)]
    }

    /// The built-in mock library.
    pub fn seed() -> Self {
        let track = |id: &str, title: &str, artist: &str, seed: &str, secs: u32| Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            cover_url: format!("https://picsum.photos/seed/{}/400/400", seed),
            duration_secs: secs,
        };
        let category = |id: &str, label: &str| Category {
            id: id.to_string(),
            label: label.to_string(),
        };

        Self::new(
            vec![
                track("1", "Echoes of Midnight", "Jon Hickman", "midnight", 238),
                track("2", "Fading Horizon", "Ella Hunt", "horizon", 192),
                track("3", "Waves of Time", "Lana Rivers", "waves", 245),
                track("4", "Electric Dreams", "Mia Lowell", "electric", 175),
                track("5", "Shadows & Light", "Ryan Miles", "shadows", 210),
                track("6", "Golden Days", "Felix Carter", "golden", 195),
            ],
            vec![
                category("all", "All"),
                category("relax", "Relax"),
                category("sad", "Sad"),
                category("party", "Party"),
                category("romance", "Romance"),
                category("energetic", "Energetic"),
                category("jazz", "Jazz"),
                category("alternative", "Alternative"),
            ],
        )
    }
}

// ── TOML catalog loader ───────────────────────────────────────────────────────

/// Matches the `[[track]]` / `[[category]]` tables of a catalog file.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    track: Vec<Track>,
    #[serde(default)]
    category: Vec<Category>,
}

pub fn parse_catalog_from_toml_str(content: &str) -> anyhow::Result<Catalog> {
    let file: TomlCatalogFile = toml::from_str(content)?;
    Ok(Catalog::new(file.track, file.category))
}

pub fn load_catalog_from_toml(path: &Path) -> anyhow::Result<Catalog> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog_from_toml_str(&content)
}

/// Load the catalog override at `path` if it exists and parses, otherwise the
/// built-in seed.  A file without categories borrows the seed's categories.
pub fn load_catalog(path: &Path) -> Catalog {
    if path.exists() {
        match load_catalog_from_toml(path) {
            Ok(mut catalog) => {
                if catalog.categories.is_empty() {
                    catalog.categories = Catalog::seed().categories;
                }
                info!(
                    "Loaded {} tracks from catalog file: {}",
                    catalog.track_count(),
                    path.display()
                );
                return catalog;
            }
            Err(e) => warn!("Failed to parse catalog file {}: {}", path.display(), e),
        }
    }
    info!("Using built-in catalog");
    Catalog::seed()
}
