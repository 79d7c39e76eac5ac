//! Viewer-side UI state
//!
//! The site's navigation keeps two pieces of state across visits: whether
//! the page sidebar is open, and which course track the viewer follows.
//! Both are modeled as explicit objects over a small key-value interface
//! rather than ambient globals, so hosts can back them with whatever
//! storage they have.

use std::collections::HashMap;

const CHOSEN_TRACK_KEY: &str = "chosen track";

/// Entries tagged with this are shown no matter which track is chosen.
const ALWAYS_SHOWN_TAG: &str = "welcome";

/// Minimal persistence interface for viewer preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Collapsible navigation sidebar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SidebarState {
    open: bool,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The toggle control flips it.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A click outside the sidebar closes it without toggling.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// The viewer's chosen course track, persisted across visits. Filters
/// which lecture/homework entries the navigation shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackChooser {
    track: String,
}

impl TrackChooser {
    /// Restore the previously chosen track; no stored value means all
    /// entries are shown.
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            track: store.get(CHOSEN_TRACK_KEY).unwrap_or_default(),
        }
    }

    pub fn choose(&mut self, track: &str, store: &mut impl KeyValueStore) {
        self.track = track.to_string();
        store.set(CHOSEN_TRACK_KEY, track);
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    /// Whether an entry with these tags is shown under the chosen track.
    pub fn shows(&self, tags: &[String]) -> bool {
        self.track.is_empty()
            || tags.iter().any(|t| t == &self.track)
            || tags.iter().any(|t| t == ALWAYS_SHOWN_TAG)
    }
}
