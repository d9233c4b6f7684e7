//! Game-title lookup boundary.
//!
//! Title names are not in the save; they come from outside (a scraped title
//! database, a hand-maintained list of system applications and homebrew).
//! The decoder only ever sees them through an injected [`TitleLookup`], and
//! never on the decode path.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Read-only `game_id → title` capability.
pub trait TitleLookup {
    /// Title for a 16-digit uppercase hex id, if known.
    fn title(&self, game_id: &str) -> Option<&str>;
}

/// Best-effort result of a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GameTitle {
    Known(String),
    Unknown,
}

impl fmt::Display for GameTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameTitle::Known(t) => f.write_str(t),
            GameTitle::Unknown  => f.write_str("Unknown Game"),
        }
    }
}

/// Wraps a lookup and turns misses into [`GameTitle::Unknown`].
pub struct TitleResolver<'a> {
    lookup: &'a dyn TitleLookup,
}

impl<'a> TitleResolver<'a> {
    pub fn new(lookup: &'a dyn TitleLookup) -> Self {
        Self { lookup }
    }

    pub fn resolve(&self, game_id: &str) -> GameTitle {
        match self.lookup.title(&game_id.to_uppercase()) {
            Some(t) => GameTitle::Known(t.to_owned()),
            None => {
                tracing::debug!("no title known for {game_id}");
                GameTitle::Unknown
            }
        }
    }
}

/// In-memory title table.
#[derive(Debug, Clone, Default)]
pub struct StaticTitles {
    titles: HashMap<String, String>,
}

impl StaticTitles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, game_id: &str, title: &str) {
        self.titles.insert(game_id.to_uppercase(), title.to_owned());
    }

    /// Merge a JSON object `{"<game id>": "<title>", ...}`.  Later sources
    /// override earlier ones, so load the scraped database first and
    /// hand-maintained corrections last.
    pub fn merge_json(&mut self, bytes: &[u8]) -> Result<(), serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_slice(bytes)?;
        for (id, title) in entries {
            self.insert(&id, &title);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl TitleLookup for StaticTitles {
    fn title(&self, game_id: &str) -> Option<&str> {
        self.titles.get(game_id).map(String::as_str)
    }
}
