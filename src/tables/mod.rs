//! Enumerated-code tables: one-byte codes → display labels.
//!
//! # Completeness
//! The preferred-pet, dream and hobby tables are believed complete.  A code
//! missing from them means corruption or an unrecognised schema revision and
//! the record decode MUST fail.
//!
//! The outfit table is not complete.  Outfits are catalogued in release
//! order rather than by numeric value, so gaps are normal; a miss degrades
//! to [`UNKNOWN_OUTFIT`] and is reported as a diagnostic so the table can be
//! extended later.
//!
//! All tables are sorted by code and looked up by binary search.

mod outfit;

use serde::Serialize;
use std::fmt;

pub use outfit::OUTFITS;

/// Sentinel label for outfit codes not (yet) in [`OUTFITS`].
pub const UNKNOWN_OUTFIT: &str = "Unknown Outfit";

// ── Closed tables ────────────────────────────────────────────────────────────

pub const PREFERRED_PETS: &[(u8, &str)] = &[
    (0, "-"),
    (1, "Dogs"),
    (2, "Cats"),
];

pub const DREAMS: &[(u8, &str)] = &[
    (0,  "-"),
    (1,  "Live long"),
    (2,  "Get rich"),
    (3,  "Visit outer space"),
    (4,  "Get married"),
    (5,  "Be a hero"),
    (6,  "Be a prince or princess"),
    (7,  "Be a pro athlete"),
    (8,  "Be a wizard or witch"),
    (9,  "Run a company"),
    (10, "Be a world champion"),
    (11, "Be a celebrity"),
    (12, "Be popular"),
    (13, "(Other)"),
    (14, "(Secret)"),
    (15, "Grow up"),
    (16, "Fly like a bird"),
    (17, "Master an art"),
    (18, "Get fit"),
    (19, "Gain super powers"),
];

pub const HOBBIES: &[(u8, &str)] = &[
    (0,  "-"),
    (1,  "Drawing"),
    (2,  "Playing sports"),
    (3,  "Reading"),
    (4,  "Taking photos"),
    (5,  "Keeping pets"),
    (6,  "Dancing"),
    (7,  "Listening to music"),
    (8,  "Watching films"),
    (9,  "Using the internet"),
    (10, "Video games"),
    (11, "Cooking"),
    (12, "Travelling"),
    (13, "The outdoors"),
    (14, "Fishing"),
    (15, "Going for drives"),
    (16, "Shopping"),
    (17, "(Other)"),
    (18, "(Secret)"),
    (19, "Eating"),
    (20, "Sleeping"),
    (21, "Chatting"),
    (22, "Fashion"),
    (23, "Studying"),
    (24, "Helping others"),
    (25, "Parties"),
    (26, "Making money"),
    (27, "Cleaning"),
];

// ── CodeTable ────────────────────────────────────────────────────────────────

/// Identifies one of the categorical attribute tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeTable {
    Outfit,
    PreferredPet,
    Dream,
    Hobby,
}

impl CodeTable {
    pub fn entries(self) -> &'static [(u8, &'static str)] {
        match self {
            CodeTable::Outfit       => OUTFITS,
            CodeTable::PreferredPet => PREFERRED_PETS,
            CodeTable::Dream        => DREAMS,
            CodeTable::Hobby        => HOBBIES,
        }
    }

    /// Label for `code`, or `None` when the table has no entry.
    pub fn lookup(self, code: u8) -> Option<&'static str> {
        let entries = self.entries();
        entries
            .binary_search_by_key(&code, |&(c, _)| c)
            .ok()
            .map(|i| entries[i].1)
    }

    /// Whether a miss in this table is a hard failure.
    pub fn is_exhaustive(self) -> bool {
        !matches!(self, CodeTable::Outfit)
    }

    /// Table name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            CodeTable::Outfit       => "outfit",
            CodeTable::PreferredPet => "preferred-pet",
            CodeTable::Dream        => "dream",
            CodeTable::Hobby        => "hobby",
        }
    }
}

// ── Decoded value ────────────────────────────────────────────────────────────

/// A decoded enumerated byte.  `label` is `None` only for fail-soft tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coded {
    pub code:  u8,
    pub label: Option<&'static str>,
}

impl Coded {
    pub fn is_known(&self) -> bool {
        self.label.is_some()
    }

    /// Label for display, with the outfit sentinel standing in for misses.
    pub fn display_label(&self) -> &'static str {
        self.label.unwrap_or(UNKNOWN_OUTFIT)
    }
}

impl fmt::Display for Coded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CodeTable; 4] = [
        CodeTable::Outfit,
        CodeTable::PreferredPet,
        CodeTable::Dream,
        CodeTable::Hobby,
    ];

    #[test]
    fn tables_are_strictly_sorted() {
        for table in ALL {
            let entries = table.entries();
            assert!(
                entries.windows(2).all(|w| w[0].0 < w[1].0),
                "{} table must be sorted by code with no duplicates",
                table.name()
            );
        }
    }

    #[test]
    fn closed_tables_are_contiguous_from_zero() {
        for table in [CodeTable::PreferredPet, CodeTable::Dream, CodeTable::Hobby] {
            for (i, &(code, _)) in table.entries().iter().enumerate() {
                assert_eq!(code as usize, i, "{} table has a gap", table.name());
            }
        }
    }

    #[test]
    fn lookup_hits_and_misses() {
        assert_eq!(CodeTable::PreferredPet.lookup(2), Some("Cats"));
        assert_eq!(CodeTable::PreferredPet.lookup(3), None);
        assert_eq!(CodeTable::Hobby.lookup(14), Some("Fishing"));
        assert_eq!(CodeTable::Dream.lookup(19), Some("Gain super powers"));
        assert_eq!(CodeTable::Outfit.lookup(1), Some("Mario's Cap"));
        // 7 and 8 were never catalogued.
        assert_eq!(CodeTable::Outfit.lookup(7), None);
    }

    #[test]
    fn only_outfit_is_fail_soft() {
        assert!(!CodeTable::Outfit.is_exhaustive());
        assert!(CodeTable::PreferredPet.is_exhaustive());
        assert!(CodeTable::Dream.is_exhaustive());
        assert!(CodeTable::Hobby.is_exhaustive());
    }

    #[test]
    fn coded_display_uses_sentinel() {
        let miss = Coded { code: 250, label: None };
        assert_eq!(miss.to_string(), UNKNOWN_OUTFIT);
        let hit = Coded { code: 1, label: Some("Dogs") };
        assert_eq!(hit.to_string(), "Dogs");
    }
}
