//! Non-fatal findings raised while decoding.
//!
//! Diagnostics are collected, never thrown: an outfit missing from its table
//! or a counter above its historical ceiling is something for a maintainer
//! to look at, not a reason to drop the record.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Code missing from a fail-soft table (the outfit table); decoded
    /// with the sentinel label.
    UnmappedCode {
        table:   &'static str,
        code:    u8,
        name:    String,
        creator: String,
    },
    /// Counter above the highest value observed in real saves.
    CounterAboveCeiling {
        field:   &'static str,
        value:   u16,
        ceiling: u16,
        name:    String,
        creator: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmappedCode { table, code, name, creator } => write!(
                f,
                "unmapped {table} code {code} on {name:?} (creator {creator:?})"
            ),
            Diagnostic::CounterAboveCeiling { field, value, ceiling, name, creator } => write!(
                f,
                "{field} = {value} exceeds observed ceiling {ceiling} on {name:?} (creator {creator:?})"
            ),
        }
    }
}

/// Ordered diagnostic sink passed down through the decoder.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `d` and log it.
    pub fn emit(&mut self, d: Diagnostic) {
        tracing::warn!("{d}");
        self.items.push(d);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
