//! Always-zero position check.
//!
//! Every layout lists bytes and bits that have been zero in every save seen
//! so far.  A non-empty violation list does not mean the input is bad; it
//! means the layout no longer describes it and offsets must be re-derived.
//! Violations are returned, never raised.

use serde::Serialize;
use std::fmt;

use crate::plaza::PlazaSnapshot;
use crate::record::AvatarRecord;

/// Which always-zero position was found set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "offset", rename_all = "snake_case")]
pub enum Position {
    /// Byte offset within the record.
    Byte(usize),
    /// Bit position `byte * 8 + bit`, bit 0 = LSB.
    Bit(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Snapshot slot, when checked through [`check_snapshot`].
    pub slot:     Option<usize>,
    pub name:     String,
    pub creator:  String,
    pub position: Position,
    /// Value found; the expected value is always zero.
    pub actual:   u8,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(slot) = self.slot {
            write!(f, "slot {slot}: ")?;
        }
        match self.position {
            Position::Byte(b) => write!(f, "byte {b} = {:#04x}", self.actual)?,
            Position::Bit(p)  => write!(f, "bit {p} (byte {}, bit {}) = {}", p / 8, p % 8, self.actual)?,
        }
        write!(f, ", expected 0 ({:?} by {:?})", self.name, self.creator)
    }
}

/// Check one record against the always-zero sets of its own layout.
pub fn check_empty(record: &AvatarRecord) -> Vec<Violation> {
    let layout = record.layout();
    let raw = record.raw();
    let violation = |position, actual| Violation {
        slot: None,
        name: record.name.clone(),
        creator: record.creator.clone(),
        position,
        actual,
    };

    let bytes = layout
        .zero_bytes
        .iter()
        .filter(|&&b| raw[b] != 0)
        .map(|&b| violation(Position::Byte(b), raw[b]));
    let bits = layout
        .zero_bits
        .iter()
        .filter(|&&p| record.bit(p) != 0)
        .map(|&p| violation(Position::Bit(p), 1));

    bytes.chain(bits).collect()
}

/// Check every record of a snapshot, tagging violations with their slot.
pub fn check_snapshot(snapshot: &PlazaSnapshot) -> Vec<Violation> {
    let violations: Vec<Violation> = snapshot
        .records
        .iter()
        .enumerate()
        .flat_map(|(slot, rec)| {
            check_empty(rec).into_iter().map(move |mut v| {
                v.slot = Some(slot);
                v
            })
        })
        .collect();
    if !violations.is_empty() {
        tracing::warn!(
            "{} always-zero violation(s) across {} record(s); layout {} may not match this save",
            violations.len(),
            snapshot.records.len(),
            snapshot.schema.name(),
        );
    }
    violations
}
