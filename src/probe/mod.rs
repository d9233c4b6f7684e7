//! Unknown-region prober: suggest where an undecoded attribute lives.
//!
//! # How it works
//!
//! The caller already knows, for some Miis, the value of an attribute that
//! has no decoded field yet (for example "has glasses", read off the screen).
//! That knowledge is the *classifier*: `(name, creator) → label`.
//!
//! 1. The candidate positions are the layout's unknown bits (unknown byte
//!    spans minus always-zero bits), addressed `byte * 8 + bit`, bit 0 = LSB.
//! 2. Records are joined to the classifier on `(name, creator)`; a missing
//!    creator is the empty string on both sides.  Unmatched records drop out.
//! 3. Joined records are grouped by label.
//! 4. Every run of `k` unknown bits `b, b+1, …, b+k-1` is a window.  Runs
//!    broken by a known bit are skipped.
//! 5. A window is a candidate when every record of a group shows the same
//!    `k`-bit pattern (*homogeneity*) and no two groups share a pattern
//!    (*separability*).
//!
//! All candidates are returned in ascending order.  Overlapping windows are
//! independent hypotheses and are all kept; nothing is ranked.
//!
//! ## Cost
//!
//! `O(windows × joined records)`.  The homogeneity check bails out on the
//! first mismatching record, which is what keeps wide scans cheap: almost
//! every window fails within the first few records.

mod classifier;

pub use classifier::Classifier;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use thiserror::Error;

use crate::plaza::PlazaSnapshot;
use crate::record::AvatarRecord;
use crate::schema::Layout;

/// Widest window whose pattern fits in a `u64`.
pub const MAX_WINDOW: usize = 64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProbeError {
    #[error("window width must be between 1 and {MAX_WINDOW} bits, got {0}")]
    Width(usize),
}

// ── BitWindow ────────────────────────────────────────────────────────────────

/// `width` adjacent bit positions starting at `start` (`byte * 8 + bit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BitWindow {
    pub start: usize,
    pub width: usize,
}

impl BitWindow {
    /// Bit positions covered, ascending.
    pub fn bits(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.width
    }

    pub fn first_byte(&self) -> usize {
        self.start / 8
    }

    /// Pattern of this window in `record`; bit `start` is the pattern's LSB.
    pub fn pattern(&self, record: &AvatarRecord) -> u64 {
        self.bits()
            .enumerate()
            .fold(0u64, |acc, (i, pos)| acc | (u64::from(record.bit(pos)) << i))
    }
}

impl fmt::Display for BitWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.start + self.width - 1;
        write!(
            f,
            "bits {}..={} (byte {} bit {} → byte {} bit {})",
            self.start,
            last,
            self.start / 8,
            self.start % 8,
            last / 8,
            last % 8,
        )
    }
}

// ── Prober ───────────────────────────────────────────────────────────────────

/// Scan a snapshot with its own layout.
pub fn probe<L>(
    snapshot:   &PlazaSnapshot,
    classifier: &Classifier<L>,
    width:      usize,
) -> Result<Vec<BitWindow>, ProbeError>
where
    L: Eq + Hash,
{
    probe_records(&snapshot.records, snapshot.layout(), classifier, width)
}

/// Scan `records` for candidate windows of `width` unknown bits.
///
/// Returns an empty list when no record joins the classifier.
pub fn probe_records<L>(
    records:    &[AvatarRecord],
    layout:     &Layout,
    classifier: &Classifier<L>,
    width:      usize,
) -> Result<Vec<BitWindow>, ProbeError>
where
    L: Eq + Hash,
{
    if width == 0 || width > MAX_WINDOW {
        return Err(ProbeError::Width(width));
    }

    // Group joined records by label.  Group order is irrelevant to the
    // result; only membership is.
    let mut by_label: HashMap<&L, Vec<&AvatarRecord>> = HashMap::new();
    for rec in records {
        if let Some(label) = classifier.label_of(&rec.name, &rec.creator) {
            by_label.entry(label).or_default().push(rec);
        }
    }
    let groups: Vec<Vec<&AvatarRecord>> = by_label.into_values().collect();
    let joined: usize = groups.iter().map(Vec::len).sum();
    if joined == 0 {
        tracing::debug!("probe: no record matched the classifier");
        return Ok(Vec::new());
    }

    let unknown = layout.unknown_bits();
    let candidates: Vec<BitWindow> = unknown
        .windows(width)
        .filter(|run| run[width - 1] - run[0] == width - 1)
        .map(|run| BitWindow { start: run[0], width })
        .filter(|w| is_candidate(w, &groups))
        .collect();

    tracing::debug!(
        "probe: {} record(s) in {} group(s), {} unknown bit(s), {} candidate window(s) of {} bit(s)",
        joined,
        groups.len(),
        unknown.len(),
        candidates.len(),
        width,
    );
    Ok(candidates)
}

fn is_candidate(window: &BitWindow, groups: &[Vec<&AvatarRecord>]) -> bool {
    let mut seen = HashSet::with_capacity(groups.len());
    for group in groups {
        let Some((first, rest)) = group.split_first() else {
            continue;
        };
        let pattern = window.pattern(first);
        if rest.iter().any(|rec| window.pattern(rec) != pattern) {
            return false;
        }
        if !seen.insert(pattern) {
            return false;
        }
    }
    true
}
