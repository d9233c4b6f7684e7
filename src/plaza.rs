//! Container scanner: the 393216-byte `meet.dat` blob → [`PlazaSnapshot`].
//!
//! # How it works
//!
//! The avatar-record table is a fixed-capacity ring buffer at a fixed
//! offset.  When it is full the console overwrites the oldest slot that is
//! not a favourite, in place, so slot order is on-disk order and says
//! nothing about crossing history.
//!
//! Slots are read consecutively, 264 bytes each, until the first byte of
//! the next slot is zero (an empty slot) or the capacity of 1000 is reached.
//! Plaza-wide counters live at their own offsets and are read whatever the
//! table length.
//!
//! A failure on any slot fails the whole parse: a misread slot shifts every
//! later one, so there is no useful partial snapshot.  Diagnostics are kept
//! on the snapshot.
//!
//! With the `parallel` feature, slot decoding runs on Rayon.  Slot
//! boundaries are found first, decoded independently, then merged back in
//! slot order, so the result is identical to the sequential path.

use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::diag::{Diagnostic, Diagnostics};
use crate::dump::hexdump;
use crate::error::{DecodeError, Result};
use crate::record::AvatarRecord;
use crate::schema::{Layout, SchemaVersion};

// ── ParseOptions ─────────────────────────────────────────────────────────────

/// Configuration for [`PlazaSnapshot::parse_with`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Record layout to decode with.
    #[serde(default)]
    pub schema: SchemaVersion,
}

// ── PlazaSnapshot ────────────────────────────────────────────────────────────

/// Fully decoded save blob.  Built once, never mutated.
#[derive(Debug, Clone)]
pub struct PlazaSnapshot {
    /// Decoded records in slot order.
    pub records:           Vec<AvatarRecord>,
    pub street_pass_tags:  u32,
    pub tickets:           u16,
    pub fantastic_ratings: u16,
    /// Everything non-fatal noticed while decoding, in slot order.
    pub diagnostics:       Vec<Diagnostic>,
    pub schema:            SchemaVersion,
    raw:                   Vec<u8>,
}

impl PlazaSnapshot {
    /// Parse with the current layout.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_with(bytes, &ParseOptions::default())
    }

    pub fn parse_with(bytes: &[u8], opts: &ParseOptions) -> Result<Self> {
        let layout = opts.schema.layout();
        let c = &layout.container;
        if bytes.len() != c.size {
            return Err(DecodeError::size("plaza save", c.size, bytes.len()));
        }

        let slots = occupied_slots(bytes, layout);
        tracing::debug!(
            "record table at {:#x}: {} occupied slot(s) of {}",
            c.table_offset,
            slots.len(),
            c.capacity,
        );

        let (records, diagnostics) = decode_slots(bytes, &slots, layout)?;

        Ok(Self {
            records,
            street_pass_tags:  LittleEndian::read_u32(&bytes[c.street_pass_tags..]),
            tickets:           LittleEndian::read_u16(&bytes[c.tickets..]),
            fantastic_ratings: LittleEndian::read_u16(&bytes[c.fantastic_ratings..]),
            diagnostics:       diagnostics.into_vec(),
            schema:            opts.schema,
            raw:               bytes.to_vec(),
        })
    }

    /// Read and parse a save file.
    pub fn open<P: AsRef<Path>>(path: P, opts: &ParseOptions) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse_with(&bytes, opts)
    }

    /// The original blob.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn layout(&self) -> &'static Layout {
        self.schema.layout()
    }

    /// Hex + ASCII dump of the whole blob.
    pub fn hexdump(&self, width: usize) -> String {
        hexdump(&self.raw, width)
    }

    /// Human-readable one-paragraph summary.
    pub fn summary(&self) -> String {
        let premium = self.records.iter().filter(|r| r.premium).count();
        format!(
            "{} Mii(s) ({} premium), {} StreetPass tag(s), {} ticket(s), \
             {} fantastic rating(s), {} diagnostic(s), layout {}",
            self.records.len(),
            premium,
            self.street_pass_tags,
            self.tickets,
            self.fantastic_ratings,
            self.diagnostics.len(),
            self.schema.name(),
        )
    }
}

// ── Scanner ──────────────────────────────────────────────────────────────────

/// Start offsets of occupied slots, in order.
fn occupied_slots(bytes: &[u8], layout: &Layout) -> Vec<usize> {
    let c = &layout.container;
    let size = layout.record_size;
    (0..c.capacity)
        .map(|slot| c.table_offset + slot * size)
        .take_while(|&pos| pos + size <= bytes.len() && bytes[pos] != 0)
        .collect()
}

fn decode_slot(bytes: &[u8], slot: usize, pos: usize, layout: &Layout) -> Result<(AvatarRecord, Diagnostics)> {
    let mut diag = Diagnostics::new();
    AvatarRecord::decode(&bytes[pos..pos + layout.record_size], layout, &mut diag)
        .map(|rec| (rec, diag))
        .map_err(|e| DecodeError::Record { slot, offset: pos, source: Box::new(e) })
}

fn decode_slots(
    bytes:  &[u8],
    slots:  &[usize],
    layout: &Layout,
) -> Result<(Vec<AvatarRecord>, Diagnostics)> {
    #[cfg(feature = "parallel")]
    let results: Vec<Result<(AvatarRecord, Diagnostics)>> = {
        use rayon::prelude::*;
        slots
            .par_iter()
            .enumerate()
            .map(|(slot, &pos)| decode_slot(bytes, slot, pos, layout))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results = slots
        .iter()
        .enumerate()
        .map(|(slot, &pos)| decode_slot(bytes, slot, pos, layout));

    // First failing slot wins.
    let mut records = Vec::with_capacity(slots.len());
    let mut diagnostics = Diagnostics::new();
    for r in results {
        let (rec, diag) = r?;
        records.push(rec);
        diagnostics.extend(diag);
    }
    Ok((records, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CONTAINER, PLAZA_SIZE, RECORD_SIZE};

    fn blank() -> Vec<u8> {
        vec![0u8; PLAZA_SIZE]
    }

    fn put_record(blob: &mut [u8], slot: usize, first: u8) {
        let pos = CONTAINER.table_offset + slot * RECORD_SIZE;
        blob[pos] = first;
    }

    #[test]
    fn wrong_size_is_rejected() {
        let err = PlazaSnapshot::parse(&[0u8; 1024]).unwrap_err();
        assert!(matches!(err, DecodeError::Size { expected: PLAZA_SIZE, actual: 1024, .. }));
    }

    #[test]
    fn empty_table_still_reads_counters() {
        let mut blob = blank();
        blob[CONTAINER.street_pass_tags..CONTAINER.street_pass_tags + 4]
            .copy_from_slice(&70_000u32.to_le_bytes());
        blob[CONTAINER.tickets..CONTAINER.tickets + 2].copy_from_slice(&12u16.to_le_bytes());
        blob[CONTAINER.fantastic_ratings..CONTAINER.fantastic_ratings + 2]
            .copy_from_slice(&3u16.to_le_bytes());

        let snap = PlazaSnapshot::parse(&blob).unwrap();
        assert!(snap.records.is_empty());
        assert_eq!(snap.street_pass_tags, 70_000);
        assert_eq!(snap.tickets, 12);
        assert_eq!(snap.fantastic_ratings, 3);
        assert_eq!(snap.raw().len(), PLAZA_SIZE);
    }

    #[test]
    fn scan_stops_at_first_empty_slot() {
        let mut blob = blank();
        put_record(&mut blob, 0, b'A');
        put_record(&mut blob, 1, b'B');
        put_record(&mut blob, 3, b'D'); // beyond the gap, never read
        let snap = PlazaSnapshot::parse(&blob).unwrap();
        assert_eq!(snap.records.len(), 2);
        assert_eq!(snap.records[0].name, "A");
        assert_eq!(snap.records[1].name, "B");
    }

    #[test]
    fn bad_slot_fails_whole_parse() {
        let mut blob = blank();
        put_record(&mut blob, 0, b'A');
        put_record(&mut blob, 1, b'B');
        blob[CONTAINER.table_offset + RECORD_SIZE + 21] = 9; // preferred pet
        match PlazaSnapshot::parse(&blob).unwrap_err() {
            DecodeError::Record { slot, offset, source } => {
                assert_eq!(slot, 1);
                assert_eq!(offset, CONTAINER.table_offset + RECORD_SIZE);
                assert!(matches!(*source, DecodeError::UnmappedEnum { code: 9, .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn diagnostics_are_collected_in_slot_order() {
        let mut blob = blank();
        for (slot, outfit) in [(0, 7u8), (1, 1), (2, 8)] {
            put_record(&mut blob, slot, b'a' + slot as u8);
            blob[CONTAINER.table_offset + slot * RECORD_SIZE + 20] = outfit;
        }
        let snap = PlazaSnapshot::parse(&blob).unwrap();
        assert_eq!(snap.records.len(), 3);
        let codes: Vec<u8> = snap
            .diagnostics
            .iter()
            .map(|d| match d {
                Diagnostic::UnmappedCode { code, .. } => *code,
                other => panic!("unexpected diagnostic {other:?}"),
            })
            .collect();
        assert_eq!(codes, vec![7, 8]);
    }

    #[test]
    fn schema_option_is_honoured() {
        let mut blob = blank();
        put_record(&mut blob, 0, b'A');
        let opts = ParseOptions { schema: SchemaVersion::V1 };
        let snap = PlazaSnapshot::parse_with(&blob, &opts).unwrap();
        assert_eq!(snap.schema, SchemaVersion::V1);
        assert_eq!(snap.records[0].last_crossed_at, None);
        assert!(snap.summary().contains("layout v1"));
    }
}
