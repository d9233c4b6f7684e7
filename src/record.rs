//! Avatar record codec: one 264-byte slot → [`AvatarRecord`].
//!
//! # Field encodings
//! - Text is UTF-16LE.  Terminated fields are scanned one code unit at a
//!   time and stop at the first all-zero unit or at the field boundary, so a
//!   terminator is always even-aligned and a character is never split, even
//!   when a zero high byte is followed by a zero low byte at an odd offset.
//! - Integers are little-endian.  The game id is the one exception: its
//!   eight bytes are rendered in reverse order as uppercase hex.
//! - The last-crossed timestamp is a 40-bit LE millisecond count against
//!   the Unix epoch, corrected by −1 day and then +30 calendar years.
//!
//! The decoder never reads the always-zero positions; see
//! [`invariant`](crate::invariant) for that check.

use byteorder::{ByteOrder, LittleEndian};
use chrono::{DateTime, Days, Months, Utc};
use serde::Serialize;

use crate::diag::{Diagnostic, Diagnostics};
use crate::error::{DecodeError, Result};
use crate::schema::{
    CodeField, CounterField, FlagField, Layout, MissPolicy, SchemaVersion, TextField, TextScan,
    TimestampField, RECORD_SIZE,
};
use crate::tables::Coded;

/// One decoded Mii.  Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarRecord {
    pub name:             String,
    pub creator:          String,
    /// Absent in layouts that predate the field.
    pub last_crossed_at:  Option<DateTime<Utc>>,
    /// Title id of the software the Mii was last seen with, 16 hex digits.
    pub game_id:          String,
    pub country:          String,
    pub subregion:        String,
    pub crossed_count:    u16,
    pub street_pass_hits: u16,
    pub plaza_population: u16,
    pub outfit:           Coded,
    pub preferred_pet:    Coded,
    pub dream:            Coded,
    pub hobby:            Coded,
    pub premium:          bool,
    /// Vendor prefix of the originating console's network interface.
    pub device_vendor_id: Option<String>,
    pub schema:           SchemaVersion,
    #[serde(skip)]
    raw:                  [u8; RECORD_SIZE],
}

impl AvatarRecord {
    /// Decode one record slice with `layout`.
    ///
    /// Fails on a wrong slice length or an unmapped code in an exhaustive
    /// table.  Outfit misses and counters above their ceilings are pushed to
    /// `diag` and decoding continues.
    pub fn decode(bytes: &[u8], layout: &Layout, diag: &mut Diagnostics) -> Result<Self> {
        let raw: [u8; RECORD_SIZE] = bytes
            .try_into()
            .map_err(|_| DecodeError::size("avatar record", layout.record_size, bytes.len()))?;

        let name    = read_text(&raw, &layout.name);
        let creator = read_text(&raw, &layout.creator);
        let who     = Identity { name: &name, creator: &creator };

        let outfit        = read_code(&raw, &layout.outfit, "outfit", &who, diag)?;
        let preferred_pet = read_code(&raw, &layout.preferred_pet, "preferred_pet", &who, diag)?;
        let dream         = read_code(&raw, &layout.dream, "dream", &who, diag)?;
        let hobby         = read_code(&raw, &layout.hobby, "hobby", &who, diag)?;

        let crossed_count    = read_counter(&raw, &layout.crossed_count, "crossed_count", &who, diag);
        let street_pass_hits = read_counter(&raw, &layout.street_pass_hits, "street_pass_hits", &who, diag);
        let plaza_population = read_counter(&raw, &layout.plaza_population, "plaza_population", &who, diag);

        let game_id = game_id_hex(slice(&raw, layout.game_id.offset, layout.game_id.width));

        let last_crossed_at = match &layout.last_crossed_at {
            Some(field) => Some(read_timestamp(&raw, field)?),
            None        => None,
        };
        let device_vendor_id = layout
            .device_vendor_id
            .map(|f| vendor_id_hex(slice(&raw, f.offset, f.width)));

        Ok(Self {
            country:   read_text(&raw, &layout.country),
            subregion: read_text(&raw, &layout.subregion),
            premium:   read_flag(&raw, &layout.premium),
            name,
            creator,
            last_crossed_at,
            game_id,
            crossed_count,
            street_pass_hits,
            plaza_population,
            outfit,
            preferred_pet,
            dream,
            hobby,
            device_vendor_id,
            schema: layout.version,
            raw,
        })
    }

    /// The original 264 bytes.
    pub fn raw(&self) -> &[u8; RECORD_SIZE] {
        &self.raw
    }

    /// Layout this record was decoded with.
    pub fn layout(&self) -> &'static Layout {
        self.schema.layout()
    }

    /// Value (0 or 1) of bit `pos` = `byte * 8 + bit`, bit 0 = LSB.
    #[inline]
    pub fn bit(&self, pos: usize) -> u8 {
        (self.raw[pos / 8] >> (pos % 8)) & 1
    }
}

// ── Field readers ────────────────────────────────────────────────────────────

struct Identity<'a> {
    name:    &'a str,
    creator: &'a str,
}

#[inline]
fn slice(raw: &[u8], offset: usize, width: usize) -> &[u8] {
    &raw[offset..offset + width]
}

/// Decode a UTF-16LE text field according to its scan rule.
///
/// Unpaired surrogates become U+FFFD rather than failing the record.
pub fn read_text(raw: &[u8], field: &TextField) -> String {
    let units: Vec<u16> = slice(raw, field.offset, field.width)
        .chunks_exact(2)
        .map(LittleEndian::read_u16)
        .collect();

    let end = match field.scan {
        TextScan::Terminated => units.iter().position(|&u| u == 0).unwrap_or(units.len()),
        TextScan::Fixed      => units.len(),
    };

    let text: String = char::decode_utf16(units[..end].iter().copied())
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    text.trim_matches('\0').to_owned()
}

/// Render a title id: bytes reversed, uppercase hex, no separators.
pub fn game_id_hex(bytes: &[u8]) -> String {
    let reversed: Vec<u8> = bytes.iter().rev().copied().collect();
    hex::encode_upper(reversed)
}

/// Render raw bytes as `AA:BB:CC`.
pub fn vendor_id_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Decode the corrected last-crossed instant.
///
/// The day shift is applied before the year shift, so a raw 1 March lands
/// on the last day of February of the *raw* year before moving forward.
pub fn read_timestamp(raw: &[u8], field: &TimestampField) -> Result<DateTime<Utc>> {
    let millis = LittleEndian::read_uint(slice(raw, field.offset, field.width), field.width);
    let invalid = || DecodeError::Timestamp { field: "last_crossed_at", millis };

    let instant = i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(invalid)?;

    instant
        .checked_sub_days(Days::new(field.minus_days))
        .and_then(|t| t.checked_add_months(Months::new(field.plus_years * 12)))
        .ok_or_else(invalid)
}

fn read_flag(raw: &[u8], field: &FlagField) -> bool {
    raw[field.offset] & (1 << field.bit) != 0
}

fn read_code(
    raw:        &[u8],
    field:      &CodeField,
    field_name: &'static str,
    who:        &Identity<'_>,
    diag:       &mut Diagnostics,
) -> Result<Coded> {
    let code = raw[field.offset];
    if let Some(label) = field.table.lookup(code) {
        return Ok(Coded { code, label: Some(label) });
    }
    match field.on_miss {
        MissPolicy::Fail => Err(DecodeError::UnmappedEnum {
            field: field_name,
            table: field.table.name(),
            code,
        }),
        MissPolicy::Sentinel => {
            diag.emit(Diagnostic::UnmappedCode {
                table:   field.table.name(),
                code,
                name:    who.name.to_owned(),
                creator: who.creator.to_owned(),
            });
            Ok(Coded { code, label: None })
        }
    }
}

fn read_counter(
    raw:        &[u8],
    field:      &CounterField,
    field_name: &'static str,
    who:        &Identity<'_>,
    diag:       &mut Diagnostics,
) -> u16 {
    let value = LittleEndian::read_u16(slice(raw, field.offset, 2));
    if let Some(ceiling) = field.ceiling {
        if value > ceiling {
            diag.emit(Diagnostic::CounterAboveCeiling {
                field:   field_name,
                value,
                ceiling,
                name:    who.name.to_owned(),
                creator: who.creator.to_owned(),
            });
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LAYOUT_V1, LAYOUT_V2};
    use crate::tables::UNKNOWN_OUTFIT;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn put_utf16(buf: &mut [u8], offset: usize, s: &str) {
        for (i, unit) in s.encode_utf16().enumerate() {
            buf[offset + 2 * i..offset + 2 * i + 2].copy_from_slice(&unit.to_le_bytes());
        }
    }

    fn put_millis(buf: &mut [u8], millis: i64) {
        buf[130..135].copy_from_slice(&millis.to_le_bytes()[..5]);
    }

    fn decode(buf: &[u8]) -> (AvatarRecord, Vec<Diagnostic>) {
        decode_with(buf, &LAYOUT_V2)
    }

    fn decode_with(buf: &[u8], layout: &Layout) -> (AvatarRecord, Vec<Diagnostic>) {
        let mut diag = Diagnostics::new();
        let rec = AvatarRecord::decode(buf, layout, &mut diag).unwrap();
        (rec, diag.into_vec())
    }

    #[test]
    fn wrong_length_is_size_error() {
        let mut diag = Diagnostics::new();
        let err = AvatarRecord::decode(&[0u8; 263], &LAYOUT_V2, &mut diag).unwrap_err();
        assert!(matches!(err, DecodeError::Size { expected: 264, actual: 263, .. }));
        let err = AvatarRecord::decode(&[0u8; 265], &LAYOUT_V2, &mut diag).unwrap_err();
        assert!(matches!(err, DecodeError::Size { actual: 265, .. }));
    }

    #[test]
    fn all_zero_record_decodes_cleanly() {
        let (rec, diags) = decode(&[0u8; RECORD_SIZE]);
        assert!(diags.is_empty());
        assert_eq!(rec.name, "");
        assert_eq!(rec.creator, "");
        assert_eq!(rec.outfit.label, Some("(None)"));
        assert_eq!(rec.preferred_pet.label, Some("-"));
        assert_eq!(rec.game_id, "0000000000000000");
        assert_eq!(rec.device_vendor_id.as_deref(), Some("00:00:00"));
        assert!(!rec.premium);
        assert_eq!(rec.schema, SchemaVersion::V2);
    }

    #[test]
    fn game_id_is_byte_reversed_uppercase() {
        let mut buf = [0u8; RECORD_SIZE];
        buf[24..32].copy_from_slice(&[0x00, 0x04, 0x00, 0x00, 0x00, 0x10, 0x98, 0x00]);
        let (rec, _) = decode(&buf);
        assert_eq!(rec.game_id, "0098100000000400");

        assert_eq!(game_id_hex(&[0xab, 0xcd, 0, 0, 0, 0, 0, 0x01]), "010000000000CDAB");
    }

    #[test]
    fn name_and_creator_decode() {
        let mut buf = [0u8; RECORD_SIZE];
        put_utf16(&mut buf, 0, "Mario");
        put_utf16(&mut buf, 46, "ルイージ");
        let (rec, _) = decode(&buf);
        assert_eq!(rec.name, "Mario");
        assert_eq!(rec.creator, "ルイージ");
    }

    #[test]
    fn odd_double_null_does_not_split_a_code_unit() {
        // 'A' 'B' U+0100 then terminator.  Bytes 3 and 4 are a zero pair
        // that straddles two code units and must not end the name.
        let mut buf = [0u8; RECORD_SIZE];
        buf[..8].copy_from_slice(&[0x41, 0x00, 0x42, 0x00, 0x00, 0x01, 0x00, 0x00]);
        buf[8..12].copy_from_slice(&[0x43, 0x00, 0x44, 0x00]); // noise after terminator
        let (rec, _) = decode(&buf);
        assert_eq!(rec.name, "AB\u{100}");
    }

    #[test]
    fn full_width_name_stops_at_field_boundary() {
        let mut buf = [0u8; RECORD_SIZE];
        put_utf16(&mut buf, 0, "ABCDEFGHIJ");
        buf[20] = 1; // outfit byte right after the name
        let (rec, _) = decode(&buf);
        assert_eq!(rec.name, "ABCDEFGHIJ");
        assert_eq!(rec.outfit.label, Some("Mario's Cap"));
    }

    #[test]
    fn fixed_text_strips_nulls() {
        let mut buf = [0u8; RECORD_SIZE];
        put_utf16(&mut buf, 66, "Japan");
        put_utf16(&mut buf, 98, "Tokyo");
        let (rec, _) = decode(&buf);
        assert_eq!(rec.country, "Japan");
        assert_eq!(rec.subregion, "Tokyo");
    }

    #[test]
    fn timestamp_correction_on_leap_boundary() {
        let field = LAYOUT_V2.last_crossed_at.unwrap();

        // 2000-03-01 → 2000-02-29 → 2030-02-28 (no Feb 29 in 2030).
        let mut buf = [0u8; RECORD_SIZE];
        put_millis(&mut buf, 951_868_800_000);
        let t = read_timestamp(&buf, &field).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2030, 2, 28, 0, 0, 0).unwrap());

        // Day first: 1998-03-01 → 1998-02-28 → 2028-02-28.  Year first
        // would have given 2028-02-29.
        put_millis(&mut buf, 888_710_400_000);
        let t = read_timestamp(&buf, &field).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2028, 2, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn timestamp_keeps_time_of_day() {
        let mut buf = [0u8; RECORD_SIZE];
        put_millis(&mut buf, 645_453_000_000); // 1990-06-15T12:30:00Z
        let (rec, _) = decode(&buf);
        assert_eq!(
            rec.last_crossed_at,
            Some(Utc.with_ymd_and_hms(2020, 6, 14, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn unmapped_exhaustive_codes_fail() {
        for (offset, field) in [(21, "preferred_pet"), (22, "dream"), (23, "hobby")] {
            let mut buf = [0u8; RECORD_SIZE];
            buf[offset] = 200;
            let mut diag = Diagnostics::new();
            match AvatarRecord::decode(&buf, &LAYOUT_V2, &mut diag) {
                Err(DecodeError::UnmappedEnum { field: f, code: 200, .. }) => assert_eq!(f, field),
                other => panic!("expected UnmappedEnum for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unmapped_outfit_is_soft() {
        let mut buf = [0u8; RECORD_SIZE];
        put_utf16(&mut buf, 0, "Nia");
        put_utf16(&mut buf, 46, "Rex");
        buf[20] = 7;
        let (rec, diags) = decode(&buf);
        assert_eq!(rec.outfit.code, 7);
        assert!(!rec.outfit.is_known());
        assert_eq!(rec.outfit.to_string(), UNKNOWN_OUTFIT);
        assert_eq!(
            diags,
            vec![Diagnostic::UnmappedCode {
                table:   "outfit",
                code:    7,
                name:    "Nia".into(),
                creator: "Rex".into(),
            }]
        );
    }

    #[test]
    fn counter_ceilings_follow_layout() {
        let mut buf = [0u8; RECORD_SIZE];
        buf[32..34].copy_from_slice(&40u16.to_le_bytes());

        let (rec, diags) = decode_with(&buf, &LAYOUT_V2);
        assert_eq!(rec.crossed_count, 40);
        assert!(diags.is_empty());

        let (rec, diags) = decode_with(&buf, &LAYOUT_V1);
        assert_eq!(rec.crossed_count, 40);
        assert!(matches!(
            diags.as_slice(),
            [Diagnostic::CounterAboveCeiling { field: "crossed_count", value: 40, ceiling: 35, .. }]
        ));

        buf[36..38].copy_from_slice(&3001u16.to_le_bytes());
        let (rec, diags) = decode_with(&buf, &LAYOUT_V2);
        assert_eq!(rec.plaza_population, 3001);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn premium_and_vendor() {
        let mut buf = [0u8; RECORD_SIZE];
        buf[38] = 0x01;
        buf[135..138].copy_from_slice(&[0x00, 0x1f, 0x32]);
        let (rec, _) = decode(&buf);
        assert!(rec.premium);
        assert_eq!(rec.device_vendor_id.as_deref(), Some("00:1F:32"));
    }

    #[test]
    fn v1_has_no_late_fields() {
        let mut buf = [0u8; RECORD_SIZE];
        put_millis(&mut buf, 951_868_800_000);
        let (rec, _) = decode_with(&buf, &LAYOUT_V1);
        assert_eq!(rec.last_crossed_at, None);
        assert_eq!(rec.device_vendor_id, None);
        assert_eq!(rec.schema, SchemaVersion::V1);
    }

    #[test]
    fn bit_addressing_is_lsb_first() {
        let mut buf = [0u8; RECORD_SIZE];
        buf[40] = 0b0000_0100;
        let (rec, _) = decode(&buf);
        assert_eq!(rec.bit(40 * 8 + 2), 1);
        assert_eq!(rec.bit(40 * 8 + 1), 0);
        assert_eq!(rec.bit(40 * 8 + 3), 0);
    }

    proptest! {
        #[test]
        fn decoding_is_deterministic(mut bytes in proptest::collection::vec(any::<u8>(), RECORD_SIZE)) {
            bytes[21] %= 3;
            bytes[22] %= 20;
            bytes[23] %= 28;
            let (a, da) = decode(&bytes);
            let (b, db) = decode(&bytes);
            prop_assert_eq!(a, b);
            prop_assert_eq!(da, db);
        }

        #[test]
        fn game_id_matches_reversed_encoding(id in any::<[u8; 8]>()) {
            let mut rev = id;
            rev.reverse();
            prop_assert_eq!(game_id_hex(&id), hex::encode_upper(rev));
            prop_assert_eq!(game_id_hex(&id), format!("{:016X}", u64::from_le_bytes(id)));
        }
    }
}
