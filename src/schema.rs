//! Versioned layout tables for the Mii Plaza save blob.
//!
//! Nothing in the blob describes itself: every offset below was recovered by
//! hand.  A [`Layout`] is an immutable table of field → offset/width/rule,
//! selected once per parse through [`SchemaVersion`].  New revisions are new
//! `static` tables; the decoder never branches on the version number.
//!
//! # Record map (264 bytes, current revision)
//!
//! ```text
//!   0..20   name              UTF-16LE, zero-unit terminated
//!  20       outfit            code (fail-soft)
//!  21       preferred pet     code
//!  22       dream             code
//!  23       hobby             code
//!  24..32   game id           8 bytes, byte-reversed
//!  32..34   crossed count     u16 LE
//!  34..36   StreetPass hits   u16 LE
//!  36..38   plaza population  u16 LE
//!  38       flags             bit 0 premium, bits 1-7 always zero
//!  39..44   unknown
//!  44..46   always zero
//!  46..66   creator           UTF-16LE, zero-unit terminated
//!  66..98   country           UTF-16LE, fixed width
//!  98..130  subregion         UTF-16LE, fixed width
//! 130..135  last crossed at   40-bit LE milliseconds       (V2 only)
//! 135..138  device vendor id  3 bytes                      (V2 only)
//! 138..142  always zero
//! 142..260  unknown           bit 7 of byte 150 always zero
//! 260..264  always zero
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::tables::CodeTable;

/// Size of one avatar record.
pub const RECORD_SIZE: usize = 264;
/// Size of the whole save blob.
pub const PLAZA_SIZE: usize = 393216;

// ── Field rules ──────────────────────────────────────────────────────────────

/// How a UTF-16LE text field ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScan {
    /// Stop at the first all-zero code unit or the field boundary.
    Terminated,
    /// Decode the whole field, then strip nulls.
    Fixed,
}

#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub offset: usize,
    pub width:  usize,
    pub scan:   TextScan,
}

/// Little-endian u16 with an empirically observed ceiling.
/// Exceeding the ceiling is a diagnostic, never an error.
#[derive(Debug, Clone, Copy)]
pub struct CounterField {
    pub offset:  usize,
    pub ceiling: Option<u16>,
}

/// What happens when an enumerated byte has no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPolicy {
    /// Keep decoding with the sentinel label and emit a diagnostic.
    Sentinel,
    /// Abort the record decode.
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct CodeField {
    pub offset:  usize,
    pub table:   CodeTable,
    pub on_miss: MissPolicy,
}

#[derive(Debug, Clone, Copy)]
pub struct FlagField {
    pub offset: usize,
    pub bit:    u8,
}

#[derive(Debug, Clone, Copy)]
pub struct BytesField {
    pub offset: usize,
    pub width:  usize,
}

/// Little-endian millisecond counter against the Unix epoch, corrected by
/// subtracting `minus_days` and then adding `plus_years` calendar years.
#[derive(Debug, Clone, Copy)]
pub struct TimestampField {
    pub offset:     usize,
    pub width:      usize,
    pub minus_days: u64,
    pub plus_years: u32,
}

// ── Container ────────────────────────────────────────────────────────────────

/// Offsets inside the 393216-byte blob.
#[derive(Debug, Clone, Copy)]
pub struct ContainerLayout {
    pub size:              usize,
    /// First byte of the avatar-record table.
    pub table_offset:      usize,
    /// Ring-buffer capacity of the record table.
    pub capacity:          usize,
    /// u32 LE.
    pub street_pass_tags:  usize,
    /// u16 LE.
    pub tickets:           usize,
    /// u16 LE.
    pub fantastic_ratings: usize,
}

pub const CONTAINER: ContainerLayout = ContainerLayout {
    size:              PLAZA_SIZE,
    table_offset:      14154,
    capacity:          1000,
    street_pass_tags:  278128,
    tickets:           373606,
    fantastic_ratings: 373974,
};

// ── Layout ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Layout {
    pub version:          SchemaVersion,
    pub record_size:      usize,

    pub name:             TextField,
    pub creator:          TextField,
    pub country:          TextField,
    pub subregion:        TextField,

    pub outfit:           CodeField,
    pub preferred_pet:    CodeField,
    pub dream:            CodeField,
    pub hobby:            CodeField,

    pub game_id:          BytesField,
    pub crossed_count:    CounterField,
    pub street_pass_hits: CounterField,
    pub plaza_population: CounterField,
    pub premium:          FlagField,

    pub last_crossed_at:  Option<TimestampField>,
    pub device_vendor_id: Option<BytesField>,

    /// Bytes that are zero in every record seen so far.
    pub zero_bytes:       &'static [usize],
    /// Bits (`byte * 8 + bit`, bit 0 = LSB) that are zero in every record
    /// seen so far.  None of them lies inside a `zero_bytes` entry.
    pub zero_bits:        &'static [usize],
    /// Byte spans not attributed to any field yet.
    pub unknown:          &'static [Range<usize>],

    pub container:        ContainerLayout,
}

impl Layout {
    /// Byte spans owned by decoded fields, in record order.
    ///
    /// The premium flag is a single bit and is not listed; its byte is
    /// accounted for by `premium` plus `zero_bits`.
    pub fn field_spans(&self) -> Vec<(&'static str, Range<usize>)> {
        let text = |f: &TextField| f.offset..f.offset + f.width;
        let byte = |f: &CodeField| f.offset..f.offset + 1;
        let word = |f: &CounterField| f.offset..f.offset + 2;

        let mut spans = vec![
            ("name",             text(&self.name)),
            ("outfit",           byte(&self.outfit)),
            ("preferred_pet",    byte(&self.preferred_pet)),
            ("dream",            byte(&self.dream)),
            ("hobby",            byte(&self.hobby)),
            ("game_id",          self.game_id.offset..self.game_id.offset + self.game_id.width),
            ("crossed_count",    word(&self.crossed_count)),
            ("street_pass_hits", word(&self.street_pass_hits)),
            ("plaza_population", word(&self.plaza_population)),
            ("creator",          text(&self.creator)),
            ("country",          text(&self.country)),
            ("subregion",        text(&self.subregion)),
        ];
        if let Some(ts) = &self.last_crossed_at {
            spans.push(("last_crossed_at", ts.offset..ts.offset + ts.width));
        }
        if let Some(v) = &self.device_vendor_id {
            spans.push(("device_vendor_id", v.offset..v.offset + v.width));
        }
        spans.sort_by_key(|(_, r)| r.start);
        spans
    }

    /// Unknown byte offsets, ascending.
    pub fn unknown_bytes(&self) -> impl Iterator<Item = usize> + '_ {
        self.unknown.iter().flat_map(|r| r.clone())
    }

    /// Unknown bit positions (`byte * 8 + bit`), ascending.
    ///
    /// Every bit of every unknown byte, minus the always-zero bits.
    pub fn unknown_bits(&self) -> Vec<usize> {
        self.unknown_bytes()
            .flat_map(|byte| (0..8).map(move |bit| byte * 8 + bit))
            .filter(|pos| !self.zero_bits.contains(pos))
            .collect()
    }
}

// ── Versions ─────────────────────────────────────────────────────────────────

/// Known revisions of the record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Early revision: no timestamp, no vendor id, lower crossed-count ceiling.
    V1,
    /// Current revision.
    #[default]
    V2,
}

impl SchemaVersion {
    pub fn layout(self) -> &'static Layout {
        match self {
            SchemaVersion::V1 => &LAYOUT_V1,
            SchemaVersion::V2 => &LAYOUT_V2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
        }
    }

    /// Parse from a CLI string.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "v1" | "1" => Some(SchemaVersion::V1),
            "v2" | "2" => Some(SchemaVersion::V2),
            _          => None,
        }
    }
}

// Fields shared by every revision.

const NAME: TextField      = TextField { offset: 0,  width: 20, scan: TextScan::Terminated };
const CREATOR: TextField   = TextField { offset: 46, width: 20, scan: TextScan::Terminated };
const COUNTRY: TextField   = TextField { offset: 66, width: 32, scan: TextScan::Fixed };
const SUBREGION: TextField = TextField { offset: 98, width: 32, scan: TextScan::Fixed };

const OUTFIT: CodeField        = CodeField { offset: 20, table: CodeTable::Outfit,       on_miss: MissPolicy::Sentinel };
const PREFERRED_PET: CodeField = CodeField { offset: 21, table: CodeTable::PreferredPet, on_miss: MissPolicy::Fail };
const DREAM: CodeField         = CodeField { offset: 22, table: CodeTable::Dream,        on_miss: MissPolicy::Fail };
const HOBBY: CodeField         = CodeField { offset: 23, table: CodeTable::Hobby,        on_miss: MissPolicy::Fail };

const GAME_ID: BytesField = BytesField { offset: 24, width: 8 };

const STREET_PASS_HITS: CounterField = CounterField { offset: 34, ceiling: Some(33630) };
const PLAZA_POPULATION: CounterField = CounterField { offset: 36, ceiling: Some(3000) };

const PREMIUM: FlagField = FlagField { offset: 38, bit: 0 };

const ZERO_BYTES: &[usize] = &[44, 45, 138, 139, 140, 141, 260, 261, 262, 263];
const ZERO_BITS: &[usize] = &[
    38 * 8 + 1, 38 * 8 + 2, 38 * 8 + 3, 38 * 8 + 4, 38 * 8 + 5, 38 * 8 + 6, 38 * 8 + 7,
    150 * 8 + 7,
];

pub static LAYOUT_V1: Layout = Layout {
    version:          SchemaVersion::V1,
    record_size:      RECORD_SIZE,
    name:             NAME,
    creator:          CREATOR,
    country:          COUNTRY,
    subregion:        SUBREGION,
    outfit:           OUTFIT,
    preferred_pet:    PREFERRED_PET,
    dream:            DREAM,
    hobby:            HOBBY,
    game_id:          GAME_ID,
    crossed_count:    CounterField { offset: 32, ceiling: Some(35) },
    street_pass_hits: STREET_PASS_HITS,
    plaza_population: PLAZA_POPULATION,
    premium:          PREMIUM,
    last_crossed_at:  None,
    device_vendor_id: None,
    zero_bytes:       ZERO_BYTES,
    zero_bits:        ZERO_BITS,
    unknown:          &[39..44, 130..138, 142..260],
    container:        CONTAINER,
};

pub static LAYOUT_V2: Layout = Layout {
    version:          SchemaVersion::V2,
    record_size:      RECORD_SIZE,
    name:             NAME,
    creator:          CREATOR,
    country:          COUNTRY,
    subregion:        SUBREGION,
    outfit:           OUTFIT,
    preferred_pet:    PREFERRED_PET,
    dream:            DREAM,
    hobby:            HOBBY,
    game_id:          GAME_ID,
    crossed_count:    CounterField { offset: 32, ceiling: Some(55) },
    street_pass_hits: STREET_PASS_HITS,
    plaza_population: PLAZA_POPULATION,
    premium:          PREMIUM,
    last_crossed_at:  Some(TimestampField { offset: 130, width: 5, minus_days: 1, plus_years: 30 }),
    device_vendor_id: Some(BytesField { offset: 135, width: 3 }),
    zero_bytes:       ZERO_BYTES,
    zero_bits:        ZERO_BITS,
    unknown:          &[39..44, 142..260],
    container:        CONTAINER,
};
