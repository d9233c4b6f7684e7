//! Flat row projections for tabular consumers.
//!
//! Every row of one projection has the same keys in the same order, so a
//! downstream CSV writer or chart can take the first row's keys as header.
//! Nothing here knows about any presentation format.

use serde_json::{json, Map, Value};

use crate::plaza::PlazaSnapshot;
use crate::record::AvatarRecord;
use crate::titles::TitleResolver;

/// One row: column name → value, in insertion order.
pub type Row = Map<String, Value>;

impl AvatarRecord {
    /// Decoded fields, enumerated codes rendered as labels.
    pub fn to_row(&self) -> Row {
        self.row(None)
    }

    /// As [`to_row`](Self::to_row), with a `game_name` column after
    /// `game_id`.
    pub fn to_row_with_titles(&self, titles: &TitleResolver<'_>) -> Row {
        self.row(Some(titles))
    }

    fn row(&self, titles: Option<&TitleResolver<'_>>) -> Row {
        let mut row = identity(self);
        row.insert("last_crossed_at".into(), json!(self.last_crossed_at.map(|t| t.to_rfc3339())));
        row.insert("game_id".into(), json!(self.game_id));
        if let Some(titles) = titles {
            row.insert("game_name".into(), json!(titles.resolve(&self.game_id).to_string()));
        }
        row.insert("country".into(), json!(self.country));
        row.insert("subregion".into(), json!(self.subregion));
        row.insert("crossed_count".into(), json!(self.crossed_count));
        row.insert("street_pass_hits".into(), json!(self.street_pass_hits));
        row.insert("plaza_population".into(), json!(self.plaza_population));
        row.insert("outfit".into(), json!(self.outfit.display_label()));
        row.insert("preferred_pet".into(), json!(self.preferred_pet.display_label()));
        row.insert("dream".into(), json!(self.dream.display_label()));
        row.insert("hobby".into(), json!(self.hobby.display_label()));
        row.insert("premium".into(), json!(self.premium));
        row.insert("device_vendor_id".into(), json!(self.device_vendor_id));
        row
    }

    /// Identity plus every unknown byte, keyed `byte_<offset>`.
    pub fn unknown_bytes_row(&self) -> Row {
        let mut row = identity(self);
        for b in self.layout().unknown_bytes() {
            row.insert(format!("byte_{b}"), json!(self.raw()[b]));
        }
        row
    }

    /// Identity plus every unknown bit, keyed `bit_<byte*8+bit>`.
    pub fn unknown_bits_row(&self) -> Row {
        let mut row = identity(self);
        for pos in self.layout().unknown_bits() {
            row.insert(format!("bit_{pos}"), json!(self.bit(pos)));
        }
        row
    }
}

fn identity(rec: &AvatarRecord) -> Row {
    let mut row = Row::new();
    row.insert("name".into(), json!(rec.name));
    row.insert("creator".into(), json!(rec.creator));
    row
}

impl PlazaSnapshot {
    pub fn rows(&self) -> Vec<Row> {
        self.records.iter().map(AvatarRecord::to_row).collect()
    }

    pub fn rows_with_titles(&self, titles: &TitleResolver<'_>) -> Vec<Row> {
        self.records.iter().map(|r| r.to_row_with_titles(titles)).collect()
    }

    pub fn unknown_bytes_rows(&self) -> Vec<Row> {
        self.records.iter().map(AvatarRecord::unknown_bytes_row).collect()
    }

    pub fn unknown_bits_rows(&self) -> Vec<Row> {
        self.records.iter().map(AvatarRecord::unknown_bits_row).collect()
    }
}
