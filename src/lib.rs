pub mod schema;
pub mod tables;
pub mod error;
pub mod diag;
pub mod record;
pub mod invariant;
pub mod plaza;
pub mod probe;
pub mod export;
pub mod titles;
pub mod dump;

pub use schema::{Layout, SchemaVersion, PLAZA_SIZE, RECORD_SIZE};
pub use error::{DecodeError, Result};
pub use diag::Diagnostic;
pub use record::AvatarRecord;
pub use invariant::{check_empty, check_snapshot, Violation};
pub use plaza::{ParseOptions, PlazaSnapshot};
pub use probe::{probe, BitWindow, Classifier, ProbeError};
pub use titles::{GameTitle, StaticTitles, TitleLookup, TitleResolver};
pub use dump::hexdump;
