use std::io;
use thiserror::Error;

/// Fatal decode failures. Anything recoverable is a
/// [`Diagnostic`](crate::diag::Diagnostic) instead.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Input length does not match the schema's fixed size.
    #[error("{context} must be exactly {expected} bytes, got {actual}")]
    Size {
        context:  &'static str,
        expected: usize,
        actual:   usize,
    },
    /// An enumerated byte missed a table that is treated as exhaustive.
    /// Either the data is corrupt or the schema revision is unknown.
    #[error("{field}: code {code} has no entry in the {table} table")]
    UnmappedEnum {
        field: &'static str,
        table: &'static str,
        code:  u8,
    },
    #[error("{field}: raw millisecond value {millis} is not a representable instant")]
    Timestamp {
        field:  &'static str,
        millis: u64,
    },
    /// A single record failed; the whole snapshot is rejected with it.
    #[error("record slot {slot} (blob offset {offset:#x}): {source}")]
    Record {
        slot:   usize,
        offset: usize,
        #[source]
        source: Box<DecodeError>,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    pub(crate) fn size(context: &'static str, expected: usize, actual: usize) -> Self {
        DecodeError::Size { context, expected, actual }
    }

    /// Innermost error, looking through [`DecodeError::Record`] wrappers.
    pub fn root(&self) -> &DecodeError {
        match self {
            DecodeError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
