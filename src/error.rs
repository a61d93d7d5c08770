//! Typed errors for the limit store, the interpolated models and the
//! theory formulas.
//!
//! Binaries wrap these in `anyhow` with context; the library keeps them
//! as enums so callers can tell a missing record apart from a broken store.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::filter::Selector;
use crate::theory::width::{Channel, Mediator};

/// A stored record blob could not be turned back into a curve.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("buffer holds {actual} bytes but {rows}x{cols} float64 matrix needs {expected}")]
    SizeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("limit matrix must have 2 columns, record declares {0}")]
    ColumnCount(usize),

    #[error("malformed record: {0}")]
    Format(#[from] serde_json::Error),

    #[error("invalid base64 buffer: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Failures of the LMDB-backed limit store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or unreadable store directory. Fatal, never retried.
    #[error("cannot open limit store at {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("lmdb: {0}")]
    Lmdb(#[from] heed::Error),

    #[error("record {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: DecodeError,
    },

    #[error("store key '{0}' is not an 8-digit id")]
    MalformedKey(String),

    #[error("limit store was opened read-only")]
    ReadOnly,

    #[error("cannot encode record {id}: {source}")]
    Encode {
        id: u32,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors building or feeding a limit model.
#[derive(Debug, Error)]
pub enum LimitError {
    #[error("no limit matches {0}")]
    NotFound(Selector),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("limit curve needs at least 2 points, got {points}")]
    Degenerate { points: usize },

    #[error("reading table {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{context}: '{value}' is not a number")]
    BadValue { context: String, value: String },
}

/// Errors from the width dispatch.
#[derive(Debug, Error, PartialEq)]
pub enum TheoryError {
    #[error("{mediator} mediator has no {channel} decay channel")]
    UnsupportedChannel { mediator: Mediator, channel: Channel },
}
