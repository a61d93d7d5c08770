use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::model::{LimitCurve, LimitMeta};
use crate::error::DecodeError;

// ---------------------------------------------------------------------------
// Stored record layout
// ---------------------------------------------------------------------------

/// On-disk form of a limit: row/column counts, the little-endian float64
/// buffer (base64) and the metadata strings.
///
/// ```json
/// {
///   "size": 2, "ncol": 2, "limit": "AAAAAAAA8D8A...",
///   "cite": "1234.5678", "year": "None", "type": "SI",
///   "expr": "None", "name": "Test"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    size: usize,
    ncol: usize,
    limit: String,
    cite: String,
    year: String,
    #[serde(rename = "type")]
    kind: String,
    expr: String,
    name: String,
}

const COLS: usize = 2;
const F64_BYTES: usize = std::mem::size_of::<f64>();

/// Serialize a curve and its metadata into a store value.
pub fn encode(curve: &[[f64; 2]], meta: &LimitMeta) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::with_capacity(curve.len() * COLS * F64_BYTES);
    for row in curve {
        for v in row {
            buf.extend_from_slice(&v.to_le_bytes());
        }
    }

    let record = StoredRecord {
        size: curve.len(),
        ncol: COLS,
        limit: STANDARD.encode(&buf),
        cite: meta.cite.clone(),
        year: meta.year.clone(),
        kind: meta.kind.clone(),
        expr: meta.expr.clone(),
        name: meta.name.clone(),
    };
    serde_json::to_vec(&record)
}

/// Parse a store value back into its curve and metadata.
pub fn decode(bytes: &[u8]) -> Result<(LimitCurve, LimitMeta), DecodeError> {
    let record: StoredRecord = serde_json::from_slice(bytes)?;
    if record.ncol != COLS {
        return Err(DecodeError::ColumnCount(record.ncol));
    }

    let buf = STANDARD.decode(record.limit.as_bytes())?;
    // `size` comes from disk; an absurd row count must not overflow.
    let expected = record
        .size
        .checked_mul(record.ncol)
        .and_then(|n| n.checked_mul(F64_BYTES));
    if expected != Some(buf.len()) {
        return Err(DecodeError::SizeMismatch {
            rows: record.size,
            cols: record.ncol,
            expected: expected.unwrap_or(usize::MAX),
            actual: buf.len(),
        });
    }

    let curve = buf
        .chunks_exact(COLS * F64_BYTES)
        .map(|row| {
            let (a, b) = row.split_at(F64_BYTES);
            [read_f64(a), read_f64(b)]
        })
        .collect();

    let meta = LimitMeta {
        cite: record.cite,
        year: record.year,
        kind: record.kind,
        expr: record.expr,
        name: record.name,
    };
    Ok((curve, meta))
}

fn read_f64(bytes: &[u8]) -> f64 {
    let mut raw = [0u8; F64_BYTES];
    raw.copy_from_slice(bytes);
    f64::from_le_bytes(raw)
}
