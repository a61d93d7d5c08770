use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{LimitCurve, LimitMeta, MISSING};
use crate::error::LimitError;

// ---------------------------------------------------------------------------
// Two-column numeric tables
// ---------------------------------------------------------------------------

/// Read a two-column numeric table from a file.
///
/// Lines starting with `#` are comments. A first row whose cells are not
/// numbers is taken as a header and skipped; any later non-numeric cell is
/// an error. Extra columns are ignored.
pub fn load_pairs(path: &Path, delimiter: u8) -> Result<Vec<[f64; 2]>, LimitError> {
    let file = std::fs::File::open(path).map_err(|e| LimitError::Table {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    read_pairs(file, delimiter, &path.display().to_string()).map_err(|err| match err {
        PairsError::Csv(source) => LimitError::Table {
            path: path.to_path_buf(),
            source,
        },
        PairsError::Value(e) => e,
    })
}

/// Same as [`load_pairs`] over any reader; `origin` names it in errors.
pub fn parse_pairs<R: Read>(reader: R, delimiter: u8, origin: &str) -> Result<Vec<[f64; 2]>, LimitError> {
    read_pairs(reader, delimiter, origin).map_err(|err| match err {
        PairsError::Csv(source) => LimitError::Table {
            path: origin.into(),
            source,
        },
        PairsError::Value(e) => e,
    })
}

enum PairsError {
    Csv(csv::Error),
    Value(LimitError),
}

fn read_pairs<R: Read>(reader: R, delimiter: u8, origin: &str) -> Result<Vec<[f64; 2]>, PairsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut pairs = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(PairsError::Csv)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let cell = |col: usize| record.get(col).unwrap_or("");
        match (cell(0).parse::<f64>(), cell(1).parse::<f64>()) {
            (Ok(a), Ok(b)) => pairs.push([a, b]),
            _ if row_no == 0 => {
                log::debug!("{origin}: skipping header row {:?}", record);
            }
            (Err(_), _) => {
                return Err(PairsError::Value(LimitError::BadValue {
                    context: format!("{origin} row {row_no} column 0"),
                    value: cell(0).to_string(),
                }))
            }
            (_, Err(_)) => {
                return Err(PairsError::Value(LimitError::BadValue {
                    context: format!("{origin} row {row_no} column 1"),
                    value: cell(1).to_string(),
                }))
            }
        }
    }
    Ok(pairs)
}

// ---------------------------------------------------------------------------
// Curation JSON
// ---------------------------------------------------------------------------

/// One curated limit as written in a curation file.
///
/// ```json
/// [
///   {
///     "id": 1,
///     "cite": "1805.12562",
///     "year": 2018,
///     "type": "SI",
///     "expr": "XENON1T",
///     "name": "XENON1T (2018)",
///     "limit": [[6.0, 1.1e-44], [10.0, 9.0e-46]]
///   }
/// ]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CuratedLimit {
    pub id: u32,
    #[serde(default)]
    pub cite: Option<JsonValue>,
    #[serde(default)]
    pub year: Option<JsonValue>,
    #[serde(default, rename = "type")]
    pub kind: Option<JsonValue>,
    #[serde(default)]
    pub expr: Option<JsonValue>,
    #[serde(default)]
    pub name: Option<JsonValue>,
    pub limit: LimitCurve,
}

impl CuratedLimit {
    pub fn meta(&self) -> LimitMeta {
        LimitMeta {
            cite: json_to_text(self.cite.as_ref()),
            year: json_to_text(self.year.as_ref()),
            kind: json_to_text(self.kind.as_ref()),
            expr: json_to_text(self.expr.as_ref()),
            name: json_to_text(self.name.as_ref()),
        }
    }
}

/// Metadata cells may be strings or bare numbers (years usually are).
fn json_to_text(val: Option<&JsonValue>) -> String {
    match val {
        None | Some(JsonValue::Null) => MISSING.to_string(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Load and sanity-check a curation file.
pub fn load_curation(path: &Path) -> Result<Vec<CuratedLimit>> {
    let text = std::fs::read_to_string(path).context("reading curation file")?;
    let limits: Vec<CuratedLimit> = serde_json::from_str(&text).context("parsing curation JSON")?;

    let mut seen = std::collections::BTreeSet::new();
    for lim in &limits {
        if !seen.insert(lim.id) {
            bail!("Duplicate limit id {}", lim.id);
        }
        if lim.id > 99_999_999 {
            bail!("Limit id {} does not fit an 8-digit key", lim.id);
        }
        if let Some(row) = lim.limit.iter().position(|r| !r[0].is_finite() || !r[1].is_finite()) {
            bail!("Limit {}: row {row} is not finite", lim.id);
        }
    }
    Ok(limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pairs() {
        let text = "100,1\n200,50\n300,100\n";
        let pairs = parse_pairs(text.as_bytes(), b',', "mem").unwrap();
        assert_eq!(pairs, vec![[100.0, 1.0], [200.0, 50.0], [300.0, 100.0]]);
    }

    #[test]
    fn skips_header_and_comments() {
        let text = "# LHC mono-jet observed limit\nmed,chi\n1000, 100\n\n1500 ,200\n";
        let pairs = parse_pairs(text.as_bytes(), b',', "mem").unwrap();
        assert_eq!(pairs, vec![[1000.0, 100.0], [1500.0, 200.0]]);
    }

    #[test]
    fn other_delimiters() {
        let text = "1000 100\n2000 300\n";
        let pairs = parse_pairs(text.as_bytes(), b' ', "mem").unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn non_numeric_body_is_error() {
        let text = "1000,100\nabc,200\n";
        match parse_pairs(text.as_bytes(), b',', "mem") {
            Err(LimitError::BadValue { value, .. }) => assert_eq!(value, "abc"),
            other => panic!("expected BadValue, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_table_error() {
        let err = load_pairs(Path::new("/definitely/not/here.csv"), b',').unwrap_err();
        assert!(matches!(err, LimitError::Table { .. }));
    }

    #[test]
    fn curation_numbers_become_text() {
        let json = r#"[{"id": 7, "year": 2018, "type": "SI", "limit": [[1.0, 2.0]]}]"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.json");
        std::fs::write(&path, json).unwrap();

        let limits = load_curation(&path).unwrap();
        let meta = limits[0].meta();
        assert_eq!(meta.year, "2018");
        assert_eq!(meta.kind, "SI");
        assert_eq!(meta.cite, MISSING);
    }

    #[test]
    fn curation_rejects_duplicate_ids() {
        let json = r#"[{"id": 1, "limit": []}, {"id": 1, "limit": []}]"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("limits.json");
        std::fs::write(&path, json).unwrap();
        let err = load_curation(&path).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }
}
