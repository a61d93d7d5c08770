use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// LimitCurve – the (mass, cross-section) table of one published limit
// ---------------------------------------------------------------------------

/// Rows of `[dark-matter mass (GeV), cross-section (cm²)]`.
pub type LimitCurve = Vec<[f64; 2]>;

/// Placeholder written for metadata fields the curator left out.
pub const MISSING: &str = "None";

/// Prefix turning an arXiv identifier into a citation URL.
pub const ARXIV_URL: &str = "https://arxiv.org/abs/";

// ---------------------------------------------------------------------------
// MetaField – the searchable metadata columns
// ---------------------------------------------------------------------------

/// Named metadata column of a stored limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaField {
    Cite,
    Year,
    Kind,
    Expr,
    Name,
}

impl MetaField {
    pub const ALL: [MetaField; 5] = [
        MetaField::Cite,
        MetaField::Year,
        MetaField::Kind,
        MetaField::Expr,
        MetaField::Name,
    ];

    /// Key used in curation files and loose metadata maps.
    pub fn key(self) -> &'static str {
        match self {
            MetaField::Cite => "cite",
            MetaField::Year => "year",
            MetaField::Kind => "type",
            MetaField::Expr => "expr",
            MetaField::Name => "name",
        }
    }
}

impl fmt::Display for MetaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// LimitMeta – citation and labelling metadata
// ---------------------------------------------------------------------------

/// Citation metadata attached to a limit curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitMeta {
    /// arXiv identifier, e.g. `1805.12562`.
    pub cite: String,
    pub year: String,
    /// Interaction type label (`SI`, `SD-neutron`, ...).
    pub kind: String,
    /// Experiment / interaction-channel label.
    pub expr: String,
    /// Display name used as the plot legend.
    pub name: String,
}

impl Default for LimitMeta {
    fn default() -> Self {
        Self {
            cite: MISSING.to_string(),
            year: MISSING.to_string(),
            kind: MISSING.to_string(),
            expr: MISSING.to_string(),
            name: MISSING.to_string(),
        }
    }
}

impl LimitMeta {
    /// Build from a loose key → value map; absent keys become `"None"`.
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let take = |field: MetaField| {
            map.get(field.key())
                .cloned()
                .unwrap_or_else(|| MISSING.to_string())
        };
        Self {
            cite: take(MetaField::Cite),
            year: take(MetaField::Year),
            kind: take(MetaField::Kind),
            expr: take(MetaField::Expr),
            name: take(MetaField::Name),
        }
    }

    pub fn get(&self, field: MetaField) -> &str {
        match field {
            MetaField::Cite => &self.cite,
            MetaField::Year => &self.year,
            MetaField::Kind => &self.kind,
            MetaField::Expr => &self.expr,
            MetaField::Name => &self.name,
        }
    }

    /// Field values in [`MetaField::ALL`] order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        MetaField::ALL.into_iter().map(move |f| self.get(f))
    }

    /// True when `pattern` equals one of the field values.
    pub fn matches(&self, pattern: &str) -> bool {
        self.values().any(|v| v == pattern)
    }

    /// True when `text` occurs inside one of the field values.
    pub fn mentions(&self, text: &str) -> bool {
        self.values().any(|v| v.contains(text))
    }

    pub fn citation_url(&self) -> String {
        format!("{ARXIV_URL}{}", self.cite)
    }
}

// ---------------------------------------------------------------------------
// LimitRecord – one stored limit
// ---------------------------------------------------------------------------

/// A published exclusion curve together with its store id.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitRecord {
    pub id: u32,
    pub curve: LimitCurve,
    pub meta: LimitMeta,
}

impl fmt::Display for LimitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.meta.citation_url(),
            self.meta.kind,
            self.meta.name
        )
    }
}

// ---------------------------------------------------------------------------
// LimitCatalog – every record of a store with per-field value indices
// ---------------------------------------------------------------------------

/// All records read from a store, with the sorted unique values of each
/// metadata field (drives the viewer's filter widgets).
#[derive(Debug, Clone, Default)]
pub struct LimitCatalog {
    pub records: Vec<LimitRecord>,
    pub unique_values: BTreeMap<MetaField, BTreeSet<String>>,
}

impl LimitCatalog {
    pub fn from_records(records: Vec<LimitRecord>) -> Self {
        let mut unique_values: BTreeMap<MetaField, BTreeSet<String>> = BTreeMap::new();
        for rec in &records {
            for field in MetaField::ALL {
                unique_values
                    .entry(field)
                    .or_default()
                    .insert(rec.meta.get(field).to_string());
            }
        }
        Self {
            records,
            unique_values,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> LimitMeta {
        LimitMeta {
            cite: "1805.12562".into(),
            year: "2018".into(),
            kind: "SI".into(),
            expr: "XENON1T".into(),
            name: "XENON1T (2018)".into(),
        }
    }

    #[test]
    fn from_map_fills_missing_with_none() {
        let mut map = BTreeMap::new();
        map.insert("cite".to_string(), "1234.5678".to_string());
        map.insert("type".to_string(), "SI".to_string());
        let m = LimitMeta::from_map(&map);
        assert_eq!(m.cite, "1234.5678");
        assert_eq!(m.kind, "SI");
        assert_eq!(m.year, MISSING);
        assert_eq!(m.expr, MISSING);
        assert_eq!(m.name, MISSING);
    }

    #[test]
    fn matches_is_exact_mentions_is_substring() {
        let m = meta();
        assert!(m.matches("XENON1T"));
        assert!(!m.matches("XENON"));
        assert!(m.mentions("XENON"));
        assert!(m.mentions("12562"));
        assert!(!m.mentions("LUX"));
    }

    #[test]
    fn display_uses_citation_url() {
        let rec = LimitRecord {
            id: 3,
            curve: vec![[10.0, 1e-46]],
            meta: meta(),
        };
        assert_eq!(
            rec.to_string(),
            "https://arxiv.org/abs/1805.12562 SI XENON1T (2018)"
        );
    }

    #[test]
    fn catalog_collects_unique_values() {
        let mut other = meta();
        other.kind = "SD".into();
        let records = vec![
            LimitRecord { id: 1, curve: vec![], meta: meta() },
            LimitRecord { id: 2, curve: vec![], meta: other },
        ];
        let cat = LimitCatalog::from_records(records);
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.unique_values[&MetaField::Kind].len(), 2);
        assert_eq!(cat.unique_values[&MetaField::Expr].len(), 1);
    }
}
