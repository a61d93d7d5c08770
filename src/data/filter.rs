use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::model::{LimitCatalog, LimitRecord, MetaField};

// ---------------------------------------------------------------------------
// Selector – picks exactly one limit out of a store
// ---------------------------------------------------------------------------

/// How a single limit is chosen from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Exact store id.
    Id(u32),
    /// Equal to any metadata field value.
    Pattern(String),
    /// Substring of the arXiv citation.
    Arxiv(String),
}

impl Selector {
    pub fn accepts(&self, record: &LimitRecord) -> bool {
        match self {
            Selector::Id(id) => record.id == *id,
            Selector::Pattern(p) => record.meta.matches(p),
            Selector::Arxiv(a) => record.meta.cite.contains(a.as_str()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "id {id:08}"),
            Selector::Pattern(p) => write!(f, "pattern '{p}'"),
            Selector::Arxiv(a) => write!(f, "arXiv '{a}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per field
// ---------------------------------------------------------------------------

/// Per-field selection state: maps field → set of selected values.
/// If a field is absent, it means "no filter" (show all).
pub type FilterState = BTreeMap<MetaField, BTreeSet<String>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(catalog: &LimitCatalog) -> FilterState {
    catalog
        .unique_values
        .iter()
        .map(|(field, vals)| (*field, vals.clone()))
        .collect()
}

/// Return indices of records that pass all active filters and, when
/// `search` is non-empty, mention it in some field.
///
/// A record passes a field filter when:
/// * The field is not present in `filters` → passes (no constraint)
/// * The filter set for that field is empty → nothing selected → fails
/// * The record's value for that field is in the selected set → passes
pub fn filtered_indices(catalog: &LimitCatalog, filters: &FilterState, search: &str) -> Vec<usize> {
    catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            if !search.is_empty() && !rec.meta.mentions(search) {
                return false;
            }
            for (field, selected) in filters {
                if selected.is_empty() {
                    return false;
                }
                if let Some(all_vals) = catalog.unique_values.get(field) {
                    if selected.len() == all_vals.len() {
                        continue;
                    }
                }
                if !selected.contains(rec.meta.get(*field)) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LimitMeta;

    fn record(id: u32, kind: &str, expr: &str, cite: &str) -> LimitRecord {
        LimitRecord {
            id,
            curve: vec![[1.0, 1.0], [2.0, 2.0]],
            meta: LimitMeta {
                cite: cite.into(),
                year: "2020".into(),
                kind: kind.into(),
                expr: expr.into(),
                name: format!("{expr} {kind}"),
            },
        }
    }

    fn catalog() -> LimitCatalog {
        LimitCatalog::from_records(vec![
            record(1, "SI", "XENON1T", "1805.12562"),
            record(2, "SD-neutron", "XENON1T", "1902.03234"),
            record(3, "SI", "PandaX-4T", "2107.13438"),
        ])
    }

    #[test]
    fn selectors_accept_expected_records() {
        let cat = catalog();
        assert!(Selector::Id(2).accepts(&cat.records[1]));
        assert!(!Selector::Id(2).accepts(&cat.records[0]));
        assert!(Selector::Pattern("PandaX-4T".into()).accepts(&cat.records[2]));
        assert!(!Selector::Pattern("PandaX".into()).accepts(&cat.records[2]));
        assert!(Selector::Arxiv("1902".into()).accepts(&cat.records[1]));
    }

    #[test]
    fn full_filter_state_shows_everything() {
        let cat = catalog();
        let filters = init_filter_state(&cat);
        assert_eq!(filtered_indices(&cat, &filters, ""), vec![0, 1, 2]);
    }

    #[test]
    fn narrowing_one_field() {
        let cat = catalog();
        let mut filters = init_filter_state(&cat);
        filters.insert(MetaField::Kind, BTreeSet::from(["SI".to_string()]));
        assert_eq!(filtered_indices(&cat, &filters, ""), vec![0, 2]);
    }

    #[test]
    fn empty_selection_hides_all() {
        let cat = catalog();
        let mut filters = init_filter_state(&cat);
        filters.insert(MetaField::Expr, BTreeSet::new());
        assert!(filtered_indices(&cat, &filters, "").is_empty());
    }

    #[test]
    fn search_text_is_substring() {
        let cat = catalog();
        let filters = FilterState::new();
        assert_eq!(filtered_indices(&cat, &filters, "Panda"), vec![2]);
    }
}
