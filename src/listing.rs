//! Text table of store contents for the `list_limits` tool.

use crate::data::model::LimitRecord;

/// One line of the listing: id, type, experiment and arXiv identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub id: u32,
    pub kind: String,
    pub expr: String,
    pub cite: String,
}

impl From<&LimitRecord> for ListingRow {
    fn from(rec: &LimitRecord) -> Self {
        Self {
            id: rec.id,
            kind: rec.meta.kind.clone(),
            expr: rec.meta.expr.clone(),
            cite: rec.meta.cite.clone(),
        }
    }
}

const HEADERS: [&str; 4] = ["id", "type", "Experiment", "arXiv"];

/// Render rows as a bordered table, without a trailing newline:
///
/// ```text
/// +----+------+------------+------------+
/// | id | type | Experiment | arXiv      |
/// +----+------+------------+------------+
/// | 1  | SI   | XENON1T    | 1805.12562 |
/// +----+------+------------+------------+
/// ```
pub fn render_table(rows: &[ListingRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| [r.id.to_string(), r.kind.clone(), r.expr.clone(), r.cite.clone()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    };
    let line = |values: [&str; 4]| {
        let mut s = String::from("|");
        for (v, w) in values.iter().zip(widths) {
            s.push_str(&format!(" {v:<w$} |"));
        }
        s
    };

    let mut out = Vec::with_capacity(cells.len() + 4);
    out.push(rule.clone());
    out.push(line(HEADERS));
    out.push(rule.clone());
    for row in &cells {
        out.push(line([&row[0], &row[1], &row[2], &row[3]]));
    }
    out.push(rule);
    out.join("\n")
}
