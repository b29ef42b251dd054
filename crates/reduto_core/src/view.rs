//! Record-browser view construction and rendering.
//!
//! # Responsibility
//! - Build a declarative view description from records plus a filter.
//! - Render that description to text, separate from the data.
//!
//! # Invariants
//! - Filtering never mutates the underlying collection.
//! - Every rendered row carries the stable record id used for deletion.
//! - An empty result renders a single placeholder row, never a bare table.

use crate::model::{Record, RecordId};

/// Placeholder shown when the collection or the filtered view is empty.
pub const EMPTY_PLACEHOLDER: &str = "Nenhum registro encontrado.";

const TABLE_HEADER: &str = "Nome | E-mail | CPF | Telefone | Cidade/UF | Data | ID";

/// One displayable row, already projected for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserRow {
    /// Stable identity: deletion targets this, never the row position.
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub tax_id: String,
    pub phone: String,
    pub city_state: String,
    pub created_at: String,
}

/// Declarative description of the browser overlay content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    /// Total records in the collection, independent of the filter.
    pub total: usize,
    /// The active filter text (trimmed).
    pub filter: String,
    /// Rows surviving the filter, in collection order.
    pub rows: Vec<BrowserRow>,
}

/// Builds the browser view for the given records and search filter.
///
/// The filter is a case-insensitive substring match over name, email and
/// city, recomputed from scratch on every call.
pub fn build_view(records: &[Record], filter: &str) -> BrowserView {
    let needle = filter.trim().to_lowercase();

    let rows = records
        .iter()
        .filter(|record| {
            if needle.is_empty() {
                return true;
            }
            let haystack =
                format!("{} {} {}", record.name, record.email, record.city).to_lowercase();
            haystack.contains(&needle)
        })
        .map(project_row)
        .collect();

    BrowserView {
        total: records.len(),
        filter: needle,
        rows,
    }
}

/// Renders the view as a text table with a live record count.
pub fn render_table(view: &BrowserView) -> String {
    let mut out = format!("Cadastros ({})\n{TABLE_HEADER}\n", view.total);

    if view.rows.is_empty() {
        out.push_str(EMPTY_PLACEHOLDER);
        out.push('\n');
        return out;
    }

    for row in &view.rows {
        out.push_str(&format!(
            "{} | {} | {} | {} | {} | {} | {}\n",
            row.name, row.email, row.tax_id, row.phone, row.city_state, row.created_at, row.id
        ));
    }
    out
}

fn project_row(record: &Record) -> BrowserRow {
    BrowserRow {
        id: record.id,
        name: display_or_dash(&record.name),
        email: display_or_dash(&record.email),
        tax_id: display_or_dash(&record.tax_id),
        phone: display_or_dash(&record.phone),
        city_state: if record.city.is_empty() {
            "-".to_string()
        } else {
            format!("{}/{}", record.city, record.state)
        },
        created_at: record.created_at.clone(),
    }
}

fn display_or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{build_view, render_table, EMPTY_PLACEHOLDER};
    use crate::model::{Record, RecordDraft};

    fn record(name: &str, email: &str, city: &str) -> Record {
        Record::from_draft(RecordDraft {
            name: name.to_string(),
            email: email.to_string(),
            city: city.to_string(),
            ..RecordDraft::default()
        })
    }

    fn sample() -> Vec<Record> {
        vec![
            record("Ana Silva", "ana@example.com", "Recife"),
            record("Bruno Costa", "bruno@example.com", "São Paulo"),
            record("Carla Souza", "carla@example.com", "Recife"),
        ]
    }

    #[test]
    fn empty_filter_shows_everything() {
        let records = sample();
        let view = build_view(&records, "");
        assert_eq!(view.total, 3);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn filter_matches_name_email_and_city_case_insensitively() {
        let records = sample();
        assert_eq!(build_view(&records, "BRUNO").rows.len(), 1);
        assert_eq!(build_view(&records, "example.com").rows.len(), 3);
        assert_eq!(build_view(&records, "recife").rows.len(), 2);
    }

    #[test]
    fn filtering_keeps_total_and_does_not_touch_records() {
        let records = sample();
        let view = build_view(&records, "bruno");
        assert_eq!(view.total, 3);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn rows_carry_the_stable_record_id() {
        let records = sample();
        let view = build_view(&records, "carla");
        assert_eq!(view.rows[0].id, records[2].id);
    }

    #[test]
    fn empty_fields_render_as_dash_and_city_pairs_with_state() {
        let mut records = sample();
        records[0].state = "PE".to_string();
        let view = build_view(&records, "ana");
        let row = &view.rows[0];
        assert_eq!(row.tax_id, "-");
        assert_eq!(row.phone, "-");
        assert_eq!(row.city_state, "Recife/PE");
    }

    #[test]
    fn no_matches_render_the_placeholder_row() {
        let records = sample();
        let rendered = render_table(&build_view(&records, "zzz"));
        assert!(rendered.contains(EMPTY_PLACEHOLDER));
        assert!(rendered.contains("Cadastros (3)"));
    }
}
