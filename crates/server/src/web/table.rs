//! Generic record table.
//!
//! A table is described by its columns, each a header label plus an accessor
//! that pulls the cell text out of a record. Accessors return `None` for a
//! missing relation or a null field, which renders as [`PLACEHOLDER`].

use crate::web::html::escape;

pub const PLACEHOLDER: &str = "-";
pub const EMPTY_MESSAGE: &str = "No data available";

type Accessor<'a, T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync + 'a>;
type Action<'a, T> = Box<dyn Fn(&T) -> String + Send + Sync + 'a>;

pub struct Column<'a, T> {
    pub label: &'static str,
    cell: Accessor<'a, T>,
}

impl<'a, T> Column<'a, T> {
    pub fn new<F>(label: &'static str, cell: F) -> Self
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'a,
    {
        Self {
            label,
            cell: Box::new(cell),
        }
    }

    /// Cell text for `record`, escaped, with the placeholder for missing values
    pub fn render_cell(&self, record: &T) -> String {
        match (self.cell)(record) {
            Some(value) => escape(&value),
            None => PLACEHOLDER.to_string(),
        }
    }
}

pub struct Table<'a, T> {
    columns: Vec<Column<'a, T>>,
    on_edit: Option<Action<'a, T>>,
    on_delete: Option<Action<'a, T>>,
    loading: bool,
}

impl<'a, T> Table<'a, T> {
    pub fn new(columns: Vec<Column<'a, T>>) -> Self {
        Self {
            columns,
            on_edit: None,
            on_delete: None,
            loading: false,
        }
    }

    /// Adds an edit action; `action` returns the control markup for a record
    pub fn on_edit<F>(mut self, action: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'a,
    {
        self.on_edit = Some(Box::new(action));
        self
    }

    pub fn on_delete<F>(mut self, action: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'a,
    {
        self.on_delete = Some(Box::new(action));
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn has_actions(&self) -> bool {
        self.on_edit.is_some() || self.on_delete.is_some()
    }

    pub fn render(&self, records: &[T]) -> String {
        if self.loading {
            return r#"<div class="table-loading" role="status"><div class="spinner"></div></div>"#
                .to_string();
        }

        if records.is_empty() {
            return format!(
                r#"<div class="table-empty"><p>{EMPTY_MESSAGE}</p><p class="hint">Start by adding new records</p></div>"#
            );
        }

        let mut html = String::from(r#"<table class="data-table"><thead><tr>"#);
        for column in &self.columns {
            html.push_str(&format!("<th>{}</th>", escape(column.label)));
        }
        if self.has_actions() {
            html.push_str(r#"<th class="actions">Actions</th>"#);
        }
        html.push_str("</tr></thead><tbody>");

        for record in records {
            html.push_str("<tr>");
            for column in &self.columns {
                html.push_str(&format!("<td>{}</td>", column.render_cell(record)));
            }
            if self.has_actions() {
                html.push_str(r#"<td class="actions">"#);
                if let Some(edit) = &self.on_edit {
                    html.push_str(&edit(record));
                }
                if let Some(delete) = &self.on_delete {
                    html.push_str(&delete(record));
                }
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table>");
        html
    }
}
