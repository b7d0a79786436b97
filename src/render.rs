//! Table rendering.
//!
//! A [`Renderer`] turns a [`Table`] into a visual representation. It only needs read-only access
//! to the header and rows. [`HtmlRenderer`] produces an HTML `<table>` with absent cells shown as
//! `NULL`.

use std::fmt::Write;

use crate::error::LoadResult;
use crate::types::Table;

/// Produces a visual representation of a table.
pub trait Renderer {
    fn render(&self, table: &Table) -> String;
}

/// Renders a table as an HTML fragment.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    /// Optional `class` attribute for the `<table>` element.
    pub table_class: Option<String>,
    /// Text shown instead of a table when there are no rows.
    pub empty_message: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            table_class: None,
            empty_message: "No data available".to_string(),
        }
    }
}

impl HtmlRenderer {
    /// Render the empty-state message on its own.
    pub fn render_empty(&self) -> String {
        format!("<p>{}</p>\n", escape_html(&self.empty_message))
    }

    /// Wrap the rendered fragment in a standalone HTML document.
    pub fn render_page(&self, table: &Table, title: &str) -> String {
        self.page(title, &self.render(table))
    }

    /// Render the outcome of a load: the table, or the empty-state message when loading failed.
    pub fn render_load(&self, loaded: &LoadResult<Table>) -> String {
        match loaded {
            Ok(table) => self.render(table),
            Err(_) => self.render_empty(),
        }
    }

    /// [`Self::render_load`] wrapped in a standalone HTML document.
    pub fn page_for_load(&self, title: &str, loaded: &LoadResult<Table>) -> String {
        self.page(title, &self.render_load(loaded))
    }

    /// Wrap an already-rendered fragment in a standalone HTML document.
    pub fn page(&self, title: &str, body: &str) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_html(title));
        out.push_str("</head>\n<body>\n<div id=\"sheet-content\">\n");
        out.push_str(body);
        out.push_str("</div>\n</body>\n</html>\n");
        out
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, table: &Table) -> String {
        if table.is_empty() {
            return self.render_empty();
        }

        let mut out = String::new();
        match &self.table_class {
            Some(class) => {
                let _ = writeln!(out, "<table class=\"{}\">", escape_html(class));
            }
            None => out.push_str("<table>\n"),
        }

        out.push_str("<tr>");
        for column in &table.columns {
            let _ = write!(out, "<th>{}</th>", escape_html(column));
        }
        out.push_str("</tr>\n");

        for row in &table.rows {
            out.push_str("<tr>");
            for idx in 0..table.column_count() {
                let cell = Table::cell(row, Some(idx)).to_string();
                let _ = write!(out, "<td>{}</td>", escape_html(&cell));
            }
            out.push_str("</tr>\n");
        }

        out.push_str("</table>\n");
        out
    }
}

fn escape_html(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '&' => s.push_str("&amp;"),
            '"' => s.push_str("&quot;"),
            _ => s.push(c),
        }
    }
    s
}
