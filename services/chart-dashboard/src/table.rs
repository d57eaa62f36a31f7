//!
//! src/table.rs  Andrew Belles  Oct 19th, 2026
//!
//! Rectangular table of named columns, the only thing handed to
//! whatever presents the dashboard
//!

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::category::ChartCategory;
use crate::project::ChartRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Text(String),
    Empty
}

impl Cell {
    fn display(&self) -> String {
        match self {
            Cell::Int(v)  => v.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Empty   => String::new(),
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartTable {
    pub title: String,
    pub category: ChartCategory,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>
}

fn row_cells(row: &ChartRow) -> Vec<Cell> {
    let position = Cell::Int(row.position() as i64);
    match row {
        ChartRow::Track(t) => vec![
            position,
            Cell::Text(t.title.clone()),
            Cell::Text(t.artist.clone()),
            Cell::Text(t.album.clone()),
            Cell::Int(t.duration_secs),
            t.preview.clone().map_or(Cell::Empty, Cell::Text),
        ],
        ChartRow::Titled(t) => vec![
            position, Cell::Text(t.title.clone()), Cell::Text(t.link.clone())
        ],
        ChartRow::Artist(a) => vec![
            position, Cell::Text(a.name.clone()), Cell::Text(a.link.clone())
        ],
    }
}

impl ChartTable {
    pub fn build(category: ChartCategory, rows: &[ChartRow]) -> Self {
        Self {
            title: format!("Top {}", category.label()),
            category,
            columns: category.columns(),
            rows: rows.iter().map(row_cells).collect()
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    /// All cells of one column, top to bottom
    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[i]).collect())
    }

    /// Rows as JSON objects keyed by column name, in column order
    pub fn to_records(&self) -> Value {
        let records = self.rows.iter()
            .map(|row| {
                let mut object = Map::new();
                for (name, cell) in self.columns.iter().zip(row) {
                    let value = match cell {
                        Cell::Int(v)  => Value::from(*v),
                        Cell::Text(s) => Value::from(s.as_str()),
                        Cell::Empty   => Value::Null,
                    };
                    object.insert((*name).to_string(), value);
                }
                Value::Object(object)
            })
            .collect();
        Value::Array(records)
    }

    /// Aligned plain text: a title line, a header, a rule and one line per
    /// row. Numbers are right aligned.
    pub fn render_text(&self) -> String {
        let cells: Vec<Vec<String>> = self.rows.iter()
            .map(|r| r.iter().map(Cell::display).collect())
            .collect();
        let widths: Vec<usize> = self.columns.iter()
            .enumerate()
            .map(|(i, name)| {
                cells.iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);

        let header: Vec<String> = self.columns.iter()
            .zip(&widths)
            .map(|(name, w)| pad(name, *w, false))
            .collect();
        let _ = writeln!(out, "{}", header.join("  ").trim_end());

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("  "));

        for (row, text) in self.rows.iter().zip(&cells) {
            let line: Vec<String> = row.iter()
                .zip(text)
                .zip(&widths)
                .map(|((cell, s), w)| pad(s, *w, cell.is_numeric()))
                .collect();
            let _ = writeln!(out, "{}", line.join("  ").trim_end());
        }
        out
    }
}

/// Pads by characters, not bytes, so accented headers line up
fn pad(s: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(s.chars().count()));
    if right { format!("{fill}{s}") } else { format!("{s}{fill}") }
}
