use chrono::{NaiveDateTime, Timelike};

/// A single value of the case table.
///
/// Raw cells hold the untouched text from the file. Date-typed columns only
/// ever contain `Date` or `Missing`: a value that failed coercion is turned
/// into `Missing`, never kept as an unparsed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Raw(String),
    Date(NaiveDateTime),
    Missing,
}

impl Cell {
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text shown in listings (empty for missing values).
    pub fn display(&self) -> String {
        match self {
            Cell::Raw(s) => s.clone(),
            Cell::Date(d) if d.time().num_seconds_from_midnight() == 0 => {
                d.format("%Y-%m-%d").to_string()
            }
            Cell::Date(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            Cell::Missing => String::new(),
        }
    }
}

/// In-memory case table: ordered, uniquely named columns and one row per case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTable {
    columns: Vec<String>,
    date_typed: Vec<bool>,
    rows: Vec<Vec<Cell>>,
}

impl CaseTable {
    /// Build a table from a header and rows that already have one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let date_typed = vec![false; columns.len()];
        Self {
            columns,
            date_typed,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }

    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |r| &r[col])
    }

    pub fn is_date_column(&self, col: usize) -> bool {
        self.date_typed.get(col).copied().unwrap_or(false)
    }

    /// Names of the date-typed columns, in header order.
    pub fn date_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .zip(&self.date_typed)
            .filter(|(_, typed)| **typed)
            .map(|(c, _)| c.as_str())
            .collect()
    }

    /// Replace a whole column with date-typed cells.
    pub(crate) fn set_date_column(&mut self, col: usize, cells: Vec<Cell>) {
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row[col] = cell;
        }
        self.date_typed[col] = true;
    }
}
