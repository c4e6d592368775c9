//! Permissive date coercion.
//!
//! Every value either becomes a date or the missing marker; parsing never
//! fails the caller. Coercing an already coerced value returns it unchanged.

use crate::models::table::{CaseTable, Cell};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Tokens treated as an explicit empty value.
const MISSING_TOKENS: [&str; 6] = ["", "nat", "nan", "null", "none", "n/a"];

/// Date-time layouts with a UTC offset. The offset is dropped, the wall-clock
/// value is kept as written.
const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// `2024/01/06`, `2024.01.06` (with optional time part) normalised to dashes.
static YEAR_FIRST_SEP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[/.](\d{1,2})[/.](\d{1,2})(.*)$").expect("valid regex")
});

/// `20240106`
static COMPACT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})$").expect("valid regex"));

/// Parse a single raw value into a date-time, or `None` when it is empty or
/// not recognised.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if MISSING_TOKENS.contains(&s.to_ascii_lowercase().as_str()) {
        return None;
    }

    if let Some(c) = COMPACT_DATE.captures(s) {
        let y = c[1].parse().ok()?;
        let m = c[2].parse().ok()?;
        let d = c[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0);
    }

    let normalised;
    let s = match YEAR_FIRST_SEP.captures(s) {
        Some(c) => {
            normalised = format!("{}-{}-{}{}", &c[1], &c[2], &c[3], &c[4]);
            normalised.as_str()
        }
        None => s,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Coerce one cell. Dates and missing values pass through untouched.
pub fn coerce_cell(cell: &Cell) -> Cell {
    match cell {
        Cell::Date(d) => Cell::Date(*d),
        Cell::Missing => Cell::Missing,
        Cell::Raw(s) => parse_date(s).map(Cell::Date).unwrap_or(Cell::Missing),
    }
}

/// Coerce a column of the table in place and mark it date-typed.
/// Returns `false` when the column does not exist.
pub fn coerce_column(table: &mut CaseTable, name: &str) -> bool {
    let Some(col) = table.column_index(name) else {
        return false;
    };
    if table.is_date_column(col) {
        return true;
    }

    let cells: Vec<Cell> = table.column_cells(col).map(coerce_cell).collect();
    table.set_date_column(col, cells);
    true
}

/// Coerced view of a column, leaving the table untouched.
pub fn coerced_dates(table: &CaseTable, name: &str) -> Option<Vec<Option<NaiveDateTime>>> {
    let col = table.column_index(name)?;
    Some(
        table
            .column_cells(col)
            .map(|c| coerce_cell(c).as_date())
            .collect(),
    )
}

/// Number of values in a column that coerce to a date.
pub fn count_dates(table: &CaseTable, col: usize) -> usize {
    table
        .column_cells(col)
        .filter(|c| coerce_cell(c).as_date().is_some())
        .count()
}
