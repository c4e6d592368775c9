//! Column selection: which start/end columns feed each metric.

use crate::config::DefaultSelection;
use crate::core::coerce::count_dates;
use crate::errors::{AppError, AppResult};
use crate::models::metric::{ColumnPair, Metric};
use crate::models::table::CaseTable;
use serde::Serialize;
use tracing::warn;

/// Fully resolved selection: four existing column names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnSelection {
    pub plusone: ColumnPair,
    pub gustave: ColumnPair,
}

impl ColumnSelection {
    pub fn pair(&self, metric: Metric) -> &ColumnPair {
        match metric {
            Metric::PlusOne => &self.plusone,
            Metric::Gustave => &self.gustave,
        }
    }
}

/// Start/end chosen by the user for one metric; `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairChoice {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// What the user picked so far in the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOverrides {
    pub plusone: PairChoice,
    pub gustave: PairChoice,
}

impl SelectionOverrides {
    pub fn choice(&self, metric: Metric) -> &PairChoice {
        match metric {
            Metric::PlusOne => &self.plusone,
            Metric::Gustave => &self.gustave,
        }
    }

    pub fn set(&mut self, metric: Metric, start: Option<String>, end: Option<String>) {
        let choice = match metric {
            Metric::PlusOne => &mut self.plusone,
            Metric::Gustave => &mut self.gustave,
        };
        if start.is_some() {
            choice.start = start;
        }
        if end.is_some() {
            choice.end = end;
        }
    }

    pub fn set_pair(&mut self, metric: Metric, choice: PairChoice) {
        match metric {
            Metric::PlusOne => self.plusone = choice,
            Metric::Gustave => self.gustave = choice,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Resolve the selection against a loaded table.
///
/// Explicit user choices must name an existing column. A configured default
/// that the table lacks falls back to [`fallback_column`] instead of failing.
pub fn resolve(
    table: &CaseTable,
    defaults: &DefaultSelection,
    overrides: &SelectionOverrides,
) -> AppResult<ColumnSelection> {
    let resolve_pair = |metric: Metric| -> AppResult<ColumnPair> {
        let default = defaults.pair(metric);
        let choice = overrides.choice(metric);
        Ok(ColumnPair {
            start: pick(table, choice.start.as_deref(), &default.start)?,
            end: pick(table, choice.end.as_deref(), &default.end)?,
        })
    };

    Ok(ColumnSelection {
        plusone: resolve_pair(Metric::PlusOne)?,
        gustave: resolve_pair(Metric::Gustave)?,
    })
}

fn pick(table: &CaseTable, chosen: Option<&str>, default: &str) -> AppResult<String> {
    if let Some(name) = chosen {
        return if table.has_column(name) {
            Ok(name.to_string())
        } else {
            Err(AppError::UnknownColumn(name.to_string()))
        };
    }

    if table.has_column(default) {
        return Ok(default.to_string());
    }

    let fallback =
        fallback_column(table).ok_or_else(|| AppError::UnknownColumn(default.to_string()))?;
    warn!(default = %default, fallback = %fallback, "default column absent, using fallback");
    Ok(fallback)
}

/// First date-typed column, else the first column holding at least one
/// coercible date, else the first column.
pub fn fallback_column(table: &CaseTable) -> Option<String> {
    if let Some(name) = table.date_columns().first() {
        return Some(name.to_string());
    }

    let columns = table.columns();
    (0..columns.len())
        .find(|&col| count_dates(table, col) > 0)
        .or(if columns.is_empty() { None } else { Some(0) })
        .map(|col| columns[col].clone())
}
