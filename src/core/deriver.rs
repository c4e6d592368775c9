//! Metric deriver: whole-day differences between two date columns.

use crate::core::coerce::coerced_dates;
use crate::core::selection::ColumnSelection;
use crate::errors::{AppError, AppResult};
use crate::models::metric::{ColumnPair, Metric};
use crate::models::table::CaseTable;
use chrono::NaiveDateTime;
use tracing::debug;

/// Per-row durations for both metrics, in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Durations {
    pub plusone: Vec<Option<i64>>,
    pub gustave: Vec<Option<i64>>,
}

/// `end - start` in calendar days.
///
/// Both values are truncated to midnight first, so a time of day never shifts
/// the count. Missing on either side gives missing; negatives are kept.
pub fn day_difference(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<i64> {
    Some((end?.date() - start?.date()).num_days())
}

/// Derive both metrics for every row of `table`.
///
/// The selected columns are coerced on the fly, the table itself is not
/// modified, so re-deriving from a cached table is always safe.
pub fn derive(table: &CaseTable, selection: &ColumnSelection) -> AppResult<Durations> {
    Ok(Durations {
        plusone: derive_metric(table, Metric::PlusOne, &selection.plusone)?,
        gustave: derive_metric(table, Metric::Gustave, &selection.gustave)?,
    })
}

fn derive_metric(table: &CaseTable, metric: Metric, pair: &ColumnPair) -> AppResult<Vec<Option<i64>>> {
    let starts = coerced_dates(table, &pair.start)
        .ok_or_else(|| AppError::UnknownColumn(pair.start.clone()))?;
    let ends = coerced_dates(table, &pair.end)
        .ok_or_else(|| AppError::UnknownColumn(pair.end.clone()))?;

    let values: Vec<Option<i64>> = starts
        .into_iter()
        .zip(ends)
        .map(|(s, e)| day_difference(s, e))
        .collect();

    debug!(
        metric = metric.m_as_str(),
        start = %pair.start,
        end = %pair.end,
        degenerate = pair.is_degenerate(),
        missing = values.iter().filter(|v| v.is_none()).count(),
        negative = values.iter().flatten().filter(|v| **v < 0).count(),
        "metric derived"
    );

    Ok(values)
}
