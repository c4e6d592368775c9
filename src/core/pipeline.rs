//! One full recomputation pass: derive → bucket → aggregate.

use crate::config::Config;
use crate::core::aggregate::{self, AxisHint, BarSeries, PieChart, ScatterSeries};
use crate::core::bucketizer::Bucketizer;
use crate::core::deriver;
use crate::core::selection::ColumnSelection;
use crate::errors::AppResult;
use crate::models::bucket::NegativePolicy;
use crate::models::derived::DerivedRow;
use crate::models::metric::Metric;
use crate::models::table::{CaseTable, Cell};
use serde::Serialize;

/// Everything the presentation layer needs for the four charts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Analysis {
    pub selection: ColumnSelection,
    pub negative_policy: NegativePolicy,
    pub rows: Vec<DerivedRow>,
    pub bar: BarSeries,
    pub pies: Vec<PieChart>,
    pub scatter: ScatterSeries,
}

impl Analysis {
    pub fn pie(&self, metric: Metric) -> Option<&PieChart> {
        self.pies.iter().find(|p| p.metric == metric)
    }
}

pub fn analyze(
    table: &CaseTable,
    selection: &ColumnSelection,
    cfg: &Config,
    bucketizer: &Bucketizer,
) -> AppResult<Analysis> {
    let durations = deriver::derive(table, selection)?;
    let names = case_names(table, &cfg.name_column);

    let rows: Vec<DerivedRow> = names
        .into_iter()
        .zip(durations.plusone.iter().zip(&durations.gustave))
        .map(|(name, (&p, &g))| DerivedRow {
            name,
            plusone_time: p,
            gustave_time: g,
            plusone_bucket: bucketizer.bucket(p),
            gustave_bucket: bucketizer.bucket(g),
        })
        .collect();

    let pies = Metric::ALL
        .iter()
        .map(|&m| aggregate::pie(&rows, m, bucketizer))
        .collect();

    Ok(Analysis {
        selection: selection.clone(),
        negative_policy: bucketizer.negative_policy(),
        bar: aggregate::bar_series(&rows, AxisHint::from(&cfg.bar_axis)),
        scatter: aggregate::scatter(&rows),
        pies,
        rows,
    })
}

/// Case identifiers; rows without one (or tables without the column) are
/// labelled by their 1-based row number.
fn case_names(table: &CaseTable, name_column: &str) -> Vec<String> {
    let col = table.column_index(name_column);

    (0..table.len())
        .map(|row| match col.map(|c| table.cell(row, c)) {
            Some(Cell::Missing) | None => format!("#{}", row + 1),
            Some(cell) => cell.display(),
        })
        .collect()
}
