//! Chart data handed to the presentation layer: grouped bar series, one pie
//! per metric and the scatter of both metrics.

use crate::config::BarAxis;
use crate::core::bucketizer::Bucketizer;
use crate::models::bucket::Bucket;
use crate::models::derived::DerivedRow;
use crate::models::metric::Metric;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BarPoint {
    pub name: String,
    pub plusone_time: Option<i64>,
    pub gustave_time: Option<i64>,
}

/// Value-axis hint for the bar chart. Display only: stored values are never
/// clamped to it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AxisHint {
    pub min: i64,
    pub max: i64,
    pub tick: i64,
}

impl AxisHint {
    pub fn clamp(&self, v: i64) -> i64 {
        v.max(self.min).min(self.max)
    }

    /// Length of the axis, zero when `max <= min`.
    pub fn span(&self) -> i64 {
        self.max.saturating_sub(self.min).max(0)
    }
}

impl From<&BarAxis> for AxisHint {
    fn from(a: &BarAxis) -> Self {
        Self {
            min: a.min,
            max: a.max,
            tick: a.tick,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BarSeries {
    pub axis: AxisHint,
    pub points: Vec<BarPoint>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PieSlice {
    pub label: Bucket,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PieChart {
    pub metric: Metric,
    pub title: String,
    pub slices: Vec<PieSlice>,
    /// Rows counted in the slices.
    pub total: usize,
    /// Rows without a bucket (missing duration, or negative under the
    /// `missing` policy).
    pub excluded: usize,
}

impl PieChart {
    pub fn count(&self, label: &Bucket) -> usize {
        self.slices
            .iter()
            .find(|s| &s.label == label)
            .map(|s| s.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScatterPoint {
    pub name: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScatterSeries {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    pub excluded: usize,
}

pub fn bar_series(rows: &[DerivedRow], axis: AxisHint) -> BarSeries {
    BarSeries {
        axis,
        points: rows
            .iter()
            .map(|r| BarPoint {
                name: r.name.clone(),
                plusone_time: r.plusone_time,
                gustave_time: r.gustave_time,
            })
            .collect(),
    }
}

/// Count rows per bucket. Every label of the partition gets a slice, in
/// chart order, even when its count is zero.
pub fn pie(rows: &[DerivedRow], metric: Metric, bucketizer: &Bucketizer) -> PieChart {
    let mut counts: BTreeMap<Bucket, usize> = BTreeMap::new();
    let mut excluded = 0;

    for row in rows {
        match row.bucket(metric) {
            Some(b) => *counts.entry(b).or_default() += 1,
            None => excluded += 1,
        }
    }

    let slices: Vec<PieSlice> = bucketizer
        .labels()
        .into_iter()
        .map(|label| PieSlice {
            count: counts.get(&label).copied().unwrap_or(0),
            label,
        })
        .collect();

    PieChart {
        metric,
        title: format!("Number of Cases per {} Range", metric.display_name()),
        total: slices.iter().map(|s| s.count).sum(),
        slices,
        excluded,
    }
}

/// One point per row where both durations are present.
pub fn scatter(rows: &[DerivedRow]) -> ScatterSeries {
    let points: Vec<ScatterPoint> = rows
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                name: r.name.clone(),
                x: r.plusone_time?,
                y: r.gustave_time?,
            })
        })
        .collect();

    ScatterSeries {
        x_label: Metric::PlusOne.time_column().to_string(),
        y_label: Metric::Gustave.time_column().to_string(),
        excluded: rows.len() - points.len(),
        points,
    }
}
