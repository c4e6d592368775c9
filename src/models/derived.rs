use crate::models::bucket::Bucket;
use crate::models::metric::Metric;
use serde::Serialize;

/// One case with its derived durations and buckets.
/// Missing values serialize as `null`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DerivedRow {
    pub name: String,
    pub plusone_time: Option<i64>,
    pub gustave_time: Option<i64>,
    pub plusone_bucket: Option<Bucket>,
    pub gustave_bucket: Option<Bucket>,
}

impl DerivedRow {
    pub fn bucket(&self, metric: Metric) -> Option<Bucket> {
        match metric {
            Metric::PlusOne => self.plusone_bucket,
            Metric::Gustave => self.gustave_bucket,
        }
    }
}
