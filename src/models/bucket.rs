use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Label assigned to a duration for the distribution (pie) charts.
///
/// Ordering follows the chart order: the negative bucket first, then the
/// fixed-width ranges ascending, then the open overflow range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Negative,
    Range { lo: i64, hi: i64 },
    Overflow { from: i64 },
}

impl Bucket {
    pub fn label(&self) -> String {
        match self {
            Bucket::Negative => "<0 days".to_string(),
            Bucket::Range { lo, hi } => format!("{lo}-{hi} days"),
            Bucket::Overflow { from } => format!("{from}+ days"),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// What to do with durations below zero (end date before start date).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NegativePolicy {
    /// Count them in a dedicated "<0 days" bucket
    #[default]
    Bucket,
    /// Leave them out of the distribution, like missing values
    Missing,
}
