use serde::{Deserialize, Serialize};

/// The two duration metrics shown on the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    PlusOne,
    Gustave,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::PlusOne, Metric::Gustave];

    pub fn m_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plusone" | "plus_one" | "p" => Some(Self::PlusOne),
            "gustave" | "g" => Some(Self::Gustave),
            _ => None,
        }
    }

    pub fn m_as_str(&self) -> &'static str {
        match self {
            Metric::PlusOne => "plusone",
            Metric::Gustave => "gustave",
        }
    }

    /// Human readable name used in chart titles and table headers
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::PlusOne => "PlusOne Time",
            Metric::Gustave => "Gustave Time",
        }
    }

    /// Name of the derived duration column
    pub fn time_column(&self) -> &'static str {
        match self {
            Metric::PlusOne => "plusone_time",
            Metric::Gustave => "gustave_time",
        }
    }
}

/// Start/end column names for one metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnPair {
    pub start: String,
    pub end: String,
}

impl ColumnPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Same column on both sides: every non-missing row yields zero.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}
