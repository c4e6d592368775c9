use crate::core::bucketizer::Bucketizer;
use crate::errors::{AppError, AppResult};
use crate::models::bucket::NegativePolicy;
use crate::models::metric::{ColumnPair, Metric};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod check;

pub const DEFAULT_DATE_COLUMNS: [&str; 6] = [
    "create_date",
    "submit_history_date",
    "first_sent_to_expert_date",
    "final_opinion_date",
    "close_date",
    "follow_up_date",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default = "default_date_columns")]
    pub date_columns: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub defaults: DefaultSelection,
    #[serde(default)]
    pub buckets: BucketConfig,
    #[serde(default)]
    pub bar_axis: BarAxis,
}

/// Column pairs used when the user has not chosen anything yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSelection {
    #[serde(default = "default_plusone")]
    pub plusone: ColumnPair,
    #[serde(default = "default_gustave")]
    pub gustave: ColumnPair,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketConfig {
    #[serde(default = "default_bucket_width")]
    pub width: i64,
    #[serde(default = "default_bucket_count")]
    pub count: i64,
    #[serde(default)]
    pub negative_policy: NegativePolicy,
}

/// Display range of the bar chart value axis. Only affects rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarAxis {
    #[serde(default)]
    pub min: i64,
    #[serde(default = "default_axis_max")]
    pub max: i64,
    #[serde(default = "default_axis_tick")]
    pub tick: i64,
}

fn default_name_column() -> String {
    "name".to_string()
}
fn default_date_columns() -> Vec<String> {
    DEFAULT_DATE_COLUMNS.iter().map(|c| c.to_string()).collect()
}
fn default_delimiter() -> String {
    ",".to_string()
}
fn default_plusone() -> ColumnPair {
    ColumnPair::new("submit_history_date", "first_sent_to_expert_date")
}
fn default_gustave() -> ColumnPair {
    ColumnPair::new("first_sent_to_expert_date", "final_opinion_date")
}
fn default_bucket_width() -> i64 {
    5
}
fn default_bucket_count() -> i64 {
    10
}
fn default_axis_max() -> i64 {
    50
}
fn default_axis_tick() -> i64 {
    5
}

impl Default for DefaultSelection {
    fn default() -> Self {
        Self {
            plusone: default_plusone(),
            gustave: default_gustave(),
        }
    }
}

impl DefaultSelection {
    pub fn pair(&self, metric: Metric) -> &ColumnPair {
        match metric {
            Metric::PlusOne => &self.plusone,
            Metric::Gustave => &self.gustave,
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            width: default_bucket_width(),
            count: default_bucket_count(),
            negative_policy: NegativePolicy::default(),
        }
    }
}

impl Default for BarAxis {
    fn default() -> Self {
        Self {
            min: 0,
            max: default_axis_max(),
            tick: default_axis_tick(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_column: default_name_column(),
            date_columns: default_date_columns(),
            delimiter: default_delimiter(),
            defaults: DefaultSelection::default(),
            buckets: BucketConfig::default(),
            bar_axis: BarAxis::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".caseboard")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("caseboard.conf")
    }

    /// Load configuration from `path` (or the standard location), falling back
    /// to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        let cfg = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if self.buckets.width <= 0 {
            return Err(AppError::Config("buckets.width must be positive".into()));
        }
        if self.buckets.count <= 0 {
            return Err(AppError::Config("buckets.count must be positive".into()));
        }
        Bucketizer::from_config(&self.buckets)?;

        if self.bar_axis.min >= self.bar_axis.max {
            return Err(AppError::Config(
                "bar_axis.min must be lower than bar_axis.max".into(),
            ));
        }
        if self.bar_axis.max.checked_sub(self.bar_axis.min).is_none() {
            return Err(AppError::Config("bar_axis range is too wide".into()));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// The configured delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> AppResult<u8> {
        parse_delimiter(&self.delimiter)
    }

    /// Write the default configuration to `path` (or the standard location).
    /// In test mode nothing is written and the target path is only reported.
    pub fn init_all(path: Option<&Path>, is_test: bool) -> AppResult<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !is_test {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let yaml = serde_yaml::to_string(&Config::default())
                .map_err(|_| AppError::ConfigSave)?;
            fs::write(&path, yaml).map_err(|_| AppError::ConfigSave)?;
        }

        Ok(path)
    }
}

/// Parse a delimiter given as a single character, or as `tab` / `\t`.
pub fn parse_delimiter(s: &str) -> AppResult<u8> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(AppError::Config(format!(
            "delimiter must be a single ASCII character, got {s:?}"
        ))),
    }
}
