//! Interactive session state: the loaded table and the user's selection.
//!
//! Each session owns its own cache and selection; nothing is shared between
//! sessions. Every call that changes state is followed by a full pipeline
//! run when the caller asks for [`Session::analysis`].

use crate::config::Config;
use crate::core::bucketizer::Bucketizer;
use crate::core::cache::LoadCache;
use crate::core::loader::LoadOptions;
use crate::core::pipeline::{self, Analysis};
use crate::core::selection::{self, ColumnSelection, SelectionOverrides};
use crate::errors::{AppError, AppResult};
use crate::models::bucket::NegativePolicy;
use crate::models::metric::Metric;
use crate::models::table::CaseTable;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Session {
    config: Config,
    load_options: LoadOptions,
    bucketizer: Bucketizer,
    cache: LoadCache,
    source: Option<String>,
    overrides: SelectionOverrides,
}

impl Session {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let load_options = LoadOptions::new(config.delimiter_byte()?, config.date_columns.clone());
        let bucketizer = Bucketizer::from_config(&config.buckets)?;

        Ok(Self {
            config,
            load_options,
            bucketizer,
            cache: LoadCache::new(),
            source: None,
            overrides: SelectionOverrides::default(),
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.load_options.delimiter = delimiter;
        self
    }

    pub fn with_negative_policy(mut self, policy: NegativePolicy) -> Self {
        self.bucketizer = self.bucketizer.with_negative_policy(policy);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &LoadCache {
        &self.cache
    }

    /// Label of the currently loaded dataset (usually its path).
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Load a dataset from memory. Identical content is served from the cache.
    pub fn load_bytes(&mut self, label: &str, bytes: &[u8]) -> AppResult<&CaseTable> {
        let table = self.cache.get_or_load(bytes, &self.load_options)?;

        // drop choices the new table cannot satisfy
        for metric in Metric::ALL {
            let choice = self.overrides.choice(metric).clone();
            let stale = |c: &Option<String>| c.as_deref().is_some_and(|n| !table.has_column(n));
            if stale(&choice.start) || stale(&choice.end) {
                warn!(metric = metric.m_as_str(), "selection reset: column missing from new dataset");
                self.overrides.set_pair(metric, Default::default());
            }
        }

        info!(source = %label, rows = table.len(), "dataset ready");
        self.source = Some(label.to_string());
        Ok(table)
    }

    pub fn load_path(&mut self, path: &Path) -> AppResult<&CaseTable> {
        let bytes = fs::read(path)?;
        self.load_bytes(&path.display().to_string(), &bytes)
    }

    pub fn table(&self) -> AppResult<&CaseTable> {
        self.cache.current().ok_or(AppError::NoDataset)
    }

    /// Change the columns of one metric. `None` keeps the current choice.
    /// The change is applied only if it resolves against the loaded table.
    pub fn select(
        &mut self,
        metric: Metric,
        start: Option<String>,
        end: Option<String>,
    ) -> AppResult<ColumnSelection> {
        let mut candidate = self.overrides.clone();
        candidate.set(metric, start, end);

        let resolved = selection::resolve(self.table()?, &self.config.defaults, &candidate)?;
        self.overrides = candidate;
        Ok(resolved)
    }

    pub fn reset_selection(&mut self) {
        self.overrides.clear();
    }

    pub fn selection(&self) -> AppResult<ColumnSelection> {
        selection::resolve(self.table()?, &self.config.defaults, &self.overrides)
    }

    /// Run the whole pipeline on the current table and selection.
    pub fn analysis(&self) -> AppResult<Analysis> {
        let table = self.table()?;
        let selection = self.selection()?;
        pipeline::analyze(table, &selection, &self.config, &self.bucketizer)
    }
}
