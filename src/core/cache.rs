//! Single-entry, content-addressed cache in front of the loader.
//!
//! The key is derived from the file bytes and the load options, so re-running
//! the pipeline on the same upload never re-parses it. A different upload
//! replaces the entry wholesale.

use crate::core::loader::{LoadOptions, load_bytes};
use crate::errors::LoadError;
use crate::models::table::CaseTable;
use tracing::debug;
use xxhash_rust::xxh3::{Xxh3, xxh3_64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentKey {
    content: u64,
    len: usize,
    options: u64,
}

impl ContentKey {
    pub fn of(bytes: &[u8], opts: &LoadOptions) -> Self {
        let mut hasher = Xxh3::new();
        hasher.update(&[opts.delimiter]);
        for col in &opts.date_columns {
            hasher.update(col.as_bytes());
            hasher.update(&[0]);
        }

        Self {
            content: xxh3_64(bytes),
            len: bytes.len(),
            options: hasher.digest(),
        }
    }

    /// Short hex form for log lines.
    pub fn short(&self) -> String {
        format!("{:016x}", self.content)
    }
}

#[derive(Debug)]
struct CachedTable {
    key: ContentKey,
    table: CaseTable,
}

#[derive(Debug, Default)]
pub struct LoadCache {
    entry: Option<CachedTable>,
    hits: u64,
    misses: u64,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `bytes`, parsing only when the content differs from
    /// the cached entry. A failed load leaves the previous entry in place.
    pub fn get_or_load(&mut self, bytes: &[u8], opts: &LoadOptions) -> Result<&CaseTable, LoadError> {
        let key = ContentKey::of(bytes, opts);

        let entry = match self.entry.take() {
            Some(cached) if cached.key == key => {
                self.hits += 1;
                debug!(key = %key.short(), "load cache hit");
                cached
            }
            previous => match load_bytes(bytes, opts) {
                Ok(table) => {
                    self.misses += 1;
                    debug!(key = %key.short(), "load cache miss, entry replaced");
                    CachedTable { key, table }
                }
                Err(e) => {
                    self.entry = previous;
                    return Err(e);
                }
            },
        };

        Ok(&self.entry.insert(entry).table)
    }

    pub fn current(&self) -> Option<&CaseTable> {
        self.entry.as_ref().map(|e| &e.table)
    }

    pub fn key(&self) -> Option<ContentKey> {
        self.entry.as_ref().map(|e| e.key)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
