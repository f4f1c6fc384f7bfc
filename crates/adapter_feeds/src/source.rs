//! Chain sources: where option-chain snapshots come from.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{FeedError, OptionChainSnapshot};

/// Provider of option-chain snapshots by underlying symbol.
///
/// Symbols are matched case-insensitively; implementations upper-case them
/// before lookup.
pub trait ChainSource: Send + Sync {
    /// Returns the current snapshot for `symbol`.
    ///
    /// # Errors
    ///
    /// Implementation specific; see [`FeedError`].
    fn fetch(&self, symbol: &str) -> Result<OptionChainSnapshot, FeedError>;
}

/// Reads snapshots saved as JSON files.
///
/// Pointed at a directory, `fetch("nifty")` reads `<dir>/NIFTY.json`.
/// Pointed at a single file, every symbol resolves to that file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source rooted at a file or directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Configured file or directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve(&self, symbol: &str) -> PathBuf {
        if self.path.is_dir() {
            self.path.join(format!("{symbol}.json"))
        } else {
            self.path.clone()
        }
    }
}

impl ChainSource for JsonFileSource {
    #[instrument(skip(self), fields(root = %self.path.display()))]
    fn fetch(&self, symbol: &str) -> Result<OptionChainSnapshot, FeedError> {
        let symbol = symbol.to_uppercase();
        let file = self.resolve(&symbol);

        if self.path.is_dir() && !file.is_file() {
            return Err(FeedError::SymbolNotFound { symbol });
        }

        let bytes = fs::read(&file).map_err(|source| FeedError::Io {
            path: file.clone(),
            source,
        })?;
        let snapshot = OptionChainSnapshot::from_json_slice(&bytes, &file.display().to_string())?;

        debug!(
            file = %file.display(),
            records = snapshot.records.data.len(),
            expiries = snapshot.records.expiry_dates.len(),
            "Loaded option chain snapshot"
        );
        Ok(snapshot)
    }
}

/// In-memory snapshots keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshots: HashMap<String, OptionChainSnapshot>,
}

impl StaticSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the snapshot served for `symbol`.
    pub fn with_snapshot(mut self, symbol: &str, snapshot: OptionChainSnapshot) -> Self {
        self.insert(symbol, snapshot);
        self
    }

    /// Adds (or replaces) the snapshot served for `symbol`.
    pub fn insert(&mut self, symbol: &str, snapshot: OptionChainSnapshot) {
        self.snapshots.insert(symbol.to_uppercase(), snapshot);
    }
}

impl ChainSource for StaticSource {
    fn fetch(&self, symbol: &str) -> Result<OptionChainSnapshot, FeedError> {
        let symbol = symbol.to_uppercase();
        self.snapshots
            .get(&symbol)
            .cloned()
            .ok_or(FeedError::SymbolNotFound { symbol })
    }
}
