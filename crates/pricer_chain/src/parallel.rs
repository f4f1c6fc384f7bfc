//! Rayon-based row parallelisation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Chains at or above this many rows are priced in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Configuration for parallel row pricing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Master switch; `false` always prices sequentially.
    pub enabled: bool,
    /// Minimum rows before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Sequential configuration.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Returns whether to use parallel processing for the given row count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        self.enabled && n_items >= self.parallel_threshold
    }

    /// Maps every item, in parallel when the slice is large enough.
    ///
    /// Output order always matches input order.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            items.par_iter().map(mapper).collect()
        } else {
            items.iter().map(mapper).collect()
        }
    }
}
