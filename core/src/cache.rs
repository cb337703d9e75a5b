//! Single-slot cache for the observation table.
//!
//! The slot is keyed by the source's SourceKey. A lookup with the same
//! key returns the cached table untouched (apart from the derived
//! column the caller rewrites); a different key, or an explicit
//! invalidate(), forces a reload.

use crate::{
    error::SwingResult,
    generator::MarketTable,
    rng::StreamRng,
    source::{MarketDataSource, SourceKey},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub hits:          u64,
    pub misses:        u64,
    pub invalidations: u64,
}

#[derive(Clone, Default)]
pub struct TableCache {
    entry: Option<(SourceKey, MarketTable)>,
    stats: CacheStats,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `source`, loading it on a miss.
    /// `make_rng` is only called on a miss. A failed load leaves any
    /// previous entry in place.
    pub fn get_or_load<F>(
        &mut self,
        source: &dyn MarketDataSource,
        make_rng: F,
    ) -> SwingResult<&mut MarketTable>
    where
        F: FnOnce() -> StreamRng,
    {
        let key = source.key();
        match self.entry.take() {
            Some((cached_key, table)) if cached_key == key => {
                self.stats.hits += 1;
                Ok(&mut self.entry.insert((cached_key, table)).1)
            }
            previous => {
                let mut rng = make_rng();
                let table = match source.load(&mut rng) {
                    Ok(table) => table,
                    Err(e) => {
                        self.entry = previous;
                        return Err(e);
                    }
                };
                self.stats.misses += 1;
                log::debug!("table cache miss: loaded {} rows ({:?})", table.len(), key);
                Ok(&mut self.entry.insert((key, table)).1)
            }
        }
    }

    pub fn peek(&self) -> Option<&MarketTable> {
        self.entry.as_ref().map(|(_, table)| table)
    }

    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            self.stats.invalidations += 1;
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
