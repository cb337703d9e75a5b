//! Market data sources behind the generator contract.
//!
//! The simulator only ever sees a MarketTable. Where it came from,
//! synthetic draws or a local CSV export, is decided here, and this is
//! the only place the core may touch the filesystem.

use crate::{
    config::GeneratorConfig,
    error::SwingResult,
    generator::{self, MarketTable, RawObservation},
    rng::StreamRng,
};
use std::{io::Read, path::PathBuf};

/// Identity of a source's inputs. Two sources with equal keys
/// produce interchangeable tables, so the cache keys on this.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceKey {
    Synthetic(GeneratorConfig),
    CsvFile(PathBuf),
}

pub trait MarketDataSource {
    fn key(&self) -> SourceKey;

    /// Produce a fresh table. Sources that need randomness draw from
    /// `rng`; file sources ignore it.
    fn load(&self, rng: &mut StreamRng) -> SwingResult<MarketTable>;
}

pub struct SyntheticSource {
    config: GeneratorConfig,
}

impl SyntheticSource {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl MarketDataSource for SyntheticSource {
    fn key(&self) -> SourceKey {
        SourceKey::Synthetic(self.config.clone())
    }

    fn load(&self, rng: &mut StreamRng) -> SwingResult<MarketTable> {
        generator::generate(&self.config, rng)
    }
}

/// Reads `Timestamp,Close,High,Low,Volume` rows. Empty cells are
/// filled forward.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MarketDataSource for CsvSource {
    fn key(&self) -> SourceKey {
        SourceKey::CsvFile(self.path.clone())
    }

    fn load(&self, _rng: &mut StreamRng) -> SwingResult<MarketTable> {
        let file = std::fs::File::open(&self.path)?;
        let table = parse_csv(file)?;
        log::info!("loaded {} rows from {}", table.len(), self.path.display());
        Ok(table)
    }
}

pub fn parse_csv<R: Read>(reader: R) -> SwingResult<MarketTable> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let raw = reader
        .deserialize::<RawObservation>()
        .collect::<Result<Vec<_>, _>>()?;
    generator::forward_fill(raw)
}
