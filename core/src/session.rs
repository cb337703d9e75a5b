//! One dashboard session — the façade a UI drives.
//!
//! RULES:
//!   - A session owns its table, parameters, cache and RNG streams.
//!     Nothing is shared between sessions.
//!   - Every parameter change recomputes Simulated_Price in full before
//!     a view can be built. There is no partial update.
//!   - The market table is only redrawn on a cache miss: a new source
//!     key or an explicit regenerate().

use crate::{
    cache::{CacheStats, TableCache},
    command::ControlCommand,
    config::{DashboardConfig, SimulationParams},
    error::{SwingError, SwingResult},
    generator::MarketTable,
    pattern::SwingPattern,
    rng::{RngBank, StreamRng, StreamSlot},
    simulator,
    source::{MarketDataSource, SyntheticSource},
    types::SessionId,
    view::DashboardView,
};

pub struct DashboardSession {
    pub session_id: SessionId,
    rng_bank:       RngBank,
    source:         Box<dyn MarketDataSource>,
    cache:          TableCache,
    params:         SimulationParams,
    sim_rng:        StreamRng,
    /// Bumped by regenerate() so a redraw is not a replay.
    generation:     u64,
    swing:          Vec<f64>,
    recomputes:     u64,
}

impl DashboardSession {
    /// Build a session and run the first recomputation.
    /// `seed = None` draws the master seed from system entropy.
    pub fn new(
        source: Box<dyn MarketDataSource>,
        params: SimulationParams,
        seed: Option<u64>,
    ) -> SwingResult<Self> {
        params.validate()?;
        let rng_bank = RngBank::from_seed_or_entropy(seed);
        let sim_rng = rng_bank.for_stream(StreamSlot::Simulator);
        let mut session = Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            rng_bank,
            source,
            cache: TableCache::new(),
            params,
            sim_rng,
            generation: 0,
            swing: Vec::new(),
            recomputes: 0,
        };
        session.recompute()?;
        log::info!(
            "session {} started: seed={} rows={} pattern={}",
            session.session_id,
            session.seed(),
            session.swing.len(),
            session.params.pattern
        );
        Ok(session)
    }

    /// Synthetic-data session from a loaded config file.
    pub fn from_config(config: &DashboardConfig) -> SwingResult<Self> {
        Self::new(
            Box::new(SyntheticSource::new(config.generator.clone())),
            config.params,
            config.seed,
        )
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn table(&self) -> Option<&MarketTable> {
        self.cache.peek()
    }

    /// Swing series behind the current Simulated_Price column.
    pub fn swing(&self) -> &[f64] {
        &self.swing
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Replace all four parameters. Invalid input leaves the session
    /// exactly as it was.
    pub fn set_params(&mut self, params: SimulationParams) -> SwingResult<()> {
        params.validate()?;
        let previous = std::mem::replace(&mut self.params, params);
        if let Err(e) = self.recompute() {
            self.params = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn apply_command(&mut self, command: ControlCommand) -> SwingResult<()> {
        log::debug!("session {}: {}", self.session_id, command.name());
        let current = self.params;
        match command {
            ControlCommand::SetPattern { pattern } => {
                let pattern = SwingPattern::parse(&pattern)?;
                self.set_params(SimulationParams { pattern, ..current })
            }
            ControlCommand::SetAmplitude { value } => {
                self.set_params(SimulationParams { amplitude: value, ..current })
            }
            ControlCommand::SetFrequency { value } => {
                self.set_params(SimulationParams { frequency: value, ..current })
            }
            ControlCommand::SetDrift { value } => {
                self.set_params(SimulationParams { drift: value, ..current })
            }
            ControlCommand::SetParams { params } => self.set_params(params),
            ControlCommand::Regenerate => self.regenerate(),
        }
    }

    /// Drop the cached table and draw a new one, then recompute.
    pub fn regenerate(&mut self) -> SwingResult<()> {
        let cached = self.cache.clone();
        self.cache.invalidate();
        self.generation += 1;
        if let Err(e) = self.recompute() {
            self.cache = cached;
            self.generation -= 1;
            return Err(e);
        }
        Ok(())
    }

    /// Swap the data source. The table is reloaded only if the new
    /// source's key differs from the cached one.
    pub fn replace_source(&mut self, source: Box<dyn MarketDataSource>) -> SwingResult<()> {
        let previous = std::mem::replace(&mut self.source, source);
        // A load can succeed and the simulation still fail on its table,
        // so the cache slot is restored along with the source.
        let cached = self.cache.clone();
        if let Err(e) = self.recompute() {
            self.source = previous;
            self.cache = cached;
            return Err(e);
        }
        Ok(())
    }

    /// Fetch (or reuse) the table and rewrite its derived column.
    pub fn recompute(&mut self) -> SwingResult<()> {
        let bank = &self.rng_bank;
        let generation = self.generation;
        let table = self.cache.get_or_load(self.source.as_ref(), || {
            bank.for_stream_at(StreamSlot::Generator, generation)
        })?;
        self.swing = simulator::apply(table, &self.params, &mut self.sim_rng)?;
        self.recomputes += 1;
        Ok(())
    }

    pub fn view(&self) -> SwingResult<DashboardView> {
        let table = self.cache.peek().ok_or(SwingError::EmptyTable)?;
        DashboardView::build(&self.session_id, self.seed(), &self.params, table)
    }
}
