//! Deterministic random number generation.
//!
//! RULE: Nothing in the dashboard core may call a platform RNG directly.
//! All randomness flows through StreamRng instances derived from the
//! single master seed held by the session's RngBank. When no seed is
//! supplied the master seed itself is drawn from system entropy, once.
//!
//! Each component gets its own stream, seeded from
//! (master_seed XOR mixed(stream_index, epoch)). This means:
//!   - Regenerating the market table never perturbs the simulator stream.
//!   - Each stream is fully reproducible in isolation.

use crate::error::{SwingError, SwingResult};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single component.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream from the master seed, a stable stream index
    /// and an epoch. The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64, epoch: u64) -> Self {
        let mixed = stream_index
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(epoch.wrapping_mul(0xbf58_476d_1ce4_e5b9));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(master_seed ^ mixed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    /// Modulo reduction: biased by at most n / 2^64, negligible for
    /// the small ranges drawn here.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform real in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform integer in [lo, hi). Callers guarantee lo < hi.
    pub fn uniform_int(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64_below(hi - lo)
    }

    /// Draw `n` independent samples from Normal(mean, sd).
    pub fn normal_draws(&mut self, mean: f64, sd: f64, n: usize) -> SwingResult<Vec<f64>> {
        if !(sd >= 0.0) {
            return Err(SwingError::Other(anyhow::anyhow!(
                "normal(mean={mean}, sd={sd}): sd must be non-negative"
            )));
        }
        let dist = Normal::new(mean, sd).map_err(|e| {
            SwingError::Other(anyhow::anyhow!("normal(mean={mean}, sd={sd}): {e}"))
        })?;
        Ok(dist.sample_iter(&mut self.inner).take(n).collect())
    }
}

/// Source of every stream for a single session, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Seed from system entropy. The drawn seed is kept so a run can be
    /// reported and replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// `Some(seed)` pins the bank, `None` falls back to entropy.
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        self.for_stream_at(slot, 0)
    }

    /// Stream for `slot` in a given epoch. Bumping the epoch yields an
    /// unrelated stream while staying reproducible under a fixed seed.
    pub fn for_stream_at(&self, slot: StreamSlot, epoch: u64) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64, epoch).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Generator = 0,
    Simulator = 1,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generator => "generator",
            Self::Simulator => "simulator",
        }
    }
}
