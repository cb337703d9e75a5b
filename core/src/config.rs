use crate::{
    error::{SwingError, SwingResult},
    pattern::SwingPattern,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "dashboard.json";

// ── Slider bounds ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub name: &'static str,
    pub min:  f64,
    pub max:  f64,
}

impl Bounds {
    /// NaN never passes.
    pub fn check(&self, value: f64) -> SwingResult<f64> {
        if value >= self.min && value <= self.max {
            Ok(value)
        } else {
            Err(SwingError::ParameterOutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

pub const AMPLITUDE_BOUNDS: Bounds = Bounds { name: "amplitude", min: 0.1,  max: 10.0 };
pub const FREQUENCY_BOUNDS: Bounds = Bounds { name: "frequency", min: 0.01, max: 0.5 };
pub const DRIFT_BOUNDS:     Bounds = Bounds { name: "drift",     min: -5.0, max: 5.0 };

// ── Simulation parameters ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationParams {
    pub pattern:   SwingPattern,
    pub amplitude: f64,
    pub frequency: f64,
    pub drift:     f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            pattern:   SwingPattern::SineStable,
            amplitude: 2.0,
            frequency: 0.1,
            drift:     0.5,
        }
    }
}

impl SimulationParams {
    /// Re-check slider bounds. Callers may bypass the control surface,
    /// so every public entry point into the simulator runs this.
    pub fn validate(&self) -> SwingResult<()> {
        AMPLITUDE_BOUNDS.check(self.amplitude)?;
        FREQUENCY_BOUNDS.check(self.frequency)?;
        DRIFT_BOUNDS.check(self.drift)?;
        Ok(())
    }
}

// ── Generator configuration ───────────────────────────────────────

/// Half-open uniform range [min, max) for a price column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Half-open uniform range [min, max) for volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeRange {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    pub start_date:   NaiveDate,
    pub periods:      usize,
    pub close_range:  PriceRange,
    pub high_range:   PriceRange,
    pub low_range:    PriceRange,
    pub volume_range: VolumeRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_date:   NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid constant date"),
            periods:      100,
            close_range:  PriceRange { min: 30_000.0, max: 60_000.0 },
            high_range:   PriceRange { min: 31_000.0, max: 61_000.0 },
            low_range:    PriceRange { min: 29_000.0, max: 59_000.0 },
            volume_range: VolumeRange { min: 1_000, max: 5_000 },
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> SwingResult<()> {
        if self.periods == 0 {
            return Err(SwingError::InvalidConfig("periods must be >= 1".into()));
        }
        for (column, range) in [
            ("close", self.close_range),
            ("high", self.high_range),
            ("low", self.low_range),
        ] {
            if !(range.min > 0.0 && range.min < range.max && range.max.is_finite()) {
                return Err(SwingError::InvalidConfig(format!(
                    "{column} range [{}, {}) must be positive and non-empty",
                    range.min, range.max
                )));
            }
        }
        let vol = self.volume_range;
        if vol.min == 0 || vol.min >= vol.max {
            return Err(SwingError::InvalidConfig(format!(
                "volume range [{}, {}) must be positive and non-empty",
                vol.min, vol.max
            )));
        }
        Ok(())
    }
}

// ── Dashboard file ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub params:    SimulationParams,
    /// Fixed master seed. Absent means system entropy.
    #[serde(default)]
    pub seed:      Option<u64>,
}

impl DashboardConfig {
    /// Load `{data_dir}/dashboard.json`.
    /// In tests, use DashboardConfig::default().
    pub fn load(data_dir: &str) -> SwingResult<Self> {
        let path = config_path(data_dir);
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config.generator.validate()?;
        config.params.validate()?;
        Ok(config)
    }

    /// Like load(), but a missing file yields the reference defaults.
    pub fn load_or_default(data_dir: &str) -> SwingResult<Self> {
        let path = config_path(data_dir);
        if Path::new(&path).exists() {
            Self::load(data_dir)
        } else {
            log::info!("{path} not found, using reference defaults");
            Ok(Self::default())
        }
    }
}

fn config_path(data_dir: &str) -> String {
    format!("{data_dir}/{CONFIG_FILE_NAME}")
}
