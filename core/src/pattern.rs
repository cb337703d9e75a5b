//! Swing pattern selector.
//!
//! The control surface offers exactly three patterns. Anything else is a
//! contract violation and is rejected when parsed, never defaulted.

use crate::error::{SwingError, SwingResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwingPattern {
    #[default]
    SineStable,
    RandomWalkVolatile,
    Hybrid,
}

impl SwingPattern {
    pub const ALL: [SwingPattern; 3] = [
        SwingPattern::SineStable,
        SwingPattern::RandomWalkVolatile,
        SwingPattern::Hybrid,
    ];

    /// Label shown by the pattern selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SineStable         => "Sine Wave (Stable)",
            Self::RandomWalkVolatile => "Random Walk (Volatile)",
            Self::Hybrid             => "Hybrid",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::SineStable         => "sine_stable",
            Self::RandomWalkVolatile => "random_walk_volatile",
            Self::Hybrid             => "hybrid",
        }
    }

    /// Whether repeated recomputation with the same parameters
    /// draws a fresh curve.
    pub fn is_stochastic(&self) -> bool {
        !matches!(self, Self::SineStable)
    }

    /// Accepts a selector label or a snake_case id.
    pub fn parse(value: &str) -> SwingResult<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label() == trimmed || p.id() == trimmed)
            .ok_or_else(|| SwingError::UnknownPattern { value: value.to_string() })
    }
}

impl FromStr for SwingPattern {
    type Err = SwingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SwingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
