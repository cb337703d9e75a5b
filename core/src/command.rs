use crate::config::SimulationParams;
use serde::{Deserialize, Serialize};

/// Everything the control surface can ask a session to do.
/// The pattern travels as the selector's raw string so an unknown
/// value is reported as such instead of a generic decode error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ControlCommand {
    // ── Selector and sliders ──────────────────────
    SetPattern   { pattern: String },
    SetAmplitude { value: f64 },
    SetFrequency { value: f64 },
    SetDrift     { value: f64 },
    SetParams    { params: SimulationParams },

    // ── Data ──────────────────────────────────────
    /// Drop the cached table and draw a new one.
    Regenerate,
}

impl ControlCommand {
    /// Every `cmd` tag the control surface may send.
    pub const NAMES: [&'static str; 6] = [
        "set_pattern",
        "set_amplitude",
        "set_frequency",
        "set_drift",
        "set_params",
        "regenerate",
    ];

    pub fn is_known(cmd: &str) -> bool {
        Self::NAMES.contains(&cmd)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetPattern { .. }   => "set_pattern",
            Self::SetAmplitude { .. } => "set_amplitude",
            Self::SetFrequency { .. } => "set_frequency",
            Self::SetDrift { .. }     => "set_drift",
            Self::SetParams { .. }    => "set_params",
            Self::Regenerate          => "regenerate",
        }
    }
}
