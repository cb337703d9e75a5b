//! Shared primitive types used across the dashboard core.

/// Zero-based row position inside an observation table.
/// Also the `x` fed into the swing formulas.
pub type RowIndex = usize;

/// A stable, unique identifier for one dashboard session.
pub type SessionId = String;

/// Multiplier applied to a swing value before adding it to the base price.
pub const SWING_SCALE: f64 = 1000.0;
