//! Swing simulator: turns (table, parameters) into the Simulated_Price
//! column.
//!
//! RULE: Pattern dispatch is an exhaustive match. There is no fallback
//! branch; an unknown pattern never gets this far (see pattern.rs).

use crate::{
    config::SimulationParams,
    error::SwingResult,
    generator::MarketTable,
    pattern::SwingPattern,
    rng::StreamRng,
    types::{RowIndex, SWING_SCALE},
};

/// Standard deviation of the Hybrid pattern's noise term.
pub const HYBRID_NOISE_SD: f64 = 0.5;

/// Compute `swing[i]` for `i = 0..n`.
///
/// This is the raw kernel: it does not check slider bounds, so edge
/// values such as amplitude 0 or frequency 0 can be evaluated. Use
/// [`apply`] at any boundary a caller can reach directly.
pub fn swing_series(
    params: &SimulationParams,
    n: usize,
    rng: &mut StreamRng,
) -> SwingResult<Vec<f64>> {
    let SimulationParams { pattern, amplitude, frequency, drift } = *params;
    let series = match pattern {
        SwingPattern::SineStable => (0..n)
            .map(|i| sine_point(amplitude, frequency, drift, i))
            .collect(),
        SwingPattern::RandomWalkVolatile => {
            let draws = rng.normal_draws(drift / 10.0, amplitude / 5.0, n)?;
            cumulative_sum(&draws)
        }
        SwingPattern::Hybrid => {
            let draws = rng.normal_draws(0.0, HYBRID_NOISE_SD, n)?;
            cumulative_sum(&draws)
                .into_iter()
                .enumerate()
                .map(|(i, noise)| amplitude * (frequency * i as f64).cos() + noise)
                .collect()
        }
    };
    Ok(series)
}

/// `base + swing[i] * 1000` for every row.
pub fn price_series(base: f64, swing: &[f64]) -> Vec<f64> {
    swing.iter().map(|s| base + s * SWING_SCALE).collect()
}

/// Validate `params`, then recompute the whole Simulated_Price column
/// of `table` in place. Returns the swing series that was applied.
pub fn apply(
    table: &mut MarketTable,
    params: &SimulationParams,
    rng: &mut StreamRng,
) -> SwingResult<Vec<f64>> {
    params.validate()?;
    let base = table.first_close()?;
    let swing = swing_series(params, table.len(), rng)?;
    table.set_simulated_prices(&price_series(base, &swing))?;
    log::debug!(
        "applied {} over {} rows: base={base:.2} amplitude={} frequency={} drift={}",
        params.pattern,
        table.len(),
        params.amplitude,
        params.frequency,
        params.drift
    );
    Ok(swing)
}

/// Running total: `out[i] = sum(values[0..=i])`.
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Swing value a SineStable curve takes at row `i`.
pub fn sine_point(amplitude: f64, frequency: f64, drift: f64, i: RowIndex) -> f64 {
    let x = i as f64;
    amplitude * (frequency * x).sin() + drift * x / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_sum_runs_forward() {
        assert_eq!(cumulative_sum(&[1.0, 2.0, -0.5]), vec![1.0, 3.0, 2.5]);
        assert!(cumulative_sum(&[]).is_empty());
    }

    #[test]
    fn price_series_scales_swing() {
        assert_eq!(price_series(100.0, &[0.0, 0.5, -1.0]), vec![100.0, 600.0, -900.0]);
    }
}
