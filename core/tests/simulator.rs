//! Swing simulator behaviour per pattern.

use chrono::{Days, NaiveDate};
use swingviz_core::{
    config::SimulationParams,
    error::SwingError,
    generator::{forward_fill, MarketTable, RawObservation},
    pattern::SwingPattern,
    rng::{RngBank, StreamRng, StreamSlot},
    simulator::{apply, cumulative_sum, swing_series, HYBRID_NOISE_SD},
};

const N: usize = 100;

fn sim_rng(seed: u64) -> StreamRng {
    RngBank::new(seed).for_stream(StreamSlot::Simulator)
}

/// Table whose first close is `base`; the rest of the values are
/// irrelevant to the simulated column.
fn table_with_base(base: f64, n: usize) -> MarketTable {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let raw = (0..n)
        .map(|i| RawObservation {
            timestamp: start.checked_add_days(Days::new(i as u64)).unwrap(),
            close:     Some(if i == 0 { base } else { 40_000.0 + i as f64 }),
            high:      Some(50_000.0),
            low:       Some(30_000.0),
            volume:    Some(2_000),
        })
        .collect();
    forward_fill(raw).unwrap()
}

fn params(pattern: SwingPattern, amplitude: f64, frequency: f64, drift: f64) -> SimulationParams {
    SimulationParams { pattern, amplitude, frequency, drift }
}

#[test]
fn sine_is_bit_for_bit_reproducible() {
    let p = params(SwingPattern::SineStable, 3.3, 0.27, -1.4);
    let a = swing_series(&p, N, &mut sim_rng(1)).unwrap();
    let b = swing_series(&p, N, &mut sim_rng(2)).unwrap();
    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn flat_sine_leaves_price_at_first_close() {
    let p = params(SwingPattern::SineStable, 0.0, 0.3, 0.0);
    let swing = swing_series(&p, N, &mut sim_rng(1)).unwrap();
    assert!(swing.iter().all(|s| *s == 0.0));

    let mut table = table_with_base(45_000.0, N);
    let base = table.first_close().unwrap();
    let prices = swingviz_core::simulator::price_series(base, &swing);
    table.set_simulated_prices(&prices).unwrap();
    assert!(table.rows().iter().all(|r| r.simulated_price == Some(45_000.0)));
}

#[test]
fn random_walk_starts_at_first_draw() {
    let p = params(SwingPattern::RandomWalkVolatile, 4.0, 0.1, 1.5);
    let swing = swing_series(&p, N, &mut sim_rng(77)).unwrap();
    let draws = sim_rng(77).normal_draws(1.5 / 10.0, 4.0 / 5.0, N).unwrap();

    assert_eq!(swing.len(), N);
    assert_eq!(swing[0], draws[0]);
    assert_eq!(swing, cumulative_sum(&draws));
}

#[test]
fn hybrid_with_zero_frequency_has_constant_cosine_term() {
    let amplitude = 2.5;
    let p = params(SwingPattern::Hybrid, amplitude, 0.0, 4.0);
    let swing = swing_series(&p, N, &mut sim_rng(5)).unwrap();
    let noise = cumulative_sum(&sim_rng(5).normal_draws(0.0, HYBRID_NOISE_SD, N).unwrap());

    for (i, (s, n)) in swing.iter().zip(noise.iter()).enumerate() {
        assert_eq!(*s, amplitude + n, "row {i}");
    }
    // The noise term still moves.
    assert!(noise.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn stochastic_patterns_continue_the_stream() {
    let p = params(SwingPattern::RandomWalkVolatile, 2.0, 0.1, 0.5);
    let mut rng = sim_rng(3);
    let first = swing_series(&p, N, &mut rng).unwrap();
    let second = swing_series(&p, N, &mut rng).unwrap();
    assert_ne!(first, second);
}

#[test]
fn reference_scenario_prices() {
    let mut table = table_with_base(45_000.0, N);
    let p = params(SwingPattern::SineStable, 2.0, 0.1, 0.5);
    apply(&mut table, &p, &mut sim_rng(0)).unwrap();

    let prices: Vec<f64> = table.rows().iter().map(|r| r.simulated_price.unwrap()).collect();
    assert_eq!(prices.len(), N);
    assert_eq!(prices[0], 45_000.0);
    let expected = 45_000.0 + (2.0 * 1.0f64.sin() + 0.5) * 1000.0;
    assert!((prices[10] - expected).abs() < 1e-6, "price[10] = {}", prices[10]);
    assert!((prices[10] - 47_183.0).abs() < 0.1);
}

#[test]
fn apply_revalidates_bounds() {
    let mut table = table_with_base(45_000.0, N);
    let too_fast = params(SwingPattern::SineStable, 2.0, 0.9, 0.5);
    let err = apply(&mut table, &too_fast, &mut sim_rng(0)).unwrap_err();
    assert!(matches!(err, SwingError::ParameterOutOfRange { name: "frequency", .. }));
    assert!(table.rows().iter().all(|r| r.simulated_price.is_none()));

    let nan_drift = params(SwingPattern::Hybrid, 2.0, 0.1, f64::NAN);
    assert!(apply(&mut table, &nan_drift, &mut sim_rng(0)).is_err());
}

#[test]
fn apply_on_empty_table_fails() {
    let mut table = MarketTable::default();
    let err = apply(&mut table, &SimulationParams::default(), &mut sim_rng(0)).unwrap_err();
    assert!(matches!(err, SwingError::EmptyTable));
}
