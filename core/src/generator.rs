//! Observation table and the synthetic market generator.
//!
//! RULE: The table is immutable once built except for the derived
//! Simulated_Price column, which the simulator overwrites in full.

use crate::{
    config::GeneratorConfig,
    error::{SwingError, SwingResult},
    rng::StreamRng,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    #[serde(rename = "Timestamp")]
    pub timestamp: NaiveDate,
    #[serde(rename = "Close")]
    pub close:     f64,
    #[serde(rename = "High")]
    pub high:      f64,
    #[serde(rename = "Low")]
    pub low:       f64,
    #[serde(rename = "Volume")]
    pub volume:    u64,
    #[serde(rename = "Simulated_Price", default, skip_serializing_if = "Option::is_none")]
    pub simulated_price: Option<f64>,
}

/// A row as read from an upstream source, before gaps are filled.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawObservation {
    #[serde(rename = "Timestamp")]
    pub timestamp: NaiveDate,
    #[serde(rename = "Close")]
    pub close:     Option<f64>,
    #[serde(rename = "High")]
    pub high:      Option<f64>,
    #[serde(rename = "Low")]
    pub low:       Option<f64>,
    #[serde(rename = "Volume")]
    pub volume:    Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MarketTable {
    rows: Vec<Observation>,
}

impl MarketTable {
    /// Wrap rows after checking the daily, gap-free timestamp invariant.
    pub fn from_rows(rows: Vec<Observation>) -> SwingResult<Self> {
        for (row, pair) in rows.windows(2).enumerate() {
            let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
            if previous.checked_add_days(Days::new(1)) != Some(current) {
                return Err(SwingError::TimestampGap { row: row + 1, previous, current });
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// The base price every simulated curve starts from.
    pub fn first_close(&self) -> SwingResult<f64> {
        self.rows.first().map(|r| r.close).ok_or(SwingError::EmptyTable)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.timestamp)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.timestamp)
    }

    /// Overwrite the derived column. Length must match the table.
    pub fn set_simulated_prices(&mut self, prices: &[f64]) -> SwingResult<()> {
        if prices.len() != self.rows.len() {
            return Err(SwingError::Other(anyhow::anyhow!(
                "simulated series has {} values for {} rows",
                prices.len(),
                self.rows.len()
            )));
        }
        for (row, price) in self.rows.iter_mut().zip(prices) {
            row.simulated_price = Some(*price);
        }
        Ok(())
    }

    pub fn clear_simulated_prices(&mut self) {
        for row in &mut self.rows {
            row.simulated_price = None;
        }
    }

    /// Rows where High < Close or Close < Low.
    /// Reported only; the ordering is not enforced.
    pub fn ordering_violations(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.high < r.close || r.close < r.low)
            .count()
    }
}

/// Build a synthetic table: `periods` consecutive days from `start_date`,
/// each column drawn independently from its own uniform range.
pub fn generate(config: &GeneratorConfig, rng: &mut StreamRng) -> SwingResult<MarketTable> {
    config.validate()?;
    let n = config.periods;

    // Columns are drawn one after another, each over every row.
    let closes: Vec<f64> = (0..n).map(|_| rng.uniform(config.close_range.min, config.close_range.max)).collect();
    let highs:  Vec<f64> = (0..n).map(|_| rng.uniform(config.high_range.min, config.high_range.max)).collect();
    let lows:   Vec<f64> = (0..n).map(|_| rng.uniform(config.low_range.min, config.low_range.max)).collect();
    let volumes: Vec<u64> = (0..n)
        .map(|_| rng.uniform_int(config.volume_range.min, config.volume_range.max))
        .collect();

    let mut raw = Vec::with_capacity(n);
    for i in 0..n {
        let timestamp = config
            .start_date
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| SwingError::InvalidConfig(format!(
                "date overflow at day {i} from {}", config.start_date
            )))?;
        raw.push(RawObservation {
            timestamp,
            close:  Some(closes[i]),
            high:   Some(highs[i]),
            low:    Some(lows[i]),
            volume: Some(volumes[i]),
        });
    }

    let table = forward_fill(raw)?;
    log::debug!(
        "generated {} rows from {} ({} high/close/low ordering violations)",
        table.len(),
        config.start_date,
        table.ordering_violations()
    );
    Ok(table)
}

/// Fill policy: a missing value takes the last valid value of the same
/// column. A column missing its first value has nothing to carry and
/// is an error. Present values must be positive (and finite), and at
/// least one row is required.
pub fn forward_fill(raw: Vec<RawObservation>) -> SwingResult<MarketTable> {
    if raw.is_empty() {
        return Err(SwingError::EmptyTable);
    }
    let mut last_close = None;
    let mut last_high = None;
    let mut last_low = None;
    let mut last_volume = None;
    let mut filled = 0usize;

    let mut rows = Vec::with_capacity(raw.len());
    for (row, r) in raw.into_iter().enumerate() {
        filled += [r.close.is_none(), r.high.is_none(), r.low.is_none(), r.volume.is_none()]
            .iter()
            .filter(|missing| **missing)
            .count();

        check_positive("Close", row, r.close)?;
        check_positive("High", row, r.high)?;
        check_positive("Low", row, r.low)?;
        if r.volume == Some(0) {
            return Err(SwingError::InvalidObservation { column: "Volume", row, value: 0.0 });
        }

        last_close = r.close.or(last_close);
        last_high = r.high.or(last_high);
        last_low = r.low.or(last_low);
        last_volume = r.volume.or(last_volume);

        rows.push(Observation {
            timestamp: r.timestamp,
            close:     last_close.ok_or(SwingError::LeadingGap { column: "Close", row })?,
            high:      last_high.ok_or(SwingError::LeadingGap { column: "High", row })?,
            low:       last_low.ok_or(SwingError::LeadingGap { column: "Low", row })?,
            volume:    last_volume.ok_or(SwingError::LeadingGap { column: "Volume", row })?,
            simulated_price: None,
        });
    }

    if filled > 0 {
        log::info!("forward-filled {filled} missing values");
    }
    MarketTable::from_rows(rows)
}

fn check_positive(column: &'static str, row: usize, value: Option<f64>) -> SwingResult<()> {
    match value {
        Some(v) if !(v > 0.0 && v.is_finite()) => {
            Err(SwingError::InvalidObservation { column, row, value: v })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn raw(d: u32, close: Option<f64>, volume: Option<u64>) -> RawObservation {
        RawObservation {
            timestamp: day(d),
            close,
            high: Some(2.0),
            low: Some(1.0),
            volume,
        }
    }

    #[test]
    fn forward_fill_carries_last_valid_value() {
        let table = forward_fill(vec![
            raw(1, Some(10.0), Some(5)),
            raw(2, None, None),
            raw(3, None, Some(7)),
            raw(4, Some(12.0), None),
        ])
        .unwrap();

        let closes: Vec<f64> = table.rows().iter().map(|r| r.close).collect();
        let volumes: Vec<u64> = table.rows().iter().map(|r| r.volume).collect();
        assert_eq!(closes, vec![10.0, 10.0, 10.0, 12.0]);
        assert_eq!(volumes, vec![5, 5, 7, 7]);
    }

    #[test]
    fn leading_gap_is_an_error() {
        let err = forward_fill(vec![raw(1, None, Some(5)), raw(2, Some(1.0), Some(5))]).unwrap_err();
        assert!(matches!(err, SwingError::LeadingGap { column: "Close", row: 0 }));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(forward_fill(Vec::new()), Err(SwingError::EmptyTable)));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let mut obs = raw(1, Some(f64::NAN), Some(5));
        let err = forward_fill(vec![obs.clone()]).unwrap_err();
        assert!(matches!(err, SwingError::InvalidObservation { column: "Close", row: 0, .. }));

        obs.close = Some(1.0);
        obs.high = Some(-5.0);
        let err = forward_fill(vec![obs.clone()]).unwrap_err();
        assert!(matches!(err, SwingError::InvalidObservation { column: "High", row: 0, .. }));

        obs.high = Some(2.0);
        obs.low = Some(0.0);
        let err = forward_fill(vec![obs.clone()]).unwrap_err();
        assert!(matches!(err, SwingError::InvalidObservation { column: "Low", row: 0, .. }));

        let zero_volume = raw(1, Some(1.0), Some(0));
        let err = forward_fill(vec![zero_volume]).unwrap_err();
        assert!(matches!(err, SwingError::InvalidObservation { column: "Volume", row: 0, .. }));
    }

    #[test]
    fn non_daily_timestamps_rejected() {
        let err = forward_fill(vec![raw(1, Some(1.0), Some(1)), raw(3, Some(1.0), Some(1))]).unwrap_err();
        assert!(matches!(err, SwingError::TimestampGap { row: 1, .. }));
    }

    #[test]
    fn simulated_price_length_must_match() {
        let mut table = forward_fill(vec![raw(1, Some(1.0), Some(1))]).unwrap();
        assert!(table.set_simulated_prices(&[1.0, 2.0]).is_err());
        table.set_simulated_prices(&[3.0]).unwrap();
        assert_eq!(table.rows()[0].simulated_price, Some(3.0));
    }

    #[test]
    fn serializes_with_dashboard_column_names() {
        let table = forward_fill(vec![raw(1, Some(1.5), Some(3))]).unwrap();
        let json = serde_json::to_value(&table.rows()[0]).unwrap();
        assert_eq!(json["Timestamp"], "2024-01-01");
        assert_eq!(json["Close"], 1.5);
        assert_eq!(json["Volume"], 3);
        assert!(json.get("Simulated_Price").is_none());
    }
}
