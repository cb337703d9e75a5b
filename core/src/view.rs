//! Dashboard payloads handed to the presentation layer.
//!
//! Three summary metrics and three charts, built from a simulated
//! table. Nothing here renders; it only shapes data.

use crate::{
    config::SimulationParams,
    error::{SwingError, SwingResult},
    generator::MarketTable,
    pattern::SwingPattern,
    types::SessionId,
};
use chrono::NaiveDate;
use serde::Serialize;

pub const PRICE_CHART_TITLE: &str  = "Simulated Price Over Time";
pub const RANGE_CHART_TITLE: &str  = "High vs Low Volatility Range";
pub const VOLUME_CHART_TITLE: &str = "Trading Volume Analysis";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryMetrics {
    pub avg_drift:        Metric,
    pub volatility_index: Metric,
    pub sample_size:      Metric,
}

impl SummaryMetrics {
    pub fn new(params: &SimulationParams, rows: usize) -> Self {
        Self {
            avg_drift: Metric {
                label: "Avg Drift",
                value: format!("{}%", format_real(params.drift)),
            },
            volatility_index: Metric {
                label: "Volatility Index",
                value: format!("{}x", format_real(params.amplitude)),
            },
            sample_size: Metric {
                label: "Sample Size",
                value: format!("{rows} Days"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dot,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Series {
    pub name:   &'static str,
    /// Table column the values come from.
    pub column: &'static str,
    pub kind:   SeriesKind,
    pub style:  LineStyle,
    pub color:  &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPayload {
    pub title:   &'static str,
    pub x_title: Option<&'static str>,
    pub y_title: Option<&'static str>,
    pub x:       Vec<NaiveDate>,
    pub series:  Vec<Series>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub session_id:    SessionId,
    pub seed:          u64,
    pub pattern_label: &'static str,
    pub params:        SimulationParams,
    pub metrics:       SummaryMetrics,
    pub price_chart:   ChartPayload,
    pub range_chart:   ChartPayload,
    pub volume_chart:  ChartPayload,
}

impl DashboardView {
    pub fn build(
        session_id: &str,
        seed: u64,
        params: &SimulationParams,
        table: &MarketTable,
    ) -> SwingResult<Self> {
        if table.is_empty() {
            return Err(SwingError::EmptyTable);
        }
        let rows = table.rows();
        let x: Vec<NaiveDate> = rows.iter().map(|r| r.timestamp).collect();
        let simulated = rows
            .iter()
            .map(|r| r.simulated_price)
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| anyhow::anyhow!("table has not been simulated yet"))?;

        let price_chart = ChartPayload {
            title:   PRICE_CHART_TITLE,
            x_title: Some("Date"),
            y_title: Some("Price (USD)"),
            x:       x.clone(),
            series:  vec![Series {
                name:   "Simulated Price",
                column: "Simulated_Price",
                kind:   SeriesKind::Line,
                style:  LineStyle::Solid,
                color:  "#00ffcc",
                values: simulated,
            }],
        };

        let range_chart = ChartPayload {
            title:   RANGE_CHART_TITLE,
            x_title: None,
            y_title: None,
            x:       x.clone(),
            series:  vec![
                Series {
                    name:   "Market High",
                    column: "High",
                    kind:   SeriesKind::Line,
                    style:  LineStyle::Dot,
                    color:  "green",
                    values: rows.iter().map(|r| r.high).collect(),
                },
                Series {
                    name:   "Market Low",
                    column: "Low",
                    kind:   SeriesKind::Line,
                    style:  LineStyle::Dot,
                    color:  "red",
                    values: rows.iter().map(|r| r.low).collect(),
                },
            ],
        };

        let volume_chart = ChartPayload {
            title:   VOLUME_CHART_TITLE,
            x_title: None,
            y_title: None,
            x,
            series:  vec![Series {
                name:   "Volume",
                column: "Volume",
                kind:   SeriesKind::Bar,
                style:  LineStyle::Solid,
                color:  "orange",
                values: rows.iter().map(|r| r.volume as f64).collect(),
            }],
        };

        Ok(Self {
            session_id:    session_id.to_string(),
            seed,
            pattern_label: params.pattern.label(),
            params:        *params,
            metrics:       SummaryMetrics::new(params, table.len()),
            price_chart,
            range_chart,
            volume_chart,
        })
    }

    pub fn pattern(&self) -> SwingPattern {
        self.params.pattern
    }
}

/// Reals always carry a fractional part: 2 -> "2.0", 0.5 -> "0.5".
pub fn format_real(value: f64) -> String {
    format!("{value:?}")
}
