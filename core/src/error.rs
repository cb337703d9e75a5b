use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwingError {
    #[error("Unknown swing pattern '{value}'")]
    UnknownPattern { value: String },

    #[error("Parameter '{name}' = {value} outside [{min}, {max}]")]
    ParameterOutOfRange {
        name:  &'static str,
        value: f64,
        min:   f64,
        max:   f64,
    },

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("Observation table is empty")]
    EmptyTable,

    #[error("Column '{column}' has no value to carry forward at row {row}")]
    LeadingGap { column: &'static str, row: usize },

    #[error("Column '{column}' at row {row} must be positive, got {value}")]
    InvalidObservation {
        column: &'static str,
        row:    usize,
        value:  f64,
    },

    #[error("Timestamps not daily at row {row}: {previous} -> {current}")]
    TimestampGap {
        row:      usize,
        previous: chrono::NaiveDate,
        current:  chrono::NaiveDate,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SwingResult<T> = Result<T, SwingError>;
