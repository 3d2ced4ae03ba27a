use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Unreachable: {rate:.2}% for {goal} points not reached within {max_dice} dice")]
    Unreachable { goal: u64, rate: f64, max_dice: u64 },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Converts a caller-supplied number into a count, rejecting negative and
/// non-finite values. Fractional values are truncated.
pub fn checked_count(name: &str, value: f64) -> EngineResult<u64> {
    if !value.is_finite() {
        return Err(EngineError::InvalidArgument(format!(
            "{} must be finite (got {})",
            name, value
        )));
    }
    if value < 0.0 {
        return Err(EngineError::InvalidArgument(format!(
            "{} must be non-negative (got {})",
            name, value
        )));
    }
    Ok(value as u64)
}
