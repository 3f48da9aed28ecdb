//! Structured error types for heatgrid.
//!
//! Only configuration problems detected at an entry point are errors. Missing
//! data is an ordinary state handled by the lookup functions.

/// All errors that can occur while validating a heatmap configuration.
#[derive(Debug, thiserror::Error)]
pub enum HeatgridError {
    /// The date range must cover at least one day.
    #[error("Invalid day count: {0} (must be at least 1)")]
    InvalidDayCount(u32),

    /// Gutter size must be a finite, non-negative pixel length.
    #[error("Invalid gutter size: {0} (must be finite and >= 0)")]
    InvalidGutter(f32),

    /// A color scale needs a "no data" color plus at least one level.
    #[error("Color scale too short: {0} colors (need at least 2)")]
    ColorScaleTooShort(usize),

    /// Month labels must name all twelve months.
    #[error("Invalid month labels: expected 12 entries, got {0}")]
    InvalidMonthLabels(usize),

    /// The aligned grid would start or end outside the supported calendar.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HeatgridError>;

impl From<HeatgridError> for wasm_bindgen::JsValue {
    fn from(e: HeatgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
