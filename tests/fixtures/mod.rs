//! Test fixtures for building heatmap inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{date, github_scale, ValuesBuilder};
//!
//! let values = ValuesBuilder::new()
//!     .on("2024-01-10", 3)
//!     .on("2024-01-11", 1)
//!     .build();
//! let layout = heatgrid::compute(&options, &github_scale(), &values, &Default::default(), None)?;
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use chrono::NaiveDate;
use heatgrid::{ColorScale, HeatmapOptions, HeatmapValue};

/// Parse an ISO date, panicking on bad input
pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").expect("valid ISO date")
}

/// The five-color GitHub contribution palette
pub fn github_scale() -> ColorScale {
    ColorScale::new(
        ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    )
    .unwrap()
}

/// Scale of `n` colors named `c0 .. c{n-1}`
pub fn numbered_scale(n: usize) -> ColorScale {
    ColorScale::new((0..n).map(|i| format!("c{i}")).collect()).unwrap()
}

/// Options for `num_days` ending on an ISO date, everything else default
pub fn options(end_date: &str, num_days: u32) -> HeatmapOptions {
    let mut options = HeatmapOptions::new(date(end_date));
    options.num_days = num_days;
    options
}

/// Builder for caller values, one entry per event
#[derive(Default)]
pub struct ValuesBuilder {
    values: Vec<HeatmapValue>,
}

impl ValuesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `events` separate values on the same day
    pub fn on(mut self, iso: &str, events: u32) -> Self {
        for i in 0..events {
            self.values.push(HeatmapValue::new(date(iso)).with("event", i));
        }
        self
    }

    /// Add one value carrying extra payload fields
    pub fn with_payload(mut self, iso: &str, key: &str, value: serde_json::Value) -> Self {
        self.values.push(HeatmapValue::new(date(iso)).with(key, value));
        self
    }

    pub fn build(self) -> Vec<HeatmapValue> {
        self.values
    }
}
