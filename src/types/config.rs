use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Orientation;
use crate::calendar::DateRange;
use crate::error::{HeatgridError, Result};

/// Side length of every cell in pixels
pub const SQUARE_SIZE: f32 = 10.0;

/// Default gutter between cells in pixels
pub const DEFAULT_GUTTER_SIZE: f32 = 1.0;

/// Default number of days shown
pub const DEFAULT_NUM_DAYS: u32 = 200;

/// English three-letter month abbreviations
pub const DEFAULT_MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Cell sizing shared by all geometry calculations
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SizingConfig {
    gutter_size: f32,
    show_month_labels: bool,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            gutter_size: DEFAULT_GUTTER_SIZE,
            show_month_labels: true,
        }
    }
}

impl SizingConfig {
    /// Create a sizing config.
    ///
    /// # Errors
    /// Returns an error if `gutter_size` is negative or not finite.
    pub fn new(gutter_size: f32, show_month_labels: bool) -> Result<Self> {
        if !gutter_size.is_finite() || gutter_size < 0.0 {
            return Err(HeatgridError::InvalidGutter(gutter_size));
        }
        Ok(Self {
            gutter_size,
            show_month_labels,
        })
    }

    pub const fn gutter_size(&self) -> f32 {
        self.gutter_size
    }

    pub const fn show_month_labels(&self) -> bool {
        self.show_month_labels
    }
}

/// The twelve month names used for labels, January first
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MonthLabels {
    labels: Vec<String>,
}

impl Default for MonthLabels {
    fn default() -> Self {
        Self {
            labels: DEFAULT_MONTH_LABELS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl MonthLabels {
    /// Create month labels.
    ///
    /// # Errors
    /// Returns an error unless exactly twelve labels are given.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if labels.len() != 12 {
            return Err(HeatgridError::InvalidMonthLabels(labels.len()));
        }
        Ok(Self { labels })
    }

    /// Label for a zero-based month (0 = January)
    pub fn get(&self, month0: u32) -> &str {
        usize::try_from(month0)
            .ok()
            .and_then(|i| self.labels.get(i))
            .map_or("", String::as_str)
    }
}

impl TryFrom<Vec<String>> for MonthLabels {
    type Error = HeatgridError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<MonthLabels> for Vec<String> {
    fn from(labels: MonthLabels) -> Self {
        labels.labels
    }
}

/// Options for a full heatmap layout pass.
///
/// Deserializes from the camelCase option names used by the JS component,
/// with every field but `endDate` optional.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapOptions {
    /// Last day shown (inclusive)
    pub end_date: NaiveDate,
    #[serde(default = "default_num_days")]
    pub num_days: u32,
    #[serde(default = "default_gutter_size")]
    pub gutter_size: f32,
    #[serde(default = "default_true")]
    pub horizontal: bool,
    #[serde(default = "default_true")]
    pub show_month_labels: bool,
    /// Emit padding cells before the start and after the end of the range
    #[serde(default)]
    pub show_out_of_range_days: bool,
    #[serde(default)]
    pub month_labels: MonthLabels,
}

fn default_num_days() -> u32 {
    DEFAULT_NUM_DAYS
}

fn default_gutter_size() -> f32 {
    DEFAULT_GUTTER_SIZE
}

fn default_true() -> bool {
    true
}

impl HeatmapOptions {
    /// Default options for a range ending on `end_date`
    pub fn new(end_date: NaiveDate) -> Self {
        Self {
            end_date,
            num_days: DEFAULT_NUM_DAYS,
            gutter_size: DEFAULT_GUTTER_SIZE,
            horizontal: true,
            show_month_labels: true,
            show_out_of_range_days: false,
            month_labels: MonthLabels::default(),
        }
    }

    /// Parse options from a JSON object.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_horizontal(self.horizontal)
    }

    /// Validated date range.
    ///
    /// # Errors
    /// See [`DateRange::new`].
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.end_date, self.num_days)
    }

    /// Validated sizing.
    ///
    /// # Errors
    /// See [`SizingConfig::new`].
    pub fn sizing(&self) -> Result<SizingConfig> {
        SizingConfig::new(self.gutter_size, self.show_month_labels)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults_from_json() {
        let options = HeatmapOptions::from_json(r#"{"endDate": "2024-06-30"}"#).unwrap();
        assert_eq!(options.num_days, DEFAULT_NUM_DAYS);
        assert_eq!(options.gutter_size, 1.0);
        assert!(options.horizontal);
        assert!(options.show_month_labels);
        assert!(!options.show_out_of_range_days);
        assert_eq!(options.month_labels.get(0), "Jan");
        assert_eq!(options.month_labels.get(11), "Dec");
        assert_eq!(options.orientation(), Orientation::Horizontal);
    }

    #[test]
    fn test_options_camel_case_fields() {
        let options = HeatmapOptions::from_json(
            r#"{"endDate": "2024-06-30", "numDays": 30, "gutterSize": 2, "horizontal": false,
                "showMonthLabels": false, "showOutOfRangeDays": true}"#,
        )
        .unwrap();
        assert_eq!(options.num_days, 30);
        assert_eq!(options.gutter_size, 2.0);
        assert_eq!(options.orientation(), Orientation::Vertical);
        assert!(!options.sizing().unwrap().show_month_labels());
        assert!(options.show_out_of_range_days);
    }

    #[test]
    fn test_missing_end_date_is_an_error() {
        let err = HeatmapOptions::from_json(r#"{"numDays": 30}"#).unwrap_err();
        assert!(matches!(err, HeatgridError::Json(_)));
    }

    #[test]
    fn test_month_labels_must_have_twelve_entries() {
        let err = HeatmapOptions::from_json(
            r#"{"endDate": "2024-06-30", "monthLabels": ["J", "F", "M"]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("12"));
        assert!(matches!(
            MonthLabels::new(vec!["x".to_string()]),
            Err(HeatgridError::InvalidMonthLabels(1))
        ));
    }

    #[test]
    fn test_negative_gutter_rejected() {
        assert!(matches!(
            SizingConfig::new(-1.0, true),
            Err(HeatgridError::InvalidGutter(_))
        ));
        assert!(matches!(
            SizingConfig::new(f32::NAN, true),
            Err(HeatgridError::InvalidGutter(_))
        ));
        assert_eq!(SizingConfig::new(0.0, false).unwrap().gutter_size(), 0.0);
    }
}
