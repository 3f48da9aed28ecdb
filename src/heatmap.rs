//! A full layout pass: geometry zipped with per-cell data.
//!
//! The result holds everything a renderer needs to draw the grid. Nothing is
//! cached between passes; call [`compute`] again whenever an input changes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::DAYS_IN_WEEK;
use crate::color::ColorLevelAssigner;
use crate::error::Result;
use crate::layout::{HeatmapGeometry, MonthLabel};
use crate::types::{
    ColorScale, HeatmapOptions, HeatmapValue, Orientation, Point, TooltipAttrs, SQUARE_SIZE,
};
use crate::values::{
    lookup_title, lookup_tooltip_attrs, lookup_value, TitleFn, TooltipSource, ValueCache,
};

/// One drawable cell
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    /// Linear grid index, padding included
    pub index: u32,
    /// Weekday, 0 = Sunday
    pub day_index: u32,
    pub date: Option<NaiveDate>,
    /// False for padding slots
    pub in_range: bool,
    /// Offset inside the week group
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Index into the color scale, 0 = no data
    pub level: usize,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<HeatmapValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub tooltip_data_attrs: TooltipAttrs,
}

/// A week group and its cells
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapWeek {
    pub week_index: u32,
    pub transform: Point,
    pub cells: Vec<HeatmapCell>,
}

/// Output of a layout pass
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapLayout {
    pub width: f32,
    pub height: f32,
    pub view_box: String,
    pub orientation: Orientation,
    pub max_count: u32,
    pub weeks: Vec<HeatmapWeek>,
    pub month_labels: Vec<MonthLabel>,
    /// Offset of the month label group (None when horizontal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_labels_transform: Option<Point>,
}

impl HeatmapLayout {
    /// All cells in index order
    pub fn cells(&self) -> impl Iterator<Item = &HeatmapCell> {
        self.weeks.iter().flat_map(|week| week.cells.iter())
    }

    /// Cell at a grid index, if it was emitted
    pub fn cell(&self, index: u32) -> Option<&HeatmapCell> {
        self.weeks
            .get(usize::try_from(index / DAYS_IN_WEEK).ok()?)?
            .cells
            .iter()
            .find(|cell| cell.index == index)
    }

    /// Serialize to a JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run a layout pass.
///
/// # Errors
/// Returns an error if the options describe an invalid range or gutter.
pub fn compute(
    options: &HeatmapOptions,
    scale: &ColorScale,
    values: &[HeatmapValue],
    tooltip: &TooltipSource<'_>,
    title_for_value: Option<TitleFn<'_>>,
) -> Result<HeatmapLayout> {
    let range = options.range()?;
    let sizing = options.sizing()?;
    let geometry = HeatmapGeometry::new(range, sizing, options.orientation());

    let cache = ValueCache::build(&range, values, tooltip, title_for_value);
    let colors = ColorLevelAssigner::new(scale, &cache);

    let weeks: Vec<HeatmapWeek> = (0..geometry.week_count())
        .map(|week_index| {
            let cells = (0..DAYS_IN_WEEK)
                .map(|day_index| week_index * DAYS_IN_WEEK + day_index)
                .filter(|&index| options.show_out_of_range_days || range.is_in_range(index))
                .map(|index| {
                    let offset = geometry.square_coordinates(index);
                    HeatmapCell {
                        index,
                        day_index: index % DAYS_IN_WEEK,
                        date: range.date_for_index(index),
                        in_range: range.is_in_range(index),
                        x: offset.x,
                        y: offset.y,
                        size: SQUARE_SIZE,
                        level: colors.level_for_index(index, &cache),
                        color: colors.color_for_index(index, &cache).to_string(),
                        value: lookup_value(index, &cache).cloned(),
                        title: lookup_title(index, &cache, title_for_value),
                        tooltip_data_attrs: lookup_tooltip_attrs(index, &cache, tooltip),
                    }
                })
                .collect();
            HeatmapWeek {
                week_index,
                transform: geometry.week_transform(week_index),
                cells,
            }
        })
        .collect();

    let layout = HeatmapLayout {
        width: geometry.width(),
        height: geometry.height(),
        view_box: geometry.view_box(),
        orientation: geometry.orientation(),
        max_count: colors.max_count(),
        weeks,
        month_labels: geometry.month_labels(&options.month_labels),
        month_labels_transform: geometry.month_labels_transform(),
    };

    log::debug!(
        "heatmap layout: {} weeks, {} populated cells, viewBox {}",
        layout.weeks.len(),
        cache.len(),
        layout.view_box
    );
    Ok(layout)
}

/// Run a layout pass on JSON inputs and return the layout as JSON.
///
/// `colors_json` is an array of CSS colors, `values_json` an array of objects
/// with at least a `date` field. Tooltip attributes are left empty.
///
/// # Errors
/// Returns an error if any input fails to parse or validate.
pub fn compute_json(options_json: &str, colors_json: &str, values_json: &str) -> Result<String> {
    let options = HeatmapOptions::from_json(options_json)?;
    let scale: ColorScale = serde_json::from_str(colors_json)?;
    let values: Vec<HeatmapValue> = serde_json::from_str(values_json)?;
    compute(&options, &scale, &values, &TooltipSource::default(), None)?.to_json()
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scale() -> ColorScale {
        ColorScale::new(vec![
            "#ebedf0".to_string(),
            "#9be9a8".to_string(),
            "#40c463".to_string(),
            "#216e39".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_padding_omitted_by_default() {
        // Monday 2024-01-01 .. Wednesday 2024-01-10
        let mut options = HeatmapOptions::new(date(2024, 1, 10));
        options.num_days = 10;
        let layout = compute(&options, &scale(), &[], &TooltipSource::default(), None).unwrap();

        assert_eq!(layout.weeks.len(), 2);
        assert_eq!(layout.cells().count(), 10);
        assert!(layout.cells().all(|c| c.in_range));
        assert!(layout.cell(0).is_none());
        assert_eq!(layout.cell(1).unwrap().date, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_padding_emitted_when_requested() {
        let mut options = HeatmapOptions::new(date(2024, 1, 10));
        options.num_days = 10;
        options.show_out_of_range_days = true;
        let layout = compute(&options, &scale(), &[], &TooltipSource::default(), None).unwrap();

        assert_eq!(layout.cells().count(), 14);
        let padding = layout.cell(0).unwrap();
        assert!(!padding.in_range);
        assert_eq!(padding.date, Some(date(2023, 12, 31)));
        assert_eq!(padding.color, "#ebedf0");
        assert_eq!(padding.level, 0);
    }

    #[test]
    fn test_cells_colored_by_daily_count() {
        let mut options = HeatmapOptions::new(date(2024, 1, 13));
        options.num_days = 7;
        let values = vec![
            HeatmapValue::new(date(2024, 1, 8)),
            HeatmapValue::new(date(2024, 1, 9)),
            HeatmapValue::new(date(2024, 1, 9)),
            HeatmapValue::new(date(2024, 1, 9)),
        ];
        let layout = compute(&options, &scale(), &values, &TooltipSource::default(), None).unwrap();

        assert_eq!(layout.max_count, 3);
        assert_eq!(layout.cell(2).unwrap().color, "#216e39");
        assert_eq!(layout.cell(1).unwrap().color, "#9be9a8");
        assert_eq!(layout.cell(0).unwrap().color, "#ebedf0");
        assert!(layout.cell(0).unwrap().value.is_none());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let mut options = HeatmapOptions::new(date(2024, 1, 13));
        options.num_days = 0;
        assert!(compute(&options, &scale(), &[], &TooltipSource::default(), None).is_err());

        options.num_days = 7;
        options.gutter_size = -2.0;
        assert!(compute(&options, &scale(), &[], &TooltipSource::default(), None).is_err());
    }

    #[test]
    fn test_layout_serializes_camel_case() {
        let mut options = HeatmapOptions::new(date(2024, 1, 13));
        options.num_days = 7;
        let layout = compute(&options, &scale(), &[], &TooltipSource::default(), None).unwrap();
        let json: serde_json::Value = serde_json::from_str(&layout.to_json().unwrap()).unwrap();

        assert_eq!(json["viewBox"], "10 90");
        assert_eq!(json["orientation"], "horizontal");
        assert_eq!(json["weeks"][0]["cells"][0]["inRange"], true);
        assert_eq!(json["weeks"][0]["cells"][0]["date"], "2024-01-07");
        assert!(json.get("monthLabelsTransform").is_none());
    }

    #[test]
    fn test_compute_json() {
        let out = compute_json(
            r#"{"endDate": "2024-01-13", "numDays": 7, "horizontal": false}"#,
            r##"["#eee", "#0a0"]"##,
            r#"[{"date": "2024-01-10", "count": 2}]"#,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["viewBox"], "104 10");
        assert_eq!(json["weeks"][0]["transform"]["x"], 10.0);
        assert_eq!(json["weeks"][0]["cells"][3]["color"], "#0a0");
        assert_eq!(json["weeks"][0]["cells"][3]["value"]["count"], 2);
        assert_eq!(json["monthLabelsTransform"]["x"], 81.0);
    }

    #[test]
    fn test_compute_json_rejects_short_scale() {
        let err = compute_json(r#"{"endDate": "2024-01-13"}"#, r##"["#eee"]"##, "[]").unwrap_err();
        assert!(err.to_string().contains("Color scale too short"));
    }
}
