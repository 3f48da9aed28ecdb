//! Pixel geometry of the heatmap grid.
//!
//! The "week axis" is the axis along which one week's seven cells stack. When
//! horizontal it is the y axis (weeks are columns); when vertical it is the x
//! axis (weeks are rows). Width always measures the opposite axis, which is why
//! the viewBox swaps the two for vertical grids.

use chrono::Datelike;
use serde::Serialize;

use super::{horizontal, vertical};
use crate::calendar::{DateRange, DAYS_IN_WEEK};
use crate::grid::{self, GridCoordinate};
use crate::types::{MonthLabels, Orientation, Point, SizingConfig, SQUARE_SIZE};

/// Space between month labels and the first row of cells
pub const MONTH_LABEL_GUTTER_SIZE: f32 = 4.0;

/// Left margin of every week group in vertical grids
pub const WEEK_LEFT_MARGIN: f32 = 10.0;

/// Fixed nudge applied to vertical month labels so they sit on their week
pub const VERTICAL_MONTH_LABEL_NUDGE: f32 = -2.0;

/// Orientation-dependent geometry formulas.
///
/// `step` is always the square size plus gutter.
pub struct OrientationStrategy {
    /// Offset of a cell inside its week, given `day_index * step`
    pub square_coordinates: fn(day_offset: f32) -> Point,
    /// Offset of a whole week group
    pub week_transform: fn(week_index: u32, step: f32, month_label_extent: f32) -> Point,
    /// Position of the label attached to a week
    pub month_label_transform: fn(week_index: u32, step: f32) -> Point,
    /// Room taken by month labels, given the size of one label line
    pub month_label_extent: fn(label_line: f32) -> f32,
    /// Order of (width, height) in the viewBox
    pub view_box: fn(width: f32, height: f32) -> (f32, f32),
    /// Offset of the month label group, given the week axis extent
    pub month_label_axis_offset: fn(week_axis_extent: f32) -> Option<Point>,
}

/// Strategy table for an orientation
pub fn strategy(orientation: Orientation) -> &'static OrientationStrategy {
    match orientation {
        Orientation::Horizontal => &horizontal::STRATEGY,
        Orientation::Vertical => &vertical::STRATEGY,
    }
}

/// Distance from one cell to the next
pub fn square_size_with_gutter(gutter_size: f32) -> f32 {
    SQUARE_SIZE + gutter_size
}

/// Pixel length spanned by one week's seven cells, trailing gutter included
pub fn week_axis_extent(gutter_size: f32) -> f32 {
    DAYS_IN_WEEK as f32 * square_size_with_gutter(gutter_size)
}

/// Room reserved for month labels (0 when hidden)
pub fn month_label_extent(show_month_labels: bool, orientation: Orientation) -> f32 {
    if !show_month_labels {
        return 0.0;
    }
    (strategy(orientation).month_label_extent)(SQUARE_SIZE + MONTH_LABEL_GUTTER_SIZE)
}

/// Extent across all weeks, without a gutter after the last one
pub fn total_width(range: &DateRange, gutter_size: f32) -> f32 {
    grid::week_count(range) as f32 * square_size_with_gutter(gutter_size) - gutter_size
}

/// Extent along the week axis, month labels included
pub fn total_height(gutter_size: f32, show_month_labels: bool, orientation: Orientation) -> f32 {
    week_axis_extent(gutter_size) + month_label_extent(show_month_labels, orientation) - gutter_size
}

/// SVG viewBox size: `"{width} {height}"` when horizontal, `"{height} {width}"` when vertical
pub fn view_box(
    range: &DateRange,
    gutter_size: f32,
    show_month_labels: bool,
    orientation: Orientation,
) -> String {
    let width = total_width(range, gutter_size);
    let height = total_height(gutter_size, show_month_labels, orientation);
    let (first, second) = (strategy(orientation).view_box)(width, height);
    format!("{first} {second}")
}

/// Offset applied to a whole week's group of cells.
///
/// A horizontal grid with hidden labels takes the same branch as one with
/// labels; only the label extent drops to 0.
pub fn week_transform(
    week_index: u32,
    orientation: Orientation,
    gutter_size: f32,
    show_month_labels: bool,
) -> Point {
    (strategy(orientation).week_transform)(
        week_index,
        square_size_with_gutter(gutter_size),
        month_label_extent(show_month_labels, orientation),
    )
}

/// Position of the month label attached to a week
pub fn month_label_transform(week_index: u32, orientation: Orientation, gutter_size: f32) -> Point {
    (strategy(orientation).month_label_transform)(week_index, square_size_with_gutter(gutter_size))
}

/// Offset of the month label group: None when horizontal (labels sit above the weeks)
pub fn month_label_axis_offset(orientation: Orientation, gutter_size: f32) -> Option<Point> {
    (strategy(orientation).month_label_axis_offset)(week_axis_extent(gutter_size))
}

/// A month name placed next to the week in which the month begins
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthLabel {
    pub week_index: u32,
    pub text: String,
    pub transform: Point,
}

/// Geometry of one validated grid
#[derive(Debug, Clone, Copy)]
pub struct HeatmapGeometry {
    range: DateRange,
    sizing: SizingConfig,
    orientation: Orientation,
}

impl HeatmapGeometry {
    pub fn new(range: DateRange, sizing: SizingConfig, orientation: Orientation) -> Self {
        Self {
            range,
            sizing,
            orientation,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn week_count(&self) -> u32 {
        grid::week_count(&self.range)
    }

    pub fn width(&self) -> f32 {
        total_width(&self.range, self.sizing.gutter_size())
    }

    pub fn height(&self) -> f32 {
        total_height(
            self.sizing.gutter_size(),
            self.sizing.show_month_labels(),
            self.orientation,
        )
    }

    pub fn view_box(&self) -> String {
        view_box(
            &self.range,
            self.sizing.gutter_size(),
            self.sizing.show_month_labels(),
            self.orientation,
        )
    }

    pub fn week_transform(&self, week_index: u32) -> Point {
        week_transform(
            week_index,
            self.orientation,
            self.sizing.gutter_size(),
            self.sizing.show_month_labels(),
        )
    }

    /// Offset of the cell at a grid index inside its week group
    pub fn square_coordinates(&self, index: u32) -> Point {
        let coord = GridCoordinate::from_index(index);
        grid::coordinate_for_day_index(coord.day_index, self.orientation, self.sizing.gutter_size())
    }

    /// Absolute position of the cell at a grid index (week transform plus cell offset)
    pub fn cell_origin(&self, index: u32) -> Point {
        let week = self.week_transform(GridCoordinate::from_index(index).week_index);
        let cell = self.square_coordinates(index);
        Point::new(week.x + cell.x, week.y + cell.y)
    }

    pub fn month_labels_transform(&self) -> Option<Point> {
        month_label_axis_offset(self.orientation, self.sizing.gutter_size())
    }

    /// Month labels for every week followed by a slot in the first seven days of a month.
    ///
    /// Empty when labels are hidden.
    pub fn month_labels(&self, labels: &MonthLabels) -> Vec<MonthLabel> {
        if !self.sizing.show_month_labels() {
            return Vec::new();
        }

        (0..self.week_count().saturating_sub(1))
            .filter_map(|week_index| {
                let end_of_week = self.range.date_for_index((week_index + 1) * DAYS_IN_WEEK)?;
                if !(1..=DAYS_IN_WEEK).contains(&end_of_week.day()) {
                    return None;
                }
                Some(MonthLabel {
                    week_index,
                    text: labels.get(end_of_week.month0()).to_string(),
                    transform: month_label_transform(
                        week_index,
                        self.orientation,
                        self.sizing.gutter_size(),
                    ),
                })
            })
            .collect()
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
    use chrono::NaiveDate;

    fn range(y: i32, m: u32, d: u32, num_days: u32) -> DateRange {
        DateRange::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), num_days).unwrap()
    }

    #[test]
    fn test_basic_sizes() {
        assert_eq!(square_size_with_gutter(1.0), 11.0);
        assert_eq!(week_axis_extent(1.0), 77.0);
        assert_eq!(month_label_extent(false, Orientation::Horizontal), 0.0);
        assert_eq!(month_label_extent(true, Orientation::Horizontal), 14.0);
        assert_eq!(month_label_extent(true, Orientation::Vertical), 28.0);
    }

    #[test]
    fn test_width_has_no_trailing_gutter() {
        // Exactly one week
        let r = range(2024, 1, 13, 7);
        assert_eq!(total_width(&r, 1.0), 10.0);
        assert_eq!(total_width(&r, 0.0), 10.0);
    }

    #[test]
    fn test_height_includes_labels() {
        assert_eq!(total_height(1.0, true, Orientation::Horizontal), 77.0 + 14.0 - 1.0);
        assert_eq!(total_height(1.0, true, Orientation::Vertical), 77.0 + 28.0 - 1.0);
        assert_eq!(total_height(1.0, false, Orientation::Vertical), 76.0);
    }

    #[test]
    fn test_view_box_swaps_for_vertical() {
        let r = range(2024, 1, 31, 31);
        assert_eq!(view_box(&r, 1.0, true, Orientation::Horizontal), "54 90");
        assert_eq!(view_box(&r, 1.0, true, Orientation::Vertical), "104 54");
    }

    #[test]
    fn test_week_transform_branches() {
        assert_eq!(
            week_transform(3, Orientation::Horizontal, 1.0, true),
            Point::new(33.0, 14.0)
        );
        // Hidden labels keep the horizontal branch with a zero label extent
        assert_eq!(
            week_transform(3, Orientation::Horizontal, 1.0, false),
            Point::new(33.0, 0.0)
        );
        assert_eq!(
            week_transform(3, Orientation::Vertical, 1.0, true),
            Point::new(WEEK_LEFT_MARGIN, 33.0)
        );
        assert_eq!(
            week_transform(3, Orientation::Vertical, 1.0, false),
            Point::new(WEEK_LEFT_MARGIN, 33.0)
        );
    }

    #[test]
    fn test_month_label_transforms() {
        assert_eq!(
            month_label_transform(2, Orientation::Horizontal, 1.0),
            Point::new(22.0, 0.0)
        );
        assert_eq!(
            month_label_transform(2, Orientation::Vertical, 1.0),
            Point::new(0.0, 31.0)
        );
        assert_eq!(month_label_axis_offset(Orientation::Horizontal, 1.0), None);
        assert_eq!(
            month_label_axis_offset(Orientation::Vertical, 1.0),
            Some(Point::new(81.0, 0.0))
        );
    }

    #[test]
    fn test_cell_origin() {
        let r = range(2024, 1, 31, 31);
        let sizing = SizingConfig::new(1.0, true).unwrap();
        let geometry = HeatmapGeometry::new(r, sizing, Orientation::Horizontal);
        // Index 9 = week 1, Tuesday
        assert_eq!(geometry.cell_origin(9), Point::new(11.0, 14.0 + 22.0));

        let geometry = HeatmapGeometry::new(r, sizing, Orientation::Vertical);
        assert_eq!(geometry.cell_origin(9), Point::new(10.0 + 22.0, 11.0));
    }

    #[test]
    fn test_month_labels_mark_month_starts() {
        // Aligned grid runs Sun 2023-12-31 .. Sat 2024-03-02
        let r = range(2024, 2, 29, 60);
        let sizing = SizingConfig::new(1.0, true).unwrap();
        let geometry = HeatmapGeometry::new(r, sizing, Orientation::Horizontal);
        assert_eq!(r.aligned_start_date(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(geometry.week_count(), 9);

        let labels = geometry.month_labels(&MonthLabels::default());
        let found: Vec<(u32, &str)> = labels
            .iter()
            .map(|l| (l.week_index, l.text.as_str()))
            .collect();
        // The slot after week 0 is Jan 7, the one after week 4 is Feb 4
        assert_eq!(found, vec![(0, "Jan"), (4, "Feb")]);
        assert_eq!(labels[1].transform, Point::new(44.0, 0.0));
    }

    #[test]
    fn test_month_labels_hidden() {
        let r = range(2024, 2, 29, 60);
        let sizing = SizingConfig::new(1.0, false).unwrap();
        let geometry = HeatmapGeometry::new(r, sizing, Orientation::Vertical);
        assert!(geometry.month_labels(&MonthLabels::default()).is_empty());
    }
}
