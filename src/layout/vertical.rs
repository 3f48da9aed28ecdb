//! Weeks as rows, month labels in a column beside them.

use super::{
    OrientationStrategy, MONTH_LABEL_GUTTER_SIZE, VERTICAL_MONTH_LABEL_NUDGE, WEEK_LEFT_MARGIN,
};
use crate::types::Point;

pub(super) static STRATEGY: OrientationStrategy = OrientationStrategy {
    square_coordinates,
    week_transform,
    month_label_transform,
    month_label_extent,
    view_box,
    month_label_axis_offset,
};

fn square_coordinates(day_offset: f32) -> Point {
    Point::new(day_offset, 0.0)
}

// Labels never push the weeks sideways here.
fn week_transform(week_index: u32, step: f32, _month_label_extent: f32) -> Point {
    Point::new(WEEK_LEFT_MARGIN, week_index as f32 * step)
}

fn month_label_transform(week_index: u32, step: f32) -> Point {
    Point::new(0.0, (week_index + 1) as f32 * step + VERTICAL_MONTH_LABEL_NUDGE)
}

// Labels run perpendicular to the weeks and need two lines of clearance.
fn month_label_extent(label_line: f32) -> f32 {
    2.0 * label_line
}

fn view_box(width: f32, height: f32) -> (f32, f32) {
    (height, width)
}

fn month_label_axis_offset(week_axis_extent: f32) -> Option<Point> {
    Some(Point::new(week_axis_extent + MONTH_LABEL_GUTTER_SIZE, 0.0))
}
