//! Weeks as columns, month labels in a row above them.

use super::OrientationStrategy;
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
    Point::new(0.0, day_offset)
}

fn week_transform(week_index: u32, step: f32, month_label_extent: f32) -> Point {
    Point::new(week_index as f32 * step, month_label_extent)
}

fn month_label_transform(week_index: u32, step: f32) -> Point {
    Point::new(week_index as f32 * step, 0.0)
}

fn month_label_extent(label_line: f32) -> f32 {
    label_line
}

fn view_box(width: f32, height: f32) -> (f32, f32) {
    (width, height)
}

fn month_label_axis_offset(_week_axis_extent: f32) -> Option<Point> {
    None
}
