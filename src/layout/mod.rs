//! Geometry engine for the heatmap grid.
//!
//! This module handles:
//! - Cell offsets inside a week and week offsets inside the grid
//! - Overall width, height and SVG viewBox
//! - Month label placement
//!
//! Every orientation-dependent formula lives in one of two strategy tables
//! (`horizontal`, `vertical`) selected by [`strategy`], so the two layouts can
//! be read side by side.

mod geometry;
mod horizontal;
mod vertical;

pub use geometry::{
    month_label_axis_offset, month_label_extent, month_label_transform, square_size_with_gutter,
    strategy, total_height, total_width, view_box, week_axis_extent, week_transform,
    HeatmapGeometry, MonthLabel, OrientationStrategy, MONTH_LABEL_GUTTER_SIZE,
    VERTICAL_MONTH_LABEL_NUDGE, WEEK_LEFT_MARGIN,
};
