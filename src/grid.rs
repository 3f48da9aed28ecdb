//! Linear grid indices and their week/day coordinates.
//!
//! Slot `i` of the aligned grid sits in week `i / 7` on weekday `i % 7`.

use serde::{Deserialize, Serialize};

use crate::calendar::{DateRange, DAYS_IN_WEEK};
use crate::layout;
use crate::types::{Orientation, Point};

/// Number of weeks (columns when horizontal, rows when vertical) the range spans.
///
/// Always at least 1 for a valid range.
pub fn week_count(range: &DateRange) -> u32 {
    let slots = range.num_days() + range.leading_empty_days() + range.trailing_empty_days();
    slots.div_ceil(DAYS_IN_WEEK)
}

/// Number of slots in the aligned grid, padding included
pub fn total_slots(range: &DateRange) -> u32 {
    week_count(range) * DAYS_IN_WEEK
}

/// Position of a slot within the week grid
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct GridCoordinate {
    pub week_index: u32,
    /// Weekday, 0 = Sunday
    pub day_index: u32,
}

impl GridCoordinate {
    pub const fn from_index(index: u32) -> Self {
        Self {
            week_index: index / DAYS_IN_WEEK,
            day_index: index % DAYS_IN_WEEK,
        }
    }

    pub const fn index(self) -> u32 {
        self.week_index * DAYS_IN_WEEK + self.day_index
    }
}

/// Offset of a day's cell inside its week group.
///
/// Days stack along the axis perpendicular to the week axis: downwards when
/// horizontal, rightwards when vertical.
pub fn coordinate_for_day_index(
    day_index: u32,
    orientation: Orientation,
    gutter_size: f32,
) -> Point {
    let step = layout::square_size_with_gutter(gutter_size);
    (layout::strategy(orientation).square_coordinates)(day_index as f32 * step)
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

    #[test]
    fn test_coordinate_round_trip() {
        for index in 0..70 {
            let coord = GridCoordinate::from_index(index);
            assert!(coord.day_index < 7);
            assert_eq!(coord.index(), index);
        }
        assert_eq!(
            GridCoordinate::from_index(15),
            GridCoordinate {
                week_index: 2,
                day_index: 1
            }
        );
    }

    #[test]
    fn test_week_count_with_padding() {
        // Monday 2024-01-01 .. Wednesday 2024-01-31: 1 + 31 + 3 = 35 slots
        let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let range = DateRange::new(end, 31).unwrap();
        assert_eq!(week_count(&range), 5);
        assert_eq!(total_slots(&range), 35);
    }

    #[test]
    fn test_day_offsets_follow_orientation() {
        assert_eq!(
            coordinate_for_day_index(3, Orientation::Horizontal, 1.0),
            Point::new(0.0, 33.0)
        );
        assert_eq!(
            coordinate_for_day_index(3, Orientation::Vertical, 1.0),
            Point::new(33.0, 0.0)
        );
        assert_eq!(
            coordinate_for_day_index(0, Orientation::Vertical, 4.0),
            Point::ORIGIN
        );
    }
}
