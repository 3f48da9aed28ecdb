//! Calendar alignment of a heatmap date range.
//!
//! A range ends on an inclusive `end_date` and spans `num_days` days. The grid
//! always starts on a Sunday and ends on a Saturday, so the range is padded
//! with empty slots on both sides.
//!
//! Weekdays are numbered from Sunday (0) to Saturday (6) throughout the crate.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::{HeatgridError, Result};
use crate::grid;

/// Number of days in a calendar week
pub const DAYS_IN_WEEK: u32 = 7;

/// Day of week in the crate's numbering (0 = Sunday .. 6 = Saturday)
pub fn day_of_week(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// An inclusive range of calendar days ending on `end_date`
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Last day of the range (inclusive)
    end_date: NaiveDate,
    /// Number of real days in the range
    num_days: u32,
    /// First real day of the range
    start_date: NaiveDate,
    /// First drawn slot, always a Sunday
    aligned_start_date: NaiveDate,
}

impl DateRange {
    /// Create a validated range.
    ///
    /// # Errors
    /// Returns an error if `num_days` is zero or the aligned start date cannot
    /// be represented.
    pub fn new(end_date: NaiveDate, num_days: u32) -> Result<Self> {
        if num_days == 0 {
            return Err(HeatgridError::InvalidDayCount(num_days));
        }

        let start_date = end_date
            .checked_sub_days(Days::new(u64::from(num_days - 1)))
            .ok_or_else(|| {
                HeatgridError::DateOutOfRange(format!("{num_days} days before {end_date}"))
            })?;
        let aligned_start_date = start_date
            .checked_sub_days(Days::new(u64::from(day_of_week(start_date))))
            .ok_or_else(|| HeatgridError::DateOutOfRange(format!("week start of {start_date}")))?;

        // The last grid slot has to exist too, or date_for_index would fail there.
        end_date
            .checked_add_days(Days::new(u64::from(trailing_empty_days(end_date))))
            .ok_or_else(|| HeatgridError::DateOutOfRange(format!("week end of {end_date}")))?;

        Ok(Self {
            end_date,
            num_days,
            start_date,
            aligned_start_date,
        })
    }

    /// Last day of the range (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of real days in the range
    pub fn num_days(&self) -> u32 {
        self.num_days
    }

    /// First real day: `end_date - (num_days - 1)`
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Padding slots before the first real day
    pub fn leading_empty_days(&self) -> u32 {
        day_of_week(self.start_date)
    }

    /// Padding slots after the last real day
    pub fn trailing_empty_days(&self) -> u32 {
        trailing_empty_days(self.end_date)
    }

    /// First date drawn in the grid (a padding slot unless the range starts on Sunday)
    pub fn aligned_start_date(&self) -> NaiveDate {
        self.aligned_start_date
    }

    /// Date shown at a linear grid index, including padding slots.
    ///
    /// Returns None only when the index lies beyond the representable calendar.
    pub fn date_for_index(&self, index: u32) -> Option<NaiveDate> {
        self.aligned_start_date
            .checked_add_days(Days::new(u64::from(index)))
    }

    /// Grid index of a date, or None if it falls outside the grid.
    pub fn index_for_date(&self, date: NaiveDate) -> Option<u32> {
        let offset = date.signed_duration_since(self.aligned_start_date).num_days();
        let index = u32::try_from(offset).ok()?;
        (index < grid::total_slots(self)).then_some(index)
    }

    /// True if the slot at `index` holds a real day of the range
    pub fn is_in_range(&self, index: u32) -> bool {
        let first = self.leading_empty_days();
        index >= first && index - first < self.num_days
    }
}

fn trailing_empty_days(end_date: NaiveDate) -> u32 {
    DAYS_IN_WEEK - 1 - day_of_week(end_date)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_week_needs_no_padding() {
        // 2024-01-13 is a Saturday
        let range = DateRange::new(date(2024, 1, 13), 7).unwrap();
        assert_eq!(range.start_date(), date(2024, 1, 7));
        assert_eq!(range.leading_empty_days(), 0);
        assert_eq!(range.trailing_empty_days(), 0);
        assert_eq!(grid::week_count(&range), 1);
        assert_eq!(range.aligned_start_date(), range.start_date());
    }

    #[test]
    fn test_single_day_range() {
        // Wednesday
        let range = DateRange::new(date(2024, 1, 10), 1).unwrap();
        assert_eq!(range.start_date(), date(2024, 1, 10));
        assert_eq!(range.leading_empty_days(), 3);
        assert_eq!(range.trailing_empty_days(), 3);
        assert_eq!(grid::week_count(&range), 1);
        assert_eq!(range.aligned_start_date(), date(2024, 1, 7));
    }

    #[test]
    fn test_zero_days_rejected() {
        let err = DateRange::new(date(2024, 1, 10), 0).unwrap_err();
        assert!(matches!(err, HeatgridError::InvalidDayCount(0)));
    }

    #[test]
    fn test_range_at_calendar_minimum_rejected() {
        let err = DateRange::new(NaiveDate::MIN, 2).unwrap_err();
        assert!(matches!(err, HeatgridError::DateOutOfRange(_)));
    }

    #[test]
    fn test_index_round_trip() {
        let range = DateRange::new(date(2024, 3, 20), 30).unwrap();
        for index in 0..grid::total_slots(&range) {
            let d = range.date_for_index(index).unwrap();
            assert_eq!(range.index_for_date(d), Some(index));
        }
        assert_eq!(range.index_for_date(date(2020, 1, 1)), None);
        assert_eq!(range.index_for_date(date(2030, 1, 1)), None);
    }

    #[test]
    fn test_in_range_excludes_padding() {
        // Starts Monday 2024-01-01, ends Wednesday 2024-01-10
        let range = DateRange::new(date(2024, 1, 10), 10).unwrap();
        assert_eq!(range.leading_empty_days(), 1);
        assert!(!range.is_in_range(0));
        assert!(range.is_in_range(1));
        assert!(range.is_in_range(10));
        assert!(!range.is_in_range(11));
        assert_eq!(grid::total_slots(&range), 14);
    }
}
