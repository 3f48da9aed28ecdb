//! Quantization of cell counts into color levels.
//!
//! The populated cell with the highest count always lands on the top level.
//! Lower counts fill the levels in equal integer steps of
//! `ceil(max_count / level_count)`, which can leave upper levels unused when
//! the maximum is small.
//!
//! When `max_count` is below the level count this differs on purpose from a
//! plain step scan, which would leave the busiest cell on a low level.

use crate::types::ColorScale;
use crate::values::ValueCache;

/// Level for a count, in `1..=level_count`.
///
/// A count reaching a non-zero `max_count` is always the top level. Other
/// counts take the first threshold `step * i` they fit under, falling back to
/// the top level when they exceed all of them. With no levels at all the
/// result is 0, the "no data" level. A `max_count` of 0 gives a step of 0,
/// putting a zero count on level 1 and anything above it on the top level.
pub fn color_level(count: u32, level_count: usize, max_count: u32) -> usize {
    let Ok(levels) = u32::try_from(level_count) else {
        return level_count;
    };
    if levels == 0 {
        return 0;
    }
    if max_count > 0 && count >= max_count {
        return level_count;
    }

    let step = max_count.div_ceil(levels);
    (1..=levels)
        .find(|&i| count <= step.saturating_mul(i))
        .and_then(|i| usize::try_from(i).ok())
        .unwrap_or(level_count)
}

/// Color for a populated cell's count
pub fn find_color_level(count: u32, scale: &ColorScale, max_count: u32) -> &str {
    let level = color_level(count, scale.level_count(), max_count);
    scale.color(level).unwrap_or_else(|| scale.top())
}

/// Fill color for a grid index; "no data" when the index has no record.
///
/// Recomputes the maximum over the whole cache. Use [`ColorLevelAssigner`]
/// when coloring every cell of a pass.
pub fn fill_color<'a>(index: u32, cache: &ValueCache, scale: &'a ColorScale) -> &'a str {
    ColorLevelAssigner::new(scale, cache).color_for_index(index, cache)
}

/// Assigns colors for one layout pass, with the maximum count computed once
#[derive(Debug, Clone, Copy)]
pub struct ColorLevelAssigner<'a> {
    scale: &'a ColorScale,
    max_count: u32,
}

impl<'a> ColorLevelAssigner<'a> {
    /// Take the maximum count from the cache's populated cells
    pub fn new(scale: &'a ColorScale, cache: &ValueCache) -> Self {
        Self {
            scale,
            max_count: cache.max_count(),
        }
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Level for a grid index (0 when the index has no record)
    pub fn level_for_index(&self, index: u32, cache: &ValueCache) -> usize {
        match cache.get(index) {
            Some(record) => color_level(record.count, self.scale.level_count(), self.max_count),
            None => 0,
        }
    }

    pub fn color_for_index(&self, index: u32, cache: &ValueCache) -> &'a str {
        match cache.get(index) {
            Some(record) => find_color_level(record.count, self.scale, self.max_count),
            None => self.scale.no_data(),
        }
    }
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
    use crate::types::{HeatmapValue, ValueRecord};
    use chrono::NaiveDate;
    use serde_json::Value;

    fn scale(n: usize) -> ColorScale {
        ColorScale::new((0..n).map(|i| format!("c{i}")).collect()).unwrap()
    }

    fn record(count: u32) -> ValueRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ValueRecord {
            date,
            value: HeatmapValue::new(date),
            count,
            tooltip_data_attrs: Value::Null,
            title: None,
        }
    }

    #[test]
    fn test_four_color_scale_steps() {
        let s = scale(4);
        assert_eq!(find_color_level(1, &s, 10), "c1");
        assert_eq!(find_color_level(4, &s, 10), "c1");
        assert_eq!(find_color_level(5, &s, 10), "c2");
        assert_eq!(find_color_level(8, &s, 10), "c2");
        assert_eq!(find_color_level(9, &s, 10), "c3");
        assert_eq!(find_color_level(10, &s, 10), "c3");
    }

    #[test]
    fn test_count_above_all_thresholds_falls_back_to_top() {
        assert_eq!(color_level(50, 3, 10), 3);
        assert_eq!(color_level(u32::MAX, 4, u32::MAX), 4);
    }

    #[test]
    fn test_maximum_below_level_count_still_reaches_top() {
        // step = 1, yet the busiest cell must not stop at level 1
        assert_eq!(color_level(1, 4, 1), 4);
        assert_eq!(color_level(5, 4, 5), 4);
        assert_eq!(color_level(4, 4, 5), 2);
        assert_eq!(color_level(1, 4, 5), 1);
    }

    #[test]
    fn test_zero_max_count() {
        assert_eq!(color_level(0, 4, 0), 1);
        assert_eq!(color_level(3, 4, 0), 4);
    }

    #[test]
    fn test_no_levels() {
        assert_eq!(color_level(3, 0, 10), 0);
    }

    #[test]
    fn test_assigner_uses_populated_cells_only() {
        let s = scale(5);
        let mut cache = ValueCache::new();
        cache.insert(3, record(2));
        cache.insert(9, record(8));

        let assigner = ColorLevelAssigner::new(&s, &cache);
        assert_eq!(assigner.max_count(), 8);
        assert_eq!(assigner.color_for_index(9, &cache), "c4");
        assert_eq!(assigner.color_for_index(3, &cache), "c1");
        assert_eq!(assigner.color_for_index(4, &cache), "c0");
        assert_eq!(assigner.level_for_index(4, &cache), 0);
        assert_eq!(fill_color(9, &cache, &s), "c4");
        assert_eq!(fill_color(100, &cache, &s), "c0");
    }
}
