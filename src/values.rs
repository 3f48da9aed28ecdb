//! Sparse per-index value cache and its lookups.
//!
//! Only grid indices holding a caller value have an entry. Every lookup has a
//! defined answer for missing indices, so callers never need to check first.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::calendar::DateRange;
use crate::types::{CountedBucket, HeatmapValue, TooltipAttrs, TooltipQuery, ValueRecord};

/// Source of tooltip data attributes: a fixed value or a callback
pub enum TooltipSource<'a> {
    Static(TooltipAttrs),
    Computed(&'a dyn Fn(TooltipQuery<'_>) -> TooltipAttrs),
}

impl Default for TooltipSource<'_> {
    fn default() -> Self {
        Self::Static(TooltipAttrs::Null)
    }
}

impl TooltipSource<'_> {
    /// Attributes for a query: the callback's answer, or the static value
    pub fn resolve(&self, query: TooltipQuery<'_>) -> TooltipAttrs {
        match self {
            Self::Static(attrs) => attrs.clone(),
            Self::Computed(f) => f(query),
        }
    }
}

/// Callback producing a cell title; receives None for empty cells
pub type TitleFn<'a> = &'a dyn Fn(Option<&HeatmapValue>) -> Option<String>;

/// Count values per calendar date, in order of first appearance
pub fn aggregate_by_date(values: &[HeatmapValue]) -> Vec<CountedBucket> {
    let mut buckets: Vec<CountedBucket> = Vec::new();
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();

    for value in values {
        match positions.get(&value.date).and_then(|&i| buckets.get_mut(i)) {
            Some(bucket) => bucket.count += 1,
            None => {
                positions.insert(value.date, buckets.len());
                buckets.push(CountedBucket {
                    key: value.date,
                    count: 1,
                });
            }
        }
    }

    buckets
}

/// Cached records keyed by linear grid index
#[derive(Debug, Clone, Default)]
pub struct ValueCache {
    records: HashMap<u32, ValueRecord>,
}

impl ValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index caller values against a range.
    ///
    /// Values dated outside the range (padding slots included) are skipped.
    /// When several values share a date, the last one provides the cached
    /// value, title and tooltip while `count` covers all of them.
    pub fn build(
        range: &DateRange,
        values: &[HeatmapValue],
        tooltip: &TooltipSource<'_>,
        title_for_value: Option<TitleFn<'_>>,
    ) -> Self {
        let counts: HashMap<NaiveDate, u32> = aggregate_by_date(values)
            .into_iter()
            .map(|bucket| (bucket.key, bucket.count))
            .collect();

        let mut cache = Self::new();
        let mut skipped = 0usize;

        for value in values {
            let Some(index) = range
                .index_for_date(value.date)
                .filter(|&i| range.is_in_range(i))
            else {
                log::debug!(
                    "skipping value dated {} outside {}..={}",
                    value.date,
                    range.start_date(),
                    range.end_date()
                );
                skipped += 1;
                continue;
            };

            let count = counts.get(&value.date).copied().unwrap_or(1);
            let record = ValueRecord {
                date: value.date,
                value: value.clone(),
                count,
                tooltip_data_attrs: tooltip.resolve(TooltipQuery::Value(value)),
                title: title_for_value.and_then(|f| f(Some(value))),
            };
            cache.insert(index, record);
        }

        log::trace!(
            "value cache: {} populated cells, {} values skipped",
            cache.len(),
            skipped
        );
        cache
    }

    pub fn insert(&mut self, index: u32, record: ValueRecord) {
        self.records.insert(index, record);
    }

    pub fn get(&self, index: u32) -> Option<&ValueRecord> {
        self.records.get(&index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Populated entries, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ValueRecord)> {
        self.records.iter().map(|(&index, record)| (index, record))
    }

    /// Highest count among populated entries, 0 when empty
    pub fn max_count(&self) -> u32 {
        self.records.values().map(|r| r.count).max().unwrap_or(0)
    }
}

/// The caller's value at an index, or None
pub fn lookup_value(index: u32, cache: &ValueCache) -> Option<&HeatmapValue> {
    cache.get(index).map(|record| &record.value)
}

/// Cached tooltip attributes, or the source's answer for an empty cell
pub fn lookup_tooltip_attrs(
    index: u32,
    cache: &ValueCache,
    tooltip: &TooltipSource<'_>,
) -> TooltipAttrs {
    match cache.get(index) {
        Some(record) => record.tooltip_data_attrs.clone(),
        None => tooltip.resolve(TooltipQuery::Empty),
    }
}

/// Cached title, or the callback's title for an empty cell
pub fn lookup_title(
    index: u32,
    cache: &ValueCache,
    title_for_value: Option<TitleFn<'_>>,
) -> Option<String> {
    match cache.get(index) {
        Some(record) => record.title.clone(),
        None => title_for_value.and_then(|f| f(None)),
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
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_aggregate_same_day() {
        let values = vec![
            HeatmapValue::new(date(2024, 1, 10)),
            HeatmapValue::new(date(2024, 1, 10)),
            HeatmapValue::new(date(2024, 1, 10)),
        ];
        let buckets = aggregate_by_date(&values);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key.to_string(), "2024-01-10");
        assert_eq!(buckets[0].count, 3);
    }

    #[test]
    fn test_aggregate_keeps_first_appearance_order() {
        let values = vec![
            HeatmapValue::new(date(2024, 1, 12)),
            HeatmapValue::new(date(2024, 1, 3)),
            HeatmapValue::new(date(2024, 1, 12)),
            HeatmapValue::new(date(2024, 1, 8)),
        ];
        let keys: Vec<(NaiveDate, u32)> = aggregate_by_date(&values)
            .into_iter()
            .map(|b| (b.key, b.count))
            .collect();
        assert_eq!(
            keys,
            vec![
                (date(2024, 1, 12), 2),
                (date(2024, 1, 3), 1),
                (date(2024, 1, 8), 1)
            ]
        );
    }

    #[test]
    fn test_build_skips_out_of_range_values() {
        // Monday 2024-01-01 .. Wednesday 2024-01-10, aligned start Sunday 2023-12-31
        let range = DateRange::new(date(2024, 1, 10), 10).unwrap();
        let values = vec![
            HeatmapValue::new(date(2023, 12, 31)),
            HeatmapValue::new(date(2024, 1, 1)),
            HeatmapValue::new(date(2024, 1, 11)),
        ];
        let cache = ValueCache::build(&range, &values, &TooltipSource::default(), None);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(0).is_none());
        assert_eq!(cache.get(1).unwrap().date, date(2024, 1, 1));
    }

    #[test]
    fn test_build_last_value_wins_but_counts_all() {
        let range = DateRange::new(date(2024, 1, 13), 7).unwrap();
        let values = vec![
            HeatmapValue::new(date(2024, 1, 9)).with("note", "first"),
            HeatmapValue::new(date(2024, 1, 9)).with("note", "second"),
        ];
        let cache = ValueCache::build(&range, &values, &TooltipSource::default(), None);
        let record = cache.get(2).unwrap();
        assert_eq!(record.count, 2);
        assert_eq!(record.value.data.get("note"), Some(&json!("second")));
        assert_eq!(cache.max_count(), 2);
    }

    #[test]
    fn test_lookups_for_missing_index() {
        let cache = ValueCache::new();
        assert!(lookup_value(5, &cache).is_none());
        assert_eq!(lookup_title(5, &cache, None), None);

        let title = |v: Option<&HeatmapValue>| match v {
            Some(v) => Some(format!("value on {}", v.date)),
            None => Some("no data".to_string()),
        };
        assert_eq!(lookup_title(5, &cache, Some(&title)), Some("no data".to_string()));

        let fixed = TooltipSource::Static(json!({"data-tip": "static"}));
        assert_eq!(
            lookup_tooltip_attrs(5, &cache, &fixed),
            json!({"data-tip": "static"})
        );

        let computed = |q: TooltipQuery<'_>| serde_json::to_value(q).unwrap();
        let computed = TooltipSource::Computed(&computed);
        assert_eq!(
            lookup_tooltip_attrs(5, &cache, &computed),
            json!({"date": null, "count": null})
        );
    }

    #[test]
    fn test_lookups_for_cached_index() {
        let range = DateRange::new(date(2024, 1, 13), 7).unwrap();
        let values = vec![HeatmapValue::new(date(2024, 1, 8)).with("count", 4)];
        let tooltip =
            |q: TooltipQuery<'_>| json!({ "data-count": q.get("count"), "date": q.date() });
        let title = |v: Option<&HeatmapValue>| v.map(|v| v.date.format("%b %-d").to_string());
        let cache = ValueCache::build(
            &range,
            &values,
            &TooltipSource::Computed(&tooltip),
            Some(&title),
        );

        assert_eq!(lookup_value(1, &cache), values.first());
        assert_eq!(
            lookup_title(1, &cache, Some(&title)),
            Some("Jan 8".to_string())
        );
        assert_eq!(
            lookup_tooltip_attrs(1, &cache, &TooltipSource::default()),
            json!({"data-count": 4, "date": "2024-01-08"})
        );
    }
}
