//! Value cache, aggregation and lookup tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod fixtures;

use fixtures::{date, ValuesBuilder};
use heatgrid::calendar::DateRange;
use heatgrid::values::{
    aggregate_by_date, lookup_title, lookup_tooltip_attrs, lookup_value, TooltipSource, ValueCache,
};
use heatgrid::{HeatmapValue, TooltipQuery};
use serde_json::json;

#[test]
fn test_three_records_on_one_day() {
    let values = ValuesBuilder::new().on("2024-01-10", 3).build();
    let buckets = aggregate_by_date(&values);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].key, date("2024-01-10"));
    assert_eq!(buckets[0].count, 3);
    assert_eq!(
        serde_json::to_value(buckets[0]).unwrap(),
        json!({"key": "2024-01-10", "count": 3})
    );
}

#[test]
fn test_aggregate_empty_input() {
    assert!(aggregate_by_date(&[]).is_empty());
}

#[test]
fn test_values_deserialize_with_payload() {
    let values: Vec<HeatmapValue> = serde_json::from_str(
        r#"[{"date": "2024-01-10", "count": 4, "repo": "heatgrid"}, {"date": "2024-01-11"}]"#,
    )
    .unwrap();
    assert_eq!(values[0].date, date("2024-01-10"));
    assert_eq!(values[0].data.get("repo"), Some(&json!("heatgrid")));
    assert!(values[1].data.is_empty());
}

#[test]
fn test_cache_counts_and_payload() {
    let range = DateRange::new(date("2024-01-31"), 31).unwrap();
    let values = ValuesBuilder::new()
        .on("2024-01-05", 2)
        .with_payload("2024-01-06", "kind", json!("review"))
        .build();
    let cache = ValueCache::build(&range, &values, &TooltipSource::default(), None);

    assert_eq!(cache.len(), 2);
    let fifth = range.index_for_date(date("2024-01-05")).unwrap();
    let sixth = range.index_for_date(date("2024-01-06")).unwrap();
    assert_eq!(cache.get(fifth).unwrap().count, 2);
    assert_eq!(cache.get(sixth).unwrap().count, 1);
    assert_eq!(
        lookup_value(sixth, &cache).unwrap().data.get("kind"),
        Some(&json!("review"))
    );
    assert_eq!(cache.max_count(), 2);

    let mut indices: Vec<u32> = cache.iter().map(|(i, _)| i).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![fifth, sixth]);
}

#[test]
fn test_tooltip_for_populated_and_empty_cells() {
    let range = DateRange::new(date("2024-01-31"), 31).unwrap();
    let values = ValuesBuilder::new().on("2024-01-05", 2).build();
    let tooltip = |q: TooltipQuery<'_>| match (q.date(), q.get("event")) {
        (Some(d), Some(e)) => json!({ "data-tip": format!("event {e} on {d}") }),
        _ => json!({ "data-tip": "No data" }),
    };
    let source = TooltipSource::Computed(&tooltip);
    let cache = ValueCache::build(&range, &values, &source, None);

    // the last value of the day is the one passed along
    let fifth = range.index_for_date(date("2024-01-05")).unwrap();
    assert_eq!(
        lookup_tooltip_attrs(fifth, &cache, &source),
        json!({"data-tip": "event 1 on 2024-01-05"})
    );
    assert_eq!(
        lookup_tooltip_attrs(0, &cache, &source),
        json!({"data-tip": "No data"})
    );
}

#[test]
fn test_tooltip_sees_payload_count_not_records_per_day() {
    let range = DateRange::new(date("2024-01-31"), 31).unwrap();
    let values = ValuesBuilder::new()
        .with_payload("2024-01-10", "count", json!(12))
        .build();
    let tooltip = |q: TooltipQuery<'_>| match q.get("count") {
        Some(count) => json!({ "data-tip": format!("{count} commits") }),
        None => json!({ "data-tip": "No commits" }),
    };
    let source = TooltipSource::Computed(&tooltip);
    let cache = ValueCache::build(&range, &values, &source, None);

    let tenth = range.index_for_date(date("2024-01-10")).unwrap();
    assert_eq!(cache.get(tenth).unwrap().count, 1);
    assert_eq!(
        lookup_tooltip_attrs(tenth, &cache, &source),
        json!({"data-tip": "12 commits"})
    );
    assert_eq!(
        lookup_tooltip_attrs(0, &cache, &source),
        json!({"data-tip": "No commits"})
    );
}

#[test]
fn test_empty_cell_query_serializes_as_null_date_and_count() {
    assert_eq!(
        serde_json::to_value(TooltipQuery::Empty).unwrap(),
        json!({"date": null, "count": null})
    );
    let value = HeatmapValue::new(date("2024-01-10")).with("count", 12);
    assert_eq!(
        serde_json::to_value(TooltipQuery::Value(&value)).unwrap(),
        json!({"date": "2024-01-10", "count": 12})
    );
}

#[test]
fn test_static_tooltip_is_returned_as_is() {
    let cache = ValueCache::new();
    let source = TooltipSource::Static(json!({"data-tip": "static"}));
    assert_eq!(
        lookup_tooltip_attrs(3, &cache, &source),
        json!({"data-tip": "static"})
    );
    assert_eq!(
        lookup_tooltip_attrs(3, &cache, &TooltipSource::default()),
        serde_json::Value::Null
    );
}

#[test]
fn test_titles() {
    let range = DateRange::new(date("2024-01-31"), 31).unwrap();
    let values = ValuesBuilder::new().on("2024-01-05", 1).build();
    let title = |v: Option<&HeatmapValue>| -> Option<String> {
        Some(match v {
            Some(v) => format!("Activity on {}", v.date),
            None => "No activity".to_string(),
        })
    };
    let cache = ValueCache::build(&range, &values, &TooltipSource::default(), Some(&title));
    let fifth = range.index_for_date(date("2024-01-05")).unwrap();

    assert_eq!(
        lookup_title(fifth, &cache, Some(&title)).as_deref(),
        Some("Activity on 2024-01-05")
    );
    assert_eq!(lookup_title(1, &cache, Some(&title)).as_deref(), Some("No activity"));
    assert_eq!(lookup_title(1, &cache, None), None);
    // Cached without a title callback: stays untitled
    let untitled = ValueCache::build(&range, &values, &TooltipSource::default(), None);
    assert_eq!(lookup_title(fifth, &untitled, Some(&title)), None);
}
