//! End-to-end layout pass tests.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod fixtures;

use fixtures::{date, github_scale, numbered_scale, options, ValuesBuilder};
use heatgrid::{compute, HeatmapValue, Orientation, Point, TooltipQuery, TooltipSource};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_week_ending_saturday() {
    let layout = compute(
        &options("2024-01-13", 7),
        &numbered_scale(5),
        &[],
        &TooltipSource::default(),
        None,
    )
    .unwrap();

    assert_eq!(layout.weeks.len(), 1);
    assert_eq!(layout.cells().count(), 7);
    assert_eq!(layout.cell(0).unwrap().date, Some(date("2024-01-07")));
    assert!(layout.cells().all(|c| c.color == "c0" && c.value.is_none()));
}

#[test]
fn test_cell_positions_per_orientation() {
    let mut opts = options("2024-01-31", 31);
    let scale = github_scale();

    let layout = compute(&opts, &scale, &[], &TooltipSource::default(), None).unwrap();
    assert_eq!(layout.orientation, Orientation::Horizontal);
    assert_eq!(layout.weeks[2].transform, Point::new(22.0, 14.0));
    let cell = layout.cell(17).unwrap();
    assert_eq!((cell.x, cell.y), (0.0, 33.0));
    assert_eq!(cell.day_index, 3);

    opts.horizontal = false;
    let layout = compute(&opts, &scale, &[], &TooltipSource::default(), None).unwrap();
    assert_eq!(layout.orientation, Orientation::Vertical);
    assert_eq!(layout.weeks[2].transform, Point::new(10.0, 22.0));
    let cell = layout.cell(17).unwrap();
    assert_eq!((cell.x, cell.y), (33.0, 0.0));
    assert_eq!(layout.month_labels_transform, Some(Point::new(81.0, 0.0)));
}

#[test]
fn test_colors_titles_and_tooltips() {
    let opts = options("2024-01-31", 31);
    let values = ValuesBuilder::new()
        .on("2024-01-03", 1)
        .on("2024-01-04", 4)
        .on("2024-01-05", 8)
        .build();
    let tooltip = |q: TooltipQuery<'_>| json!({ "data-event": q.get("event") });
    let title = |v: Option<&HeatmapValue>| v.map(|v| v.date.format("%Y-%m-%d").to_string());
    let layout = compute(
        &opts,
        &github_scale(),
        &values,
        &TooltipSource::Computed(&tooltip),
        Some(&title),
    )
    .unwrap();

    // 4 levels, max 8 -> step 2
    let third = layout.cell(3).unwrap();
    assert_eq!(third.color, "#9be9a8");
    assert_eq!(third.level, 1);
    assert_eq!(third.title.as_deref(), Some("2024-01-03"));
    assert_eq!(third.tooltip_data_attrs, json!({"data-event": 0}));

    assert_eq!(layout.cell(4).unwrap().level, 2);
    assert_eq!(layout.cell(5).unwrap().color, "#216e39");

    let empty = layout.cell(6).unwrap();
    assert_eq!(empty.color, "#ebedf0");
    assert_eq!(empty.title, None);
    assert_eq!(empty.tooltip_data_attrs, json!({"data-event": null}));
}

#[test]
fn test_hidden_labels_shrink_height() {
    let mut opts = options("2024-06-30", 200);
    let scale = github_scale();
    let with_labels = compute(&opts, &scale, &[], &TooltipSource::default(), None).unwrap();
    opts.show_month_labels = false;
    let without = compute(&opts, &scale, &[], &TooltipSource::default(), None).unwrap();

    assert_eq!(with_labels.height - without.height, 14.0);
    assert_eq!(with_labels.width, without.width);
    assert!(!with_labels.month_labels.is_empty());
    assert!(without.month_labels.is_empty());
    assert_eq!(without.weeks[0].transform, Point::ORIGIN);
}

#[test]
fn test_recomputing_gives_identical_layout() {
    let opts = options("2024-06-30", 120);
    let values = ValuesBuilder::new().on("2024-05-01", 2).build();
    let a = compute(&opts, &github_scale(), &values, &TooltipSource::default(), None).unwrap();
    let b = compute(&opts, &github_scale(), &values, &TooltipSource::default(), None).unwrap();
    assert_eq!(a, b);
}

proptest! {
    #[test]
    fn prop_every_real_day_is_emitted_once(
        offset in 0u64..20_000,
        num_days in 1u32..400,
        horizontal in any::<bool>(),
        show_out_of_range in any::<bool>(),
    ) {
        let end = date("1990-01-01") + chrono::Days::new(offset);
        let mut opts = heatgrid::HeatmapOptions::new(end);
        opts.num_days = num_days;
        opts.horizontal = horizontal;
        opts.show_out_of_range_days = show_out_of_range;
        let layout = compute(&opts, &github_scale(), &[], &TooltipSource::default(), None).unwrap();

        let in_range = layout.cells().filter(|c| c.in_range).count();
        prop_assert_eq!(in_range, num_days as usize);
        if show_out_of_range {
            prop_assert_eq!(layout.cells().count(), layout.weeks.len() * 7);
        } else {
            prop_assert_eq!(layout.cells().count(), num_days as usize);
        }
        let last = layout.cells().filter(|c| c.in_range).last().unwrap();
        prop_assert_eq!(last.date, Some(end));
    }

    #[test]
    fn prop_unpopulated_cells_use_no_data_color(
        days in proptest::collection::vec(0u64..60, 0..30),
    ) {
        let opts = options("2024-03-31", 60);
        let values: Vec<HeatmapValue> = days
            .iter()
            .map(|&d| HeatmapValue::new(date("2024-02-01") + chrono::Days::new(d)))
            .collect();
        let layout =
            compute(&opts, &github_scale(), &values, &TooltipSource::default(), None).unwrap();
        for cell in layout.cells() {
            if cell.value.is_none() {
                prop_assert_eq!(cell.color.as_str(), "#ebedf0");
                prop_assert_eq!(cell.level, 0);
            } else {
                prop_assert!(cell.level >= 1);
            }
        }
    }
}
