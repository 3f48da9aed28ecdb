//! heatgrid - calendar heatmap layout for the web
//!
//! Computes everything needed to draw a contribution-style calendar heatmap:
//! - Week-aligned grid with leading/trailing padding slots
//! - Cell, week and month label positions for horizontal or vertical grids
//! - SVG width, height and viewBox
//! - Discrete color level per cell from the distribution of daily counts
//!
//! Rendering is left to the caller. Every function is a pure computation over
//! its inputs and is cheap enough to rerun on every change.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { computeHeatmap } from 'heatgrid';
//! await init();
//! const layout = computeHeatmap(
//!   { endDate: '2024-06-30', numDays: 365 },
//!   ['#ebedf0', '#9be9a8', '#40c463', '#30a14e', '#216e39'],
//!   values,
//!   (v) => ({ 'data-tip': v.date === null ? 'No events' : `${v.count} events on ${v.date}` }),
//! );
//! ```

pub mod calendar;
pub mod color;
pub mod error;
pub mod grid;
pub mod heatmap;
pub mod layout;
pub mod types;
pub mod values;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub use calendar::DateRange;
pub use error::{HeatgridError, Result};
pub use heatmap::{compute, HeatmapCell, HeatmapLayout, HeatmapWeek};
pub use types::*;
pub use values::{TooltipSource, ValueCache};

/// Compute a heatmap layout from JavaScript values.
///
/// # Arguments
/// * `options` - Heatmap options (`endDate` required, see `HeatmapOptions`)
/// * `colors` - Array of CSS colors, "no data" color first
/// * `values` - Array of objects with a `date` field
/// * `tooltip_data_attrs` - Static attributes object, or a function called with the cell's value
///   (`{date: null, count: null}` for empty cells)
/// * `title_for_value` - Optional function called with a value (or null) returning a title
///
/// # Errors
/// Returns an error if an input cannot be read, the options are invalid, or a
/// callback throws or returns something unusable. The first callback failure
/// is reported.
#[wasm_bindgen(js_name = "computeHeatmap")]
pub fn compute_heatmap(
    options: JsValue,
    colors: JsValue,
    values: JsValue,
    tooltip_data_attrs: JsValue,
    title_for_value: Option<js_sys::Function>,
) -> std::result::Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let options: HeatmapOptions = serde_wasm_bindgen::from_value(options)?;
    let scale: ColorScale = serde_wasm_bindgen::from_value(colors)?;
    let values: Vec<HeatmapValue> = serde_wasm_bindgen::from_value(values)?;

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();

    // First callback failure; later callbacks are skipped
    let failure: RefCell<Option<JsValue>> = RefCell::new(None);
    let record_failure = |e: JsValue| {
        failure.borrow_mut().get_or_insert(e);
    };

    let tooltip_fn = tooltip_data_attrs.dyn_ref::<js_sys::Function>().cloned();
    let call_tooltip = |query: TooltipQuery<'_>| -> std::result::Result<TooltipAttrs, JsValue> {
        let Some(f) = tooltip_fn.as_ref() else {
            return Ok(TooltipAttrs::Null);
        };
        let arg = serde::Serialize::serialize(&query, &serializer)?;
        let attrs = f.call1(&JsValue::NULL, &arg)?;
        if attrs.is_undefined() || attrs.is_null() {
            return Ok(TooltipAttrs::Null);
        }
        Ok(serde_wasm_bindgen::from_value(attrs)?)
    };
    let resolve_tooltip = |query: TooltipQuery<'_>| -> TooltipAttrs {
        if failure.borrow().is_some() {
            return TooltipAttrs::Null;
        }
        call_tooltip(query).unwrap_or_else(|e| {
            record_failure(e);
            TooltipAttrs::Null
        })
    };
    let tooltip = if tooltip_fn.is_some() {
        TooltipSource::Computed(&resolve_tooltip)
    } else if tooltip_data_attrs.is_undefined() || tooltip_data_attrs.is_null() {
        TooltipSource::default()
    } else {
        TooltipSource::Static(serde_wasm_bindgen::from_value(tooltip_data_attrs)?)
    };

    let call_title =
        |value: Option<&HeatmapValue>| -> std::result::Result<Option<String>, JsValue> {
            let Some(f) = title_for_value.as_ref() else {
                return Ok(None);
            };
            let arg = match value {
                Some(v) => serde::Serialize::serialize(v, &serializer)?,
                None => JsValue::NULL,
            };
            let title = f.call1(&JsValue::NULL, &arg)?;
            if title.is_undefined() || title.is_null() {
                return Ok(None);
            }
            title
                .as_string()
                .map(Some)
                .ok_or_else(|| JsValue::from_str("titleForValue must return a string"))
        };
    let resolve_title = |value: Option<&HeatmapValue>| -> Option<String> {
        if failure.borrow().is_some() {
            return None;
        }
        call_title(value).unwrap_or_else(|e| {
            record_failure(e);
            None
        })
    };
    let title: Option<values::TitleFn<'_>> = if title_for_value.is_some() {
        Some(&resolve_title)
    } else {
        None
    };

    let layout = heatmap::compute(&options, &scale, &values, &tooltip, title)?;
    if let Some(e) = failure.take() {
        return Err(e);
    }
    Ok(serde::Serialize::serialize(&layout, &serializer)?)
}

/// Compute a heatmap layout from JSON strings and return it as a JSON string.
///
/// # Errors
/// Returns an error if an input cannot be parsed or the options are invalid.
#[wasm_bindgen(js_name = "computeHeatmapJson")]
pub fn compute_heatmap_json(
    options_json: &str,
    colors_json: &str,
    values_json: &str,
) -> std::result::Result<String, JsValue> {
    heatmap::compute_json(options_json, colors_json, values_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
