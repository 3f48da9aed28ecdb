//! Tests for the exported JavaScript surface.
//!
//! Run with: wasm-pack test --node
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use heatgrid::{compute_heatmap, compute_heatmap_json, version};
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

fn to_js(value: &Value) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap()
}

#[wasm_bindgen_test]
fn test_version() {
    assert_eq!(version(), env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen_test]
fn test_compute_heatmap_json() {
    let out = compute_heatmap_json(
        r#"{"endDate": "2024-01-13", "numDays": 7}"#,
        r##"["#eee", "#0a0"]"##,
        r#"[{"date": "2024-01-10"}]"#,
    )
    .unwrap();
    let layout: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(layout["viewBox"], "10 90");
}

#[wasm_bindgen_test]
fn test_compute_heatmap_json_reports_errors() {
    let err = compute_heatmap_json(r#"{"endDate": "2024-01-13", "numDays": 0}"#, "[]", "[]")
        .unwrap_err();
    assert!(err.as_string().is_some());
}

#[wasm_bindgen_test]
fn test_compute_heatmap_with_callbacks() {
    let tooltip = js_sys::Function::new_with_args(
        "q",
        "return { 'data-tip': q.count === null ? 'none' : q.count + ' on ' + q.date };",
    );
    let title =
        js_sys::Function::new_with_args("v", "return v === null ? 'empty' : 'day ' + v.date;");

    let result = compute_heatmap(
        to_js(&json!({"endDate": "2024-01-13", "numDays": 7})),
        to_js(&json!(["#eee", "#0a0"])),
        to_js(&json!([
            {"date": "2024-01-10", "count": 12},
            {"date": "2024-01-10", "count": 3}
        ])),
        tooltip.into(),
        Some(title),
    )
    .unwrap();
    let layout: Value = serde_wasm_bindgen::from_value(result).unwrap();

    let cells = &layout["weeks"][0]["cells"];
    assert_eq!(cells[3]["tooltipDataAttrs"]["data-tip"], "3 on 2024-01-10");
    assert_eq!(cells[3]["title"], "day 2024-01-10");
    assert_eq!(cells[0]["tooltipDataAttrs"]["data-tip"], "none");
    assert_eq!(cells[0]["title"], "empty");
}

#[wasm_bindgen_test]
fn test_compute_heatmap_with_static_tooltip() {
    let result = compute_heatmap(
        to_js(&json!({"endDate": "2024-01-13", "numDays": 7})),
        to_js(&json!(["#eee", "#0a0"])),
        to_js(&json!([])),
        to_js(&json!({"data-tip": "static"})),
        None,
    )
    .unwrap();
    let layout: Value = serde_wasm_bindgen::from_value(result).unwrap();
    assert_eq!(
        layout["weeks"][0]["cells"][5]["tooltipDataAttrs"]["data-tip"],
        "static"
    );
}

#[wasm_bindgen_test]
fn test_throwing_tooltip_fails_the_pass() {
    let tooltip = js_sys::Function::new_with_args("q", "throw new Error('tooltip broke');");
    let err = compute_heatmap(
        to_js(&json!({"endDate": "2024-01-13", "numDays": 7})),
        to_js(&json!(["#eee", "#0a0"])),
        to_js(&json!([{"date": "2024-01-10"}])),
        tooltip.into(),
        None,
    )
    .unwrap_err();
    let error: js_sys::Error = err.dyn_into().unwrap();
    assert_eq!(String::from(error.message()), "tooltip broke");
}

#[wasm_bindgen_test]
fn test_non_string_title_fails_the_pass() {
    let title = js_sys::Function::new_with_args("v", "return 42;");
    let err = compute_heatmap(
        to_js(&json!({"endDate": "2024-01-13", "numDays": 7})),
        to_js(&json!(["#eee", "#0a0"])),
        to_js(&json!([])),
        JsValue::UNDEFINED,
        Some(title),
    )
    .unwrap_err();
    assert_eq!(
        err.as_string().as_deref(),
        Some("titleForValue must return a string")
    );
}
