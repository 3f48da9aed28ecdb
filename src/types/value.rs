use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Tooltip data attributes attached to a cell (e.g. `{"data-tip": "3 commits"}`)
pub type TooltipAttrs = Value;

/// A dated value supplied by the caller.
///
/// Any fields besides `date` are carried through untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HeatmapValue {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl HeatmapValue {
    /// A value with no payload besides its date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            data: Map::new(),
        }
    }

    /// Builder-style helper to attach a payload field
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

/// Number of input values sharing one calendar date
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CountedBucket {
    pub key: NaiveDate,
    pub count: u32,
}

/// Argument passed to tooltip attribute callbacks.
///
/// A populated cell passes the caller's own value. An empty cell serializes
/// as `{"date": null, "count": null}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipQuery<'a> {
    Value(&'a HeatmapValue),
    Empty,
}

impl<'a> TooltipQuery<'a> {
    pub fn value(self) -> Option<&'a HeatmapValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Empty => None,
        }
    }

    pub fn date(self) -> Option<NaiveDate> {
        self.value().map(|value| value.date)
    }

    /// A payload field of the caller's value
    pub fn get(self, key: &str) -> Option<&'a Value> {
        self.value().and_then(|value| value.data.get(key))
    }
}

impl Serialize for TooltipQuery<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Empty => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("date", &Option::<NaiveDate>::None)?;
                map.serialize_entry("count", &Option::<u32>::None)?;
                map.end()
            }
        }
    }
}

/// Cached data for one populated grid index
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueRecord {
    pub date: NaiveDate,
    /// The caller's value (the last one seen for this date)
    pub value: HeatmapValue,
    /// Number of caller values dated on this day
    pub count: u32,
    pub tooltip_data_attrs: TooltipAttrs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
