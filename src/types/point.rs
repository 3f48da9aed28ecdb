use serde::{Deserialize, Serialize};
use std::fmt;

/// A pixel offset in the heatmap's coordinate space
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// SVG `translate(x, y)` attribute value
    pub fn to_translate(self) -> String {
        format!("translate({self})")
    }
}

/// Formats as `x, y`, the argument list of an SVG translate.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}
