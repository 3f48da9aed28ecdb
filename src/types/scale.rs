use serde::{Deserialize, Serialize};

use crate::error::{HeatgridError, Result};

/// A CSS color string (e.g., "#ebedf0", "rgba(0, 128, 0, 0.5)")
pub type CssColor = String;

/// Ordered colors for a heatmap.
///
/// Index 0 is reserved for cells without data; indices `1..len` are levels of
/// increasing intensity. Always holds at least two colors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<CssColor>", into = "Vec<CssColor>")]
pub struct ColorScale {
    colors: Vec<CssColor>,
}

impl ColorScale {
    /// Create a color scale.
    ///
    /// # Errors
    /// Returns an error if fewer than two colors are given.
    pub fn new(colors: Vec<CssColor>) -> Result<Self> {
        if colors.len() < 2 {
            return Err(HeatgridError::ColorScaleTooShort(colors.len()));
        }
        Ok(Self { colors })
    }

    /// Total number of colors, including the "no data" color
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True if the scale holds no colors (never, once validated)
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Number of intensity levels (excludes the "no data" color)
    pub fn level_count(&self) -> usize {
        self.colors.len().saturating_sub(1)
    }

    /// Color at a level, if the level exists
    pub fn color(&self, level: usize) -> Option<&str> {
        self.colors.get(level).map(String::as_str)
    }

    /// Color for cells without data
    pub fn no_data(&self) -> &str {
        self.colors.first().map_or("", String::as_str)
    }

    /// Most intense color
    pub fn top(&self) -> &str {
        self.colors.last().map_or("", String::as_str)
    }
}

impl TryFrom<Vec<CssColor>> for ColorScale {
    type Error = HeatgridError;

    fn try_from(colors: Vec<CssColor>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<ColorScale> for Vec<CssColor> {
    fn from(scale: ColorScale) -> Self {
        scale.colors
    }
}
