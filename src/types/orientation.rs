use serde::{Deserialize, Serialize};

/// Direction in which weeks run across the grid
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Weeks are columns laid out left to right, days stack downwards (default)
    #[default]
    Horizontal,
    /// Weeks are rows laid out top to bottom, days run left to right
    Vertical,
}

impl Orientation {
    /// Map the `horizontal` flag used by heatmap options
    pub const fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}
