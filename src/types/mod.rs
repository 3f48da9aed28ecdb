//! Data types for the heatmap layout.

mod config;
mod orientation;
mod point;
mod scale;
mod value;

pub use config::*;
pub use orientation::*;
pub use point::*;
pub use scale::*;
pub use value::*;
