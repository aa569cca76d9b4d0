use thiserror::Error;

use crate::core::Axis;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("degenerate {axis} axis range: min={min}, max={max}")]
    DegenerateAxis { axis: Axis, min: f64, max: f64 },

    #[error("chord distance {distance} is outside circle of radius {radius}")]
    ChordOutOfDomain { radius: f64, distance: f64 },

    #[error("layout leaves no drawable area: width={width}, height={height}")]
    LayoutTooSmall { width: f64, height: f64 },

    #[error("render backend failure: {0}")]
    Backend(String),
}
