pub mod entries;
pub mod frame_layout;
pub mod geometry;
pub mod label_fit;
pub mod label_maker;
pub mod scale;
pub mod types;

pub use entries::{GraphEntry, LineLabel, LineSeries};
pub use frame_layout::{BarFrames, ChartFrames, ChartMargins, ColumnSlot, RingLayout};
pub use label_fit::{ChordRegion, LabelMetrics};
pub use scale::{Axis, AxisMapper, PlotMapping};
pub use types::{DataPoint, Rect, Viewport};
