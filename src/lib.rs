//! minichart: layout and geometry engine for small analytic charts.
//!
//! Charts (line graphs, value/threshold bars, progress and pie rings) lay
//! themselves out from scratch on every pass and emit a backend-agnostic
//! [`render::RenderFrame`]. Any [`render::Renderer`] can replay it; an
//! optional Cairo/Pango backend lives behind the `cairo-backend` feature.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BarChart, Chart, ChartView, LineChart, RenderPassOutcome, RingMeter};
pub use error::{ChartError, ChartResult};
