//! gis-widgets: chart widget and REST service adapters for web-map clients.
//!
//! The crate keeps an explicit split between the chart widget lifecycle
//! (`api`), the charting backend seam (`render`) and the service adapters
//! (`services`). Rendering and networking are delegated through traits.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod services;
pub mod telemetry;

pub use api::{ChartView, ChartViewOptions};
pub use error::{ChartError, ChartResult, ServiceError, ServiceResult};
pub use services::{ImageService, ServiceOptions};
