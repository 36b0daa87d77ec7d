//! Chart widget: lifecycle, view-model seam and option building.

mod chart_options_builder;
mod chart_view;
mod feature_view_model;
mod view_model;
mod view_options;

pub use chart_options_builder::build_render_config;
pub use chart_view::{ChartPhase, ChartView, ReadyCallback};
pub use feature_view_model::{
    FeatureChartViewModel, FeatureSource, FeaturesCallback, StaticFeatureSource,
};
pub use view_model::{ChartViewModel, DatasetCallback, RenderConfigCallback};
pub use view_options::{ChartViewOptions, ChartViewSettings};
