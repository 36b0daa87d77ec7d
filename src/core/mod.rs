pub mod features;
pub mod options;
pub mod types;

pub use features::{Feature, FeatureSet};
pub use options::{ChartStyle, RenderConfig};
pub use types::{
    AxisField, ChartAxisOptions, ChartType, DatasetKind, Datasets, DatasetsOptions,
    FilterParameter,
};
