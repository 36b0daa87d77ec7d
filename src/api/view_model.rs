use crate::core::{ChartAxisOptions, ChartStyle, ChartType, Datasets, FeatureSet, RenderConfig};

/// Completion of an initial dataset fetch, carrying the raw features.
pub type DatasetCallback = Box<dyn FnOnce(FeatureSet)>;

/// Completion of a data refresh, carrying ready-to-render options.
pub type RenderConfigCallback = Box<dyn FnOnce(RenderConfig)>;

/// Data and style logic behind a [`ChartView`](super::ChartView).
///
/// Methods take `&self`: completions may run while the view is still inside a
/// call into the view-model, so implementations keep their state behind
/// interior mutability. A failed fetch is the view-model's to report; the
/// completion is simply never invoked.
pub trait ChartViewModel {
    /// Starts fetching the configured dataset; `done` receives the features.
    fn get_dataset_info(&self, done: DatasetCallback);

    /// Features delivered by the most recent fetch.
    fn get_features(&self) -> FeatureSet;

    fn get_style(&self) -> ChartStyle;

    /// Stores `style` and returns options recomputed with it.
    fn set_style(&self, style: ChartStyle) -> RenderConfig;

    /// Stores `chart_type` and returns options recomputed with it.
    fn change_type(&self, chart_type: ChartType) -> RenderConfig;

    /// Refetches against a new descriptor and axis layout.
    fn update_data(
        &self,
        datasets: Datasets,
        chart_options: Vec<ChartAxisOptions>,
        done: RenderConfigCallback,
    );

    /// Builds render options for freshly fetched features.
    fn create_chart_options(&self, data: &FeatureSet) -> RenderConfig;
}
