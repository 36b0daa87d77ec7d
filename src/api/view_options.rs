use serde::{Deserialize, Serialize};

use crate::core::{ChartAxisOptions, ChartType, Datasets, DatasetsOptions};
use crate::error::{ChartError, ChartResult};

/// Construction options for a chart widget.
///
/// Serializable so hosts can keep widget setup next to their map
/// configuration, e.g. `{"type": "line", "datasets": {"url": "..."}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartViewOptions {
    #[serde(rename = "type", default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub datasets: Option<DatasetsOptions>,
    #[serde(default)]
    pub chart_options: Vec<ChartAxisOptions>,
}

impl ChartViewOptions {
    #[must_use]
    pub fn new(datasets: DatasetsOptions) -> Self {
        Self {
            datasets: Some(datasets),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = Some(chart_type);
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: ChartAxisOptions) -> Self {
        self.chart_options.push(axis);
        self
    }

    /// Applies defaults once: chart type `bar`, dataset type `iServer`,
    /// `withCredentials = false`.
    pub fn resolve(self) -> ChartResult<ChartViewSettings> {
        let datasets = self.datasets.ok_or_else(|| {
            ChartError::Configuration("chart view options require `datasets`".to_owned())
        })?;

        Ok(ChartViewSettings {
            chart_type: self.chart_type.unwrap_or_default(),
            datasets: datasets.resolve(),
            chart_options: self.chart_options,
        })
    }
}

/// Fully resolved widget options handed to the view-model factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartViewSettings {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub datasets: Datasets,
    pub chart_options: Vec<ChartAxisOptions>,
}
