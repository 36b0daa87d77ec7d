use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::{ChartAxisOptions, ChartStyle, ChartType, Datasets, FeatureSet, RenderConfig};
use crate::error::ChartResult;

use super::{
    ChartViewModel, ChartViewSettings, DatasetCallback, RenderConfigCallback, build_render_config,
};

pub type FeaturesCallback = Box<dyn FnOnce(ChartResult<FeatureSet>)>;

/// Supplier of feature records for a dataset descriptor.
///
/// Implementations may complete synchronously or hold on to `done` and
/// complete later.
pub trait FeatureSource {
    fn fetch_features(&self, datasets: &Datasets, done: FeaturesCallback);
}

/// Source serving a fixed feature set for every descriptor.
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureSource {
    features: FeatureSet,
}

impl StaticFeatureSource {
    #[must_use]
    pub fn new(features: FeatureSet) -> Self {
        Self { features }
    }
}

impl FeatureSource for StaticFeatureSource {
    fn fetch_features(&self, _datasets: &Datasets, done: FeaturesCallback) {
        done(Ok(self.features.clone()));
    }
}

struct ModelState {
    chart_type: ChartType,
    datasets: Datasets,
    chart_options: Vec<ChartAxisOptions>,
    style: ChartStyle,
    features: FeatureSet,
    request: u64,
    // Request whose features are currently stored; 0 before any arrived.
    applied: u64,
}

impl ModelState {
    fn options_for(&self, data: &FeatureSet) -> RenderConfig {
        build_render_config(self.chart_type, &self.chart_options, data, &self.style)
    }
}

/// View-model that charts attribute columns of fetched features.
pub struct FeatureChartViewModel<S: FeatureSource> {
    source: S,
    state: Rc<RefCell<ModelState>>,
}

impl<S: FeatureSource> FeatureChartViewModel<S> {
    #[must_use]
    pub fn new(settings: &ChartViewSettings, source: S) -> Self {
        Self {
            source,
            state: Rc::new(RefCell::new(ModelState {
                chart_type: settings.chart_type,
                datasets: settings.datasets.clone(),
                chart_options: settings.chart_options.clone(),
                style: ChartStyle::default(),
                features: FeatureSet::default(),
                request: 0,
                applied: 0,
            })),
        }
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.state.borrow().chart_type
    }

    #[must_use]
    pub fn datasets(&self) -> Datasets {
        self.state.borrow().datasets.clone()
    }

    fn current_options(&self) -> RenderConfig {
        let state = self.state.borrow();
        state.options_for(&state.features)
    }

    /// Fetches the current descriptor and stores the result unless a newer
    /// fetch already stored its features. `on_features` runs with the stored
    /// state released.
    fn fetch<F>(&self, on_features: F)
    where
        F: FnOnce(&RefCell<ModelState>, FeatureSet) + 'static,
    {
        let (datasets, request) = {
            let mut state = self.state.borrow_mut();
            state.request += 1;
            (state.datasets.clone(), state.request)
        };
        let state = Rc::downgrade(&self.state);
        let url = datasets.url.clone();

        self.source.fetch_features(
            &datasets,
            Box::new(move |result| {
                let features = match result {
                    Ok(features) => features,
                    Err(err) => {
                        warn!(url = %url, error = %err, "feature fetch failed");
                        return;
                    }
                };
                let Some(state) = state.upgrade() else {
                    return;
                };
                {
                    let mut current = state.borrow_mut();
                    if request <= current.applied {
                        debug!(url = %url, request, "ignoring superseded feature fetch");
                        return;
                    }
                    current.applied = request;
                    current.features = features.clone();
                }
                debug!(url = %url, count = features.len(), "features fetched");
                on_features(&state, features);
            }),
        );
    }
}

impl<S: FeatureSource> ChartViewModel for FeatureChartViewModel<S> {
    fn get_dataset_info(&self, done: DatasetCallback) {
        self.fetch(move |_, features| done(features));
    }

    fn get_features(&self) -> FeatureSet {
        self.state.borrow().features.clone()
    }

    fn get_style(&self) -> ChartStyle {
        self.state.borrow().style.clone()
    }

    fn set_style(&self, style: ChartStyle) -> RenderConfig {
        self.state.borrow_mut().style.merge(style);
        self.current_options()
    }

    fn change_type(&self, chart_type: ChartType) -> RenderConfig {
        self.state.borrow_mut().chart_type = chart_type;
        self.current_options()
    }

    fn update_data(
        &self,
        datasets: Datasets,
        chart_options: Vec<ChartAxisOptions>,
        done: RenderConfigCallback,
    ) {
        {
            let mut state = self.state.borrow_mut();
            state.datasets = datasets;
            state.chart_options = chart_options;
        }
        self.fetch(move |state, features| {
            let config = state.borrow().options_for(&features);
            done(config);
        });
    }

    fn create_chart_options(&self, data: &FeatureSet) -> RenderConfig {
        self.state.borrow().options_for(data)
    }
}
