use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::core::{
    ChartAxisOptions, ChartStyle, ChartType, Datasets, DatasetsOptions, FeatureSet, RenderConfig,
};
use crate::error::ChartResult;
use crate::render::{ChartBackend, ChartInstance, InitOptions};

use super::{ChartViewModel, ChartViewOptions, ChartViewSettings};

/// Callback fired after the chart is created and after each data refresh.
pub type ReadyCallback = Box<dyn FnMut()>;

/// Lifecycle of a chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    /// The initial dataset has not produced a chart yet.
    FetchingInitialData,
    /// A chart instance exists and is reused for every update.
    Rendered,
}

struct ViewState<B: ChartBackend> {
    element_id: String,
    chart_type: ChartType,
    datasets: Datasets,
    backend: B,
    chart: Option<B::Instance>,
    on_ready: Option<ReadyCallback>,
    // Set when a render completed with no ready callback registered.
    ready_missed: bool,
    // Bumped per data request; a completion renders only when it is newer
    // than the last rendered one.
    generation: u64,
    rendered: Option<u64>,
}

impl<B: ChartBackend> ViewState<B> {
    /// Clear-then-set on the existing chart. Returns `false` when no chart
    /// exists yet.
    fn update_chart(&mut self, config: &RenderConfig) -> ChartResult<bool> {
        let Some(chart) = self.chart.as_mut() else {
            return Ok(false);
        };
        chart.clear()?;
        chart.set_option(config)?;
        Ok(true)
    }

    fn create_chart(&mut self, config: &RenderConfig) -> ChartResult<()> {
        if self.update_chart(config)? {
            return Ok(());
        }

        let mut chart = self
            .backend
            .init(&self.element_id, None, InitOptions::canvas())?;
        chart.set_option(config)?;
        self.chart = Some(chart);
        debug!(
            element_id = %self.element_id,
            chart_type = %self.chart_type,
            "chart created"
        );
        Ok(())
    }
}

/// Chart widget bound to a host element.
///
/// Construction kicks off the initial dataset fetch; the chart itself is
/// created when that fetch completes. Style and type changes made before then
/// are kept by the view-model but never reach the backend.
pub struct ChartView<B: ChartBackend, M: ChartViewModel> {
    state: Rc<RefCell<ViewState<B>>>,
    view_model: Rc<M>,
}

impl<B, M> ChartView<B, M>
where
    B: ChartBackend + 'static,
    M: ChartViewModel + 'static,
{
    /// Resolves `options`, builds the view-model from the resolved settings
    /// and requests the initial dataset.
    pub fn new<F>(
        element_id: impl Into<String>,
        options: ChartViewOptions,
        backend: B,
        make_view_model: F,
    ) -> ChartResult<Self>
    where
        F: FnOnce(&ChartViewSettings) -> M,
    {
        let settings = options.resolve()?;
        let view_model = Rc::new(make_view_model(&settings));
        let element_id = element_id.into();
        debug!(
            element_id = %element_id,
            chart_type = %settings.chart_type,
            url = %settings.datasets.url,
            "chart view created"
        );

        let view = Self {
            state: Rc::new(RefCell::new(ViewState {
                element_id,
                chart_type: settings.chart_type,
                datasets: settings.datasets,
                backend,
                chart: None,
                on_ready: None,
                ready_missed: false,
                generation: 0,
                rendered: None,
            })),
            view_model,
        };
        view.fill_data_to_view();
        Ok(view)
    }

    fn fill_data_to_view(&self) {
        let generation = self.state.borrow().generation;
        let state = Rc::downgrade(&self.state);
        let view_model = Rc::downgrade(&self.view_model);

        self.view_model.get_dataset_info(Box::new(move |data| {
            let (Some(state), Some(view_model)) = (state.upgrade(), view_model.upgrade()) else {
                trace!("chart view dropped before its dataset arrived");
                return;
            };
            if !is_newer(&state, generation) {
                return;
            }
            let config = view_model.create_chart_options(&data);
            render_and_notify(&state, generation, &config);
        }));
    }

    /// Registers the ready callback, replacing any previous one.
    ///
    /// If the chart was already rendered with no callback registered (a
    /// source that completes during construction), the callback fires once
    /// right away.
    pub fn on_ready(&mut self, callback: impl FnMut() + 'static) {
        let missed = {
            let mut state = self.state.borrow_mut();
            state.on_ready = Some(Box::new(callback));
            std::mem::take(&mut state.ready_missed)
        };
        if missed {
            notify_ready(&self.state);
        }
    }

    #[must_use]
    pub fn get_style(&self) -> ChartStyle {
        self.view_model.get_style()
    }

    #[must_use]
    pub fn get_features(&self) -> FeatureSet {
        self.view_model.get_features()
    }

    /// Pushes `style` into the view-model and re-renders the existing chart.
    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        let config = self.view_model.set_style(style);
        self.update_chart(&config)
    }

    pub fn change_type(&mut self, chart_type: ChartType) -> ChartResult<()> {
        self.state.borrow_mut().chart_type = chart_type;
        let config = self.view_model.change_type(chart_type);
        self.update_chart(&config)
    }

    /// Refetches against `datasets` with a new axis layout.
    ///
    /// When the fetch completes the chart is re-rendered, or created if the
    /// initial fetch never produced one, and the ready callback fires. A
    /// completion older than the last rendered one is dropped.
    pub fn update_data(&mut self, datasets: DatasetsOptions, chart_options: Vec<ChartAxisOptions>) {
        let datasets = datasets.resolve();
        let generation = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.datasets = datasets.clone();
            state.generation
        };
        debug!(generation, url = %datasets.url, "chart data update requested");

        let state = Rc::downgrade(&self.state);
        self.view_model.update_data(
            datasets,
            chart_options,
            Box::new(move |config| {
                let Some(state) = upgrade(&state) else {
                    return;
                };
                if !is_newer(&state, generation) {
                    return;
                }
                render_and_notify(&state, generation, &config);
            }),
        );
    }

    fn update_chart(&self, config: &RenderConfig) -> ChartResult<()> {
        let updated = self.state.borrow_mut().update_chart(config)?;
        if !updated {
            trace!("chart not created yet; re-render skipped");
        }
        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> ChartPhase {
        if self.state.borrow().chart.is_some() {
            ChartPhase::Rendered
        } else {
            ChartPhase::FetchingInitialData
        }
    }

    #[must_use]
    pub fn element_id(&self) -> String {
        self.state.borrow().element_id.clone()
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.state.borrow().chart_type
    }

    #[must_use]
    pub fn datasets(&self) -> Datasets {
        self.state.borrow().datasets.clone()
    }

    #[must_use]
    pub fn view_model(&self) -> &M {
        &self.view_model
    }
}

fn upgrade<B: ChartBackend>(
    state: &Weak<RefCell<ViewState<B>>>,
) -> Option<Rc<RefCell<ViewState<B>>>> {
    let state = state.upgrade();
    if state.is_none() {
        trace!("chart view dropped before its data update arrived");
    }
    state
}

fn is_newer<B: ChartBackend>(state: &RefCell<ViewState<B>>, generation: u64) -> bool {
    let rendered = state.borrow().rendered;
    match rendered {
        Some(rendered) if generation <= rendered => {
            debug!(generation, rendered, "dropping superseded chart data");
            false
        }
        _ => true,
    }
}

fn render_and_notify<B: ChartBackend>(
    state: &RefCell<ViewState<B>>,
    generation: u64,
    config: &RenderConfig,
) {
    {
        let mut current = state.borrow_mut();
        if let Err(err) = current.create_chart(config) {
            warn!(error = %err, "chart render failed");
            return;
        }
        current.rendered = Some(generation);
    }
    notify_ready(state);
}

fn notify_ready<B: ChartBackend>(state: &RefCell<ViewState<B>>) {
    // The callback runs without the state borrowed so it may read the view.
    let callback = state.borrow_mut().on_ready.take();
    let Some(mut callback) = callback else {
        state.borrow_mut().ready_missed = true;
        return;
    };
    callback();
    let mut state = state.borrow_mut();
    if state.on_ready.is_none() {
        state.on_ready = Some(callback);
    }
}
