use std::cell::RefCell;
use std::rc::Rc;

use gis_widgets::api::{
    ChartPhase, ChartView, ChartViewOptions, FeatureChartViewModel, FeatureSource,
    FeaturesCallback, StaticFeatureSource,
};
use gis_widgets::core::{
    AxisField, ChartAxisOptions, ChartStyle, ChartType, DatasetKind, Datasets, DatasetsOptions,
    Feature, FeatureSet,
};
use gis_widgets::render::NullRenderer;
use proptest::prelude::*;
use serde_json::json;

const CHART_TYPES: [ChartType; 5] = [
    ChartType::Bar,
    ChartType::Line,
    ChartType::Scatter,
    ChartType::Pie,
    ChartType::Radar,
];

/// Source that never completes.
#[derive(Clone, Default)]
struct PendingSource {
    parked: Rc<RefCell<Vec<FeaturesCallback>>>,
}

impl FeatureSource for PendingSource {
    fn fetch_features(&self, _datasets: &Datasets, done: FeaturesCallback) {
        self.parked.borrow_mut().push(done);
    }
}

fn features(len: usize) -> FeatureSet {
    (0..len)
        .map(|i| {
            Feature::new()
                .with_attribute("NAME", json!(format!("f{i}")))
                .with_attribute("VALUE", json!(i as f64))
        })
        .collect()
}

fn axis() -> ChartAxisOptions {
    ChartAxisOptions::new(AxisField::new("NAME", ""), AxisField::new("VALUE", ""))
}

proptest! {
    #[test]
    fn unset_dataset_fields_resolve_to_defaults(
        url in "https?://[a-z]{1,12}/[a-z]{0,12}",
        chart_type in proptest::option::of(0usize..CHART_TYPES.len()),
    ) {
        let mut options = ChartViewOptions::new(DatasetsOptions::new(url.clone()));
        if let Some(index) = chart_type {
            options = options.with_chart_type(CHART_TYPES[index]);
        }
        let settings = options.resolve().expect("resolve options");

        prop_assert_eq!(settings.datasets.kind, DatasetKind::IServer);
        prop_assert!(!settings.datasets.with_credentials);
        prop_assert_eq!(settings.datasets.url, url);
        prop_assert_eq!(
            settings.chart_type,
            chart_type.map_or(ChartType::Bar, |index| CHART_TYPES[index])
        );
    }

    #[test]
    fn changes_before_first_render_never_reach_backend(
        ops in proptest::collection::vec((any::<bool>(), 0usize..CHART_TYPES.len()), 0..16),
    ) {
        let renderer = NullRenderer::default();
        let log = renderer.log();
        let source = PendingSource::default();
        let mut view = ChartView::new(
            "chart",
            ChartViewOptions::new(DatasetsOptions::new("http://x/data")).with_axis(axis()),
            renderer,
            move |settings| FeatureChartViewModel::new(settings, source),
        )
        .expect("chart view init");

        for (is_style, index) in ops {
            if is_style {
                view.set_style(ChartStyle::new().with("zIndex", json!(index)))
                    .expect("style before render");
            } else {
                view.change_type(CHART_TYPES[index]).expect("type before render");
            }
        }

        prop_assert!(log.borrow().calls().is_empty());
        prop_assert_eq!(view.phase(), ChartPhase::FetchingInitialData);
    }

    #[test]
    fn rendered_chart_is_created_exactly_once(
        ops in proptest::collection::vec(0u8..3, 0..16),
        len in 0usize..20,
    ) {
        let renderer = NullRenderer::default();
        let log = renderer.log();
        let mut view = ChartView::new(
            "chart",
            ChartViewOptions::new(DatasetsOptions::new("http://x/data")).with_axis(axis()),
            renderer,
            move |settings| {
                FeatureChartViewModel::new(settings, StaticFeatureSource::new(features(len)))
            },
        )
        .expect("chart view init");

        for op in &ops {
            match op {
                0 => view
                    .set_style(ChartStyle::new().with("animation", json!(false)))
                    .expect("set style"),
                1 => view.change_type(ChartType::Line).expect("change type"),
                _ => view.update_data(DatasetsOptions::new("http://x/next"), vec![axis()]),
            }
        }

        let log = log.borrow();
        prop_assert_eq!(log.init_count(), 1);
        prop_assert_eq!(log.clear_count(), ops.len());
        prop_assert_eq!(log.set_option_count(), ops.len() + 1);
    }
}
