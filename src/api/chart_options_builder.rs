use serde_json::{Value, json};

use crate::core::{ChartAxisOptions, ChartStyle, ChartType, FeatureSet, RenderConfig};

/// Builds the backend options for `data` laid out by `axes`, then overlays
/// `style`.
///
/// Each axis entry yields one series; the first entry's x field supplies the
/// categories. Values that are not numeric render as gaps (`null`).
#[must_use]
pub fn build_render_config(
    chart_type: ChartType,
    axes: &[ChartAxisOptions],
    data: &FeatureSet,
    style: &ChartStyle,
) -> RenderConfig {
    let mut config = match chart_type {
        ChartType::Bar | ChartType::Line | ChartType::Scatter => cartesian(chart_type, axes, data),
        ChartType::Pie => pie(axes, data),
        ChartType::Radar => radar(axes, data),
    };
    config.apply_style(style);
    config
}

fn categories(axes: &[ChartAxisOptions], data: &FeatureSet) -> Vec<String> {
    let Some(first) = axes.first() else {
        return Vec::new();
    };
    data.iter()
        .map(|feature| feature.label(&first.x_axis.field))
        .collect()
}

fn values(axis: &ChartAxisOptions, data: &FeatureSet) -> Vec<Value> {
    data.iter()
        .map(|feature| {
            feature
                .number(&axis.y_axis.field)
                .map_or(Value::Null, Value::from)
        })
        .collect()
}

fn legend(axes: &[ChartAxisOptions]) -> Value {
    let names: Vec<&str> = axes.iter().map(|axis| axis.y_axis.label()).collect();
    json!({ "data": names })
}

fn cartesian(chart_type: ChartType, axes: &[ChartAxisOptions], data: &FeatureSet) -> RenderConfig {
    let trigger = if chart_type == ChartType::Scatter {
        "item"
    } else {
        "axis"
    };
    let x_name = axes.first().map_or("", |axis| axis.x_axis.label());
    let y_name = axes.first().map_or("", |axis| axis.y_axis.label());
    let series: Vec<Value> = axes
        .iter()
        .map(|axis| {
            json!({
                "name": axis.y_axis.label(),
                "type": chart_type.as_str(),
                "data": values(axis, data),
            })
        })
        .collect();

    RenderConfig::new()
        .with("tooltip", json!({ "trigger": trigger }))
        .with("legend", legend(axes))
        .with(
            "xAxis",
            json!({
                "type": "category",
                "name": x_name,
                "data": categories(axes, data),
            }),
        )
        .with("yAxis", json!({ "type": "value", "name": y_name }))
        .with("series", Value::Array(series))
}

fn pie(axes: &[ChartAxisOptions], data: &FeatureSet) -> RenderConfig {
    let series: Vec<Value> = axes
        .first()
        .map(|axis| {
            let slices: Vec<Value> = categories(axes, data)
                .into_iter()
                .zip(values(axis, data))
                .map(|(name, value)| json!({ "name": name, "value": value }))
                .collect();
            vec![json!({
                "name": axis.y_axis.label(),
                "type": "pie",
                "radius": "55%",
                "data": slices,
            })]
        })
        .unwrap_or_default();

    RenderConfig::new()
        .with(
            "tooltip",
            json!({ "trigger": "item", "formatter": "{b}: {c} ({d}%)" }),
        )
        .with("series", Value::Array(series))
}

fn radar(axes: &[ChartAxisOptions], data: &FeatureSet) -> RenderConfig {
    let indicator: Vec<Value> = categories(axes, data)
        .into_iter()
        .map(|name| json!({ "name": name }))
        .collect();
    let entries: Vec<Value> = axes
        .iter()
        .map(|axis| json!({ "name": axis.y_axis.label(), "value": values(axis, data) }))
        .collect();

    RenderConfig::new()
        .with("tooltip", json!({ "trigger": "item" }))
        .with("legend", legend(axes))
        .with("radar", json!({ "indicator": indicator }))
        .with("series", json!([{ "type": "radar", "data": entries }]))
}
