use std::fmt;

use serde::{Deserialize, Serialize};

/// Series family rendered by a chart widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Radar,
}

impl ChartType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
            Self::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform hosting the chart's source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatasetKind {
    #[default]
    #[serde(rename = "iServer")]
    IServer,
    #[serde(rename = "iPortal")]
    IPortal,
}

/// Attribute query forwarded untouched to the data service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_filter: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<i64>,
}

impl FilterParameter {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute_filter(mut self, filter: impl Into<String>) -> Self {
        self.attribute_filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// Caller-facing dataset descriptor. Unset fields fall back to defaults in
/// [`DatasetsOptions::resolve`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetsOptions {
    #[serde(rename = "type", default)]
    pub kind: Option<DatasetKind>,
    pub url: String,
    #[serde(default)]
    pub with_credentials: Option<bool>,
    #[serde(default)]
    pub query_info: Option<FilterParameter>,
}

impl DatasetsOptions {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DatasetKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = Some(with_credentials);
        self
    }

    #[must_use]
    pub fn with_query_info(mut self, query_info: FilterParameter) -> Self {
        self.query_info = Some(query_info);
        self
    }

    /// Applies `type = iServer` and `withCredentials = false` where unset.
    #[must_use]
    pub fn resolve(self) -> Datasets {
        Datasets {
            kind: self.kind.unwrap_or_default(),
            url: self.url,
            with_credentials: self.with_credentials.unwrap_or(false),
            query_info: self.query_info,
        }
    }
}

/// Dataset descriptor with every default applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasets {
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    pub url: String,
    pub with_credentials: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_info: Option<FilterParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisField {
    pub field: String,
    #[serde(default)]
    pub name: String,
}

impl AxisField {
    #[must_use]
    pub fn new(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
        }
    }

    /// Axis title, falling back to the attribute name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.field
        } else {
            &self.name
        }
    }
}

/// One x/y field pairing. Each entry contributes one series; the first
/// entry's x axis is used as the shared category axis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAxisOptions {
    pub x_axis: AxisField,
    pub y_axis: AxisField,
}

impl ChartAxisOptions {
    #[must_use]
    pub fn new(x_axis: AxisField, y_axis: AxisField) -> Self {
        Self { x_axis, y_axis }
    }
}
