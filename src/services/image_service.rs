use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ServiceError;

use super::{HttpMethod, ServiceClient, ServiceEvent, ServiceOptions, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortExtension {
    pub field: String,
    pub direction: SortDirection,
}

/// Property projection for returned items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsExtension {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

/// Item search filter, sent as the body of `POST /search`.
///
/// Fields are forwarded as given; combining `bbox` with `intersects` is left
/// for the service to reject.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageSearchParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    /// GeoJSON geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersects: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldsExtension>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sortby: Vec<SortExtension>,
}

impl ImageSearchParameter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `[min_x, min_y, max_x, max_y]`.
    #[must_use]
    pub fn with_bbox(mut self, bbox: [f64; 4]) -> Self {
        self.bbox = Some(bbox);
        self
    }

    #[must_use]
    pub fn with_intersects(mut self, geometry: Value) -> Self {
        self.intersects = Some(geometry);
        self
    }

    /// Sets a closed (`start/end`) or open-ended (`start/..`) interval.
    #[must_use]
    pub fn with_datetime_range(mut self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        let start = start.to_rfc3339_opts(SecondsFormat::Secs, true);
        let end = end.map_or_else(
            || "..".to_owned(),
            |end| end.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        self.datetime = Some(format!("{start}/{end}"));
        self
    }

    #[must_use]
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: FieldsExtension) -> Self {
        self.fields = Some(fields);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sortby.push(SortExtension {
            field: field.into(),
            direction,
        });
        self
    }
}

/// Client for an imagery service exposing STAC-style collections and item
/// search, e.g. `http://{host}:{port}/iserver/{imageservice-name}/restjsr/`.
///
/// Each call reports its outcome to the given callback exactly once, through
/// [`ServiceEvent::ProcessCompleted`] or [`ServiceEvent::ProcessFailed`].
#[derive(Debug)]
pub struct ImageService<T: Transport> {
    url: String,
    options: ServiceOptions,
    transport: T,
}

impl<T: Transport> ImageService<T> {
    #[must_use]
    pub fn new(url: impl Into<String>, options: ServiceOptions, transport: T) -> Self {
        Self {
            url: url.into(),
            options,
            transport,
        }
    }

    /// Lists the collections served by this service.
    pub fn get_collections(&self, callback: impl Fn(ServiceEvent) + 'static) {
        debug!(url = %self.url, "listing image collections");
        self.requester(Rc::new(callback))
            .issue(HttpMethod::Get, "/collections", None);
    }

    /// Fetches the collection whose id equals `collection_id`.
    pub fn get_collection_by_id(
        &self,
        collection_id: &str,
        callback: impl Fn(ServiceEvent) + 'static,
    ) {
        debug!(url = %self.url, collection_id, "fetching image collection");
        let path = format!("/collections/{}", urlencoding::encode(collection_id));
        self.requester(Rc::new(callback))
            .issue(HttpMethod::Get, &path, None);
    }

    /// Searches items matching `item_search`; `None` sends an empty filter.
    pub fn search(
        &self,
        item_search: Option<&ImageSearchParameter>,
        callback: impl Fn(ServiceEvent) + 'static,
    ) {
        debug!(url = %self.url, "searching image items");
        let body = match item_search {
            Some(filter) => serde_json::to_value(filter),
            None => Ok(Value::Object(serde_json::Map::new())),
        };
        match body {
            Ok(body) => self
                .requester(Rc::new(callback))
                .issue(HttpMethod::Post, "/search", Some(body)),
            Err(err) => callback(ServiceEvent::ProcessFailed {
                error: ServiceError::from(err),
            }),
        }
    }
}

impl<T: Transport> ServiceClient for ImageService<T> {
    type Transport = T;

    fn url(&self) -> &str {
        &self.url
    }

    fn options(&self) -> &ServiceOptions {
        &self.options
    }

    fn transport(&self) -> &T {
        &self.transport
    }
}
