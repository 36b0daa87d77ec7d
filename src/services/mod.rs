//! REST service adapters.
//!
//! Every adapter implements [`ServiceClient`] and issues its calls through a
//! transient [`CommonServiceRequester`] built from the adapter's URL and
//! [`ServiceOptions`]. Results are not interpreted here: the caller's callback
//! receives whatever the service returned, success or failure.

mod image_service;
mod request;
mod transport;

pub use image_service::{
    FieldsExtension, ImageSearchParameter, ImageService, SortDirection, SortExtension,
};
pub use request::{
    CommonServiceRequester, EventListeners, HttpMethod, RequestCallback, ServiceEvent,
    ServiceRequest,
};
pub use transport::Transport;

#[cfg(feature = "http-transport")]
pub use transport::HttpTransport;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Request settings shared by every call an adapter makes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceOptions {
    /// Proxy prefix; the target URL is percent-encoded and appended to it.
    pub proxy: Option<String>,
    /// Whether requests carry cookies.
    pub with_credentials: bool,
    pub cross_origin: Option<bool>,
    pub headers: IndexMap<String, String>,
}

impl ServiceOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    #[must_use]
    pub fn with_cross_origin(mut self, cross_origin: bool) -> Self {
        self.cross_origin = Some(cross_origin);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A service endpoint: a base URL, its request settings and the transport
/// that carries its calls.
pub trait ServiceClient {
    type Transport: Transport;

    fn url(&self) -> &str;

    fn options(&self) -> &ServiceOptions;

    fn transport(&self) -> &Self::Transport;

    /// Builds a requester that reports both outcomes to `callback`.
    fn requester(&self, callback: RequestCallback) -> CommonServiceRequester<'_, Self::Transport> {
        CommonServiceRequester::new(
            self.url(),
            self.options().clone(),
            EventListeners::shared(callback),
            self.transport(),
        )
    }
}
