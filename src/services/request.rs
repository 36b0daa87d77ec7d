use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::ServiceError;

use super::{ServiceOptions, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub headers: IndexMap<String, String>,
    pub with_credentials: bool,
    pub cross_origin: Option<bool>,
}

/// Outcome of one service call.
#[derive(Debug)]
pub enum ServiceEvent {
    ProcessCompleted { result: Value },
    ProcessFailed { error: ServiceError },
}

impl ServiceEvent {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::ProcessCompleted { .. })
    }

    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::ProcessCompleted { result } => Some(result),
            Self::ProcessFailed { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            Self::ProcessCompleted { .. } => None,
            Self::ProcessFailed { error } => Some(error),
        }
    }
}

pub type RequestCallback = Rc<dyn Fn(ServiceEvent)>;

/// Completion and failure channels of a requester.
#[derive(Clone, Default)]
pub struct EventListeners {
    pub process_completed: Option<RequestCallback>,
    pub process_failed: Option<RequestCallback>,
}

impl EventListeners {
    /// Registers one callback on both channels.
    #[must_use]
    pub fn shared(callback: RequestCallback) -> Self {
        Self {
            process_completed: Some(Rc::clone(&callback)),
            process_failed: Some(callback),
        }
    }

    /// `true` when both channels hold the same callback.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        match (&self.process_completed, &self.process_failed) {
            (Some(completed), Some(failed)) => Rc::ptr_eq(completed, failed),
            _ => false,
        }
    }

    fn dispatch(&self, event: ServiceEvent) {
        let listener = if event.is_completed() {
            &self.process_completed
        } else {
            &self.process_failed
        };
        match listener {
            Some(listener) => listener(event),
            None => trace!(completed = event.is_completed(), "no listener for service event"),
        }
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("process_completed", &self.process_completed.is_some())
            .field("process_failed", &self.process_failed.is_some())
            .finish()
    }
}

/// Short-lived request helper owned by one adapter call.
#[derive(Debug)]
pub struct CommonServiceRequester<'a, T: Transport> {
    url: String,
    options: ServiceOptions,
    event_listeners: EventListeners,
    transport: &'a T,
}

impl<'a, T: Transport> CommonServiceRequester<'a, T> {
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        options: ServiceOptions,
        event_listeners: EventListeners,
        transport: &'a T,
    ) -> Self {
        Self {
            url: url.into(),
            options,
            event_listeners,
            transport,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    #[must_use]
    pub fn event_listeners(&self) -> &EventListeners {
        &self.event_listeners
    }

    /// Joins `path` onto the service URL and routes it through the proxy
    /// when one is configured.
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        let target = format!("{}{}", self.url.trim_end_matches('/'), path);
        match self.options.proxy.as_deref() {
            Some(proxy) if !proxy.is_empty() => {
                format!("{proxy}{}", urlencoding::encode(&target))
            }
            _ => target,
        }
    }

    #[must_use]
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ServiceRequest {
        ServiceRequest {
            method,
            url: self.resolve_url(path),
            body,
            headers: self.options.headers.clone(),
            with_credentials: self.options.with_credentials,
            cross_origin: self.options.cross_origin,
        }
    }

    /// Sends one request and reports its outcome to the listeners.
    pub fn issue(&self, method: HttpMethod, path: &str, body: Option<Value>) {
        if self.url.trim().is_empty() {
            self.event_listeners.dispatch(ServiceEvent::ProcessFailed {
                error: ServiceError::InvalidUrl("service url is empty".to_owned()),
            });
            return;
        }

        let request = self.build_request(method, path, body);
        trace!(method = method.as_str(), url = %request.url, "issuing service request");

        let event = match self.transport.send(&request) {
            Ok(result) => ServiceEvent::ProcessCompleted { result },
            Err(error) => {
                debug!(url = %request.url, error = %error, "service request failed");
                ServiceEvent::ProcessFailed { error }
            }
        };
        self.event_listeners.dispatch(event);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::Value;

    use super::{CommonServiceRequester, EventListeners, RequestCallback, ServiceEvent};
    use crate::error::ServiceResult;
    use crate::services::{ServiceOptions, ServiceRequest, Transport};

    struct EchoTransport;

    impl Transport for EchoTransport {
        fn send(&self, request: &ServiceRequest) -> ServiceResult<Value> {
            Ok(Value::String(request.url.clone()))
        }
    }

    #[test]
    fn shared_listeners_hold_one_callback() {
        let callback: RequestCallback = Rc::new(|_event: ServiceEvent| {});
        let listeners = EventListeners::shared(callback);
        assert!(listeners.is_shared());
        assert!(!EventListeners::default().is_shared());
    }

    #[test]
    fn proxy_prefix_wraps_encoded_target() {
        let requester = CommonServiceRequester::new(
            "http://host/service/",
            ServiceOptions::new().with_proxy("http://proxy/?url="),
            EventListeners::default(),
            &EchoTransport,
        );
        assert_eq!(
            requester.resolve_url("/collections"),
            "http://proxy/?url=http%3A%2F%2Fhost%2Fservice%2Fcollections"
        );
    }

    #[test]
    fn empty_url_fails_without_touching_transport() {
        let failures = Rc::new(Cell::new(0));
        let seen = Rc::clone(&failures);
        let callback: RequestCallback = Rc::new(move |event: ServiceEvent| {
            if event.error().is_some() {
                seen.set(seen.get() + 1);
            }
        });
        let requester = CommonServiceRequester::new(
            "  ",
            ServiceOptions::default(),
            EventListeners::shared(callback),
            &EchoTransport,
        );
        requester.issue(super::HttpMethod::Get, "/collections", None);
        assert_eq!(failures.get(), 1);
    }
}
