use serde_json::Value;

use crate::error::ServiceResult;

use super::ServiceRequest;

/// Carries a resolved request to the service and returns the decoded body.
pub trait Transport {
    fn send(&self, request: &ServiceRequest) -> ServiceResult<Value>;
}

#[cfg(feature = "http-transport")]
mod http {
    use std::time::Duration;

    use serde_json::Value;
    use tracing::trace;

    use crate::error::{ServiceError, ServiceResult};
    use crate::services::{HttpMethod, ServiceRequest};

    use super::Transport;

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

    /// Blocking HTTP transport.
    ///
    /// `with_credentials` and `cross_origin` are browser fetch settings; they
    /// are forwarded in the request but have no effect on a native client.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::blocking::Client,
    }

    impl HttpTransport {
        pub fn new() -> ServiceResult<Self> {
            Self::with_timeout(DEFAULT_TIMEOUT)
        }

        pub fn with_timeout(timeout: Duration) -> ServiceResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ServiceError::Transport(format!("reqwest client error: {e}")))?;
            Ok(Self { client })
        }
    }

    impl Transport for HttpTransport {
        fn send(&self, request: &ServiceRequest) -> ServiceResult<Value> {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            trace!(
                with_credentials = request.with_credentials,
                cross_origin = ?request.cross_origin,
                "sending http request"
            );

            let response = builder
                .send()
                .map_err(|e| ServiceError::Transport(format!("request error: {e}")))?;
            let status = response.status();
            let body = response
                .text()
                .map_err(|e| ServiceError::Transport(format!("body read error: {e}")))?;
            if !status.is_success() {
                return Err(ServiceError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&body)?)
        }
    }
}

#[cfg(feature = "http-transport")]
pub use http::HttpTransport;
