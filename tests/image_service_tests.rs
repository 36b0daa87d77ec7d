use std::cell::RefCell;
use std::rc::Rc;

use chrono::{TimeZone, Utc};
use gis_widgets::error::{ServiceError, ServiceResult};
use gis_widgets::services::{
    HttpMethod, ImageSearchParameter, ImageService, RequestCallback, ServiceClient, ServiceEvent,
    ServiceOptions, ServiceRequest, SortDirection, Transport,
};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct RecordingTransport {
    requests: Rc<RefCell<Vec<ServiceRequest>>>,
    fail_with_status: Option<u16>,
}

impl RecordingTransport {
    fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<ServiceRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &ServiceRequest) -> ServiceResult<Value> {
        self.requests.borrow_mut().push(request.clone());
        match self.fail_with_status {
            Some(status) => Err(ServiceError::Status {
                status,
                body: "internal error".to_owned(),
            }),
            None => Ok(json!({ "requested": request.url })),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Completed(Value),
    Failed(String),
}

fn recorder() -> (Rc<RefCell<Vec<Outcome>>>, impl Fn(ServiceEvent) + Clone + 'static) {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&outcomes);
    let callback = move |event: ServiceEvent| {
        let outcome = match event {
            ServiceEvent::ProcessCompleted { result } => Outcome::Completed(result),
            ServiceEvent::ProcessFailed { error } => Outcome::Failed(error.to_string()),
        };
        sink.borrow_mut().push(outcome);
    };
    (outcomes, callback)
}

#[test]
fn collection_by_id_targets_collection_and_reports_completion() {
    let transport = RecordingTransport::default();
    let service = ImageService::new(
        "http://host/service",
        ServiceOptions::default(),
        transport.clone(),
    );
    let (outcomes, callback) = recorder();

    service.get_collection_by_id("abc", callback);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].url, "http://host/service/collections/abc");
    assert_eq!(
        *outcomes.borrow(),
        vec![Outcome::Completed(
            json!({ "requested": "http://host/service/collections/abc" })
        )]
    );
}

#[test]
fn failures_reach_the_same_callback() {
    let service = ImageService::new(
        "http://host/service",
        ServiceOptions::default(),
        RecordingTransport::failing(500),
    );
    let (outcomes, callback) = recorder();

    service.get_collection_by_id("abc", callback.clone());
    service.get_collections(callback);

    assert_eq!(
        *outcomes.borrow(),
        vec![
            Outcome::Failed("service responded with status 500: internal error".to_owned()),
            Outcome::Failed("service responded with status 500: internal error".to_owned()),
        ]
    );
}

#[test]
fn requester_registers_one_callback_on_both_channels() {
    let service = ImageService::new(
        "http://host/service",
        ServiceOptions::default(),
        RecordingTransport::default(),
    );
    let callback: RequestCallback = Rc::new(|_event: ServiceEvent| {});
    let requester = service.requester(callback);

    assert!(requester.event_listeners().is_shared());
    assert_eq!(requester.url(), "http://host/service");
}

#[test]
fn every_operation_forwards_the_configuration_bundle() {
    let options = ServiceOptions::new()
        .with_proxy("http://proxy/forward?url=")
        .with_credentials(true)
        .with_cross_origin(true)
        .with_header("X-Token", "secret");
    let transport = RecordingTransport::default();
    let service = ImageService::new("http://host/service", options.clone(), transport.clone());
    let (_outcomes, callback) = recorder();

    service.get_collections(callback.clone());
    service.get_collection_by_id("abc", callback.clone());
    service.search(Some(&ImageSearchParameter::new().with_limit(10)), callback);

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert_eq!(request.headers, options.headers);
        assert!(request.with_credentials);
        assert_eq!(request.cross_origin, Some(true));
        assert!(request.url.starts_with("http://proxy/forward?url=http%3A%2F%2Fhost"));
    }
    assert_eq!(service.options(), &options);
}

#[test]
fn search_posts_the_filter_as_json_body() {
    let transport = RecordingTransport::default();
    let service = ImageService::new(
        "http://host/service/",
        ServiceOptions::default(),
        transport.clone(),
    );
    let filter = ImageSearchParameter::new()
        .with_bbox([116.0, 39.0, 117.0, 40.0])
        .with_collections(["landsat"])
        .with_limit(5)
        .with_datetime_range(
            Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            Some(Utc.with_ymd_and_hms(2021, 6, 30, 12, 0, 0).unwrap()),
        )
        .with_sort("datetime", SortDirection::Desc);
    let (_outcomes, callback) = recorder();

    service.search(Some(&filter), callback);

    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "http://host/service/search");
    assert_eq!(
        request.body,
        Some(json!({
            "bbox": [116.0, 39.0, 117.0, 40.0],
            "datetime": "2021-01-01T00:00:00Z/2021-06-30T12:00:00Z",
            "collections": ["landsat"],
            "limit": 5,
            "sortby": [{"field": "datetime", "direction": "desc"}],
        }))
    );
}

#[test]
fn search_without_filter_posts_empty_object() {
    let transport = RecordingTransport::default();
    let service = ImageService::new(
        "http://host/service",
        ServiceOptions::default(),
        transport.clone(),
    );
    let (_outcomes, callback) = recorder();

    service.search(None, callback);

    assert_eq!(transport.requests()[0].body, Some(json!({})));
}

#[test]
fn collections_listing_normalizes_trailing_slash() {
    let transport = RecordingTransport::default();
    let service = ImageService::new(
        "http://host/service/",
        ServiceOptions::default(),
        transport.clone(),
    );
    let (_outcomes, callback) = recorder();

    service.get_collections(callback);

    assert_eq!(transport.requests()[0].url, "http://host/service/collections");
}

#[test]
fn open_ended_datetime_range_uses_double_dot() {
    let filter = ImageSearchParameter::new()
        .with_datetime_range(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(), None);
    assert_eq!(filter.datetime.as_deref(), Some("2021-01-01T00:00:00Z/.."));
}

#[test]
fn service_options_deserialize_from_camel_case() {
    let options: ServiceOptions = serde_json::from_value(json!({
        "proxy": "http://proxy/?",
        "withCredentials": true,
        "crossOrigin": false,
        "headers": {"Accept": "application/json"},
    }))
    .expect("options json");

    assert_eq!(
        options,
        ServiceOptions::new()
            .with_proxy("http://proxy/?")
            .with_credentials(true)
            .with_cross_origin(false)
            .with_header("Accept", "application/json")
    );

    let defaults: ServiceOptions = serde_json::from_value(json!({})).expect("empty options");
    assert!(!defaults.with_credentials);
    assert!(defaults.proxy.is_none());
}
