use super::*;
use async_trait::async_trait;
use futures::executor::block_on;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::net::transport::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
use crate::util::browser::NullBrowser;
use crate::util::storage::MemoryStore;

#[derive(Default)]
struct FakeTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
    seen: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    fn push(&self, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .push_back(HttpResponse { status, body: body.to_string() });
    }

    fn last_request(&self) -> HttpRequest {
        self.seen.borrow().last().cloned().expect("a request was sent")
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, crate::net::transport::ApiError> {
        self.seen.borrow_mut().push(request);
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("test scripted a response for every request"))
    }
}

fn booking_api() -> (BookingApi, Rc<FakeTransport>) {
    let transport = Rc::new(FakeTransport::default());
    let api = Rc::new(ApiClient::new(
        "http://api.test",
        Rc::clone(&transport) as Rc<dyn Transport>,
        Rc::new(MemoryStore::default()),
        Rc::new(NullBrowser),
    ));
    (BookingApi::new(api), transport)
}

#[test]
fn list_accommodations_decodes_catalog() {
    let (api, transport) = booking_api();
    transport.push(
        200,
        json!({ "code": 200, "data": [{ "id": 3, "name": "Seaside" }] }),
    );
    let hotels = block_on(api.list_accommodations()).expect("list");
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0].name, "Seaside");
    assert_eq!(transport.last_request().url, "http://api.test/api/accommodation/accommodations/");
}

#[test]
fn accommodation_detail_hits_id_path() {
    let (api, transport) = booking_api();
    transport.push(200, json!({ "code": 200, "data": { "id": 3, "name": "Seaside" } }));
    let hotel = block_on(api.accommodation(3)).expect("detail");
    assert_eq!(hotel.id, 3);
    assert_eq!(
        transport.last_request().url,
        "http://api.test/api/accommodation/accommodations/3/"
    );
}

#[test]
fn create_booking_posts_request_payload() {
    let (api, transport) = booking_api();
    transport.push(
        200,
        json!({ "code": 201, "data": {
            "id": 9,
            "accommodation_id": 3,
            "room_type_id": 5,
            "check_in_date": "2026-09-01",
            "check_out_date": "2026-09-04",
            "total_price": 360.0,
            "booking_status": true,
            "payment_status": false
        }}),
    );
    let request = RoomBookingRequest {
        accommodation_id: 3,
        room_type_id: 5,
        check_in_date: "2026-09-01".to_owned(),
        check_out_date: "2026-09-04".to_owned(),
        number_of_rooms: 2,
    };
    let booking = block_on(api.create_booking(&request)).expect("create");
    assert_eq!(booking.id, 9);

    let sent = transport.last_request();
    assert_eq!(sent.method, HttpMethod::Post);
    match sent.body {
        Some(RequestBody::Json(value)) => {
            assert_eq!(value["accommodation_id"], json!(3));
            assert_eq!(value["number_of_rooms"], json!(2));
        }
        other => panic!("expected json body, got {other:?}"),
    }
}

#[test]
fn create_booking_surfaces_envelope_failure_message() {
    let (api, transport) = booking_api();
    transport.push(200, json!({ "code": 400, "msg": { "check_in_date": ["in the past"] } }));
    let request = RoomBookingRequest {
        accommodation_id: 3,
        room_type_id: 5,
        check_in_date: "2020-01-01".to_owned(),
        check_out_date: "2020-01-02".to_owned(),
        number_of_rooms: 1,
    };
    let error = block_on(api.create_booking(&request)).expect_err("failure");
    assert_eq!(error, "in the past");
}

#[test]
fn cancel_booking_patches_status_flags() {
    let (api, transport) = booking_api();
    transport.push(200, json!({ "code": 200, "data": {} }));
    block_on(api.cancel_booking(9)).expect("cancel");

    let sent = transport.last_request();
    assert_eq!(sent.method, HttpMethod::Patch);
    assert_eq!(sent.url, "http://api.test/api/accommodation/room-bookings/9/");
    match sent.body {
        Some(RequestBody::Json(value)) => {
            assert_eq!(value["booking_status"], json!(false));
            assert_eq!(value["payment_status"], json!(false));
        }
        other => panic!("expected json body, got {other:?}"),
    }
}

#[test]
fn delete_booking_issues_delete() {
    let (api, transport) = booking_api();
    transport.push(200, json!({ "code": 200 }));
    block_on(api.delete_booking(9)).expect("delete");
    assert_eq!(transport.last_request().method, HttpMethod::Delete);
}

#[test]
fn missing_data_on_success_code_is_an_error() {
    let (api, transport) = booking_api();
    transport.push(200, json!({ "code": 200 }));
    let error = block_on(api.list_accommodations()).expect_err("no data");
    assert_eq!(error, "unknown error");
}

#[test]
fn estimated_total_multiplies_rate_nights_rooms() {
    let total = estimated_total(120.0, 3, 2);
    assert!((total - 720.0).abs() < f64::EPSILON);
}
