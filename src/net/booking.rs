//! Typed wrappers over `ApiClient` for the accommodation domain.
//!
//! SYSTEM CONTEXT
//! ==============
//! List/detail fetches and the room-booking flow. The other catalog
//! domains (dining, tours, events, transportation) consume the client the
//! same way. Failures come back as display-ready strings; callers decide
//! how to show them.

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use std::rc::Rc;

use crate::net::api::ApiClient;
use crate::net::envelope::{Envelope, GENERIC_ERROR};
use crate::net::transport::ApiError;
use crate::net::types::{Accommodation, RoomBooking, RoomBookingRequest, RoomType};

const ACCOMMODATIONS_PATH: &str = "/api/accommodation/accommodations/";
const ROOM_TYPES_PATH: &str = "/api/accommodation/room-types/";
const ROOM_BOOKINGS_PATH: &str = "/api/accommodation/room-bookings/";

/// Accommodation catalog and booking calls.
pub struct BookingApi {
    api: Rc<ApiClient>,
}

impl BookingApi {
    pub fn new(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns a display-ready message on any failure.
    pub async fn list_accommodations(&self) -> Result<Vec<Accommodation>, String> {
        let result = self.api.get(ACCOMMODATIONS_PATH, &[]).await;
        expect_data(result)
    }

    /// # Errors
    ///
    /// Returns a display-ready message on any failure.
    pub async fn accommodation(&self, id: i64) -> Result<Accommodation, String> {
        let result = self.api.get(&format!("{ACCOMMODATIONS_PATH}{id}/"), &[]).await;
        expect_data(result)
    }

    /// # Errors
    ///
    /// Returns a display-ready message on any failure.
    pub async fn room_type(&self, id: i64) -> Result<RoomType, String> {
        let result = self.api.get(&format!("{ROOM_TYPES_PATH}{id}/"), &[]).await;
        expect_data(result)
    }

    /// Create a booking. The server computes the authoritative price; use
    /// [`estimated_total`] only for pre-submit display.
    ///
    /// # Errors
    ///
    /// Returns a display-ready message on any failure.
    pub async fn create_booking(&self, request: &RoomBookingRequest) -> Result<RoomBooking, String> {
        let body = serde_json::to_value(request).map_err(|_| GENERIC_ERROR.to_owned())?;
        let result = self.api.post(ROOM_BOOKINGS_PATH, body).await;
        expect_data(result)
    }

    /// # Errors
    ///
    /// Returns a display-ready message on any failure.
    pub async fn list_my_bookings(&self) -> Result<Vec<RoomBooking>, String> {
        let result = self.api.get(ROOM_BOOKINGS_PATH, &[]).await;
        expect_data(result)
    }

    /// Mark a booking cancelled. The row survives for the order history.
    ///
    /// # Errors
    ///
    /// Returns a display-ready message on any failure.
    pub async fn cancel_booking(&self, id: i64) -> Result<(), String> {
        let body = serde_json::json!({ "booking_status": false, "payment_status": false });
        let result = self.api.patch(&format!("{ROOM_BOOKINGS_PATH}{id}/"), body).await;
        expect_success(result)
    }

    /// Remove a cancelled booking from the order history.
    ///
    /// # Errors
    ///
    /// Returns a display-ready message on any failure.
    pub async fn delete_booking(&self, id: i64) -> Result<(), String> {
        let result = self.api.delete(&format!("{ROOM_BOOKINGS_PATH}{id}/")).await;
        expect_success(result)
    }
}

/// Pre-submit price estimate shown in the booking form: nights × rate ×
/// rooms. Display only; the server's `total_price` is authoritative.
pub fn estimated_total(price_per_night: f64, nights: u32, rooms: u32) -> f64 {
    price_per_night * f64::from(nights) * f64::from(rooms)
}

fn expect_data<T: serde::de::DeserializeOwned>(
    result: Result<Envelope, ApiError>,
) -> Result<T, String> {
    let envelope = result.map_err(failure_message)?;
    if !envelope.is_success() {
        return Err(envelope.display_message());
    }
    envelope.decode_data().ok_or_else(|| GENERIC_ERROR.to_owned())
}

fn expect_success(result: Result<Envelope, ApiError>) -> Result<(), String> {
    let envelope = result.map_err(failure_message)?;
    if envelope.is_success() {
        Ok(())
    } else {
        Err(envelope.display_message())
    }
}

fn failure_message(error: ApiError) -> String {
    match error {
        ApiError::Status { envelope: Some(envelope), .. } => envelope.display_message(),
        ApiError::Status { envelope: None, .. } | ApiError::Network(_) | ApiError::Decode(_) => {
            GENERIC_ERROR.to_owned()
        }
    }
}
