//! Wire DTOs shared with the booking backend.
//!
//! These mirror the server's payloads inside the `{code, data, msg}`
//! envelope; optional fields default so older server revisions still parse.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated user as returned by the current-user endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_active: bool,
}

/// Token endpoint payload. Older deployments issue a single token; newer
/// ones add a refresh token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    pub token: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// A hotel/property summary from the accommodation catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub star_rating: Option<i64>,
    /// Room type ids offered by this property.
    #[serde(default)]
    pub types: Vec<i64>,
}

/// A bookable room category within a property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub room_type: String,
    #[serde(default)]
    pub price_per_night: Option<f64>,
}

/// Payload for creating a room booking. The server computes the
/// authoritative price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomBookingRequest {
    pub accommodation_id: i64,
    pub room_type_id: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_rooms: u32,
}

/// A room booking as returned by the bookings endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomBooking {
    pub id: i64,
    pub accommodation_id: i64,
    pub room_type_id: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    #[serde(default)]
    pub total_price: Option<f64>,
    /// False once cancelled.
    #[serde(default)]
    pub booking_status: bool,
    #[serde(default)]
    pub payment_status: bool,
}
