//! Hotel record models.
//!
//! Wire names are camelCase. `New*` types are request bodies for creation,
//! `*Update` types are partial updates where an absent field is left alone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Enumerations
// ============================================================================

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    /// Single room.
    Single,
    /// Double room.
    Double,
    /// Suite.
    Suite,
}

impl RoomType {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Suite => "Suite",
        }
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Single" => Ok(RoomType::Single),
            "Double" => Ok(RoomType::Double),
            "Suite" => Ok(RoomType::Suite),
            _ => Err(format!("unknown room type: {s}")),
        }
    }
}

/// Room availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Free to book.
    #[default]
    Available,
    /// Occupied or reserved.
    Booked,
    /// Not bookable.
    #[serde(rename = "Out of Service")]
    OutOfService,
}

impl RoomStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "Available",
            RoomStatus::Booked => "Booked",
            RoomStatus::OutOfService => "Out of Service",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(RoomStatus::Available),
            "Booked" => Ok(RoomStatus::Booked),
            "Out of Service" => Ok(RoomStatus::OutOfService),
            _ => Err(format!("unknown room status: {s}")),
        }
    }
}

/// Job of a staff member. Unrelated to the login [`Role`](crate::Role).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    /// Manager.
    Manager,
    /// Housekeeping.
    Housekeeping,
    /// Front desk.
    Receptionist,
}

impl StaffRole {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Manager => "Manager",
            StaffRole::Housekeeping => "Housekeeping",
            StaffRole::Receptionist => "Receptionist",
        }
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(StaffRole::Manager),
            "Housekeeping" => Ok(StaffRole::Housekeeping),
            "Receptionist" => Ok(StaffRole::Receptionist),
            _ => Err(format!("unknown staff role: {s}")),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Client
// ============================================================================

/// Hotel guest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Client ID.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    pub address: Option<String>,
    /// Arrival date.
    pub check_in_date: Option<NaiveDate>,
    /// Departure date.
    pub check_out_date: Option<NaiveDate>,
    /// Assigned room.
    pub room: Option<i64>,
    /// Services consumed during the stay.
    pub services_used: Vec<i64>,
    /// Transfers booked for the client.
    pub transfers: Vec<i64>,
}

/// Client with its references resolved into full records.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    /// Client ID.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Postal address.
    pub address: Option<String>,
    /// Arrival date.
    pub check_in_date: Option<NaiveDate>,
    /// Departure date.
    pub check_out_date: Option<NaiveDate>,
    /// Assigned room, if it still exists.
    pub room: Option<Room>,
    /// Services in the order they were listed.
    pub services_used: Vec<Service>,
    /// Transfers in the order they were listed.
    pub transfers: Vec<Transfer>,
}

/// Data for creating a client.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    /// Full name.
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Email address.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "email is required"),
        email(message = "email must be a valid email address")
    )]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    /// Postal address.
    pub address: Option<String>,
    /// Arrival date.
    pub check_in_date: Option<NaiveDate>,
    /// Departure date.
    pub check_out_date: Option<NaiveDate>,
    /// Room to assign; must exist.
    pub room: Option<i64>,
    /// Service ids; each must exist.
    #[serde(default)]
    pub services_used: Vec<i64>,
    /// Transfer ids; each must exist.
    #[serde(default)]
    pub transfers: Vec<i64>,
}

impl NewClient {
    /// Create a new client with the required fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }
}

/// Partial client update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub check_in_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub check_out_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub room: Option<Option<i64>>,
    pub services_used: Option<Vec<i64>>,
    pub transfers: Option<Vec<i64>>,
}

impl ClientUpdate {
    /// Check if the update carries no change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.check_in_date.is_none()
            && self.check_out_date.is_none()
            && self.room.is_none()
            && self.services_used.is_none()
            && self.transfers.is_none()
    }
}

// ============================================================================
// Room
// ============================================================================

/// Hotel room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room ID.
    pub id: i64,
    /// Number shown on the door.
    pub room_number: String,
    /// Category, serialized as `type`.
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Nightly rate.
    pub price_per_night: Option<f64>,
    /// Availability.
    pub status: RoomStatus,
    /// Opaque asset ids.
    pub assets: Vec<i64>,
    /// Client currently occupying the room.
    pub current_client: Option<i64>,
}

/// Data for creating a room.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    #[serde(default)]
    #[validate(length(min = 1, message = "roomNumber is required"))]
    pub room_number: String,
    #[serde(rename = "type")]
    #[validate(required(message = "type is required"))]
    pub room_type: Option<RoomType>,
    #[validate(range(min = 0.0, message = "pricePerNight must not be negative"))]
    pub price_per_night: Option<f64>,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub assets: Vec<i64>,
    pub current_client: Option<i64>,
}

impl NewRoom {
    /// Create a new room with the required fields.
    pub fn new(room_number: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            room_number: room_number.into(),
            room_type: Some(room_type),
            ..Default::default()
        }
    }
}

/// Partial room update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[validate(length(min = 1, message = "roomNumber must not be empty"))]
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    #[serde(default, deserialize_with = "double_option")]
    pub price_per_night: Option<Option<f64>>,
    pub status: Option<RoomStatus>,
    pub assets: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub current_client: Option<Option<i64>>,
}

impl RoomUpdate {
    /// Check if the update carries no change.
    pub fn is_empty(&self) -> bool {
        self.room_number.is_none()
            && self.room_type.is_none()
            && self.price_per_night.is_none()
            && self.status.is_none()
            && self.assets.is_none()
            && self.current_client.is_none()
    }
}

// ============================================================================
// Service
// ============================================================================

/// Billable service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Price per use.
    pub price: Option<f64>,
    /// Staff member providing the service.
    pub provided_by: Option<i64>,
}

/// Data for creating a service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: Option<f64>,
    pub provided_by: Option<i64>,
}

/// Partial service update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub provided_by: Option<Option<i64>>,
}

impl ServiceUpdate {
    /// Check if the update carries no change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.provided_by.is_none()
    }
}

// ============================================================================
// Staff
// ============================================================================

/// Staff member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Staff ID.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Job.
    pub role: StaffRole,
    /// Phone or email.
    pub contact: Option<String>,
    /// Task descriptions.
    pub assigned_tasks: Vec<String>,
}

/// Data for creating a staff member.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(required(message = "role is required"))]
    pub role: Option<StaffRole>,
    pub contact: Option<String>,
    #[serde(default)]
    pub assigned_tasks: Vec<String>,
}

impl NewStaff {
    /// Create a new staff member with the required fields.
    pub fn new(name: impl Into<String>, role: StaffRole) -> Self {
        Self {
            name: name.into(),
            role: Some(role),
            ..Default::default()
        }
    }
}

/// Partial staff update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    #[serde(default, deserialize_with = "double_option")]
    pub contact: Option<Option<String>>,
    pub assigned_tasks: Option<Vec<String>>,
}

impl StaffUpdate {
    /// Check if the update carries no change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.contact.is_none()
            && self.assigned_tasks.is_none()
    }
}

// ============================================================================
// Transfer
// ============================================================================

/// Guest transfer between two locations.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    /// Transfer ID.
    pub id: i64,
    /// Client being transferred.
    pub client: Option<i64>,
    /// Pick-up point.
    pub from_location: Option<String>,
    /// Drop-off point.
    pub to_location: Option<String>,
    /// Scheduled time.
    pub date: Option<DateTime<Utc>>,
    /// Driver or escort.
    pub staff: Option<i64>,
}

/// Data for creating a transfer. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub client: Option<i64>,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub staff: Option<i64>,
}

/// Partial transfer update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub client: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub from_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub to_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub staff: Option<Option<i64>>,
}

impl TransferUpdate {
    /// Check if the update carries no change.
    pub fn is_empty(&self) -> bool {
        self.client.is_none()
            && self.from_location.is_none()
            && self.to_location.is_none()
            && self.date.is_none()
            && self.staff.is_none()
    }
}
