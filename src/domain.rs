// Domain model for the hotel back-office: rooms, room types and bookings.
// These structs mirror the rows the JSON data store holds, so the serde wire
// names here are the store's field and status names.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Operational state of a physical room. Anything other than Available vetoes
// new bookings outright, independent of booking dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Cleaning,
    Inactive,
}

impl RoomStatus {
    pub fn is_bookable(self) -> bool {
        matches!(self, RoomStatus::Available)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Maintenance => "MAINTENANCE",
            RoomStatus::Cleaning => "CLEANING",
            RoomStatus::Inactive => "INACTIVE",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Booking lifecycle. The allowed moves are
// PENDING -> CONFIRMED -> CHECKED_IN -> COMPLETED, with CANCELLED reachable
// from PENDING or CONFIRMED only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
}

impl BookingStatus {
    // A booking in a terminal state no longer occupies its room.
    pub fn blocks_inventory(self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, CheckedIn)
                | (CheckedIn, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::CheckedIn => "CHECKED_IN",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_number: String,
    // Code of the RoomType this room is priced and sized by.
    pub room_type: String,
    pub status: RoomStatus,
}

// Pricing and capacity rules shared by every room of the type. Immutable for
// the duration of a price calculation; room-type maintenance screens own
// mutation. max_children and max_child_age are catalog data for those
// screens; the price calculation never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub code: String,
    pub name: String,
    pub base_price: Decimal,
    pub max_adults: i64,
    pub max_children: i64,
    pub max_child_age: i64,
    pub extra_person_fee: Decimal,
    pub default_discount_percent: Decimal,
    pub long_stay_discount_percent: Decimal,
    pub early_booking_discount_percent: Decimal,
}

// One stay. The room is occupied for the half-open interval
// [check_in, check_out); check_out is strictly after check_in, enforced when
// the booking is created. total_amount is written once at creation and is not
// recomputed if inputs change later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub reference: String,
    pub room_number: String,
    pub customer_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub adults: i64,
    pub children: i64,
    pub extra_beds: i64,
    pub breakfast_included: bool,
    pub discount_percent: Decimal,
    #[serde(default)]
    pub discount_reason: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub has_cancellation_fee: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}
