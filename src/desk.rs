// Front-desk facade. Ties the pure availability and pricing components to
// the store: room search, quoting, booking creation and the booking
// lifecycle all go through here.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::availability::{AvailabilityError, AvailabilityResolver, StayWindow};
use crate::domain::{Booking, BookingStatus, Room};
use crate::pricing::{PriceBreakdown, PriceCalculator, PricingConfig, PricingError, StayDetails};
use crate::store::{HotelStore, StoreError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeskError {
    #[error("no room with number {0}")]
    RoomNotFound(String),

    #[error("no room type with code {0}")]
    RoomTypeNotFound(String),

    #[error("no booking with id {0}")]
    BookingNotFound(i64),

    #[error("room {room} is not available for {check_in} - {check_out}")]
    RoomUnavailable {
        room: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("booking cannot move from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("availability error: {0}")]
    Availability(#[from] AvailabilityError),

    #[error("pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

// A price enquiry for a room type. With discount_percent unset the desk
// offers the best house discount for the stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub room_type: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: i64,
    #[serde(default)]
    pub children: i64,
    #[serde(default)]
    pub extra_beds: i64,
    #[serde(default)]
    pub breakfast_included: bool,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub room_number: String,
    pub customer_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: i64,
    #[serde(default)]
    pub children: i64,
    #[serde(default)]
    pub extra_beds: i64,
    #[serde(default)]
    pub breakfast_included: bool,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
    #[serde(default)]
    pub discount_reason: Option<String>,
}

// The stored booking together with the price breakdown it was charged by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub booking: Booking,
    pub breakdown: PriceBreakdown,
}

// Counters for desk activity
#[derive(Debug, Default)]
pub struct DeskStats {
    pub searches_performed: AtomicUsize,
    pub quotes_issued: AtomicUsize,
    pub bookings_created: AtomicUsize,
    pub bookings_cancelled: AtomicUsize,
    pub conflicts_rejected: AtomicUsize,
}

#[derive(Debug, Default, Clone)]
pub struct DeskStatsReport {
    pub searches_performed: usize,
    pub quotes_issued: usize,
    pub bookings_created: usize,
    pub bookings_cancelled: usize,
    pub conflicts_rejected: usize,
}

pub struct BookingDesk {
    store: Arc<dyn HotelStore>,
    resolver: AvailabilityResolver,
    calculator: PriceCalculator,
    stats: DeskStats,
}

impl BookingDesk {
    pub fn new(store: Arc<dyn HotelStore>, pricing: PricingConfig) -> Self {
        BookingDesk {
            store,
            resolver: AvailabilityResolver::new(),
            calculator: PriceCalculator::new(pricing),
            stats: DeskStats::default(),
        }
    }

    pub async fn find_available_rooms(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Room>, DeskError> {
        let window = StayWindow::new(check_in, check_out)?;

        let rooms = self.store.rooms().await?;
        let bookings = self.store.bookings().await?;
        let free = self.resolver.resolve_window(&window, &rooms, &bookings);

        self.stats.searches_performed.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Search {} - {} returned {} free rooms",
            check_in,
            check_out,
            free.len()
        );

        Ok(free)
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<PriceBreakdown, DeskError> {
        let window = StayWindow::new(request.check_in, request.check_out)?;

        let room_type = self
            .store
            .room_type(&request.room_type)
            .await?
            .ok_or_else(|| DeskError::RoomTypeNotFound(request.room_type.clone()))?;

        let discount_percent = match request.discount_percent {
            Some(percent) => percent,
            None => self
                .calculator
                .suggested_discount(&room_type, &window, Utc::now().date_naive()),
        };

        let details = StayDetails {
            nights: window.nights(),
            adults: request.adults,
            children: request.children,
            extra_beds: request.extra_beds,
            breakfast_included: request.breakfast_included,
            discount_percent,
        };
        let breakdown = self.calculator.quote(&room_type, &details)?;

        self.stats.quotes_issued.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Quoted type {} for {} nights: total {}",
            room_type.code, breakdown.nights, breakdown.total
        );

        Ok(breakdown)
    }

    // Creates a PENDING booking. The room must be bookable and free for the
    // whole window; the quoted total is written on the booking and not
    // recomputed afterwards.
    pub async fn create_booking(
        &self,
        request: BookingRequest,
    ) -> Result<BookingReceipt, DeskError> {
        let window = StayWindow::new(request.check_in, request.check_out)?;

        let room = self
            .store
            .room(&request.room_number)
            .await?
            .ok_or_else(|| DeskError::RoomNotFound(request.room_number.clone()))?;

        let room_bookings = self.store.bookings_for_room(&room.room_number).await?;
        if !room.status.is_bookable()
            || self
                .resolver
                .has_conflict(&window, &room.room_number, &room_bookings)
        {
            self.stats.conflicts_rejected.fetch_add(1, Ordering::SeqCst);
            warn!(
                "Rejected booking for room {} ({}) over {} - {}",
                room.room_number,
                room.status,
                window.check_in(),
                window.check_out()
            );
            return Err(DeskError::RoomUnavailable {
                room: room.room_number,
                check_in: window.check_in(),
                check_out: window.check_out(),
            });
        }

        let room_type = self
            .store
            .room_type(&room.room_type)
            .await?
            .ok_or_else(|| DeskError::RoomTypeNotFound(room.room_type.clone()))?;

        let discount_percent = match request.discount_percent {
            Some(percent) => percent,
            None => self
                .calculator
                .suggested_discount(&room_type, &window, Utc::now().date_naive()),
        };

        let details = StayDetails {
            nights: window.nights(),
            adults: request.adults,
            children: request.children,
            extra_beds: request.extra_beds,
            breakfast_included: request.breakfast_included,
            discount_percent,
        };
        let breakdown = self.calculator.quote(&room_type, &details)?;

        let booking = Booking {
            id: 0, // store assigns
            reference: new_reference(),
            room_number: room.room_number,
            customer_id: request.customer_id,
            check_in: window.check_in(),
            check_out: window.check_out(),
            status: BookingStatus::Pending,
            adults: request.adults,
            children: request.children,
            extra_beds: request.extra_beds,
            breakfast_included: request.breakfast_included,
            discount_percent,
            discount_reason: request.discount_reason,
            total_amount: Some(breakdown.total),
            cancellation_reason: None,
            has_cancellation_fee: false,
            created_at: Utc::now(),
        };
        let stored = self.store.insert_booking(booking).await?;

        self.stats.bookings_created.fetch_add(1, Ordering::SeqCst);
        info!(
            "Created booking {} ({}) for room {}: total {}",
            stored.id, stored.reference, stored.room_number, breakdown.total
        );

        Ok(BookingReceipt {
            booking: stored,
            breakdown,
        })
    }

    pub async fn confirm_booking(&self, id: i64) -> Result<Booking, DeskError> {
        self.transition(id, BookingStatus::Confirmed).await
    }

    pub async fn check_in_booking(&self, id: i64) -> Result<Booking, DeskError> {
        self.transition(id, BookingStatus::CheckedIn).await
    }

    pub async fn complete_booking(&self, id: i64) -> Result<Booking, DeskError> {
        self.transition(id, BookingStatus::Completed).await
    }

    // Cancellation carries its own paperwork: an optional reason and whether
    // the house keeps a fee. The lifecycle rule still applies, so only
    // PENDING and CONFIRMED bookings can land here.
    pub async fn cancel_booking(
        &self,
        id: i64,
        reason: Option<String>,
        with_fee: bool,
    ) -> Result<Booking, DeskError> {
        let mut booking = self.fetch_booking(id).await?;

        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(DeskError::InvalidTransition {
                from: booking.status,
                to: BookingStatus::Cancelled,
            });
        }

        let from = booking.status;
        booking.status = BookingStatus::Cancelled;
        booking.cancellation_reason = reason;
        booking.has_cancellation_fee = with_fee;
        self.store.update_booking(booking.clone()).await?;

        self.stats.bookings_cancelled.fetch_add(1, Ordering::SeqCst);
        info!(
            "Cancelled booking {} (was {}, fee: {})",
            id, from, with_fee
        );

        Ok(booking)
    }

    pub async fn fetch_booking(&self, id: i64) -> Result<Booking, DeskError> {
        self.store
            .booking(id)
            .await?
            .ok_or(DeskError::BookingNotFound(id))
    }

    pub fn stats(&self) -> DeskStatsReport {
        DeskStatsReport {
            searches_performed: self.stats.searches_performed.load(Ordering::SeqCst),
            quotes_issued: self.stats.quotes_issued.load(Ordering::SeqCst),
            bookings_created: self.stats.bookings_created.load(Ordering::SeqCst),
            bookings_cancelled: self.stats.bookings_cancelled.load(Ordering::SeqCst),
            conflicts_rejected: self.stats.conflicts_rejected.load(Ordering::SeqCst),
        }
    }

    async fn transition(&self, id: i64, next: BookingStatus) -> Result<Booking, DeskError> {
        let mut booking = self.fetch_booking(id).await?;

        if !booking.status.can_transition_to(next) {
            return Err(DeskError::InvalidTransition {
                from: booking.status,
                to: next,
            });
        }

        let from = booking.status;
        booking.status = next;
        self.store.update_booking(booking.clone()).await?;

        info!("Booking {} moved from {} to {}", id, from, next);

        Ok(booking)
    }
}

fn new_reference() -> String {
    format!("BK-{:06}", rand::random::<u32>() % 1_000_000)
}
