// Availability resolution: which rooms are free for a requested stay window.
//
// A stay occupies the half-open interval [check_in, check_out), so two stays
// conflict iff requested.check_in < booked.check_out AND
// requested.check_out > booked.check_in. Back-to-back stays sharing a
// boundary date never conflict.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::domain::{Booking, Room};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AvailabilityError {
    #[error("invalid stay window: check-out {check_out} must be after check-in {check_in}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("date parse error: {0}")]
    DateParse(String),
}

// Parses a calendar date in the store's YYYY-MM-DD form.
pub fn parse_date(input: &str) -> Result<NaiveDate, AvailabilityError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| AvailabilityError::DateParse(format!("{}: {}", input, e)))
}

// A validated stay window. Construction guarantees check_out > check_in, so
// every window holds at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayWindow {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, AvailabilityError> {
        if check_out <= check_in {
            return Err(AvailabilityError::InvalidRange {
                check_in,
                check_out,
            });
        }
        Ok(StayWindow {
            check_in,
            check_out,
        })
    }

    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, AvailabilityError> {
        StayWindow::new(parse_date(check_in)?, parse_date(check_out)?)
    }

    // Front-desk clients hand over full timestamps; occupancy is tracked per
    // calendar date, so the time of day is dropped before validation.
    pub fn from_date_times(
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Self, AvailabilityError> {
        StayWindow::new(check_in.date_naive(), check_out.date_naive())
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && self.check_out > check_in
    }
}

// Filters a room catalog down to the rooms free for a stay window. Pure over
// its inputs; the desk feeds it snapshots from the store.
pub struct AvailabilityResolver;

impl AvailabilityResolver {
    pub fn new() -> Self {
        AvailabilityResolver
    }

    pub fn resolve(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        rooms: &[Room],
        bookings: &[Booking],
    ) -> Result<Vec<Room>, AvailabilityError> {
        let window = StayWindow::new(check_in, check_out)?;
        Ok(self.resolve_window(&window, rooms, bookings))
    }

    // Catalog order is preserved: the result is the input room list minus the
    // rooms that fail the status check or hold a conflicting booking.
    pub fn resolve_window(
        &self,
        window: &StayWindow,
        rooms: &[Room],
        bookings: &[Booking],
    ) -> Vec<Room> {
        rooms
            .iter()
            .filter(|room| room.status.is_bookable())
            .filter(|room| !self.has_conflict(window, &room.room_number, bookings))
            .cloned()
            .collect()
    }

    // A room conflicts when any booking on it still blocks inventory and its
    // dates overlap the window. Cancelled and completed bookings are skipped.
    pub fn has_conflict(
        &self,
        window: &StayWindow,
        room_number: &str,
        bookings: &[Booking],
    ) -> bool {
        bookings
            .iter()
            .filter(|b| b.room_number == room_number)
            .filter(|b| b.status.blocks_inventory())
            .any(|b| window.overlaps(b.check_in, b.check_out))
    }
}
