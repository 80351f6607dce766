// Price calculation for a stay. All money amounts are rust_decimal values so
// percentage discounts come out exact; the computation order is fixed:
//
//   base          = base_price * nights
//   extra_person  = max(0, adults - max_adults) * extra_person_fee * nights
//   extra_bed     = extra_beds * extra_bed_nightly_rate * nights
//   breakfast     = (adults + children) * breakfast_nightly_rate * nights
//   subtotal      = base + extra_person + extra_bed + breakfast
//   discount      = subtotal * discount_percent / 100
//   total         = subtotal - discount
//
// Children never count toward the extra-person fee; only adults beyond the
// room type's max_adults do.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::availability::StayWindow;
use crate::domain::{Booking, RoomType};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid stay: a booking must cover at least one night, got {0}")]
    InvalidStay(i64),

    #[error("invalid discount percent: {0} is outside 0..=100")]
    InvalidDiscount(Decimal),

    #[error("invalid occupancy: {0}")]
    InvalidOccupancy(String),
}

// Hotel-wide nightly rates and discount thresholds. Per-room-type amounts
// live on RoomType; these are the same for every room in the house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub extra_bed_nightly_rate: Decimal,
    pub breakfast_nightly_rate: Decimal,
    pub long_stay_min_nights: i64,
    pub early_booking_min_days: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            extra_bed_nightly_rate: Decimal::from(150_000),
            breakfast_nightly_rate: Decimal::from(50_000),
            long_stay_min_nights: 7,
            early_booking_min_days: 30,
        }
    }
}

// Everything about the stay that the calculation needs, detached from any
// particular booking row.
#[derive(Debug, Clone, PartialEq)]
pub struct StayDetails {
    pub nights: i64,
    pub adults: i64,
    pub children: i64,
    pub extra_beds: i64,
    pub breakfast_included: bool,
    pub discount_percent: Decimal,
}

impl From<&Booking> for StayDetails {
    fn from(booking: &Booking) -> Self {
        StayDetails {
            nights: booking.nights(),
            adults: booking.adults,
            children: booking.children,
            extra_beds: booking.extra_beds,
            breakfast_included: booking.breakfast_included,
            discount_percent: booking.discount_percent,
        }
    }
}

// Every intermediate of the calculation, so receipts and audits can show how
// the total came to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub nights: i64,
    pub base: Decimal,
    pub extra_person_fee: Decimal,
    pub extra_bed_fee: Decimal,
    pub breakfast_fee: Decimal,
    pub subtotal: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

pub struct PriceCalculator {
    config: PricingConfig,
}

impl PriceCalculator {
    pub fn new(config: PricingConfig) -> Self {
        PriceCalculator { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn quote(
        &self,
        room_type: &RoomType,
        stay: &StayDetails,
    ) -> Result<PriceBreakdown, PricingError> {
        if stay.nights < 1 {
            return Err(PricingError::InvalidStay(stay.nights));
        }
        if stay.adults < 1 {
            return Err(PricingError::InvalidOccupancy(format!(
                "at least one adult required, got {}",
                stay.adults
            )));
        }
        if stay.children < 0 {
            return Err(PricingError::InvalidOccupancy(format!(
                "children cannot be negative, got {}",
                stay.children
            )));
        }
        if stay.extra_beds < 0 {
            return Err(PricingError::InvalidOccupancy(format!(
                "extra beds cannot be negative, got {}",
                stay.extra_beds
            )));
        }
        if stay.discount_percent < Decimal::ZERO || stay.discount_percent > Decimal::ONE_HUNDRED {
            return Err(PricingError::InvalidDiscount(stay.discount_percent));
        }

        let nights = Decimal::from(stay.nights);

        let base = room_type.base_price * nights;

        let extra_adults = (stay.adults - room_type.max_adults).max(0);
        let extra_person_fee = Decimal::from(extra_adults) * room_type.extra_person_fee * nights;

        let extra_bed_fee =
            Decimal::from(stay.extra_beds) * self.config.extra_bed_nightly_rate * nights;

        let breakfast_fee = if stay.breakfast_included {
            Decimal::from(stay.adults + stay.children) * self.config.breakfast_nightly_rate * nights
        } else {
            Decimal::ZERO
        };

        let subtotal = base + extra_person_fee + extra_bed_fee + breakfast_fee;
        let discount_amount = subtotal * stay.discount_percent / Decimal::ONE_HUNDRED;
        let total = subtotal - discount_amount;

        Ok(PriceBreakdown {
            nights: stay.nights,
            base,
            extra_person_fee,
            extra_bed_fee,
            breakfast_fee,
            subtotal,
            discount_percent: stay.discount_percent,
            discount_amount,
            total,
        })
    }

    // Best single discount the house offers for this stay; campaigns do not
    // stack. Zero-percent entries on the room type simply never win.
    pub fn suggested_discount(
        &self,
        room_type: &RoomType,
        window: &StayWindow,
        booked_on: NaiveDate,
    ) -> Decimal {
        let mut best = room_type.default_discount_percent;

        if window.nights() >= self.config.long_stay_min_nights
            && room_type.long_stay_discount_percent > best
        {
            best = room_type.long_stay_discount_percent;
        }

        let lead_days = (window.check_in() - booked_on).num_days();
        if lead_days >= self.config.early_booking_min_days
            && room_type.early_booking_discount_percent > best
        {
            best = room_type.early_booking_discount_percent;
        }

        best
    }
}
