// Main library file for the hotel back-office core

pub mod availability;
pub mod desk;
pub mod domain;
pub mod pricing;
pub mod store;

// Re-export key types for convenience
pub use availability::{AvailabilityError, AvailabilityResolver, StayWindow};
pub use desk::{
    BookingDesk, BookingReceipt, BookingRequest, DeskError, DeskStatsReport, QuoteRequest,
};
pub use domain::{Booking, BookingStatus, Room, RoomStatus, RoomType};
pub use pricing::{PriceBreakdown, PriceCalculator, PricingConfig, PricingError, StayDetails};
pub use store::{CatalogSnapshot, HotelStore, InMemoryStore, StoreError};
