// Persistence seam for the back office. The desk talks to a HotelStore
// trait object; the in-memory implementation behind it loads and saves the
// whole catalog as one JSON snapshot, which is how the house data files are
// exchanged with the property-management side.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{Booking, Room, RoomType};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("room {room} references unknown room type {room_type}")]
    UnknownRoomType { room: String, room_type: String },

    #[error("duplicate room number {0}")]
    DuplicateRoom(String),

    #[error("no booking with id {0}")]
    MissingBooking(i64),
}

// Repository seam the desk is written against. The in-memory implementation
// cannot fail on reads, but a file or HTTP backed one can, so every method
// returns a Result. A missing row on a point lookup is None, not an error.
#[async_trait]
pub trait HotelStore: Send + Sync {
    // Rooms come back in catalog order, the order the house lists them in.
    async fn rooms(&self) -> Result<Vec<Room>, StoreError>;

    async fn room(&self, room_number: &str) -> Result<Option<Room>, StoreError>;

    async fn room_type(&self, code: &str) -> Result<Option<RoomType>, StoreError>;

    async fn bookings(&self) -> Result<Vec<Booking>, StoreError>;

    async fn bookings_for_room(&self, room_number: &str) -> Result<Vec<Booking>, StoreError>;

    async fn booking(&self, id: i64) -> Result<Option<Booking>, StoreError>;

    // Assigns the next free id and returns the stored row.
    async fn insert_booking(&self, booking: Booking) -> Result<Booking, StoreError>;

    async fn update_booking(&self, booking: Booking) -> Result<(), StoreError>;
}

// Wire form of a full catalog dump. Sections may be omitted in hand-written
// seed files, so each one defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

pub struct InMemoryStore {
    // Vec keeps catalog order; DashMap would lose it.
    rooms: RwLock<Vec<Room>>,
    room_types: DashMap<String, RoomType>,
    bookings: DashMap<i64, Booking>,
    next_booking_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            rooms: RwLock::new(Vec::new()),
            room_types: DashMap::new(),
            bookings: DashMap::new(),
            next_booking_id: AtomicI64::new(1),
        }
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self, StoreError> {
        let store = InMemoryStore::new();

        for room_type in snapshot.room_types {
            store.room_types.insert(room_type.code.clone(), room_type);
        }

        {
            let mut rooms = store.rooms.write();
            for room in snapshot.rooms {
                if !store.room_types.contains_key(&room.room_type) {
                    return Err(StoreError::UnknownRoomType {
                        room: room.room_number,
                        room_type: room.room_type,
                    });
                }
                if rooms.iter().any(|r| r.room_number == room.room_number) {
                    return Err(StoreError::DuplicateRoom(room.room_number));
                }
                rooms.push(room);
            }
        }

        let mut max_id = 0;
        for booking in snapshot.bookings {
            max_id = max_id.max(booking.id);
            store.bookings.insert(booking.id, booking);
        }
        store.next_booking_id.store(max_id + 1, Ordering::SeqCst);

        info!(
            "Loaded catalog snapshot: {} room types, {} rooms, {} bookings",
            store.room_types.len(),
            store.rooms.read().len(),
            store.bookings.len()
        );

        Ok(store)
    }

    pub fn from_snapshot_json(json: &str) -> Result<Self, StoreError> {
        let snapshot: CatalogSnapshot =
            serde_json::from_str(json).map_err(|e| StoreError::Snapshot(e.to_string()))?;
        InMemoryStore::from_snapshot(snapshot)
    }

    // Serializes the current state back into the snapshot form. Room types
    // and bookings live in hash maps, so they are sorted here to keep dumps
    // diffable run to run.
    pub fn snapshot_json(&self) -> Result<String, StoreError> {
        let mut room_types: Vec<RoomType> =
            self.room_types.iter().map(|e| e.value().clone()).collect();
        room_types.sort_by(|a, b| a.code.cmp(&b.code));

        let mut bookings: Vec<Booking> = self.bookings.iter().map(|e| e.value().clone()).collect();
        bookings.sort_by_key(|b| b.id);

        let snapshot = CatalogSnapshot {
            room_types,
            rooms: self.rooms.read().clone(),
            bookings,
        };

        serde_json::to_string_pretty(&snapshot).map_err(|e| StoreError::Snapshot(e.to_string()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        InMemoryStore::new()
    }
}

#[async_trait]
impl HotelStore for InMemoryStore {
    async fn rooms(&self) -> Result<Vec<Room>, StoreError> {
        Ok(self.rooms.read().clone())
    }

    async fn room(&self, room_number: &str) -> Result<Option<Room>, StoreError> {
        Ok(self
            .rooms
            .read()
            .iter()
            .find(|r| r.room_number == room_number)
            .cloned())
    }

    async fn room_type(&self, code: &str) -> Result<Option<RoomType>, StoreError> {
        Ok(self.room_types.get(code).map(|e| e.value().clone()))
    }

    async fn bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let mut bookings: Vec<Booking> = self.bookings.iter().map(|e| e.value().clone()).collect();
        bookings.sort_by_key(|b| b.id);
        Ok(bookings)
    }

    async fn bookings_for_room(&self, room_number: &str) -> Result<Vec<Booking>, StoreError> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| e.value().room_number == room_number)
            .map(|e| e.value().clone())
            .collect();
        bookings.sort_by_key(|b| b.id);
        Ok(bookings)
    }

    async fn booking(&self, id: i64) -> Result<Option<Booking>, StoreError> {
        Ok(self.bookings.get(&id).map(|e| e.value().clone()))
    }

    async fn insert_booking(&self, mut booking: Booking) -> Result<Booking, StoreError> {
        booking.id = self.next_booking_id.fetch_add(1, Ordering::SeqCst);
        self.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_booking(&self, booking: Booking) -> Result<(), StoreError> {
        match self.bookings.get_mut(&booking.id) {
            Some(mut entry) => {
                *entry = booking;
                Ok(())
            }
            None => Err(StoreError::MissingBooking(booking.id)),
        }
    }
}
