use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotel_backoffice::availability::AvailabilityResolver;
use hotel_backoffice::domain::{Booking, BookingStatus, Room, RoomStatus};
use rand::{thread_rng, Rng};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;

fn build_rooms(count: usize) -> Vec<Room> {
    (0..count)
        .map(|i| Room {
            room_number: format!("{}", 100 + i),
            room_type: "STD".to_string(),
            status: if i % 10 == 0 {
                RoomStatus::Cleaning
            } else {
                RoomStatus::Available
            },
        })
        .collect()
}

fn build_bookings(rooms: &[Room]) -> Vec<Booking> {
    let mut rng = thread_rng();
    rooms
        .iter()
        .enumerate()
        .map(|(i, room)| {
            let start: u32 = rng.gen_range(1..=20);
            let length: i64 = rng.gen_range(1..=7);
            let check_in = NaiveDate::from_ymd_opt(2025, 6, start).unwrap();
            Booking {
                id: i as i64 + 1,
                reference: format!("BK-{:06}", i + 1),
                room_number: room.room_number.clone(),
                customer_id: i as i64,
                check_in,
                check_out: check_in + chrono::Duration::days(length),
                status: if i % 7 == 0 {
                    BookingStatus::Cancelled
                } else {
                    BookingStatus::Confirmed
                },
                adults: 2,
                children: 0,
                extra_beds: 0,
                breakfast_included: false,
                discount_percent: Decimal::ZERO,
                discount_reason: None,
                total_amount: None,
                cancellation_reason: None,
                has_cancellation_fee: false,
                created_at: chrono::Utc::now(),
            }
        })
        .collect()
}

// Benchmark for availability resolution over growing catalogs
pub fn availability_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("room_availability");

    // Benchmark with different catalog sizes
    for room_count in [50, 200, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(room_count),
            room_count,
            |b, &room_count| {
                let rooms = Arc::new(build_rooms(room_count));
                let bookings = Arc::new(build_bookings(&rooms));

                b.iter(|| {
                    // Spawn multiple threads to simulate concurrent searches
                    let mut handles = vec![];
                    for _ in 0..4 {
                        let rooms = Arc::clone(&rooms);
                        let bookings = Arc::clone(&bookings);

                        let handle = thread::spawn(move || {
                            let resolver = AvailabilityResolver::new();
                            let mut rng = thread_rng();
                            let mut found = 0usize;

                            for _ in 0..50 {
                                let start: u32 = rng.gen_range(1..=25);
                                let length: u32 = rng.gen_range(1..=4);
                                let check_in = NaiveDate::from_ymd_opt(2025, 6, start).unwrap();
                                let check_out =
                                    check_in + chrono::Duration::days(length as i64);

                                let free = resolver
                                    .resolve(check_in, check_out, &rooms, &bookings)
                                    .unwrap();
                                found += free.len();
                            }

                            found
                        });

                        handles.push(handle);
                    }

                    // Wait for all threads to complete
                    let mut total = 0usize;
                    for handle in handles {
                        total += handle.join().unwrap();
                    }

                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, availability_benchmark);
criterion_main!(benches);
