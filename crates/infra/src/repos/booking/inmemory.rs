use super::IBookingRepo;
use crate::repos::shared::inmemory_repo::*;
use dealbird_domain::{Booking, ID};

pub struct InMemoryBookingRepo {
    bookings: std::sync::Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepo {
    pub fn new() -> Self {
        Self {
            bookings: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for InMemoryBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        insert(booking, &self.bookings);
        Ok(())
    }

    async fn save(&self, booking: &Booking) -> anyhow::Result<()> {
        save(booking, &self.bookings);
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        find(booking_id, &self.bookings)
    }

    async fn find_in_timespan(&self, profile_id: &ID, start_ts: i64, end_ts: i64) -> Vec<Booking> {
        find_by(&self.bookings, |booking| {
            booking.profile_id == *profile_id && booking.overlaps(start_ts, end_ts)
        })
    }
}
