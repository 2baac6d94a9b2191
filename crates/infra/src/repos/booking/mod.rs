mod inmemory;
mod postgres;

use dealbird_domain::{Booking, ID};
pub use inmemory::InMemoryBookingRepo;
pub use postgres::PostgresBookingRepo;

#[async_trait::async_trait]
pub trait IBookingRepo: Send + Sync {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn save(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn find(&self, booking_id: &ID) -> Option<Booking>;
    /// All bookings on the profile whose interval intersects
    /// `[start_ts, end_ts)`, cancelled ones included.
    async fn find_in_timespan(&self, profile_id: &ID, start_ts: i64, end_ts: i64) -> Vec<Booking>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_domain::{Booking, ID};

    #[tokio::test]
    async fn finds_bookings_intersecting_a_timespan() {
        let repo = InMemoryBookingRepo::new();
        let profile_id = ID::default();
        let account_id = ID::default();

        let inside = Booking::new(profile_id.clone(), account_id.clone(), 100, 200);
        let straddling = Booking::new(profile_id.clone(), account_id.clone(), 950, 1050);
        let outside = Booking::new(profile_id.clone(), account_id.clone(), 1000, 1100);
        let other_profile = Booking::new(ID::default(), account_id, 100, 200);
        for booking in [&inside, &straddling, &outside, &other_profile] {
            repo.insert(booking).await.expect("To insert booking");
        }

        let res = repo.find_in_timespan(&profile_id, 0, 1000).await;
        assert_eq!(res.len(), 2);
        assert!(res.contains(&inside));
        assert!(res.contains(&straddling));
    }

    #[tokio::test]
    async fn save_persists_cancellation() {
        let repo = InMemoryBookingRepo::new();
        let mut booking = Booking::new(ID::default(), ID::default(), 100, 200);
        repo.insert(&booking).await.expect("To insert booking");

        booking.cancel();
        repo.save(&booking).await.expect("To save booking");

        let res = repo.find(&booking.id).await.expect("To find booking");
        assert!(!res.is_blocking());
    }
}
