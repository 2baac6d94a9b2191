use super::IBookingRepo;
use dealbird_domain::{Booking, BookingStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookingRaw {
    booking_uid: Uuid,
    profile_uid: Uuid,
    account_uid: Uuid,
    start_ts: i64,
    end_ts: i64,
    status: String,
}

impl From<BookingRaw> for Booking {
    fn from(raw: BookingRaw) -> Self {
        Self {
            id: raw.booking_uid.into(),
            profile_id: raw.profile_uid.into(),
            account_id: raw.account_uid.into(),
            start_ts: raw.start_ts,
            end_ts: raw.end_ts,
            status: BookingStatus::from_str(&raw.status).unwrap_or(BookingStatus::Cancelled),
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for PostgresBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings(booking_uid, profile_uid, account_uid, start_ts, end_ts, status)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(booking.profile_id.inner_ref())
        .bind(booking.account_id.inner_ref())
        .bind(booking.start_ts)
        .bind(booking.end_ts)
        .bind(booking.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, booking: &Booking) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE bookings
            SET start_ts = $2,
            end_ts = $3,
            status = $4
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking.id.inner_ref())
        .bind(booking.start_ts)
        .bind(booking.end_ts)
        .bind(booking.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        sqlx::query_as::<_, BookingRaw>(
            r#"
            SELECT * FROM bookings
            WHERE booking_uid = $1
            "#,
        )
        .bind(booking_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_in_timespan(&self, profile_id: &ID, start_ts: i64, end_ts: i64) -> Vec<Booking> {
        sqlx::query_as::<_, BookingRaw>(
            r#"
            SELECT * FROM bookings
            WHERE profile_uid = $1
            AND start_ts < $3 AND end_ts > $2
            "#,
        )
        .bind(profile_id.inner_ref())
        .bind(start_ts)
        .bind(end_ts)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }
}
