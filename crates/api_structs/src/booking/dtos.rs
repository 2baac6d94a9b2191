use dealbird_domain::{Booking, BookingStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDTO {
    pub id: ID,
    pub profile_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub status: BookingStatus,
}

impl BookingDTO {
    pub fn new(booking: Booking) -> Self {
        Self {
            id: booking.id.clone(),
            profile_id: booking.profile_id.clone(),
            start_ts: booking.start_ts,
            end_ts: booking.end_ts,
            status: booking.status,
        }
    }
}
