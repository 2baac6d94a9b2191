use chrono::Utc;

/// Abstracts away the system clock so use cases and background jobs can be
/// tested with a fixed time.
pub trait ISys: Send + Sync {
    fn get_timestamp_millis(&self) -> i64;
}

pub struct RealSys {}

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
