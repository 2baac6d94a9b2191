use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid booking status: {}", s)),
        }
    }
}

/// A reserved appointment interval on an `AvailabilityProfile`.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: ID,
    pub profile_id: ID,
    pub account_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(profile_id: ID, account_id: ID, start_ts: i64, end_ts: i64) -> Self {
        Self {
            id: Default::default(),
            profile_id,
            account_id,
            start_ts,
            end_ts,
            status: BookingStatus::Active,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// Closed-open interval intersection: touching endpoints do not overlap.
    pub fn overlaps(&self, start_ts: i64, end_ts: i64) -> bool {
        start_ts < self.end_ts && self.start_ts < end_ts
    }

    pub fn cancel(&mut self) {
        self.status = BookingStatus::Cancelled;
    }
}

impl Entity for Booking {
    fn id(&self) -> &ID {
        &self.id
    }
}
