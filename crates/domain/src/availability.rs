use crate::booking::Booking;
use crate::date::Day;
use crate::shared::entity::{Entity, ID};
use serde::{de::Visitor, Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const MINUTE: i64 = 1000 * 60;

/// Upper bound on an appointment length. A single slot never spans more than
/// one day, and the bound keeps all millisecond arithmetic far from overflow.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// A wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Result<Self, InvalidTimeRangeError> {
        if hours > 23 || minutes > 59 {
            return Err(InvalidTimeRangeError::Malformed(format!(
                "{}:{}",
                hours, minutes
            )));
        }
        Ok(Self { hours, minutes })
    }

    pub fn minute_of_day(&self) -> i64 {
        (self.hours * 60 + self.minutes) as i64
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidTimeRangeError::Malformed(s.to_string());
        let parts = s.split(':').collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(malformed());
        }
        let hours = parts[0].parse::<u32>().map_err(|_| malformed())?;
        let minutes = parts[1].parse::<u32>().map_err(|_| malformed())?;
        Self::new(hours, minutes).map_err(|_| malformed())
    }
}

#[derive(Error, Debug)]
pub enum InvalidTimeRangeError {
    #[error("Time range: {0} is malformed, expected the format HH:MM-HH:MM")]
    Malformed(String),
    #[error("Time range: {0} must end strictly after it starts")]
    EndNotAfterStart(String),
}

/// A validated open interval within a single day, parsed from
/// `"HH:MM-HH:MM"`. The end always follows the start strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, InvalidTimeRangeError> {
        if end <= start {
            return Err(InvalidTimeRangeError::EndNotAfterStart(format!(
                "{}-{}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TimeRange {
    type Err = InvalidTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('-').collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(InvalidTimeRangeError::Malformed(s.to_string()));
        }
        let start = parts[0]
            .parse::<TimeOfDay>()
            .map_err(|_| InvalidTimeRangeError::Malformed(s.to_string()))?;
        let end = parts[1]
            .parse::<TimeOfDay>()
            .map_err(|_| InvalidTimeRangeError::Malformed(s.to_string()))?;
        Self::new(start, end)
    }
}

impl Serialize for TimeRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeRangeVisitor;

        impl<'de> Visitor<'de> for TimeRangeVisitor {
            type Value = TimeRange;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A time range in the format HH:MM-HH:MM")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeRange, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<TimeRange>()
                    .map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(TimeRangeVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

/// Opening hours for one weekday. A weekday without a rule, or with an empty
/// range list, is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyRule {
    pub weekday: Weekday,
    pub ranges: Vec<TimeRange>,
}

/// A bookable start time. The implicit end is `start_ts + duration`. Slots
/// are derived fresh on every query and are never persisted.
#[derive(Serialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start_ts: i64,
    pub duration: i64,
}

/// Weekly opening hours plus an appointment duration for one creator.
#[derive(Debug, Clone)]
pub struct AvailabilityProfile {
    pub id: ID,
    pub account_id: ID,
    pub duration_minutes: i64,
    pub weekly_rules: Vec<WeeklyRule>,
}

impl AvailabilityProfile {
    pub fn new(account_id: ID, duration_minutes: i64) -> Self {
        Self {
            id: Default::default(),
            account_id,
            duration_minutes,
            weekly_rules: WeeklyRule::default_rules(),
        }
    }

    /// Generates the free slots for one calendar day, earliest first within
    /// each range. Ranges are processed independently in list order and the
    /// outputs concatenated, so overlapping ranges can yield duplicate start
    /// times. Cancelled bookings never block a slot.
    pub fn slots_for_day(&self, day: &Day, bookings: &[Booking]) -> Vec<Slot> {
        let mut slots = Vec::new();
        if self.duration_minutes < 1 || self.duration_minutes > MAX_DURATION_MINUTES {
            return slots;
        }
        let duration = self.duration_minutes * MINUTE;

        let weekday = Weekday::from(day.weekday());
        let day_start = day.start_millis();
        let busy = bookings
            .iter()
            .filter(|booking| booking.is_blocking())
            .map(|booking| (booking.start_ts, booking.end_ts))
            .collect::<Vec<_>>();

        for rule in self.weekly_rules.iter().filter(|r| r.weekday == weekday) {
            for range in &rule.ranges {
                let range_end = day_start + range.end().minute_of_day() * MINUTE;
                let mut cursor = day_start + range.start().minute_of_day() * MINUTE;

                // Fixed grid from the range start: the cursor never snaps to
                // a booking's end, a booked candidate just gets skipped.
                while cursor + duration <= range_end {
                    let collides = busy
                        .iter()
                        .any(|&(busy_start, busy_end)| cursor < busy_end && busy_start < cursor + duration);
                    if !collides {
                        slots.push(Slot {
                            start_ts: cursor,
                            duration,
                        });
                    }
                    cursor += duration;
                }
            }
        }

        slots
    }
}

impl Entity for AvailabilityProfile {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl WeeklyRule {
    fn default_rules() -> Vec<Self> {
        let weekdays = vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ];
        weekdays
            .into_iter()
            .map(|weekday| WeeklyRule {
                weekday,
                ranges: vec!["09:00-17:00".parse().expect("Valid default time range")],
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booking::BookingStatus;

    fn monday() -> Day {
        "2023-10-2".parse::<Day>().expect("To parse day")
    }

    fn profile_with(duration_minutes: i64, ranges: Vec<&str>) -> AvailabilityProfile {
        AvailabilityProfile {
            id: Default::default(),
            account_id: Default::default(),
            duration_minutes,
            weekly_rules: vec![WeeklyRule {
                weekday: Weekday::Mon,
                ranges: ranges
                    .into_iter()
                    .map(|r| r.parse().expect("To parse range"))
                    .collect(),
            }],
        }
    }

    fn booking_at(day: &Day, range: &str, status: BookingStatus) -> Booking {
        let range = range.parse::<TimeRange>().expect("To parse range");
        Booking {
            id: Default::default(),
            profile_id: Default::default(),
            account_id: Default::default(),
            start_ts: day.start_millis() + range.start().minute_of_day() * MINUTE,
            end_ts: day.start_millis() + range.end().minute_of_day() * MINUTE,
            status,
        }
    }

    fn starts(slots: &[Slot], day: &Day) -> Vec<String> {
        slots
            .iter()
            .map(|slot| {
                let minute_of_day = (slot.start_ts - day.start_millis()) / MINUTE;
                format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
            })
            .collect()
    }

    #[test]
    fn closed_day_yields_no_slots() {
        let profile = profile_with(30, vec!["09:00-10:00"]);
        let sunday = "2023-10-1".parse::<Day>().expect("To parse day");
        assert!(profile.slots_for_day(&sunday, &[]).is_empty());

        let closed = profile_with(30, vec![]);
        assert!(closed.slots_for_day(&monday(), &[]).is_empty());
    }

    #[test]
    fn slot_ending_exactly_at_range_end_is_included() {
        let day = monday();
        let profile = profile_with(30, vec!["09:00-10:00"]);
        let slots = profile.slots_for_day(&day, &[]);
        assert_eq!(starts(&slots, &day), vec!["09:00", "09:30"]);
    }

    #[test]
    fn booked_candidate_is_skipped_without_shifting_the_grid() {
        let day = monday();
        let profile = profile_with(30, vec!["09:00-10:00"]);
        let booking = booking_at(&day, "09:30-10:00", BookingStatus::Active);
        let slots = profile.slots_for_day(&day, &[booking]);
        assert_eq!(starts(&slots, &day), vec!["09:00"]);
    }

    #[test]
    fn slot_ending_when_booking_starts_is_free() {
        let day = monday();
        let profile = profile_with(60, vec!["09:00-12:00"]);
        let booking = booking_at(&day, "10:00-11:00", BookingStatus::Active);
        let slots = profile.slots_for_day(&day, &[booking]);
        assert_eq!(starts(&slots, &day), vec!["09:00", "11:00"]);
    }

    #[test]
    fn cancelled_bookings_never_block() {
        let day = monday();
        let profile = profile_with(30, vec!["09:00-10:00"]);
        let booking = booking_at(&day, "09:00-10:00", BookingStatus::Cancelled);
        let slots = profile.slots_for_day(&day, &[booking]);
        assert_eq!(starts(&slots, &day), vec!["09:00", "09:30"]);
    }

    #[test]
    fn range_shorter_than_duration_yields_nothing() {
        let day = monday();
        let profile = profile_with(45, vec!["09:00-09:30"]);
        assert!(profile.slots_for_day(&day, &[]).is_empty());
    }

    #[test]
    fn overlapping_ranges_yield_duplicate_starts() {
        let day = monday();
        let profile = profile_with(30, vec!["09:00-10:00", "09:30-10:30"]);
        let slots = profile.slots_for_day(&day, &[]);
        assert_eq!(
            starts(&slots, &day),
            vec!["09:00", "09:30", "09:30", "10:00"]
        );
    }

    #[test]
    fn generation_is_pure() {
        let day = monday();
        let profile = profile_with(30, vec!["09:00-11:00"]);
        let booking = booking_at(&day, "10:00-10:30", BookingStatus::Active);
        let first = profile.slots_for_day(&day, &[booking.clone()]);
        let second = profile.slots_for_day(&day, &[booking]);
        assert_eq!(first, second);
    }

    #[test]
    fn non_positive_duration_yields_nothing() {
        let day = monday();
        for duration in [0, -15] {
            let profile = profile_with(duration, vec!["09:00-17:00"]);
            assert!(profile.slots_for_day(&day, &[]).is_empty());
        }
    }

    #[test]
    fn duration_beyond_one_day_yields_nothing() {
        let day = monday();
        for duration in [MAX_DURATION_MINUTES + 1, i64::MAX] {
            let profile = profile_with(duration, vec!["09:00-17:00"]);
            assert!(profile.slots_for_day(&day, &[]).is_empty());
        }
    }

    #[test]
    fn it_parses_time_ranges() {
        let range = "08:05-12:30".parse::<TimeRange>().expect("To parse");
        assert_eq!(range.start().minute_of_day(), 8 * 60 + 5);
        assert_eq!(range.end().minute_of_day(), 12 * 60 + 30);
        assert_eq!(range.to_string(), "08:05-12:30");
    }

    #[test]
    fn it_rejects_malformed_time_ranges() {
        let malformed = vec![
            "",
            "09:00",
            "09:00-",
            "9am-5pm",
            "24:00-25:00",
            "09:60-10:00",
            "09:00-09:00",
            "10:00-09:00",
        ];
        for range in &malformed {
            assert!(range.parse::<TimeRange>().is_err(), "accepted {}", range);
        }
    }
}
