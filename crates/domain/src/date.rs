use chrono::{Datelike, NaiveDate, Weekday};
use std::str::FromStr;

pub fn is_valid_date(datestr: &str) -> anyhow::Result<(i32, u32, u32)> {
    let datestr = String::from(datestr);
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(anyhow::Error::msg(datestr));
    }
    let year = dates[0].parse();
    let month = dates[1].parse();
    let day = dates[2].parse();

    if year.is_err() || month.is_err() || day.is_err() {
        return Err(anyhow::Error::msg(datestr));
    }

    let year = year.unwrap();
    let month = month.unwrap();
    let day = day.unwrap();
    if !(1970..=2100).contains(&year) || month < 1 || month > 12 {
        return Err(anyhow::Error::msg(datestr));
    }

    let month_length = get_month_length(year, month);

    if day < 1 || day > month_length {
        return Err(anyhow::Error::msg(datestr));
    }

    Ok((year, month, day))
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month - 1 {
        0 => 31,
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        2 => 31,
        3 => 30,
        4 => 31,
        5 => 30,
        6 => 31,
        7 => 31,
        8 => 30,
        9 => 31,
        10 => 30,
        11 => 31,
        _ => panic!("Invalid month"),
    }
}

/// A calendar day without a timezone. All instants in DealBird are UTC, so a
/// `Day` spans exactly `[start_millis, end_millis)` in epoch milliseconds.
/// Only constructible through [`Day::new`] or parsing, so the fields are
/// always a real date.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    year: i32,
    month: u32,
    day: u32,
}

impl FromStr for Day {
    type Err = ();

    fn from_str(datestr: &str) -> Result<Self, Self::Err> {
        is_valid_date(datestr)
            .and_then(|(year, month, day)| Day::new(year, month, day))
            .map_err(|_| ())
    }
}

impl Day {
    pub fn new(year: i32, month: u32, day: u32) -> anyhow::Result<Self> {
        if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
            return Err(anyhow::Error::msg(format!("{}-{}-{}", year, month, day)));
        }
        if day < 1 || day > get_month_length(year, month) {
            return Err(anyhow::Error::msg(format!("{}-{}-{}", year, month, day)));
        }
        Ok(Self { year, month, day })
    }

    pub fn weekday(&self) -> Weekday {
        self.date().weekday()
    }

    pub fn start_millis(&self) -> i64 {
        self.date()
            .and_hms_opt(0, 0, 0)
            .expect("Midnight to be a valid time")
            .and_utc()
            .timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.start_millis() + 1000 * 60 * 60 * 24
    }

    fn date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .expect("Day fields to be validated at construction")
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec![
            "2018-1-1",
            "2025-12-31",
            "2020-1-12",
            "2020-2-29",
            "2020-02-2",
            "2020-02-02",
            "2020-2-09",
        ];

        for date in &valid_dates {
            assert!(is_valid_date(date).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-1-32",
            "2020-2-30",
            "2020-0-1",
            "2020-1-0",
        ];

        for date in &invalid_dates {
            assert!(is_valid_date(date).is_err());
        }
    }

    #[test]
    fn it_rejects_out_of_range_day_fields() {
        assert!(Day::new(2023, 13, 1).is_err());
        assert!(Day::new(2023, 0, 1).is_err());
        assert!(Day::new(2023, 2, 29).is_err());
        assert!(Day::new(1969, 1, 1).is_err());
        assert!(Day::new(2101, 1, 1).is_err());
        assert!(Day::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn day_knows_its_weekday_and_bounds() {
        let day = "2023-10-2".parse::<Day>().expect("To parse day");
        assert_eq!(day.weekday(), chrono::Weekday::Mon);
        assert_eq!(day.start_millis(), 1696204800000);
        assert_eq!(day.end_millis() - day.start_millis(), 1000 * 60 * 60 * 24);
    }
}
