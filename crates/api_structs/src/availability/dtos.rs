use dealbird_domain::{AvailabilityProfile, Slot, Weekday, WeeklyRule, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityProfileDTO {
    pub id: ID,
    pub duration_minutes: i64,
    pub weekly_rules: Vec<WeeklyRuleDTO>,
}

impl AvailabilityProfileDTO {
    pub fn new(profile: AvailabilityProfile) -> Self {
        Self {
            id: profile.id.clone(),
            duration_minutes: profile.duration_minutes,
            weekly_rules: profile
                .weekly_rules
                .into_iter()
                .map(WeeklyRuleDTO::new)
                .collect(),
        }
    }
}

/// Time ranges travel as `"HH:MM-HH:MM"` strings and are validated where the
/// profile is created or updated.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRuleDTO {
    pub weekday: Weekday,
    pub ranges: Vec<String>,
}

impl WeeklyRuleDTO {
    pub fn new(rule: WeeklyRule) -> Self {
        Self {
            weekday: rule.weekday,
            ranges: rule.ranges.iter().map(|range| range.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SlotDTO {
    pub start_ts: i64,
    pub duration: i64,
}

impl SlotDTO {
    pub fn new(slot: &Slot) -> Self {
        Self {
            start_ts: slot.start_ts,
            duration: slot.duration,
        }
    }
}
