use crate::dtos::{AvailabilityProfileDTO, SlotDTO};
use dealbird_domain::{AvailabilityProfile, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityProfileResponse {
    pub profile: AvailabilityProfileDTO,
}

impl AvailabilityProfileResponse {
    pub fn new(profile: AvailabilityProfile) -> Self {
        Self {
            profile: AvailabilityProfileDTO::new(profile),
        }
    }
}

pub mod create_availability_profile {
    use super::*;
    use crate::dtos::WeeklyRuleDTO;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub duration_minutes: i64,
        pub weekly_rules: Option<Vec<WeeklyRuleDTO>>,
    }

    pub type APIResponse = AvailabilityProfileResponse;
}

pub mod get_availability_profile {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub profile_id: ID,
    }

    pub type APIResponse = AvailabilityProfileResponse;
}

pub mod update_availability_profile {
    use super::*;
    use crate::dtos::WeeklyRuleDTO;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub profile_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub duration_minutes: Option<i64>,
        pub weekly_rules: Option<Vec<WeeklyRuleDTO>>,
    }

    pub type APIResponse = AvailabilityProfileResponse;
}

pub mod get_available_slots {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub profile_id: ID,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub date: String,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub date: String,
        pub slots: Vec<SlotDTO>,
    }
}
