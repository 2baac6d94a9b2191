use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::create_availability_profile::{APIResponse, RequestBody};
use dealbird_api_structs::dtos::WeeklyRuleDTO;
use dealbird_domain::{AvailabilityProfile, TimeRange, WeeklyRule, ID, MAX_DURATION_MINUTES};
use dealbird_infra::DealbirdContext;

/// Time ranges arrive as `"HH:MM-HH:MM"` strings and are only trusted after
/// this parse. A rule with no valid ranges is rejected rather than silently
/// kept empty.
pub(crate) fn parse_weekly_rules(rules: &[WeeklyRuleDTO]) -> Result<Vec<WeeklyRule>, String> {
    let mut parsed = Vec::with_capacity(rules.len());
    for rule in rules {
        let mut ranges = Vec::with_capacity(rule.ranges.len());
        for range in &rule.ranges {
            let range = range
                .parse::<TimeRange>()
                .map_err(|e| format!("{}: {}", range, e))?;
            ranges.push(range);
        }
        parsed.push(WeeklyRule {
            weekday: rule.weekday,
            ranges,
        });
    }
    Ok(parsed)
}

pub async fn create_availability_profile_controller(
    http_req: HttpRequest,
    ctx: web::Data<DealbirdContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = CreateAvailabilityProfileUseCase {
        account_id: account.id,
        duration_minutes: body.0.duration_minutes,
        weekly_rules: body.0.weekly_rules,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.profile)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct CreateAvailabilityProfileUseCase {
    pub account_id: ID,
    pub duration_minutes: i64,
    pub weekly_rules: Option<Vec<WeeklyRuleDTO>>,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidDuration(i64),
    InvalidTimeRange(String),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDuration(duration) => Self::BadClientData(format!(
                "Invalid slot duration: {}. It should be a positive number of minutes, at most {}.",
                duration, MAX_DURATION_MINUTES
            )),
            UseCaseError::InvalidTimeRange(msg) => Self::BadClientData(format!(
                "Invalid time range: {}. It should be on the form HH:MM-HH:MM with end after start.",
                msg
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub profile: AvailabilityProfile,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAvailabilityProfileUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAvailabilityProfile";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        if self.duration_minutes <= 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(UseCaseError::InvalidDuration(self.duration_minutes));
        }

        let mut profile = AvailabilityProfile::new(self.account_id.clone(), self.duration_minutes);
        if let Some(rules) = &self.weekly_rules {
            profile.weekly_rules =
                parse_weekly_rules(rules).map_err(UseCaseError::InvalidTimeRange)?;
        }

        let res = ctx.repos.availability_profiles.insert(&profile).await;
        match res {
            Ok(_) => Ok(UseCaseRes { profile }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
