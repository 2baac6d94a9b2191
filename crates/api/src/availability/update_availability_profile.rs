use super::parse_weekly_rules;
use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::dtos::WeeklyRuleDTO;
use dealbird_api_structs::update_availability_profile::{APIResponse, PathParams, RequestBody};
use dealbird_domain::{AvailabilityProfile, ID, MAX_DURATION_MINUTES};
use dealbird_infra::DealbirdContext;

pub async fn update_availability_profile_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = UpdateAvailabilityProfileUseCase {
        account_id: account.id,
        profile_id: path_params.profile_id.clone(),
        duration_minutes: body.0.duration_minutes,
        weekly_rules: body.0.weekly_rules,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.profile)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct UpdateAvailabilityProfileUseCase {
    pub account_id: ID,
    pub profile_id: ID,
    pub duration_minutes: Option<i64>,
    pub weekly_rules: Option<Vec<WeeklyRuleDTO>>,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    InvalidDuration(i64),
    InvalidTimeRange(String),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(profile_id) => Self::NotFound(format!(
                "The availability profile with id: {}, was not found.",
                profile_id
            )),
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
impl UseCase for UpdateAvailabilityProfileUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateAvailabilityProfile";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let mut profile = match ctx.repos.availability_profiles.find(&self.profile_id).await {
            Some(profile) if profile.account_id == self.account_id => profile,
            _ => return Err(UseCaseError::NotFound(self.profile_id.clone())),
        };

        if let Some(duration_minutes) = self.duration_minutes {
            if duration_minutes <= 0 || duration_minutes > MAX_DURATION_MINUTES {
                return Err(UseCaseError::InvalidDuration(duration_minutes));
            }
            profile.duration_minutes = duration_minutes;
        }
        if let Some(rules) = &self.weekly_rules {
            profile.weekly_rules =
                parse_weekly_rules(rules).map_err(UseCaseError::InvalidTimeRange)?;
        }

        match ctx.repos.availability_profiles.save(&profile).await {
            Ok(_) => Ok(UseCaseRes { profile }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
