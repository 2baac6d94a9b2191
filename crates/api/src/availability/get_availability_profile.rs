use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::get_availability_profile::{APIResponse, PathParams};
use dealbird_domain::{AvailabilityProfile, ID};
use dealbird_infra::DealbirdContext;

pub async fn get_availability_profile_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = GetAvailabilityProfileUseCase {
        account_id: account.id,
        profile_id: path_params.profile_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.profile)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct GetAvailabilityProfileUseCase {
    pub account_id: ID,
    pub profile_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(profile_id) => Self::NotFound(format!(
                "The availability profile with id: {}, was not found.",
                profile_id
            )),
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub profile: AvailabilityProfile,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAvailabilityProfileUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAvailabilityProfile";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let profile = ctx.repos.availability_profiles.find(&self.profile_id).await;
        match profile {
            Some(profile) if profile.account_id == self.account_id => Ok(UseCaseRes { profile }),
            _ => Err(UseCaseError::NotFound(self.profile_id.clone())),
        }
    }
}
