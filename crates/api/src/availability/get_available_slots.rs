use crate::shared::usecase::{execute, UseCase};
use crate::error::DealbirdError;
use actix_web::{web, HttpResponse};
use dealbird_api_structs::dtos::SlotDTO;
use dealbird_api_structs::get_available_slots::{APIResponse, PathParams, QueryParams};
use dealbird_domain::{Day, Slot, ID};
use dealbird_infra::DealbirdContext;

pub async fn get_available_slots_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let usecase = GetAvailableSlotsUseCase {
        profile_id: path_params.profile_id.clone(),
        date: query_params.date.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                date: res.date,
                slots: res.slots.iter().map(SlotDTO::new).collect(),
            })
        })
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
pub struct GetAvailableSlotsUseCase {
    pub profile_id: ID,
    pub date: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    ProfileNotFound(ID),
    InvalidDate(String),
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ProfileNotFound(profile_id) => Self::NotFound(format!(
                "The availability profile with id: {}, was not found.",
                profile_id
            )),
            UseCaseError::InvalidDate(msg) => Self::BadClientData(format!(
                "Invalid datetime: {}. Should be YYYY-MM-DD, e.g. January 1. 2020 => 2020-1-1",
                msg
            )),
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub date: String,
    pub slots: Vec<Slot>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAvailableSlotsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetAvailableSlots";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let day: Day = self
            .date
            .parse()
            .map_err(|_| UseCaseError::InvalidDate(self.date.clone()))?;

        let profile = match ctx.repos.availability_profiles.find(&self.profile_id).await {
            Some(profile) => profile,
            None => return Err(UseCaseError::ProfileNotFound(self.profile_id.clone())),
        };

        let bookings = ctx
            .repos
            .bookings
            .find_in_timespan(&profile.id, day.start_millis(), day.end_millis())
            .await;

        let slots = profile.slots_for_day(&day, &bookings);
        Ok(UseCaseRes {
            date: self.date.clone(),
            slots,
        })
    }
}
