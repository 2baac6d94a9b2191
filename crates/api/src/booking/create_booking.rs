use crate::error::DealbirdError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Datelike};
use dealbird_api_structs::create_booking::{APIResponse, PathParams, RequestBody};
use dealbird_domain::{Booking, Day, ID};
use dealbird_infra::DealbirdContext;

pub async fn create_booking_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let usecase = CreateBookingUseCase {
        profile_id: path_params.profile_id.clone(),
        start_ts: body.0.start_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.booking)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct CreateBookingUseCase {
    pub profile_id: ID,
    pub start_ts: i64,
}

#[derive(Debug)]
enum UseCaseError {
    ProfileNotFound(ID),
    InvalidStartTime(i64),
    SlotTaken(i64),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ProfileNotFound(profile_id) => Self::NotFound(format!(
                "The availability profile with id: {}, was not found.",
                profile_id
            )),
            UseCaseError::InvalidStartTime(start_ts) => Self::BadClientData(format!(
                "The start time: {} is not a bookable slot for this profile.",
                start_ts
            )),
            UseCaseError::SlotTaken(start_ts) => Self::Conflict(format!(
                "The slot starting at: {} is already booked.",
                start_ts
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub booking: Booking,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateBookingUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateBooking";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let profile = match ctx.repos.availability_profiles.find(&self.profile_id).await {
            Some(profile) => profile,
            None => return Err(UseCaseError::ProfileNotFound(self.profile_id.clone())),
        };

        let date = match DateTime::from_timestamp_millis(self.start_ts) {
            Some(date) => date,
            None => return Err(UseCaseError::InvalidStartTime(self.start_ts)),
        };
        let day = match Day::new(date.year(), date.month(), date.day()) {
            Ok(day) => day,
            Err(_) => return Err(UseCaseError::InvalidStartTime(self.start_ts)),
        };

        let bookings = ctx
            .repos
            .bookings
            .find_in_timespan(&profile.id, day.start_millis(), day.end_millis())
            .await;

        // The free slots already exclude blocked intervals, so a start time
        // on the grid but missing here means the slot is taken.
        let slots = profile.slots_for_day(&day, &bookings);
        if !slots.iter().any(|slot| slot.start_ts == self.start_ts) {
            let taken = bookings
                .iter()
                .any(|booking| booking.is_blocking() && booking.start_ts == self.start_ts);
            return Err(if taken {
                UseCaseError::SlotTaken(self.start_ts)
            } else {
                UseCaseError::InvalidStartTime(self.start_ts)
            });
        }

        let end_ts = self.start_ts + profile.duration_minutes * 60 * 1000;
        let booking = Booking::new(
            profile.id.clone(),
            profile.account_id.clone(),
            self.start_ts,
            end_ts,
        );
        match ctx.repos.bookings.insert(&booking).await {
            Ok(_) => Ok(UseCaseRes { booking }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
