use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::cancel_booking::{APIResponse, PathParams};
use dealbird_domain::{Booking, BookingStatus, ID};
use dealbird_infra::DealbirdContext;

pub async fn cancel_booking_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = CancelBookingUseCase {
        account_id: account.id,
        booking_id: path_params.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.booking)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct CancelBookingUseCase {
    pub account_id: ID,
    pub booking_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
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
impl UseCase for CancelBookingUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelBooking";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let mut booking = match ctx.repos.bookings.find(&self.booking_id).await {
            Some(booking) if booking.account_id == self.account_id => booking,
            _ => return Err(UseCaseError::NotFound(self.booking_id.clone())),
        };

        // Cancelling twice is a no-op, not an error
        if booking.status == BookingStatus::Cancelled {
            return Ok(UseCaseRes { booking });
        }

        booking.cancel();
        match ctx.repos.bookings.save(&booking).await {
            Ok(_) => Ok(UseCaseRes { booking }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
