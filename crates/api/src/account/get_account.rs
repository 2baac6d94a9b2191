use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::get_account::APIResponse;
use dealbird_infra::DealbirdContext;

pub async fn get_account_controller(
    http_req: HttpRequest,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(account)))
}
