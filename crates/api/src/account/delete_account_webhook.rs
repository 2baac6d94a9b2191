use super::set_account_webhook::SetAccountWebhookUseCase;
use crate::shared::usecase::execute;
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::delete_account_webhook::APIResponse;
use dealbird_infra::DealbirdContext;

pub async fn delete_account_webhook_controller(
    http_req: HttpRequest,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = SetAccountWebhookUseCase {
        account,
        webhook_url: None,
    };

    execute(usecase, &ctx)
        .await
        .map(|account| HttpResponse::Ok().json(APIResponse::new(account)))
        .map_err(DealbirdError::from)
}
