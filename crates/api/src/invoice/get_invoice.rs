use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::get_invoice::{APIResponse, PathParams};
use dealbird_domain::{Invoice, ID};
use dealbird_infra::DealbirdContext;

pub async fn get_invoice_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = GetInvoiceUseCase {
        account_id: account.id,
        invoice_id: path_params.invoice_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.invoice)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct GetInvoiceUseCase {
    pub account_id: ID,
    pub invoice_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(invoice_id) => Self::NotFound(format!(
                "The invoice with id: {}, was not found.",
                invoice_id
            )),
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub invoice: Invoice,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetInvoiceUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetInvoice";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let invoice = ctx.repos.invoices.find(&self.invoice_id).await;
        match invoice {
            Some(invoice) if invoice.account_id == self.account_id => Ok(UseCaseRes { invoice }),
            _ => Err(UseCaseError::NotFound(self.invoice_id.clone())),
        }
    }
}
