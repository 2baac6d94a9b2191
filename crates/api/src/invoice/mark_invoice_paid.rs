use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::mark_invoice_paid::{APIResponse, PathParams};
use dealbird_domain::{Invoice, ID};
use dealbird_infra::DealbirdContext;

pub async fn mark_invoice_paid_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = MarkInvoicePaidUseCase {
        account_id: account.id,
        invoice_id: path_params.invoice_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.invoice)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct MarkInvoicePaidUseCase {
    pub account_id: ID,
    pub invoice_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    NotPayable(ID),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(invoice_id) => Self::NotFound(format!(
                "The invoice with id: {}, was not found.",
                invoice_id
            )),
            UseCaseError::NotPayable(invoice_id) => Self::Conflict(format!(
                "The invoice with id: {} is not open and cannot be marked paid.",
                invoice_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub invoice: Invoice,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkInvoicePaidUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkInvoicePaid";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let mut invoice = match ctx.repos.invoices.find(&self.invoice_id).await {
            Some(invoice) if invoice.account_id == self.account_id => invoice,
            _ => return Err(UseCaseError::NotFound(self.invoice_id.clone())),
        };

        invoice
            .mark_paid(ctx.sys.get_timestamp_millis())
            .map_err(|_| UseCaseError::NotPayable(self.invoice_id.clone()))?;

        match ctx.repos.invoices.save(&invoice).await {
            Ok(_) => Ok(UseCaseRes { invoice }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_domain::{InvoiceStatus, Proposal};
    use dealbird_infra::setup_context;

    async fn insert_invoice(ctx: &DealbirdContext, account_id: &ID) -> Invoice {
        let mut proposal = Proposal::new(
            account_id.clone(),
            "Spring campaign".into(),
            "Acme".into(),
            250_000,
            0,
        );
        proposal.send(None, 0).expect("To send proposal");
        proposal.sign(10).expect("To sign proposal");
        let invoice = Invoice::for_signed_proposal(&proposal, 10);
        ctx.repos
            .invoices
            .insert(&invoice)
            .await
            .expect("To insert invoice");
        invoice
    }

    #[actix_web::main]
    #[test]
    async fn marks_a_pending_invoice_paid() {
        let ctx = setup_context().await;
        let account_id = ID::default();
        let invoice = insert_invoice(&ctx, &account_id).await;

        let mut usecase = MarkInvoicePaidUseCase {
            account_id,
            invoice_id: invoice.id.clone(),
        };
        let res = usecase.execute(&ctx).await.expect("To mark invoice paid");
        assert_eq!(res.invoice.status, InvoiceStatus::Paid);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_paying_twice() {
        let ctx = setup_context().await;
        let account_id = ID::default();
        let invoice = insert_invoice(&ctx, &account_id).await;

        let mut usecase = MarkInvoicePaidUseCase {
            account_id: account_id.clone(),
            invoice_id: invoice.id.clone(),
        };
        usecase.execute(&ctx).await.expect("To mark invoice paid");

        let mut usecase = MarkInvoicePaidUseCase {
            account_id,
            invoice_id: invoice.id.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotPayable(_))));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invoice_of_other_account() {
        let ctx = setup_context().await;
        let invoice = insert_invoice(&ctx, &ID::default()).await;

        let mut usecase = MarkInvoicePaidUseCase {
            account_id: ID::default(),
            invoice_id: invoice.id.clone(),
        };
        assert!(usecase.execute(&ctx).await.is_err());
    }
}
