use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::create_proposal::{APIResponse, RequestBody};
use dealbird_domain::{Proposal, ID};
use dealbird_infra::DealbirdContext;

pub async fn create_proposal_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = CreateProposalUseCase {
        account_id: account.id,
        title: body.0.title,
        client_name: body.0.client_name,
        amount_cents: body.0.amount_cents,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Created().json(APIResponse::new(res.proposal)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct CreateProposalUseCase {
    pub account_id: ID,
    pub title: String,
    pub client_name: String,
    pub amount_cents: i64,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidAmount(i64),
    EmptyField(&'static str),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidAmount(amount) => Self::BadClientData(format!(
                "Invalid amount: {}. It should be a positive number of cents.",
                amount
            )),
            UseCaseError::EmptyField(field) => {
                Self::BadClientData(format!("The field: {} must not be empty.", field))
            }
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub proposal: Proposal,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateProposalUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateProposal";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        if self.amount_cents <= 0 {
            return Err(UseCaseError::InvalidAmount(self.amount_cents));
        }
        if self.title.trim().is_empty() {
            return Err(UseCaseError::EmptyField("title"));
        }
        if self.client_name.trim().is_empty() {
            return Err(UseCaseError::EmptyField("clientName"));
        }

        let proposal = Proposal::new(
            self.account_id.clone(),
            self.title.clone(),
            self.client_name.clone(),
            self.amount_cents,
            ctx.sys.get_timestamp_millis(),
        );
        match ctx.repos.proposals.insert(&proposal).await {
            Ok(_) => Ok(UseCaseRes { proposal }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
