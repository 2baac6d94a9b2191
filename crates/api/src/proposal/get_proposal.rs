use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::get_proposal::{APIResponse, PathParams};
use dealbird_domain::{Proposal, ID};
use dealbird_infra::DealbirdContext;

pub async fn get_proposal_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = GetProposalUseCase {
        account_id: account.id,
        proposal_id: path_params.proposal_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.proposal)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct GetProposalUseCase {
    pub account_id: ID,
    pub proposal_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(proposal_id) => Self::NotFound(format!(
                "The proposal with id: {}, was not found.",
                proposal_id
            )),
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub proposal: Proposal,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetProposalUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "GetProposal";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let proposal = ctx.repos.proposals.find(&self.proposal_id).await;
        match proposal {
            Some(proposal) if proposal.account_id == self.account_id => {
                Ok(UseCaseRes { proposal })
            }
            _ => Err(UseCaseError::NotFound(self.proposal_id.clone())),
        }
    }
}
