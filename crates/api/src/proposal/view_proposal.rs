use crate::error::DealbirdError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use dealbird_api_structs::view_proposal::{APIResponse, PathParams};
use dealbird_domain::{Proposal, ID};
use dealbird_infra::DealbirdContext;

pub async fn view_proposal_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let usecase = ViewProposalUseCase {
        proposal_id: path_params.proposal_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.proposal)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct ViewProposalUseCase {
    pub proposal_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    NotViewable(ID),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(proposal_id) => Self::NotFound(format!(
                "The proposal with id: {}, was not found.",
                proposal_id
            )),
            UseCaseError::NotViewable(proposal_id) => Self::Conflict(format!(
                "The proposal with id: {} has not been sent and cannot be viewed.",
                proposal_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
struct UseCaseRes {
    pub proposal: Proposal,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ViewProposalUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ViewProposal";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let mut proposal = match ctx.repos.proposals.find(&self.proposal_id).await {
            Some(proposal) => proposal,
            None => return Err(UseCaseError::NotFound(self.proposal_id.clone())),
        };

        proposal
            .mark_viewed(ctx.sys.get_timestamp_millis())
            .map_err(|_| UseCaseError::NotViewable(self.proposal_id.clone()))?;

        match ctx.repos.proposals.save(&proposal).await {
            Ok(_) => Ok(UseCaseRes { proposal }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
