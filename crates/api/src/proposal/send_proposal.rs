use crate::shared::usecase::{execute, UseCase};
use crate::{error::DealbirdError, shared::auth::protect_account_route};
use actix_web::{web, HttpRequest, HttpResponse};
use dealbird_api_structs::send_proposal::{APIResponse, PathParams, RequestBody};
use dealbird_domain::{Proposal, ID};
use dealbird_infra::DealbirdContext;

pub async fn send_proposal_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let account = protect_account_route(&http_req, &ctx).await?;

    let usecase = SendProposalUseCase {
        account_id: account.id,
        proposal_id: path_params.proposal_id.clone(),
        expires_at: body.0.expires_at,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.proposal)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
struct SendProposalUseCase {
    pub account_id: ID,
    pub proposal_id: ID,
    pub expires_at: Option<i64>,
}

#[derive(Debug)]
enum UseCaseError {
    NotFound(ID),
    NotSendable(ID),
    ExpiryInThePast(i64),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(proposal_id) => Self::NotFound(format!(
                "The proposal with id: {}, was not found.",
                proposal_id
            )),
            UseCaseError::NotSendable(proposal_id) => Self::Conflict(format!(
                "The proposal with id: {} is not a draft and cannot be sent.",
                proposal_id
            )),
            UseCaseError::ExpiryInThePast(expires_at) => Self::BadClientData(format!(
                "The expiry: {} is already in the past.",
                expires_at
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
impl UseCase for SendProposalUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SendProposal";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let mut proposal = match ctx.repos.proposals.find(&self.proposal_id).await {
            Some(proposal) if proposal.account_id == self.account_id => proposal,
            _ => return Err(UseCaseError::NotFound(self.proposal_id.clone())),
        };

        let now = ctx.sys.get_timestamp_millis();
        if let Some(expires_at) = self.expires_at {
            if expires_at <= now {
                return Err(UseCaseError::ExpiryInThePast(expires_at));
            }
        }

        proposal
            .send(self.expires_at, now)
            .map_err(|_| UseCaseError::NotSendable(self.proposal_id.clone()))?;

        match ctx.repos.proposals.save(&proposal).await {
            Ok(_) => Ok(UseCaseRes { proposal }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_domain::ProposalStatus;
    use dealbird_infra::setup_context;

    fn draft(account_id: &ID) -> Proposal {
        Proposal::new(
            account_id.clone(),
            "Spring campaign".into(),
            "Acme".into(),
            250_000,
            0,
        )
    }

    #[actix_web::main]
    #[test]
    async fn sends_a_draft() {
        let ctx = setup_context().await;
        let account_id = ID::default();
        let proposal = draft(&account_id);
        ctx.repos
            .proposals
            .insert(&proposal)
            .await
            .expect("To insert proposal");

        let expires_at = ctx.sys.get_timestamp_millis() + 1000;
        let mut usecase = SendProposalUseCase {
            account_id,
            proposal_id: proposal.id.clone(),
            expires_at: Some(expires_at),
        };
        let res = usecase.execute(&ctx).await.expect("To send proposal");
        assert_eq!(res.proposal.status, ProposalStatus::Sent);
        assert_eq!(res.proposal.expires_at, Some(expires_at));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_expiry_in_the_past() {
        let ctx = setup_context().await;
        let account_id = ID::default();
        let proposal = draft(&account_id);
        ctx.repos
            .proposals
            .insert(&proposal)
            .await
            .expect("To insert proposal");

        let mut usecase = SendProposalUseCase {
            account_id,
            proposal_id: proposal.id.clone(),
            expires_at: Some(ctx.sys.get_timestamp_millis() - 1000),
        };
        assert!(usecase.execute(&ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_resending() {
        let ctx = setup_context().await;
        let account_id = ID::default();
        let mut proposal = draft(&account_id);
        proposal.send(None, 10).expect("To send proposal");
        ctx.repos
            .proposals
            .insert(&proposal)
            .await
            .expect("To insert proposal");

        let mut usecase = SendProposalUseCase {
            account_id,
            proposal_id: proposal.id.clone(),
            expires_at: None,
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotSendable(_))));
    }
}
