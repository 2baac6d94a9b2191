use super::subscribers::CreateInvoiceOnSignedProposal;
use crate::error::DealbirdError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use dealbird_api_structs::sign_proposal::{APIResponse, PathParams};
use dealbird_domain::{Proposal, ProposalStateError, ID};
use dealbird_infra::DealbirdContext;

pub async fn sign_proposal_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<DealbirdContext>,
) -> Result<HttpResponse, DealbirdError> {
    let usecase = SignProposalUseCase {
        proposal_id: path_params.proposal_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.proposal)))
        .map_err(DealbirdError::from)
}

#[derive(Debug)]
pub struct SignProposalUseCase {
    pub proposal_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    NotSignable(ID),
    Expired(ID),
    Storage,
}

impl From<UseCaseError> for DealbirdError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(proposal_id) => Self::NotFound(format!(
                "The proposal with id: {}, was not found.",
                proposal_id
            )),
            UseCaseError::NotSignable(proposal_id) => Self::Conflict(format!(
                "The proposal with id: {} is not open for signing.",
                proposal_id
            )),
            UseCaseError::Expired(proposal_id) => Self::Gone(format!(
                "The proposal with id: {} expired before it was signed.",
                proposal_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub proposal: Proposal,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignProposalUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SignProposal";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let mut proposal = match ctx.repos.proposals.find(&self.proposal_id).await {
            Some(proposal) => proposal,
            None => return Err(UseCaseError::NotFound(self.proposal_id.clone())),
        };

        let now = ctx.sys.get_timestamp_millis();
        if let Err(e) = proposal.sign(now) {
            // A proposal that sat past its deadline is expired even if the
            // sweep has not visited it yet.
            if e == ProposalStateError::ExpiredBeforeSigning {
                proposal.expire(now);
                let _ = ctx.repos.proposals.save(&proposal).await;
                return Err(UseCaseError::Expired(self.proposal_id.clone()));
            }
            return Err(UseCaseError::NotSignable(self.proposal_id.clone()));
        }

        match ctx.repos.proposals.save(&proposal).await {
            Ok(_) => Ok(UseCaseRes { proposal }),
            Err(_) => Err(UseCaseError::Storage),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(CreateInvoiceOnSignedProposal {})]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_domain::{InvoiceStatus, ProposalStatus, DAY_MILLIS, INVOICE_NET_DAYS};
    use dealbird_infra::setup_context;

    async fn insert_sent_proposal(
        ctx: &DealbirdContext,
        expires_at: Option<i64>,
    ) -> Proposal {
        let mut proposal = Proposal::new(
            ID::default(),
            "Spring campaign".into(),
            "Acme".into(),
            250_000,
            0,
        );
        proposal.send(expires_at, 10).expect("To send proposal");
        ctx.repos
            .proposals
            .insert(&proposal)
            .await
            .expect("To insert proposal");
        proposal
    }

    #[actix_web::main]
    #[test]
    async fn signing_creates_an_invoice() {
        let ctx = setup_context().await;
        let proposal = insert_sent_proposal(&ctx, None).await;

        let usecase = SignProposalUseCase {
            proposal_id: proposal.id.clone(),
        };
        let res = execute(usecase, &ctx).await.expect("To sign proposal");
        assert_eq!(res.proposal.status, ProposalStatus::Signed);

        let invoice = ctx
            .repos
            .invoices
            .find_by_proposal(&proposal.id)
            .await
            .expect("Signing to raise an invoice");
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.amount_cents, proposal.amount_cents);
        assert_eq!(
            invoice.due_date - invoice.created,
            INVOICE_NET_DAYS * DAY_MILLIS
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_signing_an_expired_proposal() {
        let ctx = setup_context().await;
        // Expired long before now
        let proposal = insert_sent_proposal(&ctx, Some(20)).await;

        let usecase = SignProposalUseCase {
            proposal_id: proposal.id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::Expired(_))));

        // The failed attempt settles the proposal as expired, with no invoice
        let stored = ctx
            .repos
            .proposals
            .find(&proposal.id)
            .await
            .expect("To find proposal");
        assert_eq!(stored.status, ProposalStatus::Expired);
        assert!(ctx.repos.invoices.find_by_proposal(&proposal.id).await.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_signing_a_draft() {
        let ctx = setup_context().await;
        let proposal = Proposal::new(
            ID::default(),
            "Spring campaign".into(),
            "Acme".into(),
            250_000,
            0,
        );
        ctx.repos
            .proposals
            .insert(&proposal)
            .await
            .expect("To insert proposal");

        let usecase = SignProposalUseCase {
            proposal_id: proposal.id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::NotSignable(_))));
    }
}
