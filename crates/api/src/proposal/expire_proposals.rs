use crate::shared::usecase::UseCase;
use dealbird_infra::DealbirdContext;
use tracing::{error, info};

/// Periodic sweep moving sent and viewed proposals past their deadline to
/// expired. Only invoked by the job scheduler, there is no route for it.
#[derive(Debug)]
pub struct ExpireProposalsUseCase;

#[derive(Debug)]
pub enum UseCaseError {}

#[derive(Debug)]
pub struct UseCaseRes {
    pub expired: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ExpireProposalsUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ExpireProposals";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let candidates = ctx.repos.proposals.find_expiry_candidates(now).await;

        let mut expired = 0;
        for mut proposal in candidates {
            proposal.expire(now);
            match ctx.repos.proposals.save(&proposal).await {
                Ok(_) => expired += 1,
                Err(e) => error!(
                    "Unable to expire proposal: {}. Err: {:?}",
                    proposal.id, e
                ),
            }
        }

        if expired > 0 {
            info!("Expired {} proposals past their deadline", expired);
        }
        Ok(UseCaseRes { expired })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use dealbird_domain::{Proposal, ProposalStatus, ID};
    use dealbird_infra::setup_context;

    async fn insert_proposal(ctx: &DealbirdContext, expires_at: Option<i64>) -> Proposal {
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
    async fn sweep_expires_only_stale_proposals() {
        let ctx = setup_context().await;
        let now = ctx.sys.get_timestamp_millis();
        let stale = insert_proposal(&ctx, Some(20)).await;
        let fresh = insert_proposal(&ctx, Some(now + 10_000)).await;
        let open_ended = insert_proposal(&ctx, None).await;

        let res = execute(ExpireProposalsUseCase, &ctx)
            .await
            .expect("To run sweep");
        assert_eq!(res.expired, 1);

        let repo = &ctx.repos.proposals;
        assert_eq!(
            repo.find(&stale.id).await.expect("To find proposal").status,
            ProposalStatus::Expired
        );
        assert_eq!(
            repo.find(&fresh.id).await.expect("To find proposal").status,
            ProposalStatus::Sent
        );
        assert_eq!(
            repo.find(&open_ended.id)
                .await
                .expect("To find proposal")
                .status,
            ProposalStatus::Sent
        );
    }

    #[actix_web::main]
    #[test]
    async fn sweep_is_idempotent() {
        let ctx = setup_context().await;
        insert_proposal(&ctx, Some(20)).await;

        let res = execute(ExpireProposalsUseCase, &ctx)
            .await
            .expect("To run sweep");
        assert_eq!(res.expired, 1);

        let res = execute(ExpireProposalsUseCase, &ctx)
            .await
            .expect("To run sweep");
        assert_eq!(res.expired, 0);
    }
}
