use super::sign_proposal::{SignProposalUseCase, UseCaseRes};
use crate::shared::usecase::Subscriber;
use dealbird_domain::Invoice;
use tracing::error;

pub struct CreateInvoiceOnSignedProposal;

#[async_trait::async_trait(?Send)]
impl Subscriber<SignProposalUseCase> for CreateInvoiceOnSignedProposal {
    async fn notify(&self, e: &UseCaseRes, ctx: &dealbird_infra::DealbirdContext) {
        let invoice = Invoice::for_signed_proposal(&e.proposal, ctx.sys.get_timestamp_millis());

        // Sideeffect, log and move on if it fails
        if let Err(err) = ctx.repos.invoices.insert(&invoice).await {
            error!(
                "Unable to create invoice for signed proposal: {}. Err: {:?}",
                e.proposal.id, err
            );
        }
    }
}
