mod inmemory;
mod postgres;

use dealbird_domain::{Invoice, ID};
pub use inmemory::InMemoryInvoiceRepo;
pub use postgres::PostgresInvoiceRepo;

#[async_trait::async_trait]
pub trait IInvoiceRepo: Send + Sync {
    async fn insert(&self, invoice: &Invoice) -> anyhow::Result<()>;
    async fn save(&self, invoice: &Invoice) -> anyhow::Result<()>;
    async fn find(&self, invoice_id: &ID) -> Option<Invoice>;
    async fn find_by_account(&self, account_id: &ID) -> Vec<Invoice>;
    async fn find_by_proposal(&self, proposal_id: &ID) -> Option<Invoice>;
    /// Pending or overdue invoices whose due date has passed at `now`.
    /// Cooldown and tier gating happen in the domain, not here.
    async fn find_reminder_candidates(&self, now: i64) -> Vec<Invoice>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_domain::{Invoice, Proposal, DAY_MILLIS, ID};

    fn invoice(signed_at: i64) -> Invoice {
        let mut proposal = Proposal::new(
            ID::default(),
            "Spring campaign".into(),
            "Acme".into(),
            250_000,
            0,
        );
        proposal.send(None, 0).expect("To send proposal");
        proposal.sign(signed_at).expect("To sign proposal");
        Invoice::for_signed_proposal(&proposal, signed_at)
    }

    #[tokio::test]
    async fn create_update_and_find() {
        let repo = InMemoryInvoiceRepo::new();
        let mut inv = invoice(0);
        repo.insert(&inv).await.expect("To insert invoice");

        inv.mark_paid(100).expect("To mark invoice paid");
        repo.save(&inv).await.expect("To save invoice");

        let res = repo.find(&inv.id).await.expect("To find invoice");
        assert_eq!(res.status, inv.status);
        let by_proposal = repo
            .find_by_proposal(&inv.proposal_id)
            .await
            .expect("To find invoice by proposal");
        assert_eq!(by_proposal.id, inv.id);
    }

    #[tokio::test]
    async fn reminder_candidates_are_unpaid_and_past_due() {
        let repo = InMemoryInvoiceRepo::new();

        let due = invoice(0);
        let mut paid = invoice(0);
        paid.mark_paid(100).expect("To mark invoice paid");
        let fresh = invoice(10 * DAY_MILLIS);
        for inv in [&due, &paid, &fresh] {
            repo.insert(inv).await.expect("To insert invoice");
        }

        let now = 35 * DAY_MILLIS;
        let candidates = repo.find_reminder_candidates(now).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, due.id);
    }
}
