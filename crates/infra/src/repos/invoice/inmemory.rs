use super::IInvoiceRepo;
use crate::repos::shared::inmemory_repo::*;
use dealbird_domain::{Invoice, InvoiceStatus, ID};

pub struct InMemoryInvoiceRepo {
    invoices: std::sync::Mutex<Vec<Invoice>>,
}

impl InMemoryInvoiceRepo {
    pub fn new() -> Self {
        Self {
            invoices: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IInvoiceRepo for InMemoryInvoiceRepo {
    async fn insert(&self, invoice: &Invoice) -> anyhow::Result<()> {
        insert(invoice, &self.invoices);
        Ok(())
    }

    async fn save(&self, invoice: &Invoice) -> anyhow::Result<()> {
        save(invoice, &self.invoices);
        Ok(())
    }

    async fn find(&self, invoice_id: &ID) -> Option<Invoice> {
        find(invoice_id, &self.invoices)
    }

    async fn find_by_account(&self, account_id: &ID) -> Vec<Invoice> {
        find_by(&self.invoices, |invoice| invoice.account_id == *account_id)
    }

    async fn find_by_proposal(&self, proposal_id: &ID) -> Option<Invoice> {
        find_by(&self.invoices, |invoice| {
            invoice.proposal_id == *proposal_id
        })
        .into_iter()
        .next()
    }

    async fn find_reminder_candidates(&self, now: i64) -> Vec<Invoice> {
        find_by(&self.invoices, |invoice| {
            matches!(
                invoice.status,
                InvoiceStatus::Pending | InvoiceStatus::Overdue
            ) && invoice.due_date < now
        })
    }
}
