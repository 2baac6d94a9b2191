use dealbird_domain::{Invoice, InvoiceStatus, ReminderTier, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDTO {
    pub id: ID,
    pub proposal_id: ID,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub due_date: i64,
    pub reminder_count: i64,
    pub last_reminder_at: Option<i64>,
}

impl InvoiceDTO {
    pub fn new(invoice: Invoice) -> Self {
        Self {
            id: invoice.id.clone(),
            proposal_id: invoice.proposal_id.clone(),
            amount_cents: invoice.amount_cents,
            status: invoice.status,
            due_date: invoice.due_date,
            reminder_count: invoice.reminder_count,
            last_reminder_at: invoice.last_reminder_at,
        }
    }
}

/// One planned reminder, as delivered to the account webhook.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReminderDTO {
    pub invoice_id: ID,
    pub proposal_id: ID,
    pub amount_cents: i64,
    pub tier: i64,
}

impl InvoiceReminderDTO {
    pub fn new(invoice: &Invoice, tier: ReminderTier) -> Self {
        Self {
            invoice_id: invoice.id.clone(),
            proposal_id: invoice.proposal_id.clone(),
            amount_cents: invoice.amount_cents,
            tier: tier.level(),
        }
    }
}
