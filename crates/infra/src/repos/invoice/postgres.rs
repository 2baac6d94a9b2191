use super::IInvoiceRepo;
use dealbird_domain::{Invoice, InvoiceStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;

pub struct PostgresInvoiceRepo {
    pool: PgPool,
}

impl PostgresInvoiceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceRaw {
    invoice_uid: Uuid,
    account_uid: Uuid,
    proposal_uid: Uuid,
    amount_cents: i64,
    status: String,
    due_date: i64,
    reminder_count: i64,
    last_reminder_at: Option<i64>,
    created: i64,
    updated: i64,
}

impl From<InvoiceRaw> for Invoice {
    fn from(raw: InvoiceRaw) -> Self {
        Self {
            id: raw.invoice_uid.into(),
            account_id: raw.account_uid.into(),
            proposal_id: raw.proposal_uid.into(),
            amount_cents: raw.amount_cents,
            status: InvoiceStatus::from_str(&raw.status).unwrap_or(InvoiceStatus::Cancelled),
            due_date: raw.due_date,
            reminder_count: raw.reminder_count,
            last_reminder_at: raw.last_reminder_at,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IInvoiceRepo for PostgresInvoiceRepo {
    async fn insert(&self, invoice: &Invoice) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO invoices(invoice_uid, account_uid, proposal_uid, amount_cents, status, due_date, reminder_count, last_reminder_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(invoice.id.inner_ref())
        .bind(invoice.account_id.inner_ref())
        .bind(invoice.proposal_id.inner_ref())
        .bind(invoice.amount_cents)
        .bind(invoice.status.as_str())
        .bind(invoice.due_date)
        .bind(invoice.reminder_count)
        .bind(invoice.last_reminder_at)
        .bind(invoice.created)
        .bind(invoice.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, invoice: &Invoice) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET status = $2,
            reminder_count = $3,
            last_reminder_at = $4,
            updated = $5
            WHERE invoice_uid = $1
            "#,
        )
        .bind(invoice.id.inner_ref())
        .bind(invoice.status.as_str())
        .bind(invoice.reminder_count)
        .bind(invoice.last_reminder_at)
        .bind(invoice.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, invoice_id: &ID) -> Option<Invoice> {
        sqlx::query_as::<_, InvoiceRaw>(
            r#"
            SELECT * FROM invoices
            WHERE invoice_uid = $1
            "#,
        )
        .bind(invoice_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_by_account(&self, account_id: &ID) -> Vec<Invoice> {
        sqlx::query_as::<_, InvoiceRaw>(
            r#"
            SELECT * FROM invoices
            WHERE account_uid = $1
            "#,
        )
        .bind(account_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }

    async fn find_by_proposal(&self, proposal_id: &ID) -> Option<Invoice> {
        sqlx::query_as::<_, InvoiceRaw>(
            r#"
            SELECT * FROM invoices
            WHERE proposal_uid = $1
            "#,
        )
        .bind(proposal_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_reminder_candidates(&self, now: i64) -> Vec<Invoice> {
        sqlx::query_as::<_, InvoiceRaw>(
            r#"
            SELECT * FROM invoices
            WHERE status IN ('pending', 'overdue')
            AND due_date < $1
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }
}
