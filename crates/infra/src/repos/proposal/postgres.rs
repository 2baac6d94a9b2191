use super::IProposalRepo;
use dealbird_domain::{Proposal, ProposalStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;

pub struct PostgresProposalRepo {
    pool: PgPool,
}

impl PostgresProposalRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProposalRaw {
    proposal_uid: Uuid,
    account_uid: Uuid,
    title: String,
    client_name: String,
    amount_cents: i64,
    status: String,
    expires_at: Option<i64>,
    created: i64,
    updated: i64,
}

impl From<ProposalRaw> for Proposal {
    fn from(raw: ProposalRaw) -> Self {
        Self {
            id: raw.proposal_uid.into(),
            account_id: raw.account_uid.into(),
            title: raw.title,
            client_name: raw.client_name,
            amount_cents: raw.amount_cents,
            status: ProposalStatus::from_str(&raw.status).unwrap_or(ProposalStatus::Expired),
            expires_at: raw.expires_at,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IProposalRepo for PostgresProposalRepo {
    async fn insert(&self, proposal: &Proposal) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO proposals(proposal_uid, account_uid, title, client_name, amount_cents, status, expires_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(proposal.id.inner_ref())
        .bind(proposal.account_id.inner_ref())
        .bind(&proposal.title)
        .bind(&proposal.client_name)
        .bind(proposal.amount_cents)
        .bind(proposal.status.as_str())
        .bind(proposal.expires_at)
        .bind(proposal.created)
        .bind(proposal.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, proposal: &Proposal) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE proposals
            SET title = $2,
            client_name = $3,
            amount_cents = $4,
            status = $5,
            expires_at = $6,
            updated = $7
            WHERE proposal_uid = $1
            "#,
        )
        .bind(proposal.id.inner_ref())
        .bind(&proposal.title)
        .bind(&proposal.client_name)
        .bind(proposal.amount_cents)
        .bind(proposal.status.as_str())
        .bind(proposal.expires_at)
        .bind(proposal.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, proposal_id: &ID) -> Option<Proposal> {
        sqlx::query_as::<_, ProposalRaw>(
            r#"
            SELECT * FROM proposals
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

    async fn find_by_account(&self, account_id: &ID) -> Vec<Proposal> {
        sqlx::query_as::<_, ProposalRaw>(
            r#"
            SELECT * FROM proposals
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

    async fn find_expiry_candidates(&self, now: i64) -> Vec<Proposal> {
        sqlx::query_as::<_, ProposalRaw>(
            r#"
            SELECT * FROM proposals
            WHERE status IN ('sent', 'viewed')
            AND expires_at IS NOT NULL
            AND expires_at < $1
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
