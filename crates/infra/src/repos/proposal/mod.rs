mod inmemory;
mod postgres;

use dealbird_domain::{Proposal, ID};
pub use inmemory::InMemoryProposalRepo;
pub use postgres::PostgresProposalRepo;

#[async_trait::async_trait]
pub trait IProposalRepo: Send + Sync {
    async fn insert(&self, proposal: &Proposal) -> anyhow::Result<()>;
    async fn save(&self, proposal: &Proposal) -> anyhow::Result<()>;
    async fn find(&self, proposal_id: &ID) -> Option<Proposal>;
    async fn find_by_account(&self, account_id: &ID) -> Vec<Proposal>;
    /// Sent or viewed proposals whose deadline has passed at `now`.
    async fn find_expiry_candidates(&self, now: i64) -> Vec<Proposal>;
}
