use super::IProposalRepo;
use crate::repos::shared::inmemory_repo::*;
use dealbird_domain::{Proposal, ID};

pub struct InMemoryProposalRepo {
    proposals: std::sync::Mutex<Vec<Proposal>>,
}

impl InMemoryProposalRepo {
    pub fn new() -> Self {
        Self {
            proposals: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IProposalRepo for InMemoryProposalRepo {
    async fn insert(&self, proposal: &Proposal) -> anyhow::Result<()> {
        insert(proposal, &self.proposals);
        Ok(())
    }

    async fn save(&self, proposal: &Proposal) -> anyhow::Result<()> {
        save(proposal, &self.proposals);
        Ok(())
    }

    async fn find(&self, proposal_id: &ID) -> Option<Proposal> {
        find(proposal_id, &self.proposals)
    }

    async fn find_by_account(&self, account_id: &ID) -> Vec<Proposal> {
        find_by(&self.proposals, |proposal| {
            proposal.account_id == *account_id
        })
    }

    async fn find_expiry_candidates(&self, now: i64) -> Vec<Proposal> {
        find_by(&self.proposals, |proposal| proposal.expiry_due(now))
    }
}
