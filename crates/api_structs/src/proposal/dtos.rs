use dealbird_domain::{Proposal, ProposalStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDTO {
    pub id: ID,
    pub title: String,
    pub client_name: String,
    pub amount_cents: i64,
    pub status: ProposalStatus,
    pub expires_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl ProposalDTO {
    pub fn new(proposal: Proposal) -> Self {
        Self {
            id: proposal.id.clone(),
            title: proposal.title,
            client_name: proposal.client_name,
            amount_cents: proposal.amount_cents,
            status: proposal.status,
            expires_at: proposal.expires_at,
            created: proposal.created,
            updated: proposal.updated,
        }
    }
}
