use crate::dtos::ProposalDTO;
use dealbird_domain::{Proposal, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalResponse {
    pub proposal: ProposalDTO,
}

impl ProposalResponse {
    pub fn new(proposal: Proposal) -> Self {
        Self {
            proposal: ProposalDTO::new(proposal),
        }
    }
}

pub mod create_proposal {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub client_name: String,
        pub amount_cents: i64,
    }

    pub type APIResponse = ProposalResponse;
}

pub mod get_proposal {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub proposal_id: ID,
    }

    pub type APIResponse = ProposalResponse;
}

pub mod send_proposal {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub proposal_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub expires_at: Option<i64>,
    }

    pub type APIResponse = ProposalResponse;
}

pub mod view_proposal {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub proposal_id: ID,
    }

    pub type APIResponse = ProposalResponse;
}

pub mod sign_proposal {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub proposal_id: ID,
    }

    // The invoice raised on signature is a side effect; it is listed through
    // the invoice endpoints.
    pub type APIResponse = ProposalResponse;
}
