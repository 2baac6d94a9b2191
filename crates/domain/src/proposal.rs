use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Draft,
    Sent,
    Viewed,
    Signed,
    Expired,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Viewed => "viewed",
            Self::Signed => "signed",
            Self::Expired => "expired",
        }
    }
}

impl FromStr for ProposalStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "viewed" => Ok(Self::Viewed),
            "signed" => Ok(Self::Signed),
            "expired" => Ok(Self::Expired),
            _ => Err(anyhow::anyhow!("Invalid proposal status: {}", s)),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ProposalStateError {
    #[error("Proposal in status {0:?} cannot be sent")]
    NotSendable(ProposalStatus),
    #[error("Proposal in status {0:?} cannot be viewed")]
    NotViewable(ProposalStatus),
    #[error("Proposal in status {0:?} cannot be signed")]
    NotSignable(ProposalStatus),
    #[error("Proposal expired before it was signed")]
    ExpiredBeforeSigning,
}

/// A brand-deal proposal moving through
/// draft -> sent -> viewed -> signed, with sent/viewed decaying to expired
/// once `expires_at` passes.
#[derive(Debug, Clone)]
pub struct Proposal {
    pub id: ID,
    pub account_id: ID,
    pub title: String,
    pub client_name: String,
    pub amount_cents: i64,
    pub status: ProposalStatus,
    pub expires_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Proposal {
    pub fn new(
        account_id: ID,
        title: String,
        client_name: String,
        amount_cents: i64,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            account_id,
            title,
            client_name,
            amount_cents,
            status: ProposalStatus::Draft,
            expires_at: None,
            created: now,
            updated: now,
        }
    }

    pub fn send(&mut self, expires_at: Option<i64>, now: i64) -> Result<(), ProposalStateError> {
        match self.status {
            ProposalStatus::Draft => {
                self.status = ProposalStatus::Sent;
                self.expires_at = expires_at;
                self.updated = now;
                Ok(())
            }
            status => Err(ProposalStateError::NotSendable(status)),
        }
    }

    pub fn mark_viewed(&mut self, now: i64) -> Result<(), ProposalStateError> {
        match self.status {
            ProposalStatus::Sent => {
                self.status = ProposalStatus::Viewed;
                self.updated = now;
                Ok(())
            }
            // A repeat view is not an error, just not a transition.
            ProposalStatus::Viewed => Ok(()),
            status => Err(ProposalStateError::NotViewable(status)),
        }
    }

    pub fn sign(&mut self, now: i64) -> Result<(), ProposalStateError> {
        match self.status {
            ProposalStatus::Sent | ProposalStatus::Viewed => {
                if self.expiry_due(now) {
                    return Err(ProposalStateError::ExpiredBeforeSigning);
                }
                self.status = ProposalStatus::Signed;
                self.updated = now;
                Ok(())
            }
            status => Err(ProposalStateError::NotSignable(status)),
        }
    }

    /// True when the expiry sweep should move this proposal to `Expired`:
    /// only sent/viewed proposals with a past `expires_at` qualify.
    pub fn expiry_due(&self, now: i64) -> bool {
        let past_expiry = match self.expires_at {
            Some(expires_at) => expires_at < now,
            None => false,
        };
        matches!(
            self.status,
            ProposalStatus::Sent | ProposalStatus::Viewed
        ) && past_expiry
    }

    pub fn expire(&mut self, now: i64) {
        self.status = ProposalStatus::Expired;
        self.updated = now;
    }
}

impl Entity for Proposal {
    fn id(&self) -> &ID {
        &self.id
    }
}
