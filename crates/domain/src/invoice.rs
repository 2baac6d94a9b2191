use crate::proposal::Proposal;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Minimum whole days between two reminder sends for the same invoice,
/// measured from the last successful send.
pub const REMINDER_COOLDOWN_DAYS: i64 = 3;

/// Days after signature before an invoice falls due.
pub const INVOICE_NET_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Overdue,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid invoice status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderTier {
    Friendly,
    ActionRequired,
    FinalNotice,
}

impl ReminderTier {
    /// Escalation level, 1 (friendly) through 3 (final notice).
    pub fn level(&self) -> i64 {
        match self {
            Self::Friendly => 1,
            Self::ActionRequired => 2,
            Self::FinalNotice => 3,
        }
    }
}

/// Ordered escalation table, most severe first. A row fires when the invoice
/// has been overdue at least `min_days_overdue` whole days and fewer than
/// `reminder_cap` reminders have gone out; the first matching row wins.
const TIER_TABLE: [TierRule; 3] = [
    TierRule {
        min_days_overdue: 30,
        reminder_cap: 3,
        tier: ReminderTier::FinalNotice,
    },
    TierRule {
        min_days_overdue: 14,
        reminder_cap: 2,
        tier: ReminderTier::ActionRequired,
    },
    TierRule {
        min_days_overdue: 3,
        reminder_cap: 1,
        tier: ReminderTier::Friendly,
    },
];

struct TierRule {
    min_days_overdue: i64,
    reminder_cap: i64,
    tier: ReminderTier,
}

/// The decision for one invoice in one reminder cycle. Sending and
/// persistence are the caller's job; on a successful send the caller applies
/// `Invoice::record_reminder`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReminderPlan {
    pub tier: Option<ReminderTier>,
    pub transition_to_overdue: bool,
}

impl ReminderPlan {
    fn nothing() -> Self {
        Self {
            tier: None,
            transition_to_overdue: false,
        }
    }
}

/// An invoice raised when a proposal is signed.
#[derive(Debug, Clone)]
pub struct Invoice {
    pub id: ID,
    pub account_id: ID,
    pub proposal_id: ID,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub due_date: i64,
    pub reminder_count: i64,
    pub last_reminder_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl Invoice {
    pub fn for_signed_proposal(proposal: &Proposal, now: i64) -> Self {
        Self {
            id: Default::default(),
            account_id: proposal.account_id.clone(),
            proposal_id: proposal.id.clone(),
            amount_cents: proposal.amount_cents,
            status: InvoiceStatus::Pending,
            due_date: now + INVOICE_NET_DAYS * DAY_MILLIS,
            reminder_count: 0,
            last_reminder_at: None,
            created: now,
            updated: now,
        }
    }

    /// Bookkeeping after a reminder was delivered. A failed send must not
    /// call this, so the same tier is retried next cycle and the cooldown
    /// keeps running from the last successful send.
    pub fn record_reminder(&mut self, now: i64) {
        self.reminder_count += 1;
        self.last_reminder_at = Some(now);
        self.updated = now;
    }

    pub fn mark_overdue(&mut self, now: i64) {
        if self.status == InvoiceStatus::Pending {
            self.status = InvoiceStatus::Overdue;
            self.updated = now;
        }
    }

    pub fn mark_paid(&mut self, now: i64) -> anyhow::Result<()> {
        match self.status {
            InvoiceStatus::Pending | InvoiceStatus::Overdue => {
                self.status = InvoiceStatus::Paid;
                self.updated = now;
                Ok(())
            }
            status => Err(anyhow::anyhow!(
                "Invoice in status {} cannot be marked paid",
                status.as_str()
            )),
        }
    }
}

impl Entity for Invoice {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Decides whether a reminder is due for `invoice` at `now`, and whether the
/// invoice should move from pending to overdue. Pure: no sending, no
/// persistence. The overdue transition reflects elapsed time only and is
/// signalled whether or not the send later succeeds.
pub fn plan_reminder(invoice: &Invoice, now: i64) -> ReminderPlan {
    match invoice.status {
        InvoiceStatus::Pending | InvoiceStatus::Overdue => {}
        _ => return ReminderPlan::nothing(),
    }
    if invoice.due_date >= now {
        return ReminderPlan::nothing();
    }

    if let Some(last_reminder_at) = invoice.last_reminder_at {
        if (now - last_reminder_at) / DAY_MILLIS < REMINDER_COOLDOWN_DAYS {
            return ReminderPlan::nothing();
        }
    }

    let days_overdue = (now - invoice.due_date) / DAY_MILLIS;
    let tier = TIER_TABLE
        .iter()
        .find(|rule| {
            days_overdue >= rule.min_days_overdue && invoice.reminder_count < rule.reminder_cap
        })
        .map(|rule| rule.tier);

    ReminderPlan {
        transition_to_overdue: tier.is_some() && invoice.status == InvoiceStatus::Pending,
        tier,
    }
}
