mod account;
mod availability;
mod booking;
pub mod date;
mod invoice;
mod proposal;
mod shared;

pub use account::{Account, AccountSettings, AccountWebhookSettings};
pub use availability::{
    AvailabilityProfile, InvalidTimeRangeError, Slot, TimeOfDay, TimeRange, Weekday, WeeklyRule,
    MAX_DURATION_MINUTES,
};
pub use booking::{Booking, BookingStatus};
pub use date::Day;
pub use invoice::{
    plan_reminder, Invoice, InvoiceStatus, ReminderPlan, ReminderTier, DAY_MILLIS,
    INVOICE_NET_DAYS, REMINDER_COOLDOWN_DAYS,
};
pub use proposal::{Proposal, ProposalStateError, ProposalStatus};
pub use shared::entity::{Entity, ID};
