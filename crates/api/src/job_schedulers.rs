use crate::invoice::send_invoice_reminders::{SendInvoiceRemindersUseCase, WebhookReminderNotifier};
use crate::proposal::expire_proposals::ExpireProposalsUseCase;
use crate::shared::usecase::execute;
use dealbird_infra::DealbirdContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

/// Hourly invoice reminder cycle. Each tick plans, delivers and records one
/// batch; a tick that fails for one account still serves the rest.
pub fn start_send_reminders_job(ctx: DealbirdContext) {
    actix_web::rt::spawn(async move {
        let mut interval = interval(Duration::from_secs(ctx.config.reminder_job_interval_secs));
        let notifier = Arc::new(WebhookReminderNotifier::new());
        loop {
            interval.tick().await;

            let usecase = SendInvoiceRemindersUseCase {
                notifier: notifier.clone(),
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

/// Proposal expiry sweep, every ten minutes by default.
pub fn start_expire_proposals_job(ctx: DealbirdContext) {
    actix_web::rt::spawn(async move {
        let mut interval = interval(Duration::from_secs(ctx.config.expiry_job_interval_secs));
        loop {
            interval.tick().await;

            let _ = execute(ExpireProposalsUseCase, &ctx).await;
        }
    });
}
