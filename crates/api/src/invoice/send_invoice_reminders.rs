use crate::shared::usecase::UseCase;
use dealbird_api_structs::dtos::InvoiceReminderDTO;
use dealbird_api_structs::send_invoice_reminders::AccountRemindersDTO;
use dealbird_domain::{plan_reminder, AccountWebhookSettings, Invoice, ReminderTier, ID};
use dealbird_infra::DealbirdContext;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info};

/// Delivers one batch of escalation reminders to an account webhook.
#[async_trait::async_trait(?Send)]
pub trait IReminderNotifier {
    async fn notify(
        &self,
        webhook: &AccountWebhookSettings,
        reminders: AccountRemindersDTO,
    ) -> anyhow::Result<()>;
}

pub struct WebhookReminderNotifier {
    client: reqwest::Client,
}

impl WebhookReminderNotifier {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for WebhookReminderNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait(?Send)]
impl IReminderNotifier for WebhookReminderNotifier {
    async fn notify(
        &self,
        webhook: &AccountWebhookSettings,
        reminders: AccountRemindersDTO,
    ) -> anyhow::Result<()> {
        self.client
            .post(&webhook.url)
            .header("dealbird-webhook-key", &webhook.key)
            .json(&reminders)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// One reminder cycle: plans a tier for every unpaid invoice past its due
/// date, posts the planned reminders per account and records the
/// bookkeeping for the ones that were delivered. Only invoked by the job
/// scheduler, there is no route for it.
pub struct SendInvoiceRemindersUseCase {
    pub notifier: Arc<dyn IReminderNotifier>,
}

impl fmt::Debug for SendInvoiceRemindersUseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendInvoiceRemindersUseCase")
    }
}

#[derive(Debug)]
pub enum UseCaseError {}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminders_sent: usize,
    pub accounts_notified: usize,
    pub moved_overdue: usize,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendInvoiceRemindersUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SendInvoiceReminders";

    async fn execute(&mut self, ctx: &DealbirdContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let candidates = ctx.repos.invoices.find_reminder_candidates(now).await;

        let mut moved_overdue = 0;
        let mut per_account: HashMap<ID, Vec<(Invoice, ReminderTier)>> = HashMap::new();

        for mut invoice in candidates {
            let plan = plan_reminder(&invoice, now);

            // The overdue transition reflects elapsed time only, so it is
            // persisted whether or not the reminder later gets delivered.
            if plan.transition_to_overdue {
                invoice.mark_overdue(now);
                match ctx.repos.invoices.save(&invoice).await {
                    Ok(_) => moved_overdue += 1,
                    Err(e) => {
                        error!("Unable to mark invoice: {} overdue. Err: {:?}", invoice.id, e);
                        continue;
                    }
                }
            }

            if let Some(tier) = plan.tier {
                per_account
                    .entry(invoice.account_id.clone())
                    .or_insert_with(Vec::new)
                    .push((invoice, tier));
            }
        }

        let mut reminders_sent = 0;
        let mut accounts_notified = 0;

        for (account_id, batch) in per_account {
            let account = match ctx.repos.accounts.find(&account_id).await {
                Some(account) => account,
                None => continue,
            };
            let webhook = match &account.settings.webhook {
                Some(webhook) => webhook.clone(),
                None => continue,
            };

            let payload = AccountRemindersDTO::new(
                batch
                    .iter()
                    .map(|(invoice, tier)| InvoiceReminderDTO::new(invoice, *tier))
                    .collect(),
            );

            // A failing webhook must not starve the other accounts. Nothing
            // is recorded for the failed batch, so the same tier is retried
            // on the next cycle.
            if let Err(e) = self.notifier.notify(&webhook, payload).await {
                error!(
                    "Unable to deliver invoice reminders for account: {}. Err: {:?}",
                    account_id, e
                );
                continue;
            }

            accounts_notified += 1;
            for (mut invoice, _) in batch {
                invoice.record_reminder(now);
                match ctx.repos.invoices.save(&invoice).await {
                    Ok(_) => reminders_sent += 1,
                    Err(e) => error!(
                        "Unable to record reminder for invoice: {}. Err: {:?}",
                        invoice.id, e
                    ),
                }
            }
        }

        if reminders_sent > 0 || moved_overdue > 0 {
            info!(
                "Reminder cycle sent {} reminders to {} accounts and moved {} invoices overdue",
                reminders_sent, accounts_notified, moved_overdue
            );
        }
        Ok(UseCaseRes {
            reminders_sent,
            accounts_notified,
            moved_overdue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use dealbird_domain::{Account, InvoiceStatus, Proposal, DAY_MILLIS};
    use dealbird_infra::{Config, DealbirdContext, ISys, Repos};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct StaticTimeSys(i64);

    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    fn ctx_at(now: i64) -> DealbirdContext {
        DealbirdContext {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(StaticTimeSys(now)),
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        pub sent: Rc<RefCell<Vec<AccountRemindersDTO>>>,
        pub fail: bool,
    }

    #[async_trait::async_trait(?Send)]
    impl IReminderNotifier for RecordingNotifier {
        async fn notify(
            &self,
            _webhook: &AccountWebhookSettings,
            reminders: AccountRemindersDTO,
        ) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("recipient unreachable");
            }
            self.sent.borrow_mut().push(reminders);
            Ok(())
        }
    }

    async fn insert_account(ctx: &DealbirdContext, with_webhook: bool) -> Account {
        let mut account = Account::new();
        if with_webhook {
            assert!(account
                .settings
                .set_webhook_url(Some("https://example.com/hook".into())));
        }
        ctx.repos
            .accounts
            .insert(&account)
            .await
            .expect("To insert account");
        account
    }

    // Invoice signed at t=0, so due at day 30
    async fn insert_invoice(ctx: &DealbirdContext, account: &Account) -> Invoice {
        let mut proposal = Proposal::new(
            account.id.clone(),
            "Spring campaign".into(),
            "Acme".into(),
            250_000,
            0,
        );
        proposal.send(None, 0).expect("To send proposal");
        proposal.sign(0).expect("To sign proposal");
        let invoice = Invoice::for_signed_proposal(&proposal, 0);
        ctx.repos
            .invoices
            .insert(&invoice)
            .await
            .expect("To insert invoice");
        invoice
    }

    fn usecase(notifier: &Rc<RefCell<Vec<AccountRemindersDTO>>>, fail: bool) -> SendInvoiceRemindersUseCase {
        SendInvoiceRemindersUseCase {
            notifier: Arc::new(RecordingNotifier {
                sent: notifier.clone(),
                fail,
            }),
        }
    }

    #[actix_web::main]
    #[test]
    async fn sends_friendly_reminder_and_records_bookkeeping() {
        // 5 whole days overdue
        let ctx = ctx_at(35 * DAY_MILLIS);
        let account = insert_account(&ctx, true).await;
        let invoice = insert_invoice(&ctx, &account).await;

        let sent = Rc::new(RefCell::new(Vec::new()));
        let res = execute(usecase(&sent, false), &ctx)
            .await
            .expect("To run reminder cycle");
        assert_eq!(res.reminders_sent, 1);
        assert_eq!(res.accounts_notified, 1);
        assert_eq!(res.moved_overdue, 1);

        let payloads = sent.borrow();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].reminders.len(), 1);
        assert_eq!(payloads[0].reminders[0].tier, 1);

        let stored = ctx
            .repos
            .invoices
            .find(&invoice.id)
            .await
            .expect("To find invoice");
        assert_eq!(stored.status, InvoiceStatus::Overdue);
        assert_eq!(stored.reminder_count, 1);
        assert_eq!(stored.last_reminder_at, Some(35 * DAY_MILLIS));
    }

    #[actix_web::main]
    #[test]
    async fn cooldown_blocks_back_to_back_cycles() {
        let ctx = ctx_at(35 * DAY_MILLIS);
        let account = insert_account(&ctx, true).await;
        insert_invoice(&ctx, &account).await;

        let sent = Rc::new(RefCell::new(Vec::new()));
        execute(usecase(&sent, false), &ctx)
            .await
            .expect("To run reminder cycle");
        let res = execute(usecase(&sent, false), &ctx)
            .await
            .expect("To run reminder cycle");
        assert_eq!(res.reminders_sent, 0);
        assert_eq!(sent.borrow().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn escalates_to_final_notice() {
        // 31 whole days overdue, two reminders already out, cooldown elapsed
        let now = 61 * DAY_MILLIS + 1;
        let ctx = ctx_at(now);
        let account = insert_account(&ctx, true).await;
        let mut invoice = insert_invoice(&ctx, &account).await;
        invoice.mark_overdue(40 * DAY_MILLIS);
        invoice.record_reminder(40 * DAY_MILLIS);
        invoice.record_reminder(50 * DAY_MILLIS);
        ctx.repos
            .invoices
            .save(&invoice)
            .await
            .expect("To save invoice");

        let sent = Rc::new(RefCell::new(Vec::new()));
        let res = execute(usecase(&sent, false), &ctx)
            .await
            .expect("To run reminder cycle");
        assert_eq!(res.reminders_sent, 1);
        assert_eq!(sent.borrow()[0].reminders[0].tier, 3);

        let stored = ctx
            .repos
            .invoices
            .find(&invoice.id)
            .await
            .expect("To find invoice");
        assert_eq!(stored.reminder_count, 3);
    }

    #[actix_web::main]
    #[test]
    async fn failed_delivery_keeps_the_tier_for_retry() {
        let ctx = ctx_at(35 * DAY_MILLIS);
        let account = insert_account(&ctx, true).await;
        let invoice = insert_invoice(&ctx, &account).await;

        let sent = Rc::new(RefCell::new(Vec::new()));
        let res = execute(usecase(&sent, true), &ctx)
            .await
            .expect("To run reminder cycle");
        assert_eq!(res.reminders_sent, 0);
        assert_eq!(res.accounts_notified, 0);
        // The overdue transition is time-based and sticks even so
        assert_eq!(res.moved_overdue, 1);

        let stored = ctx
            .repos
            .invoices
            .find(&invoice.id)
            .await
            .expect("To find invoice");
        assert_eq!(stored.status, InvoiceStatus::Overdue);
        assert_eq!(stored.reminder_count, 0);
        assert_eq!(stored.last_reminder_at, None);
    }

    #[actix_web::main]
    #[test]
    async fn account_without_webhook_is_skipped() {
        let ctx = ctx_at(35 * DAY_MILLIS);
        let account = insert_account(&ctx, false).await;
        let invoice = insert_invoice(&ctx, &account).await;

        let sent = Rc::new(RefCell::new(Vec::new()));
        let res = execute(usecase(&sent, false), &ctx)
            .await
            .expect("To run reminder cycle");
        assert_eq!(res.reminders_sent, 0);
        assert_eq!(res.moved_overdue, 1);
        assert!(sent.borrow().is_empty());

        let stored = ctx
            .repos
            .invoices
            .find(&invoice.id)
            .await
            .expect("To find invoice");
        assert_eq!(stored.status, InvoiceStatus::Overdue);
    }

    #[actix_web::main]
    #[test]
    async fn paid_and_not_yet_due_invoices_are_left_alone() {
        let ctx = ctx_at(35 * DAY_MILLIS);
        let account = insert_account(&ctx, true).await;
        let mut paid = insert_invoice(&ctx, &account).await;
        paid.mark_paid(31 * DAY_MILLIS).expect("To mark paid");
        ctx.repos
            .invoices
            .save(&paid)
            .await
            .expect("To save invoice");

        let sent = Rc::new(RefCell::new(Vec::new()));
        let res = execute(usecase(&sent, false), &ctx)
            .await
            .expect("To run reminder cycle");
        assert_eq!(res.reminders_sent, 0);
        assert_eq!(res.moved_overdue, 0);
        assert!(sent.borrow().is_empty());
    }
}
