use super::IAccountRepo;
use dealbird_domain::{Account, AccountSettings, AccountWebhookSettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAccountRepo {
    pool: PgPool,
}

impl PostgresAccountRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRaw {
    account_uid: Uuid,
    secret_api_key: String,
    webhook_url: Option<String>,
    webhook_key: Option<String>,
}

impl From<AccountRaw> for Account {
    fn from(raw: AccountRaw) -> Self {
        let webhook = match (raw.webhook_url, raw.webhook_key) {
            (Some(url), Some(key)) => Some(AccountWebhookSettings { url, key }),
            _ => None,
        };
        Self {
            id: raw.account_uid.into(),
            secret_api_key: raw.secret_api_key,
            settings: AccountSettings { webhook },
        }
    }
}

#[async_trait::async_trait]
impl IAccountRepo for PostgresAccountRepo {
    async fn insert(&self, account: &Account) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts(account_uid, secret_api_key, webhook_url, webhook_key)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(account.id.inner_ref())
        .bind(&account.secret_api_key)
        .bind(account.settings.webhook.as_ref().map(|w| &w.url))
        .bind(account.settings.webhook.as_ref().map(|w| &w.key))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, account: &Account) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET secret_api_key = $2,
            webhook_url = $3,
            webhook_key = $4
            WHERE account_uid = $1
            "#,
        )
        .bind(account.id.inner_ref())
        .bind(&account.secret_api_key)
        .bind(account.settings.webhook.as_ref().map(|w| &w.url))
        .bind(account.settings.webhook.as_ref().map(|w| &w.key))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, account_id: &ID) -> Option<Account> {
        sqlx::query_as::<_, AccountRaw>(
            r#"
            SELECT * FROM accounts
            WHERE account_uid = $1
            "#,
        )
        .bind(account_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_by_apikey(&self, api_key: &str) -> Option<Account> {
        sqlx::query_as::<_, AccountRaw>(
            r#"
            SELECT * FROM accounts
            WHERE secret_api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_all(&self) -> Vec<Account> {
        sqlx::query_as::<_, AccountRaw>(
            r#"
            SELECT * FROM accounts
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }
}
