mod inmemory;
mod postgres;

use dealbird_domain::{Account, ID};
pub use inmemory::InMemoryAccountRepo;
pub use postgres::PostgresAccountRepo;

#[async_trait::async_trait]
pub trait IAccountRepo: Send + Sync {
    async fn insert(&self, account: &Account) -> anyhow::Result<()>;
    async fn save(&self, account: &Account) -> anyhow::Result<()>;
    async fn find(&self, account_id: &ID) -> Option<Account>;
    async fn find_by_apikey(&self, api_key: &str) -> Option<Account>;
    async fn find_all(&self) -> Vec<Account>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_domain::Account;

    #[tokio::test]
    async fn create_and_find() {
        let repo = InMemoryAccountRepo::new();
        let account = Account::default();

        assert!(repo.insert(&account).await.is_ok());

        let res = repo.find(&account.id).await.expect("To find account");
        assert_eq!(res.id, account.id);
        let res = repo
            .find_by_apikey(&account.secret_api_key)
            .await
            .expect("To find account by api key");
        assert_eq!(res.id, account.id);
        assert!(repo.find_by_apikey("sk_bogus").await.is_none());
        assert_eq!(repo.find_all().await.len(), 1);
    }

    #[tokio::test]
    async fn save_updates_webhook_settings() {
        let repo = InMemoryAccountRepo::new();
        let mut account = Account::default();
        repo.insert(&account).await.expect("To insert account");

        assert!(account
            .settings
            .set_webhook_url(Some("https://example.com/hook".into())));
        assert!(repo.save(&account).await.is_ok());

        let res = repo.find(&account.id).await.expect("To find account");
        assert_eq!(
            res.settings.webhook.map(|webhook| webhook.url),
            Some("https://example.com/hook".to_string())
        );
    }
}
