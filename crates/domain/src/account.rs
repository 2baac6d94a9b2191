use crate::shared::entity::{Entity, ID};
use dealbird_utils::create_random_secret;
use serde::{Deserialize, Serialize};

const API_KEY_LEN: usize = 30;

/// An `Account` is one creator's workspace and acts as a namespace for all
/// other resources. Every admin API request identifies its account through
/// the secret API key.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: ID,
    pub secret_api_key: String,
    pub settings: AccountSettings,
}

#[derive(Debug, Clone, Default)]
pub struct AccountSettings {
    pub webhook: Option<AccountWebhookSettings>,
}

/// Endpoint that receives invoice reminder notifications. The key is sent
/// along so the receiver can authenticate the callback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountWebhookSettings {
    pub url: String,
    pub key: String,
}

impl AccountSettings {
    pub fn set_webhook_url(&mut self, webhook_url: Option<String>) -> bool {
        match webhook_url {
            Some(url) => {
                if let Ok(parsed_url) = url::Url::parse(&url) {
                    let allowed_schemes = ["https", "http"];
                    if !allowed_schemes.contains(&parsed_url.scheme()) {
                        return false;
                    }
                } else {
                    return false;
                }

                if let Some(webhook_settings) = self.webhook.as_mut() {
                    webhook_settings.url = url;
                } else {
                    self.webhook = Some(AccountWebhookSettings {
                        url,
                        key: Account::generate_secret_api_key(),
                    });
                }
            }
            None => {
                self.webhook = None;
            }
        };
        true
    }
}

impl Account {
    pub fn new() -> Self {
        Self {
            id: Default::default(),
            secret_api_key: Self::generate_secret_api_key(),
            settings: Default::default(),
        }
    }

    pub fn generate_secret_api_key() -> String {
        let rand_secret = create_random_secret(API_KEY_LEN);
        format!("sk_{}", rand_secret)
    }
}

impl Entity for Account {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_account() {
        let acc = Account::new();
        assert!(acc.secret_api_key.starts_with("sk_"));
        assert!(acc.secret_api_key.len() > API_KEY_LEN);
        assert!(acc.settings.webhook.is_none());
    }

    #[test]
    fn it_validates_webhook_urls() {
        let mut settings = AccountSettings::default();
        assert!(!settings.set_webhook_url(Some("not a url".into())));
        assert!(!settings.set_webhook_url(Some("ftp://example.com".into())));
        assert!(settings.webhook.is_none());

        assert!(settings.set_webhook_url(Some("https://example.com/hooks".into())));
        let key = settings.webhook.as_ref().map(|w| w.key.clone()).unwrap();

        // Updating the url keeps the signing key stable.
        assert!(settings.set_webhook_url(Some("https://example.com/hooks2".into())));
        assert_eq!(settings.webhook.as_ref().unwrap().key, key);

        assert!(settings.set_webhook_url(None));
        assert!(settings.webhook.is_none());
    }
}
