mod inmemory;
mod postgres;

use dealbird_domain::{AvailabilityProfile, ID};
pub use inmemory::InMemoryAvailabilityProfileRepo;
pub use postgres::PostgresAvailabilityProfileRepo;

#[async_trait::async_trait]
pub trait IAvailabilityProfileRepo: Send + Sync {
    async fn insert(&self, profile: &AvailabilityProfile) -> anyhow::Result<()>;
    async fn save(&self, profile: &AvailabilityProfile) -> anyhow::Result<()>;
    async fn find(&self, profile_id: &ID) -> Option<AvailabilityProfile>;
    async fn find_by_account(&self, account_id: &ID) -> Vec<AvailabilityProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealbird_domain::{AvailabilityProfile, WeeklyRule, ID};

    #[tokio::test]
    async fn create_update_and_find() {
        let repo = InMemoryAvailabilityProfileRepo::new();
        let account_id = ID::default();
        let mut profile = AvailabilityProfile::new(account_id.clone(), 30);

        assert!(repo.insert(&profile).await.is_ok());
        let res = repo.find(&profile.id).await.expect("To find profile");
        assert_eq!(res.duration_minutes, 30);
        assert_eq!(res.weekly_rules.len(), 5);

        profile.duration_minutes = 45;
        profile.weekly_rules = vec![WeeklyRule {
            weekday: dealbird_domain::Weekday::Sat,
            ranges: vec!["10:00-14:00".parse().unwrap()],
        }];
        assert!(repo.save(&profile).await.is_ok());
        let res = repo.find(&profile.id).await.expect("To find profile");
        assert_eq!(res.duration_minutes, 45);
        assert_eq!(res.weekly_rules.len(), 1);

        assert_eq!(repo.find_by_account(&account_id).await.len(), 1);
        assert!(repo.find_by_account(&ID::default()).await.is_empty());
    }
}
