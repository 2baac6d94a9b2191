use super::IAvailabilityProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use dealbird_domain::{AvailabilityProfile, ID};

pub struct InMemoryAvailabilityProfileRepo {
    profiles: std::sync::Mutex<Vec<AvailabilityProfile>>,
}

impl InMemoryAvailabilityProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IAvailabilityProfileRepo for InMemoryAvailabilityProfileRepo {
    async fn insert(&self, profile: &AvailabilityProfile) -> anyhow::Result<()> {
        insert(profile, &self.profiles);
        Ok(())
    }

    async fn save(&self, profile: &AvailabilityProfile) -> anyhow::Result<()> {
        save(profile, &self.profiles);
        Ok(())
    }

    async fn find(&self, profile_id: &ID) -> Option<AvailabilityProfile> {
        find(profile_id, &self.profiles)
    }

    async fn find_by_account(&self, account_id: &ID) -> Vec<AvailabilityProfile> {
        find_by(&self.profiles, |profile| profile.account_id == *account_id)
    }
}
