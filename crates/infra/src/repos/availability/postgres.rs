use super::IAvailabilityProfileRepo;
use dealbird_domain::{AvailabilityProfile, WeeklyRule, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAvailabilityProfileRepo {
    pool: PgPool,
}

impl PostgresAvailabilityProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AvailabilityProfileRaw {
    profile_uid: Uuid,
    account_uid: Uuid,
    duration_minutes: i64,
    weekly_rules: serde_json::Value,
}

impl From<AvailabilityProfileRaw> for AvailabilityProfile {
    fn from(raw: AvailabilityProfileRaw) -> Self {
        Self {
            id: raw.profile_uid.into(),
            account_id: raw.account_uid.into(),
            duration_minutes: raw.duration_minutes,
            weekly_rules: serde_json::from_value::<Vec<WeeklyRule>>(raw.weekly_rules)
                .unwrap_or_default(),
        }
    }
}

fn rules_json(profile: &AvailabilityProfile) -> serde_json::Value {
    serde_json::to_value(&profile.weekly_rules).unwrap_or_else(|_| serde_json::json!([]))
}

#[async_trait::async_trait]
impl IAvailabilityProfileRepo for PostgresAvailabilityProfileRepo {
    async fn insert(&self, profile: &AvailabilityProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO availability_profiles(profile_uid, account_uid, duration_minutes, weekly_rules)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(profile.id.inner_ref())
        .bind(profile.account_id.inner_ref())
        .bind(profile.duration_minutes)
        .bind(rules_json(profile))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, profile: &AvailabilityProfile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE availability_profiles
            SET duration_minutes = $2,
            weekly_rules = $3
            WHERE profile_uid = $1
            "#,
        )
        .bind(profile.id.inner_ref())
        .bind(profile.duration_minutes)
        .bind(rules_json(profile))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, profile_id: &ID) -> Option<AvailabilityProfile> {
        sqlx::query_as::<_, AvailabilityProfileRaw>(
            r#"
            SELECT * FROM availability_profiles
            WHERE profile_uid = $1
            "#,
        )
        .bind(profile_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn find_by_account(&self, account_id: &ID) -> Vec<AvailabilityProfile> {
        sqlx::query_as::<_, AvailabilityProfileRaw>(
            r#"
            SELECT * FROM availability_profiles
            WHERE account_uid = $1
            "#,
        )
        .bind(account_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }
}
