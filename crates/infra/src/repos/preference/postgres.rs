use super::IPreferenceRepo;
use beacon_domain::{CategoryPreference, ChannelToggles, PreferenceRecord, ID};
use sqlx::{types::Json, types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresPreferenceRepo {
    pool: PgPool,
}

impl PostgresPreferenceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PreferenceRaw {
    owner_uid: Uuid,
    channels: Json<ChannelToggles>,
    reminders: Json<CategoryPreference>,
    billing: Json<CategoryPreference>,
    posts: Json<CategoryPreference>,
    finance: Json<CategoryPreference>,
    system: Json<CategoryPreference>,
    updated: i64,
}

impl From<PreferenceRaw> for PreferenceRecord {
    fn from(raw: PreferenceRaw) -> Self {
        PreferenceRecord {
            owner_id: raw.owner_uid.into(),
            channels: raw.channels.0,
            reminders: raw.reminders.0,
            billing: raw.billing.0,
            posts: raw.posts.0,
            finance: raw.finance.0,
            system: raw.system.0,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IPreferenceRepo for PostgresPreferenceRepo {
    async fn find(&self, owner_id: &ID) -> Option<PreferenceRecord> {
        sqlx::query_as::<_, PreferenceRaw>(
            r#"
            SELECT * FROM notification_preferences AS p
            WHERE p.owner_uid = $1
            "#,
        )
        .bind(owner_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            warn!("Unable to find notification preferences: {:?}", e);
            None
        })
        .map(|p| p.into())
    }

    async fn save(&self, p: &PreferenceRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_preferences(
                owner_uid,
                channels,
                reminders,
                billing,
                posts,
                finance,
                system,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (owner_uid) DO UPDATE SET
                channels = EXCLUDED.channels,
                reminders = EXCLUDED.reminders,
                billing = EXCLUDED.billing,
                posts = EXCLUDED.posts,
                finance = EXCLUDED.finance,
                system = EXCLUDED.system,
                updated = EXCLUDED.updated
            "#,
        )
        .bind(p.owner_id.inner_ref())
        .bind(Json(&p.channels))
        .bind(Json(&p.reminders))
        .bind(Json(&p.billing))
        .bind(Json(&p.posts))
        .bind(Json(&p.finance))
        .bind(Json(&p.system))
        .bind(p.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
