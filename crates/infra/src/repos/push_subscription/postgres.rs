use super::IPushSubscriptionRepo;
use crate::repos::shared::repo::DeleteResult;
use beacon_domain::{PushSubscription, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresPushSubscriptionRepo {
    pool: PgPool,
}

impl PostgresPushSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PushSubscriptionRaw {
    subscription_uid: Uuid,
    owner_uid: Uuid,
    endpoint: String,
    p256dh: String,
    auth: String,
    created: i64,
}

impl From<PushSubscriptionRaw> for PushSubscription {
    fn from(raw: PushSubscriptionRaw) -> Self {
        PushSubscription {
            id: raw.subscription_uid.into(),
            owner_id: raw.owner_uid.into(),
            endpoint: raw.endpoint,
            p256dh: raw.p256dh,
            auth: raw.auth,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IPushSubscriptionRepo for PostgresPushSubscriptionRepo {
    async fn upsert(&self, s: &PushSubscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO push_subscriptions(subscription_uid, owner_uid, endpoint, p256dh, auth, created)
            VALUES($1, $2, $3, $4, $5, $6)
            ON CONFLICT (endpoint) DO UPDATE SET
                owner_uid = EXCLUDED.owner_uid,
                p256dh = EXCLUDED.p256dh,
                auth = EXCLUDED.auth
            "#,
        )
        .bind(s.id.inner_ref())
        .bind(s.owner_id.inner_ref())
        .bind(&s.endpoint)
        .bind(&s.p256dh)
        .bind(&s.auth)
        .bind(s.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_owner(&self, owner_id: &ID) -> anyhow::Result<Vec<PushSubscription>> {
        let subscriptions = sqlx::query_as::<_, PushSubscriptionRaw>(
            r#"
            SELECT * FROM push_subscriptions AS s
            WHERE s.owner_uid = $1
            "#,
        )
        .bind(owner_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions.into_iter().map(|s| s.into()).collect())
    }

    async fn delete_by_endpoint(
        &self,
        owner_id: &ID,
        endpoint: &str,
    ) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM push_subscriptions AS s
            WHERE s.owner_uid = $1 AND s.endpoint = $2
            "#,
        )
        .bind(owner_id.inner_ref())
        .bind(endpoint)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete(&self, subscription_id: &ID) -> Option<PushSubscription> {
        sqlx::query_as::<_, PushSubscriptionRaw>(
            r#"
            DELETE FROM push_subscriptions AS s
            WHERE s.subscription_uid = $1
            RETURNING *
            "#,
        )
        .bind(subscription_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            warn!("Unable to delete push subscription: {:?}", e);
            None
        })
        .map(|s| s.into())
    }
}
