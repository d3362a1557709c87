use super::INotificationRepo;
use beacon_domain::{Notification, NotificationType, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    owner_uid: Uuid,
    tag: String,
    notification_type: String,
    title: String,
    body: String,
    priority: String,
    action_url: Option<String>,
    is_read: bool,
    created_at: i64,
}

impl From<NotificationRaw> for Notification {
    fn from(raw: NotificationRaw) -> Self {
        Notification {
            id: raw.notification_uid.into(),
            owner_id: raw.owner_uid.into(),
            tag: raw.tag,
            notification_type: raw
                .notification_type
                .parse()
                .unwrap_or(NotificationType::Custom),
            title: raw.title,
            body: raw.body,
            priority: raw.priority.parse().unwrap_or_default(),
            action_url: raw.action_url,
            is_read: raw.is_read,
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn upsert_unread(&self, n: &Notification) -> anyhow::Result<Notification> {
        let stored = sqlx::query_as::<_, NotificationRaw>(
            r#"
            INSERT INTO notifications(
                notification_uid,
                owner_uid,
                tag,
                notification_type,
                title,
                body,
                priority,
                action_url,
                is_read,
                created_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, false, $9)
            ON CONFLICT (owner_uid, tag) WHERE is_read = false
            DO UPDATE SET
                notification_type = EXCLUDED.notification_type,
                title = EXCLUDED.title,
                body = EXCLUDED.body,
                priority = EXCLUDED.priority,
                action_url = EXCLUDED.action_url,
                created_at = EXCLUDED.created_at
            RETURNING *
            "#,
        )
        .bind(n.id.inner_ref())
        .bind(n.owner_id.inner_ref())
        .bind(&n.tag)
        .bind(n.notification_type.as_str())
        .bind(&n.title)
        .bind(&n.body)
        .bind(n.priority.as_str())
        .bind(&n.action_url)
        .bind(n.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored.into())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            warn!("Unable to find notification: {:?}", e);
            None
        })
        .map(|n| n.into())
    }

    async fn find_by_owner(
        &self,
        owner_id: &ID,
        limit: usize,
    ) -> anyhow::Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.owner_uid = $1
            ORDER BY n.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id.inner_ref())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }

    async fn count_unread(&self, owner_id: &ID) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM notifications AS n
            WHERE n.owner_uid = $1 AND n.is_read = false
            "#,
        )
        .bind(owner_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn mark_read(
        &self,
        notification_id: &ID,
        owner_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, NotificationRaw>(
            r#"
            UPDATE notifications SET is_read = true
            WHERE notification_uid = $1 AND owner_uid = $2
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(owner_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification.map(|n| n.into()))
    }

    async fn mark_all_read(&self, owner_id: &ID) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE notifications SET is_read = true
            WHERE owner_uid = $1 AND is_read = false
            "#,
        )
        .bind(owner_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }

    async fn delete(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            DELETE FROM notifications AS n
            WHERE n.notification_uid = $1 AND n.owner_uid = $2
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(owner_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            warn!("Unable to delete notification: {:?}", e);
            None
        })
        .map(|n| n.into())
    }
}
