use super::IReminderRepo;
use beacon_domain::{Channel, Reminder, ReminderStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    owner_uid: Uuid,
    entity_id: Option<String>,
    title: String,
    description: Option<String>,
    remind_at: i64,
    repeat_type: String,
    notify_via: Vec<String>,
    is_completed: bool,
    completed_at: Option<i64>,
    is_snoozed: bool,
    snoozed_until: Option<i64>,
    created: i64,
    updated: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Reminder {
            id: raw.reminder_uid.into(),
            owner_id: raw.owner_uid.into(),
            entity_id: raw.entity_id,
            title: raw.title,
            description: raw.description,
            remind_at: raw.remind_at,
            repeat_type: raw.repeat_type.parse().unwrap_or_default(),
            notify_via: raw
                .notify_via
                .iter()
                .filter_map(|c| c.parse::<Channel>().ok())
                .collect(),
            is_completed: raw.is_completed,
            completed_at: raw.completed_at,
            is_snoozed: raw.is_snoozed,
            snoozed_until: raw.snoozed_until,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

fn channel_names(channels: &[Channel]) -> Vec<String> {
    channels.iter().map(|c| c.as_str().to_string()).collect()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, r: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders(
                reminder_uid,
                owner_uid,
                entity_id,
                title,
                description,
                remind_at,
                repeat_type,
                notify_via,
                is_completed,
                completed_at,
                is_snoozed,
                snoozed_until,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(r.id.inner_ref())
        .bind(r.owner_id.inner_ref())
        .bind(&r.entity_id)
        .bind(&r.title)
        .bind(&r.description)
        .bind(r.remind_at)
        .bind(r.repeat_type.as_str())
        .bind(channel_names(&r.notify_via))
        .bind(r.is_completed)
        .bind(r.completed_at)
        .bind(r.is_snoozed)
        .bind(r.snoozed_until)
        .bind(r.created)
        .bind(r.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, r: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders SET
                entity_id = $2,
                title = $3,
                description = $4,
                remind_at = $5,
                repeat_type = $6,
                notify_via = $7,
                is_completed = $8,
                completed_at = $9,
                is_snoozed = $10,
                snoozed_until = $11,
                updated = $12
            WHERE reminder_uid = $1
            "#,
        )
        .bind(r.id.inner_ref())
        .bind(&r.entity_id)
        .bind(&r.title)
        .bind(&r.description)
        .bind(r.remind_at)
        .bind(r.repeat_type.as_str())
        .bind(channel_names(&r.notify_via))
        .bind(r.is_completed)
        .bind(r.completed_at)
        .bind(r.is_snoozed)
        .bind(r.snoozed_until)
        .bind(r.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            warn!("Unable to find reminder: {:?}", e);
            None
        })
        .map(|r| r.into())
    }

    async fn find_by_owner(
        &self,
        owner_id: &ID,
        status: ReminderStatus,
    ) -> anyhow::Result<Vec<Reminder>> {
        let is_completed = match status {
            ReminderStatus::Pending => Some(false),
            ReminderStatus::Completed => Some(true),
            ReminderStatus::All => None,
        };
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.owner_uid = $1 AND ($2::BOOLEAN IS NULL OR r.is_completed = $2)
            ORDER BY r.remind_at ASC
            "#,
        )
        .bind(owner_id.inner_ref())
        .bind(is_completed)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            warn!("Unable to delete reminder: {:?}", e);
            None
        })
        .map(|r| r.into())
    }

    async fn find_due(&self, now: i64, limit: usize) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.remind_at <= $1
                AND r.is_completed = false
                AND (r.is_snoozed = false OR COALESCE(r.snoozed_until, 0) <= $1)
                AND NOT EXISTS (
                    SELECT 1 FROM reminder_firings AS f
                    WHERE f.reminder_uid = r.reminder_uid
                        AND f.trigger_at = CASE
                            WHEN r.is_snoozed AND r.snoozed_until IS NOT NULL
                                THEN GREATEST(r.snoozed_until, r.remind_at)
                            ELSE r.remind_at
                        END
                )
            ORDER BY r.remind_at ASC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn claim_firing(
        &self,
        reminder_id: &ID,
        trigger_at: i64,
        now: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO reminder_firings (reminder_uid, trigger_at, fired_at)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(trigger_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn release_firing(&self, reminder_id: &ID, trigger_at: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminder_firings AS f
            WHERE f.reminder_uid = $1 AND f.trigger_at = $2
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(trigger_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn advance(&self, r: &Reminder, expected_remind_at: i64) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders SET
                remind_at = $2,
                is_completed = $3,
                completed_at = $4,
                is_snoozed = $5,
                snoozed_until = $6,
                updated = $7
            WHERE reminder_uid = $1 AND remind_at = $8
            "#,
        )
        .bind(r.id.inner_ref())
        .bind(r.remind_at)
        .bind(r.is_completed)
        .bind(r.completed_at)
        .bind(r.is_snoozed)
        .bind(r.snoozed_until)
        .bind(r.updated)
        .bind(expected_remind_at)
        .execute(&self.pool)
        .await?;
        if res.rows_affected() != 1 {
            return Ok(false);
        }

        // Occurrences before the one that just fired can not become due again
        sqlx::query(
            r#"
            DELETE FROM reminder_firings AS f
            WHERE f.reminder_uid = $1 AND f.trigger_at < $2
            "#,
        )
        .bind(r.id.inner_ref())
        .bind(expected_remind_at)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }
}
