use crate::{
    notification::notify::{NotifyOutcome, NotifyUseCase},
    shared::usecase::{execute, UseCase},
};
use beacon_domain::{NotificationType, Priority, Reminder};
use beacon_infra::BeaconContext;
use tracing::{debug, error, info, warn};

/// How many due reminders are handled in one tick at most. The rest is
/// picked up by the following ticks.
pub const DUE_REMINDERS_BATCH_SIZE: usize = 500;

/// One scan of the scheduler. Every due reminder is claimed, handed to the
/// `NotifyUseCase` and, when repeating, moved to its next occurrence. Each
/// reminder is its own unit of work so one failing does not affect the rest.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {
    pub limit: usize,
}

impl Default for SendDueRemindersUseCase {
    fn default() -> Self {
        Self {
            limit: DUE_REMINDERS_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SendDueRemindersOutcome {
    pub fired: usize,
    /// Claimed by another scheduler instance or moved in the meantime
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

enum FireResult {
    Fired,
    Skipped,
}

fn notify_usecase(reminder: &Reminder) -> NotifyUseCase {
    NotifyUseCase {
        owner_id: reminder.owner_id.clone(),
        notification_type: NotificationType::Reminder,
        tag: reminder.notification_tag(),
        title: reminder.title.clone(),
        body: reminder
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("Reminder: {}", reminder.title)),
        priority: Priority::Normal,
        action_url: Some(format!("/reminders/{}", reminder.id)),
        channels: Some(reminder.notify_via.clone()),
    }
}

async fn fire(reminder: &Reminder, now: i64, ctx: &BeaconContext) -> anyhow::Result<FireResult> {
    let trigger_at = reminder.trigger_at();
    if !ctx
        .repos
        .reminders
        .claim_firing(&reminder.id, trigger_at, now)
        .await?
    {
        return Ok(FireResult::Skipped);
    }

    match execute(notify_usecase(reminder), ctx).await {
        Ok(NotifyOutcome::Suppressed) => debug!(
            "Reminder: {} fired but its notification was suppressed",
            reminder.id
        ),
        Ok(NotifyOutcome::Stored { .. }) => {}
        Err(e) => {
            // Without a stored notification the instance has not fired
            ctx.repos
                .reminders
                .release_firing(&reminder.id, trigger_at)
                .await?;
            return Err(anyhow::Error::msg(format!(
                "Unable to notify for reminder: {}. Error: {:?}",
                reminder.id, e
            )));
        }
    }

    let mut next = reminder.clone();
    if next.advance(now) && !ctx.repos.reminders.advance(&next, reminder.remind_at).await? {
        warn!(
            "Reminder: {} was changed while firing, keeping the change",
            reminder.id
        );
    }

    Ok(FireResult::Fired)
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = SendDueRemindersOutcome;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &BeaconContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx
            .repos
            .reminders
            .find_due(now, self.limit)
            .await
            .map_err(|e| {
                error!("Unable to query due reminders: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut outcome = SendDueRemindersOutcome::default();
        for reminder in &due {
            match fire(reminder, now, ctx).await {
                Ok(FireResult::Fired) => outcome.fired += 1,
                Ok(FireResult::Skipped) => outcome.skipped += 1,
                Err(e) => {
                    error!("Failed to fire reminder: {}. Error: {:?}", reminder.id, e);
                    outcome.failed += 1;
                }
            }
        }
        if !due.is_empty() {
            info!(
                "Due reminders handled. Fired: {}, skipped: {}, failed: {}",
                outcome.fired, outcome.skipped, outcome.failed
            );
        }

        Ok(outcome)
    }
}
