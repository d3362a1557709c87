use crate::{
    reminder::send_due_reminders::{SendDueRemindersOutcome, SendDueRemindersUseCase},
    shared::usecase::execute,
};
use actix_web::rt::time::{interval_at, Instant};
use beacon_infra::BeaconContext;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tracing::warn;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Makes sure at most one scan of due reminders runs at a time
#[derive(Debug, Default)]
pub struct TickGuard {
    running: AtomicBool,
}

/// Held for as long as a tick runs
pub struct TickPermit {
    guard: Arc<TickGuard>,
}

impl TickGuard {
    pub fn try_start(guard: &Arc<TickGuard>) -> Option<TickPermit> {
        guard
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TickPermit {
                guard: guard.clone(),
            })
    }
}

impl Drop for TickPermit {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}

/// Runs a single scan of due reminders. Failures are logged by the use case.
pub async fn send_due_reminders(ctx: &BeaconContext) -> Option<SendDueRemindersOutcome> {
    execute(SendDueRemindersUseCase::default(), ctx).await.ok()
}

pub fn start_send_reminders_job(ctx: BeaconContext) {
    actix_web::rt::spawn(async move {
        let period_secs = ctx.config.reminder_tick_interval_secs;
        // Minutely (or coarser) schedules are aligned to the start of a minute
        let start_delay = if period_secs % 60 == 0 {
            get_start_delay(ctx.sys.get_timestamp_millis() as usize, 0) as u64
        } else {
            period_secs
        };
        let start = Instant::now() + Duration::from_secs(start_delay);
        let mut ticks = interval_at(start, Duration::from_secs(period_secs));
        let guard = Arc::new(TickGuard::default());

        loop {
            ticks.tick().await;
            let permit = match TickGuard::try_start(&guard) {
                Some(permit) => permit,
                None => {
                    warn!("Previous reminder scan is still running, skipping this tick");
                    continue;
                }
            };
            let context = ctx.clone();
            actix_web::rt::spawn(async move {
                send_due_reminders(&context).await;
                drop(permit);
            });
        }
    });
}
