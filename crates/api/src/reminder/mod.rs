mod complete_reminder;
mod create_reminder;
mod delete_reminder;
mod get_reminder;
mod get_reminders;
mod reopen_reminder;
pub mod send_due_reminders;
mod snooze_reminder;
mod update_reminder;

use actix_web::web;
use beacon_domain::{Reminder, ID};
use beacon_infra::BeaconContext;
use complete_reminder::complete_reminder_controller;
use create_reminder::{create_reminder_admin_controller, create_reminder_controller};
use delete_reminder::delete_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
use reopen_reminder::reopen_reminder_controller;
use snooze_reminder::snooze_reminder_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/user/{owner_id}/reminders",
        web::post().to(create_reminder_admin_controller),
    );
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/complete",
        web::post().to(complete_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/reopen",
        web::post().to(reopen_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/snooze",
        web::post().to(snooze_reminder_controller),
    );
}

/// Reminders of other users are treated as missing
async fn find_owned_reminder(
    ctx: &BeaconContext,
    reminder_id: &ID,
    owner_id: &ID,
) -> Option<Reminder> {
    match ctx.repos.reminders.find(reminder_id).await {
        Some(reminder) if reminder.owner_id == *owner_id => Some(reminder),
        _ => None,
    }
}
