mod base;
mod center;
mod notification;
mod preference;
mod push_subscription;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse, Session};
pub use center::{
    CenterView, NotificationCenter, DEFAULT_PAGE_LIMIT, DEFAULT_POLL_INTERVAL, MAX_PAGE_LIMIT,
};
use notification::NotificationClient;
pub use notification::CreateNotificationInput;
use preference::PreferenceClient;
use push_subscription::PushSubscriptionClient;
pub use push_subscription::AddPushSubscriptionInput;
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, SnoozeInput, UpdateReminderInput};
use status::StatusClient;
use std::sync::Arc;

pub use beacon_api_structs::dtos::*;
pub use beacon_domain::{
    CategoryPreferencePatch, Category, Channel, ChannelTogglesPatch, NotificationType,
    PreferencePatch, Priority, ReminderStatus, RepeatType, SnoozePreset, ID,
};

// Domain
pub use beacon_api_structs::dtos::NotificationDTO as Notification;
pub use beacon_api_structs::dtos::PreferencesDTO as Preferences;
pub use beacon_api_structs::dtos::PushSubscriptionDTO as PushSubscription;
pub use beacon_api_structs::dtos::ReminderDTO as Reminder;

/// Beacon SDK
///
/// The SDK contains methods for interacting with the Beacon server API.
#[derive(Clone)]
pub struct BeaconSDK {
    base: Arc<BaseClient>,
    pub notification: NotificationClient,
    pub preference: PreferenceClient,
    pub push_subscription: PushSubscriptionClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl BeaconSDK {
    /// Client acting as the user the session was issued for
    pub fn new(address: String, session: Session) -> Self {
        let base = BaseClient::new(address);
        base.set_session(Some(session));
        Self::from_base(base)
    }

    /// Client for the producing subsystems
    pub fn producer<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let notification = NotificationClient::new(base.clone());
        let preference = PreferenceClient::new(base.clone());
        let push_subscription = PushSubscriptionClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());

        Self {
            base,
            notification,
            preference,
            push_subscription,
            reminder,
            status,
        }
    }

    /// Replaces the session, for instance after it was refreshed
    pub fn set_session(&self, session: Session) {
        self.base.set_session(Some(session));
    }

    /// Every following call is sent without credentials
    pub fn logout(&self) {
        self.base.clear_session();
    }

    pub fn notification_center(&self) -> NotificationCenter {
        NotificationCenter::new(self.notification.clone())
    }
}
