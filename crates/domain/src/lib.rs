mod notification;
mod preference;
mod push;
mod reminder;
mod shared;

pub use notification::{Notification, NotificationType, Priority, TypeDisplay};
pub use preference::{
    Category, CategoryPreference, CategoryPreferencePatch, Channel, ChannelToggles,
    ChannelTogglesPatch, PreferencePatch, PreferenceRecord,
};
pub use push::{
    InvalidEndpointError, PushPayload, PushPayloadData, PushSubscription, DEFAULT_BADGE,
    DEFAULT_ICON,
};
pub use reminder::{Reminder, ReminderStatus, RepeatType, SnoozeError, SnoozePreset};
pub use shared::entity::{Entity, Owned, ID};
