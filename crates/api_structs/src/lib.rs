mod notification;
mod preference;
mod push_subscription;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::notification::dtos::*;
    pub use crate::preference::dtos::*;
    pub use crate::push_subscription::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::notification::api::*;
pub use crate::preference::api::*;
pub use crate::push_subscription::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
