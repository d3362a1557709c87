pub mod activate;
pub mod fetch;
pub mod install;
pub mod message;
pub mod notification_click;
pub mod push;
