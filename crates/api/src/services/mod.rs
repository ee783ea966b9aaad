pub mod notification_hub;

pub use notification_hub::{HubEvent, NotificationHub, Subscription, Topic};
