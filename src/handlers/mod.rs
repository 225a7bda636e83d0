pub mod default;
pub mod global_404;
pub mod notification;
pub mod ping;
pub mod temp_api;

pub use default::default_route_handler;

pub use global_404::global_404_handler;

pub use notification::test_noti::test_notification_handler;

pub use ping::ping_handler;

pub use temp_api::temp_api_get_token;
