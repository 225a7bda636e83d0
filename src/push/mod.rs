pub mod client;
pub mod google_auth_token;
pub mod push_message;

pub use client::{MulticastOutcome, PushClient};
