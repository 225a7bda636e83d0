use super::{google_auth_token::GoogleAuthToken, push_message::send_push_message};

#[cfg(test)]
use mockall::automock;

/// Aggregate result of one multicast send, per-token failures are
/// counted here and never escalated by the client itself
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MulticastOutcome {
    pub success_count: u32,
    pub failure_count: u32,
}

pub struct PushClient {
    client: reqwest::Client,
    google_auth_token: GoogleAuthToken,
}

#[cfg_attr(test, automock)]
impl PushClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            google_auth_token: GoogleAuthToken::default(),
        }
    }

    /// Sends one notification body to every device token of a user and
    /// returns the per-token success/failure counts. An `Err` means the
    /// send as a whole could not be attempted (e.g. no access token).
    pub async fn send_multicast(
        &mut self,
        user_id: &str,
        tokens: &[String],
        title: &str,
        body: &str,
    ) -> anyhow::Result<MulticastOutcome> {
        let access_token = self.google_auth_token.get_access_token().await?.to_owned();
        let mut outcome = MulticastOutcome::default();
        for device in tokens {
            match send_push_message(&self.client, &access_token, title, body, device).await {
                Ok(true) => outcome.success_count += 1,
                Ok(false) => outcome.failure_count += 1,
                Err(err) => {
                    tracing::debug!("push send failed for user {}: {:?}", user_id, err);
                    outcome.failure_count += 1;
                }
            }
        }
        Ok(outcome)
    }
}
