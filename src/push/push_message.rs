use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use crate::constants::*;

#[derive(Debug, Serialize)]
struct PushMessageNotification {
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushMessage {
    token: String,
    notification: PushMessageNotification,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushPayload {
    message: PushMessage,
}

impl PushPayload {
    fn new(title: &str, body: &str, device: &str) -> Self {
        let notification = PushMessageNotification {
            title: title.to_string(),
            body: body.to_string(),
        };
        let message = PushMessage {
            token: device.to_string(),
            notification,
        };
        Self { message }
    }
}

/// Delivers one notification to one device token through the FCM v1 endpoint.
/// Returns whether FCM accepted the message.
pub async fn send_push_message(
    client: &reqwest::Client,
    access_token: &str,
    title: &str,
    body: &str,
    device: &str,
) -> anyhow::Result<bool> {
    let bearer_token = format!("Bearer {}", access_token);
    let payload = PushPayload::new(title, body, device);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer_token.as_str().parse()?);
    headers.insert(CONTENT_TYPE, "application/json".parse()?);
    let res = client
        .post(FCM_ENDPOINT)
        .headers(headers)
        .json(&payload)
        .send()
        .await?;
    Ok(res.status().is_success())
}
