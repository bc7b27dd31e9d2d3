use super::IPushGateway;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error};

const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Sends push messages through Expo's push gateway. Stateless: a failed
/// delivery is logged and dropped, there is no retry.
pub struct ExpoPushGateway {
    client: Client,
}

impl ExpoPushGateway {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .expect("To create reqwest client"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExpoPushMessage<'a> {
    to: &'a str,
    sound: &'a str,
    title: &'a str,
    body: &'a str,
    data: HashMap<String, String>,
    /// Required for custom Android notification channels
    #[serde(rename = "channelId")]
    channel_id: &'a str,
}

#[async_trait::async_trait]
impl IPushGateway for ExpoPushGateway {
    async fn send(&self, token: &str, title: &str, body: &str, data: HashMap<String, String>) {
        let message = ExpoPushMessage {
            to: token,
            sound: "default",
            title,
            body,
            data,
            channel_id: "default",
        };

        match self.client.post(EXPO_PUSH_URL).json(&message).send().await {
            Ok(res) if res.status().is_success() => {
                debug!("Successfully sent push notification via Expo");
            }
            Ok(res) => {
                let status = res.status();
                let text = res.text().await.unwrap_or_default();
                error!(
                    "Failed to send push notification. Expo server responded with {}: {}",
                    status, text
                );
            }
            Err(e) => {
                error!(
                    "An error occurred while requesting Expo's push service: {:?}",
                    e
                );
            }
        }
    }
}
