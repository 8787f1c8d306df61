//! Telegram Bot API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::Notifier;
use super::error::NotifyError;
use crate::config::TelegramConfig;

/// Upper bound on a single delivery attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram client posting HTML messages to a single chat.
#[derive(Clone)]
pub struct TelegramClient {
    /// HTTP client.
    client: Client,
    /// Bot token, part of the request path.
    bot_token: SecretString,
    /// Target chat ID.
    chat_id: String,
    /// Bot API base URL without trailing slash.
    api_base: String,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a new Telegram client.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Config` if the HTTP client cannot be built.
    pub fn new(config: &TelegramConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifyError::Config(e.to_string()))?;

        Ok(Self {
            client,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Target chat ID.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Post an HTML formatted message to the configured chat.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Telegram returns `ok: false`.
    #[instrument(skip(self, text), fields(chat_id = %self.chat_id))]
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(format!(
                "{}/bot{}/sendMessage",
                self.api_base,
                self.bot_token.expose_secret()
            ))
            .json(&body)
            .send()
            .await
            // reqwest errors include the URL, which carries the token
            .map_err(|e| NotifyError::Request(e.without_url().to_string()))?;

        let status = response.status();
        let result: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Response(format!("HTTP {status}: {}", e.without_url())))?;

        if !result.ok {
            error!(
                status = %status,
                error = ?result.description,
                "Telegram API error sending message"
            );
            return Err(NotifyError::Api(
                result
                    .description
                    .unwrap_or_else(|| format!("HTTP {status}")),
            ));
        }

        debug!("Message sent to Telegram");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.send_message(message).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> TelegramClient {
        let config = TelegramConfig {
            bot_token: SecretString::from("123:test-token"),
            chat_id: "-1001".to_string(),
            api_base: server.base_url(),
        };
        let Ok(client) = TelegramClient::new(&config) else {
            panic!("client should build");
        };
        client
    }

    #[tokio::test]
    async fn test_send_message_posts_html_to_chat() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/bot123:test-token/sendMessage")
                    .json_body(json!({
                        "chat_id": "-1001",
                        "text": "<b>hi</b>",
                        "parse_mode": "HTML"
                    }));
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({"ok": true, "result": {"message_id": 1}}));
            })
            .await;

        let result = client_for(&server).send_message("<b>hi</b>").await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(400)
                    .header("Content-Type", "application/json")
                    .json_body(json!({
                        "ok": false,
                        "error_code": 400,
                        "description": "Bad Request: chat not found"
                    }));
            })
            .await;

        let result = client_for(&server).send_message("hello").await;

        assert!(
            matches!(result, Err(NotifyError::Api(ref msg)) if msg.contains("chat not found"))
        );
    }

    #[tokio::test]
    async fn test_non_json_response_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(502).body("bad gateway");
            })
            .await;

        let result = client_for(&server).send_message("hello").await;

        assert!(matches!(result, Err(NotifyError::Response(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TelegramConfig {
            bot_token: SecretString::from("123:very-secret"),
            chat_id: "-1001".to_string(),
            api_base: "https://api.telegram.org/".to_string(),
        };
        let Ok(client) = TelegramClient::new(&config) else {
            panic!("client should build");
        };

        let debug_output = format!("{client:?}");
        assert!(!debug_output.contains("very-secret"));
        assert!(debug_output.contains("https://api.telegram.org\""));
    }
}
