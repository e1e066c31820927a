// src/services/telegram.rs

//! Telegram Bot API delivery.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::pipeline::Pictogram;
use crate::utils::escape_html;

/// A chat endpoint that notifications can be posted to.
#[async_trait]
pub trait ChatSender: Send + Sync {
    /// Post one message to the configured chat.
    async fn send(&self, message: &str) -> Result<()>;
}

/// Reply envelope of the Bot API.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages through `sendMessage` with HTML parse mode.
pub struct TelegramClient {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramClient {
    /// Create a client for the given bot token and chat.
    pub fn new(client: reqwest::Client, api_base: &str, token: &str, chat_id: &str) -> Self {
        Self {
            client,
            endpoint: Self::endpoint(api_base, token),
            chat_id: chat_id.to_string(),
        }
    }

    fn endpoint(api_base: &str, token: &str) -> String {
        format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token)
    }
}

/// Escape a notification for HTML parse mode and bold the message line
/// that follows each report header.
fn to_html(message: &str) -> String {
    let mut html = String::with_capacity(message.len());
    let mut after_header = false;

    for line in message.lines() {
        let escaped = escape_html(line);
        if after_header && !line.trim().is_empty() {
            html.push_str("<strong>");
            html.push_str(&escaped);
            html.push_str("</strong>");
        } else {
            html.push_str(&escaped);
        }
        html.push('\n');
        after_header = Pictogram::tags(line);
    }

    html
}

#[async_trait]
impl ChatSender for TelegramClient {
    async fn send(&self, message: &str) -> Result<()> {
        let text = to_html(message);
        let form = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text.as_str()),
            ("parse_mode", "HTML"),
        ];

        let body = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await?
            .text()
            .await?;

        let reply: ApiResponse = serde_json::from_str(&body)?;
        if !reply.ok {
            return Err(AppError::delivery(
                reply
                    .description
                    .unwrap_or_else(|| "Telegram rejected the message".to_string()),
            ));
        }

        log::debug!("Delivered {} bytes to chat {}", text.len(), self.chat_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        assert_eq!(
            TelegramClient::endpoint("https://api.telegram.org/", "123:abc"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_to_html_bolds_message_lines() {
        let message = "\u{1F691} Sun 18 October 2026, 14:03:00 - Ambulance\n\
                       A1 Rit <12345> & co\n\
                       13-101\n\
                       \u{1F693} Sun 18 October 2026, 14:01:00 - Politie\n\
                       P 1 Dam\n";

        assert_eq!(
            to_html(message),
            "\u{1F691} Sun 18 October 2026, 14:03:00 - Ambulance\n\
             <strong>A1 Rit &lt;12345&gt; &amp; co</strong>\n\
             13-101\n\
             \u{1F693} Sun 18 October 2026, 14:01:00 - Politie\n\
             <strong>P 1 Dam</strong>\n"
        );
    }

    #[test]
    fn test_to_html_leaves_untagged_lines_plain() {
        assert_eq!(to_html("Ambulance 13-101\nA1 Dam\n"), "Ambulance 13-101\nA1 Dam\n");
    }

    #[test]
    fn test_api_response_parsing() {
        let ok: ApiResponse = serde_json::from_str(r#"{"ok":true,"result":{}}"#).unwrap();
        assert!(ok.ok);

        let rejected: ApiResponse = serde_json::from_str(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap();
        assert!(!rejected.ok);
        assert_eq!(
            rejected.description.as_deref(),
            Some("Bad Request: chat not found")
        );
    }
}
