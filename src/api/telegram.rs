//! Telegram Bot API client
//!
//! Thin wire layer over `getUpdates`, `sendMessage` and `sendDocument`.
//! Every failure is converted into a typed transport error; nothing here
//! knows about sessions or exam semantics.

use std::path::Path;
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult, FileError, TransportError};
use crate::models::{ApiResponse, Update};

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(config: &Config) -> Self {
        // client timeout must outlive the long-poll window
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs + 10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: format!(
                "{}/bot{}",
                config.api_base_url.trim_end_matches('/'),
                config.bot_token
            ),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Long-poll for updates after `offset`
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> AppResult<Vec<Update>> {
        let response = self
            .http
            .get(self.endpoint("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::request_failed("getUpdates", e))?;

        let body: ApiResponse<Vec<Update>> = response
            .json()
            .await
            .map_err(|e| AppError::request_failed("getUpdates", e))?;

        if !body.ok {
            return Err(TransportError::BadResponse {
                endpoint: "getUpdates".to_string(),
                description: body.description,
            }
            .into());
        }

        let updates = body.result.unwrap_or_default();
        if !updates.is_empty() {
            debug!("📥 received {} updates", updates.len());
        }
        Ok(updates)
    }

    /// Send a plain text message
    pub async fn send_message(&self, chat_id: i64, text: &str) -> AppResult<()> {
        let payload = json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self
            .http
            .post(self.endpoint("sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::request_failed("sendMessage", e))?;

        Self::check(response, "sendMessage").await
    }

    /// Upload a document with a caption
    pub async fn send_document(
        &self,
        chat_id: i64,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> AppResult<()> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::File(FileError::ReadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| AppError::request_failed("sendDocument", e))?;
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("document", part);

        let response = self
            .http
            .post(self.endpoint("sendDocument"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::request_failed("sendDocument", e))?;

        Self::check(response, "sendDocument").await
    }

    /// Decode the envelope and reject ok=false answers
    async fn check(response: reqwest::Response, endpoint: &str) -> AppResult<()> {
        let body: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        if body.ok {
            Ok(())
        } else {
            Err(TransportError::BadResponse {
                endpoint: endpoint.to_string(),
                description: body.description,
            }
            .into())
        }
    }
}
