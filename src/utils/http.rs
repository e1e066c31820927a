// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and return its markup.
///
/// Failing to get any response at all is reported as
/// [`AppError::Connection`]; an error status from the server is a plain
/// HTTP error.
pub async fn fetch_markup(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::connection(url, e))?;

    let text = response.error_for_status()?.text().await?;
    log::debug!("Fetched {} bytes from {}", text.len(), url);
    Ok(text)
}
