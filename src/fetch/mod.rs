mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, anyhow};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

/// GETs `url` and decodes the JSON body. Non-2xx responses are errors carrying the
/// status and body text.
pub async fn fetch_json<C, T>(client: &C, url: Url) -> Result<T>
where
    C: HttpClient,
    T: DeserializeOwned,
{
    debug!(url = %url, "GET");
    let req = reqwest::Request::new(reqwest::Method::GET, url);
    let response = client.execute(req).await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("API returned status {}: {}", status, body));
    }

    response
        .json()
        .await
        .map_err(|e| anyhow!("Failed to parse response: {}", e))
}
