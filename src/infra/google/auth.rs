use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing::debug;
use yup_oauth2::{ServiceAccountAuthenticator, read_service_account_key};

/// Read-only access to sheet values and to Drive metadata for the name lookup.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

/// Exchanges the service-account key at `credentials_path` for an access token.
#[tracing::instrument(fields(credentials = %credentials_path.display()))]
pub async fn service_account_token(credentials_path: &Path) -> Result<String> {
    let key = read_service_account_key(credentials_path)
        .await
        .with_context(|| {
            format!(
                "Failed to read service account key from {}",
                credentials_path.display()
            )
        })?;
    debug!(client_email = %key.client_email, "Service account key loaded");

    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .context("Failed to build service account authenticator")?;

    let token = auth
        .token(SCOPES)
        .await
        .context("Service account token request failed")?;

    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Token response did not contain an access token"))
}
