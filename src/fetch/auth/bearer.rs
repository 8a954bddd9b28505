use crate::fetch::client::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};

/// An [`HttpClient`] wrapper that sends `Authorization: Bearer <token>` on every request.
pub struct Bearer<C> {
    pub inner: C,
    token: String,
}

impl<C> Bearer<C> {
    pub fn new(inner: C, token: impl Into<String>) -> Self {
        Self {
            inner,
            token: token.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for Bearer<C> {
    async fn execute(&self, mut req: reqwest::Request) -> Result<reqwest::Response> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))?;
        value.set_sensitive(true);
        req.headers_mut().insert(AUTHORIZATION, value);
        self.inner.execute(req).await
    }
}
