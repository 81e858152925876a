use async_trait::async_trait;
use reqwest::Url;

use super::ApiError;

/// Transport used by [`ApiClient`](super::ApiClient) to fetch a URL.
///
/// Returns the raw response body. Implementations map an empty body to
/// [`ApiError::NoResponse`] and every transport or status failure to
/// [`ApiError::Transport`].
#[async_trait]
pub trait HttpSession: Send + Sync {
    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError>;
}

/// [`HttpSession`] backed by a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestSession {
    client: reqwest::Client,
}

impl ReqwestSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Request URLs carry the API key, so they never reach error text.
fn transport_error(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.without_url().to_string())
}

#[async_trait]
impl HttpSession for ReqwestSession {
    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport_error)?;

        let body = response
            .bytes()
            .await
            .map_err(transport_error)?;

        if body.is_empty() {
            return Err(ApiError::NoResponse);
        }
        Ok(body.to_vec())
    }
}
