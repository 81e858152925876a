//! Catalog HTTP client
//!
//! [`ApiClient::get`] builds the request URL from an [`Endpoint`], the API
//! key and the configured language, fetches it through an injected
//! [`HttpSession`] and decodes the JSON body.

mod endpoint;
mod keys;
mod session;
pub mod testing;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use endpoint::Endpoint;
pub use keys::{
    normalize_api_key, ApiKeyProvider, EnvApiKeyProvider, StaticApiKeyProvider, API_KEY_ENV,
};
pub use session::{HttpSession, ReqwestSession};

use crate::config::ApiConfig;

/// Query parameters, in a stable order
pub type QueryParams = BTreeMap<String, String>;

/// Errors from a catalog request
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing catalog API key (set {})", API_KEY_ENV)]
    MissingApiKey,

    #[error("empty response")]
    NoResponse,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Catalog client
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    session: Arc<dyn HttpSession>,
    keys: Arc<dyn ApiKeyProvider>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        session: Arc<dyn HttpSession>,
        keys: Arc<dyn ApiKeyProvider>,
    ) -> Self {
        Self {
            config,
            session,
            keys,
        }
    }

    /// Client over `reqwest`, keyed from the environment
    pub fn from_env(config: ApiConfig) -> Self {
        Self::new(
            config,
            Arc::new(ReqwestSession::new()),
            Arc::new(EnvApiKeyProvider),
        )
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Full request URL for `endpoint`.
    ///
    /// `api_key` and `language` come first; entries of `params` with the
    /// same name replace them.
    pub fn url(&self, endpoint: &Endpoint, params: QueryParams) -> Result<Url, ApiError> {
        let key = self.keys.api_key().ok_or(ApiError::MissingApiKey)?;

        let mut query = QueryParams::new();
        query.insert("api_key".into(), key);
        query.insert("language".into(), self.config.language.clone());
        query.extend(params);

        let base = self.config.base_url.trim_end_matches('/');
        let url = format!("{}/{}", base, endpoint.path());
        Url::parse_with_params(&url, &query).map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// Fetch and decode `endpoint`.
    ///
    /// Without an API key this fails with [`ApiError::MissingApiKey`] before
    /// touching the session.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: QueryParams,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint, params)?;
        tracing::debug!(endpoint = %endpoint.path(), "GET");

        let body = self.session.get(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Build [`QueryParams`] from string pairs
pub fn params<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::testing::{MockReply, MockSession};
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: String,
    }

    fn client(key: Option<&str>, session: Arc<MockSession>) -> ApiClient {
        let keys = match key {
            Some(key) => StaticApiKeyProvider::new(key),
            None => StaticApiKeyProvider::missing(),
        };
        ApiClient::new(ApiConfig::default(), session, Arc::new(keys))
    }

    fn query(url: &Url) -> QueryParams {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_session() {
        let session = Arc::new(MockSession::replying(MockReply::json(r#"{"value":"ok"}"#)));
        let client = client(None, session.clone());

        let result: Result<Payload, _> = client.get(&Endpoint::Popular, QueryParams::new()).await;

        assert!(matches!(result, Err(ApiError::MissingApiKey)));
        assert_eq!(session.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_builds_url_and_decodes() {
        let session = Arc::new(MockSession::replying(MockReply::json(r#"{"value":"ok"}"#)));
        let client = client(Some("abc123"), session.clone());

        let payload: Payload = client
            .get(
                &Endpoint::SearchMovie,
                params([("page", "2"), ("query", "batman")]),
            )
            .await
            .unwrap();

        assert_eq!(payload.value, "ok");
        assert_eq!(session.calls(), 1);

        let url = session.last_url().unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        let query = query(&url);
        assert_eq!(query["api_key"], "abc123");
        assert_eq!(query["language"], "en-US");
        assert_eq!(query["page"], "2");
        assert_eq!(query["query"], "batman");
    }

    #[tokio::test]
    async fn test_request_params_override_defaults() {
        let session = Arc::new(MockSession::replying(MockReply::json(r#"{"value":"ok"}"#)));
        let client = client(Some("abc123"), session.clone());

        let _: Payload = client
            .get(&Endpoint::Discover, params([("language", "fr-FR")]))
            .await
            .unwrap();

        let url = session.last_url().unwrap();
        assert_eq!(query(&url)["language"], "fr-FR");
        assert_eq!(url.query_pairs().filter(|(k, _)| k == "language").count(), 1);
    }

    #[tokio::test]
    async fn test_session_failures_surface() {
        let session = Arc::new(MockSession::replying(MockReply::NoResponse));
        let client = client(Some("abc123"), session.clone());
        let result: Result<Payload, _> = client.get(&Endpoint::Popular, QueryParams::new()).await;
        assert!(matches!(result, Err(ApiError::NoResponse)));

        session.set_reply(MockReply::Transport("connection reset".into()));
        let result: Result<Payload, _> = client.get(&Endpoint::Popular, QueryParams::new()).await;
        assert!(matches!(result, Err(ApiError::Transport(message)) if message == "connection reset"));

        session.set_reply(MockReply::json("not-json"));
        let result: Result<Payload, _> = client.get(&Endpoint::Popular, QueryParams::new()).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let session = Arc::new(MockSession::default());
        let keys = Arc::new(StaticApiKeyProvider::new("abc123"));
        let client = ApiClient::new(ApiConfig::new("not a url"), session, keys);

        assert!(matches!(
            client.url(&Endpoint::Genres, QueryParams::new()),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
