//! Async fetch actions
//!
//! Every catalog request is a small [`FetchRequest`] value: which endpoint,
//! which parameters, and which plain actions to dispatch with the decoded
//! payload. [`Fetch`] pairs a request with the injected [`Environment`] and
//! runs it as an [`AsyncAction`].
//!
//! A failed request is logged and dispatches nothing.
//!
//! ```ignore
//! let env = Arc::new(Environment::from_env());
//! runtime.enqueue(env.fetch(movies::MenuList::new(MoviesMenu::Popular, 1)));
//! ```

pub mod movies;
pub mod people;

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use movieflux_core::{AsyncAction, Dispatchable, Dispatcher};
use serde::de::DeserializeOwned;

use crate::actions::AppAction;
use crate::api::{ApiClient, Endpoint, QueryParams};
use crate::config::{ApiConfig, Preferences};
use crate::state::AppState;

/// Collaborators shared by every fetch action
#[derive(Debug, Clone)]
pub struct Environment {
    pub api: ApiClient,
    pub preferences: Preferences,
}

impl Environment {
    pub fn new(api: ApiClient, preferences: Preferences) -> Self {
        Self { api, preferences }
    }

    /// Preferences and API key from the process environment, `reqwest`
    /// transport, default base URL.
    pub fn from_env() -> Self {
        let preferences = Preferences::from_env();
        let config = ApiConfig::default().with_preferences(&preferences);
        Self::new(ApiClient::from_env(config), preferences)
    }

    /// Bind `request` to this environment
    pub fn fetch<R: FetchRequest>(self: &Arc<Self>, request: R) -> Fetch<R> {
        Fetch::new(Arc::clone(self), request)
    }
}

/// One catalog request and what to dispatch with its response
pub trait FetchRequest: Clone + fmt::Debug + Send + Sync + 'static {
    /// Decoded payload
    type Response: DeserializeOwned + Send + 'static;

    /// Action name used for logging and filtering
    const NAME: &'static str;

    fn endpoint(&self) -> Endpoint;

    /// Request parameters on top of `api_key` and `language`
    fn params(&self, _preferences: &Preferences) -> QueryParams {
        QueryParams::new()
    }

    /// Plain actions to dispatch, in order
    fn into_actions(self, response: Self::Response) -> Vec<AppAction>;
}

/// A [`FetchRequest`] bound to an [`Environment`]
#[derive(Debug, Clone)]
pub struct Fetch<R> {
    env: Arc<Environment>,
    request: R,
}

impl<R: FetchRequest> Fetch<R> {
    pub fn new(env: Arc<Environment>, request: R) -> Self {
        Self { env, request }
    }

    pub fn request(&self) -> &R {
        &self.request
    }
}

impl<R: FetchRequest> AsyncAction<AppState, AppAction> for Fetch<R> {
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn execute(
        &self,
        _state: Option<Arc<AppState>>,
        dispatch: Dispatcher<AppState, AppAction>,
    ) -> BoxFuture<'static, ()> {
        let env = Arc::clone(&self.env);
        let request = self.request.clone();

        async move {
            let endpoint = request.endpoint();
            let params = request.params(&env.preferences);

            match env.api.get::<R::Response>(&endpoint, params).await {
                Ok(response) => {
                    for action in request.into_actions(response) {
                        dispatch.dispatch(action);
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        action = R::NAME,
                        endpoint = %endpoint.path(),
                        %error,
                        "fetch failed"
                    );
                }
            }
        }
        .boxed()
    }
}

impl<R: FetchRequest> From<Fetch<R>> for Dispatchable<AppState, AppAction> {
    fn from(fetch: Fetch<R>) -> Self {
        Dispatchable::from_async(fetch)
    }
}

fn page_params(page: u32) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("page".into(), page.to_string());
    params
}
