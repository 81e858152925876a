//! In-memory [`HttpSession`] for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Url;

use super::{ApiError, HttpSession};

/// What a [`MockSession`] answers with
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    Body(Vec<u8>),
    NoResponse,
    Transport(String),
}

impl MockReply {
    pub fn json(body: impl Into<String>) -> Self {
        MockReply::Body(body.into().into_bytes())
    }
}

#[derive(Debug, Default)]
struct MockInner {
    reply: Option<MockReply>,
    routes: HashMap<String, MockReply>,
    requests: Vec<Url>,
}

/// Session that records requested URLs and answers with canned replies.
///
/// Routes match when the request path ends with the route's endpoint path.
/// Unrouted requests get the default reply, or [`MockReply::NoResponse`]
/// when none is set.
#[derive(Debug, Default)]
pub struct MockSession {
    inner: Mutex<MockInner>,
}

impl MockSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session answering every request with `reply`
    pub fn replying(reply: MockReply) -> Self {
        let session = Self::default();
        session.set_reply(reply);
        session
    }

    /// Answer requests to `path` with `reply`
    pub fn route(self, path: impl Into<String>, reply: MockReply) -> Self {
        self.lock().routes.insert(path.into(), reply);
        self
    }

    pub fn set_reply(&self, reply: MockReply) {
        self.lock().reply = Some(reply);
    }

    /// Number of requests seen
    pub fn calls(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn requests(&self) -> Vec<Url> {
        self.lock().requests.clone()
    }

    pub fn last_url(&self) -> Option<Url> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl HttpSession for MockSession {
    async fn get(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        let reply = {
            let mut inner = self.lock();
            inner.requests.push(url.clone());
            inner
                .routes
                .iter()
                .find(|(path, _)| url.path().ends_with(&format!("/{}", path)))
                .map(|(_, reply)| reply.clone())
                .or_else(|| inner.reply.clone())
                .unwrap_or(MockReply::NoResponse)
        };

        match reply {
            MockReply::Body(body) if body.is_empty() => Err(ApiError::NoResponse),
            MockReply::Body(body) => Ok(body),
            MockReply::NoResponse => Err(ApiError::NoResponse),
            MockReply::Transport(message) => Err(ApiError::Transport(message)),
        }
    }
}
