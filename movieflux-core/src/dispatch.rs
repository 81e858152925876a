//! Dispatch handles, async actions and state readers
//!
//! Everything that crosses the boundary between the store's owning context
//! and other threads lives here:
//!
//! - [`Dispatchable`] is what enters the pipeline: a plain action or an async one
//! - [`AsyncAction`] performs out-of-process work and dispatches follow-ups
//! - [`Dispatcher`] is a cloneable, `Send` handle that queues dispatches back
//!   onto the owning context
//! - [`StateReader`] hands out immutable snapshots of the committed state
//!
//! # Example
//!
//! ```ignore
//! use movieflux_core::{AsyncAction, Dispatcher};
//!
//! #[derive(Debug)]
//! struct FetchCount;
//!
//! impl AsyncAction<AppState, AppAction> for FetchCount {
//!     fn name(&self) -> &'static str {
//!         "FetchCount"
//!     }
//!
//!     fn execute(
//!         &self,
//!         _state: Option<Arc<AppState>>,
//!         dispatch: Dispatcher<AppState, AppAction>,
//!     ) -> BoxFuture<'static, ()> {
//!         async move {
//!             if let Ok(count) = api::count().await {
//!                 dispatch.dispatch(AppAction::SetCount(count));
//!             }
//!         }
//!         .boxed()
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{mpsc, watch};

use crate::action::Action;

/// An action that is executed instead of reduced.
///
/// `execute` receives a snapshot of the state at dispatch time (absent when
/// the caller has none) and a [`Dispatcher`] whose dispatches re-enter the
/// whole pipeline, middleware included. The returned future runs off the
/// owning context; it may dispatch zero or more plain actions when its work
/// completes. Failures are expected to dispatch nothing.
pub trait AsyncAction<S, A>: fmt::Debug + Send + Sync + 'static {
    /// Name used for logging and filtering
    fn name(&self) -> &'static str;

    /// Start the work. Nothing happens until the future is polled.
    fn execute(&self, state: Option<Arc<S>>, dispatch: Dispatcher<S, A>) -> BoxFuture<'static, ()>;
}

/// A value accepted by [`Store::dispatch`](crate::Store::dispatch).
pub enum Dispatchable<S, A> {
    /// Reduced synchronously by the root reducer
    Plain(A),
    /// Executed by the async stage, never seen by reducers
    Async(Arc<dyn AsyncAction<S, A>>),
}

impl<S, A> Dispatchable<S, A> {
    /// Wrap an async action.
    pub fn from_async(action: impl AsyncAction<S, A>) -> Self {
        Self::Async(Arc::new(action))
    }

    /// Whether this is an async action
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// The plain action, if any
    pub fn as_plain(&self) -> Option<&A> {
        match self {
            Self::Plain(action) => Some(action),
            Self::Async(_) => None,
        }
    }

    /// Consume into the plain action, if any
    pub fn into_plain(self) -> Option<A> {
        match self {
            Self::Plain(action) => Some(action),
            Self::Async(_) => None,
        }
    }
}

impl<S: 'static, A: Action> Dispatchable<S, A> {
    /// Name of the wrapped action
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain(action) => action.name(),
            Self::Async(action) => action.name(),
        }
    }

    /// Category of the wrapped action. Async actions have none.
    pub fn category(&self) -> Option<&'static str> {
        match self {
            Self::Plain(action) => action.category(),
            Self::Async(_) => None,
        }
    }
}

impl<S, A: Clone> Clone for Dispatchable<S, A> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(action) => Self::Plain(action.clone()),
            Self::Async(action) => Self::Async(Arc::clone(action)),
        }
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Dispatchable<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(action) => f.debug_tuple("Plain").field(action).finish(),
            Self::Async(action) => f.debug_tuple("Async").field(action).finish(),
        }
    }
}

impl<S, A: Action> From<A> for Dispatchable<S, A> {
    fn from(action: A) -> Self {
        Self::Plain(action)
    }
}

/// Cloneable handle that queues dispatches for the store's owning context.
///
/// Sending never blocks and never touches state directly: the store drains
/// the queue (see [`Store::process_pending`](crate::Store::process_pending)
/// and [`StoreRuntime::run`](crate::StoreRuntime::run)) and feeds every entry
/// through the full middleware chain.
pub struct Dispatcher<S, A> {
    tx: mpsc::UnboundedSender<Dispatchable<S, A>>,
}

impl<S, A> Clone for Dispatcher<S, A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Dispatcher<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl<S, A> Dispatcher<S, A> {
    /// Create a dispatcher together with the receiving end of its queue.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Dispatchable<S, A>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue an action.
    ///
    /// Returns `false` if the store is gone; the action is dropped.
    pub fn dispatch(&self, action: impl Into<Dispatchable<S, A>>) -> bool {
        self.tx.send(action.into()).is_ok()
    }

    /// Whether the receiving store has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read-only access to the latest committed state from any thread.
pub struct StateReader<S> {
    rx: watch::Receiver<Arc<S>>,
}

impl<S> Clone for StateReader<S> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<S> fmt::Debug for StateReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateReader").finish_non_exhaustive()
    }
}

impl<S> StateReader<S> {
    pub(crate) fn new(rx: watch::Receiver<Arc<S>>) -> Self {
        Self { rx }
    }

    /// Snapshot of the latest committed state
    pub fn get(&self) -> Arc<S> {
        Arc::clone(&self.rx.borrow())
    }

    /// Wait until a newer state is committed.
    ///
    /// Returns `false` once the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
