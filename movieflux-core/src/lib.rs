//! Core traits and types for movieflux
//!
//! This crate provides a unidirectional state container: a single [`Store`]
//! holds an immutable application state, every change goes through a
//! dispatched action and a pure [`Reducer`], and a [`Middleware`] chain sees
//! each dispatch before it is reduced.
//!
//! # Core Concepts
//!
//! - **Action**: Plain values describing a state change
//! - **AsyncAction**: Work performed off the owning context that dispatches
//!   follow-up actions when it completes
//! - **Store**: Centralized state container with reducer pattern
//! - **Middleware**: Interceptors forwarding each dispatch exactly once
//! - **Dispatcher**: `Send` handle routing dispatches back onto the store
//!
//! # Basic Example
//!
//! ```ignore
//! use movieflux_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum MyAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     counter: i32,
//! }
//!
//! fn reducer(state: &AppState, action: &MyAction) -> AppState {
//!     match action {
//!         MyAction::Increment => AppState { counter: state.counter + 1 },
//!         MyAction::Decrement => AppState { counter: state.counter - 1 },
//!     }
//! }
//!
//! let mut store = Store::builder(AppState::default(), reducer)
//!     .middleware(ActionLoggerMiddleware::log_all())
//!     .middleware(AsyncMiddleware)
//!     .build();
//! store.dispatch(MyAction::Increment)?;
//! ```
//!
//! # Async Actions
//!
//! An [`AsyncAction`] is dispatched like a plain action. The async stage
//! executes it with a state snapshot and a [`Dispatcher`]; whatever it
//! dispatches later re-enters the full pipeline. Reducers never see async
//! actions.
//!
//! ```ignore
//! let mut runtime = StoreRuntime::new(store);
//! runtime.enqueue(env.fetch(movies::Genres));
//! runtime.run().await;
//! ```

pub mod action;
pub mod dispatch;
pub mod logger;
pub mod middleware;
pub mod runtime;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionSummary};

// Dispatch exports
pub use dispatch::{AsyncAction, Dispatchable, Dispatcher, StateReader};

// Store exports
pub use middleware::{AsyncMiddleware, Middleware, MiddlewareApi, Next, NoopMiddleware};
pub use store::{
    DispatchError, Listener, Reducer, Store, StoreBuilder, Subscription, SubscriptionId,
};

// Logging exports
pub use logger::{
    ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig, ActionLoggerMiddleware,
    DispatchOutcome, SharedActionLog,
};

pub use runtime::StoreRuntime;

// Testing exports
pub use testing::TestHarness;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::dispatch::{AsyncAction, Dispatchable, Dispatcher, StateReader};
    pub use crate::logger::{ActionLoggerConfig, ActionLoggerMiddleware};
    pub use crate::middleware::{AsyncMiddleware, Middleware, MiddlewareApi, Next};
    pub use crate::runtime::StoreRuntime;
    pub use crate::store::{DispatchError, Reducer, Store, Subscription};
}
