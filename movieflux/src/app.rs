//! Store assembly
//!
//! The application store runs two middleware, in order: the action logger,
//! then the async stage. Async fetches are therefore logged once when
//! dispatched, and the plain actions they produce are logged again when
//! they come back through the pipeline.

use movieflux_core::{
    ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware, AsyncMiddleware, Dispatcher,
    Store, StoreRuntime,
};

use crate::actions::AppAction;
use crate::reducers::app_reducer;
use crate::state::AppState;

/// Comma-separated globs of action names to log
pub const LOG_INCLUDE_ENV: &str = "MOVIEFLUX_LOG_INCLUDE";
/// Comma-separated globs of action names never to log
pub const LOG_EXCLUDE_ENV: &str = "MOVIEFLUX_LOG_EXCLUDE";

pub type AppStore = Store<AppState, AppAction>;
pub type AppRuntime = StoreRuntime<AppState, AppAction>;
pub type AppDispatcher = Dispatcher<AppState, AppAction>;

/// Store over `state` with `logger` ahead of the async stage
pub fn build_store(state: AppState, logger: ActionLoggerMiddleware) -> AppStore {
    Store::builder(state, app_reducer)
        .middleware(logger)
        .middleware(AsyncMiddleware)
        .build()
}

/// Empty store logging every action
pub fn default_store() -> AppStore {
    build_store(AppState::default(), ActionLoggerMiddleware::log_all())
}

/// Runtime over an empty store, logging per [`logger_config_from_env`]
pub fn runtime_from_env() -> AppRuntime {
    let logger = ActionLoggerMiddleware::new(logger_config_from_env());
    StoreRuntime::new(build_store(AppState::default(), logger))
}

/// Runtime whose logger also keeps the last `capacity` entries in memory
pub fn runtime_with_log(state: AppState, capacity: usize) -> AppRuntime {
    let logger = ActionLoggerMiddleware::with_log(ActionLogConfig::new(
        capacity,
        logger_config_from_env(),
    ));
    StoreRuntime::new(build_store(state, logger))
}

/// Logger filter from `MOVIEFLUX_LOG_INCLUDE` / `MOVIEFLUX_LOG_EXCLUDE`
pub fn logger_config_from_env() -> ActionLoggerConfig {
    let include = std::env::var(LOG_INCLUDE_ENV).ok();
    let exclude = std::env::var(LOG_EXCLUDE_ENV).ok();
    ActionLoggerConfig::new(include.as_deref(), exclude.as_deref())
}
