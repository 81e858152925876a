//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe an event that already happened or a state change the
/// caller wants. They should be:
/// - Clone: Actions may be logged, replayed, or inspected by several middleware
/// - Debug: For debugging and logging
/// - Send + 'static: Async actions dispatch them from worker threads
///
/// Use `#[derive(Action)]` from `movieflux-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;

    /// Domain the action belongs to, used by root reducers for routing.
    ///
    /// `None` means the action has no owning slice.
    fn category(&self) -> Option<&'static str> {
        None
    }
}

/// Short human readable form of an action for the action log.
///
/// The default is the `Debug` output. Override it for actions carrying
/// large payloads (paginated responses, entity lists).
pub trait ActionSummary: Action {
    /// One-line summary of this action
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
