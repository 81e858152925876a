//! Test utilities for stores, reducers and async actions
//!
//! [`TestHarness`] stands in for a store when testing an async action in
//! isolation: it hands the action a state snapshot and a [`Dispatcher`], and
//! captures everything the action dispatches. The `assert_*` macros work on
//! any slice of actions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::dispatch::{AsyncAction, Dispatchable, Dispatcher};

/// Generic test harness for async actions.
///
/// Provides:
/// - An optional state snapshot passed to executed actions
/// - A dispatcher whose dispatches are captured instead of reduced
/// - Helpers for draining and waiting on captured actions
///
/// # Example
///
/// ```ignore
/// use movieflux_core::testing::TestHarness;
///
/// let mut harness = TestHarness::new(AppState::default());
///
/// harness.run(&env.fetch(movies::Genres)).await;
///
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, AppAction::Movies(MoviesAction::SetGenres { .. }));
/// ```
pub struct TestHarness<S, A> {
    /// Snapshot handed to executed async actions
    pub state: Option<Arc<S>>,
    dispatcher: Dispatcher<S, A>,
    rx: mpsc::UnboundedReceiver<Dispatchable<S, A>>,
}

impl<S: 'static, A: Action> TestHarness<S, A> {
    /// Create a harness with the given state snapshot.
    pub fn new(state: S) -> Self {
        Self::with_state(Some(Arc::new(state)))
    }

    /// Create a harness that runs actions without a state snapshot.
    pub fn stateless() -> Self {
        Self::with_state(None)
    }

    fn with_state(state: Option<Arc<S>>) -> Self {
        let (dispatcher, rx) = Dispatcher::channel();
        Self {
            state,
            dispatcher,
            rx,
        }
    }

    /// Clone of the capturing dispatcher.
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        self.dispatcher.clone()
    }

    /// Emit an action (simulates what an async action would do).
    pub fn emit(&self, action: impl Into<Dispatchable<S, A>>) {
        let _ = self.dispatcher.dispatch(action);
    }

    /// Execute an async action to completion against the harness.
    pub async fn run(&self, action: &dyn AsyncAction<S, A>) {
        action
            .execute(self.state.clone(), self.dispatcher.clone())
            .await;
    }

    /// Drain everything dispatched so far, async actions included.
    pub fn drain_dispatched(&mut self) -> Vec<Dispatchable<S, A>> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Drain all plain actions dispatched so far. Async ones are discarded.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        self.drain_dispatched()
            .into_iter()
            .filter_map(Dispatchable::into_plain)
            .collect()
    }

    /// Check if anything was dispatched.
    pub fn has_emitted(&mut self) -> bool {
        !self.drain_dispatched().is_empty()
    }

    /// Drain all emitted actions that belong to a specific category.
    ///
    /// Everything else stays queued for later draining.
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let mut matching = Vec::new();
        for action in self.drain_dispatched() {
            match action {
                Dispatchable::Plain(plain) if plain.category() == Some(category) => {
                    matching.push(plain)
                }
                other => {
                    let _ = self.dispatcher.dispatch(other);
                }
            }
        }
        matching
    }

    /// Wait up to `timeout` for the next plain action.
    pub async fn next_emitted(&mut self, timeout: Duration) -> Option<A> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(Dispatchable::Plain(action))) => return Some(action),
                Ok(Some(Dispatchable::Async(_))) => continue,
                Ok(None) | Err(_) => return None,
            }
        }
    }

    /// Whether nothing at all is dispatched within `window`.
    ///
    /// Anything that does arrive is put back in the queue.
    pub async fn stays_quiet_for(&mut self, window: Duration) -> bool {
        match tokio::time::timeout(window, self.rx.recv()).await {
            Ok(Some(action)) => {
                let _ = self.dispatcher.dispatch(action);
                false
            }
            Ok(None) | Err(_) => true,
        }
    }
}

impl<S: Default + 'static, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Assert that a specific action was emitted.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, MoviesAction::SetGenres { .. });
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first action matching a pattern.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// if let Some(MoviesAction::SetGenres { genres }) = find_emitted!(actions, MoviesAction::SetGenres { .. }) {
///     assert_eq!(genres.len(), 19);
/// }
/// ```
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assert that an action of a specific category was emitted.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_category_emitted!(actions, "movies");
/// ```
#[macro_export]
macro_rules! assert_category_emitted {
    ($actions:expr, $category:expr) => {
        assert!(
            $actions.iter().any(|a| {
                use $crate::Action;
                a.category() == Some($category)
            }),
            "Expected action with category `{}` to be emitted, but got: {:?}",
            $category,
            $actions
        );
    };
}

/// Count how many actions belong to a specific category.
#[macro_export]
macro_rules! count_category {
    ($actions:expr, $category:expr) => {{
        use $crate::Action;
        $actions
            .iter()
            .filter(|a| a.category() == Some($category))
            .count()
    }};
}
