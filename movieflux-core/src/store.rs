//! Centralized state store with reducer pattern

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::action::Action;
use crate::dispatch::{Dispatchable, Dispatcher, StateReader};
use crate::middleware::{run_chain, spawn_async, Middleware, MiddlewareApi};

/// A pure reducer: builds the next state from the current one and an action.
///
/// Reducers never mutate their input and never dispatch. Return a clone of
/// the input (cheap when slices are behind `Arc`) for actions they ignore.
pub type Reducer<S, A> = fn(&S, &A) -> S;

/// Listener invoked after each committed state replacement
pub type Listener<S> = Box<dyn FnMut(&Arc<S>) + Send>;

/// Errors surfaced to the caller of [`Store::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The reducer panicked. The previous state was kept.
    #[error("reducer panicked on `{action}`: {message}")]
    ReducerPanicked {
        /// Name of the action being reduced
        action: &'static str,
        /// Panic payload, when it was a string
        message: String,
    },

    /// An async action was dispatched outside of a tokio runtime.
    #[error("async action `{action}` dispatched outside of a tokio runtime")]
    NoRuntime {
        /// Name of the async action
        action: &'static str,
    },
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Capability to remove a listener.
///
/// Removal is queued and applied before the next notification cycle, so it
/// is safe to unsubscribe from inside a listener. Dropping the handle leaves
/// the listener registered.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    removals: mpsc::UnboundedSender<SubscriptionId>,
}

impl Subscription {
    /// Id of the listener this handle controls
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener before the next notification cycle.
    pub fn unsubscribe(self) {
        let _ = self.removals.send(self.id);
    }
}

/// State, reducer and listeners: everything the terminal stage touches.
struct StoreCore<S, A> {
    state: Arc<S>,
    reducer: Reducer<S, A>,
    publisher: watch::Sender<Arc<S>>,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_listener: u64,
    removals_tx: mpsc::UnboundedSender<SubscriptionId>,
    removals_rx: mpsc::UnboundedReceiver<SubscriptionId>,
    version: u64,
}

impl<S, A> StoreCore<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn terminal(
        &mut self,
        api: &MiddlewareApi<S, A>,
        action: Dispatchable<S, A>,
    ) -> Result<(), DispatchError> {
        match action {
            Dispatchable::Async(task) => spawn_async(api, task),
            Dispatchable::Plain(action) => self.reduce(&action),
        }
    }

    fn reduce(&mut self, action: &A) -> Result<(), DispatchError> {
        let reducer = self.reducer;
        let current = &self.state;
        let next = panic::catch_unwind(AssertUnwindSafe(|| reducer(current, action)))
            .map_err(|payload| {
                let err = DispatchError::ReducerPanicked {
                    action: action.name(),
                    message: panic_message(payload.as_ref()),
                };
                tracing::error!(action = %action.name(), error = %err, "reducer failed, state kept");
                err
            })?;

        self.state = Arc::new(next);
        self.version += 1;
        self.publisher.send_replace(Arc::clone(&self.state));
        self.notify();
        Ok(())
    }

    fn apply_removals(&mut self) {
        while let Ok(id) = self.removals_rx.try_recv() {
            self.listeners.retain(|(listener_id, _)| *listener_id != id);
            tracing::debug!(subscription = id.0, "listener removed");
        }
    }

    fn notify(&mut self) {
        self.apply_removals();
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the application state and provides a single point
/// for state replacement through the `dispatch` method. It is owned by one
/// context; other threads talk to it through a [`Dispatcher`] and read it
/// through a [`StateReader`].
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
///
/// # Example
/// ```ignore
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: i32,
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum MyAction {
///     Increment,
///     Decrement,
/// }
///
/// fn reducer(state: &AppState, action: &MyAction) -> AppState {
///     match action {
///         MyAction::Increment => AppState { counter: state.counter + 1 },
///         MyAction::Decrement => AppState { counter: state.counter - 1 },
///     }
/// }
///
/// let mut store = Store::new(AppState::default(), reducer);
/// store.dispatch(MyAction::Increment)?;
/// assert_eq!(store.state().counter, 1);
/// ```
pub struct Store<S, A> {
    core: StoreCore<S, A>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
    api: MiddlewareApi<S, A>,
    pending: mpsc::UnboundedReceiver<Dispatchable<S, A>>,
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("version", &self.core.version)
            .field("middleware_count", &self.middleware.len())
            .field("listener_count", &self.core.listeners.len())
            .finish()
    }
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a new store with initial state and reducer, without middleware
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::builder(state, reducer).build()
    }

    /// Start building a store with a middleware chain
    pub fn builder(state: S, reducer: Reducer<S, A>) -> StoreBuilder<S, A> {
        StoreBuilder {
            state,
            reducer,
            middleware: Vec::new(),
        }
    }

    /// Dispatch an action through the middleware chain.
    ///
    /// Plain actions reaching the end of the chain are reduced and the new
    /// state is committed before listeners run. Async actions reaching the
    /// end of the chain are executed and never reduced.
    ///
    /// On error the previously committed state is still current.
    pub fn dispatch(&mut self, action: impl Into<Dispatchable<S, A>>) -> Result<(), DispatchError> {
        let Self {
            core,
            middleware,
            api,
            ..
        } = self;
        let api: &MiddlewareApi<S, A> = api;
        let mut terminal = |action: Dispatchable<S, A>| core.terminal(api, action);
        run_chain(middleware, api, action.into(), &mut terminal)
    }

    /// Dispatch every action queued through [`Dispatcher`] handles.
    ///
    /// Stops at the first failing dispatch; later entries stay queued.
    /// Returns the number of dispatches processed.
    pub fn process_pending(&mut self) -> Result<usize, DispatchError> {
        let mut processed = 0;
        while let Ok(action) = self.pending.try_recv() {
            self.dispatch(action)?;
            processed += 1;
        }
        Ok(processed)
    }

    pub(crate) async fn next_pending(&mut self) -> Option<Dispatchable<S, A>> {
        self.pending.recv().await
    }

    /// Current committed state
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&self.core.state)
    }

    /// Number of committed state replacements so far
    pub fn version(&self) -> u64 {
        self.core.version
    }

    /// Handle for reading the state from other threads
    pub fn state_reader(&self) -> StateReader<S> {
        StateReader::new(self.core.publisher.subscribe())
    }

    /// Handle for queueing dispatches from other threads
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        self.api.dispatcher()
    }

    /// Register a listener, called after every committed state replacement.
    ///
    /// Listeners run in registration order.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&Arc<S>) + Send + 'static,
    {
        let id = SubscriptionId(self.core.next_listener);
        self.core.next_listener += 1;
        self.core.listeners.push((id, Box::new(listener)));
        tracing::debug!(subscription = id.0, "listener added");
        Subscription {
            id,
            removals: self.core.removals_tx.clone(),
        }
    }

    /// Number of registered listeners, after applying queued removals
    pub fn listener_count(&mut self) -> usize {
        self.core.apply_removals();
        self.core.listeners.len()
    }
}

/// Builder fixing the middleware chain of a [`Store`].
pub struct StoreBuilder<S, A> {
    state: S,
    reducer: Reducer<S, A>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
}

impl<S, A> StoreBuilder<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Append a middleware. Middleware run in the order they are added.
    pub fn middleware<M: Middleware<S, A> + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Build the store
    pub fn build(self) -> Store<S, A> {
        let state = Arc::new(self.state);
        let (publisher, state_rx) = watch::channel(Arc::clone(&state));
        let (dispatcher, pending) = Dispatcher::channel();
        let (removals_tx, removals_rx) = mpsc::unbounded_channel();

        Store {
            core: StoreCore {
                state,
                reducer: self.reducer,
                publisher,
                listeners: Vec::new(),
                next_listener: 0,
                removals_tx,
                removals_rx,
                version: 0,
            },
            middleware: self.middleware,
            api: MiddlewareApi::new(dispatcher, StateReader::new(state_rx)),
            pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::AsyncAction;
    use crate::middleware::{AsyncMiddleware, Next};
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        counter: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        Explode,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::Decrement => "Decrement",
                TestAction::Explode => "Explode",
            }
        }
    }

    fn test_reducer(state: &TestState, action: &TestAction) -> TestState {
        match action {
            TestAction::Increment => TestState {
                counter: state.counter + 1,
            },
            TestAction::Decrement => TestState {
                counter: state.counter - 1,
            },
            TestAction::Explode => panic!("boom"),
        }
    }

    #[derive(Debug)]
    struct IncrementLater;

    impl AsyncAction<TestState, TestAction> for IncrementLater {
        fn name(&self) -> &'static str {
            "IncrementLater"
        }

        fn execute(
            &self,
            _state: Option<Arc<TestState>>,
            dispatch: Dispatcher<TestState, TestAction>,
        ) -> BoxFuture<'static, ()> {
            async move {
                dispatch.dispatch(TestAction::Increment);
            }
            .boxed()
        }
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(TestState::default(), test_reducer);

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(store.state().counter, 1);

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(store.state().counter, 2);

        store.dispatch(TestAction::Decrement).unwrap();
        assert_eq!(store.state().counter, 1);
        assert_eq!(store.version(), 3);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_dispatch() {
        let mut store = Store::new(TestState::default(), test_reducer);
        let before = store.state();

        store.dispatch(TestAction::Increment).unwrap();

        assert_eq!(before.counter, 0);
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn test_reducer_panic_keeps_previous_state() {
        let mut store = Store::new(TestState::default(), test_reducer);
        store.dispatch(TestAction::Increment).unwrap();

        let err = store.dispatch(TestAction::Explode).unwrap_err();

        assert_eq!(
            err,
            DispatchError::ReducerPanicked {
                action: "Explode",
                message: "boom".into(),
            }
        );
        assert_eq!(store.state().counter, 1);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_listeners_run_in_order_after_commit() {
        let mut store = Store::new(TestState::default(), test_reducer);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = seen.clone();
        store.subscribe(move |state: &Arc<TestState>| {
            first.lock().unwrap().push(("first", state.counter));
        });
        let second = seen.clone();
        store.subscribe(move |state: &Arc<TestState>| {
            second.lock().unwrap().push(("second", state.counter));
        });

        store.dispatch(TestAction::Increment).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![("first", 1), ("second", 1)]);
    }

    #[test]
    fn test_failed_reduction_does_not_notify() {
        let mut store = Store::new(TestState::default(), test_reducer);
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        store.subscribe(move |_state: &Arc<TestState>| *counter.lock().unwrap() += 1);

        let _ = store.dispatch(TestAction::Explode);

        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_unsubscribe_applies_before_next_cycle() {
        let mut store = Store::new(TestState::default(), test_reducer);
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let subscription = store.subscribe(move |_state: &Arc<TestState>| {
            *counter.lock().unwrap() += 1;
        });

        store.dispatch(TestAction::Increment).unwrap();
        subscription.unsubscribe();
        store.dispatch(TestAction::Increment).unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_from_inside_listener_is_deferred() {
        let mut store = Store::new(TestState::default(), test_reducer);
        let handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let calls = Arc::new(Mutex::new(Vec::new()));

        let own_handle = handle.clone();
        let own_calls = calls.clone();
        let subscription = store.subscribe(move |state: &Arc<TestState>| {
            own_calls.lock().unwrap().push(("self", state.counter));
            if let Some(subscription) = own_handle.lock().unwrap().take() {
                subscription.unsubscribe();
            }
        });
        *handle.lock().unwrap() = Some(subscription);

        let other_calls = calls.clone();
        store.subscribe(move |state: &Arc<TestState>| {
            other_calls.lock().unwrap().push(("other", state.counter));
        });

        store.dispatch(TestAction::Increment).unwrap();
        store.dispatch(TestAction::Increment).unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![("self", 1), ("other", 1), ("other", 2)]
        );
    }

    #[test]
    fn test_state_reader_tracks_commits() {
        let mut store = Store::new(TestState::default(), test_reducer);
        let reader = store.state_reader();

        store.dispatch(TestAction::Increment).unwrap();

        assert_eq!(reader.get().counter, 1);
    }

    #[test]
    fn test_process_pending_runs_queued_actions() {
        let mut store = Store::new(TestState::default(), test_reducer);
        let dispatcher = store.dispatcher();

        dispatcher.dispatch(TestAction::Increment);
        dispatcher.dispatch(TestAction::Increment);
        assert_eq!(store.state().counter, 0);

        assert_eq!(store.process_pending().unwrap(), 2);
        assert_eq!(store.state().counter, 2);
    }

    struct Reinject;

    impl Middleware<TestState, TestAction> for Reinject {
        fn handle(
            &mut self,
            api: &MiddlewareApi<TestState, TestAction>,
            action: Dispatchable<TestState, TestAction>,
            next: Next<'_, TestState, TestAction>,
        ) -> Result<(), DispatchError> {
            if action.as_plain() == Some(&TestAction::Decrement) {
                api.dispatch(TestAction::Increment);
            }
            next.run(action)
        }
    }

    #[test]
    fn test_middleware_reinjection_is_not_reentrant() {
        let mut store = Store::builder(TestState::default(), test_reducer)
            .middleware(Reinject)
            .build();

        store.dispatch(TestAction::Decrement).unwrap();
        assert_eq!(store.state().counter, -1);

        store.process_pending().unwrap();
        assert_eq!(store.state().counter, 0);
    }

    #[test]
    fn test_async_action_outside_runtime_is_an_error() {
        let mut store = Store::builder(TestState::default(), test_reducer)
            .middleware(AsyncMiddleware)
            .build();

        let err = store
            .dispatch(Dispatchable::from_async(IncrementLater))
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::NoRuntime {
                action: "IncrementLater"
            }
        );
        assert_eq!(store.version(), 0);
    }

    #[tokio::test]
    async fn test_async_action_is_executed_not_reduced() {
        let mut store = Store::builder(TestState::default(), test_reducer)
            .middleware(AsyncMiddleware)
            .build();

        store
            .dispatch(Dispatchable::from_async(IncrementLater))
            .unwrap();
        assert_eq!(store.version(), 0);

        let queued = tokio::time::timeout(Duration::from_millis(200), store.next_pending())
            .await
            .expect("timeout")
            .expect("channel closed");
        store.dispatch(queued).unwrap();

        assert_eq!(store.state().counter, 1);
    }

    #[tokio::test]
    async fn test_terminal_stage_executes_async_without_middleware() {
        let mut store = Store::new(TestState::default(), test_reducer);

        store
            .dispatch(Dispatchable::from_async(IncrementLater))
            .unwrap();

        let queued = tokio::time::timeout(Duration::from_millis(200), store.next_pending())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert!(!queued.is_async());
        assert_eq!(store.version(), 0);
    }
}
