//! Runtime loop for a store.
//!
//! [`StoreRuntime`] owns a [`Store`] and drains its dispatch queue on the
//! current task, so async actions and other threads can dispatch through a
//! [`Dispatcher`] while every reduction still happens on one context.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::action::Action;
use crate::dispatch::{Dispatchable, Dispatcher, StateReader};
use crate::store::{DispatchError, Store};

/// Drives a store from its dispatch queue until cancelled.
///
/// # Example
///
/// ```ignore
/// let mut runtime = StoreRuntime::new(store);
/// let dispatcher = runtime.dispatcher();
/// let cancel = runtime.cancel_token();
///
/// tokio::spawn(async move {
///     dispatcher.dispatch(fetch_genres(env));
/// });
///
/// runtime.run().await;
/// ```
pub struct StoreRuntime<S, A> {
    store: Store<S, A>,
    cancel: CancellationToken,
}

impl<S, A> StoreRuntime<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Wrap an existing store.
    pub fn new(store: Store<S, A>) -> Self {
        Self {
            store,
            cancel: CancellationToken::new(),
        }
    }

    /// Queue an action for the loop.
    pub fn enqueue(&self, action: impl Into<Dispatchable<S, A>>) {
        let _ = self.store.dispatcher().dispatch(action);
    }

    /// Clone of the store's dispatch handle.
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        self.store.dispatcher()
    }

    /// Read handle for the committed state.
    pub fn state_reader(&self) -> StateReader<S> {
        self.store.state_reader()
    }

    /// Current committed state.
    pub fn state(&self) -> Arc<S> {
        self.store.state()
    }

    /// Token that stops [`run`](Self::run) when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Access the wrapped store.
    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    /// Mutable access to the wrapped store.
    pub fn store_mut(&mut self) -> &mut Store<S, A> {
        &mut self.store
    }

    /// Consume the runtime and return the store.
    pub fn into_store(self) -> Store<S, A> {
        self.store
    }

    /// Dispatch queued actions until the cancel token fires.
    ///
    /// A failed dispatch is logged and the loop continues with the next one.
    pub async fn run(&mut self) {
        loop {
            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    tracing::debug!("store runtime cancelled");
                    break;
                }

                Some(action) = self.store.next_pending() => {
                    self.dispatch_logged(action);
                }

                else => break,
            }
        }
    }

    /// Dispatch queued actions until none arrives for `quiet`.
    ///
    /// Returns the number of dispatches processed. Useful for letting
    /// in-flight async actions land without running forever.
    pub async fn settle(&mut self, quiet: Duration) -> usize {
        let mut processed = 0;
        while !self.cancel.is_cancelled() {
            match tokio::time::timeout(quiet, self.store.next_pending()).await {
                Ok(Some(action)) => {
                    self.dispatch_logged(action);
                    processed += 1;
                }
                Ok(None) | Err(_) => break,
            }
        }
        processed
    }

    fn dispatch_logged(&mut self, action: Dispatchable<S, A>) {
        let name = action.name();
        if let Err(err) = self.store.dispatch(action) {
            log_failure(name, &err);
        }
    }
}

fn log_failure(action: &'static str, err: &DispatchError) {
    tracing::warn!(action = %action, error = %err, "dispatch failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::AsyncAction;
    use crate::middleware::AsyncMiddleware;
    use futures::future::BoxFuture;
    use futures::FutureExt;

    #[derive(Clone, Debug, PartialEq)]
    enum CountAction {
        Add(i32),
        Explode,
    }

    impl Action for CountAction {
        fn name(&self) -> &'static str {
            match self {
                CountAction::Add(_) => "Add",
                CountAction::Explode => "Explode",
            }
        }
    }

    fn reducer(state: &i32, action: &CountAction) -> i32 {
        match action {
            CountAction::Add(n) => state + n,
            CountAction::Explode => panic!("explode"),
        }
    }

    #[derive(Debug)]
    struct AddTwice;

    impl AsyncAction<i32, CountAction> for AddTwice {
        fn name(&self) -> &'static str {
            "AddTwice"
        }

        fn execute(
            &self,
            _state: Option<Arc<i32>>,
            dispatch: Dispatcher<i32, CountAction>,
        ) -> BoxFuture<'static, ()> {
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                dispatch.dispatch(CountAction::Add(1));
                dispatch.dispatch(CountAction::Add(1));
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_settle_lands_async_follow_ups() {
        let store = Store::builder(0, reducer).middleware(AsyncMiddleware).build();
        let mut runtime = StoreRuntime::new(store);

        runtime.enqueue(Dispatchable::from_async(AddTwice));
        let processed = runtime.settle(Duration::from_millis(100)).await;

        assert_eq!(processed, 3);
        assert_eq!(*runtime.state(), 2);
    }

    #[tokio::test]
    async fn test_failed_dispatch_does_not_stop_the_loop() {
        let mut runtime = StoreRuntime::new(Store::new(0, reducer));

        runtime.enqueue(CountAction::Explode);
        runtime.enqueue(CountAction::Add(5));
        runtime.settle(Duration::from_millis(20)).await;

        assert_eq!(*runtime.state(), 5);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancel() {
        let mut runtime = StoreRuntime::new(Store::new(0, reducer));
        let dispatcher = runtime.dispatcher();
        let cancel = runtime.cancel_token();
        let mut reader = runtime.state_reader();

        let driver = tokio::spawn(async move {
            runtime.run().await;
            runtime.into_store()
        });

        dispatcher.dispatch(CountAction::Add(3));
        assert!(reader.changed().await);
        assert_eq!(*reader.get(), 3);

        cancel.cancel();
        let store = driver.await.unwrap();
        assert_eq!(*store.state(), 3);
    }
}
