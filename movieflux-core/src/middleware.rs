//! Middleware chain
//!
//! A middleware sees every [`Dispatchable`] before it reaches the terminal
//! stage of the store. It receives:
//!
//! - a [`MiddlewareApi`] for re-injecting actions and reading the current state
//! - the action itself, by value
//! - a [`Next`] handle for the rest of the chain
//!
//! `Next::run` consumes the handle, so a middleware can forward an action at
//! most once. Forwarding is the contract: a middleware that does not call
//! `next.run` short-circuits the action and must say so in its docs.
//!
//! The chain is assembled once when the store is built and cannot be changed
//! afterwards.

use std::sync::Arc;

use crate::action::Action;
use crate::dispatch::{AsyncAction, Dispatchable, Dispatcher, StateReader};
use crate::store::DispatchError;

/// Handles given to every middleware call.
pub struct MiddlewareApi<S, A> {
    dispatcher: Dispatcher<S, A>,
    state: StateReader<S>,
}

impl<S, A> Clone for MiddlewareApi<S, A> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S, A> MiddlewareApi<S, A> {
    pub(crate) fn new(dispatcher: Dispatcher<S, A>, state: StateReader<S>) -> Self {
        Self { dispatcher, state }
    }

    /// Queue an action for a later pass through the whole pipeline.
    ///
    /// The action is processed after the current dispatch completes, never
    /// re-entrantly.
    pub fn dispatch(&self, action: impl Into<Dispatchable<S, A>>) -> bool {
        self.dispatcher.dispatch(action)
    }

    /// Clone of the dispatch handle
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        self.dispatcher.clone()
    }

    /// Latest committed state
    pub fn state(&self) -> Arc<S> {
        self.state.get()
    }
}

/// The remainder of the chain after the current middleware.
pub struct Next<'a, S, A> {
    rest: &'a mut [Box<dyn Middleware<S, A>>],
    api: &'a MiddlewareApi<S, A>,
    terminal: &'a mut dyn FnMut(Dispatchable<S, A>) -> Result<(), DispatchError>,
}

impl<S, A> Next<'_, S, A> {
    /// Forward the action to the next middleware, or to the terminal stage.
    pub fn run(self, action: Dispatchable<S, A>) -> Result<(), DispatchError> {
        let Next {
            rest,
            api,
            terminal,
        } = self;
        match rest.split_first_mut() {
            Some((head, tail)) => head.handle(
                api,
                action,
                Next {
                    rest: tail,
                    api,
                    terminal,
                },
            ),
            None => terminal(action),
        }
    }
}

/// Run `action` through `chain` and then `terminal`.
pub(crate) fn run_chain<S, A>(
    chain: &mut [Box<dyn Middleware<S, A>>],
    api: &MiddlewareApi<S, A>,
    action: Dispatchable<S, A>,
    terminal: &mut dyn FnMut(Dispatchable<S, A>) -> Result<(), DispatchError>,
) -> Result<(), DispatchError> {
    Next {
        rest: chain,
        api,
        terminal,
    }
    .run(action)
}

/// Middleware trait for intercepting dispatches
///
/// Implement this trait to add logging, analytics, or other cross-cutting
/// concerns to the store.
pub trait Middleware<S, A>: Send {
    /// Observe `action` and hand it to `next`.
    fn handle(
        &mut self,
        api: &MiddlewareApi<S, A>,
        action: Dispatchable<S, A>,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError>;
}

/// A middleware that forwards everything untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<S, A> Middleware<S, A> for NoopMiddleware {
    fn handle(
        &mut self,
        _api: &MiddlewareApi<S, A>,
        action: Dispatchable<S, A>,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        next.run(action)
    }
}

/// Executes async actions and swallows them.
///
/// Short-circuits: [`Dispatchable::Async`] is never forwarded, so
/// middleware registered after this one and the reducer only ever see plain
/// actions. Plain actions are forwarded unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsyncMiddleware;

impl<S, A> Middleware<S, A> for AsyncMiddleware
where
    S: Send + Sync + 'static,
    A: Action,
{
    fn handle(
        &mut self,
        api: &MiddlewareApi<S, A>,
        action: Dispatchable<S, A>,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        match action {
            Dispatchable::Async(task) => spawn_async(api, task),
            plain => next.run(plain),
        }
    }
}

/// Start an async action on the current tokio runtime.
///
/// The action gets the latest committed state and a dispatcher that routes
/// its follow-up actions back through the owning store.
pub(crate) fn spawn_async<S, A>(
    api: &MiddlewareApi<S, A>,
    task: Arc<dyn AsyncAction<S, A>>,
) -> Result<(), DispatchError>
where
    S: Send + Sync + 'static,
    A: Action,
{
    let name = task.name();
    let handle = tokio::runtime::Handle::try_current()
        .map_err(|_| DispatchError::NoRuntime { action: name })?;

    tracing::debug!(action = %name, "executing async action");
    let future = task.execute(Some(api.state()), api.dispatcher());
    handle.spawn(future);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use tokio::sync::watch;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Add(i32),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Add"
        }
    }

    struct Recording {
        label: &'static str,
        seen: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Middleware<i32, TestAction> for Recording {
        fn handle(
            &mut self,
            _api: &MiddlewareApi<i32, TestAction>,
            action: Dispatchable<i32, TestAction>,
            next: Next<'_, i32, TestAction>,
        ) -> Result<(), DispatchError> {
            self.seen.lock().unwrap().push(self.label);
            next.run(action)
        }
    }

    struct Swallow;

    impl Middleware<i32, TestAction> for Swallow {
        fn handle(
            &mut self,
            _api: &MiddlewareApi<i32, TestAction>,
            _action: Dispatchable<i32, TestAction>,
            _next: Next<'_, i32, TestAction>,
        ) -> Result<(), DispatchError> {
            Ok(())
        }
    }

    fn api() -> MiddlewareApi<i32, TestAction> {
        let (dispatcher, _rx) = Dispatcher::channel();
        let (_tx, rx) = watch::channel(Arc::new(0));
        MiddlewareApi::new(dispatcher, StateReader::new(rx))
    }

    #[test]
    fn test_chain_runs_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain: Vec<Box<dyn Middleware<i32, TestAction>>> = vec![
            Box::new(Recording {
                label: "first",
                seen: seen.clone(),
            }),
            Box::new(NoopMiddleware),
            Box::new(Recording {
                label: "second",
                seen: seen.clone(),
            }),
        ];

        let mut reached = Vec::new();
        let mut terminal = |action: Dispatchable<i32, TestAction>| -> Result<(), DispatchError> {
            reached.push(action.into_plain());
            Ok(())
        };

        run_chain(&mut chain, &api(), TestAction::Add(1).into(), &mut terminal).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(reached, vec![Some(TestAction::Add(1))]);
    }

    #[test]
    fn test_short_circuit_stops_chain() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain: Vec<Box<dyn Middleware<i32, TestAction>>> = vec![
            Box::new(Swallow),
            Box::new(Recording {
                label: "after",
                seen: seen.clone(),
            }),
        ];

        let mut calls = 0;
        let mut terminal = |_action: Dispatchable<i32, TestAction>| -> Result<(), DispatchError> {
            calls += 1;
            Ok(())
        };

        run_chain(&mut chain, &api(), TestAction::Add(1).into(), &mut terminal).unwrap();

        assert_eq!(calls, 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_chain_goes_straight_to_terminal() {
        let mut chain: Vec<Box<dyn Middleware<i32, TestAction>>> = Vec::new();
        let mut calls = 0;
        let mut terminal = |_action: Dispatchable<i32, TestAction>| -> Result<(), DispatchError> {
            calls += 1;
            Ok(())
        };

        run_chain(&mut chain, &api(), TestAction::Add(2).into(), &mut terminal).unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_api_dispatch_queues_action() {
        let (dispatcher, mut rx) = Dispatcher::channel();
        let (_tx, state_rx) = watch::channel(Arc::new(7));
        let api = MiddlewareApi::new(dispatcher, StateReader::new(state_rx));

        assert_eq!(*api.state(), 7);
        assert!(api.dispatch(TestAction::Add(3)));
        assert_eq!(
            rx.try_recv().unwrap().into_plain(),
            Some(TestAction::Add(3))
        );
    }
}
