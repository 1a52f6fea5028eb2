//! # Todo Store Runtime
//!
//! Synchronous runtime for the reducer architecture.
//!
//! This crate provides the [`Store`] that owns a single state value, runs
//! the reducer for every action and publishes the resulting snapshot to
//! subscribers before returning.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, reducer and environment; the only mutation point
//! - **Subscriptions**: Observers notified synchronously after every action
//! - **Effect Executor**: Feeds `Effect::Send` actions back into the store
//!
//! Everything runs on the calling thread. The store is `!Send` by
//! construction and is meant to be passed explicitly to the views that use it.
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! let _subscription = store.subscribe(|state| println!("{state:?}"));
//!
//! // Send an action; subscribers have seen the new state when this returns
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;
use todo_store_core::{effect::Effect, reducer::Reducer};

/// Metric names and descriptions for the store
pub mod metrics;

/// Subscriber registry and RAII subscription handles
pub mod subscription;

pub use error::StoreError;
pub use store::Store;
pub use subscription::Subscription;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// A chain of `Effect::Send` feedback actions grew past the configured limit
        ///
        /// Actions processed before the limit was hit stay applied and
        /// published. The action that would have exceeded it is dropped.
        #[error("Feedback chain exceeded the limit of {limit} actions")]
        FeedbackLimitExceeded {
            /// The configured `max_feedback_depth`
            limit: usize,
        },
    }
}

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_store_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_label("todos")
///     .with_max_feedback_depth(8);
///
/// assert_eq!(config.label, "todos");
/// assert_eq!(config.max_feedback_depth, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name of the store in tracing spans and metric labels
    pub label: String,
    /// How many `Effect::Send` hops a single `send` may trigger
    pub max_feedback_depth: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub fn new(label: impl Into<String>, max_feedback_depth: usize) -> Self {
        Self {
            label: label.into(),
            max_feedback_depth,
        }
    }

    /// Set the store label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the feedback depth limit
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            label: "store".to_string(),
            max_feedback_depth: 32,
        }
    }
}

/// Store module - the state container
pub mod store {
    use super::{Cell, Effect, PhantomData, Rc, Reducer, RefCell, StoreConfig, StoreError};
    use crate::metrics::{
        counter, histogram, ACTIONS_TOTAL, FEEDBACK_LIMIT_EXCEEDED, PUBLICATIONS_TOTAL,
        REDUCER_DURATION_SECONDS,
    };
    use crate::subscription::{Registry, Subscription};

    struct Shared<S, E, R> {
        state: RefCell<S>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        subscribers: Rc<Registry<S>>,
        /// Actions currently being processed further up the call stack
        in_flight: Cell<usize>,
    }

    /// Keeps `in_flight` accurate on every exit path of `dispatch`
    struct InFlight<'a>(&'a Cell<usize>);

    impl<'a> InFlight<'a> {
        fn enter(counter: &'a Cell<usize>) -> Self {
            counter.set(counter.get() + 1);
            Self(counter)
        }
    }

    impl Drop for InFlight<'_> {
        fn drop(&mut self) {
            self.0.set(self.0.get().saturating_sub(1));
        }
    }

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned exclusively, replaced only through `send`)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Subscribers (notified synchronously with each new snapshot)
    ///
    /// Cloning a `Store` yields another handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        shared: Rc<Shared<S, E, R>>,
        _action: PhantomData<fn(A)>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                shared: Rc::clone(&self.shared),
                _action: PhantomData,
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            tracing::debug!(store = %config.label, "Creating store");

            Self {
                shared: Rc::new(Shared {
                    state: RefCell::new(initial_state),
                    reducer,
                    environment,
                    config,
                    subscribers: Rc::new(Registry::new()),
                    in_flight: Cell::new(0),
                }),
                _action: PhantomData,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub fn config(&self) -> &StoreConfig {
            &self.shared.config
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, publishes the new snapshot to every subscriber
        /// and then executes the returned effects. Everything has happened
        /// by the time this returns.
        ///
        /// A `send` made from a subscriber callback counts as one more level
        /// of feedback on top of the action being published.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if `Effect::Send`
        /// chains or re-entrant sends go deeper than
        /// `StoreConfig::max_feedback_depth`.
        #[tracing::instrument(skip(self, action), fields(store = %self.shared.config.label), name = "store_send")]
        pub fn send(&self, action: A) -> Result<(), StoreError> {
            self.dispatch(action, self.shared.in_flight.get())
        }

        fn dispatch(&self, action: A, depth: usize) -> Result<(), StoreError> {
            let limit = self.shared.config.max_feedback_depth;
            if depth > limit {
                tracing::error!(depth, limit, "Dropping feedback action: depth limit reached");
                counter!(FEEDBACK_LIMIT_EXCEEDED).increment(1);
                return Err(StoreError::FeedbackLimitExceeded { limit });
            }

            let _in_flight = InFlight::enter(&self.shared.in_flight);
            tracing::debug!(depth, "Processing action");
            counter!(ACTIONS_TOTAL).increment(1);

            let effects = {
                let mut state = self.shared.state.borrow_mut();

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects =
                    self.shared
                        .reducer
                        .reduce(&mut state, action, &self.shared.environment);
                histogram!(REDUCER_DURATION_SECONDS)
                    .record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            self.publish();

            for effect in effects {
                self.execute_effect(effect, depth)?;
            }

            Ok(())
        }

        fn execute_effect(&self, effect: Effect<A>, depth: usize) -> Result<(), StoreError> {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    Ok(())
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    for effect in effects {
                        self.execute_effect(effect, depth)?;
                    }
                    Ok(())
                },
                Effect::Send(action) => {
                    tracing::trace!("Executing Effect::Send");
                    self.dispatch(*action, depth + 1)
                },
            }
        }

        /// Notify every live subscriber of the current state
        ///
        /// Subscribers receive a clone taken after the reducer released the
        /// state, so they are free to `send` from inside the callback.
        fn publish(&self) {
            let snapshot = self.shared.state.borrow().clone();
            let delivered = self.shared.subscribers.notify(&snapshot);
            counter!(PUBLICATIONS_TOTAL).increment(1);
            tracing::trace!(delivered, "Published snapshot");
        }

        /// Read current state via a closure
        ///
        /// The closure sees a snapshot taken before it runs, so it may call
        /// back into the store.
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let snapshot = self.snapshot();
            f(&snapshot)
        }

        /// Clone of the whole current state
        #[must_use]
        pub fn snapshot(&self) -> S {
            self.shared.state.borrow().clone()
        }

        /// Register an observer for every future snapshot
        ///
        /// The callback is not invoked with the current state; read it with
        /// [`Store::snapshot`] if needed. Dropping the returned
        /// [`Subscription`] unregisters the callback.
        ///
        /// A callback that sends to the store supersedes the publication it
        /// was called from: subscribers after it receive only the newer
        /// snapshot. Such sends count towards `max_feedback_depth`.
        ///
        /// A callback owning a clone of this store forms a reference cycle
        /// while registered; drop its [`Subscription`] to break it.
        pub fn subscribe<F>(&self, callback: F) -> Subscription
        where
            F: Fn(&S) + 'static,
        {
            let subscription = Registry::subscribe(&self.shared.subscribers, callback);
            tracing::debug!(
                store = %self.shared.config.label,
                subscribers = self.shared.subscribers.len(),
                "Subscriber added"
            );
            subscription
        }

        /// Number of currently registered subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.shared.subscribers.len()
        }
    }
}
