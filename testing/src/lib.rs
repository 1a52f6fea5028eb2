//! # Todo Store Testing
//!
//! Testing utilities for reducers and stores.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for reducers
//! - [`assertions`]: Helpers for checking returned effects
//! - [`mocks::SnapshotRecorder`]: A subscriber that records every published snapshot
//! - [`helpers::init_test_tracing`]: Log output captured by the test harness
//!
//! ## Example
//!
//! ```ignore
//! use todo_store_testing::SnapshotRecorder;
//!
//! let store = Store::new(TodoState::default(), TodoReducer, TodoEnvironment);
//! let recorder = SnapshotRecorder::new();
//! let _sub = store.subscribe(recorder.callback());
//!
//! store.send(TodoAction::SetNewTodo("milk".into()))?;
//! assert_eq!(recorder.len(), 1);
//! ```


/// Mock collaborators for store tests
pub mod mocks {
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every snapshot a store publishes
    ///
    /// Clones share the same recording, so one clone can be moved into the
    /// store as a callback while the test keeps another to inspect.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_store_testing::mocks::SnapshotRecorder;
    ///
    /// let recorder = SnapshotRecorder::<u32>::new();
    /// let callback = recorder.callback();
    /// callback(&1);
    /// callback(&2);
    /// assert_eq!(recorder.snapshots(), vec![1, 2]);
    /// assert_eq!(recorder.last(), Some(2));
    /// ```
    #[derive(Debug)]
    pub struct SnapshotRecorder<S> {
        snapshots: Rc<RefCell<Vec<S>>>,
    }

    impl<S> Clone for SnapshotRecorder<S> {
        fn clone(&self) -> Self {
            Self {
                snapshots: Rc::clone(&self.snapshots),
            }
        }
    }

    impl<S> Default for SnapshotRecorder<S> {
        fn default() -> Self {
            Self {
                snapshots: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl<S: Clone + 'static> SnapshotRecorder<S> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Callback suitable for `Store::subscribe`
        #[must_use]
        pub fn callback(&self) -> impl Fn(&S) + 'static {
            let snapshots = Rc::clone(&self.snapshots);
            move |state: &S| snapshots.borrow_mut().push(state.clone())
        }

        /// All recorded snapshots, oldest first
        #[must_use]
        pub fn snapshots(&self) -> Vec<S> {
            self.snapshots.borrow().clone()
        }

        /// The most recent snapshot
        #[must_use]
        pub fn last(&self) -> Option<S> {
            self.snapshots.borrow().last().cloned()
        }

        /// Number of recorded snapshots
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.borrow().len()
        }

        /// Whether nothing has been recorded yet
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.borrow().is_empty()
        }

        /// Forget everything recorded so far
        pub fn clear(&self) {
            self.snapshots.borrow_mut().clear();
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Route `tracing` output through the test harness
    ///
    /// Honours `RUST_LOG`. Safe to call from every test; only the first call
    /// installs a subscriber.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use mocks::SnapshotRecorder;
pub use reducer_test::{assertions, ReducerTest};
