//! Metric names recorded by the store.
//!
//! The store records through the `metrics` facade only. Without an installed
//! recorder every call is a no-op; applications that want the numbers install
//! an exporter of their choice and call [`register_metrics`] once.
//!
//! # Example
//!
//! ```
//! todo_store_runtime::metrics::register_metrics();
//! ```

use metrics::{describe_counter, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions processed, including feedback actions
pub const ACTIONS_TOTAL: &str = "store.actions.total";
/// Snapshots published to subscribers
pub const PUBLICATIONS_TOTAL: &str = "store.publications.total";
/// Feedback actions dropped at the depth limit
pub const FEEDBACK_LIMIT_EXCEEDED: &str = "store.feedback.limit_exceeded";
/// Time spent inside `Reducer::reduce`
pub const REDUCER_DURATION_SECONDS: &str = "store.reducer.duration_seconds";

/// Describe every store metric to the installed recorder
pub fn register_metrics() {
    describe_counter!(ACTIONS_TOTAL, "Actions processed by the store, including feedback actions");
    describe_counter!(PUBLICATIONS_TOTAL, "Snapshots published to subscribers");
    describe_counter!(
        FEEDBACK_LIMIT_EXCEEDED,
        "Feedback actions dropped because the depth limit was reached"
    );
    describe_histogram!(
        REDUCER_DURATION_SECONDS,
        Unit::Seconds,
        "Time spent executing the reducer"
    );
}
