//! Integration tests for Store publication and subscriptions
//!
//! Exercises the ordering guarantees observers rely on: every `send`
//! publishes before returning, subscribers may re-enter the store, and
//! dropping a subscription takes effect before the next publication.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use todo_store_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use todo_store_runtime::{Store, StoreConfig, StoreError, Subscription};
use todo_store_testing::{helpers::init_test_tracing, SnapshotRecorder};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
struct LogState {
    entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum LogAction {
    Append(String),
    /// Append, then feed an `Append` with the suffixed text back in
    AppendThen(String, String),
    Clear,
}

struct LogReducer;

impl Reducer for LogReducer {
    type State = LogState;
    type Action = LogAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LogAction::Append(entry) => {
                state.entries.push(entry);
                SmallVec::new()
            },
            LogAction::AppendThen(first, second) => {
                state.entries.push(first);
                smallvec![Effect::send(LogAction::Append(second))]
            },
            LogAction::Clear => {
                state.entries.clear();
                smallvec![Effect::None]
            },
        }
    }
}

type LogStore = Store<LogState, LogAction, (), LogReducer>;

fn log_store() -> LogStore {
    init_test_tracing();
    Store::with_config(
        LogState::default(),
        LogReducer,
        (),
        StoreConfig::default().with_label("log"),
    )
}

fn append(text: &str) -> LogAction {
    LogAction::Append(text.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn every_send_publishes_one_snapshot() {
    let store = log_store();
    let recorder = SnapshotRecorder::<LogState>::new();
    let _sub = store.subscribe(recorder.callback());

    store.send(append("a")).unwrap();
    store.send(append("b")).unwrap();
    store.send(LogAction::Clear).unwrap();

    let snapshots = recorder.snapshots();
    assert_eq!(snapshots.len(), 3);
    assert_eq!(snapshots[0].entries, vec!["a"]);
    assert_eq!(snapshots[1].entries, vec!["a", "b"]);
    assert!(snapshots[2].entries.is_empty());
}

#[test]
fn no_publication_without_send() {
    let store = log_store();
    let recorder = SnapshotRecorder::<LogState>::new();
    let _sub = store.subscribe(recorder.callback());
    assert!(recorder.is_empty());
}

#[test]
fn all_subscribers_receive_the_same_snapshot() {
    let store = log_store();
    let first = SnapshotRecorder::<LogState>::new();
    let second = SnapshotRecorder::<LogState>::new();
    let _a = store.subscribe(first.callback());
    let _b = store.subscribe(second.callback());
    assert_eq!(store.subscriber_count(), 2);

    store.send(append("x")).unwrap();

    assert_eq!(first.last(), second.last());
    assert_eq!(first.last(), Some(store.snapshot()));
}

#[test]
fn dropped_subscription_stops_receiving() {
    let store = log_store();
    let recorder = SnapshotRecorder::<LogState>::new();
    let sub = store.subscribe(recorder.callback());

    store.send(append("a")).unwrap();
    drop(sub);
    store.send(append("b")).unwrap();

    assert_eq!(recorder.len(), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn feedback_is_published_after_the_triggering_action() {
    let store = log_store();
    let recorder = SnapshotRecorder::<LogState>::new();
    let _sub = store.subscribe(recorder.callback());

    store
        .send(LogAction::AppendThen("first".into(), "second".into()))
        .unwrap();

    let snapshots = recorder.snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].entries, vec!["first"]);
    assert_eq!(snapshots[1].entries, vec!["first", "second"]);
}

#[test]
fn subscriber_may_send_from_its_callback() {
    let store = log_store();
    let echo = store.clone();
    let fired = Rc::new(Cell::new(false));
    let guard = Rc::clone(&fired);

    let _sub = store.subscribe(move |state: &LogState| {
        if state.entries.last().map(String::as_str) == Some("ping") && !guard.get() {
            guard.set(true);
            echo.send(append("pong")).unwrap();
        }
    });

    store.send(append("ping")).unwrap();
    assert_eq!(store.state(|s| s.entries.clone()), vec!["ping", "pong"]);
}

#[test]
fn later_subscribers_end_on_the_newest_snapshot() {
    let store = log_store();
    let echo = store.clone();
    let early = SnapshotRecorder::<LogState>::new();
    let late = SnapshotRecorder::<LogState>::new();

    let _early = store.subscribe(early.callback());
    let _echo = store.subscribe(move |state: &LogState| {
        if state.entries == ["ping"] {
            echo.send(append("pong")).unwrap();
        }
    });
    let _late = store.subscribe(late.callback());

    store.send(append("ping")).unwrap();

    let current = store.snapshot();
    assert_eq!(current.entries, vec!["ping", "pong"]);
    assert_eq!(early.last(), Some(current.clone()));
    assert_eq!(late.last(), Some(current));
    // The early subscriber saw both snapshots; the late one only the newest
    assert_eq!(early.len(), 2);
    assert_eq!(late.len(), 1);
}

#[test]
fn two_resending_subscribers_converge() {
    let store = log_store();
    let first = store.clone();
    let second = store.clone();
    let tail = SnapshotRecorder::<LogState>::new();

    let _first = store.subscribe(move |state: &LogState| {
        if state.entries.len() == 1 {
            first.send(append("from first")).unwrap();
        }
    });
    let _second = store.subscribe(move |state: &LogState| {
        if state.entries.len() == 2 {
            second.send(append("from second")).unwrap();
        }
    });
    let _tail = store.subscribe(tail.callback());

    store.send(append("start")).unwrap();

    assert_eq!(
        store.snapshot().entries,
        vec!["start", "from first", "from second"]
    );
    assert_eq!(tail.last(), Some(store.snapshot()));
}

#[test]
fn subscriber_removed_mid_publication_is_skipped() {
    let store = log_store();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let victim = Rc::clone(&slot);
    let _killer = store.subscribe(move |_: &LogState| {
        victim.borrow_mut().take();
    });

    let recorder = SnapshotRecorder::<LogState>::new();
    *slot.borrow_mut() = Some(store.subscribe(recorder.callback()));

    store.send(append("a")).unwrap();
    assert!(recorder.is_empty());
}

#[test]
fn subscriber_added_mid_publication_waits_for_next() {
    let store = log_store();
    let late = SnapshotRecorder::<LogState>::new();
    let holder: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

    let registrar = store.clone();
    let late_cb = late.clone();
    let keep = Rc::clone(&holder);
    let _sub = store.subscribe(move |_: &LogState| {
        if keep.borrow().is_empty() {
            let sub = registrar.subscribe(late_cb.callback());
            keep.borrow_mut().push(sub);
        }
    });

    store.send(append("a")).unwrap();
    assert!(late.is_empty());

    store.send(append("b")).unwrap();
    assert_eq!(late.len(), 1);
}

#[test]
fn runaway_feedback_returns_error() {
    struct LoopReducer;

    impl Reducer for LoopReducer {
        type State = u32;
        type Action = ();
        type Environment = ();

        fn reduce(&self, state: &mut u32, (): (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
            *state += 1;
            smallvec![Effect::send(())]
        }
    }

    let store = Store::with_config(0_u32, LoopReducer, (), StoreConfig::new("loop", 5));
    let recorder = SnapshotRecorder::<u32>::new();
    let _sub = store.subscribe(recorder.callback());

    assert_eq!(store.send(()), Err(StoreError::FeedbackLimitExceeded { limit: 5 }));
    assert_eq!(store.snapshot(), 6);
    assert_eq!(recorder.len(), 6);
}
