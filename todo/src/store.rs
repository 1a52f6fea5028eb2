//! The todo state container.
//!
//! [`TodoStore`] wraps a runtime [`Store`] with one method per operation a
//! view can trigger. Each method returns once the new snapshot has been
//! published to every subscriber.

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Todo, TodoAction, TodoId, TodoState};
use todo_store_runtime::{Store, StoreConfig, Subscription};

/// Runtime store specialised for the todo list
pub type TodoRuntimeStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Todo list state container
///
/// Starts with an empty list and empty staging text. Clones are handles to
/// the same state; pass one to each view that needs it.
///
/// # Example
///
/// ```
/// use todo_list::{Todo, TodoStore};
///
/// let store = TodoStore::new();
/// store.set_new_todo("milk");
/// store.add_todo();
///
/// assert_eq!(store.todos(), vec![Todo::new(1, "milk")]);
/// // The staging text is not cleared by add_todo.
/// assert_eq!(store.new_todo(), "milk");
/// ```
#[derive(Clone)]
pub struct TodoStore {
    store: TodoRuntimeStore,
}

impl TodoStore {
    /// Creates an empty store with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default().with_label("todos"))
    }

    /// Creates an empty store with custom configuration
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(TodoState::new(), TodoReducer::new(), TodoEnvironment, config),
        }
    }

    /// Replaces the whole list
    pub fn load(&self, todos: Vec<Todo>) {
        self.dispatch(TodoAction::Load(todos));
    }

    /// Appends an item with the current staging text
    pub fn add_todo(&self) {
        self.dispatch(TodoAction::AddTodo);
    }

    /// Replaces the staging text
    pub fn set_new_todo(&self, text: impl Into<String>) {
        self.dispatch(TodoAction::SetNewTodo(text.into()));
    }

    /// Replaces the text of the item with `id`; no-op if absent
    pub fn update_todo(&self, id: TodoId, text: impl Into<String>) {
        self.dispatch(TodoAction::UpdateTodo {
            id,
            text: text.into(),
        });
    }

    /// Flips the completion flag of the item with `id`; no-op if absent
    pub fn toggle(&self, id: TodoId) {
        self.dispatch(TodoAction::Toggle(id));
    }

    /// Deletes the item with `id`; no-op if absent
    pub fn remove_todo(&self, id: TodoId) {
        self.dispatch(TodoAction::RemoveTodo(id));
    }

    /// The current snapshot
    #[must_use]
    pub fn snapshot(&self) -> TodoState {
        self.store.snapshot()
    }

    /// The current list
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.store.state(|s| s.todos.clone())
    }

    /// The current staging text
    #[must_use]
    pub fn new_todo(&self) -> String {
        self.store.state(|s| s.new_todo.clone())
    }

    /// Read the current snapshot through a closure
    ///
    /// The closure may call other store operations; it keeps seeing the
    /// snapshot taken before it ran.
    pub fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TodoState) -> T,
    {
        self.store.state(f)
    }

    /// Observe every snapshot published after this call
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&TodoState) + 'static,
    {
        self.store.subscribe(callback)
    }

    /// The underlying runtime store
    #[must_use]
    pub const fn runtime(&self) -> &TodoRuntimeStore {
        &self.store
    }

    fn dispatch(&self, action: TodoAction) {
        // Only subscribers that keep sending from their callbacks can hit the
        // feedback limit; the todo reducer itself returns no effects.
        if let Err(error) = self.store.send(action) {
            tracing::error!(%error, "Todo action failed");
        }
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("state", &self.snapshot())
            .field("subscribers", &self.store.subscriber_count())
            .finish()
    }
}
