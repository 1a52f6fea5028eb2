//! Text rendering for the todo list.
//!
//! [`render`] turns a snapshot into a frame of plain text. [`UserIntent`]
//! is what a user can do to the list; [`dispatch`] maps each intent to
//! exactly one [`TodoStore`] call. [`TodoListView`] ties the two together by
//! re-rendering on every published snapshot.

use crate::store::TodoStore;
use crate::types::{Todo, TodoId, TodoState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use todo_store_runtime::Subscription;

/// Heading printed above the items
pub const HEADING: &str = "Todo List";

/// Something the user did to the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserIntent {
    /// Clicked the checkbox of an item
    Toggle(TodoId),
    /// Edited the text field of an item
    Edit {
        /// Item being edited
        id: TodoId,
        /// Full new text of the field
        text: String,
    },
    /// Clicked the delete button of an item
    Delete(TodoId),
    /// Typed into the new-item field
    EditNewTodo(String),
    /// Submitted the new-item field
    Submit,
}

/// Forward one intent to the store
pub fn dispatch(store: &TodoStore, intent: UserIntent) {
    tracing::trace!(?intent, "Dispatching user intent");
    match intent {
        UserIntent::Toggle(id) => store.toggle(id),
        UserIntent::Edit { id, text } => store.update_todo(id, text),
        UserIntent::Delete(id) => store.remove_todo(id),
        UserIntent::EditNewTodo(text) => store.set_new_todo(text),
        UserIntent::Submit => store.add_todo(),
    }
}

/// Render one item as `[x] <id>: <text>`
#[must_use]
pub fn render_item(todo: &Todo) -> String {
    let mark = if todo.done { 'x' } else { ' ' };
    format!("[{mark}] {}: {}", todo.id, todo.text)
}

/// Render a whole snapshot: the heading, then one line per item
#[must_use]
pub fn render(state: &TodoState) -> String {
    let mut frame = String::from(HEADING);
    for todo in &state.todos {
        frame.push('\n');
        frame.push_str(&render_item(todo));
    }
    frame
}

/// A mounted todo list view
///
/// Holds the latest rendered frame and keeps it current through a store
/// subscription. Dropping the view unmounts it.
#[derive(Debug)]
pub struct TodoListView {
    store: TodoStore,
    frame: Rc<RefCell<String>>,
    renders: Rc<Cell<usize>>,
    _subscription: Subscription,
}

impl TodoListView {
    /// Render the current snapshot and subscribe for updates
    #[must_use]
    pub fn mount(store: &TodoStore) -> Self {
        let frame = Rc::new(RefCell::new(store.read(render)));
        let renders = Rc::new(Cell::new(1));

        let target = Rc::clone(&frame);
        let counter = Rc::clone(&renders);
        let subscription = store.subscribe(move |state: &TodoState| {
            *target.borrow_mut() = render(state);
            counter.set(counter.get() + 1);
        });

        tracing::debug!("Todo list view mounted");

        Self {
            store: store.clone(),
            frame,
            renders,
            _subscription: subscription,
        }
    }

    /// The most recent frame
    #[must_use]
    pub fn frame(&self) -> String {
        self.frame.borrow().clone()
    }

    /// How many frames have been rendered, including the initial one
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    /// Forward a user action to the store this view is mounted on
    pub fn handle(&self, intent: UserIntent) {
        dispatch(&self.store, intent);
    }
}
