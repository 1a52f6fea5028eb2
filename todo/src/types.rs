//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of items plus the staging text for
//! the next item to add. The JSON form uses the field names `id`, `text`,
//! `done`, `todos` and `newTodo`.

use serde::{Deserialize, Serialize};

/// Identifier of a todo item, unique within its list
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Display text
    pub text: String,
    /// Whether the item is completed
    pub done: bool,
}

impl Todo {
    /// Creates an open todo item with the raw identifier `id`
    #[must_use]
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id: TodoId(id),
            text: text.into(),
            done: false,
        }
    }

    /// Same item, marked completed
    #[must_use]
    pub fn completed(mut self) -> Self {
        self.done = true;
        self
    }
}

/// Everything the todo store holds
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in display order
    pub todos: Vec<Todo>,
    /// Text for the next item to add
    #[serde(rename = "newTodo")]
    pub new_todo: String,
}

impl TodoState {
    /// Creates an empty list with empty staging text
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            new_todo: String::new(),
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.done).count()
    }

    /// Returns the number of open todos
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.count() - self.completed_count()
    }

    /// Returns the first todo with this ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// Every operation the todo store accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Replace the whole list
    Load(Vec<Todo>),
    /// Append an item using the current staging text
    AddTodo,
    /// Replace the staging text
    SetNewTodo(String),
    /// Replace the text of one item
    UpdateTodo {
        /// Item to edit
        id: TodoId,
        /// New text
        text: String,
    },
    /// Flip the completion flag of one item
    Toggle(TodoId),
    /// Delete one item
    RemoveTodo(TodoId),
}
