//! Pure list transformations.
//!
//! Every function takes the current list by reference and returns a new one.
//! None of them fail: an identifier that is not in the list leaves the
//! result equal to the input.

use crate::types::{Todo, TodoId};

/// Identifier for the next item: one more than the largest existing id
///
/// An empty list, or one holding only negative ids, counts as maximum 0.
#[must_use]
pub fn next_id(todos: &[Todo]) -> TodoId {
    let max = todos.iter().map(|t| t.id.value()).max().unwrap_or(0).max(0);
    TodoId::new(max.saturating_add(1))
}

/// Appends an open item with `text` and a fresh identifier
#[must_use]
pub fn add_todo(todos: &[Todo], text: impl Into<String>) -> Vec<Todo> {
    let mut next = Vec::with_capacity(todos.len() + 1);
    next.extend_from_slice(todos);
    next.push(Todo::new(next_id(todos).value(), text));
    next
}

/// Replaces the text of the item with `id`
#[must_use]
pub fn update_todo(todos: &[Todo], id: TodoId, text: &str) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| {
            if todo.id == id {
                Todo {
                    text: text.to_string(),
                    ..todo.clone()
                }
            } else {
                todo.clone()
            }
        })
        .collect()
}

/// Flips the completion flag of the item with `id`
#[must_use]
pub fn toggle_todo(todos: &[Todo], id: TodoId) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| Todo {
            done: if todo.id == id { !todo.done } else { todo.done },
            ..todo.clone()
        })
        .collect()
}

/// Drops the item with `id`
#[must_use]
pub fn remove_todo(todos: &[Todo], id: TodoId) -> Vec<Todo> {
    todos.iter().filter(|todo| todo.id != id).cloned().collect()
}
