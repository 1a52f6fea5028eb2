//! Reducer logic for the todo list.
//!
//! Every action swaps the stored list for the result of the matching pure
//! function in [`crate::list`]. Nothing is validated and no effects are
//! produced.

use crate::list;
use crate::types::{TodoAction, TodoState};
use todo_store_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Environment dependencies for the todo reducer
///
/// The todo list needs none; the type exists so the store can be built the
/// same way as any other feature.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoEnvironment;

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::Load(todos) => {
                state.todos = todos;
            },
            TodoAction::AddTodo => {
                // The staging text is left as is.
                state.todos = list::add_todo(&state.todos, state.new_todo.as_str());
            },
            TodoAction::SetNewTodo(text) => {
                state.new_todo = text;
            },
            TodoAction::UpdateTodo { id, text } => {
                state.todos = list::update_todo(&state.todos, id, &text);
            },
            TodoAction::Toggle(id) => {
                state.todos = list::toggle_todo(&state.todos, id);
            },
            TodoAction::RemoveTodo(id) => {
                state.todos = list::remove_todo(&state.todos, id);
            },
        }

        SmallVec::new()
    }
}
