//! Todo list state container.
//!
//! A single store owns the list of todo items and the staging text for the
//! next one. Views read snapshots from it and call its operations; every
//! operation replaces the list with the result of a pure function and
//! publishes the new snapshot to subscribers before returning.
//!
//! - [`list`]: pure add/update/toggle/remove functions over `&[Todo]`
//! - [`TodoReducer`]: applies a [`TodoAction`] to a [`TodoState`]
//! - [`TodoStore`]: the state container views talk to
//! - [`view`]: plain-text rendering and user intent dispatch
//!
//! # Quick Start
//!
//! ```
//! use todo_list::{view::TodoListView, Todo, TodoId, TodoStore};
//!
//! let store = TodoStore::new();
//! let view = TodoListView::mount(&store);
//!
//! store.load(vec![Todo::new(1, "Buy milk")]);
//! store.set_new_todo("Write docs");
//! store.add_todo();
//! store.toggle(TodoId::new(1));
//!
//! assert_eq!(view.frame(), "Todo List\n[x] 1: Buy milk\n[ ] 2: Write docs");
//! ```

pub mod list;
pub mod reducer;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::TodoStore;
pub use types::{Todo, TodoAction, TodoId, TodoState};
