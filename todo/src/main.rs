//! Todo list demo binary
//!
//! Seeds a store, mounts a text view on it and replays a short session of
//! user actions, printing each frame.

use todo_list::view::{TodoListView, UserIntent};
use todo_list::{Todo, TodoId, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SEED: &str = r#"[
    { "id": 1, "text": "Buy milk", "done": false },
    { "id": 2, "text": "Write documentation", "done": true }
]"#;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_list=debug,todo_store_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = TodoStore::new();
    let view = TodoListView::mount(&store);

    let seed: Vec<Todo> = serde_json::from_str(SEED)?;
    store.load(seed);
    println!("{}\n", view.frame());

    let session = [
        UserIntent::EditNewTodo("Deploy to production".to_string()),
        UserIntent::Submit,
        UserIntent::Toggle(TodoId::new(1)),
        UserIntent::Edit {
            id: TodoId::new(3),
            text: "Deploy to staging".to_string(),
        },
        UserIntent::Delete(TodoId::new(2)),
    ];

    for intent in session {
        println!(">>> {intent:?}");
        view.handle(intent);
        println!("{}\n", view.frame());
    }

    let snapshot = store.snapshot();
    println!(
        "Completed: {}/{} (staging text: {:?})",
        snapshot.completed_count(),
        snapshot.count(),
        snapshot.new_todo
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
