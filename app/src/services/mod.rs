pub mod error;
pub mod notifier;
pub mod todo_service;

pub use error::TodoError;
pub use notifier::{FlashNotifier, MemoryNotifier, Notifier};
pub use todo_service::{Operation, TodoService};
