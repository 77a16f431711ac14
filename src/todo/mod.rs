//! Todo list for hotelier.

mod repository;
mod types;

pub use repository::TodoRepository;
pub use types::{Todo, MAX_TODO_LENGTH};
